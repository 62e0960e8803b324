//! Paygate Console - mock testing interface for the USDT payment gateway API
//!
//! # Usage
//!
//! ```bash
//! # Interactive console
//! paygate-console
//!
//! # List endpoints matching a query
//! paygate-console list --search pay
//!
//! # One simulated call
//! paygate-console run cancel --body '{"invoiceId":"inv_999"}'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use paygate_console::{render, Console};
use paygate_sim::{EndpointCatalog, SessionState, SimulationController, SimulatorConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "paygate-console")]
#[command(author, version, about = "Mock API testing console for the USDT payment gateway")]
struct Args {
    /// Simulator config file (YAML)
    #[arg(short, long, env = "PAYGATE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the simulated latency in milliseconds
    #[arg(short, long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List endpoints in catalog order
    List {
        /// Case-insensitive filter over name and path
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show documentation and the example request for an endpoint
    Show {
        /// Endpoint id
        id: String,
    },
    /// Send one simulated request
    Run {
        /// Endpoint id
        id: String,

        /// Request body (defaults to the endpoint's example)
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the request body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Output::Text)]
        output: Output,
    },
    /// Interactive console (default)
    Console,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    Text,
    Json,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::from_file(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(latency_ms) = args.latency_ms {
        config.latency_ms = latency_ms;
    }
    Ok(config)
}

fn endpoint<'a>(
    catalog: &'a EndpointCatalog,
    id: &str,
) -> Result<&'a paygate_sim::EndpointDescriptor> {
    catalog.get(id).with_context(|| {
        let known: Vec<&str> = catalog.endpoints().iter().map(|e| e.id.as_str()).collect();
        format!("Unknown endpoint '{id}'. Known endpoints: {}", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(&args)?;
    let catalog = Arc::new(config.load_catalog()?);
    let controller = SimulationController::new(catalog.clone(), &config);

    match args.command.unwrap_or(Cmd::Console) {
        Cmd::List { search } => {
            print!("{}", render::endpoint_list(&catalog.filter(&search), None));
        }
        Cmd::Show { id } => {
            let descriptor = endpoint(&catalog, &id)?;
            print!(
                "{}",
                render::endpoint_detail(descriptor, &catalog.example_body(&id))
            );
        }
        Cmd::Run {
            id,
            body,
            body_file,
            output,
        } => {
            let body = match (body, body_file) {
                (Some(body), _) => body,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read body file {}", path.display()))?,
                (None, None) => catalog.example_body(&id),
            };

            let envelope = controller.run_test(&id, &body).await;
            match output {
                Output::Text => print!("{}", render::envelope(&envelope)),
                Output::Json => println!("{}", render::envelope_json(&envelope)?),
            }
            if !envelope.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::Console => {
            let session = SessionState::new(catalog).with_copy_highlight(config.copy_highlight());
            paygate_console::run(Console::new(controller, session)).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
