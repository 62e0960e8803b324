//! Interactive console state: feeds user commands into a [`SessionState`]
//! and renders what the simulator produced.

use crate::command::{Command, CopyTarget, HELP};
use crate::render::{self, DIM, GREEN, RESET, YELLOW};
use paygate_sim::{SessionState, SimulationController};
use tracing::warn;

/// Destination for `copy` commands.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// System clipboard via `arboard`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}

/// Result of executing one command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct Console<C: Clipboard = SystemClipboard> {
    controller: SimulationController,
    session: SessionState,
    clipboard: C,
}

impl Console<SystemClipboard> {
    pub fn new(controller: SimulationController, session: SessionState) -> Self {
        Self::with_clipboard(controller, session, SystemClipboard)
    }
}

impl<C: Clipboard> Console<C> {
    pub fn with_clipboard(controller: SimulationController, session: SessionState, clipboard: C) -> Self {
        Self {
            controller,
            session,
            clipboard,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Banner shown when the console starts.
    pub fn banner(&self) -> String {
        format!(
            "Payment Gateway API - Mock API Testing Interface\n{DIM}{} endpoints active. Type 'help' for commands.{RESET}\n\n{}",
            self.session.catalog().len(),
            self.selection_summary()
        )
    }

    /// Prompt reflecting the current selection and copy marker.
    pub fn prompt(&mut self) -> String {
        self.session.clear_expired_copy();
        match self.session.copied_field() {
            Some(field) => format!("{} ({GREEN}copied {field}{RESET})> ", self.session.endpoint_id()),
            None => format!("{}> ", self.session.endpoint_id()),
        }
    }

    fn selection_summary(&self) -> String {
        let id = self.session.endpoint_id();
        match self.session.catalog().get(id) {
            Some(endpoint) => render::endpoint_detail(endpoint, self.session.body()),
            None => String::new(),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::List(query) => {
                let endpoints = self.session.catalog().filter(&query);
                Reply::text(render::endpoint_list(
                    &endpoints,
                    Some(self.session.endpoint_id()),
                ))
            }
            Command::Select(id) => match self.session.select(&id) {
                Ok(()) => Reply::text(self.selection_summary()),
                Err(e) => Reply::text(format!("{YELLOW}{e}{RESET}\n")),
            },
            Command::Show => Reply::text(self.selection_summary()),
            Command::Body => Reply::text(format!("{}\n", self.session.body())),
            Command::Edit(text) => {
                self.session.edit_body(text);
                Reply::text(format!("{DIM}Request body updated{RESET}\n"))
            }
            Command::Reset => {
                self.session.reset_body();
                Reply::text(format!("{}\n", self.session.body()))
            }
            Command::Run => match self.controller.run_session(&mut self.session).await {
                Ok(envelope) => Reply::text(render::envelope(envelope)),
                Err(e) => Reply::text(format!("{YELLOW}{e}{RESET}\n")),
            },
            Command::Response => match self.session.response() {
                Some(envelope) => Reply::text(render::envelope(envelope)),
                None => Reply::text(format!("{DIM}No response yet. Use 'run'.{RESET}\n")),
            },
            Command::Copy(target) => self.copy(target),
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply {
                text: String::new(),
                quit: true,
            },
        }
    }

    fn copy(&mut self, target: CopyTarget) -> Reply {
        let text = match target {
            CopyTarget::Path => self
                .session
                .catalog()
                .get(self.session.endpoint_id())
                .map(|e| e.path.clone()),
            CopyTarget::Request => Some(self.session.body().to_string()),
            CopyTarget::Response => self.session.response().map(|r| r.pretty_data()),
        };
        let Some(text) = text else {
            return Reply::text(format!("{DIM}Nothing to copy{RESET}\n"));
        };

        self.session.mark_copied(target.field());
        match self.clipboard.set_text(&text) {
            Ok(()) => Reply::text(format!("{GREEN}Copied {}{RESET}\n", target.field())),
            Err(e) => {
                warn!("Clipboard not available: {}", e);
                Reply::text(format!(
                    "{YELLOW}Clipboard not available: {e}{RESET}\n{text}\n"
                ))
            }
        }
    }
}
