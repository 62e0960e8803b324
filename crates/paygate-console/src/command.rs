//! Parsing of interactive console commands.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// What a `copy` command puts on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Path,
    Request,
    Response,
}

impl CopyTarget {
    /// Field tag recorded in the session's copy marker.
    pub fn field(&self) -> &'static str {
        match self {
            CopyTarget::Path => "path",
            CopyTarget::Request => "request",
            CopyTarget::Response => "response",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(String),
    Select(String),
    Show,
    Body,
    Edit(String),
    Reset,
    Run,
    Response,
    Copy(CopyTarget),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" | "search" => Command::List(rest.to_string()),
            "select" | "use" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("select <endpoint-id>"));
                }
                Command::Select(rest.to_string())
            }
            "show" | "info" => Command::Show,
            "body" => Command::Body,
            "edit" | "set" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("edit <json>"));
                }
                Command::Edit(rest.to_string())
            }
            "reset" => Command::Reset,
            "run" | "test" | "send" => Command::Run,
            "response" | "last" => Command::Response,
            "copy" => match rest.to_lowercase().as_str() {
                "path" => Command::Copy(CopyTarget::Path),
                "request" | "body" => Command::Copy(CopyTarget::Request),
                "response" => Command::Copy(CopyTarget::Response),
                _ => return Err(CommandError::Usage("copy path|request|response")),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
Commands:
  list [query]                 List endpoints, filtered by name or path
  select <id>                  Select an endpoint and load its example request
  show                         Show documentation for the selected endpoint
  body                         Print the current request body
  edit <json>                  Replace the request body
  reset                        Restore the example request body
  run                          Send the simulated request
  response                     Print the last response
  copy path|request|response   Copy to the clipboard
  help                         Show this help
  quit                         Leave the console
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_list_with_and_without_query() {
        assert_eq!(Command::parse("list"), Ok(Some(Command::List(String::new()))));
        assert_eq!(
            Command::parse("list  Pay "),
            Ok(Some(Command::List("Pay".to_string())))
        );
    }

    #[test]
    fn test_edit_keeps_json_verbatim() {
        assert_eq!(
            Command::parse(r#"edit {"invoiceId": "inv 1"}"#),
            Ok(Some(Command::Edit(r#"{"invoiceId": "inv 1"}"#.to_string())))
        );
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            Command::parse("select"),
            Err(CommandError::Usage("select <endpoint-id>"))
        );
        assert_eq!(
            Command::parse("copy clipboard"),
            Err(CommandError::Usage("copy path|request|response"))
        );
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!(Command::parse("RUN"), Ok(Some(Command::Run)));
        assert_eq!(Command::parse("q"), Ok(Some(Command::Quit)));
        assert_eq!(
            Command::parse("copy Response"),
            Ok(Some(Command::Copy(CopyTarget::Response)))
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            Command::parse("dance now"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
