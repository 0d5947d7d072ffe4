//! Line-oriented command input.
//!
//! Each line is either a JSON `HostCommand`
//! (`{"type":"SelectLocation","location":"JP"}`) or a short text form:
//!
//! ```text
//! select JP       feature 392     return
//! sync KR         resize 1920 1080    quit
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use thiserror::Error;

use globeflight_core::commands::HostCommand;
use globeflight_core::error::ParseLocationError;
use globeflight_core::LocationId;

use crate::state::LoopCommand;

#[derive(Debug, Error)]
pub enum CommandParseError {
    #[error("invalid JSON command: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown command `{0}`")]
    UnknownVerb(String),
    #[error("`{verb}` expects {expected}")]
    Arguments {
        verb: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Location(#[from] ParseLocationError),
    #[error("`{verb}`: `{value}` is not a valid number")]
    Number { verb: &'static str, value: String },
}

/// Parse one input line. `Ok(None)` for blank lines and comments.
pub fn parse_command(line: &str) -> Result<Option<LoopCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.starts_with('{') {
        let command: HostCommand = serde_json::from_str(line)?;
        return Ok(Some(LoopCommand::Host(command)));
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match verb.as_str() {
        "quit" | "exit" => {
            expect_args("quit", &args, 0, "no arguments")?;
            return Ok(Some(LoopCommand::Shutdown));
        }
        "return" | "home" => {
            expect_args("return", &args, 0, "no arguments")?;
            HostCommand::ReturnToStart
        }
        "select" | "go" => {
            expect_args("select", &args, 1, "a location code")?;
            HostCommand::SelectLocation {
                location: args[0].parse::<LocationId>()?,
            }
        }
        "sync" => {
            expect_args("sync", &args, 1, "a location code")?;
            HostCommand::SyncLastLocation {
                location: args[0].parse::<LocationId>()?,
            }
        }
        "feature" => {
            expect_args("feature", &args, 1, "an ISO numeric code")?;
            HostCommand::SelectFeature {
                iso_numeric: parse_number("feature", args[0])?,
            }
        }
        "resize" => {
            expect_args("resize", &args, 2, "a width and a height")?;
            HostCommand::Resize {
                width: parse_number("resize", args[0])?,
                height: parse_number("resize", args[1])?,
            }
        }
        _ => return Err(CommandParseError::UnknownVerb(verb)),
    };
    Ok(Some(LoopCommand::Host(command)))
}

fn expect_args(
    verb: &'static str,
    args: &[&str],
    count: usize,
    expected: &'static str,
) -> Result<(), CommandParseError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(CommandParseError::Arguments { verb, expected })
    }
}

fn parse_number<T: std::str::FromStr>(
    verb: &'static str,
    value: &str,
) -> Result<T, CommandParseError> {
    value.parse().map_err(|_| CommandParseError::Number {
        verb,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(line: &str) -> HostCommand {
        match parse_command(line).unwrap() {
            Some(LoopCommand::Host(command)) => command,
            other => panic!("expected host command, got {other:?}"),
        }
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(
            host("select jp"),
            HostCommand::SelectLocation {
                location: LocationId::Japan
            }
        );
        assert_eq!(
            host("  SYNC  826 "),
            HostCommand::SyncLastLocation {
                location: LocationId::UnitedKingdom
            }
        );
        assert_eq!(host("feature 124"), HostCommand::SelectFeature { iso_numeric: 124 });
        assert_eq!(host("return"), HostCommand::ReturnToStart);
        assert_eq!(
            host("resize 1920 1080"),
            HostCommand::Resize {
                width: 1920.0,
                height: 1080.0
            }
        );
    }

    #[test]
    fn test_json_form() {
        assert_eq!(
            host(r#"{"type":"SelectLocation","location":"EG"}"#),
            HostCommand::SelectLocation {
                location: LocationId::Egypt
            }
        );
        assert_eq!(host(r#"{"type":"ReturnToStart"}"#), HostCommand::ReturnToStart);
    }

    #[test]
    fn test_quit_and_blank_lines() {
        assert_eq!(parse_command("quit").unwrap(), Some(LoopCommand::Shutdown));
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# comment").unwrap(), None);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_command("teleport JP"),
            Err(CommandParseError::UnknownVerb(_))
        ));
        assert!(matches!(
            parse_command("select"),
            Err(CommandParseError::Arguments { verb: "select", .. })
        ));
        assert!(matches!(
            parse_command("select XX"),
            Err(CommandParseError::Location(_))
        ));
        assert!(matches!(
            parse_command("feature abc"),
            Err(CommandParseError::Number { verb: "feature", .. })
        ));
        assert!(matches!(
            parse_command(r#"{"type":"Fly"}"#),
            Err(CommandParseError::Json(_))
        ));
        assert!(matches!(
            parse_command("return now"),
            Err(CommandParseError::Arguments { .. })
        ));
    }
}
