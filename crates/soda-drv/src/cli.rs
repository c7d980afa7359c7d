//! Hand-rolled argument parsing. The teacher's own driver never pulls in a
//! flag-parsing crate either — the surface here is small enough (one
//! optional positional, two boolean flags) that a dependency would cost
//! more than it saves.

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "\
Usage: sodac [OPTIONS] [SOURCE-FILE]

Parses SOURCE-FILE (or stdin, if SOURCE-FILE is '-' or omitted) and prints
a debug dump of the decorated AST.

Options:
  -h, --help       Print this message and exit
  -V, --version    Print the version and exit
";

#[derive(Debug, Error)]
pub enum ArgError {
    #[error("unrecognized option '{0}'")]
    UnknownFlag(String),
    #[error("expected a single source file, got '{0}' and '{1}'")]
    TooManyPositionals(String, String),
}

/// Where to read the source from: the one positional argument, `-` for
/// stdin, or stdin by default when no positional was given at all.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub input: Input,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    Compile(Config),
}

/// Parses `argv` (already stripped of `argv[0]`) into an [`Action`].
pub fn parse_args(args: &[String]) -> Result<Action, ArgError> {
    let mut positional: Option<String> = None;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-V" | "--version" => return Ok(Action::Version),
            "-" => positional = Some("-".to_string()),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgError::UnknownFlag(flag.to_string()));
            }
            other => match positional {
                Some(prev) => return Err(ArgError::TooManyPositionals(prev, other.to_string())),
                None => positional = Some(other.to_string()),
            },
        }
    }
    let input = match positional.as_deref() {
        None | Some("-") => Input::Stdin,
        Some(path) => Input::File(PathBuf::from(path)),
    };
    Ok(Action::Compile(Config { input }))
}
