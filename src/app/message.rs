// SPDX-License-Identifier: MPL-2.0
//! Runtime flags and commands parsed from the command line.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// What the host should do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Fetch the history and plan the first batch.
    History,
    /// Post the payload in the file and list the generated images.
    Generate(PathBuf),
    /// Pretty-print the payload in the file.
    Format(PathBuf),
    /// Print the server's default payload.
    Payload,
    #[default]
    Help,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `zh-CN`, `en-US`).
    pub lang: Option<String>,
    /// Optional server base URL.
    /// Takes precedence over `LENS_GALLERY_SERVER_URL` and the config file.
    pub server: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `LENS_GALLERY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    pub command: Command,
}

/// Command-line parsing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagsError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    /// Malformed option value (from `pico-args`).
    Invalid(String),
}

impl FlagsError {
    /// i18n key and arguments describing the failure.
    #[must_use]
    pub fn i18n(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            FlagsError::UnknownCommand(command) => {
                ("cli-unknown-command", vec![("command", command.clone())])
            }
            FlagsError::MissingArgument(name) => {
                ("cli-missing-argument", vec![("name", (*name).to_string())])
            }
            FlagsError::Invalid(msg) => ("cli-invalid-argument", vec![("error", msg.clone())]),
        }
    }
}

impl fmt::Display for FlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagsError::UnknownCommand(command) => write!(f, "unknown command: {command}"),
            FlagsError::MissingArgument(name) => write!(f, "missing argument: {name}"),
            FlagsError::Invalid(msg) => write!(f, "invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for FlagsError {}

impl From<pico_args::Error> for FlagsError {
    fn from(err: pico_args::Error) -> Self {
        FlagsError::Invalid(err.to_string())
    }
}

/// Parses flags and the subcommand.
pub fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, FlagsError> {
    let help = args.contains(["-h", "--help"]);
    let lang = args.opt_value_from_str("--lang")?;
    let server = args.opt_value_from_str("--server")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;

    let mut rest = args.finish().into_iter().map(OsString::into_string);
    let command = match rest.next() {
        _ if help => Command::Help,
        None => Command::Help,
        Some(Ok(name)) => match name.as_str() {
            "history" => Command::History,
            "payload" => Command::Payload,
            "generate" => Command::Generate(path_arg(rest.next())?),
            "format" => Command::Format(path_arg(rest.next())?),
            "help" => Command::Help,
            _ => return Err(FlagsError::UnknownCommand(name)),
        },
        Some(Err(raw)) => {
            return Err(FlagsError::UnknownCommand(raw.to_string_lossy().into_owned()))
        }
    };

    Ok(Flags {
        lang,
        server,
        config_dir,
        command,
    })
}

fn path_arg(arg: Option<Result<String, OsString>>) -> Result<PathBuf, FlagsError> {
    match arg {
        Some(Ok(path)) => Ok(PathBuf::from(path)),
        Some(Err(raw)) => Ok(PathBuf::from(raw)),
        None => Err(FlagsError::MissingArgument("file")),
    }
}
