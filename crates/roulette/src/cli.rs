//! Command-line flags and interactive commands.

use std::path::PathBuf;

use roulette_core::{Face, RouletteError};
use thiserror::Error;

/// Errors from argument or command parsing.
#[derive(Error, Debug)]
pub enum CliError {
    /// A flag that needs a value was last on the line.
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    /// A flag value did not parse.
    #[error("invalid value for {flag}: {value}")]
    InvalidValue {
        /// The flag.
        flag: &'static str,
        /// What was given.
        value: String,
    },

    /// Not a flag we know.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// Not a command we know.
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    /// Terminal I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Config or session error.
    #[error(transparent)]
    Roulette(#[from] RouletteError),
}

/// Parsed command-line flags.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// `--config <path>`
    pub config: Option<PathBuf>,
    /// `--seed <u64>`, overrides the config seed.
    pub seed: Option<u64>,
    /// `--auto <n>`: spin n times without input, then exit.
    pub auto: Option<u32>,
    /// `--script 2,5,5`: fixed first outcomes, random after.
    pub script: Option<Vec<Face>>,
    /// `--help`
    pub help: bool,
}

impl Options {
    /// Parses flags, not including the program name.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] for unknown flags and bad values.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let value = args.next().ok_or(CliError::MissingValue("--config"))?;
                    options.config = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let value = args.next().ok_or(CliError::MissingValue("--seed"))?;
                    options.seed = Some(parse_number("--seed", &value)?);
                }
                "--auto" => {
                    let value = args.next().ok_or(CliError::MissingValue("--auto"))?;
                    options.auto = Some(parse_number("--auto", &value)?);
                }
                "--script" => {
                    let value = args.next().ok_or(CliError::MissingValue("--script"))?;
                    options.script = Some(parse_script(&value)?);
                }
                "--help" | "-h" => options.help = true,
                _ => return Err(CliError::UnknownArgument(arg)),
            }
        }
        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_owned(),
    })
}

fn parse_script(value: &str) -> Result<Vec<Face>, CliError> {
    value
        .split(',')
        .map(|part| -> Result<Face, CliError> {
            let raw: u8 = parse_number("--script", part.trim())?;
            Ok(Face::new(raw)?)
        })
        .collect()
}

/// Usage text.
pub const USAGE: &str = "\
Usage: roulette [OPTIONS]

Options:
  -c, --config <path>   TOML config file
      --seed <u64>      Reproducible dice
      --auto <n>        Spin n times, then exit
      --script <list>   Fixed first outcomes, e.g. 2,5,5,5,1,6; random after
  -h, --help            Show this help

Commands (interactive):
  spin | <enter>        Start a spin
  music <id> | off      Change background music
  tracks                List music tracks
  stats                 Show history and counts
  help                  Show commands
  quit                  Exit";

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a spin.
    Spin,
    /// Select a track, or silence with `None`.
    Music(Option<String>),
    /// List the catalogue.
    Tracks,
    /// Print history and counts.
    Stats,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownCommand`] for anything unrecognised.
    pub fn parse(line: &str) -> Result<Self, CliError> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            None | Some("spin" | "s") => Self::Spin,
            Some("music" | "m") => match words.next() {
                None | Some("off" | "none") => Self::Music(None),
                Some(id) => Self::Music(Some(id.to_owned())),
            },
            Some("tracks") => Self::Tracks,
            Some("stats") => Self::Stats,
            Some("help" | "?") => Self::Help,
            Some("quit" | "q" | "exit") => Self::Quit,
            Some(other) => return Err(CliError::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let options =
            Options::parse(args(&["--config", "game.toml", "--seed", "9", "--auto", "3"])).unwrap();
        assert_eq!(options.config, Some(PathBuf::from("game.toml")));
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.auto, Some(3));
        assert!(!options.help);
    }

    #[test]
    fn test_parse_script() {
        let options = Options::parse(args(&["--script", "2, 5,6"])).unwrap();
        let values: Vec<u8> = options.script.unwrap().iter().map(|f| f.value()).collect();
        assert_eq!(values, vec![2, 5, 6]);

        assert!(matches!(
            Options::parse(args(&["--script", "2,7"])),
            Err(CliError::Roulette(RouletteError::InvalidFace(7)))
        ));
    }

    #[test]
    fn test_bad_flags() {
        assert!(matches!(
            Options::parse(args(&["--seed"])),
            Err(CliError::MissingValue("--seed"))
        ));
        assert!(matches!(
            Options::parse(args(&["--auto", "many"])),
            Err(CliError::InvalidValue { flag: "--auto", .. })
        ));
        assert!(matches!(
            Options::parse(args(&["--turbo"])),
            Err(CliError::UnknownArgument(_))
        ));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("").unwrap(), Command::Spin);
        assert_eq!(Command::parse("  spin ").unwrap(), Command::Spin);
        assert_eq!(
            Command::parse("music lofi").unwrap(),
            Command::Music(Some("lofi".into()))
        );
        assert_eq!(Command::parse("music off").unwrap(), Command::Music(None));
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
        assert!(Command::parse("dance").is_err());
    }
}
