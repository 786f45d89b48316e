//! Binary configuration: environment defaults overridden by positional
//! arguments.

use std::time::Duration;

use algoscope_engine::{LiveConfig, PlaybackConfig, DEFAULT_DELAY, DEFAULT_SPEED};

use crate::error::{Error, Result};

/// How frames are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable line (or block) per frame
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Settings read from `ALGOSCOPE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Pause after each live frame
    pub delay: Duration,
    /// Interval between playback ticks
    pub speed: Duration,
    /// Input size; `None` picks a per-algorithm default
    pub size: Option<usize>,
    /// Seed for generated inputs
    pub seed: u64,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            speed: DEFAULT_SPEED,
            size: None,
            seed: 42,
            format: OutputFormat::Text,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidValue {
        key,
        value: value.to_string(),
    })
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup("ALGOSCOPE_DELAY_MS") {
            config.delay = Duration::from_millis(parse_number("ALGOSCOPE_DELAY_MS", &v)?);
        }
        if let Some(v) = lookup("ALGOSCOPE_SPEED_MS") {
            config.speed = Duration::from_millis(parse_number("ALGOSCOPE_SPEED_MS", &v)?);
        }
        if let Some(v) = lookup("ALGOSCOPE_SIZE") {
            config.size = Some(parse_number("ALGOSCOPE_SIZE", &v)?);
        }
        if let Some(v) = lookup("ALGOSCOPE_SEED") {
            config.seed = parse_number("ALGOSCOPE_SEED", &v)?;
        }
        if let Some(v) = lookup("ALGOSCOPE_FORMAT") {
            config.format = match v.trim().to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(Error::InvalidValue {
                        key: "ALGOSCOPE_FORMAT",
                        value: v,
                    })
                }
            };
        }
        Ok(config)
    }

    pub fn live(&self) -> LiveConfig {
        LiveConfig::default().with_delay(self.delay)
    }

    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig { speed: self.speed }
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Print the catalogue
    List,
    Run(Invocation),
}

/// `<algorithm> [size] [text]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub algorithm: String,
    pub size: Option<usize>,
    /// Input text for Huffman coding
    pub text: Option<String>,
}

impl Command {
    /// Parse arguments, excluding the program name.
    ///
    /// Multi-word algorithm names may be quoted or given as a slug. A numeric
    /// second argument is the size; anything after the name that is not a
    /// number is the text.
    pub fn parse<I, A>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let Some(first) = args.next() else {
            return Err(Error::MissingAlgorithm);
        };
        match first.as_str() {
            "-h" | "--help" | "help" => return Ok(Command::Help),
            "list" | "--list" => return Ok(Command::List),
            _ => {}
        }

        let mut invocation = Invocation {
            algorithm: first,
            size: None,
            text: None,
        };
        for arg in args {
            if invocation.size.is_none() && invocation.text.is_none() {
                if let Ok(size) = arg.parse::<usize>() {
                    invocation.size = Some(size);
                    continue;
                }
            }
            if invocation.text.is_some() {
                return Err(Error::UnexpectedArgument(arg));
            }
            invocation.text = Some(arg);
        }
        Ok(Command::Run(invocation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.live().delay, DEFAULT_DELAY);
    }

    #[test]
    fn env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ALGOSCOPE_DELAY_MS", "5"),
            ("ALGOSCOPE_SPEED_MS", "250"),
            ("ALGOSCOPE_SIZE", "12"),
            ("ALGOSCOPE_SEED", "7"),
            ("ALGOSCOPE_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.delay, Duration::from_millis(5));
        assert_eq!(config.playback().speed, Duration::from_millis(250));
        assert_eq!(config.size, Some(12));
        assert_eq!(config.seed, 7);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn bad_number_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("ALGOSCOPE_SIZE", "many")])).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { key: "ALGOSCOPE_SIZE", .. }));
    }

    #[test]
    fn parse_positional_args() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap_err().to_string(), "no algorithm given");
        assert_eq!(Command::parse(["list"]).unwrap(), Command::List);
        assert_eq!(Command::parse(["--help"]).unwrap(), Command::Help);
        assert_eq!(
            Command::parse(["quick-sort", "16"]).unwrap(),
            Command::Run(Invocation {
                algorithm: "quick-sort".into(),
                size: Some(16),
                text: None,
            })
        );
        assert_eq!(
            Command::parse(["huffman", "BEEP BOOP"]).unwrap(),
            Command::Run(Invocation {
                algorithm: "huffman".into(),
                size: None,
                text: Some("BEEP BOOP".into()),
            })
        );
    }

    #[test]
    fn parse_rejects_extra_args() {
        let err = Command::parse(["huffman", "a", "b"]).unwrap_err();
        assert!(matches!(err, Error::UnexpectedArgument(arg) if arg == "b"));
    }
}
