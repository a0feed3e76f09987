use std::{fs::read_to_string, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "hex" => Self::Hex,
            "base64" => Self::Base64,
            _ => return Err(format!("unknown encoding: {value}")),
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Input {
    ///
    /// capture encoding
    ///
    /// Every non-empty line of a capture is one datagram, written either as
    /// hex digits or as standard base64. Lines starting with `#` are
    /// comments.
    ///
    #[serde(default)]
    pub encoding: Encoding,
    ///
    /// walk compound packets
    ///
    /// When enabled every individual packet of a compound RTCP datagram is
    /// decoded, otherwise only the first common header is.
    ///
    #[serde(default = "Input::compound")]
    pub compound: bool,
    ///
    /// capture files
    ///
    /// `-` reads from standard input, an empty list does the same.
    ///
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Input {
    fn compound() -> bool {
        true
    }
}

impl Default for Input {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            compound: Self::compound(),
            files: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => return Err(format!("unknown log level: {value}")),
        })
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    pub fn as_level(&self) -> log::Level {
        match *self {
            Self::Error => log::Level::Error,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Log {
    ///
    /// log level
    ///
    /// An enum representing the available verbosity levels of the logger.
    ///
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub input: Input,
    #[serde(default)]
    pub log: Log,
}

#[derive(Parser, Debug)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    ///
    /// Specify the configuration file path
    ///
    /// Example: rtcp-demux --config /etc/rtcp-demux/config.json5
    ///
    #[arg(long, short)]
    config: Option<String>,
    ///
    /// Override the capture encoding of the configuration file
    ///
    #[arg(long, short)]
    encoding: Option<Encoding>,
    ///
    /// Override the log level of the configuration file
    ///
    #[arg(long)]
    log_level: Option<LogLevel>,
    ///
    /// Capture files, `-` for standard input
    ///
    files: Vec<PathBuf>,
}

impl Config {
    ///
    /// Parse a JSON5 configuration document.
    ///
    pub fn from_json5(source: &str) -> Result<Self> {
        Ok(serde_json5::from_str::<Self>(source)?)
    }

    ///
    /// Load configure from config file and command line parameters.
    ///
    /// If the configuration file path is specified, the configuration is
    /// read from the configuration file, otherwise the default configuration
    /// is used. Command line options take precedence over the file.
    ///
    pub fn load() -> Result<Self> {
        let cli = Cli::parse();
        let mut config = match &cli.config {
            Some(path) => Self::from_json5(&read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Some(encoding) = cli.encoding {
            config.input.encoding = encoding;
        }

        if let Some(level) = cli.log_level {
            config.log.level = level;
        }

        if !cli.files.is_empty() {
            config.input.files = cli.files;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_json5("{}").unwrap();

        assert_eq!(config.input.encoding, Encoding::Hex);
        assert!(config.input.compound);
        assert!(config.input.files.is_empty());
        assert_eq!(config.log.level.as_level(), log::Level::Info);
    }

    #[test]
    fn kebab_case_document() {
        let config = Config::from_json5(
            r#"{
                // captures recorded by the media gateway
                input: {
                    encoding: "base64",
                    compound: false,
                    files: ["a.txt", "-"],
                },
                log: { level: "debug" },
            }"#,
        )
        .unwrap();

        assert_eq!(config.input.encoding, Encoding::Base64);
        assert!(!config.input.compound);
        assert_eq!(config.input.files.len(), 2);
        assert_eq!(config.log.level.as_level(), log::Level::Debug);
    }

    #[test]
    fn unknown_encoding() {
        assert!(Config::from_json5(r#"{ input: { encoding: "binary" } }"#).is_err());
        assert!("binary".parse::<Encoding>().is_err());
    }
}
