use crate::field::FieldKind;
use colored::Colorize;
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Errors that can occur while binding configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No value is present for the field's key
    MissingKey {
        key: String,
        kind: FieldKind,
        example: Option<String>,
    },
    /// A value is present but cannot be read as the declared kind
    TypeMismatch {
        key: String,
        kind: FieldKind,
        value: String,
        example: Option<String>,
    },
    /// The target shape cannot be bound at all; no field was processed
    InvalidTarget { reason: String },
}

impl ConfigError {
    /// The source key this error refers to, if it is a per-field error
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key, .. } | Self::TypeMismatch { key, .. } => Some(key),
            Self::InvalidTarget { .. } => None,
        }
    }

    /// Same lines as `Display`, never colorized
    ///
    /// Used for diagnostics that leave the terminal, such as [`crate::Summary`].
    pub fn plain_message(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render(&mut out, false);
        out
    }

    fn render(&self, out: &mut impl fmt::Write, color: bool) -> fmt::Result {
        let key_style = |key: &str| {
            if color {
                key.magenta().bold().to_string()
            } else {
                key.to_string()
            }
        };

        match self {
            ConfigError::MissingKey { key, kind, example } => {
                writeln!(out, "{}: Is missing and is required", key_style(key))?;
                writeln!(out, "\tExpected: {}", kind)?;
                write_example(out, &key_style(key), example, color)
            }
            ConfigError::TypeMismatch {
                key,
                kind,
                value,
                example,
            } => {
                let value = format!("'{}'", value);
                let value = if color { value.red().to_string() } else { value };
                writeln!(out, "{}: Invalid value {}", key_style(key), value)?;
                writeln!(out, "\tExpected: {}", kind)?;
                write_example(out, &key_style(key), example, color)
            }
            ConfigError::InvalidTarget { reason } => {
                let title = "Invalid configuration target";
                if color {
                    writeln!(out, "{}: {}", title.red().bold(), reason)
                } else {
                    writeln!(out, "{}: {}", title, reason)
                }
            }
        }
    }
}

fn write_example(
    out: &mut impl fmt::Write,
    key: &str,
    example: &Option<String>,
    color: bool,
) -> fmt::Result {
    if let Some(ex) = example {
        if color {
            writeln!(out, "\tExample: {}={}", key, ex.cyan())?;
        } else {
            writeln!(out, "\tExample: {}={}", key, ex)?;
        }
    }
    Ok(())
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, true)
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by source adapters while taking their snapshot
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("failed to parse env data: {0}")]
    EnvData(#[from] dotenvy::Error),
}
