use thiserror::Error;

use crate::schema::Field;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required fields: {}", join_fields(missing))]
    Validation { missing: Vec<Field> },
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected webhook payload: {0}")]
    Format(String),
    #[error("invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("$HOME must exist")]
    NoHomeDir,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
