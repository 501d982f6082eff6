use std::io;
use std::path::PathBuf;

use lotoforge::{ConfigError, LotoError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("{path} is not a valid history file: {source}")]
    HistoryFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid draw data: {0}")]
    Draw(#[from] LotoError),

    #[error("invalid ticket: {0}")]
    Ticket(#[source] LotoError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid filter `{0}`, expected NAME=MIN..MAX")]
    FilterSyntax(String),

    #[error("invalid filter `{arg}`: {source}")]
    Filter { arg: String, source: LotoError },

    #[error("generation could not start: {0}")]
    Generation(#[from] lotoforge::GenerationError),

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("output error: {0}")]
    Output(#[from] io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
