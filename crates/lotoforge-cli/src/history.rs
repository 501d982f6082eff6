//! JSON history files and ticket output files.
//!
//! A history file is an array of `{"contest": n, "numbers": [..]}` records
//! in any order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lotoforge::{DrawHistory, Ticket, TicketSink};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryRecord {
    pub contest: u32,
    pub numbers: Vec<u8>,
}

pub fn parse_history(path: &Path, contents: &str) -> Result<DrawHistory, CliError> {
    let records: Vec<HistoryRecord> =
        serde_json::from_str(contents).map_err(|source| CliError::HistoryFormat {
            path: path.to_path_buf(),
            source,
        })?;
    let history = DrawHistory::from_results(
        records
            .into_iter()
            .map(|record| (record.contest, record.numbers)),
    )?;
    Ok(history)
}

/// Reads a history file. A missing path yields an empty history.
pub fn load_history(path: Option<&Path>) -> Result<DrawHistory, CliError> {
    let Some(path) = path else {
        return Ok(DrawHistory::new());
    };
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let history = parse_history(path, &contents)?;
    debug!(event = "history_loaded", draws = history.len());
    Ok(history)
}

/// Writes every saved batch to a JSON file, replacing earlier contents.
///
/// [`TicketSink::save`] cannot fail, so a write error is kept until
/// [`TicketFile::finish`] reports it.
pub struct TicketFile {
    path: PathBuf,
    error: Mutex<Option<io::Error>>,
}

impl TicketFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            error: Mutex::new(None),
        }
    }

    /// Returns the first write error, if any batch failed to save.
    pub fn finish(&self) -> Result<(), CliError> {
        let error = self.error.lock().ok().and_then(|mut slot| slot.take());
        match error {
            Some(source) => Err(CliError::Write {
                path: self.path.clone(),
                source,
            }),
            None => Ok(()),
        }
    }
}

impl TicketSink for TicketFile {
    fn save(&self, tickets: &[Ticket]) {
        let written = serde_json::to_vec_pretty(tickets)
            .map_err(io::Error::from)
            .and_then(|bytes| fs::write(&self.path, bytes));
        if let Err(error) = written {
            warn!(
                event = "tickets_not_saved",
                path = %self.path.display(),
                %error
            );
            if let Ok(mut slot) = self.error.lock() {
                slot.get_or_insert(error);
            }
        }
    }
}
