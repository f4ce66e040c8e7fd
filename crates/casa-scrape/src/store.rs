//! Process seed loading.

use crate::process::AdminProcess;
use camino::Utf8Path;
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate process id: {0}")]
    DuplicateId(String),
    #[error("unknown process: {0}")]
    UnknownProcess(String),
}

/// Parse a JSON array of processes, keeping file order.
pub fn parse_processes(content: &str) -> Result<Vec<AdminProcess>, ScrapeError> {
    let processes: Vec<AdminProcess> = serde_json::from_str(content)?;

    let mut seen = HashSet::with_capacity(processes.len());
    for process in &processes {
        if !seen.insert(process.id.as_str()) {
            return Err(ScrapeError::DuplicateId(process.id.clone()));
        }
    }

    Ok(processes)
}

/// Load the initial process collection from a JSON file.
///
/// Returns an empty collection if the file doesn't exist.
pub fn load_processes(path: &Utf8Path) -> Result<Vec<AdminProcess>, ScrapeError> {
    if !path.exists() {
        tracing::warn!(%path, "process seed file not found, starting empty");
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    parse_processes(&content)
}
