//! Writing process logs to disk.

use crate::monitor::ProcessMonitor;
use crate::store::ScrapeError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Writes `<id>.log` files into a directory.
pub struct LogExporter {
    dir: Utf8PathBuf,
}

impl LogExporter {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Target path for a process, with unsafe filename characters replaced.
    pub fn path_for(&self, id: &str) -> Utf8PathBuf {
        let name: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.log"))
    }

    /// Write a process's exported log text and return the file path.
    ///
    /// Creates the directory if needed.
    pub fn export(&self, monitor: &ProcessMonitor, id: &str) -> Result<Utf8PathBuf, ScrapeError> {
        let text = monitor
            .export_logs(id)
            .ok_or_else(|| ScrapeError::UnknownProcess(id.to_string()))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(id);
        fs::write(&path, text)?;

        tracing::info!(process = %id, %path, "exported process logs");
        Ok(path)
    }
}
