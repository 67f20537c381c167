//! Append-only JSONL audit trail of governance events.
//!
//! One line per event: the event's own tagged form (`"type": "vote_cast"`,
//! ...) plus `logged_at` and, when the record carries one, `occurred_at`.

use chrono::{DateTime, Utc};
use condo_application::ports::events::{GovernanceEvent, GovernanceEventPublisher};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum EventLogError {
    #[error("Could not create event log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open event log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct LogLine<'a> {
    logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occurred_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    event: &'a GovernanceEvent,
}

/// Event publisher appending to a JSONL file.
///
/// The writer is line-buffered, so each event reaches the file as soon as
/// it is published.
pub struct JsonlEventLog {
    file: Mutex<LineWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Open `path` for appending, creating it and its directory if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EventLogError> {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| EventLogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| EventLogError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &GovernanceEvent) -> std::io::Result<()> {
        let line = LogLine {
            logged_at: Utc::now(),
            occurred_at: event.occurred_at(),
            event,
        };
        let json = serde_json::to_string(&line)?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("event log writer poisoned"))?;
        writeln!(file, "{}", json)
    }
}

impl GovernanceEventPublisher for JsonlEventLog {
    fn publish(&self, event: GovernanceEvent) {
        if let Err(e) = self.append(&event) {
            warn!(
                "Dropped {} event for {}: {}",
                event.event_type(),
                self.path.display(),
                e
            );
        }
    }
}
