//! Serializable governance state and its JSON file form

use condo_domain::{
    AgendaItem, Attendance, Meeting, Member, Proxy, ScheduleOption, ScheduleVote, Vote,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Every governance record, as kept in memory and on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceSnapshot {
    pub members: Vec<Member>,
    pub meetings: Vec<Meeting>,
    pub agenda_items: Vec<AgendaItem>,
    pub proxies: Vec<Proxy>,
    pub attendance: Vec<Attendance>,
    pub votes: Vec<Vote>,
    pub schedule_options: Vec<ScheduleOption>,
    pub schedule_votes: Vec<ScheduleVote>,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Could not read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A governance snapshot stored as one pretty-printed JSON document.
pub struct JsonSnapshotFile;

impl JsonSnapshotFile {
    pub fn load(path: impl AsRef<Path>) -> Result<GovernanceSnapshot, SnapshotError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: GovernanceSnapshot =
            serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded {} members, {} meetings, {} proxies from {}",
            snapshot.members.len(),
            snapshot.meetings.len(),
            snapshot.proxies.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Write the snapshot next to `path` and rename it into place, so a
    /// crash mid-write never leaves a truncated file behind.
    pub fn save(path: impl AsRef<Path>, snapshot: &GovernanceSnapshot) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        fs::rename(&tmp, path).map_err(io_error)?;

        debug!("Saved snapshot to {}", path.display());
        Ok(())
    }
}
