//! Checkpoint storage: one pretty-printed JSON snapshot per file.
//!
//! Files live at `<dir>/<name>.json`. The directory is created on first
//! write; nothing is ever deleted and no retention limit applies. Writes go
//! through a temp file + rename so a reader never sees half a snapshot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::debug;

use crate::core::selector::{CheckpointEntry, Selection, latest, resolve};
use crate::core::session::{SessionSnapshot, SessionState};

const EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("no saved sessions found in {}", dir.display())]
    NotFound { dir: PathBuf },
    #[error("no saved session matches '{0}'")]
    UnknownSelection(String),
    #[error("invalid checkpoint name '{0}'")]
    InvalidName(String),
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serialize checkpoint: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CheckpointError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        CheckpointError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Directory-backed checkpoint store.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Name used for automatic saves of `state`.
    pub fn auto_name(state: &SessionState) -> String {
        format!("session_{}", state.session_id)
    }

    /// Serialize every field of `state` except `action` to `<dir>/<name>.json`.
    ///
    /// Overwrites an existing checkpoint with the same name.
    pub fn write(&self, state: &SessionState, name: &str) -> Result<PathBuf, CheckpointError> {
        let file_name = file_name_for(name)?;
        let path = self.dir.join(file_name);
        let saved_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let snapshot = SessionSnapshot::capture(state, Some(saved_at));
        let mut buf = serde_json::to_string_pretty(&snapshot).map_err(CheckpointError::Serialize)?;
        buf.push('\n');

        debug!(path = %path.display(), session_id = %state.session_id, "writing checkpoint");
        fs::create_dir_all(&self.dir)
            .map_err(|err| CheckpointError::io("create directory", &self.dir, err))?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, buf).map_err(|err| CheckpointError::io("write", &tmp_path, err))?;
        fs::rename(&tmp_path, &path).map_err(|err| CheckpointError::io("replace", &path, err))?;
        Ok(path)
    }

    /// All checkpoints, sorted by name. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<CheckpointEntry>, CheckpointError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let read_dir =
            fs::read_dir(&self.dir).map_err(|err| CheckpointError::io("read", &self.dir, err))?;
        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| CheckpointError::io("read", &self.dir, err))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let metadata = entry
                .metadata()
                .map_err(|err| CheckpointError::io("stat", &path, err))?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map_err(|err| CheckpointError::io("stat", &path, err))?;
            let created = metadata.created().unwrap_or(modified);
            entries.push(CheckpointEntry {
                name: name.to_string(),
                path: path.clone(),
                created,
                modified,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Newest checkpoint by filesystem creation time.
    pub fn read_latest(&self) -> Result<(CheckpointEntry, SessionSnapshot), CheckpointError> {
        let entries = self.list()?;
        let entry = latest(&entries).ok_or_else(|| CheckpointError::NotFound {
            dir: self.dir.clone(),
        })?;
        let snapshot = read_snapshot(&entry.path)?;
        Ok((entry.clone(), snapshot))
    }

    /// Checkpoint picked by 1-based listing index or exact name.
    pub fn read_named(
        &self,
        selection: &Selection,
    ) -> Result<(CheckpointEntry, SessionSnapshot), CheckpointError> {
        let entries = self.list()?;
        if entries.is_empty() {
            return Err(CheckpointError::NotFound {
                dir: self.dir.clone(),
            });
        }
        let entry = resolve(&entries, selection).ok_or_else(|| {
            CheckpointError::UnknownSelection(match selection {
                Selection::Index(index) => index.to_string(),
                Selection::Name(name) => name.clone(),
            })
        })?;
        let snapshot = read_snapshot(&entry.path)?;
        Ok((entry.clone(), snapshot))
    }
}

/// Normalize a checkpoint name to the stem its file is stored under
/// (`[A-Za-z0-9._-]`, other characters become `_`).
pub fn checkpoint_stem(name: &str) -> Result<String, CheckpointError> {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        return Err(CheckpointError::InvalidName(name.to_string()));
    }
    Ok(stem)
}

/// File name for checkpoint `name`.
pub fn file_name_for(name: &str) -> Result<String, CheckpointError> {
    Ok(format!("{}.{EXTENSION}", checkpoint_stem(name)?))
}

fn read_snapshot(path: &Path) -> Result<SessionSnapshot, CheckpointError> {
    debug!(path = %path.display(), "reading checkpoint");
    let contents = fs::read_to_string(path).map_err(|err| CheckpointError::io("read", path, err))?;
    serde_json::from_str(&contents).map_err(|source| CheckpointError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
