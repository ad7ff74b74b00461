//! Deterministic checkpoint selection over an already-listed directory.

use std::path::PathBuf;
use std::time::SystemTime;

/// One checkpoint file as seen in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointEntry {
    /// File stem (the checkpoint name).
    pub name: String,
    pub path: PathBuf,
    /// Birth time, or modification time where the platform has none.
    pub created: SystemTime,
    pub modified: SystemTime,
}

/// How a user picks a checkpoint: 1-based listing index or exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Name(String),
}

impl Selection {
    /// All-digit input is an index; anything else is a name.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty()
            && raw.chars().all(|c| c.is_ascii_digit())
            && let Ok(index) = raw.parse()
        {
            return Selection::Index(index);
        }
        Selection::Name(raw.to_string())
    }
}

/// Entry with the greatest creation time. Ties go to the greater name so the
/// answer does not depend on listing order.
pub fn latest(entries: &[CheckpointEntry]) -> Option<&CheckpointEntry> {
    entries
        .iter()
        .max_by(|a, b| a.created.cmp(&b.created).then_with(|| a.name.cmp(&b.name)))
}

/// Resolve `selection` against `entries` (listing order).
pub fn resolve<'a>(
    entries: &'a [CheckpointEntry],
    selection: &Selection,
) -> Option<&'a CheckpointEntry> {
    match selection {
        Selection::Index(index) => index.checked_sub(1).and_then(|i| entries.get(i)),
        Selection::Name(name) => entries.iter().find(|entry| &entry.name == name),
    }
}
