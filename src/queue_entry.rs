// src/queue_entry.rs

use crate::metadata_retriever::format_duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled clip: a slice of a file starting at `from` and lasting `duration` seconds.
///
/// Entries are created by `ClipQueue::enqueue` and never modified afterwards;
/// the title is a snapshot of the file name at creation time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub file_id: String,
    pub title: String,
    /// Start offset within the file, in seconds.
    pub from: u64,
    /// Clip length in seconds.
    pub duration: u64,
}

impl QueueEntry {
    /// Offset (in seconds) where the clip stops.
    pub fn end(&self) -> u64 {
        self.from + self.duration
    }

    /// Whether the two clips share any part of the same file.
    pub fn overlaps(&self, other: &QueueEntry) -> bool {
        self.file_id == other.file_id && self.from < other.end() && other.from < self.end()
    }
}

impl fmt::Display for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} - {}]",
            self.title,
            format_duration(self.from as f64).unwrap_or_else(|| "??".into()),
            format_duration(self.end() as f64).unwrap_or_else(|| "??".into())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file_id: &str, from: u64, duration: u64) -> QueueEntry {
        QueueEntry {
            file_id: file_id.into(),
            title: file_id.to_uppercase(),
            from,
            duration,
        }
    }

    #[test]
    fn test_overlap_is_per_file() {
        let a = entry("a", 10, 20);
        assert!(a.overlaps(&entry("a", 25, 5)));
        // Touching intervals do not overlap.
        assert!(!a.overlaps(&entry("a", 30, 5)));
        // Same time range on another file is unconstrained.
        assert!(!a.overlaps(&entry("b", 10, 20)));
    }

    #[test]
    fn test_display_shows_title_and_range() {
        let e = entry("clip", 70, 65);
        assert_eq!(e.to_string(), "CLIP [01:10 - 02:15]");
    }
}
