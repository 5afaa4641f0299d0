// src/file_record.rs

use serde::{Deserialize, Serialize};

/// Represents a media file registered with the scheduler.
/// Produced by the ingestion side with an already-known duration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Stable, unique identifier (the CLI host uses the full path).
    pub id: String,
    /// Name shown to the user and snapshotted into queue entries.
    pub name: String,
    /// Total duration of the file in seconds.
    pub duration: f64,
}

impl FileRecord {
    /// Creates a new `FileRecord`.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier for the file.
    /// * `name` - Display name.
    /// * `duration` - Total duration in seconds.
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        FileRecord {
            id: id.into(),
            name: name.into(),
            duration,
        }
    }

    /// Watched time (in seconds) after which the file stops receiving clips.
    pub fn exhaustion_threshold(&self) -> f64 {
        self.duration * crate::config::EXHAUSTION_RATIO
    }
}
