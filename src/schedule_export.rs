// src/schedule_export.rs

use crate::{
    clip_queue::ClipQueue, config::ClipConfiguration, file_utils::get_schedule_path,
    queue_entry::QueueEntry,
};
use chrono::{DateTime, Utc};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::OpenOptions,
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Point-in-time copy of the schedule, written out as JSON for other tools.
/// Exports are never read back by the scheduler.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleSnapshot {
    /// When the snapshot was taken (UTC).
    pub generated_at: DateTime<Utc>,
    pub config: ClipConfiguration,
    pub now_playing: Option<QueueEntry>,
    /// Pending clips, head first.
    pub queue: Vec<QueueEntry>,
    /// Played clips, oldest first.
    pub history: Vec<QueueEntry>,
}

impl ScheduleSnapshot {
    pub fn capture<R: Rng>(clip_queue: &ClipQueue<R>) -> Self {
        ScheduleSnapshot {
            generated_at: Utc::now(),
            config: clip_queue.config(),
            now_playing: clip_queue.now_playing().cloned(),
            queue: clip_queue.queue().iter().cloned().collect(),
            history: clip_queue.history().to_vec(),
        }
    }

    /// Total length of the pending clips, in seconds.
    pub fn pending_seconds(&self) -> u64 {
        self.queue.iter().map(|entry| entry.duration).sum()
    }
}

/// Writes the snapshot as pretty-printed JSON, replacing any previous export.
/// If `custom_path` is provided, it is used instead of the default schedule file.
/// Returns the path that was written.
///
/// # Errors
///
/// Returns an error if the default path cannot be determined, or if
/// I/O or serialization errors occur while writing.
pub fn save_schedule(
    snapshot: &ScheduleSnapshot,
    custom_path: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let schedule_path = match custom_path {
        Some(p) => p.to_path_buf(),
        None => get_schedule_path()?,
    };

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&schedule_path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)?;

    info!(
        "Exported {} pending and {} played clips to '{}'",
        snapshot.queue.len(),
        snapshot.history.len(),
        schedule_path.display()
    );
    Ok(schedule_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_record::FileRecord;
    use std::{fs::File, io::BufReader};
    use tempfile::NamedTempFile;

    fn sample_queue() -> ClipQueue {
        let mut q = ClipQueue::from_seed(ClipConfiguration::new(5, 10), 21);
        q.add_file(FileRecord::new("/v/a.mp4", "a.mp4", 400.0));
        q.add_file(FileRecord::new("/v/b.mp4", "b.mp4", 300.0));
        for _ in 0..6 {
            q.enqueue();
        }
        q.dequeue();
        q
    }

    #[test]
    fn test_capture_reflects_queue_state() {
        let q = sample_queue();
        let snapshot = ScheduleSnapshot::capture(&q);

        assert_eq!(snapshot.config, ClipConfiguration::new(5, 10));
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.now_playing.as_ref(), q.now_playing());
        assert_eq!(snapshot.queue.len(), q.queue().len());
        assert_eq!(
            snapshot.pending_seconds(),
            q.queue().iter().map(|e| e.duration).sum::<u64>()
        );
    }

    #[test]
    fn test_save_schedule_writes_json() {
        let temp_file = NamedTempFile::new().unwrap();
        let snapshot = ScheduleSnapshot::capture(&sample_queue());

        let written = save_schedule(&snapshot, Some(temp_file.path())).unwrap();
        assert_eq!(written, temp_file.path());

        let reader = BufReader::new(File::open(temp_file.path()).unwrap());
        let loaded: ScheduleSnapshot = serde_json::from_reader(reader).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_save_schedule_truncates_previous_export() {
        let temp_file = NamedTempFile::new().unwrap();
        let full = ScheduleSnapshot::capture(&sample_queue());
        save_schedule(&full, Some(temp_file.path())).unwrap();

        let empty = ScheduleSnapshot::capture(&ClipQueue::from_seed(ClipConfiguration::default(), 1));
        save_schedule(&empty, Some(temp_file.path())).unwrap();

        let loaded: ScheduleSnapshot =
            serde_json::from_reader(BufReader::new(File::open(temp_file.path()).unwrap())).unwrap();
        assert!(loaded.queue.is_empty());
        assert!(loaded.now_playing.is_none());
    }
}
