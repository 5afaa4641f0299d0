// src/lib.rs

//! Pseudo-random clip scheduler.
//!
//! [`ClipQueue`] builds a queue of non-overlapping clips from a pool of media
//! files and retires each file once 60% of it has been scheduled or played.
//! The remaining modules feed it: scanning folders, probing durations with
//! ffprobe and exporting the resulting schedule.

pub mod catalog;
pub mod clip_queue;
pub mod config;
pub mod events;
pub mod file_record;
pub mod file_utils;
pub mod library;
pub mod metadata_retriever;
pub mod playable;
pub mod queue_entry;
pub mod schedule_export;

pub use crate::clip_queue::{ClipQueue, EnqueueOutcome, GenerateOutcome, SharedClipQueue};
pub use crate::config::ClipConfiguration;
pub use crate::events::{Diagnostic, QueueEvent, SubscriptionId};
pub use crate::file_record::FileRecord;
pub use crate::queue_entry::QueueEntry;
