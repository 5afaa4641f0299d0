// src/clip_queue.rs

use crate::{
    catalog::FileCatalog,
    config::{ClipConfiguration, CLIP_GAP_SECONDS},
    events::{Diagnostic, Observers, QueueEvent, SubscriptionId},
    file_record::FileRecord,
    playable::PlayableSet,
    queue_entry::QueueEntry,
};
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

/// A clip queue shared between threads. The whole scheduler state sits behind
/// one lock because `enqueue` reads the catalog, queue, history and pool together.
pub type SharedClipQueue = Arc<Mutex<ClipQueue>>;

/// What a single `enqueue` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// A clip was appended and the file stays eligible.
    Enqueued(QueueEntry),
    /// A clip was appended, but the file had already passed its watched
    /// budget and has been retired from the pool.
    Exhausted(QueueEntry),
    /// The clip would run past the end of the file; the file was retired
    /// and nothing was appended.
    Overflow { file_id: String },
    /// The sampled id has no catalog record; nothing changed.
    MissingFile { file_id: String },
    /// The pool was empty; nothing changed.
    NoPlayableFiles,
}

impl EnqueueOutcome {
    /// The appended entry, if this call created one.
    pub fn entry(&self) -> Option<&QueueEntry> {
        match self {
            EnqueueOutcome::Enqueued(entry) | EnqueueOutcome::Exhausted(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Result of a (possibly cancelled) `generate_until` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The pool was drained. Holds the number of clips created.
    Completed(usize),
    /// The host asked to stop before the pool was drained.
    Cancelled(usize),
}

impl GenerateOutcome {
    pub fn created(&self) -> usize {
        match self {
            GenerateOutcome::Completed(n) | GenerateOutcome::Cancelled(n) => *n,
        }
    }
}

/// Pseudo-random clip scheduler for a single output stream.
///
/// Holds the file catalog, the pool of playable ids, the pending queue and
/// the played history. Clips of the same file are chained end to end (with a
/// fixed gap), so they never overlap; a file stops receiving clips once its
/// scheduled and played time passes 60% of its duration.
///
/// The random source is a type parameter so tests and hosts can inject a
/// seeded generator.
#[derive(Debug)]
pub struct ClipQueue<R = StdRng> {
    files: FileCatalog,
    playable: PlayableSet,
    queue: VecDeque<QueueEntry>,
    history: Vec<QueueEntry>,
    config: ClipConfiguration,
    rng: R,
    observers: Observers,
}

impl ClipQueue<StdRng> {
    /// Creates a queue seeded from the operating system.
    pub fn new(config: ClipConfiguration) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a queue whose random choices are fully determined by `seed`.
    pub fn from_seed(config: ClipConfiguration, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for ClipQueue<StdRng> {
    fn default() -> Self {
        Self::new(ClipConfiguration::default())
    }
}

impl<R: Rng> ClipQueue<R> {
    pub fn with_rng(config: ClipConfiguration, rng: R) -> Self {
        Self {
            files: FileCatalog::new(),
            playable: PlayableSet::new(),
            queue: VecDeque::new(),
            history: Vec::new(),
            config,
            rng,
            observers: Observers::default(),
        }
    }

    pub fn files(&self) -> &FileCatalog {
        &self.files
    }

    pub fn file(&self, id: &str) -> Option<&FileRecord> {
        self.files.get(id)
    }

    /// Pending clips, head first.
    pub fn queue(&self) -> &VecDeque<QueueEntry> {
        &self.queue
    }

    /// Played clips, oldest first.
    pub fn history(&self) -> &[QueueEntry] {
        &self.history
    }

    pub fn playable(&self) -> &PlayableSet {
        &self.playable
    }

    pub fn is_playable(&self, id: &str) -> bool {
        self.playable.contains(id)
    }

    pub fn config(&self) -> ClipConfiguration {
        self.config
    }

    /// Changes the clip length bounds used by future `enqueue` calls.
    pub fn set_config(&mut self, config: ClipConfiguration) {
        debug!("Clip bounds set to [{}, {})", config.min, config.max);
        self.config = config;
    }

    /// The clip dequeued most recently, if any.
    pub fn now_playing(&self) -> Option<&QueueEntry> {
        self.history.last()
    }

    /// Registers `observer` for change notifications.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&QueueEvent) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Registers a file and makes it eligible for clips.
    ///
    /// A record with the same id replaces the previous one. The id is appended
    /// to the pool on every call, so adding a file twice doubles its weight.
    pub fn add_file(&mut self, file: FileRecord) {
        debug!("Adding file '{}' ({:.1}s)", file.id, file.duration);
        self.playable.push(&file.id);
        self.files.insert(file);
        self.observers.notify(QueueEvent::Catalog);
    }

    /// Unregisters a file and drops its pending clips. Played clips stay in
    /// the history.
    ///
    /// Returns `true` if the catalog contained `id`.
    pub fn remove_file(&mut self, id: &str) -> bool {
        self.playable.remove(id);

        let before = self.queue.len();
        self.queue.retain(|entry| entry.file_id != id);
        let dropped = before - self.queue.len();

        let existed = self.files.remove(id).is_some();
        debug!("Removed file '{}' (known: {}, dropped {} pending clips)", id, existed, dropped);

        if existed {
            self.observers.notify(QueueEvent::Catalog);
        }
        if dropped > 0 {
            self.observers.notify(QueueEvent::Queue);
        }
        existed
    }

    /// Tries to append one clip of a randomly chosen playable file.
    ///
    /// The clip starts right after the previous clip of the same file (plus the
    /// fixed gap). Before appending, the file's scheduled and played time is
    /// checked: past 60% of its duration the file is retired but still gets this
    /// clip; if the clip would run past the end of the file, the file is retired
    /// and nothing is appended.
    pub fn enqueue(&mut self) -> EnqueueOutcome {
        let Some(file_id) = self.playable.sample(&mut self.rng).map(str::to_string) else {
            self.observers.warn(Diagnostic::NoPlayableFiles);
            return EnqueueOutcome::NoPlayableFiles;
        };

        let duration = self.sample_duration();
        let from = self.previous_clip_end(&file_id).unwrap_or(0);

        let Some(file) = self.files.get(&file_id) else {
            self.observers.warn(Diagnostic::MissingFile(file_id.clone()));
            return EnqueueOutcome::MissingFile { file_id };
        };
        let total = file.duration;
        let threshold = file.exhaustion_threshold();
        let title = file.name.clone();

        if !total.is_finite() {
            self.playable.remove(&file_id);
            info!("File '{}' has no usable duration; retiring it", file_id);
            return EnqueueOutcome::Overflow { file_id };
        }

        let playtime = self.playtime(&file_id) as f64;
        let exhausted = if playtime > threshold {
            self.playable.remove(&file_id);
            info!(
                "File '{}' reached {:.0}s of {:.0}s watched; scheduling its last clip",
                file_id, playtime, total
            );
            true
        } else if playtime + duration as f64 > total {
            self.playable.remove(&file_id);
            info!(
                "A {}s clip would overrun '{}' ({:.0}s of {:.0}s used); retiring it",
                duration, file_id, playtime, total
            );
            return EnqueueOutcome::Overflow { file_id };
        } else {
            false
        };

        let entry = QueueEntry {
            file_id,
            title,
            from: from + CLIP_GAP_SECONDS,
            duration,
        };
        debug!("Enqueued {}", entry);
        self.queue.push_back(entry.clone());
        self.observers.notify(QueueEvent::Queue);

        if exhausted {
            EnqueueOutcome::Exhausted(entry)
        } else {
            EnqueueOutcome::Enqueued(entry)
        }
    }

    /// Moves the head of the queue into the history and returns it.
    pub fn dequeue(&mut self) -> Option<QueueEntry> {
        let next = self.queue.pop_front()?;
        self.history.push(next.clone());

        self.observers.notify(QueueEvent::Queue);
        self.observers.notify(QueueEvent::History);
        self.observers.notify(QueueEvent::NowPlaying);

        Some(next)
    }

    /// Enqueues clips until no file is playable. Returns the number of clips created.
    pub fn generate(&mut self) -> usize {
        self.generate_until(&AtomicBool::new(false)).created()
    }

    /// Like `generate`, but stops early once `cancel` is set.
    pub fn generate_until(&mut self, cancel: &AtomicBool) -> GenerateOutcome {
        let mut created = 0;
        while !self.playable.is_empty() {
            if cancel.load(Ordering::Relaxed) {
                info!("Generation cancelled after {} clips", created);
                return GenerateOutcome::Cancelled(created);
            }
            match self.enqueue() {
                EnqueueOutcome::Enqueued(_) | EnqueueOutcome::Exhausted(_) => created += 1,
                // A dangling id would be drawn forever otherwise.
                EnqueueOutcome::MissingFile { file_id } => {
                    self.playable.remove(&file_id);
                }
                EnqueueOutcome::Overflow { .. } | EnqueueOutcome::NoPlayableFiles => {}
            }
        }
        info!("Generated {} clips ({} pending)", created, self.queue.len());
        GenerateOutcome::Completed(created)
    }

    /// Randomly reorders the pending queue. History is untouched.
    pub fn shuffle(&mut self) {
        self.queue.make_contiguous().shuffle(&mut self.rng);
        self.observers.notify(QueueEvent::Queue);
    }

    fn sample_duration(&mut self) -> u64 {
        let ClipConfiguration { min, max } = self.config;
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// End of the latest clip of `file_id`, pending or played.
    fn previous_clip_end(&self, file_id: &str) -> Option<u64> {
        self.queue
            .iter()
            .chain(self.history.iter())
            .filter(|entry| entry.file_id == file_id)
            .map(QueueEntry::end)
            .max()
    }

    /// Time charged against the file's budget: every clip counts with the gap.
    fn playtime(&self, file_id: &str) -> u64 {
        self.queue
            .iter()
            .chain(self.history.iter())
            .filter(|entry| entry.file_id == file_id)
            .map(|entry| entry.duration + CLIP_GAP_SECONDS)
            .sum()
    }
}
