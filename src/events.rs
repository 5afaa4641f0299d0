// src/events.rs

use log::warn;
use std::fmt;

/// Soft anomalies reported by the scheduler. None of them abort the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `enqueue` was called while no file was eligible.
    NoPlayableFiles,
    /// A playable id had no matching catalog record.
    MissingFile(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoPlayableFiles => write!(f, "No playable files available."),
            Diagnostic::MissingFile(id) => write!(f, "File {} not found", id),
        }
    }
}

/// Change notifications delivered to subscribers.
/// Subscribers read the new state back through the queue's snapshot accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    Catalog,
    Queue,
    History,
    NowPlaying,
    Warning(Diagnostic),
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&QueueEvent) + Send>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: QueueEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer(&event);
        }
    }

    /// Logs the diagnostic and forwards it to subscribers.
    pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.notify(QueueEvent::Warning(diagnostic));
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notify_and_unsubscribe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut observers = Observers::default();
        let id = observers.subscribe(Box::new(move |event: &QueueEvent| sink.lock().unwrap().push(event.clone())));

        observers.notify(QueueEvent::Queue);
        observers.warn(Diagnostic::MissingFile("x".into()));
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(QueueEvent::History);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                QueueEvent::Queue,
                QueueEvent::Warning(Diagnostic::MissingFile("x".into()))
            ]
        );
    }

    #[test]
    fn test_diagnostic_messages() {
        assert_eq!(Diagnostic::NoPlayableFiles.to_string(), "No playable files available.");
        assert_eq!(Diagnostic::MissingFile("a.mp4".into()).to_string(), "File a.mp4 not found");
    }
}
