// src/playable.rs

use rand::Rng;
use std::collections::HashMap;

/// Ordered pool of file ids still eligible for new clips.
///
/// The same id may appear several times (each `add_file` call appends one
/// slot), which weights random selection toward that file. Removal always
/// drops every slot of an id.
///
/// Removed slots are left as tombstones and compacted once they outnumber
/// the live ones, so both insertion and removal are O(1) amortized while the
/// relative order of the remaining ids is preserved.
#[derive(Debug, Default, Clone)]
pub struct PlayableSet {
    slots: Vec<Option<String>>,
    positions: HashMap<String, Vec<usize>>,
    live: usize,
}

impl PlayableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one slot for `id`, even if it is already present.
    pub fn push(&mut self, id: &str) {
        self.positions
            .entry(id.to_string())
            .or_default()
            .push(self.slots.len());
        self.slots.push(Some(id.to_string()));
        self.live += 1;
    }

    /// Removes every slot holding `id`. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let Some(indices) = self.positions.remove(id) else {
            return 0;
        };
        for &i in &indices {
            self.slots[i] = None;
        }
        self.live -= indices.len();
        self.compact_if_sparse();
        indices.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of slots held by `id`.
    pub fn count(&self, id: &str) -> usize {
        self.positions.get(id).map_or(0, Vec::len)
    }

    /// Number of live slots (duplicates included).
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live ids in insertion order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    /// Picks a live slot uniformly at random.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        if self.live == 0 {
            return None;
        }
        // Tombstones never exceed live slots, so each draw hits with probability >= 1/2.
        loop {
            let i = rng.random_range(0..self.slots.len());
            if let Some(id) = self.slots[i].as_deref() {
                return Some(id);
            }
        }
    }

    fn compact_if_sparse(&mut self) {
        let dead = self.slots.len() - self.live;
        if dead <= self.live {
            return;
        }
        self.slots.retain(Option::is_some);
        self.positions.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(id) = slot {
                self.positions.entry(id.clone()).or_default().push(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_duplicates_are_kept_and_removed_together() {
        let mut set = PlayableSet::new();
        set.push("a");
        set.push("b");
        set.push("a");

        assert_eq!(set.len(), 3);
        assert_eq!(set.count("a"), 2);

        assert_eq!(set.remove("a"), 2);
        assert_eq!(set.len(), 1);
        assert!(!set.contains("a"));
        assert_eq!(set.remove("a"), 0);
    }

    #[test]
    fn test_order_survives_removal_and_compaction() {
        let mut set = PlayableSet::new();
        for id in ["a", "b", "c", "d", "e"] {
            set.push(id);
        }
        set.remove("b");
        set.remove("d");
        set.remove("a"); // tombstones now outnumber live slots
        set.push("f");

        let ids: Vec<&str> = set.iter().collect();
        assert_eq!(ids, vec!["c", "e", "f"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("f"));
        assert_eq!(set.remove("c"), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["e", "f"]);
    }

    #[test]
    fn test_sample_only_returns_live_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut set = PlayableSet::new();
        assert!(set.sample(&mut rng).is_none());

        for id in ["a", "b", "c", "d"] {
            set.push(id);
        }
        set.remove("a");
        set.remove("c");

        for _ in 0..200 {
            let id = set.sample(&mut rng).unwrap();
            assert!(id == "b" || id == "d");
        }
    }

    #[test]
    fn test_sample_reaches_every_id() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut set = PlayableSet::new();
        set.push("x");
        set.push("y");

        let mut seen_x = false;
        let mut seen_y = false;
        for _ in 0..200 {
            match set.sample(&mut rng) {
                Some("x") => seen_x = true,
                Some("y") => seen_y = true,
                other => panic!("unexpected sample {:?}", other),
            }
        }
        assert!(seen_x && seen_y);
    }
}
