//! Persistable form of a [`VisibilityMap`].
//!
//! The three tables are the complete persistent footprint of the map. Hash
//! order carries no meaning, so snapshots are normalized: entries are sorted
//! by key and each tile list is sorted (multiplicity is kept). Two maps with
//! the same contributions therefore produce byte-identical snapshots and the
//! same [`VisibilitySnapshot::digest`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use crate::config::VisionConfig;
use crate::state::{ObserverId, Position};

use super::{EyeballTracker, ObserverTracker, VisibilityCounter, VisibilityError, VisibilityMap};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySnapshot {
    pub observers: Vec<(ObserverId, Vec<Position>)>,
    pub eyeballs: Vec<(Position, Vec<Position>)>,
    pub counts: Vec<(Position, u32)>,
}

impl VisibilitySnapshot {
    /// Sorts every table and tile list into canonical order.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for (_, tiles) in &mut self.observers {
            tiles.sort_unstable();
        }
        for (_, tiles) in &mut self.eyeballs {
            tiles.sort_unstable();
        }
        self.observers.sort_unstable_by_key(|(id, _)| *id);
        self.eyeballs.sort_unstable_by_key(|(position, _)| *position);
        self.counts.retain(|(_, count)| *count > 0);
        self.counts.sort_unstable();
        self
    }

    /// SHA-256 commitment to the normalized snapshot.
    ///
    /// Uses bincode for deterministic serialization, the same encoding the
    /// repositories write to disk.
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        // Plain vectors of integers always encode.
        if let Ok(bytes) = bincode::serialize(&self.clone().normalized()) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }

    /// Number of visible cells recorded in the snapshot.
    pub fn visible_cells(&self) -> usize {
        self.counts.iter().filter(|(_, count)| *count > 0).count()
    }
}

impl VisibilityMap {
    /// Captures the three tables in normalized form.
    pub fn snapshot(&self) -> VisibilitySnapshot {
        VisibilitySnapshot {
            observers: self
                .observers()
                .contributions()
                .iter()
                .map(|(id, tiles)| (*id, tiles.clone()))
                .collect(),
            eyeballs: self
                .eyeballs()
                .contributions()
                .iter()
                .map(|(position, tiles)| (*position, tiles.clone()))
                .collect(),
            counts: self
                .counter()
                .counts()
                .iter()
                .map(|(position, count)| (*position, *count))
                .collect(),
        }
        .normalized()
    }

    /// Rebuilds a map from a snapshot and checks the count invariant.
    ///
    /// Zero counts are dropped. Duplicate keys and counts that disagree with
    /// the contributions are rejected.
    pub fn from_snapshot(
        config: VisionConfig,
        snapshot: VisibilitySnapshot,
    ) -> Result<Self, VisibilityError> {
        let mut observers = HashMap::with_capacity(snapshot.observers.len());
        for (id, tiles) in snapshot.observers {
            match observers.entry(id) {
                Entry::Occupied(_) => return Err(VisibilityError::DuplicateObserver(id)),
                Entry::Vacant(slot) => {
                    slot.insert(tiles);
                }
            }
        }

        let mut eyeballs = HashMap::with_capacity(snapshot.eyeballs.len());
        for (position, tiles) in snapshot.eyeballs {
            match eyeballs.entry(position) {
                Entry::Occupied(_) => return Err(VisibilityError::DuplicateEyeball(position)),
                Entry::Vacant(slot) => {
                    slot.insert(tiles);
                }
            }
        }

        let mut counts = HashMap::with_capacity(snapshot.counts.len());
        for (position, count) in snapshot.counts {
            if counts.insert(position, count).is_some() {
                return Err(VisibilityError::DuplicateCount(position));
            }
        }
        counts.retain(|_, count| *count > 0);

        let map = VisibilityMap::from_parts(
            config,
            VisibilityCounter::from_counts(counts),
            ObserverTracker::from_contributions(observers),
            EyeballTracker::from_contributions(eyeballs),
        );
        map.verify()?;
        Ok(map)
    }
}
