//! Open-addressed key/value registry with double hashing and tombstones.

use std::fmt;

use log::debug;

use crate::config::RegistryConfig;
use crate::error::{ConfigError, SetError};
use crate::hash::{DoubleHash, FxDoubleHash};
use crate::prime::next_prime;
use crate::slots::SlotStore;

enum Slot<K, V> {
    Live { key: K, value: V },
    /// Deleted entry. Keeps probe sequences that ran through it intact.
    Tombstone,
}

/// Where a probe sequence for a key ended.
enum Probe {
    Found(usize),
    /// Key absent; the index is where it would be inserted.
    Vacant(usize),
    /// Key absent and the sequence met neither an empty slot nor a tombstone.
    Exhausted,
}

/// Hash map from `K` to `V` over a prime-capacity [`SlotStore`].
pub struct HashRegistry<K, V, H = FxDoubleHash> {
    slots: SlotStore<Slot<K, V>>,
    live: usize,
    hasher: H,
    max_load_factor: f64,
}

impl<K, V, H: Default> HashRegistry<K, V, H> {
    pub fn new() -> Self {
        Self::from_parts(&RegistryConfig::default(), H::default())
    }
}

impl<K, V, H: Default> Default for HashRegistry<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashRegistry<K, V, H> {
    /// Build a registry from a validated config and a hash family.
    pub fn with_config(config: RegistryConfig, hasher: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(&config, hasher))
    }

    fn from_parts(config: &RegistryConfig, hasher: H) -> Self {
        Self {
            slots: SlotStore::with_capacity(config.effective_capacity()),
            live: 0,
            hasher,
            max_load_factor: config.max_load_factor,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of deleted slots still sitting in probe sequences.
    pub fn tombstones(&self) -> usize {
        self.slots.occupied() - self.live
    }

    /// Fraction of slots holding a live entry or a tombstone.
    pub fn load_factor(&self) -> f64 {
        self.slots.occupied() as f64 / self.capacity() as f64
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|(_, slot)| match slot {
            Slot::Live { key, value } => Some((key, value)),
            Slot::Tombstone => None,
        })
    }

    fn needs_resize(&self) -> bool {
        (self.slots.occupied() + 1) as f64 / self.capacity() as f64 > self.max_load_factor
    }
}

impl<K: Eq, V, H: DoubleHash<K>> HashRegistry<K, V, H> {
    /// Insert a new entry.
    ///
    /// Fails with [`SetError::AlreadyExists`] and leaves the registry
    /// untouched if `key` is already live. May resize first.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), SetError> {
        if self.needs_resize() {
            self.resize()?;
        }
        match self.probe(&key)? {
            Probe::Found(_) => Err(SetError::AlreadyExists),
            Probe::Vacant(index) => {
                self.slots.set(index, Slot::Live { key, value })?;
                self.live += 1;
                Ok(())
            }
            // the family never reached a free slot
            Probe::Exhausted => Err(SetError::Index {
                index: self.capacity(),
                capacity: self.capacity(),
            }),
        }
    }

    /// Remove `key`, leaving a tombstone in its slot.
    pub fn remove(&mut self, key: &K) -> Result<V, SetError> {
        let Probe::Found(index) = self.probe(key)? else {
            return Err(SetError::NotFound);
        };
        match self.slots.set(index, Slot::Tombstone)? {
            Some(Slot::Live { value, .. }) => {
                self.live -= 1;
                Ok(value)
            }
            _ => Err(SetError::NotFound),
        }
    }

    /// Whether `key` is live. A hash family that produces out-of-range
    /// slots makes every lookup report `false`.
    pub fn contains(&self, key: &K) -> bool {
        matches!(self.probe(key), Ok(Probe::Found(_)))
    }

    pub fn get(&self, key: &K) -> Result<&V, SetError> {
        let Probe::Found(index) = self.probe(key)? else {
            return Err(SetError::NotFound);
        };
        match self.slots.get(index)? {
            Some(Slot::Live { value, .. }) => Ok(value),
            _ => Err(SetError::NotFound),
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, SetError> {
        let Probe::Found(index) = self.probe(key)? else {
            return Err(SetError::NotFound);
        };
        match self.slots.get_mut(index)? {
            Some(Slot::Live { value, .. }) => Ok(value),
            _ => Err(SetError::NotFound),
        }
    }

    /// Walk the probe sequence of `key`.
    ///
    /// Tombstones are skipped without ending the walk; the first one seen is
    /// remembered as the insertion point. An empty slot ends the walk.
    fn probe(&self, key: &K) -> Result<Probe, SetError> {
        let capacity = self.capacity();
        let mut first_tombstone = None;
        for i in 0..capacity {
            let index = self.hasher.slot(key, i, capacity);
            match self.slots.get(index)? {
                None => return Ok(Probe::Vacant(first_tombstone.unwrap_or(index))),
                Some(Slot::Tombstone) => {
                    first_tombstone.get_or_insert(index);
                }
                Some(Slot::Live { key: k, .. }) if k == key => return Ok(Probe::Found(index)),
                Some(Slot::Live { .. }) => {}
            }
        }
        Ok(first_tombstone.map_or(Probe::Exhausted, Probe::Vacant))
    }

    /// Rehash every live entry into a store of the next prime at least
    /// twice the current capacity, dropping tombstones.
    ///
    /// All new slot indices are computed before anything moves, so a failure
    /// leaves the registry as it was.
    fn resize(&mut self) -> Result<(), SetError> {
        let old_capacity = self.capacity();
        let new_capacity = next_prime(old_capacity * 2);

        let mut taken: SlotStore<()> = SlotStore::with_capacity(new_capacity);
        let mut placement = Vec::with_capacity(self.live);
        for (_, slot) in self.slots.iter() {
            let Slot::Live { key, .. } = slot else {
                continue;
            };
            let mut placed = None;
            for i in 0..new_capacity {
                let index = self.hasher.slot(key, i, new_capacity);
                if !taken.is_occupied(index)? {
                    taken.set(index, ())?;
                    placed = Some(index);
                    break;
                }
            }
            placement.push(placed.ok_or(SetError::Index {
                index: new_capacity,
                capacity: new_capacity,
            })?);
        }

        let dropped = self.tombstones();
        let old = std::mem::replace(&mut self.slots, SlotStore::with_capacity(new_capacity));
        let live = old
            .into_values()
            .filter(|slot| matches!(slot, Slot::Live { .. }));
        for (index, slot) in placement.into_iter().zip(live) {
            self.slots.set(index, slot)?;
        }

        debug!(
            "registry resize {} -> {} ({} live, {} tombstones dropped)",
            old_capacity, new_capacity, self.live, dropped
        );
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for HashRegistry<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
