use crate::config::RegistryConfig;
use crate::error::{ConfigError, SetError};
use crate::forest::{NodeId, RankForest};
use crate::hash::{DoubleHash, FxDoubleHash};
use crate::registry::HashRegistry;

#[derive(Debug, Clone)]
struct Element<K, V> {
    key: K,
    value: V,
}

/// Disjoint sets addressed by key.
///
/// Each key is registered once with [`make_set`](Self::make_set) and maps to
/// one forest node for the life of the structure. Every other operation
/// resolves its keys first and fails with [`SetError::NotFound`] before
/// touching the forest if any key is unknown.
pub struct DisjointSet<K, V, H = FxDoubleHash> {
    index: HashRegistry<K, NodeId, H>,
    forest: RankForest<Element<K, V>>,
}

impl<K, V, H: Default> DisjointSet<K, V, H> {
    pub fn new() -> Self {
        Self {
            index: HashRegistry::new(),
            forest: RankForest::new(),
        }
    }
}

impl<K, V, H: Default> Default for DisjointSet<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> DisjointSet<K, V, H> {
    pub fn with_config(config: RegistryConfig, hasher: H) -> Result<Self, ConfigError> {
        let capacity = config.initial_capacity;
        Ok(Self {
            index: HashRegistry::with_config(config, hasher)?,
            forest: RankForest::with_capacity(capacity),
        })
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.forest.set_count()
    }
}

impl<K: Eq + Clone, V, H: DoubleHash<K>> DisjointSet<K, V, H> {
    /// Register `key` as a new singleton set holding `value`.
    pub fn make_set(&mut self, key: K, value: V) -> Result<(), SetError> {
        let id = self.forest.next_id();
        self.index.insert(key.clone(), id)?;
        self.forest.make_set(Element { key, value });
        Ok(())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// The value registered with `key` itself.
    pub fn value(&self, key: &K) -> Result<&V, SetError> {
        let node = self.node(key)?;
        Ok(&self.forest.payload(node).value)
    }

    pub fn value_mut(&mut self, key: &K) -> Result<&mut V, SetError> {
        let node = self.node(key)?;
        Ok(&mut self.forest.payload_mut(node).value)
    }

    /// The value of the representative of the set containing `key`.
    pub fn find(&mut self, key: &K) -> Result<&V, SetError> {
        let root = self.root(key)?;
        Ok(&self.forest.payload(root).value)
    }

    /// The key of the representative of the set containing `key`.
    pub fn representative(&mut self, key: &K) -> Result<&K, SetError> {
        let root = self.root(key)?;
        Ok(&self.forest.payload(root).key)
    }

    /// Merge the sets of `a` and `b`; the larger set (or `a`'s, on a tie)
    /// stays senior. Returns `Ok(false)` if they were already one set.
    pub fn unite(&mut self, a: &K, b: &K) -> Result<bool, SetError> {
        let (a, b) = (self.node(a)?, self.node(b)?);
        Ok(self.forest.unite(a, b))
    }

    /// Merge the set of `junior` into the set of `senior`, ranking all of
    /// `senior`'s members first.
    pub fn absorb(&mut self, senior: &K, junior: &K) -> Result<bool, SetError> {
        let (senior, junior) = (self.node(senior)?, self.node(junior)?);
        Ok(self.forest.absorb(senior, junior))
    }

    pub fn connected(&mut self, a: &K, b: &K) -> Result<bool, SetError> {
        let (a, b) = (self.node(a)?, self.node(b)?);
        Ok(self.forest.connected(a, b))
    }

    /// Size of the set containing `key`.
    pub fn set_size(&mut self, key: &K) -> Result<usize, SetError> {
        let node = self.node(key)?;
        Ok(self.forest.set_size(node))
    }

    /// 1-based seniority of `key` within its set.
    pub fn rank(&mut self, key: &K) -> Result<usize, SetError> {
        let node = self.node(key)?;
        Ok(self.forest.rank(node))
    }

    /// Keys of every member of `key`'s set, most senior first. Linear in the
    /// total number of elements.
    pub fn members(&mut self, key: &K) -> Result<Vec<&K>, SetError> {
        let node = self.node(key)?;
        let members = self.forest.members(node);
        Ok(members
            .into_iter()
            .map(|id| &self.forest.payload(id).key)
            .collect())
    }

    fn node(&self, key: &K) -> Result<NodeId, SetError> {
        self.index.get(key).copied()
    }

    fn root(&mut self, key: &K) -> Result<NodeId, SetError> {
        let node = self.node(key)?;
        Ok(self.forest.find(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::IntDoubleHash;

    fn crew() -> DisjointSet<i32, &'static str, IntDoubleHash> {
        let mut ds = DisjointSet::new();
        for (key, value) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
            ds.make_set(key, value).unwrap();
        }
        ds
    }

    #[test]
    fn fresh_element() {
        let mut ds = crew();
        assert_eq!(ds.find(&3), Ok(&"c"));
        assert_eq!(ds.set_size(&3), Ok(1));
        assert_eq!(ds.rank(&3), Ok(1));
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.set_count(), 4);
    }

    #[test]
    fn duplicate_make_set_keeps_first_value() {
        let mut ds = crew();
        assert_eq!(ds.make_set(2, "z"), Err(SetError::AlreadyExists));
        assert_eq!(ds.find(&2), Ok(&"b"));
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn unknown_keys_not_found() {
        let mut ds = crew();
        assert_eq!(ds.find(&99), Err(SetError::NotFound));
        assert_eq!(ds.set_size(&99), Err(SetError::NotFound));
        assert_eq!(ds.rank(&99), Err(SetError::NotFound));
        assert_eq!(ds.connected(&1, &99), Err(SetError::NotFound));
        assert_eq!(ds.representative(&99), Err(SetError::NotFound));
        assert_eq!(ds.value(&99), Err(SetError::NotFound));
        assert!(ds.members(&99).is_err());
    }

    #[test]
    fn unite_with_unknown_key_changes_nothing() {
        let mut ds = crew();
        assert_eq!(ds.unite(&1, &99), Err(SetError::NotFound));
        assert_eq!(ds.unite(&99, &1), Err(SetError::NotFound));
        assert_eq!(ds.absorb(&1, &99), Err(SetError::NotFound));
        assert_eq!(ds.set_size(&1), Ok(1));
        assert_eq!(ds.set_count(), 4);
    }

    #[test]
    fn find_returns_representative_value() {
        let mut ds = crew();
        ds.unite(&1, &2).unwrap();
        assert_eq!(ds.find(&2), Ok(&"a"));
        assert_eq!(ds.representative(&2), Ok(&1));
        assert_eq!(ds.value(&2), Ok(&"b"));
    }

    #[test]
    fn value_mut_edits_own_value() {
        let mut ds = crew();
        *ds.value_mut(&4).unwrap() = "dd";
        assert_eq!(ds.value(&4), Ok(&"dd"));
    }

    #[test]
    fn absorb_orders_members_by_seniority() {
        let mut ds = crew();
        ds.unite(&2, &3).unwrap();
        ds.unite(&2, &4).unwrap();
        assert_eq!(ds.absorb(&1, &4), Ok(true));
        assert_eq!(ds.members(&3), Ok(vec![&1, &2, &3, &4]));
        assert_eq!(ds.rank(&1), Ok(1));
        assert_eq!(ds.absorb(&4, &1), Ok(false));
    }

    #[test]
    fn many_keys_through_resizes() {
        let mut ds: DisjointSet<u64, u64> = DisjointSet::new();
        for k in 0..500 {
            ds.make_set(k, k * 10).unwrap();
        }
        for k in 1..500 {
            ds.unite(&0, &k).unwrap();
        }
        assert_eq!(ds.set_size(&250), Ok(500));
        assert_eq!(ds.find(&499), Ok(&0));
        assert_eq!(ds.rank(&499), Ok(500));
        assert_eq!(ds.set_count(), 1);
    }

    #[test]
    fn custom_config() {
        let config = RegistryConfig {
            initial_capacity: 3,
            max_load_factor: 0.5,
        };
        let mut ds: DisjointSet<i64, (), IntDoubleHash> =
            DisjointSet::with_config(config, IntDoubleHash).unwrap();
        for k in -20..20 {
            ds.make_set(k, ()).unwrap();
        }
        assert!(ds.contains(&-20));
        assert!(!ds.contains(&20));
    }
}
