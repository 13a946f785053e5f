//! Double-hashing probe families.
//!
//! A family maps `(key, probe, capacity)` to a slot index. Probe `0` is the
//! home slot; each further probe advances by a key-dependent step. With a
//! prime capacity and a step in `1..capacity`, the first `capacity` probes
//! visit every slot exactly once.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// A double-hash function family `h(key, probe, capacity) -> slot`.
pub trait DoubleHash<K: ?Sized> {
    /// Slot visited on probe number `probe`. Must be `< capacity`.
    fn slot(&self, key: &K, probe: usize, capacity: usize) -> usize;
}

/// Combine a home slot and a step into the slot for `probe`.
fn probe_slot(home: u64, step: u64, probe: usize, capacity: usize) -> usize {
    let m = capacity as u128;
    ((home as u128 + probe as u128 * step as u128) % m) as usize
}

/// `h1 = k mod m`, `h2 = 1 + k mod (m - 1)`.
///
/// The classic textbook family for integer keys. Negative keys are reduced
/// with Euclidean remainder so every key lands in range.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntDoubleHash;

macro_rules! int_double_hash {
    ($($t:ty),*) => {
        $(
            impl DoubleHash<$t> for IntDoubleHash {
                fn slot(&self, key: &$t, probe: usize, capacity: usize) -> usize {
                    let k = *key as i128;
                    let m = capacity as i128;
                    let home = k.rem_euclid(m) as u64;
                    let step = 1 + k.rem_euclid((m - 1).max(1)) as u64;
                    probe_slot(home, step, probe, capacity)
                }
            }
        )*
    };
}

int_double_hash!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Double hashing over any `Hash` key, using both halves of an `FxHasher`
/// digest for the home slot and the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct FxDoubleHash;

impl<K: Hash + ?Sized> DoubleHash<K> for FxDoubleHash {
    fn slot(&self, key: &K, probe: usize, capacity: usize) -> usize {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let digest = hasher.finish();
        let m = capacity as u64;
        let home = digest % m;
        let step = 1 + ((digest >> 32) ^ digest.rotate_left(17)) % (m - 1).max(1);
        probe_slot(home, step, probe, capacity)
    }
}
