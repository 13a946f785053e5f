use crate::error::SetError;
use crate::prime::next_prime;

/// Fixed-capacity array of optional slots.
///
/// A slot is occupied iff it holds a value. The store owns no hashing
/// logic; callers decide which index a value lives at.
#[derive(Clone)]
pub struct SlotStore<T> {
    slots: Vec<Option<T>>,
    occupied: usize,
}

impl<T> SlotStore<T> {
    /// Create a store with exactly `capacity` empty slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, occupied: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_occupied(&self, index: usize) -> Result<bool, SetError> {
        Ok(self.slot(index)?.is_some())
    }

    /// Borrow the value at `index`, or `None` if the slot is empty.
    pub fn get(&self, index: usize) -> Result<Option<&T>, SetError> {
        Ok(self.slot(index)?.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Result<Option<&mut T>, SetError> {
        let capacity = self.capacity();
        self.slots
            .get_mut(index)
            .map(Option::as_mut)
            .ok_or(SetError::Index { index, capacity })
    }

    /// Store `value` at `index`, returning whatever was there before.
    pub fn set(&mut self, index: usize, value: T) -> Result<Option<T>, SetError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SetError::Index { index, capacity })?;
        let previous = slot.replace(value);
        if previous.is_none() {
            self.occupied += 1;
        }
        Ok(previous)
    }

    /// Empty the slot at `index`, returning its value.
    pub fn take(&mut self, index: usize) -> Result<Option<T>, SetError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SetError::Index { index, capacity })?;
        let previous = slot.take();
        if previous.is_some() {
            self.occupied -= 1;
        }
        Ok(previous)
    }

    /// Grow to the smallest prime capacity that is at least `min_capacity`
    /// and strictly larger than the current one. Occupied slots keep their
    /// indices. Returns the new capacity.
    pub fn grow(&mut self, min_capacity: usize) -> usize {
        let capacity = next_prime(min_capacity.max(self.capacity() + 1));
        self.slots.resize_with(capacity, || None);
        capacity
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    /// Consume the store, yielding occupied values in index order.
    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.slots.into_iter().flatten()
    }

    fn slot(&self, index: usize) -> Result<&Option<T>, SetError> {
        self.slots.get(index).ok_or(SetError::Index {
            index,
            capacity: self.capacity(),
        })
    }
}
