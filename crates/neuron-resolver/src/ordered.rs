//! A duplicate-free sequence with O(1) membership and position lookup.

use std::collections::HashMap;
use std::hash::Hash;

/// An ordered list of unique items that supports swapping positions.
///
/// The position table is kept in step with the items on every push and swap.
#[derive(Debug, Clone)]
pub struct UniqueOrderedList<T> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> UniqueOrderedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Append `item` unless it is already present. Returns `true` if appended.
    pub fn push(&mut self, item: T) -> bool {
        if self.positions.contains_key(&item) {
            return false;
        }
        self.positions.insert(item.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub fn position(&self, item: &T) -> Option<usize> {
        self.positions.get(item).copied()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// Swap the items at positions `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.items.swap(a, b);
        self.positions.insert(self.items[a].clone(), a);
        self.positions.insert(self.items[b].clone(), b);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the list, returning its items last-first.
    pub fn into_reversed(self) -> Vec<T> {
        let mut items = self.items;
        items.reverse();
        items
    }
}

impl<T: Clone + Eq + Hash> Default for UniqueOrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for UniqueOrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}
