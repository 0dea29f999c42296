//! Per-state row stores backing the value and count tables.
//!
//! Two wrappers around the same map share a read/write surface but differ in
//! miss behavior: [`DefaultingStore`] materializes a default row on first
//! access (training mode), [`StrictStore`] reports misses as `None`
//! (restored mode), so evaluation code can tell a never-seen state apart
//! from a seen state that still holds default values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Lazily-defaulting row store used by a live training agent.
///
/// Rows are created exactly once, on the first read or write of a key, as
/// `[fill; width]`. The store only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultingStore<T> {
    rows: HashMap<StateKey, Vec<T>>,
    width: usize,
    fill: T,
}

impl<T: Clone> DefaultingStore<T> {
    /// Create an empty store producing rows of `width` copies of `fill`.
    pub fn new(width: usize, fill: T) -> Self {
        Self {
            rows: HashMap::new(),
            width,
            fill,
        }
    }

    /// Rebuild a store around existing rows.
    pub fn from_rows(width: usize, fill: T, rows: HashMap<StateKey, Vec<T>>) -> Self {
        Self { rows, width, fill }
    }

    /// Read the row for `key`, creating it at the default if unseen.
    pub fn row(&mut self, key: &StateKey) -> &[T] {
        self.row_mut(key)
    }

    /// Mutable row access, creating the row at the default if unseen.
    pub fn row_mut(&mut self, key: &StateKey) -> &mut [T] {
        let width = self.width;
        let fill = self.fill.clone();
        self.rows
            .entry(key.clone())
            .or_insert_with(|| vec![fill; width])
    }

    /// Non-materializing read; `None` means the key was never touched.
    pub fn peek(&self, key: &StateKey) -> Option<&[T]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Number of distinct states with a row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row width (the action-space size).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Vec<T>)> {
        self.rows.iter()
    }

    /// Clone out the underlying map for snapshotting.
    pub fn to_rows(&self) -> HashMap<StateKey, Vec<T>> {
        self.rows.clone()
    }
}

/// Non-defaulting row store used by restored agents.
///
/// Lookups for keys absent from the persisted table return `None` instead of
/// silently materializing a default row; callers use that signal to fall
/// back to the nearest-state approximator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrictStore<T> {
    rows: HashMap<StateKey, Vec<T>>,
    width: usize,
}

impl<T> StrictStore<T> {
    /// Wrap restored rows.
    pub fn from_rows(width: usize, rows: HashMap<StateKey, Vec<T>>) -> Self {
        Self { rows, width }
    }

    /// Look up the row for `key`; `None` signals an unknown state.
    pub fn row(&self, key: &StateKey) -> Option<&[T]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Vec<T>)> {
        self.rows.iter()
    }

    /// Clone out the underlying map for re-snapshotting.
    pub fn to_rows(&self) -> HashMap<StateKey, Vec<T>>
    where
        T: Clone,
    {
        self.rows.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(px: i64) -> StateKey {
        StateKey::new().with("px", px)
    }

    #[test]
    fn test_defaulting_store_materializes_on_first_read() {
        let mut store: DefaultingStore<f64> = DefaultingStore::new(4, 5.0);
        assert_eq!(store.peek(&key(1)), None);

        assert_eq!(store.row(&key(1)), &[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(store.len(), 1);

        // Second access reuses the same row.
        store.row_mut(&key(1))[2] = -1.0;
        assert_eq!(store.row(&key(1)), &[5.0, 5.0, -1.0, 5.0]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_defaulting_store_grows_monotonically() {
        let mut store: DefaultingStore<u64> = DefaultingStore::new(2, 0);
        for i in 0..10 {
            store.row(&key(i));
        }
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn test_strict_store_signals_misses() {
        let mut rows = HashMap::new();
        rows.insert(key(1), vec![1.0, 2.0]);
        let store = StrictStore::from_rows(2, rows);

        assert_eq!(store.row(&key(1)), Some([1.0, 2.0].as_slice()));
        assert_eq!(store.row(&key(2)), None);
        assert_eq!(store.len(), 1);
    }
}
