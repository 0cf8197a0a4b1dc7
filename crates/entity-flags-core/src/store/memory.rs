// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-process flag store.

use std::{
    collections::BTreeMap,
    convert::Infallible,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError}
};

use async_trait::async_trait;

use super::FlagStore;
use crate::{FlagPredicate, Pagination, SortDirection};

/// Packed values held in a mutex-guarded ordered map.
///
/// Swaps are checked under the lock, so it behaves like a single-row
/// conditional `UPDATE`.
pub struct MemoryFlagStore<K = u64> {
    rows: Mutex<BTreeMap<K, i64>>
}

impl<K: Ord> MemoryFlagStore<K> {
    /// Empty store.
    pub const fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new())
        }
    }

    /// Insert or replace the packed value of `id`.
    pub fn insert(&self, id: K, bits: i64) {
        self.rows().insert(id, bits);
    }

    /// Remove record `id`, returning its last value.
    pub fn remove(&self, id: &K) -> Option<i64> {
        self.rows().remove(id)
    }

    /// Packed value of `id`.
    pub fn get(&self, id: &K) -> Option<i64> {
        self.rows().get(id).copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    /// Check whether the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, BTreeMap<K, i64>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Ord> Default for MemoryFlagStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for MemoryFlagStore<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFlagStore")
            .field("rows", &*self.rows())
            .finish()
    }
}

#[async_trait]
impl<K> FlagStore for MemoryFlagStore<K>
where
    K: Ord + Clone + Send + Sync + fmt::Debug
{
    type Id = K;
    type Error = Infallible;

    async fn load(&self, id: &K) -> Result<Option<i64>, Infallible> {
        Ok(self.get(id))
    }

    async fn compare_and_swap(&self, id: &K, expected: i64, new: i64) -> Result<bool, Infallible> {
        let mut rows = self.rows();
        match rows.get_mut(id) {
            Some(bits) if *bits == expected => {
                *bits = new;
                Ok(true)
            }
            _ => Ok(false)
        }
    }

    async fn find_ids(
        &self,
        predicate: &FlagPredicate,
        page: Pagination
    ) -> Result<Vec<K>, Infallible> {
        let rows = self.rows();
        let matching = rows
            .iter()
            .filter(|(_, bits)| predicate.matches(**bits))
            .map(|(id, _)| id.clone());
        let ids = match page.direction {
            SortDirection::Asc => matching.skip(page.skip()).take(page.take()).collect(),
            SortDirection::Desc => matching.rev().skip(page.skip()).take(page.take()).collect()
        };
        Ok(ids)
    }
}
