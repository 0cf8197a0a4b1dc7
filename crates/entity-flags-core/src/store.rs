// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Atomic flag updates against a backing store.
//!
//! Flag operations are pure functions of the packed value, so persisting
//! one is a read-modify-write. Two writers touching different flags of the
//! same record must not lose each other's bits; this module makes the write
//! conditional on the value it was computed from and retries on conflict.
//!
//! # Overview
//!
//! - [`FlagStore`] — Load, compare-and-swap and lookup of packed columns
//! - [`StoreError`] — Error wrapper for store operations
//! - [`update_atomic`] — Retry loop around any pure update
//! - [`MemoryFlagStore`] — In-process store for tests and caches
//! - `PgFlagStore` — PostgreSQL store (feature `postgres`)
//!
//! # Update Loop
//!
//! ```text
//! ┌────────────┐    ┌──────────────────┐    ┌────────────────────────┐
//! │ load(id)   │───►│ compute new bits │───►│ compare_and_swap(old)  │
//! └────────────┘    └──────────────────┘    └───────────┬────────────┘
//!       ▲                                      swapped? │
//!       │                 no, attempts left             │ yes
//!       └───────────────────────────────────────────────┤
//!                                                       ▼
//!                                                   Ok(new)
//! ```
//!
//! # Example
//!
//! ```rust
//! use entity_flags_core::{
//!     CascadeRule, FieldWidth, FlagSet,
//!     store::{DEFAULT_MAX_ATTEMPTS, MemoryFlagStore, apply_change_atomic}
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let flags = FlagSet::builder(FieldWidth::BigInt)
//!     .flag("active", 0)
//!     .flag("banned", 1)
//!     .rule(CascadeRule::on("banned").clear("active"))
//!     .build()
//!     .unwrap();
//!
//! let store = MemoryFlagStore::new();
//! store.insert(7, 0b01);
//!
//! let bits = apply_change_atomic(&store, &flags, &7, "banned", true, DEFAULT_MAX_ATTEMPTS)
//!     .await
//!     .unwrap();
//! assert_eq!(bits, 0b10);
//! # }
//! ```

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use self::memory::MemoryFlagStore;
#[cfg(feature = "postgres")]
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
pub use self::postgres::PgFlagStore;
use crate::{FlagError, FlagFilter, FlagPredicate, FlagSet, Pagination};

/// Attempts used by callers that do not pick their own limit.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Error wrapper for store operations.
///
/// Wraps the store's own error type while telling apart which step failed.
#[derive(Debug, Error)]
pub enum StoreError<E> {
    /// Failed to read the packed value.
    #[error("failed to load flags: {0}")]
    Load(#[source] E),

    /// Failed to write the packed value.
    #[error("failed to write flags: {0}")]
    Write(#[source] E),

    /// The flag operation itself was rejected.
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// No record with the requested id.
    #[error("record not found")]
    NotFound,

    /// Every attempt lost to a concurrent writer.
    #[error("flags changed concurrently on all {attempts} attempts")]
    Conflict {
        /// Attempts made.
        attempts: u32
    }
}

impl<E> StoreError<E> {
    /// Check if this is a load error.
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Check if this is a write error.
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    /// Check if the flag operation was rejected.
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag(_))
    }

    /// Check if the record was missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if retries were exhausted.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// The flag error, if the operation was rejected.
    pub const fn flag_error(&self) -> Option<&FlagError> {
        match self {
            Self::Flag(err) => Some(err),
            _ => None
        }
    }

    /// The store error, if a store call failed.
    pub fn into_store_error(self) -> Option<E> {
        match self {
            Self::Load(err) | Self::Write(err) => Some(err),
            _ => None
        }
    }
}

/// Storage of packed flag columns keyed by record id.
///
/// Implementations only move integers; all flag semantics stay in
/// [`FlagSet`].
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl FlagStore for AccountFlags {
///     type Id = Uuid;
///     type Error = sqlx::Error;
///
///     async fn load(&self, id: &Uuid) -> Result<Option<i64>, sqlx::Error> { ... }
///     async fn compare_and_swap(&self, id: &Uuid, expected: i64, new: i64)
///         -> Result<bool, sqlx::Error> { ... }
///     async fn find_ids(&self, predicate: &FlagPredicate, page: Pagination)
///         -> Result<Vec<Uuid>, sqlx::Error> { ... }
/// }
/// ```
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Record id type.
    type Id: Send + Sync + Clone + fmt::Debug;

    /// Error type of the underlying storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current packed value of record `id`, `None` if it does not exist.
    async fn load(&self, id: &Self::Id) -> Result<Option<i64>, Self::Error>;

    /// Write `new` only if the stored value still equals `expected`.
    ///
    /// Returns `false` when another writer got there first (or the record
    /// is gone).
    async fn compare_and_swap(
        &self,
        id: &Self::Id,
        expected: i64,
        new: i64
    ) -> Result<bool, Self::Error>;

    /// Ids of records matching `predicate`, ordered by id.
    async fn find_ids(
        &self,
        predicate: &FlagPredicate,
        page: Pagination
    ) -> Result<Vec<Self::Id>, Self::Error>;

    /// Ids of records matching a named filter.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Flag`] when the filter does not resolve
    /// - [`StoreError::Load`] when the lookup fails
    async fn find_by_filter(
        &self,
        set: &FlagSet,
        filter: &FlagFilter,
        page: Pagination
    ) -> Result<Vec<Self::Id>, StoreError<Self::Error>> {
        let predicate = set.predicate(filter)?;
        self.find_ids(&predicate, page).await.map_err(StoreError::Load)
    }
}

/// Apply a pure update to record `id` with optimistic retries.
///
/// An update that leaves the value unchanged is not written.
///
/// # Errors
///
/// - [`StoreError::NotFound`] when the record does not exist
/// - [`StoreError::Flag`] when `update` fails; nothing is written
/// - [`StoreError::Load`] / [`StoreError::Write`] on store failures
/// - [`StoreError::Conflict`] after `max_attempts` lost races
pub async fn update_atomic<S, F>(
    store: &S,
    id: &S::Id,
    max_attempts: u32,
    update: F
) -> Result<i64, StoreError<S::Error>>
where
    S: FlagStore + ?Sized,
    F: Fn(i64) -> Result<i64, FlagError> + Send + Sync
{
    let attempts = max_attempts.max(1);
    for attempt in 1..=attempts {
        let current = store
            .load(id)
            .await
            .map_err(StoreError::Load)?
            .ok_or(StoreError::NotFound)?;

        let next = update(current)?;
        if next == current {
            tracing::debug!(?id, bits = current, "flags unchanged, skipping write");
            return Ok(current);
        }

        if store
            .compare_and_swap(id, current, next)
            .await
            .map_err(StoreError::Write)?
        {
            tracing::debug!(?id, attempt, from = current, to = next, "flags written");
            return Ok(next);
        }
        tracing::debug!(?id, attempt, "flags changed concurrently, retrying");
    }

    tracing::warn!(?id, attempts, "giving up flag update after repeated conflicts");
    Err(StoreError::Conflict {
        attempts
    })
}

/// Persist [`FlagSet::apply_change`] for record `id`.
///
/// # Errors
///
/// See [`update_atomic`].
pub async fn apply_change_atomic<S>(
    store: &S,
    set: &FlagSet,
    id: &S::Id,
    name: &str,
    on: bool,
    max_attempts: u32
) -> Result<i64, StoreError<S::Error>>
where
    S: FlagStore + ?Sized
{
    update_atomic(store, id, max_attempts, |bits| set.apply_change(bits, name, on)).await
}

/// Persist a direct [`FlagSet::set_flag`] for record `id`.
///
/// # Errors
///
/// See [`update_atomic`].
pub async fn set_flag_atomic<S>(
    store: &S,
    set: &FlagSet,
    id: &S::Id,
    name: &str,
    on: bool,
    max_attempts: u32
) -> Result<i64, StoreError<S::Error>>
where
    S: FlagStore + ?Sized
{
    update_atomic(store, id, max_attempts, |bits| set.set_flag(bits, name, on)).await
}
