// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use entity_flags_core::prelude::*;
//!
//! let flags = FlagSet::builder(FieldWidth::BigInt).flag("active", 0).build()?;
//! assert!(flags.get_flag(1, "active")?);
//! # Ok::<(), FlagError>(())
//! ```

pub use crate::{
    CascadeRule, FieldWidth, Flag, FlagError, FlagFilter, FlagPredicate, FlagSet, FlagStore,
    Flagged, ListForm, Pagination, SortDirection, StoreError, async_trait,
    store::{DEFAULT_MAX_ATTEMPTS, MemoryFlagStore, apply_change_atomic, set_flag_atomic}
};
