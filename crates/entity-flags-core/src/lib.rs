// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core types for entity-flags.
//!
//! Packs named boolean flags into the bits of one integer column and keeps
//! derived flags consistent through cascade rules. Generated code from
//! `#[derive(Flags)]` builds on this crate; it can also be used directly.
//!
//! # Overview
//!
//! - [`FlagSet`] — Registry plus cascade rules; every operation goes through it
//! - [`FlagRegistry`] — Name to bit index mapping with labels
//! - [`CascadeRule`] — Side-effects of writing a source flag
//! - [`FlagPredicate`] — Masks selecting records by flag state
//! - [`Flagged`] — Host records carrying a packed column
//! - [`store`] — Atomic read-modify-write against a backing store
//! - [`prelude`] — Convenient re-exports
//!
//! # Layout
//!
//! ```text
//! bit:   ... 3       2       1       0
//!          hidden  banned  verified active
//! value: 0b0101 = active + banned
//! ```
//!
//! Bits no flag is registered at are carried through every operation
//! untouched.
//!
//! # Usage
//!
//! ```rust
//! use entity_flags_core::{CascadeRule, FieldWidth, FlagSet};
//!
//! let flags = FlagSet::builder(FieldWidth::Integer)
//!     .flag("active", 0)
//!     .flag("verified", 1)
//!     .flag("banned", 2)
//!     .rule(CascadeRule::on("banned").clear("active"))
//!     .build()?;
//!
//! let value = flags.set_flag(0, "active", true)?;
//! let value = flags.apply_change(value, "banned", true)?;
//! assert!(!flags.get_flag(value, "active")?);
//! assert_eq!(flags.mask_of(["active", "banned"])?, 0b101);
//! # Ok::<(), entity_flags_core::FlagError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bits;
pub mod cascade;
#[cfg(feature = "serde")]
pub mod config;
mod error;
mod flag_set;
mod host;
pub mod predicate;
pub mod prelude;
pub mod registry;
pub mod store;
mod width;

/// Re-export async_trait for store implementations.
pub use async_trait::async_trait;
pub use bits::Flag;
pub use cascade::{CascadeEngine, CascadeRule, CascadeRules, CascadeTarget, Directive, FlagWrite};
#[cfg(feature = "serde")]
pub use config::FlagSetConfig;
pub use error::FlagError;
pub use flag_set::{FlagEntry, FlagSet, FlagSetBuilder, FlagState, ListForm, parse_flag_input};
pub use host::Flagged;
pub use predicate::{FlagFilter, FlagPredicate};
pub use registry::{FlagDef, FlagRegistry, FlagRegistryBuilder};
pub use store::{FlagStore, StoreError};
pub use width::{FieldWidth, ParseWidthError};

/// Pagination parameters for store lookups.
///
/// Used by [`FlagStore::find_ids`] to page through matching records.
///
/// # Example
///
/// ```rust
/// use entity_flags_core::Pagination;
///
/// let page = Pagination::new(10, 0); // First 10 ids
/// let next = Pagination::new(10, 10); // Next 10 ids
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of ids to return.
    pub limit: i64,

    /// Number of ids to skip.
    pub offset: i64,

    /// Order of ids.
    pub direction: SortDirection
}

impl Pagination {
    /// Create new pagination parameters in ascending id order.
    ///
    /// # Arguments
    ///
    /// * `limit` — Maximum ids to return
    /// * `offset` — Number of ids to skip
    pub const fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            direction: SortDirection::Asc
        }
    }

    /// Create pagination for a specific page.
    ///
    /// # Arguments
    ///
    /// * `page` — Page number (0-indexed)
    /// * `per_page` — Ids per page
    ///
    /// # Example
    ///
    /// ```rust
    /// use entity_flags_core::Pagination;
    ///
    /// let page_2 = Pagination::page(2, 25);
    /// assert_eq!(page_2.offset, 50);
    /// ```
    pub const fn page(page: i64, per_page: i64) -> Self {
        Self::new(per_page, page.saturating_mul(per_page))
    }

    /// Same window in the given order.
    #[must_use]
    pub const fn ordered(self, direction: SortDirection) -> Self {
        Self {
            direction,
            ..self
        }
    }

    /// Offset as `usize`, negative values read as zero.
    pub fn skip(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(0)
    }

    /// Limit as `usize`, negative values read as zero.
    pub fn take(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(100, 0)
    }
}

/// Sort direction for ordered lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,

    /// Descending order.
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let p = Pagination::new(50, 100);
        assert_eq!(p.limit, 50);
        assert_eq!(p.offset, 100);
        assert_eq!(p.direction, SortDirection::Asc);
    }

    #[test]
    fn pagination_page() {
        let p = Pagination::page(2, 25);
        assert_eq!(p.limit, 25);
        assert_eq!(p.offset, 50);
    }

    #[test]
    fn pagination_page_saturates() {
        let p = Pagination::page(i64::MAX, 25);
        assert_eq!(p.offset, i64::MAX);
        let p = Pagination::page(i64::MIN, 2);
        assert_eq!(p.offset, i64::MIN);
    }

    #[test]
    fn pagination_default() {
        let p = Pagination::default();
        assert_eq!(p.limit, 100);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn pagination_ordered() {
        let p = Pagination::page(1, 10).ordered(SortDirection::Desc);
        assert_eq!(p.direction, SortDirection::Desc);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn pagination_negative_window() {
        let p = Pagination::new(-1, -5);
        assert_eq!(p.take(), 0);
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn sort_direction_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }

    #[test]
    fn sort_direction_default() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }
}
