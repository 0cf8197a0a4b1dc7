// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query predicates over a packed flag column.
//!
//! A predicate is two masks: every bit of `true_mask` must be set and every
//! bit of `false_mask` must be clear.
//!
//! ```text
//! (field & true_mask) = true_mask AND (field & false_mask) = 0
//! ```
//!
//! This module only describes the condition. Executing it is the job of a
//! [`FlagStore`](crate::store::FlagStore) or the caller's own query code,
//! which receives SQL text with positional placeholders and the values to
//! bind.
//!
//! # Example
//!
//! ```rust
//! use entity_flags_core::{FieldWidth, FlagFilter, FlagRegistry};
//!
//! let registry = FlagRegistry::builder(FieldWidth::BigInt)
//!     .flag("a", 0)
//!     .flag("b", 1)
//!     .flag("c", 2)
//!     .build()?;
//!
//! let predicate = FlagFilter::new().set("a").set("b").unset("c").resolve(&registry)?;
//! assert_eq!((predicate.true_mask(), predicate.false_mask()), (3, 4));
//! assert!(predicate.matches(3));
//! assert!(!predicate.matches(7));
//!
//! let mut param_idx = 1;
//! let (sql, binds) = predicate.to_sql("flags", &mut param_idx);
//! assert_eq!(sql, "(flags & $1) = $1 AND (flags & $2) = 0");
//! assert_eq!(binds, [3, 4]);
//! assert_eq!(param_idx, 3);
//! # Ok::<(), entity_flags_core::FlagError>(())
//! ```

use std::collections::HashSet;

use crate::{FlagError, FlagRegistry};

/// Pair of masks selecting records by flag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagPredicate {
    true_mask:  i64,
    false_mask: i64
}

impl FlagPredicate {
    /// Build masks for flags required set and flags required clear.
    ///
    /// # Errors
    ///
    /// - [`FlagError::UnknownFlag`] for any unregistered name
    /// - [`FlagError::ConflictingPredicate`] when a name is on both sides
    pub fn build<T, F>(
        registry: &FlagRegistry,
        true_flags: T,
        false_flags: F
    ) -> Result<Self, FlagError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>
    {
        let mut required: HashSet<String> = HashSet::new();
        let mut true_mask = 0_i64;
        for name in true_flags {
            let name = name.as_ref();
            true_mask |= registry.get(name)?.mask();
            required.insert(name.to_string());
        }

        let mut false_mask = 0_i64;
        for name in false_flags {
            let name = name.as_ref();
            false_mask |= registry.get(name)?.mask();
            if required.contains(name) {
                return Err(FlagError::ConflictingPredicate {
                    name: name.to_string()
                });
            }
        }

        Ok(Self {
            true_mask,
            false_mask
        })
    }

    /// Predicate from raw masks.
    ///
    /// # Errors
    ///
    /// [`FlagError::ConflictingPredicate`] when the masks overlap. The
    /// reported name is the lowest shared bit, as no registry is at hand.
    pub fn from_masks(true_mask: i64, false_mask: i64) -> Result<Self, FlagError> {
        let overlap = true_mask & false_mask;
        if overlap != 0 {
            return Err(FlagError::ConflictingPredicate {
                name: format!("bit {}", overlap.trailing_zeros())
            });
        }
        Ok(Self {
            true_mask,
            false_mask
        })
    }

    /// Bits that must be set.
    pub const fn true_mask(&self) -> i64 {
        self.true_mask
    }

    /// Bits that must be clear.
    pub const fn false_mask(&self) -> i64 {
        self.false_mask
    }

    /// Check whether the predicate constrains nothing.
    pub const fn is_empty(&self) -> bool {
        self.true_mask == 0 && self.false_mask == 0
    }

    /// Evaluate the predicate against a packed value.
    pub const fn matches(&self, value: i64) -> bool {
        value & self.true_mask == self.true_mask && value & self.false_mask == 0
    }

    /// Render a PostgreSQL condition on `column`.
    ///
    /// Placeholders are numbered from `*param_idx`, which is advanced past
    /// the ones used so callers can keep appending conditions. Zero masks
    /// produce no clause; an empty predicate renders `TRUE`.
    ///
    /// # Returns
    ///
    /// SQL text and the values to bind, in placeholder order.
    pub fn to_sql(&self, column: &str, param_idx: &mut usize) -> (String, Vec<i64>) {
        let mut clauses = Vec::with_capacity(2);
        let mut binds = Vec::with_capacity(2);

        if self.true_mask != 0 {
            let idx = *param_idx;
            *param_idx += 1;
            clauses.push(format!("({column} & ${idx}) = ${idx}"));
            binds.push(self.true_mask);
        }
        if self.false_mask != 0 {
            let idx = *param_idx;
            *param_idx += 1;
            clauses.push(format!("({column} & ${idx}) = 0"));
            binds.push(self.false_mask);
        }

        if clauses.is_empty() {
            return ("TRUE".to_string(), binds);
        }
        (clauses.join(" AND "), binds)
    }
}

/// Collects flag names for a predicate before resolving them.
///
/// Replaces passing one mixed list where some entries are marked false:
/// names required set and names required clear are kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagFilter {
    set:   Vec<String>,
    unset: Vec<String>
}

impl FlagFilter {
    /// Empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `name` to be set.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>) -> Self {
        self.set.push(name.into());
        self
    }

    /// Require `name` to be clear.
    #[must_use]
    pub fn unset(mut self, name: impl Into<String>) -> Self {
        self.unset.push(name.into());
        self
    }

    /// Require `name` to be in state `on`.
    #[must_use]
    pub fn with(self, name: impl Into<String>, on: bool) -> Self {
        if on { self.set(name) } else { self.unset(name) }
    }

    /// Names required set.
    pub fn set_names(&self) -> &[String] {
        &self.set
    }

    /// Names required clear.
    pub fn unset_names(&self) -> &[String] {
        &self.unset
    }

    /// Resolve names into masks.
    ///
    /// # Errors
    ///
    /// Same as [`FlagPredicate::build`].
    pub fn resolve(&self, registry: &FlagRegistry) -> Result<FlagPredicate, FlagError> {
        FlagPredicate::build(registry, &self.set, &self.unset)
    }
}
