// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Host records that carry a packed flag column.
//!
//! A host implements three required methods (usually through
//! `#[derive(Flags)]`) and gets named flag access for free. Every mutating
//! method computes the new value first and writes the field once, so on
//! error the record is untouched.
//!
//! # Example
//!
//! ```rust
//! use std::sync::OnceLock;
//!
//! use entity_flags_core::{CascadeRule, FieldWidth, FlagSet, Flagged};
//!
//! struct Account {
//!     flags: i64
//! }
//!
//! impl Flagged for Account {
//!     fn flag_set() -> &'static FlagSet {
//!         static SET: OnceLock<FlagSet> = OnceLock::new();
//!         SET.get_or_init(|| {
//!             FlagSet::builder(FieldWidth::BigInt)
//!                 .flag("active", 0)
//!                 .flag("locked", 1)
//!                 .rule(CascadeRule::on("locked").invert("active"))
//!                 .build()
//!                 .expect("valid flag configuration")
//!         })
//!     }
//!
//!     fn flag_bits(&self) -> i64 {
//!         self.flags
//!     }
//!
//!     fn set_flag_bits(&mut self, bits: i64) {
//!         self.flags = bits;
//!     }
//! }
//!
//! let mut account = Account { flags: 0 };
//! account.change_flag("locked", true)?;
//! assert!(account.has_flag("locked")?);
//! assert!(!account.has_flag("active")?);
//! # Ok::<(), entity_flags_core::FlagError>(())
//! ```

use crate::{FlagEntry, FlagError, FlagFilter, FlagPredicate, FlagSet, ListForm};

/// A record whose boolean attributes live in one packed integer field.
pub trait Flagged {
    /// Flag configuration shared by every instance of the type.
    fn flag_set() -> &'static FlagSet;

    /// Current packed value.
    fn flag_bits(&self) -> i64;

    /// Replace the packed value.
    fn set_flag_bits(&mut self, bits: i64);

    /// Read flag `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    fn has_flag(&self, name: &str) -> Result<bool, FlagError> {
        Self::flag_set().get_flag(self.flag_bits(), name)
    }

    /// Write flag `name` without cascading.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    fn set_flag(&mut self, name: &str, on: bool) -> Result<(), FlagError> {
        let bits = Self::flag_set().set_flag(self.flag_bits(), name, on)?;
        self.set_flag_bits(bits);
        Ok(())
    }

    /// Clear flag `name` without cascading.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    fn clear_flag(&mut self, name: &str) -> Result<(), FlagError> {
        self.set_flag(name, false)
    }

    /// Write flag `name` and apply its cascade rule.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    fn change_flag(&mut self, name: &str, on: bool) -> Result<(), FlagError> {
        let bits = Self::flag_set().apply_change(self.flag_bits(), name, on)?;
        self.set_flag_bits(bits);
        Ok(())
    }

    /// Apply raw `(name, input)` pairs with cascades, all or nothing.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::assign`].
    fn assign_flags<'i, I>(&mut self, input: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = (&'i str, &'i str)>
    {
        let bits = Self::flag_set().assign(self.flag_bits(), input)?;
        self.set_flag_bits(bits);
        Ok(())
    }

    /// Configured flags and their state on this record.
    fn flags_list(&self, only: Option<bool>, form: ListForm) -> Vec<FlagEntry<'static>> {
        Self::flag_set().flags_list(self.flag_bits(), only, form)
    }

    /// Resolve a filter against this type's flags.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::predicate`].
    fn flag_predicate(filter: &FlagFilter) -> Result<FlagPredicate, FlagError> {
        Self::flag_set().predicate(filter)
    }
}
