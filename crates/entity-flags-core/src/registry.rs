// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Flag registry: the name → bit index mapping of one host type.
//!
//! A registry is built once, validated as a whole, and never changes
//! afterwards. Declaration order is kept and drives every enumeration
//! (`iter`, `flags_list`).
//!
//! # Validation
//!
//! [`FlagRegistryBuilder::build`] rejects, in declaration order:
//!
//! | Problem | Error |
//! |---------|-------|
//! | index wider than the [`FieldWidth`] | [`FlagError::InvalidIndex`] |
//! | name registered twice | [`FlagError::DuplicateFlag`] |
//! | index shared by two names | [`FlagError::DuplicateIndex`] |
//!
//! # Example
//!
//! ```rust
//! use entity_flags_core::{FieldWidth, FlagRegistry};
//!
//! let registry = FlagRegistry::builder(FieldWidth::BigInt)
//!     .flag("active", 0)
//!     .labeled("email_verified", 1, "Email confirmed")
//!     .flag("banned", 2)
//!     .build()?;
//!
//! assert_eq!(registry.index_of("banned")?, 2);
//! assert_eq!(registry.mask_of(["active", "banned"])?, 0b101);
//! assert_eq!(registry.label_of("active")?, "Active");
//! # Ok::<(), entity_flags_core::FlagError>(())
//! ```

use std::collections::HashMap;

use convert_case::{Case, Casing};

use crate::{FieldWidth, FlagError, bits::Flag};

/// One registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    name:  String,
    index: u32,
    label: String
}

impl FlagDef {
    /// Flag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bit position.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Single-bit mask.
    pub const fn mask(&self) -> i64 {
        1_i64 << self.index
    }

    /// Borrowed handle for infallible bit operations.
    pub fn as_flag(&self) -> Flag<'_> {
        Flag::new(&self.name, self.index)
    }
}

/// Derive a label from a flag name (`email_verified` → `Email Verified`).
pub fn default_label(name: &str) -> String {
    name.to_case(Case::Title)
}

/// Immutable, validated mapping from flag names to bit indices.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    width:   FieldWidth,
    flags:   Vec<FlagDef>,
    by_name: HashMap<String, usize>
}

impl FlagRegistry {
    /// Start building a registry for a column of `width`.
    pub fn builder(width: FieldWidth) -> FlagRegistryBuilder {
        FlagRegistryBuilder {
            width,
            entries: Vec::new()
        }
    }

    /// Declared column width.
    pub const fn width(&self) -> FieldWidth {
        self.width
    }

    /// Number of registered flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check whether no flag is registered.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDef> {
        self.flags.iter()
    }

    /// Full definition of `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn get(&self, name: &str) -> Result<&FlagDef, FlagError> {
        self.by_name
            .get(name)
            .map(|&pos| &self.flags[pos])
            .ok_or_else(|| FlagError::unknown(name))
    }

    /// Bit index of `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn index_of(&self, name: &str) -> Result<u32, FlagError> {
        self.get(name).map(FlagDef::index)
    }

    /// Handle for `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn flag(&self, name: &str) -> Result<Flag<'_>, FlagError> {
        self.get(name).map(FlagDef::as_flag)
    }

    /// Human-readable label of `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn label_of(&self, name: &str) -> Result<&str, FlagError> {
        self.get(name).map(FlagDef::label)
    }

    /// Flag registered at `index`, if any.
    pub fn by_index(&self, index: u32) -> Option<&FlagDef> {
        self.flags.iter().find(|def| def.index == index)
    }

    /// Union mask of `names`.
    ///
    /// An empty input yields `0`. Duplicates are harmless.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] for the first name that is not registered;
    /// no partial mask is returned.
    pub fn mask_of<I, S>(&self, names: I) -> Result<i64, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        names
            .into_iter()
            .try_fold(0_i64, |mask, name| Ok(mask | self.get(name.as_ref())?.mask()))
    }

    /// Union mask of every registered flag.
    pub fn full_mask(&self) -> i64 {
        self.flags.iter().fold(0, |mask, def| mask | def.mask())
    }
}

/// Builder for [`FlagRegistry`].
///
/// Entries are only validated by [`build`](Self::build), so declaration
/// mistakes surface together with their position.
#[derive(Debug, Clone)]
pub struct FlagRegistryBuilder {
    width:   FieldWidth,
    entries: Vec<(String, u32, Option<String>)>
}

impl FlagRegistryBuilder {
    /// Register `name` at bit `index` with a label derived from the name.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, index: u32) -> Self {
        self.entries.push((name.into(), index, None));
        self
    }

    /// Register `name` at bit `index` with an explicit label.
    #[must_use]
    pub fn labeled(
        mut self,
        name: impl Into<String>,
        index: u32,
        label: impl Into<String>
    ) -> Self {
        self.entries.push((name.into(), index, Some(label.into())));
        self
    }

    /// Validate all entries and freeze the registry.
    ///
    /// # Errors
    ///
    /// The first of [`FlagError::InvalidIndex`], [`FlagError::DuplicateFlag`]
    /// or [`FlagError::DuplicateIndex`] found in declaration order.
    pub fn build(self) -> Result<FlagRegistry, FlagError> {
        let mut flags: Vec<FlagDef> = Vec::with_capacity(self.entries.len());
        let mut by_name = HashMap::with_capacity(self.entries.len());
        let mut by_index: HashMap<u32, usize> = HashMap::with_capacity(self.entries.len());

        for (name, index, label) in self.entries {
            if !self.width.admits(index) {
                return Err(FlagError::InvalidIndex {
                    index,
                    max: self.width.max_index()
                });
            }
            if by_name.contains_key(&name) {
                return Err(FlagError::DuplicateFlag {
                    name
                });
            }
            if let Some(&pos) = by_index.get(&index) {
                return Err(FlagError::DuplicateIndex {
                    index,
                    first: flags[pos].name.clone(),
                    second: name
                });
            }

            let pos = flags.len();
            by_name.insert(name.clone(), pos);
            by_index.insert(index, pos);
            let label = label.unwrap_or_else(|| default_label(&name));
            flags.push(FlagDef {
                name,
                index,
                label
            });
        }

        Ok(FlagRegistry {
            width: self.width,
            flags,
            by_name
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> FlagRegistry {
        FlagRegistry::builder(FieldWidth::BigInt)
            .flag("a", 0)
            .flag("b", 1)
            .flag("c", 2)
            .build()
            .unwrap()
    }

    #[test]
    fn index_lookup() {
        let reg = abc();
        assert_eq!(reg.index_of("a").unwrap(), 0);
        assert_eq!(reg.index_of("c").unwrap(), 2);
        assert_eq!(reg.len(), 3);
        assert!(!reg.is_empty());
        assert!(reg.contains("b"));
        assert!(!reg.contains("d"));
    }

    #[test]
    fn unknown_name_fails() {
        let err = abc().index_of("does_not_exist").unwrap_err();
        assert_eq!(err, FlagError::unknown("does_not_exist"));
    }

    #[test]
    fn mask_of_names() {
        let reg = abc();
        assert_eq!(reg.mask_of(["a", "b"]).unwrap(), 3);
        assert_eq!(reg.mask_of(["c"]).unwrap(), 4);
        assert_eq!(reg.mask_of(["a", "a"]).unwrap(), 1);
        assert_eq!(reg.mask_of(Vec::<String>::new()).unwrap(), 0);
        assert_eq!(reg.full_mask(), 7);
    }

    #[test]
    fn mask_of_rejects_any_unknown() {
        let err = abc().mask_of(["a", "zzz", "b"]).unwrap_err();
        assert_eq!(err, FlagError::unknown("zzz"));
    }

    #[test]
    fn non_contiguous_indices() {
        let reg = FlagRegistry::builder(FieldWidth::BigInt)
            .flag("low", 0)
            .flag("high", 40)
            .build()
            .unwrap();
        assert_eq!(reg.mask_of(["high"]).unwrap(), 1_i64 << 40);
        assert_eq!(reg.by_index(40).unwrap().name(), "high");
        assert!(reg.by_index(1).is_none());
    }

    #[test]
    fn width_checked_at_build() {
        let err = FlagRegistry::builder(FieldWidth::Integer)
            .flag("ok", 30)
            .flag("too_wide", 31)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FlagError::InvalidIndex {
                index: 31,
                max:   30
            }
        );
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = FlagRegistry::builder(FieldWidth::BigInt)
            .flag("a", 0)
            .flag("a", 1)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FlagError::DuplicateFlag {
                name: "a".into()
            }
        );
    }

    #[test]
    fn duplicate_index_rejected() {
        let err = FlagRegistry::builder(FieldWidth::BigInt)
            .flag("a", 3)
            .flag("b", 3)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FlagError::DuplicateIndex {
                index:  3,
                first:  "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn labels() {
        let reg = FlagRegistry::builder(FieldWidth::BigInt)
            .flag("email_verified", 0)
            .labeled("is_admin", 1, "Administrator")
            .build()
            .unwrap();
        assert_eq!(reg.label_of("email_verified").unwrap(), "Email Verified");
        assert_eq!(reg.label_of("is_admin").unwrap(), "Administrator");
        assert!(reg.label_of("nope").unwrap_err().is_unknown_flag());
    }

    #[test]
    fn iteration_keeps_declaration_order() {
        let reg = FlagRegistry::builder(FieldWidth::BigInt)
            .flag("z", 5)
            .flag("a", 1)
            .flag("m", 3)
            .build()
            .unwrap();
        let names: Vec<&str> = reg.iter().map(FlagDef::name).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn flag_handle_borrows_name() {
        let reg = abc();
        let b = reg.flag("b").unwrap();
        assert_eq!(b.name(), "b");
        assert_eq!(b.mask(), 2);
    }
}
