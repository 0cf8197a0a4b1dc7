// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The flag set of one host type: registry plus cascade rules.
//!
//! [`FlagSet`] is the entry point for every operation on a packed value. It
//! is built and validated once, then shared read-only (host types keep it in
//! a `static`). All operations are pure: they take the current packed value
//! and return the new one, or an error with nothing changed.
//!
//! # Write Paths
//!
//! | Method | Cascades | Use |
//! |--------|----------|-----|
//! | [`set_flag`](FlagSet::set_flag) | No | Direct single-bit write |
//! | [`clear_flag`](FlagSet::clear_flag) | No | Same as `set_flag(.., false)` |
//! | [`apply_change`](FlagSet::apply_change) | Yes | Write plus rule targets |
//! | [`assign`](FlagSet::assign) | Yes | Raw form input, in order |

use crate::{
    CascadeRule, FieldWidth, FlagError, FlagFilter, FlagPredicate, FlagRegistry,
    cascade::{CascadeEngine, CascadeRules, FlagWrite},
    registry::FlagRegistryBuilder
};

/// How [`FlagSet::flags_list`] reports each flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListForm {
    /// Report `true`/`false`.
    #[default]
    State,

    /// Report the bit value (`1 << index` when set, `0` otherwise).
    Bit
}

/// Reported state of one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagState {
    /// Boolean state.
    State(bool),

    /// Bit value.
    Bit(i64)
}

impl FlagState {
    /// Whether the flag is set, whichever form was requested.
    pub const fn is_set(&self) -> bool {
        match self {
            Self::State(on) => *on,
            Self::Bit(bit) => *bit != 0
        }
    }
}

/// One row of [`FlagSet::flags_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagEntry<'a> {
    /// Flag name.
    pub name:  &'a str,
    /// Human-readable label.
    pub label: &'a str,
    /// Current state in the requested form.
    pub state: FlagState
}

/// Read raw form input as a boolean.
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive,
/// surrounding whitespace ignored).
///
/// # Errors
///
/// [`FlagError::InvalidValue`] for anything else.
pub fn parse_flag_input(name: &str, raw: &str) -> Result<bool, FlagError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(FlagError::InvalidValue {
            name:  name.to_string(),
            value: raw.to_string()
        })
    }
}

/// Validated registry and cascade rules of one host type.
#[derive(Debug, Clone)]
pub struct FlagSet {
    registry: FlagRegistry,
    rules:    CascadeRules
}

impl FlagSet {
    /// Start building a flag set for a column of `width`.
    pub fn builder(width: FieldWidth) -> FlagSetBuilder {
        FlagSetBuilder {
            registry: FlagRegistry::builder(width),
            rules:    Vec::new()
        }
    }

    /// Combine an existing registry with rules.
    ///
    /// # Errors
    ///
    /// - [`FlagError::DuplicateRule`] for two rules on one source
    /// - [`FlagError::UnknownFlag`] for a rule naming an unregistered flag
    pub fn new(
        registry: FlagRegistry,
        rules: impl IntoIterator<Item = CascadeRule>
    ) -> Result<Self, FlagError> {
        let rules = CascadeRules::new(rules)?;
        rules.validate(&registry)?;
        Ok(Self {
            registry,
            rules
        })
    }

    /// Flag registry.
    pub const fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    /// Cascade rules.
    pub const fn rules(&self) -> &CascadeRules {
        &self.rules
    }

    /// Declared column width.
    pub const fn width(&self) -> FieldWidth {
        self.registry.width()
    }

    /// Bit index of `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn index_of(&self, name: &str) -> Result<u32, FlagError> {
        self.registry.index_of(name)
    }

    /// Union mask of `names`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] for any unregistered name.
    pub fn mask_of<I, S>(&self, names: I) -> Result<i64, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        self.registry.mask_of(names)
    }

    /// Label of `name`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn label_of(&self, name: &str) -> Result<&str, FlagError> {
        self.registry.label_of(name)
    }

    /// Read flag `name` from `value`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn get_flag(&self, value: i64, name: &str) -> Result<bool, FlagError> {
        Ok(self.registry.flag(name)?.is_set(value))
    }

    /// Write flag `name` without cascading.
    ///
    /// Idempotent; bits of other flags and unregistered bits are unchanged.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn set_flag(&self, value: i64, name: &str, on: bool) -> Result<i64, FlagError> {
        Ok(self.registry.flag(name)?.write(value, on))
    }

    /// Clear flag `name` without cascading.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `name` is not registered.
    pub fn clear_flag(&self, value: i64, name: &str) -> Result<i64, FlagError> {
        self.set_flag(value, name, false)
    }

    /// Write flag `source` and apply its cascade rule.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `source` is not registered. Targets
    /// were validated when the set was built.
    pub fn apply_change(&self, value: i64, source: &str, on: bool) -> Result<i64, FlagError> {
        self.engine().apply(value, source, on)
    }

    /// Writes [`apply_change`](Self::apply_change) would perform, source
    /// first.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when `source` is not registered.
    pub fn plan_change(&self, source: &str, on: bool) -> Result<Vec<FlagWrite<'_>>, FlagError> {
        self.engine().plan(source, on)
    }

    /// Apply raw `(name, input)` pairs in order, each with its cascade.
    ///
    /// Either every pair is applied or, on the first bad name or input, none
    /// is.
    ///
    /// # Errors
    ///
    /// - [`FlagError::UnknownFlag`] for an unregistered name
    /// - [`FlagError::InvalidValue`] for input that is not a boolean
    pub fn assign<'i, I>(&self, value: i64, input: I) -> Result<i64, FlagError>
    where
        I: IntoIterator<Item = (&'i str, &'i str)>
    {
        let engine = self.engine();
        input.into_iter().try_fold(value, |bits, (name, raw)| {
            let on = parse_flag_input(name, raw)?;
            engine.apply(bits, name, on)
        })
    }

    /// Masks for records with `true_flags` set and `false_flags` clear.
    ///
    /// # Errors
    ///
    /// - [`FlagError::UnknownFlag`] for an unregistered name
    /// - [`FlagError::ConflictingPredicate`] for a name on both sides
    pub fn build_predicate_masks<T, F>(
        &self,
        true_flags: T,
        false_flags: F
    ) -> Result<FlagPredicate, FlagError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>
    {
        FlagPredicate::build(&self.registry, true_flags, false_flags)
    }

    /// Resolve a [`FlagFilter`] against this set.
    ///
    /// # Errors
    ///
    /// Same as [`build_predicate_masks`](Self::build_predicate_masks).
    pub fn predicate(&self, filter: &FlagFilter) -> Result<FlagPredicate, FlagError> {
        filter.resolve(&self.registry)
    }

    /// Configured flags with their state in `value`.
    ///
    /// `only` keeps just the flags in that state. Declaration order.
    pub fn flags_list(&self, value: i64, only: Option<bool>, form: ListForm) -> Vec<FlagEntry<'_>> {
        self.registry
            .iter()
            .filter_map(|def| {
                let on = def.as_flag().is_set(value);
                if only.is_some_and(|wanted| wanted != on) {
                    return None;
                }
                let state = match form {
                    ListForm::State => FlagState::State(on),
                    ListForm::Bit => FlagState::Bit(if on { def.mask() } else { 0 })
                };
                Some(FlagEntry {
                    name: def.name(),
                    label: def.label(),
                    state
                })
            })
            .collect()
    }

    fn engine(&self) -> CascadeEngine<'_> {
        CascadeEngine::new(&self.registry, &self.rules)
    }
}

/// Builder for [`FlagSet`].
#[derive(Debug, Clone)]
pub struct FlagSetBuilder {
    registry: FlagRegistryBuilder,
    rules:    Vec<CascadeRule>
}

impl FlagSetBuilder {
    /// Register `name` at bit `index`.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, index: u32) -> Self {
        self.registry = self.registry.flag(name, index);
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
        self.registry = self.registry.labeled(name, index, label);
        self
    }

    /// Add a cascade rule.
    #[must_use]
    pub fn rule(mut self, rule: CascadeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate the registry and rules.
    ///
    /// # Errors
    ///
    /// Any configuration error of [`FlagRegistryBuilder::build`] or
    /// [`FlagSet::new`].
    pub fn build(self) -> Result<FlagSet, FlagError> {
        FlagSet::new(self.registry.build()?, self.rules)
    }
}
