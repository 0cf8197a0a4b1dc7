// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cascade rules: derived side-effects between flags.
//!
//! A [`CascadeRule`] binds one source flag to an ordered list of
//! [`CascadeTarget`]s. When the source is written through the cascading path,
//! every target is written once, in declaration order, through the direct
//! path. Targets never trigger their own rules: the cascade is a single hop.
//!
//! ```text
//! apply_change(value, "banned", true)
//! │
//! ├── write banned = true                    (source)
//! └── rule for "banned"
//!     ├── Clear          active   → false    (direct write)
//!     ├── Invert         verified → false    (direct write)
//!     └── SetFromSource  hidden   → true     (direct write)
//! ```
//!
//! # Directives
//!
//! | Directive | Target value |
//! |-----------|--------------|
//! | `SetLiteral(b)` | `b` |
//! | `SetFromSource` | new source value |
//! | `Clear` | `false` |
//! | `Invert` | `!source` |
//!
//! # Example
//!
//! ```rust
//! use entity_flags_core::{CascadeRule, FieldWidth, FlagSet};
//!
//! let flags = FlagSet::builder(FieldWidth::BigInt)
//!     .flag("active", 0)
//!     .flag("banned", 1)
//!     .flag("hidden", 2)
//!     .rule(CascadeRule::on("banned").clear("active").follow("hidden"))
//!     .build()?;
//!
//! let value = flags.apply_change(0b001, "banned", true)?;
//! assert_eq!(value, 0b110);
//! # Ok::<(), entity_flags_core::FlagError>(())
//! ```

use std::collections::HashMap;

use crate::{FlagError, FlagRegistry};

/// How a target flag is written when its source changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Write a fixed value.
    SetLiteral(bool),

    /// Copy the new value of the source flag.
    SetFromSource,

    /// Write `false`.
    Clear,

    /// Write the negation of the new source value.
    Invert
}

impl Directive {
    /// Target value for a given new source value.
    pub const fn resolve(&self, source_value: bool) -> bool {
        match self {
            Self::SetLiteral(value) => *value,
            Self::SetFromSource => source_value,
            Self::Clear => false,
            Self::Invert => !source_value
        }
    }
}

/// A target flag paired with the directive that computes its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CascadeTarget {
    /// Target flag name.
    pub name:      String,
    /// How the target value is derived.
    pub directive: Directive
}

impl CascadeTarget {
    /// Target with an explicit directive.
    pub fn new(name: impl Into<String>, directive: Directive) -> Self {
        Self {
            name: name.into(),
            directive
        }
    }

    /// Target value for a given new source value.
    pub const fn resolve(&self, source_value: bool) -> bool {
        self.directive.resolve(source_value)
    }
}

/// A bare name is shorthand for setting the target to `true`.
impl From<&str> for CascadeTarget {
    fn from(name: &str) -> Self {
        Self::new(name, Directive::SetLiteral(true))
    }
}

impl From<(&str, bool)> for CascadeTarget {
    fn from((name, value): (&str, bool)) -> Self {
        Self::new(name, Directive::SetLiteral(value))
    }
}

/// Side-effects attached to one source flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRule {
    source:  String,
    targets: Vec<CascadeTarget>
}

impl CascadeRule {
    /// Start a rule for `source`.
    pub fn on(source: impl Into<String>) -> Self {
        Self {
            source:  source.into(),
            targets: Vec::new()
        }
    }

    /// Source flag name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Targets in declaration order.
    pub fn targets(&self) -> &[CascadeTarget] {
        &self.targets
    }

    /// Append any target.
    #[must_use]
    pub fn target(mut self, target: impl Into<CascadeTarget>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Set `name` to `true`.
    #[must_use]
    pub fn set(self, name: &str) -> Self {
        self.target(CascadeTarget::new(name, Directive::SetLiteral(true)))
    }

    /// Set `name` to `value`.
    #[must_use]
    pub fn set_to(self, name: &str, value: bool) -> Self {
        self.target(CascadeTarget::new(name, Directive::SetLiteral(value)))
    }

    /// Copy the source value into `name`.
    #[must_use]
    pub fn follow(self, name: &str) -> Self {
        self.target(CascadeTarget::new(name, Directive::SetFromSource))
    }

    /// Clear `name`.
    #[must_use]
    pub fn clear(self, name: &str) -> Self {
        self.target(CascadeTarget::new(name, Directive::Clear))
    }

    /// Write the negated source value into `name`.
    #[must_use]
    pub fn invert(self, name: &str) -> Self {
        self.target(CascadeTarget::new(name, Directive::Invert))
    }
}

/// All cascade rules of a host type, keyed by source flag.
#[derive(Debug, Clone, Default)]
pub struct CascadeRules {
    rules:     Vec<CascadeRule>,
    by_source: HashMap<String, usize>
}

impl CascadeRules {
    /// Collect rules, rejecting a second rule for the same source.
    ///
    /// # Errors
    ///
    /// [`FlagError::DuplicateRule`] on a repeated source.
    pub fn new(rules: impl IntoIterator<Item = CascadeRule>) -> Result<Self, FlagError> {
        let mut out = Self::default();
        for rule in rules {
            if out.by_source.contains_key(&rule.source) {
                return Err(FlagError::DuplicateRule {
                    flag: rule.source
                });
            }
            out.by_source.insert(rule.source.clone(), out.rules.len());
            out.rules.push(rule);
        }
        Ok(out)
    }

    /// Rule for `source`, if one is declared.
    pub fn get(&self, source: &str) -> Option<&CascadeRule> {
        self.by_source.get(source).map(|&pos| &self.rules[pos])
    }

    /// All rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CascadeRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether no rule is declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check that every source and target is registered.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] for the first unregistered name.
    pub fn validate(&self, registry: &FlagRegistry) -> Result<(), FlagError> {
        for rule in &self.rules {
            registry.index_of(&rule.source)?;
            for target in &rule.targets {
                registry.index_of(&target.name)?;
            }
        }
        Ok(())
    }
}

/// One resolved write performed by a cascade application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagWrite<'a> {
    /// Flag name.
    pub name:  &'a str,
    /// Bit position.
    pub index: u32,
    /// Value written.
    pub value: bool
}

impl FlagWrite<'_> {
    /// Apply this write to `bits`, leaving other bits untouched.
    pub const fn apply(&self, bits: i64) -> i64 {
        let mask = 1_i64 << self.index;
        if self.value {
            bits | mask
        } else if bits & mask != 0 {
            bits ^ mask
        } else {
            bits
        }
    }
}

/// Resolves flag changes into ordered writes.
///
/// The engine only ever produces direct writes for targets; it never looks
/// up a target's own rule, which is what keeps cascades single-hop.
#[derive(Debug, Clone, Copy)]
pub struct CascadeEngine<'a> {
    registry: &'a FlagRegistry,
    rules:    &'a CascadeRules
}

impl<'a> CascadeEngine<'a> {
    /// Engine over a registry and its rules.
    pub const fn new(registry: &'a FlagRegistry, rules: &'a CascadeRules) -> Self {
        Self {
            registry,
            rules
        }
    }

    /// Ordered writes for changing `source` to `source_value`.
    ///
    /// The source write comes first, followed by each target of the source's
    /// rule in declaration order.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`] when the source or any target is not
    /// registered.
    pub fn plan(&self, source: &str, source_value: bool) -> Result<Vec<FlagWrite<'a>>, FlagError> {
        let def = self.registry.get(source)?;
        let mut writes = vec![FlagWrite {
            name:  def.name(),
            index: def.index(),
            value: source_value
        }];

        if let Some(rule) = self.rules.get(source) {
            writes.reserve(rule.targets().len());
            for target in rule.targets() {
                let def = self.registry.get(&target.name)?;
                writes.push(FlagWrite {
                    name:  def.name(),
                    index: def.index(),
                    value: target.resolve(source_value)
                });
            }
        }

        Ok(writes)
    }

    /// Apply a change and its cascade to `value`.
    ///
    /// All writes are resolved before any is applied, so an error leaves
    /// nothing half-written.
    ///
    /// # Errors
    ///
    /// Same as [`plan`](Self::plan).
    pub fn apply(&self, value: i64, source: &str, source_value: bool) -> Result<i64, FlagError> {
        let writes = self.plan(source, source_value)?;
        Ok(writes.iter().fold(value, |bits, write| write.apply(bits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldWidth;

    fn abc() -> FlagRegistry {
        FlagRegistry::builder(FieldWidth::BigInt)
            .flag("a", 0)
            .flag("b", 1)
            .flag("c", 2)
            .build()
            .unwrap()
    }

    fn rule_set(list: Vec<CascadeRule>) -> CascadeRules {
        CascadeRules::new(list).unwrap()
    }

    #[test]
    fn directive_resolution() {
        assert!(Directive::SetLiteral(true).resolve(false));
        assert!(!Directive::SetLiteral(false).resolve(true));
        assert!(Directive::SetFromSource.resolve(true));
        assert!(!Directive::SetFromSource.resolve(false));
        assert!(!Directive::Clear.resolve(true));
        assert!(!Directive::Invert.resolve(true));
        assert!(Directive::Invert.resolve(false));
    }

    #[test]
    fn bare_name_means_set_true() {
        let target = CascadeTarget::from("b");
        assert_eq!(target.directive, Directive::SetLiteral(true));
        let target = CascadeTarget::from(("b", false));
        assert_eq!(target.directive, Directive::SetLiteral(false));
    }

    #[test]
    fn no_rule_writes_source_only() {
        let reg = abc();
        let rules = CascadeRules::default();
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(2, "a", true).unwrap(), 3);
        assert_eq!(engine.plan("a", true).unwrap().len(), 1);
    }

    #[test]
    fn clear_already_clear_is_noop() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").clear("c")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(3, "a", true).unwrap(), 3);
    }

    #[test]
    fn follow_source() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").follow("b")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(0, "a", true).unwrap(), 3);
        assert_eq!(engine.apply(3, "a", false).unwrap(), 0);
    }

    #[test]
    fn invert_source() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").invert("b")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(2, "a", true).unwrap(), 1);
        assert_eq!(engine.apply(1, "a", false).unwrap(), 2);
    }

    #[test]
    fn later_targets_win_on_overlap() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").set("b").clear("b")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(0, "a", true).unwrap(), 1);

        let rules = rule_set(vec![CascadeRule::on("a").clear("b").set("b")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(0, "a", true).unwrap(), 3);
    }

    #[test]
    fn cascade_is_single_hop() {
        let reg = abc();
        let rules = rule_set(vec![
            CascadeRule::on("a").set("b"),
            CascadeRule::on("b").set("c"),
        ]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(0, "a", true).unwrap(), 3);
    }

    #[test]
    fn rule_may_target_its_source() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").invert("a")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(0, "a", true).unwrap(), 0);
        assert_eq!(engine.apply(0, "a", false).unwrap(), 1);
    }

    #[test]
    fn unknown_target_fails_whole_change() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").set("b").set("ghost")]);
        let engine = CascadeEngine::new(&reg, &rules);
        assert_eq!(engine.apply(0, "a", true).unwrap_err(), FlagError::unknown("ghost"));
        assert!(rules.validate(&reg).unwrap_err().is_unknown_flag());
    }

    #[test]
    fn unknown_source_fails() {
        let reg = abc();
        let rules = CascadeRules::default();
        let engine = CascadeEngine::new(&reg, &rules);
        assert!(engine.apply(0, "ghost", true).unwrap_err().is_unknown_flag());
    }

    #[test]
    fn duplicate_rule_rejected() {
        let err = CascadeRules::new(vec![CascadeRule::on("a").set("b"), CascadeRule::on("a")])
            .unwrap_err();
        assert_eq!(
            err,
            FlagError::DuplicateRule {
                flag: "a".into()
            }
        );
    }

    #[test]
    fn plan_lists_writes_in_order() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("c").clear("a").follow("b")]);
        let engine = CascadeEngine::new(&reg, &rules);
        let plan = engine.plan("c", true).unwrap();
        let summary: Vec<(&str, bool)> = plan.iter().map(|w| (w.name, w.value)).collect();
        assert_eq!(summary, [("c", true), ("a", false), ("b", true)]);
    }

    #[test]
    fn preserves_unregistered_bits() {
        let reg = abc();
        let rules = rule_set(vec![CascadeRule::on("a").clear("b")]);
        let engine = CascadeEngine::new(&reg, &rules);
        let high = 1_i64 << 40;
        assert_eq!(engine.apply(high | 2, "a", true).unwrap(), high | 1);
    }
}
