// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Serializable flag configuration.
//!
//! Lets a flag set be declared in a configuration file instead of code.
//! The document is deserialized with any serde format and validated by
//! [`FlagSetConfig::build`], which applies the same checks as the builder.
//!
//! # Format
//!
//! ```json
//! {
//!   "width": "bigint",
//!   "flags": [
//!     { "name": "active", "bit": 0 },
//!     { "name": "verified", "bit": 1, "label": "Email verified" },
//!     { "name": "banned", "bit": 2 },
//!     { "name": "hidden", "bit": 3 }
//!   ],
//!   "cascades": [
//!     {
//!       "source": "banned",
//!       "then": [
//!         { "clear": ["active"] },
//!         { "set": ["hidden", { "name": "verified", "value": "source" }] },
//!         { "not": ["verified"] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `then` is an ordered list of directive groups; targets are written in
//! exactly that order. A `set` target is either a bare name (set to `true`)
//! or a `{ name, value }` pair where `value` is `true`, `false` or
//! `"source"`.

use serde::{Deserialize, Serialize};

use crate::{CascadeRule, CascadeTarget, Directive, FieldWidth, FlagError, FlagSet};

/// Complete flag configuration of one host type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSetConfig {
    /// Column width.
    #[serde(default)]
    pub width:    FieldWidth,
    /// Flags in declaration order.
    pub flags:    Vec<FlagConfig>,
    /// Cascade rules.
    #[serde(default)]
    pub cascades: Vec<CascadeConfig>
}

/// One flag declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagConfig {
    /// Flag name.
    pub name:  String,
    /// Bit index.
    pub bit:   u32,
    /// Label; derived from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>
}

/// One cascade rule declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Source flag.
    pub source: String,
    /// Directive groups in application order.
    pub then:   Vec<DirectiveGroup>
}

/// Targets sharing one directive kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveGroup {
    /// Set targets to `true`, a literal, or the source value.
    Set(Vec<SetTarget>),
    /// Clear targets.
    Clear(Vec<String>),
    /// Write the negated source value.
    Not(Vec<String>)
}

/// Target of a `set` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetTarget {
    /// Bare name, set to `true`.
    Name(String),
    /// Name with an explicit value.
    Pair {
        /// Target flag.
        name:  String,
        /// Value to write.
        value: SetValue
    }
}

/// Value of an explicit `set` target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetValue {
    /// Fixed value.
    Literal(bool),
    /// The `"source"` keyword.
    Keyword(SourceKeyword)
}

/// The `"source"` keyword: copy the new source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKeyword {
    /// Copy the new source value.
    #[serde(rename = "source")]
    Source
}

impl SetTarget {
    fn into_target(self) -> CascadeTarget {
        match self {
            Self::Name(name) => CascadeTarget::new(name, Directive::SetLiteral(true)),
            Self::Pair {
                name,
                value
            } => {
                let directive = match value {
                    SetValue::Literal(on) => Directive::SetLiteral(on),
                    SetValue::Keyword(SourceKeyword::Source) => Directive::SetFromSource
                };
                CascadeTarget::new(name, directive)
            }
        }
    }
}

impl CascadeConfig {
    /// Convert into a rule, keeping target order.
    pub fn to_rule(&self) -> CascadeRule {
        self.then
            .iter()
            .cloned()
            .flat_map(|group| -> Vec<CascadeTarget> {
                match group {
                    DirectiveGroup::Set(targets) => {
                        targets.into_iter().map(SetTarget::into_target).collect()
                    }
                    DirectiveGroup::Clear(names) => names
                        .into_iter()
                        .map(|name| CascadeTarget::new(name, Directive::Clear))
                        .collect(),
                    DirectiveGroup::Not(names) => names
                        .into_iter()
                        .map(|name| CascadeTarget::new(name, Directive::Invert))
                        .collect()
                }
            })
            .fold(CascadeRule::on(self.source.as_str()), CascadeRule::target)
    }
}

impl FlagSetConfig {
    /// Validate the configuration and build the flag set.
    ///
    /// # Errors
    ///
    /// Any configuration error of [`FlagSet::builder`] and
    /// [`FlagSet::new`].
    pub fn build(&self) -> Result<FlagSet, FlagError> {
        let builder = self.flags.iter().fold(FlagSet::builder(self.width), |builder, flag| {
            match &flag.label {
                Some(label) => builder.labeled(flag.name.as_str(), flag.bit, label.as_str()),
                None => builder.flag(flag.name.as_str(), flag.bit)
            }
        });
        self.cascades
            .iter()
            .map(CascadeConfig::to_rule)
            .fold(builder, |builder, rule| builder.rule(rule))
            .build()
    }
}
