// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Complete, validated `#[derive(Flags)]` definition.
//!
//! # Checks
//!
//! | Check | Error span |
//! |-------|------------|
//! | Struct with named fields | struct name |
//! | Exactly one `#[bits]` field | struct name / second field |
//! | Explicit width fits the field type | `width` value |
//! | Index within the column width | index literal |
//! | Unique flag names | repeated name |
//! | Unique bit indices | repeated index |
//! | Distinct generated accessor names | colliding name |
//! | Accessors do not shadow `Flagged` | flag name |
//! | Labels name known flags, once | label key |
//! | Cascade names are known flags | source / target |
//! | One cascade per source | repeated source |

use std::collections::{HashMap, HashSet};

use convert_case::{Case, Casing};
use darling::FromDeriveInput;
use entity_flags_core::FieldWidth;
use syn::{DeriveInput, Generics, Ident, LitStr, Visibility};

use super::{BitDef, CascadeDef, FlagsAttrs, PackedField, parse_cascade};

/// Accessor stems whose `set_*` would shadow `Flagged::set_flag` or
/// `Flagged::set_flag_bits`.
const RESERVED: &[&str] = &["flag", "flag_bits"];

/// Everything needed to generate code for one host struct.
#[derive(Debug)]
pub struct FlagsDef {
    /// Struct name.
    pub ident: Ident,

    /// Struct visibility.
    pub vis: Visibility,

    /// Struct generics.
    pub generics: Generics,

    /// Column width.
    pub width: FieldWidth,

    /// The packed field.
    pub field: PackedField,

    /// Cascade rules in declaration order.
    pub cascades: Vec<CascadeDef>
}

impl FlagsDef {
    /// Parse and validate derive input.
    ///
    /// Errors are accumulated so one compile reports every problem.
    ///
    /// # Errors
    ///
    /// Any failed check from the module table.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = FlagsAttrs::from_derive_input(input)?;

        let fields = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => &named.named,
                _ => {
                    return Err(darling::Error::custom("Flags requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(darling::Error::custom("Flags can only be derived for structs")
                    .with_span(&input.ident));
            }
        };

        let mut errors = darling::Error::accumulator();

        let mut packed: Option<PackedField> = None;
        for field in fields {
            let Some(parsed) = errors.handle(PackedField::from_field(field)).flatten() else {
                continue;
            };
            if packed.is_some() {
                errors.push(
                    darling::Error::custom("only one field may carry #[bits(...)]")
                        .with_span(&parsed.ident)
                );
            } else {
                packed = Some(parsed);
            }
        }

        let cascades: Vec<CascadeDef> = input
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cascade"))
            .filter_map(|attr| errors.handle(parse_cascade(attr).map_err(darling::Error::from)))
            .collect();

        let Some(field) = packed else {
            let mut pending = errors.into_inner();
            if pending.is_empty() {
                pending.push(
                    darling::Error::custom("Flags requires one field with #[bits(...)]")
                        .with_span(&input.ident)
                );
            }
            return Err(darling::Error::multiple(pending));
        };

        let width = match &attrs.width {
            Some(explicit) => {
                let fits = field.packed.width();
                if explicit.0.max_index() > fits.max_index() {
                    errors.push(darling::Error::from(syn::Error::new(
                        explicit.span(),
                        format!(
                            "a {} column does not fit field type `{}`",
                            explicit.0,
                            field.packed.as_str()
                        )
                    )));
                }
                explicit.0
            }
            None => field.packed.width()
        };

        let def = Self {
            ident: attrs.ident,
            vis: attrs.vis,
            generics: attrs.generics,
            width,
            field,
            cascades
        };
        def.check_bits(&mut errors);
        def.check_labels(&mut errors);
        def.check_cascades(&mut errors);

        errors.finish_with(def)
    }

    /// Flag declared as `name`.
    pub fn bit(&self, name: &str) -> Option<&BitDef> {
        self.field.bits.iter().find(|bit| bit.name == name)
    }

    /// Explicit label of `name`.
    pub fn label(&self, name: &str) -> Option<&LitStr> {
        self.field
            .labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| &label.text)
    }

    /// Cascade rule whose source is `name`.
    pub fn cascade(&self, name: &str) -> Option<&CascadeDef> {
        self.cascades.iter().find(|rule| rule.name == name)
    }

    fn check_bits(&self, errors: &mut darling::error::Accumulator) {
        let mut names: HashMap<&str, &BitDef> = HashMap::new();
        let mut indices: HashMap<u32, &BitDef> = HashMap::new();
        let mut accessors: HashMap<String, &BitDef> = HashMap::new();

        for bit in &self.field.bits {
            if !self.width.admits(bit.index) {
                errors.push(
                    darling::Error::custom(format!(
                        "bit index {} is out of range for a {} column (0..={})",
                        bit.index,
                        self.width,
                        self.width.max_index()
                    ))
                    .with_span(&bit.lit)
                );
            }

            if names.contains_key(bit.name.as_str()) {
                errors.push(
                    darling::Error::custom(format!("duplicate flag `{}`", bit.name))
                        .with_span(&bit.ident)
                );
                continue;
            }
            names.insert(&bit.name, bit);

            if let Some(first) = indices.get(&bit.index) {
                errors.push(
                    darling::Error::custom(format!(
                        "bit {} is already used by `{}`",
                        bit.index, first.name
                    ))
                    .with_span(&bit.lit)
                );
            } else {
                indices.insert(bit.index, bit);
            }

            let accessor = bit.name.to_case(Case::Snake);
            if RESERVED.contains(&accessor.as_str()) {
                errors.push(
                    darling::Error::custom(format!(
                        "flag `{}` would shadow a `Flagged` method",
                        bit.name
                    ))
                    .with_span(&bit.ident)
                );
            } else if let Some(first) = accessors.get(&accessor) {
                errors.push(
                    darling::Error::custom(format!(
                        "flag `{}` generates the same accessors as `{}`",
                        bit.name, first.name
                    ))
                    .with_span(&bit.ident)
                );
            } else {
                accessors.insert(accessor, bit);
            }
        }
    }

    fn check_labels(&self, errors: &mut darling::error::Accumulator) {
        let mut seen: HashSet<&str> = HashSet::new();
        for label in &self.field.labels {
            if self.bit(&label.name).is_none() {
                errors.push(unknown_flag(&label.ident, &label.name));
            } else if !seen.insert(&label.name) {
                errors.push(
                    darling::Error::custom(format!("duplicate label for `{}`", label.name))
                        .with_span(&label.ident)
                );
            }
        }
    }

    fn check_cascades(&self, errors: &mut darling::error::Accumulator) {
        let mut sources: HashSet<&str> = HashSet::new();
        for rule in &self.cascades {
            if self.bit(&rule.name).is_none() {
                errors.push(unknown_flag(&rule.source, &rule.name));
            } else if !sources.insert(&rule.name) {
                errors.push(
                    darling::Error::custom(format!("duplicate cascade for `{}`", rule.name))
                        .with_span(&rule.source)
                );
            }
            for target in &rule.targets {
                if self.bit(&target.name).is_none() {
                    errors.push(unknown_flag(&target.ident, &target.name));
                }
            }
        }
    }
}

fn unknown_flag(ident: &Ident, name: &str) -> darling::Error {
    darling::Error::custom(format!("unknown flag `{name}`")).with_span(ident)
}
