// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level `#[flags(...)]` attribute.

use std::str::FromStr;

use darling::{FromDeriveInput, FromMeta, util::SpannedValue};
use entity_flags_core::FieldWidth;
use syn::{Generics, Ident, Visibility};

/// Column width given as `width = "..."`.
///
/// Accepts every spelling [`FieldWidth`] parses: `"smallint"`, `"int2"`,
/// `"integer"`, `"int"`, `"int4"`, `"bigint"`, `"int8"` and the Rust
/// integer names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthArg(pub FieldWidth);

impl FromMeta for WidthArg {
    fn from_string(value: &str) -> darling::Result<Self> {
        FieldWidth::from_str(value)
            .map(Self)
            .map_err(|_| darling::Error::unknown_value(value))
    }
}

/// Options from `#[flags(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(flags))]
pub struct FlagsAttrs {
    /// Struct name.
    pub ident: Ident,

    /// Struct visibility, reused for generated items.
    pub vis: Visibility,

    /// Struct generics.
    pub generics: Generics,

    /// Explicit column width.
    #[darling(default)]
    pub width: Option<SpannedValue<WidthArg>>
}
