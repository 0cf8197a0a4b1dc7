// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The packed field and its `#[bits(...)]` / `#[label(...)]` attributes.
//!
//! ```rust,ignore
//! #[bits(active = 0, verified = 1, r#type = 4)]
//! #[label(verified = "Email verified")]
//! pub flags: i32,
//! ```
//!
//! Flag names are the attribute keys with any `r#` prefix removed.

use entity_flags_core::FieldWidth;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Field, Ident, LitInt, LitStr, Type, ext::IdentExt};

/// Integer type of the packed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedType {
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64
}

impl PackedType {
    /// Recognize `i16`, `i32` or `i64`, with or without a path prefix.
    pub fn from_type(ty: &Type) -> Option<Self> {
        let Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let segment = type_path.path.segments.last()?;
        if !segment.arguments.is_none() {
            return None;
        }
        match segment.ident.to_string().as_str() {
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            _ => None
        }
    }

    /// Widest column the type can hold.
    pub const fn width(&self) -> FieldWidth {
        match self {
            Self::I16 => FieldWidth::SmallInt,
            Self::I32 => FieldWidth::Integer,
            Self::I64 => FieldWidth::BigInt
        }
    }

    /// Rust type name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64"
        }
    }

    /// Expression converting the `i64` `bits` back into this type.
    ///
    /// Flag writes never touch bits above the column width, so the
    /// narrowing cast keeps every bit the field had.
    pub fn narrow(&self, bits: &Ident) -> TokenStream {
        match self {
            Self::I16 => quote! { #bits as i16 },
            Self::I32 => quote! { #bits as i32 },
            Self::I64 => quote! { #bits }
        }
    }
}

/// One `name = index` entry of `#[bits(...)]`.
#[derive(Debug, Clone)]
pub struct BitDef {
    /// Key as written.
    pub ident: Ident,

    /// Flag name.
    pub name: String,

    /// Bit index.
    pub index: u32,

    /// Index literal, for error spans.
    pub lit: LitInt
}

/// One `name = "Text"` entry of `#[label(...)]`.
#[derive(Debug, Clone)]
pub struct LabelDef {
    /// Key as written.
    pub ident: Ident,

    /// Flag name.
    pub name: String,

    /// Label text.
    pub text: LitStr
}

/// The field holding the packed value.
#[derive(Debug, Clone)]
pub struct PackedField {
    /// Field name.
    pub ident: Ident,

    /// Recognized integer type.
    pub packed: PackedType,

    /// Flags in declaration order.
    pub bits: Vec<BitDef>,

    /// Explicit labels.
    pub labels: Vec<LabelDef>
}

impl PackedField {
    /// Parse `field` if it carries `#[bits(...)]`.
    ///
    /// # Returns
    ///
    /// `None` for ordinary fields.
    ///
    /// # Errors
    ///
    /// - `#[label]` without `#[bits]` on the same field
    /// - malformed attribute arguments
    /// - a field type other than `i16`, `i32` or `i64`
    pub fn from_field(field: &Field) -> darling::Result<Option<Self>> {
        let mut errors = darling::Error::accumulator();
        let mut bits: Option<Vec<BitDef>> = None;
        let mut labels = Vec::new();

        for attr in &field.attrs {
            if attr.path().is_ident("bits") {
                let parsed = parse_bits(attr).map_err(darling::Error::from);
                if let Some(parsed) = errors.handle(parsed) {
                    bits.get_or_insert_with(Vec::new).extend(parsed);
                }
            } else if attr.path().is_ident("label") {
                let parsed = parse_labels(attr).map_err(darling::Error::from);
                if let Some(parsed) = errors.handle(parsed) {
                    labels.extend(parsed);
                }
            }
        }

        let Some(bits) = bits else {
            if let Some(label) = labels.first() {
                errors.push(
                    darling::Error::custom("#[label] requires #[bits(...)] on the same field")
                        .with_span(&label.ident)
                );
            }
            return errors.finish_with(None);
        };

        let Some(ident) = field.ident.clone() else {
            errors.push(darling::Error::custom("packed flag field must be named").with_span(field));
            return errors.finish_with(None);
        };

        let Some(packed) = PackedType::from_type(&field.ty) else {
            errors.push(
                darling::Error::custom("packed flag field must be `i16`, `i32` or `i64`")
                    .with_span(&field.ty)
            );
            return errors.finish_with(None);
        };

        errors.finish_with(Some(Self {
            ident,
            packed,
            bits,
            labels
        }))
    }
}

fn parse_bits(attr: &Attribute) -> syn::Result<Vec<BitDef>> {
    let mut bits = Vec::new();
    attr.parse_nested_meta(|meta| {
        let ident = meta.path.require_ident()?.clone();
        let lit: LitInt = meta.value()?.parse()?;
        let index = lit.base10_parse::<u32>()?;
        bits.push(BitDef {
            name: ident.unraw().to_string(),
            ident,
            index,
            lit
        });
        Ok(())
    })?;
    Ok(bits)
}

fn parse_labels(attr: &Attribute) -> syn::Result<Vec<LabelDef>> {
    let mut labels = Vec::new();
    attr.parse_nested_meta(|meta| {
        let ident = meta.path.require_ident()?.clone();
        let text: LitStr = meta.value()?.parse()?;
        labels.push(LabelDef {
            name: ident.unraw().to_string(),
            ident,
            text
        });
        Ok(())
    })?;
    Ok(labels)
}
