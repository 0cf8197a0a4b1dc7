// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level `#[cascade(...)]` rules.
//!
//! # Syntax
//!
//! ```rust,ignore
//! #[cascade(banned, clear(active), set(hidden, verified = source), not(trusted))]
//! ```
//!
//! | Item | Directive |
//! |------|-----------|
//! | bare name | The source flag (exactly one) |
//! | `clear(a, ..)` | `Clear` |
//! | `set(a, ..)` | `SetLiteral(true)` |
//! | `set(a = true \| false)` | `SetLiteral(b)` |
//! | `set(a = source)` | `SetFromSource` |
//! | `not(a, ..)` | `Invert` |
//!
//! Groups may repeat and interleave; targets keep the order written.

use entity_flags_core::Directive;
use syn::{
    Attribute, Ident, LitBool, Token,
    ext::IdentExt,
    meta::ParseNestedMeta
};

/// One target of a cascade rule.
#[derive(Debug, Clone)]
pub struct TargetDef {
    /// Target as written.
    pub ident: Ident,

    /// Flag name.
    pub name: String,

    /// How the target value is derived.
    pub directive: Directive
}

/// One `#[cascade(...)]` attribute.
#[derive(Debug, Clone)]
pub struct CascadeDef {
    /// Source as written.
    pub source: Ident,

    /// Source flag name.
    pub name: String,

    /// Targets in declaration order.
    pub targets: Vec<TargetDef>
}

/// Parse one `#[cascade(...)]` attribute.
///
/// # Errors
///
/// Malformed arguments, a missing source or a second bare name.
pub fn parse_cascade(attr: &Attribute) -> syn::Result<CascadeDef> {
    let mut source: Option<Ident> = None;
    let mut targets = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.input.peek(syn::token::Paren) {
            let group = meta.path.require_ident()?.to_string();
            return match group.as_str() {
                "clear" => parse_names(&meta, Directive::Clear, &mut targets),
                "not" => parse_names(&meta, Directive::Invert, &mut targets),
                "set" => parse_set(&meta, &mut targets),
                _ => Err(meta.error("expected `clear(..)`, `set(..)` or `not(..)`"))
            };
        }

        let ident = meta.path.require_ident()?;
        if meta.input.peek(Token![=]) {
            return Err(meta.error("cascade source is a bare flag name"));
        }
        if source.is_some() {
            return Err(meta.error(
                "cascade source already given; wrap targets in `clear(..)`, `set(..)` or `not(..)`"
            ));
        }
        source = Some(ident.clone());
        Ok(())
    })?;

    let source = source
        .ok_or_else(|| syn::Error::new_spanned(attr, "cascade requires a source flag"))?;
    Ok(CascadeDef {
        name: source.unraw().to_string(),
        source,
        targets
    })
}

fn parse_names(
    meta: &ParseNestedMeta<'_>,
    directive: Directive,
    targets: &mut Vec<TargetDef>
) -> syn::Result<()> {
    meta.parse_nested_meta(|target| {
        if target.input.peek(Token![=]) {
            return Err(target.error("expected a flag name"));
        }
        targets.push(target_def(target.path.require_ident()?, directive));
        Ok(())
    })
}

fn parse_set(meta: &ParseNestedMeta<'_>, targets: &mut Vec<TargetDef>) -> syn::Result<()> {
    meta.parse_nested_meta(|target| {
        let ident = target.path.require_ident()?;
        let directive = if target.input.peek(Token![=]) {
            let value = target.value()?;
            if value.peek(LitBool) {
                Directive::SetLiteral(value.parse::<LitBool>()?.value)
            } else {
                let keyword: Ident = value.parse()?;
                if keyword != "source" {
                    return Err(syn::Error::new(
                        keyword.span(),
                        "expected `true`, `false` or `source`"
                    ));
                }
                Directive::SetFromSource
            }
        } else {
            Directive::SetLiteral(true)
        };
        targets.push(target_def(ident, directive));
        Ok(())
    })
}

fn target_def(ident: &Ident, directive: Directive) -> TargetDef {
    TargetDef {
        ident: ident.clone(),
        name: ident.unraw().to_string(),
        directive
    }
}
