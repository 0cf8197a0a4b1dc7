// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Flagged` implementation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::entity_flags::Flagged for Account {
//!     fn flag_set() -> &'static ::entity_flags::FlagSet {
//!         static SET: OnceLock<FlagSet> = OnceLock::new();
//!         SET.get_or_init(|| {
//!             FlagSet::builder(FieldWidth::Integer)
//!                 .flag("active", 0)
//!                 .labeled("verified", 1, "Email verified")
//!                 .rule(CascadeRule::on("banned").clear("active"))
//!                 .build()
//!                 .unwrap_or_else(|err| unreachable!(..))
//!         })
//!     }
//!
//!     fn flag_bits(&self) -> i64 { i64::from(self.flags) }
//!
//!     fn set_flag_bits(&mut self, bits: i64) { self.flags = bits as i32; }
//! }
//! ```
//!
//! The builder cannot fail: the parser already ran every check it makes.

use entity_flags_core::{Directive, FieldWidth};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{CascadeDef, FlagsDef};

/// Generate `impl Flagged` for the host struct.
pub fn generate(def: &FlagsDef) -> TokenStream {
    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();
    let field = &def.field.ident;
    let bits = format_ident!("bits");
    let narrowed = def.field.packed.narrow(&bits);

    let width = width_tokens(def.width);
    let flags = def.field.bits.iter().map(|bit| {
        let name = &bit.name;
        let index = bit.index;
        match def.label(name) {
            Some(label) => quote! { .labeled(#name, #index, #label) },
            None => quote! { .flag(#name, #index) }
        }
    });
    let rules = def.cascades.iter().map(rule_tokens);

    quote! {
        impl #impl_generics ::entity_flags::Flagged for #ident #ty_generics #where_clause {
            fn flag_set() -> &'static ::entity_flags::FlagSet {
                static SET: ::std::sync::OnceLock<::entity_flags::FlagSet> =
                    ::std::sync::OnceLock::new();
                SET.get_or_init(|| {
                    ::entity_flags::FlagSet::builder(#width)
                        #(#flags)*
                        #(#rules)*
                        .build()
                        .unwrap_or_else(|err| {
                            ::core::unreachable!("flag configuration checked at compile time: {}", err)
                        })
                })
            }

            fn flag_bits(&self) -> i64 {
                i64::from(self.#field)
            }

            fn set_flag_bits(&mut self, #bits: i64) {
                self.#field = #narrowed;
            }
        }
    }
}

fn width_tokens(width: FieldWidth) -> TokenStream {
    match width {
        FieldWidth::SmallInt => quote! { ::entity_flags::FieldWidth::SmallInt },
        FieldWidth::Integer => quote! { ::entity_flags::FieldWidth::Integer },
        FieldWidth::BigInt => quote! { ::entity_flags::FieldWidth::BigInt }
    }
}

fn rule_tokens(rule: &CascadeDef) -> TokenStream {
    let source = &rule.name;
    let targets = rule.targets.iter().map(|target| {
        let name = &target.name;
        match target.directive {
            Directive::SetLiteral(true) => quote! { .set(#name) },
            Directive::SetLiteral(value) => quote! { .set_to(#name, #value) },
            Directive::SetFromSource => quote! { .follow(#name) },
            Directive::Clear => quote! { .clear(#name) },
            Directive::Invert => quote! { .invert(#name) }
        }
    });

    quote! {
        .rule(::entity_flags::CascadeRule::on(#source) #(#targets)*)
    }
}
