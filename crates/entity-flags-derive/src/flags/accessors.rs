// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed per-flag accessors.
//!
//! # Generated Code
//!
//! For `#[bits(banned = 2)]` with `#[cascade(banned, clear(active))]`:
//!
//! ```rust,ignore
//! impl Account {
//!     pub const BANNED: Flag<'static> = Flag::new("banned", 2);
//!
//!     pub fn is_banned(&self) -> bool {
//!         Self::BANNED.is_set(i64::from(self.flags))
//!     }
//!
//!     pub fn set_banned(&mut self, on: bool) {
//!         let bits = i64::from(self.flags);
//!         let bits = Self::BANNED.write(bits, on);
//!         let bits = Self::ACTIVE.write(bits, false);
//!         self.flags = bits as i32;
//!     }
//! }
//! ```
//!
//! The cascade is inlined as constant writes, so setters are infallible and
//! behave exactly like `Flagged::change_flag`.

use convert_case::{Case, Casing};
use entity_flags_core::{Directive, registry::default_label};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use super::parse::{BitDef, FlagsDef};

/// Generate the inherent impl with constants, readers and setters.
pub fn generate(def: &FlagsDef) -> TokenStream {
    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();

    let items = def.field.bits.iter().map(|bit| flag_items(def, bit));

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#items)*
        }
    }
}

fn flag_items(def: &FlagsDef, bit: &BitDef) -> TokenStream {
    let vis = &def.vis;
    let field = &def.field.ident;
    let name = &bit.name;
    let index = bit.index;

    let konst = const_ident(name);
    let snake = name.to_case(Case::Snake);
    let is_fn = format_ident!("is_{}", snake);
    let set_fn = format_ident!("set_{}", snake);

    let label = def
        .label(name)
        .map_or_else(|| default_label(name), |label| label.value());
    let const_doc = format!("{label} (`{name}`, bit {index}).");
    let is_doc = format!("Whether `{name}` is set.");
    let set_doc = set_doc(def, name);

    let bits = format_ident!("bits");
    let narrowed = def.field.packed.narrow(&bits);
    let cascade = def.cascade(name).into_iter().flat_map(|rule| {
        rule.targets.iter().map(|target| {
            let target_const = const_ident(&target.name);
            let value = match target.directive {
                Directive::SetLiteral(value) => quote! { #value },
                Directive::SetFromSource => quote! { on },
                Directive::Clear => quote! { false },
                Directive::Invert => quote! { !on }
            };
            quote! { let #bits = Self::#target_const.write(#bits, #value); }
        })
    });

    quote! {
        #[doc = #const_doc]
        #vis const #konst: ::entity_flags::Flag<'static> =
            ::entity_flags::Flag::new(#name, #index);

        #[doc = #is_doc]
        #[must_use]
        #vis fn #is_fn(&self) -> bool {
            Self::#konst.is_set(i64::from(self.#field))
        }

        #[doc = #set_doc]
        #vis fn #set_fn(&mut self, on: bool) {
            let #bits = i64::from(self.#field);
            let #bits = Self::#konst.write(#bits, on);
            #(#cascade)*
            self.#field = #narrowed;
        }
    }
}

fn const_ident(name: &str) -> Ident {
    Ident::new(&name.to_case(Case::Snake).to_uppercase(), Span::call_site())
}

fn set_doc(def: &FlagsDef, name: &str) -> String {
    let Some(rule) = def.cascade(name) else {
        return format!("Write `{name}`.");
    };
    let targets: Vec<String> = rule
        .targets
        .iter()
        .map(|target| format!("`{}`", target.name))
        .collect();
    if targets.is_empty() {
        return format!("Write `{name}`.");
    }
    format!("Write `{name}`, then cascade to {}.", targets.join(", "))
}
