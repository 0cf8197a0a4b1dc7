// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Flags)]` implementation.
//!
//! ```text
//! DeriveInput
//!     │
//!     ▼
//! FlagsDef::from_derive_input     parse + validate, spanned errors
//!     │
//!     ├── flagged::generate       impl Flagged (shared FlagSet)
//!     └── accessors::generate     consts, is_*, set_*
//! ```

mod accessors;
mod flagged;
pub mod parse;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::FlagsDef;

/// Main entry point for the Flags derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match FlagsDef::from_derive_input(&input) {
        Ok(def) => generate(&def),
        Err(err) => err.write_errors().into()
    }
}

fn generate(def: &FlagsDef) -> TokenStream {
    let flagged = flagged::generate(def);
    let accessors = accessors::generate(def);

    let expanded = quote! {
        #flagged
        #accessors
    };

    expanded.into()
}
