// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derive macro for bit-packed entity flags.
//!
//! Use the `entity-flags` crate, which re-exports this macro together with
//! the runtime types it generates code against.
//!
//! # Attributes
//!
//! | Attribute | Position | Purpose |
//! |-----------|----------|---------|
//! | `#[flags(width = "integer")]` | struct | Column width (optional) |
//! | `#[cascade(source, ..)]` | struct | Cascade rule, one per source |
//! | `#[bits(name = index, ..)]` | field | Marks the packed field, declares flags |
//! | `#[label(name = "Text", ..)]` | field | Human-readable labels |
//!
//! # Example
//!
//! ```rust,ignore
//! use entity_flags::Flags;
//!
//! #[derive(Flags)]
//! #[flags(width = "integer")]
//! #[cascade(banned, clear(active), set(hidden))]
//! pub struct Account {
//!     pub id: u64,
//!
//!     #[bits(active = 0, verified = 1, banned = 2, hidden = 3)]
//!     #[label(verified = "Email verified")]
//!     pub flags: i32,
//! }
//!
//! let mut account = Account { id: 1, flags: 0 };
//! account.set_active(true);
//! account.set_banned(true);
//! assert!(!account.is_active());
//! assert!(account.is_hidden());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod flags;

use proc_macro::TokenStream;

/// Derive named flag access for a struct with one packed integer field.
///
/// # Generated Code
///
/// | Item | Description |
/// |------|-------------|
/// | `impl Flagged` | Shared `FlagSet`, packed value access |
/// | `const ACTIVE: Flag<'static>` | One constant per flag |
/// | `fn is_active(&self) -> bool` | Read one flag |
/// | `fn set_active(&mut self, on: bool)` | Write one flag and its cascade |
///
/// Every name, bit index and cascade target is checked at compile time,
/// so the generated accessors cannot fail.
///
/// # Struct Attributes
///
/// - `#[flags(width = "smallint" | "integer" | "bigint")]`: column width.
///   Defaults to the width of the field type (`i16`, `i32`, `i64`) and may
///   not exceed it.
/// - `#[cascade(source, clear(a, ..), set(b, c = true, d = false, e = source),
///   not(f, ..))]`: targets written when `source` changes, in the order
///   given. A bare name in `set` means `true`; `source` copies the new value;
///   `not` writes its negation.
///
/// # Field Attributes
///
/// - `#[bits(name = index, ..)]`: marks the packed field and declares its
///   flags. Exactly one field must carry it.
/// - `#[label(name = "Text", ..)]`: labels; unlabeled flags get a title-cased
///   name.
#[proc_macro_derive(Flags, attributes(flags, cascade, bits, label))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    flags::derive(input)
}
