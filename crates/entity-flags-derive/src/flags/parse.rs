// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsing and validation of `#[derive(Flags)]` input.
//!
//! # Module Structure
//!
//! | Module | Parses |
//! |--------|--------|
//! | `attrs` | `#[flags(width = ..)]` via darling |
//! | `field` | The packed field: `#[bits(..)]`, `#[label(..)]` |
//! | `cascade` | `#[cascade(..)]` rules |
//! | `def` | Assembles [`FlagsDef`] and checks it |
//!
//! All checks a runtime `FlagSet` would make are made here instead, with
//! errors pointing at the offending token.

mod attrs;
mod cascade;
mod def;
mod field;

pub use attrs::FlagsAttrs;
pub use cascade::{CascadeDef, parse_cascade};
pub use def::FlagsDef;
pub use field::{BitDef, PackedField};

#[cfg(test)]
mod tests;
