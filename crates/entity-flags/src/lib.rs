// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # entity-flags
//!
//! One crate, all features. Re-exports:
//! - [`Flags`] derive macro from `entity-flags-derive`
//! - All types from `entity-flags-core` ([`FlagSet`], [`Flagged`],
//!   [`FlagFilter`], [`FlagStore`], [`Pagination`])
//!
//! # Quick Start
//!
//! ```rust
//! use entity_flags::{FlagFilter, Flagged, Flags};
//!
//! #[derive(Flags)]
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
//!
//! // Same operations by name, e.g. for form input.
//! account.change_flag("banned", false)?;
//! assert!(!account.has_flag("banned")?);
//!
//! // Masks for `WHERE (flags & $1) = $1 AND (flags & $2) = 0`.
//! let predicate = Account::flag_predicate(&FlagFilter::new().set("hidden").unset("banned"))?;
//! assert_eq!(predicate.true_mask(), 0b1000);
//! assert_eq!(predicate.false_mask(), 0b0100);
//! # Ok::<(), entity_flags::FlagError>(())
//! ```

pub use entity_flags_core::*;
pub use entity_flags_derive::Flags;
