// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error type for flag operations.
//!
//! Every error is a caller or configuration error: none of them is
//! transient, so nothing in this crate retries on [`FlagError`]. Operations
//! that fail leave the packed value exactly as it was.
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | `UnknownFlag` | lookups, cascades, predicates | Name not in the registry |
//! | `InvalidIndex` | bit operations, registry build | Index outside field width |
//! | `ConflictingPredicate` | predicate build | Name required both set and unset |
//! | `DuplicateFlag` | registry build | Same name registered twice |
//! | `DuplicateIndex` | registry build | Two names share one bit |
//! | `DuplicateRule` | flag set build | Two rules for one source |
//! | `InvalidValue` | mass assignment | Raw input is not a boolean |

use thiserror::Error;

/// Errors produced by the flag registry, cascade engine and predicate
/// builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// The flag name is not registered.
    #[error("unknown flag `{name}`")]
    UnknownFlag {
        /// Requested flag name.
        name: String
    },

    /// A bit index does not fit the field width.
    #[error("bit index {index} is out of range (max {max})")]
    InvalidIndex {
        /// Offending index.
        index: u32,
        /// Largest index the field accepts.
        max:   u32
    },

    /// A flag was requested both set and unset in one predicate.
    #[error("flag `{name}` is required to be both set and unset")]
    ConflictingPredicate {
        /// Flag named on both sides.
        name: String
    },

    /// A flag name was registered twice.
    #[error("flag `{name}` is registered more than once")]
    DuplicateFlag {
        /// Repeated flag name.
        name: String
    },

    /// Two flags were mapped to the same bit.
    #[error("bit {index} is shared by `{first}` and `{second}`")]
    DuplicateIndex {
        /// Shared index.
        index:  u32,
        /// Flag registered first.
        first:  String,
        /// Flag registered second.
        second: String
    },

    /// Two cascade rules were declared for the same source flag.
    #[error("cascade rule for `{flag}` is declared more than once")]
    DuplicateRule {
        /// Source flag name.
        flag: String
    },

    /// Raw input could not be read as a boolean.
    #[error("value `{value}` for flag `{name}` is not a boolean")]
    InvalidValue {
        /// Flag being assigned.
        name:  String,
        /// Raw input.
        value: String
    }
}

impl FlagError {
    /// Build an [`FlagError::UnknownFlag`] from any name.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownFlag {
            name: name.into()
        }
    }

    /// Check if this is an unknown flag error.
    pub const fn is_unknown_flag(&self) -> bool {
        matches!(self, Self::UnknownFlag { .. })
    }

    /// Check if this is an out-of-range index error.
    pub const fn is_invalid_index(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }

    /// Check if this is a contradictory predicate error.
    pub const fn is_conflicting_predicate(&self) -> bool {
        matches!(self, Self::ConflictingPredicate { .. })
    }

    /// Check if this error comes from configuration rather than use.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidIndex { .. }
                | Self::DuplicateFlag { .. }
                | Self::DuplicateIndex { .. }
                | Self::DuplicateRule { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_flag() {
        let err = FlagError::unknown("banned");
        assert_eq!(err.to_string(), "unknown flag `banned`");
    }

    #[test]
    fn display_invalid_index() {
        let err = FlagError::InvalidIndex {
            index: 70,
            max:   62
        };
        assert_eq!(err.to_string(), "bit index 70 is out of range (max 62)");
    }

    #[test]
    fn display_duplicate_index() {
        let err = FlagError::DuplicateIndex {
            index:  3,
            first:  "a".into(),
            second: "b".into()
        };
        assert!(err.to_string().contains("bit 3"));
        assert!(err.to_string().contains("`a`"));
        assert!(err.to_string().contains("`b`"));
    }

    #[test]
    fn kind_predicates() {
        assert!(FlagError::unknown("x").is_unknown_flag());
        assert!(
            FlagError::ConflictingPredicate {
                name: "x".into()
            }
            .is_conflicting_predicate()
        );
        assert!(
            FlagError::InvalidIndex {
                index: 64,
                max:   62
            }
            .is_invalid_index()
        );
    }

    #[test]
    fn configuration_errors() {
        assert!(
            FlagError::DuplicateFlag {
                name: "a".into()
            }
            .is_configuration()
        );
        assert!(
            FlagError::DuplicateRule {
                flag: "a".into()
            }
            .is_configuration()
        );
        assert!(!FlagError::unknown("a").is_configuration());
        assert!(
            !FlagError::InvalidValue {
                name:  "a".into(),
                value: "maybe".into()
            }
            .is_configuration()
        );
    }
}
