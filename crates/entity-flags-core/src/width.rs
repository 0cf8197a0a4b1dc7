// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage width of the packed flag column.
//!
//! The width is a deployment decision: it is declared once per host type and
//! must never be narrowed without migrating stored values. Each width only
//! admits the indices that keep the stored value non-negative in the
//! matching signed PostgreSQL column.
//!
//! | Width | Column type | Indices |
//! |-------|-------------|---------|
//! | `SmallInt` | `SMALLINT` / `int2` | `0..=14` |
//! | `Integer` | `INTEGER` / `int4` | `0..=30` |
//! | `BigInt` | `BIGINT` / `int8` | `0..=62` |

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Width of the integer column that stores the packed flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum FieldWidth {
    /// 16-bit signed column.
    SmallInt,

    /// 32-bit signed column.
    Integer,

    /// 64-bit signed column.
    #[default]
    BigInt
}

impl FieldWidth {
    /// Largest bit index that can hold a flag.
    pub const fn max_index(&self) -> u32 {
        match self {
            Self::SmallInt => 14,
            Self::Integer => 30,
            Self::BigInt => 62
        }
    }

    /// Number of addressable flag bits.
    pub const fn capacity(&self) -> u32 {
        self.max_index() + 1
    }

    /// Check whether `index` fits this width.
    pub const fn admits(&self, index: u32) -> bool {
        index <= self.max_index()
    }

    /// SQL column type.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT"
        }
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SmallInt => "smallint",
            Self::Integer => "integer",
            Self::BigInt => "bigint"
        })
    }
}

/// Unrecognized column width name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field width `{0}`, expected smallint, integer or bigint")]
pub struct ParseWidthError(pub String);

impl FromStr for FieldWidth {
    type Err = ParseWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smallint" | "int2" | "i16" => Ok(Self::SmallInt),
            "integer" | "int" | "int4" | "i32" => Ok(Self::Integer),
            "bigint" | "int8" | "i64" => Ok(Self::BigInt),
            _ => Err(ParseWidthError(s.to_string()))
        }
    }
}

impl TryFrom<String> for FieldWidth {
    type Error = ParseWidthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldWidth> for String {
    fn from(value: FieldWidth) -> Self {
        value.to_string()
    }
}
