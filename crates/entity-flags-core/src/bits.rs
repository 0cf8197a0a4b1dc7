// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Bit operations on the packed flag value.
//!
//! Packed values are `i64` so they bind directly to a `BIGINT` column. Only
//! indices `0..=62` are addressable; bit 63 is the sign bit and is never
//! assigned a flag.
//!
//! Two layers:
//!
//! - free functions ([`test_bit`], [`set_bit`], [`clear_bit`]) check the
//!   index on every call and return [`FlagError::InvalidIndex`]
//! - [`Flag`] is a named handle whose index was checked once at
//!   construction, so its operations are infallible
//!
//! ```rust
//! use entity_flags_core::bits::Flag;
//!
//! const ACTIVE: Flag<'static> = Flag::new("active", 0);
//! const BANNED: Flag<'static> = Flag::new("banned", 2);
//!
//! let bits = ACTIVE.set(0);
//! assert!(ACTIVE.is_set(bits));
//! assert!(!BANNED.is_set(bits));
//! assert_eq!(BANNED.set(bits), 0b101);
//! ```

use crate::FlagError;

/// Largest bit index that can hold a flag.
pub const MAX_INDEX: u32 = i64::BITS - 2;

fn check(index: u32) -> Result<(), FlagError> {
    if index > MAX_INDEX {
        return Err(FlagError::InvalidIndex {
            index,
            max: MAX_INDEX
        });
    }
    Ok(())
}

/// Single-bit mask for `index`.
///
/// # Errors
///
/// [`FlagError::InvalidIndex`] when `index > MAX_INDEX`.
pub fn bit_mask(index: u32) -> Result<i64, FlagError> {
    check(index)?;
    Ok(1_i64 << index)
}

/// Check whether bit `index` of `value` is 1.
///
/// # Errors
///
/// [`FlagError::InvalidIndex`] when `index > MAX_INDEX`.
pub fn test_bit(value: i64, index: u32) -> Result<bool, FlagError> {
    Ok(value & bit_mask(index)? != 0)
}

/// Return `value` with bit `index` set.
///
/// # Errors
///
/// [`FlagError::InvalidIndex`] when `index > MAX_INDEX`.
pub fn set_bit(value: i64, index: u32) -> Result<i64, FlagError> {
    Ok(value | bit_mask(index)?)
}

/// Return `value` with bit `index` cleared.
///
/// # Errors
///
/// [`FlagError::InvalidIndex`] when `index > MAX_INDEX`.
pub fn clear_bit(value: i64, index: u32) -> Result<i64, FlagError> {
    Ok(value & !bit_mask(index)?)
}

/// A named flag bound to a checked bit index.
///
/// Obtained from [`FlagRegistry::flag`](crate::FlagRegistry::flag), which
/// borrows the name from the registry, or built as a `Flag<'static>`
/// constant by generated code. Construction in a `const` context with
/// an index above [`MAX_INDEX`] fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flag<'a> {
    name:  &'a str,
    index: u32
}

impl<'a> Flag<'a> {
    /// Create a flag handle.
    ///
    /// # Panics
    ///
    /// Panics if `index > MAX_INDEX`. In a `const` item this is a compile
    /// error instead.
    pub const fn new(name: &'a str, index: u32) -> Self {
        assert!(index <= MAX_INDEX, "flag bit index exceeds the signed 64-bit range");
        Self {
            name,
            index
        }
    }

    /// Flag name.
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Bit position.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Single-bit mask for this flag.
    pub const fn mask(&self) -> i64 {
        1_i64 << self.index
    }

    /// Check whether the flag is set in `value`.
    pub const fn is_set(&self, value: i64) -> bool {
        value & self.mask() != 0
    }

    /// Return `value` with the flag set.
    pub const fn set(&self, value: i64) -> i64 {
        value | self.mask()
    }

    /// Return `value` with the flag cleared.
    ///
    /// Unchanged bit-for-bit when the flag is already clear.
    pub const fn clear(&self, value: i64) -> i64 {
        if self.is_set(value) {
            value ^ self.mask()
        } else {
            value
        }
    }

    /// Return `value` with the flag set to `on`.
    pub const fn write(&self, value: i64, on: bool) -> i64 {
        if on { self.set(value) } else { self.clear(value) }
    }
}
