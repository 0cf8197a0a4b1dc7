// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::{Flagged, Flags};

#[derive(Flags, Debug, Clone, Default)]
pub struct Settings {
    #[bits(dark_mode = 0, compact = 14)]
    flags: i16
}

fn main() {
    let mut settings = Settings::default();
    settings.set_compact(true);
    settings.set_dark_mode(true);
    assert!(settings.is_compact());
    assert_eq!(settings.flag_bits(), (1 << 14) | 1);

    settings.set_compact(false);
    assert_eq!(settings.clone().flags, 1);
}
