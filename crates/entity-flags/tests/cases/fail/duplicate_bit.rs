// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::Flags;

#[derive(Flags)]
pub struct Account {
    #[bits(active = 0, hidden = 0)]
    pub flags: i64
}

fn main() {}
