// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::Flags;

#[derive(Flags)]
#[cascade(banned, clear(active, ghost))]
pub struct Account {
    #[bits(active = 0, banned = 1)]
    pub flags: i64
}

fn main() {}
