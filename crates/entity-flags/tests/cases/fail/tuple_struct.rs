// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::Flags;

#[derive(Flags)]
pub struct Account(i64);

fn main() {}
