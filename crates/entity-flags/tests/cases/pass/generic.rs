// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::marker::PhantomData;

use entity_flags::{Flagged, Flags};

#[derive(Flags)]
pub struct Tagged<T>
where
    T: Clone
{
    pub value: T,

    #[bits(seen = 0, pinned = 1)]
    pub flags: i32,

    marker: PhantomData<T>
}

fn main() {
    let mut tagged = Tagged { value: "note", flags: 0, marker: PhantomData };
    tagged.set_pinned(true);
    assert!(tagged.is_pinned());
    assert!(tagged.has_flag("pinned").unwrap());
    assert!(Tagged::<u8>::flag_set().registry().contains("seen"));
    assert_eq!(tagged.value, "note");
}
