// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::{Flagged, Flags};

#[derive(Flags)]
#[cascade(banned, clear(active), set(hidden), set(muted = source), not(trusted))]
#[cascade(archived, set(hidden = true, listed = false))]
pub struct Member {
    #[bits(active = 0, banned = 1, hidden = 2, muted = 3, trusted = 4, archived = 5, listed = 6)]
    pub flags: i32
}

fn main() {
    let mut member = Member { flags: 0 };
    member.set_active(true);
    member.set_trusted(true);
    member.set_banned(true);
    assert!(!member.is_active());
    assert!(member.is_hidden());
    assert!(member.is_muted());
    assert!(!member.is_trusted());

    member.set_banned(false);
    assert!(!member.is_muted());
    assert!(member.is_trusted());
    assert!(member.is_hidden());

    let mut by_name = Member { flags: 0 };
    by_name.set_flag("active", true).unwrap();
    by_name.set_flag("trusted", true).unwrap();
    by_name.change_flag("banned", true).unwrap();

    let mut typed = Member { flags: 0 };
    typed.set_active(true);
    typed.set_trusted(true);
    typed.set_banned(true);
    assert_eq!(by_name.flags, typed.flags);

    member.set_listed(true);
    member.set_archived(true);
    assert!(!member.is_listed());
}
