// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::Flags;

#[derive(Flags)]
pub struct Account {
    pub id: u64,

    #[bits(active = 0, verified = 1, admin = 5)]
    pub flags: i64
}

fn main() {
    let mut account = Account { id: 7, flags: 0 };
    assert!(!account.is_active());

    account.set_active(true);
    account.set_admin(true);
    assert!(account.is_active());
    assert!(!account.is_verified());
    assert!(account.is_admin());
    assert_eq!(account.flags, 0b10_0001);

    account.set_active(false);
    assert_eq!(account.flags, 0b10_0000);

    assert_eq!(Account::ACTIVE.index(), 0);
    assert_eq!(Account::ADMIN.mask(), 32);
    assert_eq!(Account::VERIFIED.name(), "verified");
    assert_eq!(account.id, 7);
}
