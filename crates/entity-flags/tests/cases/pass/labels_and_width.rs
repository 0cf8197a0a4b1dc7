// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags::{FieldWidth, Flagged, Flags, ListForm};

#[derive(Flags)]
#[flags(width = "smallint")]
pub struct Post {
    #[bits(published = 0, email_sent = 1, featured = 14)]
    #[label(published = "Visible to readers")]
    pub flags: i64
}

fn main() {
    assert_eq!(Post::flag_set().width(), FieldWidth::SmallInt);

    let mut post = Post { flags: 0 };
    post.set_published(true);
    post.set_featured(true);

    let listed = post.flags_list(None, ListForm::State);
    let labels: Vec<&str> = listed.iter().map(|entry| entry.label).collect();
    assert_eq!(labels, ["Visible to readers", "Email Sent", "Featured"]);
    assert_eq!(post.flags, (1 << 14) | 1);
}
