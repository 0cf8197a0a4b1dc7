// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_flags_core::{Directive, FieldWidth};
use syn::DeriveInput;

use super::FlagsDef;

fn parse(input: DeriveInput) -> darling::Result<FlagsDef> {
    FlagsDef::from_derive_input(&input)
}

fn message(input: DeriveInput) -> String {
    let err = parse(input).unwrap_err();
    err.into_iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n")
}

#[test]
fn valid_definition() {
    let def = parse(syn::parse_quote! {
        #[cascade(banned, clear(active), set(hidden, verified = source))]
        pub struct Account {
            pub id: u64,
            #[bits(active = 0, verified = 1, hidden = 2, banned = 3)]
            #[label(verified = "Email verified")]
            pub flags: i32,
        }
    })
    .unwrap();

    assert_eq!(def.ident, "Account");
    assert_eq!(def.width, FieldWidth::Integer);
    assert_eq!(def.field.ident, "flags");
    assert_eq!(def.field.bits.len(), 4);
    assert_eq!(def.bit("hidden").map(|b| b.index), Some(2));
    assert!(def.bit("missing").is_none());
    assert_eq!(def.label("verified").map(|l| l.value()), Some("Email verified".to_owned()));
    assert!(def.label("active").is_none());

    let rule = def.cascade("banned").unwrap();
    let targets: Vec<(&str, Directive)> = rule
        .targets
        .iter()
        .map(|t| (t.name.as_str(), t.directive))
        .collect();
    assert_eq!(
        targets,
        [
            ("active", Directive::Clear),
            ("hidden", Directive::SetLiteral(true)),
            ("verified", Directive::SetFromSource)
        ]
    );
    assert!(def.cascade("active").is_none());
}

#[test]
fn width_follows_field_type() {
    let def = parse(syn::parse_quote! {
        struct Small {
            #[bits(a = 14)]
            flags: i16,
        }
    })
    .unwrap();
    assert_eq!(def.width, FieldWidth::SmallInt);

    let def = parse(syn::parse_quote! {
        struct Big {
            #[bits(a = 62)]
            flags: i64,
        }
    })
    .unwrap();
    assert_eq!(def.width, FieldWidth::BigInt);
}

#[test]
fn narrower_explicit_width() {
    let def = parse(syn::parse_quote! {
        #[flags(width = "smallint")]
        struct Narrow {
            #[bits(a = 3)]
            flags: i64,
        }
    })
    .unwrap();
    assert_eq!(def.width, FieldWidth::SmallInt);
}

#[test]
fn explicit_width_too_wide() {
    let msg = message(syn::parse_quote! {
        #[flags(width = "bigint")]
        struct Wide {
            #[bits(a = 0)]
            flags: i32,
        }
    });
    assert!(msg.contains("a bigint column does not fit field type `i32`"), "{msg}");
}

#[test]
fn index_out_of_range() {
    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 15)]
            flags: i16,
        }
    });
    assert!(msg.contains("bit index 15 is out of range for a smallint column (0..=14)"), "{msg}");

    let msg = message(syn::parse_quote! {
        #[flags(width = "integer")]
        struct Account {
            #[bits(a = 31)]
            flags: i64,
        }
    });
    assert!(msg.contains("(0..=30)"), "{msg}");

    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 63)]
            flags: i64,
        }
    });
    assert!(msg.contains("bit index 63"), "{msg}");
}

#[test]
fn duplicate_name() {
    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 0, a = 1)]
            flags: i64,
        }
    });
    assert!(msg.contains("duplicate flag `a`"), "{msg}");
}

#[test]
fn duplicate_index() {
    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 2)]
            #[bits(b = 2)]
            flags: i64,
        }
    });
    assert!(msg.contains("bit 2 is already used by `a`"), "{msg}");
}

#[test]
fn colliding_accessors() {
    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(isAdmin = 0, is_admin = 1)]
            flags: i64,
        }
    });
    assert!(msg.contains("flag `is_admin` generates the same accessors as `isAdmin`"), "{msg}");
}

#[test]
fn label_checks() {
    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 0)]
            #[label(b = "B")]
            flags: i64,
        }
    });
    assert!(msg.contains("unknown flag `b`"), "{msg}");

    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 0)]
            #[label(a = "A", a = "Again")]
            flags: i64,
        }
    });
    assert!(msg.contains("duplicate label for `a`"), "{msg}");
}

#[test]
fn cascade_checks() {
    let msg = message(syn::parse_quote! {
        #[cascade(ghost, clear(a))]
        struct Account {
            #[bits(a = 0)]
            flags: i64,
        }
    });
    assert!(msg.contains("unknown flag `ghost`"), "{msg}");

    let msg = message(syn::parse_quote! {
        #[cascade(a, not(ghost))]
        struct Account {
            #[bits(a = 0)]
            flags: i64,
        }
    });
    assert!(msg.contains("unknown flag `ghost`"), "{msg}");

    let msg = message(syn::parse_quote! {
        #[cascade(a, clear(b))]
        #[cascade(a, set(b))]
        struct Account {
            #[bits(a = 0, b = 1)]
            flags: i64,
        }
    });
    assert!(msg.contains("duplicate cascade for `a`"), "{msg}");
}

#[test]
fn errors_accumulate() {
    let err = parse(syn::parse_quote! {
        #[cascade(ghost)]
        struct Account {
            #[bits(a = 0, b = 0)]
            #[label(c = "C")]
            flags: i64,
        }
    })
    .unwrap_err();
    assert_eq!(err.len(), 3);
}

#[test]
fn packed_field_count() {
    let msg = message(syn::parse_quote! {
        struct Account {
            id: u64,
        }
    });
    assert!(msg.contains("Flags requires one field with #[bits(...)]"), "{msg}");

    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(a = 0)]
            first: i64,
            #[bits(b = 1)]
            second: i64,
        }
    });
    assert!(msg.contains("only one field may carry #[bits(...)]"), "{msg}");
}

#[test]
fn struct_shape() {
    let msg = message(syn::parse_quote! {
        enum Account {
            A
        }
    });
    assert!(msg.contains("Flags can only be derived for structs"), "{msg}");

    let msg = message(syn::parse_quote! {
        struct Account(#[bits(a = 0)] i64);
    });
    assert!(msg.contains("Flags requires named fields"), "{msg}");
}

#[test]
fn reserved_accessor_names() {
    let msg = message(syn::parse_quote! {
        struct Account {
            #[bits(flag = 0)]
            flags: i64,
        }
    });
    assert!(msg.contains("flag `flag` would shadow a `Flagged` method"), "{msg}");
}
