#![allow(clippy::unwrap_used)]

use fsreview_core::path::{clean, normalize};
use proptest::prelude::*;

#[test]
fn test_directory_and_file_forms() {
    assert_eq!(normalize("/etc", true), "/etc/");
    assert_eq!(normalize("/etc/", false), "/etc");
    assert_eq!(normalize("/etc//", true), "/etc/");
    assert_eq!(normalize("/", true), "/");
    assert_eq!(normalize("/", false), "/");
}

#[test]
fn test_dot_segments_resolved() {
    assert_eq!(normalize("/usr/./lib/../bin/ls", false), "/usr/bin/ls");
    assert_eq!(normalize("/../../etc", false), "/etc");
    assert_eq!(clean("a/../../b"), "../b");
    assert_eq!(clean(""), ".");
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["", ".", "..", "etc", "usr", "bin", "a.b", "x y"]),
        0..8,
    )
    .prop_flat_map(|parts| {
        prop::bool::ANY.prop_map(move |rooted| {
            let joined = parts.join("/");
            if rooted {
                format!("/{}", joined)
            } else {
                joined
            }
        })
    })
}

proptest! {
    #[test]
    fn prop_normalize_idempotent(p in path_strategy(), is_dir in any::<bool>()) {
        let once = normalize(&p, is_dir);
        prop_assert_eq!(normalize(&once, is_dir), once);
    }

    #[test]
    fn prop_trailing_separator_iff_dir(p in path_strategy(), is_dir in any::<bool>()) {
        let n = normalize(&p, is_dir);
        if n != "/" {
            prop_assert_eq!(n.ends_with('/'), is_dir);
        }
        prop_assert!(!n.contains("//"));
    }
}
