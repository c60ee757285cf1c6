/// Codepoint assignment over real icon trees
///
/// Builds throwaway `icons/SVG`-style directories and checks the numbering
/// rules font consumers depend on: category order first, then file name,
/// consecutive from the base, and untouched by stray files.
use std::fs;
use std::path::Path;

use proptest::prelude::*;

use typicon_core::codepoints::{assign_codepoints, Assigner, CollisionPolicy, DEFAULT_BASE};
use typicon_core::TypiconError;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
}

fn entries(root: &Path) -> Vec<(String, u32)> {
    assign_codepoints(root)
        .expect("assign")
        .iter()
        .map(|(id, cp)| (id.to_string(), cp))
        .collect()
}

fn owned(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs.iter().map(|(id, cp)| (id.to_string(), *cp)).collect()
}

#[test]
fn brands_sort_before_regular() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "regular/user.svg");
    touch(root, "brands/google.svg");
    touch(root, "brands/apple.svg");

    assert_eq!(
        entries(root),
        owned(&[("apple", 61697), ("google", 61698), ("user", 61699)])
    );
}

#[test]
fn adding_icon_only_shifts_later_icons() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "brands/apple.svg");
    touch(root, "brands/google.svg");
    touch(root, "regular/user.svg");
    touch(root, "brands/zebra.svg");

    assert_eq!(
        entries(root),
        owned(&[
            ("apple", 61697),
            ("google", 61698),
            ("zebra", 61699),
            ("user", 61700)
        ])
    );
}

#[test]
fn stray_files_and_other_extensions_are_ignored() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "brands/apple.svg");
    touch(root, "brands/notes.txt");
    touch(root, "brands/upper.SVG");
    touch(root, "stray.svg");
    fs::write(root.join("README.md"), b"icons").unwrap();

    assert_eq!(entries(root), owned(&[("apple", DEFAULT_BASE)]));
}

#[test]
fn empty_root_gives_empty_map() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("solid")).unwrap();

    let map = assign_codepoints(temp.path()).expect("assign");
    assert!(map.is_empty());
}

#[test]
fn missing_root_is_not_found() {
    let err = assign_codepoints("/nonexistent/typicon-icons").expect_err("missing");
    assert!(matches!(err, TypiconError::RootNotFound(_)));
}

#[test]
fn duplicate_identifier_across_categories_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "regular/star.svg");
    touch(root, "solid/star.svg");

    let err = assign_codepoints(root).expect_err("duplicate");
    assert!(err.to_string().contains("regular/star.svg"));
    assert!(err.to_string().contains("solid/star.svg"));
}

#[test]
fn last_wins_policy_matches_flat_object_semantics() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "regular/star.svg");
    touch(root, "regular/user.svg");
    touch(root, "solid/star.svg");

    let assigner = Assigner {
        collisions: CollisionPolicy::LastWins,
        ..Assigner::default()
    };
    let map = assigner.assign(root).expect("assign");

    let pairs: Vec<(&str, u32)> = map.iter().collect();
    assert_eq!(pairs, vec![("star", 0xF103), ("user", 0xF102)]);
}

#[test]
fn custom_base_and_extension() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "line/a.icon");
    touch(root, "line/b.svg");

    let assigner = Assigner {
        base: 0xE000,
        extension: "icon".to_string(),
        ..Assigner::default()
    };
    let map = assigner.assign(root).expect("assign");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), Some(0xE000));
}

#[test]
fn category_names_compare_by_code_point() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    touch(root, "a-b/second.svg");
    touch(root, "a/first.svg");
    touch(root, "B/upper.svg");

    let ids: Vec<String> = entries(root).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["upper", "first", "second"]);
}

fn icon_tree() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_set(("[a-d]{1,2}", "[a-z]{1,4}"), 0..24).prop_map(|set| {
        // Identifiers must be unique across the whole tree.
        let mut seen = std::collections::HashSet::new();
        set.into_iter()
            .filter(|(_, file)| seen.insert(file.clone()))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn codepoints_are_ordered_and_contiguous(tree in icon_tree()) {
        let temp = tempfile::tempdir().expect("tempdir");
        for (category, file) in &tree {
            touch(temp.path(), &format!("{category}/{file}.svg"));
        }

        let first = assign_codepoints(temp.path()).expect("assign");
        let second = assign_codepoints(temp.path()).expect("assign again");
        prop_assert_eq!(&first, &second);

        let mut expected = tree.clone();
        expected.sort();
        prop_assert_eq!(first.len(), expected.len());

        for (offset, (_, file)) in expected.iter().enumerate() {
            prop_assert_eq!(first.get(file), Some(DEFAULT_BASE + offset as u32));
        }
    }

    #[test]
    fn appending_an_icon_keeps_earlier_codepoints(
        tree in icon_tree(),
        into_last_category in any::<bool>(),
    ) {
        let temp = tempfile::tempdir().expect("tempdir");
        for (category, file) in &tree {
            touch(temp.path(), &format!("{category}/{file}.svg"));
        }
        let before = assign_codepoints(temp.path()).expect("assign");

        // Existing files have at most four letters and categories use a-d,
        // so both choices sort after every existing icon.
        let category = match tree.iter().map(|(c, _)| c.clone()).max() {
            Some(last) if into_last_category => last,
            _ => "zz".to_string(),
        };
        touch(temp.path(), &format!("{category}/zzzzz.svg"));
        let after = assign_codepoints(temp.path()).expect("assign after addition");

        prop_assert_eq!(after.len(), before.len() + 1);
        for (identifier, codepoint) in before.iter() {
            prop_assert_eq!(after.get(identifier), Some(codepoint));
        }
        prop_assert_eq!(
            after.get("zzzzz"),
            Some(DEFAULT_BASE + before.len() as u32)
        );
    }
}
