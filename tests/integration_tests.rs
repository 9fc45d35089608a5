//! Integration tests for the editor label tables
//!
//! These tests go through the public API only: the built-in Ukrainian table,
//! tables assembled from definition files, and coverage checks between them.

use editor_locale::i18n::{
    loader, CoverageValidator, KeyPath, LocaleCode, LocaleRegistry, LocaleTable, ResourceNode,
    ResourceNotFound, ResourceTree,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const UK_SCRIPT_EXCERPT: &str = "\u{feff}/*\nCopyright (c) 2003-2016, CKSource - Frederico Knabben. All rights reserved.\nFor licensing, see LICENSE.md or http://ckeditor.com/license\n*/\nCKEDITOR.lang['uk']={\"undo\":{\"redo\":\"Повторити\",\"undo\":\"Повернути\"},\"common\":{\"targetNew\":\"Нове вікно (_blank)\",\"notSet\":\"<не визначено>\"}};";

// ==================== Built-in Ukrainian Labels ====================

#[test]
fn test_builtin_table_merge_cells() {
    assert_eq!(
        LocaleTable::builtin().get("uk", "table.cell.merge"),
        Ok("Об'єднати комірки")
    );
}

#[test]
fn test_builtin_table_target_new_window() {
    assert_eq!(
        LocaleTable::builtin().get("uk", "common.targetNew"),
        Ok("Нове вікно (_blank)")
    );
}

#[test]
fn test_builtin_paste_message_keeps_markup() {
    let label = LocaleTable::builtin()
        .get("uk", "clipboard.pasteMsg")
        .expect("pasteMsg should exist");
    assert!(label.contains("<STRONG>Ctrl/Cmd+V</STRONG>"));
    assert!(!label.contains("&lt;"));
}

#[test]
fn test_builtin_placeholders_pass_through() {
    let table = LocaleTable::builtin();
    assert_eq!(table.get("uk", "button.selectedLabel"), Ok("%1 (Вибрано)"));
    assert_eq!(table.get("uk", "elementspath.eleTitle"), Ok("%1 елемент"));
    assert_eq!(
        table.get("uk", "about.copy"),
        Ok("Copyright &copy; $1. Всі права застережено.")
    );
    assert_eq!(
        table.get("uk", "common.unavailable"),
        Ok("%1<span class=\"cke_accessibility\">, не доступне</span>")
    );
}

#[test]
fn test_builtin_escaped_quotes_unescaped_once() {
    let label = LocaleTable::builtin()
        .get("uk", "common.invalidInlineStyle")
        .unwrap();
    assert!(label.contains("\"ім'я : значення\""));
}

#[test]
fn test_builtin_top_level_labels() {
    let table = LocaleTable::builtin();
    assert_eq!(table.get("uk", "editor"), Ok("Текстовий редактор"));
    assert_eq!(table.get("uk", "editorPanel"), Ok("Панель текстового редактора"));
}

#[test]
fn test_builtin_group_is_not_a_label() {
    let table = LocaleTable::builtin();
    assert!(matches!(
        table.get("uk", "table.cell"),
        Err(ResourceNotFound::Path { .. })
    ));
    assert!(matches!(
        table.get("uk", "toolbar.toolbarGroups"),
        Err(ResourceNotFound::Path { .. })
    ));
}

#[test]
fn test_builtin_missing_label_is_not_empty_string() {
    let result = LocaleTable::builtin().get("uk", "table.cell.notALabel");
    assert!(result.is_err());
    assert_ne!(result, Ok(""));
}

#[test]
fn test_builtin_unknown_locale() {
    assert_eq!(
        LocaleTable::builtin().get("fr", "table.cell.merge"),
        Err(ResourceNotFound::Locale("fr".to_string()))
    );
}

#[test]
fn test_builtin_every_label_resolves_to_itself() {
    let table = LocaleTable::builtin();
    let tree = table.tree("uk").unwrap();
    assert!(tree.leaf_count() > 200);

    for (path, label) in tree.leaves() {
        assert_eq!(table.get("uk", &path.to_string()), Ok(label), "path {path}");
    }
}

#[test]
fn test_builtin_matches_fresh_load() {
    let fresh = LocaleTable::from_registry(LocaleRegistry::get()).unwrap();
    assert_eq!(&fresh, LocaleTable::builtin());
}

// ==================== Injection Into a Host ====================

/// Stand-in for an editor component that receives its labels from the host.
struct TableDialog<'a> {
    labels: editor_locale::Localizer<'a>,
}

impl TableDialog<'_> {
    fn title(&self) -> &str {
        self.labels.get_or("table.title", "Table Properties")
    }

    fn split_label(&self) -> &str {
        self.labels.get_or("table.cell.splitDiagonal", "Split Diagonally")
    }
}

#[test]
fn test_localizer_injected_into_component() {
    let dialog = TableDialog {
        labels: LocaleTable::builtin().localizer("uk").unwrap(),
    };
    assert_eq!(dialog.title(), "Властивості таблиці");
    assert_eq!(dialog.split_label(), "Split Diagonally");
}

// ==================== Definition Files ====================

#[test]
fn test_table_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("uk.js"), UK_SCRIPT_EXCERPT).unwrap();
    std::fs::write(
        dir.path().join("en.json"),
        r#"{"en": {"undo": {"redo": "Redo", "undo": "Undo"}, "common": {"targetNew": "New Window (_blank)"}}}"#,
    )
    .unwrap();

    let table = LocaleTable::builder().add_dir(dir.path()).unwrap().build();

    assert_eq!(table.get("uk", "undo.redo"), Ok("Повторити"));
    assert_eq!(table.get("uk", "common.notSet"), Ok("<не визначено>"));
    assert_eq!(table.get("en", "common.targetNew"), Ok("New Window (_blank)"));
    assert_eq!(
        table.get_with_fallback(&["uk", "en"], "common.notSet"),
        Ok("<не визначено>")
    );
    assert!(table.get("en", "common.notSet").is_err());
}

#[test]
fn test_directory_locale_clashing_with_builtin() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("uk.js"), UK_SCRIPT_EXCERPT).unwrap();

    let result = LocaleTable::builder()
        .add_definition(LocaleRegistry::get().get_by_code("uk").unwrap().definition)
        .unwrap()
        .add_dir(dir.path());
    assert!(result.is_err());
}

#[test]
fn test_loading_twice_is_value_equal() {
    let first = LocaleTable::builder().add_script(UK_SCRIPT_EXCERPT).unwrap().build();
    let second = LocaleTable::builder().add_script(UK_SCRIPT_EXCERPT).unwrap().build();
    assert_eq!(first, second);
}

#[test]
fn test_excerpt_matches_builtin_labels() {
    let (_, excerpt) = loader::parse_script(UK_SCRIPT_EXCERPT).unwrap();
    let report = CoverageValidator::validate(LocaleTable::builtin().tree("uk").unwrap(), &excerpt);

    // The excerpt only carries a few labels, so coverage warnings are expected
    // but the shapes must agree.
    assert!(!report.has_errors());
    assert!(report.warnings.iter().all(|w| w.starts_with("Missing label")));
    for (path, label) in excerpt.leaves() {
        assert_eq!(LocaleTable::builtin().get("uk", &path.to_string()), Ok(label));
    }
}

#[test]
fn test_builtin_matches_vendored_script() {
    const FIXTURE: &str = include_str!("fixtures/uk.js");

    let (code, tree) = loader::parse_script(FIXTURE).unwrap();
    let builtin = LocaleTable::builtin().tree("uk").unwrap();

    assert_eq!(code.as_str(), "uk");
    assert_eq!(&tree, builtin);
    assert!(CoverageValidator::validate(builtin, &tree).is_clean());
}

// ==================== Round-trip Fidelity ====================

fn arb_tree() -> impl Strategy<Value = ResourceTree> {
    let leaf = any::<String>().prop_map(ResourceNode::Leaf);
    let node = leaf.prop_recursive(3, 32, 6, |inner| {
        proptest::collection::btree_map("[a-zA-Z_]{1,10}", inner, 0..6)
            .prop_map(|nodes| ResourceNode::branch(nodes))
    });
    proptest::collection::btree_map("[a-zA-Z_.\\[\\]'\"]{1,10}", node, 1..8)
        .prop_map(|nodes: BTreeMap<String, ResourceNode>| nodes.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_every_defined_label_round_trips(tree in arb_tree()) {
        let definition = serde_json::to_string(&BTreeMap::from([("xx", &tree)])).unwrap();
        let table = LocaleTable::builder().add_definition(&definition).unwrap().build();

        for (path, label) in tree.leaves() {
            prop_assert_eq!(table.get("xx", &path.to_string()), Ok(label));
            prop_assert_eq!(
                table.get_path(&"xx".parse::<LocaleCode>().unwrap(), &path),
                Ok(label)
            );
        }
        prop_assert_eq!(table.tree("xx").unwrap(), &tree);
    }

    #[test]
    fn prop_absent_paths_are_not_found(tree in arb_tree(), probe in "[a-z]{11,16}") {
        let table = LocaleTable::builder()
            .add_tree("xx".parse::<LocaleCode>().unwrap(), tree)
            .unwrap()
            .build();
        // Generated keys are at most 10 characters long
        let path = KeyPath::parse(&probe).unwrap();
        prop_assert!(table.get("xx", &path.to_string()).is_err());
    }
}
