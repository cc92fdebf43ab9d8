//! Integration tests for TreeStore queries and mutations.

use rstest::{fixture, rstest};

use treestore::util::testing;
use treestore::{DomainError, Item, ItemId, TreeItem, TreeStore};

fn ids(items: &[&Item]) -> Vec<ItemId> {
    items.iter().map(|item| item.id().clone()).collect()
}

fn id(raw: impl Into<ItemId>) -> ItemId {
    raw.into()
}

/// Mixed integer and text ids:
///
/// ```text
/// 1
/// ├── 3
/// └── 91064cee
///     ├── 4
///     │   ├── 7
///     │   └── 8
///     ├── 5
///     └── 6
/// ```
#[fixture]
fn mixed() -> TreeStore {
    testing::init_test_setup();
    TreeStore::new(vec![
        Item::root(1, "Item 1"),
        Item::child("91064cee", 1, "Item 2"),
        Item::child(3, 1, "Item 3"),
        Item::child(4, "91064cee", "Item 4"),
        Item::child(5, "91064cee", "Item 5"),
        Item::child(6, "91064cee", "Item 6"),
        Item::child(7, 4, "Item 7"),
        Item::child(8, 4, "Item 8"),
    ])
}

/// 1 -> 2 -> 3 -> 4
#[fixture]
fn chain() -> TreeStore {
    testing::init_test_setup();
    TreeStore::new(vec![
        Item::root(1, "Root"),
        Item::child(2, 1, "Child 1"),
        Item::child(3, 2, "Child 2"),
        Item::child(4, 3, "Child 3"),
    ])
}

// ============================================================
// Queries
// ============================================================

#[rstest]
fn given_mixed_ids_when_querying_then_answers_match_structure(mixed: TreeStore) {
    // Act / Assert
    assert_eq!(mixed.all().len(), 8);

    let root = mixed.get(&id(1)).expect("root present");
    assert_eq!(root.label, "Item 1");
    assert_eq!(root.parent, None);

    let children = ids(&mixed.children(&id(1)));
    assert_eq!(children.len(), 2);
    assert!(children.contains(&id("91064cee")));
    assert!(children.contains(&id(3)));

    assert_eq!(mixed.all_children(&id(1)).len(), 7);
    assert_eq!(mixed.all_children(&id("91064cee")).len(), 5);

    assert_eq!(
        ids(&mixed.all_parents(&id(7))),
        vec![id(4), id("91064cee"), id(1)]
    );
}

#[rstest]
fn given_store_when_listing_all_then_keeps_input_order() {
    // Arrange
    let store = TreeStore::new(vec![
        Item::child(2, 1, "Child"),
        Item::root(1, "Root"),
        Item::child("z", 1, "Other"),
    ]);

    // Act
    let all = ids(&store.all());

    // Assert
    assert_eq!(all, vec![id(2), id(1), id("z")]);
}

#[rstest]
#[case(id(1), Some("Item 1"))]
#[case(id("91064cee"), Some("Item 2"))]
#[case(id(999), None)]
#[case(id("1"), None)]
fn given_id_when_getting_then_returns_item_or_none(
    mixed: TreeStore,
    #[case] lookup: ItemId,
    #[case] label: Option<&str>,
) {
    // Act
    let found = mixed.get(&lookup);

    // Assert
    assert_eq!(found.map(|item| item.label.as_str()), label);
}

#[rstest]
#[case(1, vec![id(3), id("91064cee")])]
#[case(4, vec![id(7), id(8)])]
#[case(8, vec![])]
#[case(999, vec![])]
fn given_id_when_listing_children_then_returns_direct_children_only(
    mixed: TreeStore,
    #[case] raw: i32,
    #[case] expected: Vec<ItemId>,
) {
    assert_eq!(ids(&mixed.children(&id(raw))), expected);
}

#[rstest]
fn given_nested_tree_when_listing_descendants_then_walks_depth_first(mixed: TreeStore) {
    // Act
    let all = ids(&mixed.all_children(&id(1)));

    // Assert
    assert_eq!(
        all,
        vec![id(3), id("91064cee"), id(4), id(7), id(8), id(5), id(6)]
    );
    assert!(mixed.all_children(&id(7)).is_empty());
    assert!(mixed.all_children(&id(999)).is_empty());
}

#[rstest]
fn given_two_branches_when_listing_parents_then_nearest_comes_first() {
    // Arrange
    let store = TreeStore::new(vec![
        Item::root(1, "Root"),
        Item::child(2, 1, "Level 1 - A"),
        Item::child(3, 2, "Level 2 - A"),
        Item::child(4, 3, "Level 3 - A"),
        Item::child(5, 4, "Level 4 - A"),
        Item::child(6, 1, "Level 1 - B"),
        Item::child(7, 6, "Level 2 - B"),
    ]);

    // Assert
    assert_eq!(ids(&store.all_parents(&id(5))), vec![id(4), id(3), id(2), id(1)]);
    assert_eq!(ids(&store.all_parents(&id(3))), vec![id(2), id(1)]);
    assert_eq!(ids(&store.all_parents(&id(7))), vec![id(6), id(1)]);
    assert!(store.all_parents(&id(1)).is_empty());
    assert!(store.all_parents(&id(999)).is_empty());
}

#[rstest]
fn given_parent_outside_store_when_listing_parents_then_stops_there() {
    // Arrange
    let store = TreeStore::new(vec![
        Item::child(1, 404, "Orphan"),
        Item::child(2, 1, "Child"),
    ]);

    // Assert
    assert_eq!(ids(&store.all_parents(&id(2))), vec![id(1)]);
    assert_eq!(ids(&store.roots()), vec![id(1)]);
}

#[rstest]
fn given_nested_item_when_computing_path_then_runs_root_to_self(mixed: TreeStore) {
    assert_eq!(mixed.path(&id(7)), vec![id(1), id("91064cee"), id(4), id(7)]);
    assert_eq!(mixed.path(&id(1)), vec![id(1)]);
    assert!(mixed.path(&id(999)).is_empty());
    assert_eq!(mixed.depth(&id(7)), Some(3));
    assert_eq!(mixed.depth(&id(999)), None);
}

// ============================================================
// Mutations
// ============================================================

#[rstest]
fn given_attempts_to_break_structure_then_store_stays_consistent(mut chain: TreeStore) {
    // duplicate id
    let err = chain.add(Item::child(2, 1, "Duplicate")).unwrap_err();
    assert_eq!(err, DomainError::DuplicateIdentifier(id(2)));
    assert!(err.to_string().contains("already exists"));

    // self parent
    let err = chain.update(Item::child(2, 2, "Self parent")).unwrap_err();
    assert!(err.to_string().contains("parent of itself"));

    // 1 below its own descendant 4
    let err = chain.update(Item::child(1, 4, "Cycle")).unwrap_err();
    assert!(matches!(err, DomainError::CircularDependency { .. }));
    assert!(err.to_string().contains("circular"));
    assert_eq!(chain.get(&id(1)).map(|i| i.label.as_str()), Some("Root"));
    let parents: Vec<Option<ItemId>> = (1..=4)
        .map(|i| chain.get(&id(i)).and_then(|item| item.parent.clone()))
        .collect();
    assert_eq!(parents, vec![None, Some(id(1)), Some(id(2)), Some(id(3))]);

    // unknown id is ignored
    chain.update(Item::root(999, "Ghost")).unwrap();
    assert!(chain.get(&id(999)).is_none());

    // warm cache, then move
    assert_eq!(ids(&chain.all_children(&id(1))), vec![id(2), id(3), id(4)]);
    chain.update(Item::child(3, 1, "Moved")).unwrap();
    let mut after = ids(&chain.all_children(&id(1)));
    after.sort();
    assert_eq!(after, vec![id(2), id(3), id(4)]);

    // removing 2 no longer takes 3 and 4 with it
    let removed = chain.remove(&id(2));
    assert_eq!(removed.len(), 1);
    assert!(chain.get(&id(2)).is_none());
    assert!(chain.get(&id(3)).is_some());
    assert!(chain.get(&id(4)).is_some());
    assert_eq!(ids(&chain.all_parents(&id(3))), vec![id(1)]);
    assert_eq!(ids(&chain.all_parents(&id(4))), vec![id(3), id(1)]);
}

#[rstest]
fn given_failed_add_when_querying_then_nothing_changed(mut chain: TreeStore) {
    // Arrange
    let before = ids(&chain.all_children(&id(1)));

    // Act
    let result = chain.add(Item::child(1, 4, "Again"));

    // Assert
    assert!(result.is_err());
    assert_eq!(chain.len(), 4);
    assert_eq!(ids(&chain.all_children(&id(1))), before);
    assert!(chain.is_cached(&id(1)));
}

#[rstest]
fn given_new_leaf_when_adding_then_ancestors_see_it(mut chain: TreeStore) {
    // Arrange
    chain.all_children(&id(1));
    chain.all_children(&id(3));

    // Act
    chain.add(Item::child("leaf", 4, "Leaf")).unwrap();

    // Assert
    assert!(!chain.is_cached(&id(1)));
    assert!(!chain.is_cached(&id(3)));
    assert_eq!(
        ids(&chain.all_children(&id(1))),
        vec![id(2), id(3), id(4), id("leaf")]
    );
    assert_eq!(ids(&chain.all_parents(&id("leaf"))), vec![id(4), id(3), id(2), id(1)]);
}

#[rstest]
fn given_added_item_when_removing_it_then_live_set_is_restored(mut chain: TreeStore) {
    // Arrange
    let before = ids(&chain.all());
    let descendants_before = ids(&chain.all_children(&id(1)));

    // Act
    chain.add(Item::child("tmp", 2, "Temporary")).unwrap();
    let removed = chain.remove(&id("tmp"));

    // Assert
    assert_eq!(removed.len(), 1);
    assert_eq!(ids(&chain.all()), before);
    assert_eq!(ids(&chain.all_children(&id(1))), descendants_before);
    assert!(chain.children(&id(2)).iter().all(|item| item.id() != &id("tmp")));
}

#[rstest]
fn given_item_without_parent_when_adding_then_becomes_root(mut chain: TreeStore) {
    chain.add(Item::root(10, "Second root")).unwrap();

    assert_eq!(ids(&chain.roots()), vec![id(1), id(10)]);
    assert!(chain.all_parents(&id(10)).is_empty());
}

#[rstest]
fn given_subtree_when_removing_then_drops_every_descendant() {
    // Arrange
    let mut store = TreeStore::new(vec![
        Item::root(1, "Root"),
        Item::child(2, 1, "Level 1 - A"),
        Item::child(3, 2, "Level 2 - A"),
        Item::child(4, 3, "Level 3 - A"),
        Item::child(5, 1, "Level 1 - B"),
        Item::child(6, 5, "Level 2 - B"),
    ]);
    store.all_children(&id(1));
    store.all_children(&id(2));

    // Act
    let removed = store.remove(&id(2));

    // Assert
    assert_eq!(ids(&removed.iter().collect::<Vec<_>>()), vec![id(2), id(3), id(4)]);
    for gone in [2, 3, 4] {
        assert!(store.get(&id(gone)).is_none());
        assert!(!store.is_cached(&id(gone)));
    }
    assert!(store.get(&id(5)).is_some());
    assert!(store.get(&id(6)).is_some());
    assert_eq!(ids(&store.children(&id(1))), vec![id(5)]);
    assert_eq!(ids(&store.all()), vec![id(1), id(5), id(6)]);
    assert_eq!(ids(&store.all_children(&id(1))), vec![id(5), id(6)]);
}

#[rstest]
fn given_unknown_id_when_removing_then_returns_nothing(mut mixed: TreeStore) {
    assert!(mixed.remove(&id(999)).is_empty());
    assert_eq!(mixed.len(), 8);
}

#[rstest]
fn given_removed_id_when_adding_again_then_starts_fresh(mut chain: TreeStore) {
    // Arrange
    chain.remove(&id(3));

    // Act
    chain.add(Item::child(3, 1, "Reborn")).unwrap();

    // Assert
    assert!(chain.children(&id(3)).is_empty());
    assert!(chain.get(&id(4)).is_none());
    assert_eq!(ids(&chain.all_children(&id(1))), vec![id(2), id(3)]);
}

#[rstest]
fn given_label_and_parent_updates_then_tree_follows() {
    // Arrange
    let mut store = TreeStore::new(vec![
        Item::root(1, "Root"),
        Item::child(2, 1, "Level 1 - A"),
        Item::child(3, 2, "Level 2 - A"),
        Item::child(4, 1, "Level 1 - B"),
    ]);

    // Act: relabel only
    store.update(Item::child(2, 1, "Level 1 - A (updated)")).unwrap();

    // Assert
    assert_eq!(
        store.get(&id(2)).map(|i| i.label.as_str()),
        Some("Level 1 - A (updated)")
    );
    assert_eq!(ids(&store.children(&id(1))), vec![id(2), id(4)]);

    // Act: re-parent
    store.update(Item::child(3, 1, "Level 2 - A (moved)")).unwrap();

    // Assert
    assert_eq!(ids(&store.all_parents(&id(3))), vec![id(1)]);
    assert!(store.children(&id(2)).is_empty());
    assert_eq!(ids(&store.children(&id(1))), vec![id(2), id(3), id(4)]);
}

#[rstest]
fn given_cached_subtree_when_relabeling_then_listing_shows_new_label(mut chain: TreeStore) {
    // Arrange
    chain.all_children(&id(1));

    // Act
    chain.update(Item::child(4, 3, "Renamed")).unwrap();

    // Assert
    let labels: Vec<&str> = chain
        .all_children(&id(1))
        .iter()
        .map(|item| item.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Child 1", "Child 2", "Renamed"]);
}

#[rstest]
fn given_item_when_moving_to_root_then_detaches_subtree(mut chain: TreeStore) {
    // Act
    chain.update(Item::root(3, "Detached")).unwrap();

    // Assert
    assert_eq!(ids(&chain.roots()), vec![id(1), id(3)]);
    assert_eq!(ids(&chain.all_children(&id(1))), vec![id(2)]);
    assert_eq!(ids(&chain.all_children(&id(3))), vec![id(4)]);
    assert_eq!(chain.path(&id(4)), vec![id(3), id(4)]);
}

// ============================================================
// Scale
// ============================================================

/// Deterministic pseudo-random tree: item `i` hangs below an earlier item.
fn wide_tree(count: i64) -> Vec<Item> {
    let mut items = vec![Item::root(1, "Root")];
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for i in 2..=count {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let parent = (state % (i as u64 - 1)) as i64 + 1;
        items.push(Item::child(i, parent, format!("Item {}", i)));
    }
    items
}

#[rstest]
fn given_large_tree_when_querying_then_counts_add_up() {
    // Arrange
    testing::init_test_setup();
    let store = TreeStore::new(wide_tree(10_000));

    // Act / Assert
    assert_eq!(store.all().len(), 10_000);
    assert_eq!(store.all_children(&id(1)).len(), 9_999);

    for probe in [2, 77, 4_321, 10_000] {
        let below = store.all_children(&id(probe)).len();
        let above = store.all_parents(&id(probe)).len();
        assert!(below + above < 10_000);
        assert_eq!(store.path(&id(probe)).len(), above + 1);
    }
}

#[rstest]
fn given_deep_chain_when_querying_then_does_not_recurse() {
    // Arrange
    let mut items = vec![Item::root(0, "0")];
    items.extend((1..50_000).map(|i: i64| Item::child(i, i - 1, i.to_string())));
    let mut store = TreeStore::new(items);

    // Act / Assert
    assert_eq!(store.all_children(&id(0)).len(), 49_999);
    assert_eq!(store.all_parents(&id(49_999_i64)).len(), 49_999);
    assert!(store.update(Item::child(0, 49_999, "loop")).is_err());
    assert_eq!(store.remove(&id(0)).len(), 50_000);
    assert!(store.is_empty());
}
