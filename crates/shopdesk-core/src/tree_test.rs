use proptest::prelude::*;

use super::*;

fn record(id: CategoryId, parent_id: Option<CategoryId>, name: &str) -> CategoryRecord {
    CategoryRecord {
        id,
        parent_id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

fn ids(nodes: &[CategoryNode]) -> Vec<CategoryId> {
    nodes.iter().map(|n| n.record.id).collect()
}

fn skincare_tree() -> Vec<CategoryNode> {
    build_tree(&[
        record(1, None, "Skincare"),
        record(2, Some(1), "Serums"),
        record(3, Some(1), "Cleansers"),
        record(4, Some(2), "Vitamin C Serum"),
        record(5, None, "Fragrance"),
        record(6, Some(5), "Eau de Parfum"),
    ])
}

#[test]
fn build_tree_empty_input_is_empty_forest() {
    assert!(build_tree(&[]).is_empty());
}

#[test]
fn build_tree_dangling_parent_becomes_root() {
    let forest = build_tree(&[
        record(1, None, "Skincare"),
        record(2, Some(1), "Serums"),
        record(3, Some(99), "Orphan"),
    ]);

    assert_eq!(ids(&forest), vec![1, 3]);
    assert_eq!(ids(&forest[0].children), vec![2]);
    assert!(forest[0].children[0].children.is_empty());
    assert!(forest[1].children.is_empty());
    // The record keeps its stale pointer; only its placement changes.
    assert_eq!(forest[1].record.parent_id, Some(99));
}

#[test]
fn build_tree_child_listed_before_parent() {
    let forest = build_tree(&[
        record(4, Some(2), "Vitamin C Serum"),
        record(2, Some(1), "Serums"),
        record(1, None, "Skincare"),
    ]);

    assert_eq!(ids(&forest), vec![1]);
    assert_eq!(ids(&forest[0].children), vec![2]);
    assert_eq!(ids(&forest[0].children[0].children), vec![4]);
}

#[test]
fn build_tree_keeps_sibling_input_order() {
    let forest = build_tree(&[
        record(1, None, "Root"),
        record(30, Some(1), "C"),
        record(10, Some(1), "A"),
        record(20, Some(1), "B"),
    ]);

    assert_eq!(ids(&forest[0].children), vec![30, 10, 20]);
}

#[test]
fn build_tree_leaves_input_untouched() {
    let records = vec![record(1, None, "Skincare"), record(2, Some(1), "Serums")];
    let before = records.clone();
    let _ = build_tree(&records);
    let _ = build_tree(&records);
    assert_eq!(records, before);
}

#[test]
fn build_tree_duplicate_id_last_record_wins() {
    let forest = build_tree(&[
        record(1, None, "Skincare"),
        record(2, Some(1), "Old Name"),
        record(3, None, "Body"),
        record(2, Some(3), "New Name"),
    ]);

    assert_eq!(ids(&forest), vec![1, 3]);
    assert!(forest[0].children.is_empty());
    assert_eq!(forest[1].children.len(), 1);
    assert_eq!(forest[1].children[0].record.name, "New Name");
    assert_eq!(count_nodes(&forest), 3);
}

#[test]
fn build_tree_self_parent_is_dropped_without_panicking() {
    let records = [record(1, None, "Skincare"), record(2, Some(2), "Loop")];
    let forest = build_tree(&records);

    assert_eq!(ids(&forest), vec![1]);
    assert!(forest[0].children.is_empty());
    assert_eq!(unreachable_ids(&records), vec![2]);
}

#[test]
fn build_tree_cycle_cluster_is_absent_from_forest() {
    let records = [
        record(1, None, "Skincare"),
        record(2, Some(3), "A"),
        record(3, Some(2), "B"),
        record(4, Some(3), "Hangs off the cycle"),
        record(5, Some(1), "Serums"),
    ];
    let forest = build_tree(&records);

    assert_eq!(ids(&forest), vec![1]);
    assert_eq!(ids(&forest[0].children), vec![5]);
    assert_eq!(unreachable_ids(&records), vec![2, 3, 4]);
}

#[test]
fn unreachable_ids_empty_for_acyclic_input() {
    let records = [
        record(1, None, "Skincare"),
        record(2, Some(1), "Serums"),
        record(3, Some(99), "Orphan"),
    ];
    assert!(unreachable_ids(&records).is_empty());
}

#[test]
fn build_tree_handles_deep_chain() {
    let records: Vec<CategoryRecord> = (1..=2_000u64)
        .map(|id| record(id, (id > 1).then(|| id - 1), "Level"))
        .collect();
    let forest = build_tree(&records);

    assert_eq!(forest.len(), 1);
    assert_eq!(count_nodes(&forest), 2_000);
    let flat = flatten_tree(&forest);
    assert_eq!(flat.last().map(|f| f.depth), Some(1_999));
}

#[test]
fn filter_tree_keeps_ancestors_and_prunes_siblings() {
    let filtered = filter_tree(&skincare_tree(), "vitamin");

    assert_eq!(ids(&filtered), vec![1]);
    assert_eq!(ids(&filtered[0].children), vec![2]);
    assert_eq!(ids(&filtered[0].children[0].children), vec![4]);
}

#[test]
fn filter_tree_direct_match_keeps_full_subtree() {
    let filtered = filter_tree(&skincare_tree(), "skincare");

    assert_eq!(ids(&filtered), vec![1]);
    assert_eq!(ids(&filtered[0].children), vec![2, 3]);
    assert_eq!(count_nodes(&filtered), 4);
}

#[test]
fn filter_tree_is_case_insensitive() {
    let filtered = filter_tree(&skincare_tree(), "PARFUM");
    assert_eq!(ids(&filtered), vec![5]);
    assert_eq!(ids(&filtered[0].children), vec![6]);
}

#[test]
fn filter_tree_matches_slug() {
    let forest = build_tree(&[CategoryRecord {
        id: 1,
        parent_id: None,
        name: "Soins du visage".to_string(),
        slug: "face-care".to_string(),
    }]);
    assert_eq!(ids(&filter_tree(&forest, "face")), vec![1]);
}

#[test]
fn filter_tree_preserves_sibling_order() {
    let filtered = filter_tree(&skincare_tree(), "e");
    assert_eq!(ids(&filtered), vec![1, 5]);
}

#[test]
fn filter_tree_no_match_is_empty() {
    assert!(filter_tree(&skincare_tree(), "haircare").is_empty());
}

#[test]
fn filter_tree_does_not_modify_input() {
    let forest = skincare_tree();
    let before = forest.clone();
    let _ = filter_tree(&forest, "vitamin");
    assert_eq!(forest, before);
}

#[test]
fn search_tree_blank_keyword_returns_everything() {
    let forest = skincare_tree();
    assert_eq!(search_tree(&forest, "   "), forest);
}

#[test]
fn search_tree_trims_keyword() {
    let filtered = search_tree(&skincare_tree(), "  cleansers ");
    assert_eq!(ids(&filtered), vec![1]);
    assert_eq!(ids(&filtered[0].children), vec![3]);
}

#[test]
fn flatten_tree_is_preorder_with_depth() {
    let flat = flatten_tree(&skincare_tree());
    let pairs: Vec<(CategoryId, usize)> = flat.iter().map(|f| (f.id, f.depth)).collect();
    assert_eq!(
        pairs,
        vec![(1, 0), (2, 1), (4, 2), (3, 1), (5, 0), (6, 1)]
    );
}

#[test]
fn count_nodes_counts_every_level() {
    assert_eq!(count_nodes(&skincare_tree()), 6);
    assert_eq!(count_nodes(&[]), 0);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Acyclic record lists with unique ids, some dangling parents, in any order.
fn arb_records() -> impl Strategy<Value = Vec<CategoryRecord>> {
    prop::collection::vec((0u8..3, any::<prop::sample::Index>(), "[a-z]{1,6}"), 0..40)
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (kind, pick, name))| {
                    let id = i as u64 + 1;
                    let parent_id = match kind {
                        0 => None,
                        1 if i > 0 => Some(pick.index(i) as u64 + 1),
                        _ => Some(10_000 + id),
                    };
                    CategoryRecord {
                        id,
                        parent_id,
                        slug: format!("{name}-slug"),
                        name,
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|records| Just(records).prop_shuffle())
}

fn assert_parent_links(nodes: &[CategoryNode], parent: Option<CategoryId>, known: &[CategoryId]) {
    for node in nodes {
        match parent {
            Some(pid) => assert_eq!(node.record.parent_id, Some(pid)),
            None => assert!(node
                .record
                .parent_id
                .is_none_or(|pid| !known.contains(&pid))),
        }
        assert_parent_links(&node.children, Some(node.record.id), known);
    }
}

fn assert_retained(nodes: &[CategoryNode], needle: &str) {
    for node in nodes {
        let matched = node.record.matches_lowercase(needle);
        assert!(matched || !node.children.is_empty());
        if !matched {
            assert_retained(&node.children, needle);
        }
    }
}

proptest! {
    #[test]
    fn build_tree_preserves_node_count(records in arb_records()) {
        prop_assert_eq!(count_nodes(&build_tree(&records)), records.len());
    }

    #[test]
    fn build_tree_links_children_to_their_parent(records in arb_records()) {
        let known: Vec<CategoryId> = records.iter().map(|r| r.id).collect();
        assert_parent_links(&build_tree(&records), None, &known);
    }

    #[test]
    fn build_tree_reaches_every_acyclic_record(records in arb_records()) {
        prop_assert!(unreachable_ids(&records).is_empty());
    }

    #[test]
    fn filter_tree_is_idempotent(records in arb_records(), keyword in "[a-z]{1,2}") {
        let once = filter_tree(&build_tree(&records), &keyword);
        let twice = filter_tree(&once, &keyword);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_tree_retains_only_matches_and_their_ancestors(
        records in arb_records(),
        keyword in "[a-z]{1,2}",
    ) {
        assert_retained(&filter_tree(&build_tree(&records), &keyword), &keyword);
    }
}
