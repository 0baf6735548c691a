//! Category forest construction and keyword filtering.
//!
//! The backend hands out categories as a flat list with parent pointers.
//! [`build_tree`] turns that list into an owned forest; [`filter_tree`] prunes
//! a forest down to the branches that match a search keyword. Both are pure
//! and leave their input untouched.

use std::collections::HashMap;

use crate::category::{CategoryId, CategoryNode, CategoryRecord, FlatCategory};

/// Parent/child links resolved from a flat record list, by record index.
struct Links {
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
    /// Indices that survive duplicate-id resolution, in input order.
    winners: Vec<usize>,
}

/// Resolve parent pointers.
///
/// Duplicate ids resolve to the last record carrying that id; earlier
/// duplicates are dropped. A parent id that resolves to nothing makes the
/// record a root.
fn link(records: &[CategoryRecord]) -> Links {
    let mut index_of: HashMap<CategoryId, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        index_of.insert(record.id, idx);
    }

    let mut roots = Vec::new();
    let mut children = vec![Vec::new(); records.len()];
    let mut winners = Vec::with_capacity(index_of.len());

    for (idx, record) in records.iter().enumerate() {
        if index_of.get(&record.id) != Some(&idx) {
            continue;
        }
        winners.push(idx);
        match record.parent_id.and_then(|pid| index_of.get(&pid)) {
            Some(&parent) => children[parent].push(idx),
            None => roots.push(idx),
        }
    }

    Links {
        roots,
        children,
        winners,
    }
}

/// Build a forest from a flat list of category records.
///
/// Siblings keep their input order. Records whose parent is missing from
/// `records` become roots. Records caught in a parent cycle hang off no root
/// and are left out of the result; see [`unreachable_ids`] to report them.
///
/// Runs in O(n). Assembly uses an explicit stack rather than recursion.
#[must_use]
pub fn build_tree(records: &[CategoryRecord]) -> Vec<CategoryNode> {
    let links = link(records);

    // Post-order assembly: a node is built once all of its children are.
    let mut built: Vec<Option<CategoryNode>> = (0..records.len()).map(|_| None).collect();
    let mut stack: Vec<(usize, bool)> = links.roots.iter().rev().map(|&r| (r, false)).collect();

    while let Some((idx, expanded)) = stack.pop() {
        if expanded {
            let children = links.children[idx]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[idx] = Some(CategoryNode {
                record: records[idx].clone(),
                children,
            });
        } else {
            stack.push((idx, true));
            stack.extend(links.children[idx].iter().rev().map(|&child| (child, false)));
        }
    }

    links
        .roots
        .iter()
        .filter_map(|&root| built[root].take())
        .collect()
}

/// Ids that [`build_tree`] leaves out of the forest because their parent
/// chain loops instead of reaching a root.
///
/// Returned in input order. Empty for any list without parent cycles.
#[must_use]
pub fn unreachable_ids(records: &[CategoryRecord]) -> Vec<CategoryId> {
    let links = link(records);

    let mut reached = vec![false; records.len()];
    let mut stack = links.roots.clone();
    while let Some(idx) = stack.pop() {
        reached[idx] = true;
        stack.extend_from_slice(&links.children[idx]);
    }

    links
        .winners
        .into_iter()
        .filter(|&idx| !reached[idx])
        .map(|idx| records[idx].id)
        .collect()
}

/// Keep the branches of `nodes` whose name or slug contains `keyword`,
/// ignoring case.
///
/// A matching node is kept with its whole subtree. A node that does not match
/// but has matching descendants is kept with only those descendants. Sibling
/// order is preserved and the input forest is not modified.
///
/// `keyword` is expected to be trimmed and non-blank; use [`search_tree`] for
/// raw user input.
#[must_use]
pub fn filter_tree(nodes: &[CategoryNode], keyword: &str) -> Vec<CategoryNode> {
    let needle = keyword.to_lowercase();
    filter_nodes(nodes, &needle)
}

fn filter_nodes(nodes: &[CategoryNode], needle: &str) -> Vec<CategoryNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if node.record.matches_lowercase(needle) {
                return Some(node.clone());
            }
            let children = filter_nodes(&node.children, needle);
            if children.is_empty() {
                None
            } else {
                Some(CategoryNode {
                    record: node.record.clone(),
                    children,
                })
            }
        })
        .collect()
}

/// Filter with a raw search-box value: trims it, and returns the forest
/// unchanged when nothing is left.
#[must_use]
pub fn search_tree(nodes: &[CategoryNode], raw_keyword: &str) -> Vec<CategoryNode> {
    let keyword = raw_keyword.trim();
    if keyword.is_empty() {
        return nodes.to_vec();
    }
    filter_tree(nodes, keyword)
}

/// Depth-first, pre-order listing of a forest.
#[must_use]
pub fn flatten_tree(nodes: &[CategoryNode]) -> Vec<FlatCategory> {
    let mut out = Vec::new();
    let mut stack: Vec<(&CategoryNode, usize)> = nodes.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        out.push(FlatCategory {
            id: node.record.id,
            parent_id: node.record.parent_id,
            name: node.record.name.clone(),
            slug: node.record.slug.clone(),
            depth,
        });
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    out
}

/// Total number of nodes in a forest, across all levels.
#[must_use]
pub fn count_nodes(nodes: &[CategoryNode]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&CategoryNode> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter());
    }
    count
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
