use std::sync::Arc;

use super::fibonacci::FIBONACCI;
use super::Node;

/// Whether a subtree of `depth` with left weight `weight` can be left as is.
///
/// The threshold is compared against the left weight, not the full length, so a
/// right-heavy subtree may be kept even when its total length would fail the check.
pub(super) fn within_threshold(depth: usize, weight: usize) -> bool {
    match FIBONACCI.get(depth + 2) {
        Some(&threshold) => threshold < weight as u64,
        None => false,
    }
}

/// Rebuilds `leaves` into a tree of minimal depth by recursive midpoint merging.
pub(super) fn rebuild(depth: usize, leaves: &[Arc<Node>]) -> Arc<Node> {
    tracing::trace!(depth, leaves = leaves.len(), "rebuilding subtree");
    merge(leaves)
}

fn merge(leaves: &[Arc<Node>]) -> Arc<Node> {
    match leaves {
        [] => Node::empty(),
        [leaf] => leaf.clone(),
        _ => {
            let (left, right) = leaves.split_at(leaves.len() / 2);
            Node::new_internal(merge(left), merge(right))
        }
    }
}
