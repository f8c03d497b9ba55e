use std::mem;
use std::sync::{Arc, LazyLock};

use super::Node;

/// Stand-in swapped into a node's child slots while the node is being dropped.
static DETACHED: LazyLock<Arc<Node>> = LazyLock::new(Node::empty);

/// An internal node with left-side counters captured at construction.
pub(crate) struct Internal {
    pub(crate) left: Arc<Node>,
    pub(crate) right: Arc<Node>,
    /// Code points in `left`.
    pub(crate) weight: usize,
    /// Newlines in `left`.
    pub(crate) line_weight: usize,
}

impl Internal {
    pub(crate) fn new(left: Arc<Node>, right: Arc<Node>) -> Self {
        Self {
            weight: left.len(),
            line_weight: left.newline_count(),
            left,
            right,
        }
    }

    /// Builds a node whose left-side counters are already known.
    pub(crate) fn from_parts(
        left: Arc<Node>,
        right: Arc<Node>,
        weight: usize,
        line_weight: usize,
    ) -> Arc<Node> {
        debug_assert_eq!(weight, left.len());
        debug_assert_eq!(line_weight, left.newline_count());
        Arc::new(Node::Internal(Self {
            left,
            right,
            weight,
            line_weight,
        }))
    }
}

/// Releases uniquely owned descendants from a work stack, so dropping a tree
/// of any depth uses constant call stack.
impl Drop for Internal {
    fn drop(&mut self) {
        if !owns_internal(&mut self.left) && !owns_internal(&mut self.right) {
            return;
        }

        let mut stack = vec![detach(&mut self.left), detach(&mut self.right)];
        while let Some(node) = stack.pop() {
            if let Some(Node::Internal(mut internal)) = Arc::into_inner(node) {
                stack.push(detach(&mut internal.left));
                stack.push(detach(&mut internal.right));
            }
        }
    }
}

fn owns_internal(node: &mut Arc<Node>) -> bool {
    matches!(Arc::get_mut(node), Some(Node::Internal(_)))
}

fn detach(node: &mut Arc<Node>) -> Arc<Node> {
    mem::replace(node, DETACHED.clone())
}
