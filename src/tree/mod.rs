mod balance;
mod fibonacci;
mod internal;
mod leaf;

use std::sync::Arc;

pub(crate) use self::internal::Internal;
pub(crate) use self::leaf::Leaf;

/// Largest number of code points a merge will pack into a single leaf.
pub const MAX_LEAF_SIZE: usize = 256;

/// A rope subtree.
///
/// Appends and prepends without a `balance()` in between grow the tree one level
/// each, so every walk below is a loop or uses an explicit stack rather than
/// recursing once per level.
pub(crate) enum Node {
    Leaf(Leaf),
    Internal(Internal),
}

/// A sibling left behind while descending towards a split point.
enum Detour {
    /// Went left; the right sibling is reattached after the right half.
    Left {
        sibling: Arc<Node>,
        len: usize,
        newlines: usize,
    },
    /// Went right; the left sibling is reattached before the left half.
    Right {
        sibling: Arc<Node>,
        weight: usize,
        line_weight: usize,
    },
}

impl Node {
    pub(crate) fn new_leaf(data: Vec<char>) -> Arc<Self> {
        Arc::new(Node::Leaf(Leaf::new(data)))
    }

    pub(crate) fn empty() -> Arc<Self> {
        Self::new_leaf(Vec::new())
    }

    pub(crate) fn new_internal(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        Arc::new(Node::Internal(Internal::new(left, right)))
    }

    pub(crate) fn len(&self) -> usize {
        let mut total = 0;
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return total + leaf.len(),
                Node::Internal(internal) => {
                    total += internal.weight;
                    node = &*internal.right;
                }
            }
        }
    }

    pub(crate) fn newline_count(&self) -> usize {
        let mut total = 0;
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return total + leaf.newline_count(),
                Node::Internal(internal) => {
                    total += internal.line_weight;
                    node = &*internal.right;
                }
            }
        }
    }

    pub(crate) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            match node {
                Node::Leaf(_) => deepest = deepest.max(level),
                Node::Internal(internal) => {
                    stack.push((&*internal.left, level + 1));
                    stack.push((&*internal.right, level + 1));
                }
            }
        }
        deepest
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        let mut index = index;
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.char_at(index),
                Node::Internal(internal) if index < internal.weight => node = &*internal.left,
                Node::Internal(internal) => {
                    index -= internal.weight;
                    node = &*internal.right;
                }
            }
        }
    }

    /// Offset of the first `ch`, searching leaves left to right.
    pub(crate) fn index_of(&self, ch: char) -> Option<usize> {
        let mut stack = vec![(self, 0)];
        while let Some((node, offset)) = stack.pop() {
            match node {
                Node::Leaf(leaf) => {
                    if let Some(index) = leaf.index_of(ch) {
                        return Some(offset + index);
                    }
                }
                Node::Internal(internal) => {
                    stack.push((&*internal.right, offset + internal.weight));
                    stack.push((&*internal.left, offset));
                }
            }
        }
        None
    }

    /// Offset of the last `ch`, searching leaves right to left.
    pub(crate) fn last_index_of(&self, ch: char) -> Option<usize> {
        let mut stack = vec![(self, 0)];
        while let Some((node, offset)) = stack.pop() {
            match node {
                Node::Leaf(leaf) => {
                    if let Some(index) = leaf.last_index_of(ch) {
                        return Some(offset + index);
                    }
                }
                Node::Internal(internal) => {
                    stack.push((&*internal.left, offset));
                    stack.push((&*internal.right, offset + internal.weight));
                }
            }
        }
        None
    }

    /// Concatenates `other` after `self`.
    ///
    /// Both variants share one policy: while the combined text fits in a single
    /// leaf the result is flattened into one, otherwise the operands are wrapped
    /// unmodified in a new internal node.
    pub(crate) fn append(self: &Arc<Self>, other: &Arc<Self>) -> Arc<Self> {
        if self.len() + other.len() <= MAX_LEAF_SIZE {
            let mut data = self.to_chars();
            other.extend_chars(&mut data);
            return Self::new_leaf(data);
        }
        Self::new_internal(self.clone(), other.clone())
    }

    pub(crate) fn prepend(self: &Arc<Self>, other: &Arc<Self>) -> Arc<Self> {
        if self.len() + other.len() <= MAX_LEAF_SIZE {
            let mut data = other.to_chars();
            self.extend_chars(&mut data);
            return Self::new_leaf(data);
        }
        Self::new_internal(other.clone(), self.clone())
    }

    /// Splits at `at`, clamped to the length.
    ///
    /// Descends to the split point, then rebuilds only the nodes on that path.
    /// Landing exactly on a node's weight hands back its two children as they are.
    pub(crate) fn split(&self, at: usize) -> (Arc<Self>, Arc<Self>) {
        let mut at = at;
        let mut len = self.len();
        let mut newlines = self.newline_count();
        let mut detours = Vec::new();
        let mut node = self;

        let (mut left, mut right, mut right_counts) = loop {
            match node {
                Node::Leaf(leaf) => {
                    let (left, right) = leaf.split(at);
                    let right_counts = (right.len(), right.newline_count());
                    break (left, right, right_counts);
                }
                Node::Internal(internal) if at < internal.weight => {
                    detours.push(Detour::Left {
                        sibling: internal.right.clone(),
                        len: len - internal.weight,
                        newlines: newlines - internal.line_weight,
                    });
                    len = internal.weight;
                    newlines = internal.line_weight;
                    node = &*internal.left;
                }
                Node::Internal(internal) if at > internal.weight => {
                    detours.push(Detour::Right {
                        sibling: internal.left.clone(),
                        weight: internal.weight,
                        line_weight: internal.line_weight,
                    });
                    at -= internal.weight;
                    len -= internal.weight;
                    newlines -= internal.line_weight;
                    node = &*internal.right;
                }
                Node::Internal(internal) => {
                    let right_counts = (
                        len - internal.weight,
                        newlines - internal.line_weight,
                    );
                    break (internal.left.clone(), internal.right.clone(), right_counts);
                }
            }
        };

        // counts are carried down the path so rebuilding never re-walks a spine
        while let Some(detour) = detours.pop() {
            match detour {
                Detour::Left {
                    sibling,
                    len,
                    newlines,
                } => {
                    let (weight, line_weight) = right_counts;
                    right = Internal::from_parts(right, sibling, weight, line_weight);
                    right_counts = (weight + len, line_weight + newlines);
                }
                Detour::Right {
                    sibling,
                    weight,
                    line_weight,
                } => {
                    left = Internal::from_parts(sibling, left, weight, line_weight);
                }
            }
        }

        (left, right)
    }

    /// The code points in `[start, end)`, clamped. Empty when `start >= end`.
    ///
    /// Follows one side while the range fits inside it. A range straddling a
    /// node joins a suffix of its left child with a prefix of its right child.
    pub(crate) fn sub(&self, start: usize, end: usize) -> Arc<Self> {
        let mut len = self.len();
        let (mut start, mut end) = (start, end.min(len));
        let mut node = self;
        loop {
            if start >= end {
                return Self::empty();
            }
            match node {
                Node::Leaf(leaf) => return leaf.sub(start, end),
                Node::Internal(internal) if end < internal.weight => {
                    len = internal.weight;
                    node = &*internal.left;
                }
                Node::Internal(internal) if start > internal.weight => {
                    start -= internal.weight;
                    end -= internal.weight;
                    len -= internal.weight;
                    node = &*internal.right;
                }
                Node::Internal(internal) => {
                    let left = match start {
                        0 => internal.left.clone(),
                        _ => internal.left.split(start).1,
                    };
                    let end = end - internal.weight;
                    let right = if end >= len - internal.weight {
                        internal.right.clone()
                    } else {
                        internal.right.split(end).0
                    };
                    return Self::new_internal(left, right);
                }
            }
        }
    }

    /// The zero-indexed line `n`, without its newline. Empty past the last line.
    ///
    /// A line can span many leaves; each contributes a piece, and leaves that
    /// lie wholly inside the line are reused rather than copied.
    pub(crate) fn line(self: &Arc<Self>, n: usize) -> Arc<Self> {
        let mut pieces = Vec::new();
        let mut stack = vec![(self, n)];
        while let Some((node, n)) = stack.pop() {
            match &**node {
                Node::Leaf(leaf) if n == 0 && leaf.newline_count() == 0 => {
                    pieces.push(node.clone());
                }
                Node::Leaf(leaf) => pieces.push(leaf.line(n)),
                Node::Internal(internal) if n < internal.line_weight => {
                    stack.push((&internal.left, n));
                }
                Node::Internal(internal) if n > internal.line_weight => {
                    stack.push((&internal.right, n - internal.line_weight));
                }
                Node::Internal(internal) => {
                    // the line straddles the boundary
                    stack.push((&internal.right, 0));
                    stack.push((&internal.left, n));
                }
            }
        }
        pieces
            .into_iter()
            .reduce(|line, piece| line.append(&piece))
            .unwrap_or_else(Self::empty)
    }

    pub(crate) fn balance(self: &Arc<Self>) -> Arc<Self> {
        match &**self {
            Node::Leaf(_) => self.clone(),
            Node::Internal(internal) => {
                let depth = self.depth();
                if balance::within_threshold(depth, internal.weight) {
                    tracing::trace!(
                        depth,
                        weight = internal.weight,
                        "subtree already balanced"
                    );
                    return self.clone();
                }
                balance::rebuild(depth, &self.leaves())
            }
        }
    }

    /// Every leaf of the subtree in left-to-right order.
    pub(crate) fn leaves(self: &Arc<Self>) -> Vec<Arc<Self>> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if let Node::Internal(internal) = node.as_ref() {
                stack.push(internal.right.clone());
                stack.push(internal.left.clone());
                continue;
            }
            leaves.push(node);
        }
        leaves
    }

    pub(crate) fn to_chars(&self) -> Vec<char> {
        let mut data = Vec::with_capacity(self.len());
        self.extend_chars(&mut data);
        data
    }

    fn extend_chars(&self, data: &mut Vec<char>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(leaf) => data.extend_from_slice(leaf.data()),
                Node::Internal(internal) => {
                    stack.push(&*internal.right);
                    stack.push(&*internal.left);
                }
            }
        }
    }
}
