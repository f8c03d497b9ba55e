use std::sync::Arc;

use super::Node;

/// A contiguous chunk of code points.
pub(crate) struct Leaf {
    data: Vec<char>,
    newlines: usize,
}

impl Leaf {
    pub(crate) fn new(data: Vec<char>) -> Self {
        let newlines = data.iter().filter(|&&ch| ch == '\n').count();
        Self { data, newlines }
    }

    pub(crate) fn data(&self) -> &[char] {
        &self.data
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn newline_count(&self) -> usize {
        self.newlines
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        self.data.get(index).copied()
    }

    pub(crate) fn index_of(&self, ch: char) -> Option<usize> {
        self.data.iter().position(|&c| c == ch)
    }

    pub(crate) fn last_index_of(&self, ch: char) -> Option<usize> {
        self.data.iter().rposition(|&c| c == ch)
    }

    pub(crate) fn split(&self, at: usize) -> (Arc<Node>, Arc<Node>) {
        let (left, right) = self.data.split_at(at.min(self.len()));
        (Node::new_leaf(left.to_vec()), Node::new_leaf(right.to_vec()))
    }

    pub(crate) fn sub(&self, start: usize, end: usize) -> Arc<Node> {
        let end = end.min(self.len());
        if start >= end {
            return Node::empty();
        }
        Node::new_leaf(self.data[start..end].to_vec())
    }

    /// The `n`th line, without its terminating newline. Empty past the last line.
    pub(crate) fn line(&self, n: usize) -> Arc<Node> {
        match self.data.split(|&ch| ch == '\n').nth(n) {
            Some(line) => Node::new_leaf(line.to_vec()),
            None => Node::empty(),
        }
    }
}
