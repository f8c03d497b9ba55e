use std::iter::FusedIterator;
use std::slice;

use crate::tree::Node;
use crate::Rope;

/// Iterator over the code points of a [`Rope`], created by [`Rope::chars`].
pub struct Chars<'a> {
    stack: Vec<&'a Node>,
    current: slice::Iter<'a, char>,
    remaining: usize,
}

impl<'a> Chars<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![root],
            current: Default::default(),
            remaining: root.len(),
        }
    }
}

impl Iterator for Chars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(&ch) = self.current.next() {
                self.remaining -= 1;
                return Some(ch);
            }
            match self.stack.pop()? {
                Node::Leaf(leaf) => self.current = leaf.data().iter(),
                Node::Internal(internal) => {
                    self.stack.push(&*internal.right);
                    self.stack.push(&*internal.left);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Chars<'_> {}

impl FusedIterator for Chars<'_> {}

/// Iterator over the lines of a [`Rope`], created by [`Rope::lines`].
///
/// Yields `newline_count() + 1` ropes, so text ending in a newline produces a
/// trailing empty line.
pub struct Lines<'a> {
    rope: &'a Rope,
    next: usize,
    count: usize,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(rope: &'a Rope) -> Self {
        Self {
            rope,
            next: 0,
            count: rope.newline_count() + 1,
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = Rope;

    fn next(&mut self) -> Option<Rope> {
        if self.next >= self.count {
            return None;
        }
        let line = self.rope.line(self.next);
        self.next += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Lines<'_> {}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Rope, MAX_LEAF_SIZE};

    #[test]
    fn chars_walks_every_leaf_in_order() {
        let rope = Rope::from_str("abc")
            .append(&Rope::from_str(&"d".repeat(MAX_LEAF_SIZE)))
            .append(&Rope::from_str("efg"));
        assert!(rope.depth() > 1);

        let chars = rope.chars();
        assert_eq!(chars.len(), MAX_LEAF_SIZE + 6);
        assert_eq!(
            chars.collect::<String>(),
            format!("abc{}efg", "d".repeat(MAX_LEAF_SIZE))
        );
    }

    #[test]
    fn chars_of_empty_rope() {
        assert_eq!(Rope::new().chars().next(), None);
    }

    #[test]
    fn lines_splits_on_newlines() {
        let rope = Rope::from_str("abc\ndef\n\nghi");
        let lines: Vec<String> = rope.lines().map(|line| line.to_string()).collect();
        assert_eq!(lines, ["abc", "def", "", "ghi"]);
    }

    #[test]
    fn lines_keeps_trailing_empty_line() {
        let rope = Rope::from_str("one\ntwo\n");
        assert_eq!(rope.lines().len(), 3);
        assert_eq!(rope.lines().last().map(|line| line.is_empty()), Some(true));
    }

    #[test]
    fn lines_across_leaves() {
        let rope = Rope::from_str(&"x".repeat(MAX_LEAF_SIZE))
            .append(&Rope::from_str("y\nz"));
        let lines: Vec<String> = rope.lines().map(|line| line.to_string()).collect();
        assert_eq!(
            lines,
            [format!("{}y", "x".repeat(MAX_LEAF_SIZE)), "z".to_string()]
        );
    }
}
