use color_eyre::eyre::{Result, WrapErr};
use std::{
    fmt::{self, Write},
    fs::File,
    io::{self, Read},
    path::Path,
    sync::Arc,
};
use tracing::debug;

use crate::iter::{Chars, Lines};
use crate::tree::Node;

/// An immutable rope of Unicode code points.
///
/// Cloning is O(1) and shares the whole tree. Every method that produces a new
/// rope leaves `self` untouched and reuses its unmodified subtrees.
#[derive(Clone)]
pub struct Rope {
    root: Arc<Node>,
}

impl Rope {
    /// The empty rope.
    pub fn new() -> Self {
        Self { root: Node::empty() }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::from_root(Node::new_leaf(text.chars().collect())).balance()
    }

    pub fn from_char(ch: char) -> Self {
        Self::from_root(Node::new_leaf(vec![ch]))
    }

    /// Reads `reader` to exhaustion into a single leaf.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD. Any read error other than end of
    /// stream is returned unchanged.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let data: Vec<char> = String::from_utf8_lossy(&bytes).chars().collect();
        debug!(bytes = bytes.len(), chars = data.len(), "read rope from stream");
        Ok(Self::from_root(Node::new_leaf(data)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("Error opening file '{}'", path.display()))?;
        let rope = Self::from_reader(file)
            .wrap_err_with(|| format!("Error reading file '{}'", path.display()))?;

        debug!(path = %path.display(), chars = rope.len(), "loaded rope from file");
        Ok(rope)
    }

    pub(crate) fn from_root(root: Arc<Node>) -> Self {
        Self { root }
    }

    /// Number of code points.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The code point at `index`, or `None` past the end.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.root.char_at(index)
    }

    pub fn append(&self, other: &Rope) -> Rope {
        Self::from_root(self.root.append(&other.root))
    }

    pub fn prepend(&self, other: &Rope) -> Rope {
        Self::from_root(self.root.prepend(&other.root))
    }

    /// Splits into `[0, at)` and `[at, len)`. `at` is clamped to the length.
    pub fn split(&self, at: usize) -> (Rope, Rope) {
        let (left, right) = self.root.split(at);
        (Self::from_root(left), Self::from_root(right))
    }

    /// The code points in `[start, end)`, clamped to the rope. Empty when `start >= end`.
    pub fn sub(&self, start: usize, end: usize) -> Rope {
        Self::from_root(self.root.sub(start, end))
    }

    pub fn insert(&self, at: usize, text: &Rope) -> Rope {
        let (left, right) = self.split(at);
        left.append(text).append(&right)
    }

    /// Everything except `[start, end)`. An empty or inverted range returns an equal rope.
    pub fn remove(&self, start: usize, end: usize) -> Rope {
        let end = end.min(self.len());
        if start >= end {
            return self.clone();
        }
        let (left, rest) = self.split(start);
        let (_, right) = rest.split(end - start);
        left.append(&right)
    }

    /// Offset of the first occurrence of `ch`.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.root.index_of(ch)
    }

    /// Offset of the last occurrence of `ch`.
    pub fn last_index_of(&self, ch: char) -> Option<usize> {
        self.root.last_index_of(ch)
    }

    /// The zero-indexed line `n` without its newline. Empty past the last line.
    pub fn line(&self, n: usize) -> Rope {
        Self::from_root(self.root.line(n))
    }

    pub fn newline_count(&self) -> usize {
        self.root.newline_count()
    }

    pub fn lines(&self) -> Lines<'_> {
        Lines::new(self)
    }

    pub fn chars(&self) -> Chars<'_> {
        Chars::new(&self.root)
    }

    pub fn to_chars(&self) -> Vec<char> {
        self.root.to_chars()
    }

    /// Rebuilds the tree to near-minimal depth when it has grown too deep for its weight.
    pub fn balance(&self) -> Rope {
        Self::from_root(self.root.balance())
    }

    /// A leaf has depth 1.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl Default for Rope {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        Self::from_str(text)
    }
}

impl From<String> for Rope {
    fn from(text: String) -> Self {
        Self::from_str(&text)
    }
}

impl From<char> for Rope {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
            || (self.len() == other.len() && self.chars().eq(other.chars()))
    }
}

impl Eq for Rope {}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rope")
            .field("len", &self.len())
            .field("depth", &self.depth())
            .field("text", &self.to_string())
            .finish()
    }
}
