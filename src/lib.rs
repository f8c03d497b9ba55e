//! An immutable, persistent rope over Unicode code points.
//!
//! A [`Rope`] is a binary tree whose leaves hold contiguous chunks of text. Every
//! operation that would change the text returns a new rope and shares every
//! untouched subtree with its operands, so old versions stay valid and cheap to keep.
//!
//! ```
//! use text_rope::Rope;
//!
//! let hello = Rope::from_str("Hello");
//! let greeting = hello.append(&Rope::from_str(" World")).append(&Rope::from_char('!'));
//!
//! assert_eq!(greeting.to_string(), "Hello World!");
//! assert_eq!(hello.to_string(), "Hello");
//!
//! let (left, right) = greeting.split(6);
//! assert_eq!(left.to_string(), "Hello ");
//! assert_eq!(right.to_string(), "World!");
//! ```
//!
//! Indices are code point offsets, never byte offsets. Out of range arguments are
//! clamped or answered with `None`; the tree operations themselves never fail.

mod iter;
mod rope;
mod tree;

pub use self::iter::{Chars, Lines};
pub use self::rope::Rope;
pub use self::tree::MAX_LEAF_SIZE;
