//! Bitree is a binary tree whose nodes know their parent as well as their
//! children, together with a restartable in-order cursor. The cursor finds
//! each in-order successor by walking the tree's own links, so it needs no
//! recursion and no stack: a full traversal allocates nothing and follows
//! each link at most twice.
//!
//! Trees are assembled bottom-up with a `TreeBuilder` (leaves first, then
//! internal nodes from existing handles) and frozen into an immutable
//! `BinaryTree`. Nodes live in a flat arena owned by the tree; parent links
//! are plain indexes and never own anything.

pub mod cursor;
pub mod error;
pub mod node;
pub mod tree;

pub use cursor::{CursorState, InOrderCursor};
pub use error::Error;
pub use node::{Node, NodeId};
pub use tree::{BinaryTree, Shape, TreeBuilder};
