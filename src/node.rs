use core::fmt;




/**
 * Index of a node within the arena of the tree that owns it. A `NodeId` is
 * only meaningful together with that tree.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);




// ============================================================================
impl NodeId {

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "#{}", self.0)
    }
}




/**
 * A node in a binary tree. The `l` and `r` links own the child sub-trees (the
 * children live in the same arena, and are reachable only through these
 * links). The `p` link is a back-reference to the parent; it is never used to
 * reach a node for ownership purposes, only to walk upward during traversal.
 */
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    pub(crate) l: Option<NodeId>,
    pub(crate) r: Option<NodeId>,
    pub(crate) p: Option<NodeId>,
}




// ============================================================================
impl<T> Node<T> {

    pub(crate) fn new(value: T) -> Self {
        Self { value, l: None, r: None, p: None }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<NodeId> {
        self.l
    }

    pub fn right(&self) -> Option<NodeId> {
        self.r
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.p
    }

    pub fn is_leaf(&self) -> bool {
        self.l.is_none() && self.r.is_none()
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }
}
