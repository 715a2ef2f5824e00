use std::error;
use std::fmt;
use crate::cursor::CursorState;
use crate::node::NodeId;




/**
 * Error to represent misuse of node handles during tree construction, or a
 * cursor being read when it does not denote a node.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidState(CursorState),
    UnknownNode(NodeId),
    AlreadyAttached(NodeId),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            InvalidState(state) => write!(fmt, "cursor has no value in state {:?}", state),
            UnknownNode(id) => write!(fmt, "node {} does not belong to this tree", id),
            AlreadyAttached(id) => write!(fmt, "node {} already has a parent", id),
        }
    }
}

impl error::Error for Error {}
