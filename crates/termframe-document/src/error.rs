#![forbid(unsafe_code)]

//! Tree-misuse errors (spec "Error taxonomy").
//!
//! These are programmer errors — malformed calls against the tree's
//! invariants — rather than anything a caller is expected to recover from
//! at runtime. They are raised as a single error kind, matching the source.

use std::error::Error;
use std::fmt;

/// A violation of one of the document tree's structural invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    /// `attach`/`detach` called against a leaf variant (Text, Newline, Tab),
    /// which never carries children.
    AttachToLeaf,
    /// The node being attached already has a parent. Double-parenting is
    /// forbidden; the caller must detach it first.
    AlreadyAttached,
    /// `detach` was asked for a node or index that is not actually a child
    /// of the receiver.
    NotAChild,
    /// `detach` was called with both or neither of `child`/`index`.
    AmbiguousDetachArgs,
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttachToLeaf => write!(f, "cannot attach or detach children of a leaf node"),
            Self::AlreadyAttached => write!(f, "node is already attached to a parent"),
            Self::NotAChild => write!(f, "node or index is not a child of this node"),
            Self::AmbiguousDetachArgs => {
                write!(f, "detach requires exactly one of `child` or `index`")
            }
        }
    }
}

impl Error for NodeError {}
