//! Identifier and label newtypes shared by every module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque node identifier, assigned and owned by the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Categorical label attached to a node.
///
/// [`ClassValue::UNKNOWN`] marks a node whose attribute is missing. Such
/// nodes are expected to be pruned before any metric runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassValue(pub i32);

impl ClassValue {
    /// Sentinel for "attribute unknown".
    pub const UNKNOWN: Self = Self(-1);

    /// Return `true` if this is the unknown sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }
}

impl fmt::Display for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ClassValue {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}
