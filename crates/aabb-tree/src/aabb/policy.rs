//! Build parameters for AABB tree construction.

use serde::{Deserialize, Serialize};

use super::selector::SplitAxis;

/// What to do with a child whose triangle count is below
/// [`BuildPolicy::min_leaf_triangles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UndersizedChildren {
    /// Store the child as a leaf without splitting it further.
    #[default]
    KeepAsLeaf,
    /// Discard the child. Its triangles are only reachable through other
    /// leaves that share them, so queries may miss them.
    Drop,
}

/// Limits and strategy used while building an [`AabbTree`](super::AabbTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildPolicy {
    /// Maximum number of node levels, counting the root. `None` is unlimited.
    pub max_depth: Option<usize>,
    /// Children holding fewer triangles than this are handled per
    /// `undersized_children`.
    pub min_leaf_triangles: usize,
    pub split_axis: SplitAxis,
    pub undersized_children: UndersizedChildren,
}

impl BuildPolicy {
    /// Unlimited depth, no minimum leaf size, longest-axis splits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_min_leaf_triangles(mut self, min_leaf_triangles: usize) -> Self {
        self.min_leaf_triangles = min_leaf_triangles;
        self
    }

    pub fn with_split_axis(mut self, split_axis: SplitAxis) -> Self {
        self.split_axis = split_axis;
        self
    }

    pub fn with_undersized_children(mut self, undersized_children: UndersizedChildren) -> Self {
        self.undersized_children = undersized_children;
        self
    }
}

/// Position of a node being built. Handed by value to each recursive call,
/// so siblings start from the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BuildCursor {
    pub depth: usize,
}

impl BuildCursor {
    /// Cursor of the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Cursor of a child of the current node.
    #[must_use]
    pub fn descend(self) -> Self {
        Self {
            depth: self.depth + 1,
        }
    }

    /// Returns `true` if a node at this cursor may not have children.
    pub fn at_depth_limit(self, max_depth: Option<usize>) -> bool {
        max_depth.is_some_and(|max| self.depth + 1 >= max)
    }
}
