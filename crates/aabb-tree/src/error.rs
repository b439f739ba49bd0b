//! Error types.

/// Errors that can occur while building an [`AabbTree`](crate::aabb::AabbTree).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A node was asked to partition an empty set of triangles.
    #[error("cannot build a tree node from an empty triangle list")]
    EmptyTriangleList,
}
