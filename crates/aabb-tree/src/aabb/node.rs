//! AABB tree node implementation.

use crate::{BoundingBox, Plane3D, TriangleId};

/// A node in the AABB tree.
///
/// Every node keeps the ids of all triangles inside its box, internal nodes
/// included. Triangles that touch or cross the splitting plane belong to both
/// children, so a triangle id may appear in several leaves.
#[derive(Debug, Clone)]
pub struct AabbNode {
    triangles: Vec<TriangleId>,
    bounds: BoundingBox,

    /// `None` for leaves.
    splitting_plane: Option<Plane3D>,

    /// Subtree on the negative side of the splitting plane.
    left: Option<Box<AabbNode>>,

    /// Subtree on the positive side of the splitting plane.
    right: Option<Box<AabbNode>>,
}

impl AabbNode {
    /// Creates a leaf node.
    pub fn leaf(triangles: Vec<TriangleId>, bounds: BoundingBox) -> Self {
        Self {
            triangles,
            bounds,
            splitting_plane: None,
            left: None,
            right: None,
        }
    }

    /// Creates an internal node. Either child may be missing if it was
    /// discarded during the build.
    pub fn split(
        triangles: Vec<TriangleId>,
        bounds: BoundingBox,
        splitting_plane: Plane3D,
        left: Option<Box<AabbNode>>,
        right: Option<Box<AabbNode>>,
    ) -> Self {
        Self {
            triangles,
            bounds,
            splitting_plane: Some(splitting_plane),
            left,
            right,
        }
    }

    /// Ids of every triangle inside this node's box.
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    #[inline]
    pub fn splitting_plane(&self) -> Option<&Plane3D> {
        self.splitting_plane.as_ref()
    }

    #[inline]
    pub fn left(&self) -> Option<&AabbNode> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&AabbNode> {
        self.right.as_deref()
    }

    /// Returns `true` if this node was not split.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.splitting_plane.is_none()
    }

    /// Number of edges on the longest path down to a descendant (0 for a leaf).
    pub fn height(&self) -> usize {
        let left = self.left().map_or(0, |n| n.height() + 1);
        let right = self.right().map_or(0, |n| n.height() + 1);
        left.max(right)
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.left().map_or(0, |n| n.node_count()) + self.right().map_or(0, |n| n.node_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn leaf_has_no_plane_or_children() {
        let node = AabbNode::leaf(vec![TriangleId::new(0)], unit_box());
        assert!(node.is_leaf());
        assert!(node.splitting_plane().is_none());
        assert!(node.left().is_none() && node.right().is_none());
        assert_eq!(node.height(), 0);
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn split_node_counts_children() {
        let plane = Plane3D::new(Vector3::new(1.0, 0.0, 0.0), 0.5);
        let left = AabbNode::leaf(vec![TriangleId::new(0)], unit_box());
        let right = AabbNode::leaf(vec![TriangleId::new(1)], unit_box());
        let node = AabbNode::split(
            vec![TriangleId::new(0), TriangleId::new(1)],
            unit_box(),
            plane,
            Some(Box::new(left)),
            Some(Box::new(right)),
        );

        assert!(!node.is_leaf());
        assert_eq!(node.splitting_plane(), Some(&plane));
        assert_eq!(node.triangles().len(), 2);
        assert_eq!(node.height(), 1);
        assert_eq!(node.node_count(), 3);
    }

    #[test]
    fn split_node_without_children_is_not_a_leaf() {
        let plane = Plane3D::new(Vector3::new(0.0, 0.0, 1.0), 0.0);
        let node = AabbNode::split(vec![TriangleId::new(0)], unit_box(), plane, None, None);
        assert!(!node.is_leaf());
        assert_eq!(node.node_count(), 1);
    }
}
