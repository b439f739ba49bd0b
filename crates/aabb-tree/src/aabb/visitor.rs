//! Visitor pattern for AABB tree traversal.
//!
//! Visitors see every node of the tree in pre-order (node, left subtree,
//! right subtree) together with the node's depth below the root.

use crate::TriangleId;

use super::node::AabbNode;

/// Visitor for processing nodes during [`AabbTree::walk`](super::AabbTree::walk).
pub trait AabbVisitor {
    /// Called once per node. The root has depth 0.
    fn visit(&mut self, node: &AabbNode, depth: usize);
}

/// Collects the triangle ids of every leaf, in visiting order.
///
/// Ids shared by several leaves are collected once per leaf.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<TriangleId>,
    leaves: usize,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaves visited so far.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn ids(&self) -> &[TriangleId] {
        &self.collected
    }

    pub fn into_ids(self) -> Vec<TriangleId> {
        self.collected
    }
}

impl AabbVisitor for CollectingVisitor {
    fn visit(&mut self, node: &AabbNode, _depth: usize) {
        if node.is_leaf() {
            self.leaves += 1;
            self.collected.extend_from_slice(node.triangles());
        }
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F>
where
    F: FnMut(&AabbNode, usize),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&AabbNode, usize),
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> AabbVisitor for FnVisitor<F>
where
    F: FnMut(&AabbNode, usize),
{
    fn visit(&mut self, node: &AabbNode, depth: usize) {
        (self.func)(node, depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingBox;

    #[test]
    fn collecting_visitor_empty() {
        let visitor = CollectingVisitor::new();
        assert!(visitor.ids().is_empty());
        assert_eq!(visitor.leaf_count(), 0);
    }

    #[test]
    fn collecting_visitor_only_takes_leaves() {
        let mut visitor = CollectingVisitor::new();
        let leaf = AabbNode::leaf(vec![TriangleId::new(2), TriangleId::new(5)], BoundingBox::default());
        let inner = AabbNode::split(
            vec![TriangleId::new(9)],
            BoundingBox::default(),
            crate::Plane3D::new(nalgebra::Vector3::x(), 0.0),
            None,
            None,
        );

        visitor.visit(&inner, 0);
        visitor.visit(&leaf, 1);

        assert_eq!(visitor.leaf_count(), 1);
        assert_eq!(visitor.into_ids(), vec![TriangleId::new(2), TriangleId::new(5)]);
    }

    #[test]
    fn fn_visitor_calls_closure() {
        let mut deepest = 0;
        {
            let mut visitor = FnVisitor::new(|_: &AabbNode, depth| deepest = deepest.max(depth));
            let leaf = AabbNode::leaf(vec![], BoundingBox::default());
            visitor.visit(&leaf, 3);
            visitor.visit(&leaf, 1);
        }
        assert_eq!(deepest, 3);
    }
}
