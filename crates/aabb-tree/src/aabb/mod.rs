//! Axis-aligned bounding box tree over a triangle mesh.
//!
//! The tree recursively splits a mesh with axis-aligned planes so that the
//! triangles near a sphere can be found without testing the whole mesh.
//! It is the broad phase of sphere/mesh collision:
//!
//! - [`AabbTree::query`] returns candidate triangles for a sphere
//! - [`AabbTree::collisions`] narrows them with the exact sphere/triangle test
//! - [`AabbTree::walk`] visits every node, e.g. to draw the boxes
//!
//! # Example
//!
//! ```ignore
//! use aabb_tree::{AabbTree, BoundingSphere, BuildPolicy, TriangleList};
//! use nalgebra::Point3;
//!
//! let mesh: TriangleList = /* load triangles */;
//! let tree = AabbTree::build(mesh, BuildPolicy::default())?;
//!
//! let player = BoundingSphere::new(Point3::new(0.0, 1.0, 0.0), 1.5);
//! for hit in tree.collisions(&player) {
//!     println!("touching {} on {:?}", hit.id, hit.plane);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`AabbTree`]: owns the triangles, the root node and build statistics
//! - [`AabbNode`]: a box with its triangle ids, and an optional split
//! - [`AxisSelector`]: strategy trait for choosing the split axis
//! - [`AabbVisitor`]: visitor trait for custom traversal behavior

mod node;
mod policy;
mod selector;
mod tree;
mod visitor;

pub use node::AabbNode;
pub use policy::{BuildPolicy, UndersizedChildren};
pub use selector::{AxisSelector, BestAxis, LongestAxis, SplitAxis};
pub use tree::{AabbTree, Collision};
pub use visitor::{AabbVisitor, CollectingVisitor, FnVisitor};
