//! AABB tree container, construction and sphere queries.

use nalgebra::Point3;

use crate::collision::{sphere_intersects_box, sphere_intersects_plane, sphere_triangle_collision};
use crate::{
    BoundingBox, BoundingSphere, BuildError, CandidateList, Classification, Plane3D, Triangle,
    TriangleId, TriangleList,
};

use super::node::AabbNode;
use super::policy::{BuildCursor, BuildPolicy, UndersizedChildren};
use super::selector::AxisSelector;
use super::visitor::AabbVisitor;

/// A triangle touched by a query sphere, with the plane to slide along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub id: TriangleId,
    pub plane: Plane3D,
}

/// A bounding-volume hierarchy over a triangle mesh.
///
/// Each node splits its triangles with an axis-aligned plane through the
/// mean of their centres. Triangles touching or crossing the plane go to
/// both children, so the leaves reached by a query always include every
/// triangle the query sphere can collide with.
///
/// # Construction
///
/// ```ignore
/// use aabb_tree::{AabbTree, BuildPolicy, TriangleList};
///
/// let mesh: TriangleList = /* ... */;
/// let tree = AabbTree::build(mesh, BuildPolicy::default().with_min_leaf_triangles(4))?;
/// ```
///
/// # Queries
///
/// [`query`](Self::query) returns candidate triangle ids near a sphere.
/// [`collisions`](Self::collisions) additionally runs the exact
/// sphere/triangle test on each candidate.
#[derive(Debug, Clone)]
pub struct AabbTree {
    triangles: TriangleList,
    root: AabbNode,
    policy: BuildPolicy,
    depth: usize,
    node_count: usize,
}

/// Counters shared by every recursive build call.
#[derive(Debug, Default)]
struct BuildStats {
    max_depth: usize,
    child_count: usize,
}

impl AabbTree {
    /// Builds a tree over `triangles`.
    ///
    /// The tree keeps its own copy of the triangles; ids returned by queries
    /// index into [`triangles`](Self::triangles).
    ///
    /// Returns [`BuildError::EmptyTriangleList`] if there are no triangles.
    pub fn build(triangles: impl Into<TriangleList>, policy: BuildPolicy) -> Result<Self, BuildError> {
        let triangles = triangles.into();
        let mut stats = BuildStats::default();

        let root = build_node(
            &triangles,
            triangles.ids().collect(),
            triangles.bounding_box(),
            &policy,
            BuildCursor::root(),
            &mut stats,
        )?;

        log::debug!(
            "built AABB tree: {} triangles, {} nodes, depth {}",
            triangles.len(),
            stats.child_count + 1,
            stats.max_depth
        );

        Ok(Self {
            triangles,
            root,
            policy,
            depth: stats.max_depth,
            node_count: stats.child_count + 1,
        })
    }

    /// Builds a tree with the default policy: unlimited depth, no minimum
    /// leaf size.
    pub fn from_triangles(triangles: impl Into<TriangleList>) -> Result<Self, BuildError> {
        Self::build(triangles, BuildPolicy::default())
    }

    #[inline]
    pub fn root(&self) -> &AabbNode {
        &self.root
    }

    /// The triangles the tree was built over.
    #[inline]
    pub fn triangles(&self) -> &TriangleList {
        &self.triangles
    }

    /// Looks up a triangle by id.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    #[inline]
    pub fn policy(&self) -> &BuildPolicy {
        &self.policy
    }

    /// Deepest level reached below the root during the build (0 if the root
    /// is a leaf).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Bounding box of the whole mesh.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        self.root.bounds()
    }

    /// Collects the ids of triangles that may collide with `sphere`.
    ///
    /// Every triangle for which
    /// [`sphere_triangle_collision`](crate::collision::sphere_triangle_collision)
    /// succeeds is included, unless it was only stored in children dropped by
    /// [`UndersizedChildren::Drop`]. Each id appears once.
    pub fn query(&self, sphere: &BoundingSphere) -> CandidateList {
        let mut candidates = CandidateList::new();
        self.query_into(sphere, &mut candidates);
        candidates
    }

    /// Like [`query`](Self::query), appending to an existing list. Ids
    /// already in `candidates` are not added again.
    pub fn query_into(&self, sphere: &BoundingSphere, candidates: &mut CandidateList) {
        query_node(&self.root, sphere.center(), sphere.radius(), candidates);
    }

    /// Runs the exact sphere/triangle test on every candidate of
    /// [`query`](Self::query), in candidate order.
    pub fn collisions(&self, sphere: &BoundingSphere) -> Vec<Collision> {
        self.query(sphere)
            .iter()
            .filter_map(|id| {
                let triangle = self.triangles.get(id)?;
                let plane = sphere_triangle_collision(sphere.center(), sphere.radius(), triangle)?;
                Some(Collision { id, plane })
            })
            .collect()
    }

    /// Visits every node in pre-order.
    pub fn walk<V: AabbVisitor>(&self, visitor: &mut V) {
        walk_node(&self.root, 0, visitor);
    }
}

/// Recursively builds a node over `ids`, whose triangles fit in `bounds`.
fn build_node(
    triangles: &TriangleList,
    ids: Vec<TriangleId>,
    bounds: BoundingBox,
    policy: &BuildPolicy,
    cursor: BuildCursor,
    stats: &mut BuildStats,
) -> Result<AabbNode, BuildError> {
    if ids.is_empty() {
        return Err(BuildError::EmptyTriangleList);
    }

    let centers: Vec<Point3<f32>> = ids
        .iter()
        .filter_map(|id| triangles.get(*id))
        .map(Triangle::center)
        .collect();
    let axis = policy.split_axis.select(&bounds, &centers);
    let plane = bounds.splitting_plane(axis, mean(&centers));

    // Exact classification: anything touching the plane goes to both sides.
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &id in &ids {
        let Some(triangle) = triangles.get(id) else {
            continue;
        };
        match triangle.classify(&plane) {
            Classification::Back => left.push(id),
            Classification::Front => right.push(id),
            Classification::Coplanar | Classification::Spanning => {
                left.push(id);
                right.push(id);
            }
        }
    }

    if cursor.at_depth_limit(policy.max_depth)
        || left.is_empty()
        || right.is_empty()
        || left.len() == ids.len()
        || right.len() == ids.len()
    {
        log::trace!(
            "leaf at depth {} with {} triangles ({} left, {} right)",
            cursor.depth,
            ids.len(),
            left.len(),
            right.len()
        );
        return Ok(AabbNode::leaf(ids, bounds));
    }

    log::trace!(
        "splitting {} triangles along {:?} at depth {}: {} left, {} right",
        ids.len(),
        axis,
        cursor.depth,
        left.len(),
        right.len()
    );

    let child = cursor.descend();
    stats.max_depth = stats.max_depth.max(child.depth);

    let left = build_child(triangles, left, policy, child, stats)?;
    let right = build_child(triangles, right, policy, child, stats)?;

    Ok(AabbNode::split(ids, bounds, plane, left, right))
}

/// Builds one side of a split, honouring the minimum leaf size.
fn build_child(
    triangles: &TriangleList,
    ids: Vec<TriangleId>,
    policy: &BuildPolicy,
    cursor: BuildCursor,
    stats: &mut BuildStats,
) -> Result<Option<Box<AabbNode>>, BuildError> {
    let bounds = triangles.bounding_box_of(&ids);

    if ids.len() < policy.min_leaf_triangles {
        match policy.undersized_children {
            UndersizedChildren::Drop => {
                log::trace!("dropping child with {} triangles", ids.len());
                return Ok(None);
            }
            UndersizedChildren::KeepAsLeaf => {
                stats.child_count += 1;
                return Ok(Some(Box::new(AabbNode::leaf(ids, bounds))));
            }
        }
    }

    stats.child_count += 1;
    let node = build_node(triangles, ids, bounds, policy, cursor, stats)?;
    Ok(Some(Box::new(node)))
}

/// Mean of a non-empty set of points.
fn mean(points: &[Point3<f32>]) -> Point3<f32> {
    let sum = points.iter().fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len().max(1) as f32)
}

fn query_node(node: &AabbNode, center: Point3<f32>, radius: f32, candidates: &mut CandidateList) {
    if !sphere_intersects_box(center, radius, node.bounds()) {
        return;
    }

    let Some(plane) = node.splitting_plane() else {
        candidates.extend(node.triangles().iter().copied());
        return;
    };

    let distance = plane.signed_distance(center);
    let visit_left;
    let visit_right;
    if sphere_intersects_plane(center, radius, plane) || distance == 0.0 {
        visit_left = true;
        visit_right = true;
    } else {
        visit_left = distance < 0.0;
        visit_right = !visit_left;
    }

    if visit_left {
        if let Some(left) = node.left() {
            query_node(left, center, radius, candidates);
        }
    }
    if visit_right {
        if let Some(right) = node.right() {
            query_node(right, center, radius, candidates);
        }
    }
}

fn walk_node<V: AabbVisitor>(node: &AabbNode, depth: usize, visitor: &mut V) {
    visitor.visit(node, depth);
    if let Some(left) = node.left() {
        walk_node(left, depth + 1, visitor);
    }
    if let Some(right) = node.right() {
        walk_node(right, depth + 1, visitor);
    }
}
