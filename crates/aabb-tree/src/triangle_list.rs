//! Ordered triangle storage and id-based candidate lists.
//!
//! A [`TriangleList`] owns its triangles and hands out a [`TriangleId`] for
//! each one. Everything else (tree leaves, query results) refers to triangles
//! by id, so a triangle stored in two leaves is still one triangle.

use std::collections::HashSet;
use std::fmt;

use nalgebra::Point3;

use crate::{BoundingBox, BoundingSphere, Triangle};

/// Stable handle of a triangle inside a [`TriangleList`]: its insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(usize);

impl TriangleId {
    /// Creates an id from a raw index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered, append-only collection of triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleList {
    triangles: Vec<Triangle>,
}

impl TriangleList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Appends a triangle and returns its id.
    pub fn push(&mut self, triangle: Triangle) -> TriangleId {
        let id = TriangleId(self.triangles.len());
        self.triangles.push(triangle);
        id
    }

    /// Appends a triangle built from three vertices and returns its id.
    pub fn push_vertices(&mut self, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> TriangleId {
        self.push(Triangle::new(a, b, c))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the triangle with the given id, if it belongs to this list.
    #[inline]
    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.0)
    }

    /// Returns the first triangle, if any.
    #[inline]
    pub fn first(&self) -> Option<&Triangle> {
        self.triangles.first()
    }

    /// Iterates over the triangles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Iterates over `(id, triangle)` pairs in insertion order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> {
        self.triangles
            .iter()
            .enumerate()
            .map(|(i, t)| (TriangleId(i), t))
    }

    /// Iterates over all ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = TriangleId> + use<> {
        (0..self.triangles.len()).map(TriangleId)
    }

    /// Returns the triangles as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Box around every vertex of every triangle.
    ///
    /// An empty list yields a box collapsed to the origin.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices())
    }

    /// Box around every vertex of the given subset of triangles.
    ///
    /// Ids that do not belong to this list are ignored.
    pub fn bounding_box_of(&self, ids: &[TriangleId]) -> BoundingBox {
        BoundingBox::from_points(
            ids.iter()
                .filter_map(|id| self.get(*id))
                .flat_map(|t| t.vertices().iter().copied()),
        )
    }

    /// Sphere centred on the bounding box, with the half diagonal as radius.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_box().bounding_sphere()
    }

    fn vertices(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices().iter().copied())
    }
}

impl From<Vec<Triangle>> for TriangleList {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

impl From<&[Triangle]> for TriangleList {
    fn from(triangles: &[Triangle]) -> Self {
        Self {
            triangles: triangles.to_vec(),
        }
    }
}

impl FromIterator<Triangle> for TriangleList {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triangle> for TriangleList {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TriangleList {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

/// An ordered list of distinct triangle ids.
///
/// Used to collect query results: an id already present is not added again,
/// so a triangle shared by several leaves shows up once, at the position of
/// its first insertion.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    ids: Vec<TriangleId>,
    seen: HashSet<TriangleId>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` unless it is already present. Returns `true` if it was added.
    pub fn insert(&mut self, id: TriangleId) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Identity membership test.
    #[inline]
    pub fn contains(&self, id: TriangleId) -> bool {
        self.seen.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Removes every id, keeping the allocations.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.seen.clear();
    }

    /// Iterates over the ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.ids.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[TriangleId] {
        &self.ids
    }

    /// Consumes the list and returns the ids in insertion order.
    pub fn into_vec(self) -> Vec<TriangleId> {
        self.ids
    }
}

impl PartialEq for CandidateList {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Extend<TriangleId> for CandidateList {
    fn extend<I: IntoIterator<Item = TriangleId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<TriangleId> for CandidateList {
    fn from_iter<I: IntoIterator<Item = TriangleId>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into())
    }

    #[test]
    fn push_preserves_order_and_ids() {
        let mut list = TriangleList::new();
        let a = list.push(make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
        let b = list.push_vertices(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(b).unwrap().vertices()[0].z, 1.0);
        assert_eq!(list.first(), list.get(a));
        assert!(list.get(TriangleId::new(2)).is_none());
    }

    #[test]
    fn bounding_box_folds_all_vertices() {
        let list: TriangleList = vec![
            make_triangle([1.0, 1.0, 1.0], [2.0, 1.0, 1.0], [1.0, 2.0, 1.0]),
            make_triangle([-3.0, 0.0, 4.0], [0.0, 5.0, 0.0], [0.0, 0.0, -1.0]),
        ]
        .into();
        let bounds = list.bounding_box();
        assert_eq!(bounds.min(), Point3::new(-3.0, 0.0, -1.0));
        assert_eq!(bounds.max(), Point3::new(2.0, 5.0, 4.0));
    }

    #[test]
    fn bounding_box_of_subset() {
        let list: TriangleList = vec![
            make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            make_triangle([10.0, 10.0, 10.0], [11.0, 10.0, 10.0], [10.0, 11.0, 10.0]),
        ]
        .into();
        let bounds = list.bounding_box_of(&[TriangleId::new(1)]);
        assert_eq!(bounds.min(), Point3::new(10.0, 10.0, 10.0));
        assert_eq!(bounds.max(), Point3::new(11.0, 11.0, 10.0));
    }

    #[test]
    fn empty_list_bounds_collapse_to_origin() {
        let list = TriangleList::new();
        assert_eq!(list.bounding_box().min(), Point3::origin());
        assert_eq!(list.bounding_box().max(), Point3::origin());
        assert_eq!(list.bounding_sphere().radius(), 0.0);
    }

    #[test]
    fn bounding_sphere_wraps_box() {
        let list: TriangleList = vec![make_triangle([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 2.0])].into();
        let sphere = list.bounding_sphere();
        assert_relative_eq!(sphere.center(), Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(sphere.radius(), 3.0_f32.sqrt());
    }

    #[test]
    fn candidate_list_skips_duplicates() {
        let mut candidates = CandidateList::new();
        assert!(candidates.insert(TriangleId::new(3)));
        assert!(candidates.insert(TriangleId::new(1)));
        assert!(!candidates.insert(TriangleId::new(3)));

        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains(TriangleId::new(1)));
        assert!(!candidates.contains(TriangleId::new(2)));
        assert_eq!(
            candidates.as_slice(),
            &[TriangleId::new(3), TriangleId::new(1)]
        );
    }

    #[test]
    fn candidate_list_clear_resets_membership() {
        let mut candidates: CandidateList = [TriangleId::new(0), TriangleId::new(0)].into_iter().collect();
        assert_eq!(candidates.len(), 1);
        candidates.clear();
        assert!(candidates.is_empty());
        assert!(candidates.insert(TriangleId::new(0)));
    }
}
