//! Plane representation and point classification.

use nalgebra::{Point3, Vector3};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies exactly on the plane
    OnPlane,
}

/// Classification of a triangle relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All vertices are in front of the plane
    Front,
    /// All vertices are behind the plane
    Back,
    /// All vertices are on the plane (coplanar)
    Coplanar,
    /// Vertices are on both sides (spans the plane)
    Spanning,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Collinear points are not rejected: the resulting normal and offset are
    /// NaN, and every distance measured against the plane is NaN as well.
    pub fn from_three_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a));
        let unit_normal = normal / normal.norm();
        Self {
            normal: unit_normal,
            offset: unit_normal.dot(&a.coords),
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Returns `true` if the normal and offset are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.normal.iter().all(|c| c.is_finite()) && self.offset.is_finite()
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    ///
    /// There is no tolerance: only points at a distance of exactly zero are
    /// `OnPlane`. A non-finite plane puts every point `OnPlane`.
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > 0.0 {
            PlaneSide::Front
        } else if dist < 0.0 {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Returns `true` if both planes describe the same surface, facing either way.
    ///
    /// Comparison is exact.
    pub fn is_same_surface(&self, other: &Plane3D) -> bool {
        self == other || *self == other.flipped()
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: Point3<f32>) -> Point3<f32> {
        point - self.normal * self.signed_distance(point)
    }

    /// Computes the intersection of the infinite line through `start` and `end`
    /// with the plane.
    ///
    /// Returns `None` if the line is parallel to the plane.
    pub fn intersect_line(&self, start: Point3<f32>, end: Point3<f32>) -> Option<Point3<f32>> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;
        Some(start + direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_normalizes_normal_and_offset() {
        let plane = Plane3D::new(Vector3::new(0.0, 2.0, 0.0), 4.0);
        assert_relative_eq!(plane.normal(), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(plane.offset(), 2.0);
    }

    #[test]
    #[should_panic(expected = "Plane normal cannot be zero")]
    fn new_rejects_zero_normal() {
        let _ = Plane3D::new(Vector3::zeros(), 1.0);
    }

    #[test]
    fn signed_distance_sign_follows_normal() {
        let plane = Plane3D::new(Vector3::new(1.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(3.0, 5.0, -2.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(-1.0, 0.0, 0.0)), -2.0);
        assert_eq!(plane.signed_distance(Point3::new(1.0, 7.0, 7.0)), 0.0);
    }

    #[test]
    fn from_three_points_right_hand_rule() {
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(plane.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(plane.offset(), 0.0);
        assert!(plane.is_finite());
    }

    #[test]
    fn from_three_points_collinear_is_not_finite() {
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(!plane.is_finite());
    }

    #[test]
    fn classify_point_has_no_tolerance() {
        let plane = Plane3D::new(Vector3::new(0.0, 0.0, 1.0), 0.0);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, 1e-7)), PlaneSide::Front);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, -1e-7)), PlaneSide::Back);
        assert_eq!(plane.classify_point(Point3::new(4.0, -2.0, 0.0)), PlaneSide::OnPlane);
    }

    #[test]
    fn same_surface_accepts_flipped() {
        let plane = Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 3.0);
        assert!(plane.is_same_surface(&plane.flipped()));
        assert!(!plane.is_same_surface(&Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 2.0)));
    }

    #[test]
    fn intersect_line_extends_past_endpoints() {
        let plane = Plane3D::new(Vector3::new(1.0, 0.0, 0.0), 0.0);
        let hit = plane
            .intersect_line(Point3::new(2.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0))
            .unwrap();
        assert_relative_eq!(hit, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn intersect_line_parallel_is_none() {
        let plane = Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert!(plane
            .intersect_line(Point3::new(0.0, 1.0, 0.0), Point3::new(5.0, 1.0, 0.0))
            .is_none());
    }
}
