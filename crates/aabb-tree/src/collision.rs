//! Sphere, box, plane and triangle intersection tests.
//!
//! All functions are pure. Degenerate input (zero-area triangles,
//! zero-length segments) never panics; the results for such input are
//! documented per function.

use nalgebra::Point3;

use crate::{BoundingBox, Plane3D, Triangle};

/// Angle sum, in radians, at or above which a point counts as inside a
/// triangle in [`is_point_in_triangle`].
///
/// Slightly below 2π to absorb rounding. The slack also accepts points lying
/// a little outside the triangle's edges.
pub const POINT_IN_TRIANGLE_ANGLE_SUM: f32 = 6.28;

/// Tests whether `point`, assumed to lie on the triangle's plane, is inside
/// the triangle.
///
/// Sums the angles between the unit vectors from `point` to each pair of
/// vertices; inside points see a full turn. Returns `false` for a degenerate
/// triangle and for a point that coincides with a vertex.
pub fn is_point_in_triangle(point: Point3<f32>, triangle: &Triangle) -> bool {
    if triangle.is_degenerate() {
        return false;
    }

    let [a, b, c] = triangle.vertices();
    let (Some(to_a), Some(to_b), Some(to_c)) = (
        (a - point).try_normalize(0.0),
        (b - point).try_normalize(0.0),
        (c - point).try_normalize(0.0),
    ) else {
        return false;
    };

    let angle = |u: f32| u.clamp(-1.0, 1.0).acos();
    let sum = angle(to_a.dot(&to_b)) + angle(to_b.dot(&to_c)) + angle(to_c.dot(&to_a));

    sum >= POINT_IN_TRIANGLE_ANGLE_SUM
}

/// Returns `true` if `point` is inside the sphere or on its surface.
#[inline]
pub fn is_point_in_sphere(point: Point3<f32>, center: Point3<f32>, radius: f32) -> bool {
    nalgebra::distance(&point, &center) <= radius
}

/// Returns `true` if the sphere touches or crosses the plane.
///
/// The sphere's centre and its surface point nearest to the plane are
/// compared: they must lie on opposite sides, or one of them exactly on the
/// plane.
pub fn sphere_intersects_plane(center: Point3<f32>, radius: f32, plane: &Plane3D) -> bool {
    let probe = SurfaceProbe::new(center, radius, plane);
    probe.straddles()
}

/// Returns `true` if the two spheres touch or overlap.
#[inline]
pub fn sphere_intersects_sphere(
    center_a: Point3<f32>,
    radius_a: f32,
    center_b: Point3<f32>,
    radius_b: f32,
) -> bool {
    nalgebra::distance(&center_a, &center_b) <= radius_a + radius_b
}

/// Fast, conservative sphere/box overlap test.
///
/// Compares the distance between the sphere centre and the box centre with
/// the box's half diagonal plus the sphere radius. Never reports a miss for a
/// sphere that overlaps the box, but accepts spheres that only come near it,
/// typically beside a long, thin box.
pub fn sphere_intersects_box(center: Point3<f32>, radius: f32, bounds: &BoundingBox) -> bool {
    let reach = bounds.half_extents().norm() + radius;
    nalgebra::distance(&center, &bounds.center()) <= reach
}

/// Closest point to `point` on the segment `start`..`end`.
///
/// A zero-length segment yields `start`.
pub fn closest_point_on_segment(
    start: Point3<f32>,
    end: Point3<f32>,
    point: Point3<f32>,
) -> Point3<f32> {
    let segment = end - start;
    let length = segment.norm();
    let Some(direction) = segment.try_normalize(0.0) else {
        return start;
    };

    let t = direction.dot(&(point - start));
    if t < 0.0 {
        return start;
    }
    if t > length {
        return end;
    }
    start + direction * t
}

/// Closest point to `point` on the boundary of the triangle.
///
/// Checks the edges AB, BC and CA in that order. BC replaces AB only when
/// strictly closer, and CA replaces the current best only when strictly
/// closer.
pub fn closest_point_on_triangle(point: Point3<f32>, triangle: &Triangle) -> Point3<f32> {
    let [ab, bc, ca] = triangle.edges();
    let mut best = closest_point_on_segment(ab.0, ab.1, point);
    let mut best_distance = nalgebra::distance(&point, &best);

    for (start, end) in [bc, ca] {
        let candidate = closest_point_on_segment(start, end, point);
        let distance = nalgebra::distance(&point, &candidate);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    best
}

/// Exact sphere/triangle collision test.
///
/// Returns the triangle's plane, to be used as the sliding plane, when the
/// sphere touches the triangle:
/// 1. the sphere must reach the triangle's plane;
/// 2. the point where it crosses the plane lies inside the triangle, or
/// 3. the closest point of the triangle's boundary to that crossing point
///    lies inside the sphere.
///
/// A degenerate triangle never collides.
pub fn sphere_triangle_collision(
    center: Point3<f32>,
    radius: f32,
    triangle: &Triangle,
) -> Option<Plane3D> {
    let plane = triangle.plane();
    let probe = SurfaceProbe::new(center, radius, &plane);
    if !probe.straddles() {
        return None;
    }

    let on_plane = if probe.center_distance == 0.0 {
        center
    } else if probe.surface_distance == 0.0 {
        probe.surface
    } else {
        plane.intersect_line(center, probe.surface)?
    };

    if is_point_in_triangle(on_plane, triangle) {
        return Some(plane);
    }

    let on_boundary = closest_point_on_triangle(on_plane, triangle);
    is_point_in_sphere(on_boundary, center, radius).then_some(plane)
}

/// A sphere's centre and its surface point nearest to a plane, with their
/// signed distances to that plane.
#[derive(Debug, Clone, Copy)]
struct SurfaceProbe {
    center_distance: f32,
    surface: Point3<f32>,
    surface_distance: f32,
}

impl SurfaceProbe {
    fn new(center: Point3<f32>, radius: f32, plane: &Plane3D) -> Self {
        let center_distance = plane.signed_distance(center);
        let toward_plane = if center_distance < 0.0 {
            plane.normal()
        } else {
            -plane.normal()
        };
        let surface = center + toward_plane * radius;

        Self {
            center_distance,
            surface,
            surface_distance: plane.signed_distance(surface),
        }
    }

    fn straddles(&self) -> bool {
        let (a, b) = (self.center_distance, self.surface_distance);
        (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into())
    }

    fn floor() -> Triangle {
        // Lies on z = 0, normal +Z.
        make_triangle([0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 4.0, 0.0])
    }

    #[test]
    fn centroid_is_inside_triangle() {
        let tri = floor();
        assert!(is_point_in_triangle(tri.center(), &tri));
    }

    #[test]
    fn far_point_on_plane_is_outside() {
        let tri = floor();
        assert!(!is_point_in_triangle(Point3::new(104.0, 0.0, 0.0), &tri));
        assert!(!is_point_in_triangle(Point3::new(-100.0, -100.0, 0.0), &tri));
    }

    #[test]
    fn point_on_edge_is_inside() {
        let tri = floor();
        assert!(is_point_in_triangle(Point3::new(2.0, 0.0, 0.0), &tri));
    }

    #[test]
    fn point_at_vertex_is_not_inside() {
        let tri = floor();
        assert!(!is_point_in_triangle(Point3::new(4.0, 0.0, 0.0), &tri));
    }

    #[test]
    fn angle_sum_threshold_is_just_below_full_turn() {
        assert_eq!(POINT_IN_TRIANGLE_ANGLE_SUM, 6.28);
        assert!(POINT_IN_TRIANGLE_ANGLE_SUM < std::f32::consts::TAU);
        assert!(std::f32::consts::TAU - POINT_IN_TRIANGLE_ANGLE_SUM < 0.01);
    }

    #[test]
    fn degenerate_triangle_contains_nothing() {
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!(!is_point_in_triangle(Point3::new(0.5, 0.0, 0.0), &tri));
        assert!(sphere_triangle_collision(Point3::new(0.5, 0.0, 0.0), 1.0, &tri).is_none());
    }

    #[test]
    fn point_in_sphere_includes_surface() {
        let center = Point3::new(1.0, 1.0, 1.0);
        assert!(is_point_in_sphere(Point3::new(1.0, 1.0, 3.0), center, 2.0));
        assert!(!is_point_in_sphere(Point3::new(1.0, 1.0, 3.1), center, 2.0));
    }

    #[test]
    fn sphere_plane_both_sides() {
        let plane = Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        // Centre behind, reaching across.
        assert!(sphere_intersects_plane(Point3::new(0.0, -0.5, 0.0), 1.0, &plane));
        // Centre in front, reaching across.
        assert!(sphere_intersects_plane(Point3::new(0.0, 0.5, 0.0), 1.0, &plane));
        // Too far on either side.
        assert!(!sphere_intersects_plane(Point3::new(0.0, 2.0, 0.0), 1.0, &plane));
        assert!(!sphere_intersects_plane(Point3::new(0.0, -2.0, 0.0), 1.0, &plane));
    }

    #[test]
    fn sphere_plane_touching_and_centered() {
        let plane = Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert!(sphere_intersects_plane(Point3::new(0.0, 1.0, 0.0), 1.0, &plane));
        assert!(sphere_intersects_plane(Point3::new(3.0, 0.0, 3.0), 0.0, &plane));
        assert!(!sphere_intersects_plane(Point3::new(0.0, 0.5, 0.0), 0.0, &plane));
    }

    #[test]
    fn sphere_sphere() {
        let a = Point3::new(0.0, 0.0, 0.0);
        assert!(sphere_intersects_sphere(a, 1.0, Point3::new(3.0, 0.0, 0.0), 2.0));
        assert!(!sphere_intersects_sphere(a, 1.0, Point3::new(3.1, 0.0, 0.0), 2.0));
    }

    #[test]
    fn sphere_box_accepts_overlap_near_corner() {
        let bounds = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        // 0.707 from the box corner edge, radius 0.8: a real overlap.
        assert!(sphere_intersects_box(Point3::new(1.5, 1.5, 0.0), 0.8, &bounds));
    }

    #[test]
    fn sphere_box_rejects_far_sphere() {
        let bounds = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(!sphere_intersects_box(Point3::new(5.0, 0.0, 0.0), 1.0, &bounds));
    }

    #[test]
    fn closest_point_on_segment_clamps() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(10.0, 0.0, 0.0);
        assert_eq!(closest_point_on_segment(start, end, Point3::new(-5.0, 3.0, 0.0)), start);
        assert_eq!(closest_point_on_segment(start, end, Point3::new(15.0, 3.0, 0.0)), end);
        assert_relative_eq!(
            closest_point_on_segment(start, end, Point3::new(4.0, 3.0, -2.0)),
            Point3::new(4.0, 0.0, 0.0)
        );
    }

    #[test]
    fn closest_point_on_zero_length_segment_is_start() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(closest_point_on_segment(p, p, Point3::origin()), p);
    }

    #[test]
    fn closest_point_on_triangle_picks_nearest_edge() {
        let tri = floor();
        assert_relative_eq!(
            closest_point_on_triangle(Point3::new(1.0, -3.0, 0.0), &tri),
            Point3::new(1.0, 0.0, 0.0)
        );
        assert_relative_eq!(
            closest_point_on_triangle(Point3::new(-2.0, 1.0, 0.0), &tri),
            Point3::new(0.0, 1.0, 0.0)
        );
        assert_relative_eq!(
            closest_point_on_triangle(Point3::new(3.0, 3.0, 0.0), &tri),
            Point3::new(2.0, 2.0, 0.0)
        );
    }

    #[test]
    fn closest_point_on_triangle_tie_keeps_ab() {
        let tri = floor();
        // Equidistant from AB (y = 0) and CA (x = 0): AB is checked first and wins.
        let p = Point3::new(1.0, 1.0, 0.0);
        let from_ab = closest_point_on_segment(tri.vertices()[0], tri.vertices()[1], p);
        assert_eq!(closest_point_on_triangle(p, &tri), from_ab);
    }

    #[test]
    fn sphere_resting_on_face_collides() {
        let tri = floor();
        let plane = sphere_triangle_collision(Point3::new(1.0, 1.0, 0.5), 1.0, &tri)
            .expect("sphere overlaps the face");
        assert_eq!(plane, tri.plane());
    }

    #[test]
    fn sphere_below_face_collides() {
        let tri = floor();
        assert!(sphere_triangle_collision(Point3::new(1.0, 1.0, -0.5), 1.0, &tri).is_some());
    }

    #[test]
    fn sphere_above_face_misses() {
        let tri = floor();
        assert!(sphere_triangle_collision(Point3::new(1.0, 1.0, 1.5), 1.0, &tri).is_none());
    }

    #[test]
    fn sphere_near_edge_collides_through_boundary() {
        let tri = floor();
        // Crossing point (-0.5, 1, 0) is outside; the edge point (0, 1, 0) is 0.54 away.
        assert!(sphere_triangle_collision(Point3::new(-0.5, 1.0, 0.2), 1.0, &tri).is_some());
    }

    #[test]
    fn sphere_beside_triangle_misses() {
        let tri = floor();
        assert!(sphere_triangle_collision(Point3::new(-3.0, 1.0, 0.2), 1.0, &tri).is_none());
    }

    #[test]
    fn sphere_centered_on_plane_collides() {
        let tri = floor();
        assert!(sphere_triangle_collision(Point3::new(1.0, 1.0, 0.0), 0.25, &tri).is_some());
    }
}
