//! Triangle representation.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::{BoundingBox, Classification, Plane3D, PlaneSide};

/// A triangle in 3D space, defined by three vertices.
///
/// Zero-area triangles are accepted. Their plane is not finite, see
/// [`Plane3D::from_three_points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Returns the three edges as `(start, end)` pairs, in the order AB, BC, CA.
    pub fn edges(&self) -> [(Point3<f32>, Point3<f32>); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        self.normal().try_normalize(f32::EPSILON)
    }

    /// Returns `true` if the triangle has (nearly) zero area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.unit_normal().is_none()
    }

    /// Returns the plane that this triangle lies on.
    ///
    /// For a degenerate triangle the plane is not finite.
    pub fn plane(&self) -> Plane3D {
        let [a, b, c] = self.vertices;
        Plane3D::from_three_points(a, b, c)
    }

    /// Arithmetic mean of the three vertices.
    pub fn center(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Smallest axis-aligned box containing the three vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices)
    }

    /// Returns a copy of this triangle with every vertex moved by `transform`.
    pub fn transformed(&self, transform: &Isometry3<f32>) -> Self {
        Self {
            vertices: self.vertices.map(|v| transform * v),
        }
    }

    /// Classifies this triangle relative to a plane, with no tolerance.
    ///
    /// Returns:
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Back` if no vertex is in front of the plane
    /// - `Front` if no vertex is behind the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        let mut front = 0;
        let mut back = 0;
        let mut on_plane = 0;

        for vertex in &self.vertices {
            match plane.classify_point(*vertex) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => on_plane += 1,
            }
        }

        if on_plane == 3 {
            Classification::Coplanar
        } else if front == 0 {
            Classification::Back
        } else if back == 0 {
            Classification::Front
        } else {
            Classification::Spanning
        }
    }
}
