//! Axis-aligned bounding boxes and bounding spheres.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::Plane3D;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in tie-breaking order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// An axis-aligned box defined by its `min` and `max` corners.
///
/// Boxes built with [`BoundingBox::from_points`] satisfy `min <= max` on every
/// axis. [`BoundingBox::new`] stores the corners as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }
}

impl BoundingBox {
    /// Creates a box from its two corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Folds a set of points into the smallest box containing all of them.
    ///
    /// An empty iterator yields a box collapsed to the origin.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };
        points.fold(Self::new(first, first), |mut bounds, p| {
            bounds.grow(p);
            bounds
        })
    }

    /// Extends the box so that it contains `point`.
    pub fn grow(&mut self, point: Point3<f32>) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Midpoint of the two corners.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Unsigned size of the box along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f32> {
        (self.max - self.min).abs()
    }

    /// Half of [`extents`](Self::extents).
    #[inline]
    pub fn half_extents(&self) -> Vector3<f32> {
        self.extents() / 2.0
    }

    /// Returns the axis with the largest extent.
    ///
    /// Ties go to the first axis (X, then Y, then Z) whose extent is at least
    /// as large as both others.
    pub fn longest_axis(&self) -> Axis {
        let e = self.extents();
        if e.x >= e.y && e.x >= e.z {
            Axis::X
        } else if e.y >= e.x && e.y >= e.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Builds the axis-aligned plane through `point` whose normal is the unit
    /// vector of `axis`.
    pub fn splitting_plane(&self, axis: Axis, point: Point3<f32>) -> Plane3D {
        Plane3D::from_point_and_normal(point, axis.unit())
    }

    /// Returns `true` if `point` lies inside the box or on its boundary.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Smallest sphere centred on the box that encloses it.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), self.half_extents().norm())
    }
}

/// A sphere given by its centre and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    center: Point3<f32>,
    radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 0.0,
        }
    }
}

impl BoundingSphere {
    /// Creates a sphere.
    ///
    /// # Panics (debug builds only)
    /// Panics if `radius` is negative.
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "Sphere radius cannot be negative");
        Self { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the same sphere moved to `center`.
    #[inline]
    pub fn with_center(&self, center: Point3<f32>) -> Self {
        Self { center, ..*self }
    }
}
