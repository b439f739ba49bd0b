//! Split-axis selection strategies for AABB tree construction.
//!
//! The axis decides the orientation of a node's splitting plane. The plane
//! itself always passes through the mean of the node's triangle centres.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::{Axis, BoundingBox};

/// Strategy for choosing the axis a node is split along.
pub trait AxisSelector {
    /// Picks an axis for a node with the given bounds whose triangles have
    /// the given centres.
    fn select(&self, bounds: &BoundingBox, centers: &[Point3<f32>]) -> Axis;
}

/// Splits along the axis on which the node's box is largest.
///
/// Cheap, and works well for meshes whose triangles are spread evenly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestAxis;

impl AxisSelector for LongestAxis {
    fn select(&self, bounds: &BoundingBox, _centers: &[Point3<f32>]) -> Axis {
        bounds.longest_axis()
    }
}

/// Splits along the axis that best balances the triangle centres around the
/// box centre.
///
/// For each axis, centres at or below the box centre are counted on one side
/// and centres above it on the other. The axis with the smallest difference
/// wins; ties go to the lower axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestAxis;

impl AxisSelector for BestAxis {
    fn select(&self, bounds: &BoundingBox, centers: &[Point3<f32>]) -> Axis {
        let middle = bounds.center();
        let mut best = Axis::X;
        let mut best_imbalance = usize::MAX;

        for axis in Axis::ALL {
            let i = axis.index();
            let below = centers.iter().filter(|c| c[i] <= middle[i]).count();
            let above = centers.len() - below;
            let imbalance = below.abs_diff(above);
            if imbalance < best_imbalance {
                best = axis;
                best_imbalance = imbalance;
            }
        }

        best
    }
}

/// Serializable choice between the built-in selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitAxis {
    /// See [`LongestAxis`].
    #[default]
    LongestAxis,
    /// See [`BestAxis`].
    BestAxis,
}

impl AxisSelector for SplitAxis {
    fn select(&self, bounds: &BoundingBox, centers: &[Point3<f32>]) -> Axis {
        match self {
            SplitAxis::LongestAxis => LongestAxis.select(bounds, centers),
            SplitAxis::BestAxis => BestAxis.select(bounds, centers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> BoundingBox {
        BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0))
    }

    #[test]
    fn longest_axis_ignores_centers() {
        let bounds = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 9.0));
        assert_eq!(LongestAxis.select(&bounds, &[]), Axis::Z);
        assert_eq!(SplitAxis::LongestAxis.select(&bounds, &[]), Axis::Z);
    }

    #[test]
    fn best_axis_prefers_balanced_split() {
        // Balanced along Y only: X and Z put everything at or below the middle.
        let centers = [
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 3.0, 1.0),
            Point3::new(1.5, 1.0, 0.5),
            Point3::new(0.5, 3.0, 1.5),
        ];
        assert_eq!(BestAxis.select(&cube(), &centers), Axis::Y);
        assert_eq!(SplitAxis::BestAxis.select(&cube(), &centers), Axis::Y);
    }

    #[test]
    fn best_axis_centre_on_middle_counts_as_below() {
        // On X the centre at 2.0 joins the lower side, giving 2 vs 0.
        // On Y the split is 1 vs 1.
        let centers = [Point3::new(2.0, 1.0, 0.0), Point3::new(1.0, 3.0, 0.0)];
        assert_eq!(BestAxis.select(&cube(), &centers), Axis::Y);
    }

    #[test]
    fn best_axis_ties_go_to_lowest_axis() {
        let centers = [Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0)];
        assert_eq!(BestAxis.select(&cube(), &centers), Axis::X);

        let centers = [Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 3.0, 3.0)];
        assert_eq!(BestAxis.select(&cube(), &centers), Axis::Y);
    }

    #[test]
    fn default_is_longest_axis() {
        assert_eq!(SplitAxis::default(), SplitAxis::LongestAxis);
    }
}
