//! Sliding collision response.
//!
//! When a moving sphere hits a single wall, the attempted position is pushed
//! back along the wall's normal until the sphere rests on the wall. The
//! tangential part of the movement is kept, so the sphere slides along it.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::Plane3D;

/// How a blocked movement is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionMode {
    /// Movement is never blocked.
    Disabled,
    /// Any hit cancels the movement.
    CollisionOnly,
    /// A hit on a single wall slides along it. Hits on several walls cancel
    /// the movement.
    #[default]
    CollisionAndSliding,
}

impl CollisionMode {
    /// The next mode in the order `Disabled`, `CollisionOnly`,
    /// `CollisionAndSliding`, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            CollisionMode::Disabled => CollisionMode::CollisionOnly,
            CollisionMode::CollisionOnly => CollisionMode::CollisionAndSliding,
            CollisionMode::CollisionAndSliding => CollisionMode::Disabled,
        }
    }
}

/// Moves a sphere of `radius` at `attempted` out of `plane`, so that it
/// touches the plane from the side its centre is on.
///
/// The result is the projection of `attempted` onto the plane, offset by
/// `radius` along the normal facing the centre. Its distance to the plane is
/// exactly `radius`, up to rounding.
pub fn sliding_position(plane: &Plane3D, attempted: Point3<f32>, radius: f32) -> Point3<f32> {
    let plane = if plane.signed_distance(attempted) < 0.0 {
        plane.flipped()
    } else {
        *plane
    };

    let ratio = plane.normal() * radius;
    let behind = attempted - ratio;
    let on_plane = plane
        .intersect_line(attempted, behind)
        .unwrap_or_else(|| plane.project_point(attempted));

    on_plane + ratio
}

/// Decides where a sphere moving from `current` to `next` ends up, given the
/// planes of every triangle the sphere collides with at `next`.
///
/// Planes that are equal or exact opposites count as one wall.
pub fn resolve_movement(
    mode: CollisionMode,
    current: Point3<f32>,
    next: Point3<f32>,
    radius: f32,
    planes: &[Plane3D],
) -> Point3<f32> {
    let Some(first) = planes.first() else {
        return next;
    };

    match mode {
        CollisionMode::Disabled => next,
        CollisionMode::CollisionOnly => current,
        CollisionMode::CollisionAndSliding => {
            if planes.iter().all(|p| p.is_same_surface(first)) {
                sliding_position(first, next, radius)
            } else {
                log::trace!("{} distinct walls hit, movement cancelled", planes.len());
                current
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn wall() -> Plane3D {
        Plane3D::new(Vector3::new(1.0, 0.0, 0.0), 0.0)
    }

    #[test]
    fn slide_rests_on_plane_at_radius() {
        let result = sliding_position(&wall(), Point3::new(0.3, 0.0, 0.0), 1.0);
        assert_relative_eq!(result, Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(wall().signed_distance(result).abs(), 1.0);
    }

    #[test]
    fn slide_keeps_tangential_motion() {
        let result = sliding_position(&wall(), Point3::new(0.5, 2.0, -3.0), 1.0);
        assert_relative_eq!(result, Point3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn slide_from_behind_uses_flipped_plane() {
        let result = sliding_position(&wall(), Point3::new(-0.3, 4.0, 0.0), 1.0);
        assert_relative_eq!(result, Point3::new(-1.0, 4.0, 0.0));
    }

    #[test]
    fn slide_with_zero_radius_projects() {
        let result = sliding_position(&wall(), Point3::new(0.3, 1.0, 0.0), 0.0);
        assert_relative_eq!(result, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn no_hits_always_moves() {
        let current = Point3::new(0.0, 0.0, 0.0);
        let next = Point3::new(1.0, 0.0, 0.0);
        for mode in [
            CollisionMode::Disabled,
            CollisionMode::CollisionOnly,
            CollisionMode::CollisionAndSliding,
        ] {
            assert_eq!(resolve_movement(mode, current, next, 1.0, &[]), next);
        }
    }

    #[test]
    fn collision_only_stays_put() {
        let current = Point3::new(2.0, 0.0, 0.0);
        let next = Point3::new(0.5, 0.0, 0.0);
        let result = resolve_movement(CollisionMode::CollisionOnly, current, next, 1.0, &[wall()]);
        assert_eq!(result, current);
    }

    #[test]
    fn disabled_ignores_hits() {
        let current = Point3::new(2.0, 0.0, 0.0);
        let next = Point3::new(0.5, 0.0, 0.0);
        let result = resolve_movement(CollisionMode::Disabled, current, next, 1.0, &[wall()]);
        assert_eq!(result, next);
    }

    #[test]
    fn same_wall_seen_from_both_faces_slides() {
        let current = Point3::new(2.0, 0.0, 0.0);
        let next = Point3::new(0.5, 1.0, 0.0);
        let planes = [wall(), wall().flipped(), wall()];
        let result = resolve_movement(CollisionMode::CollisionAndSliding, current, next, 1.0, &planes);
        assert_relative_eq!(result, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn corner_cancels_movement() {
        let current = Point3::new(2.0, 2.0, 0.0);
        let next = Point3::new(0.5, 0.5, 0.0);
        let floor = Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        let result =
            resolve_movement(CollisionMode::CollisionAndSliding, current, next, 1.0, &[wall(), floor]);
        assert_eq!(result, current);
    }

    #[test]
    fn default_mode_slides() {
        assert_eq!(CollisionMode::default(), CollisionMode::CollisionAndSliding);
        assert_eq!(CollisionMode::CollisionAndSliding.cycle(), CollisionMode::Disabled);
    }
}
