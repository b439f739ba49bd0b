//! A mesh placed in the world, ready for sphere collision checks.
//!
//! The tree is built once in model space. World positions are moved into
//! model space with the inverse placement before querying, so moving or
//! turning the mesh never requires a rebuild. Placements are rigid, which
//! keeps sphere radii the same in both spaces.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::aabb::{AabbTree, BuildPolicy, Collision};
use crate::collision::{sphere_intersects_box, sphere_intersects_sphere};
use crate::sliding::{resolve_movement, CollisionMode};
use crate::{BoundingBox, BoundingSphere, BuildError, Plane3D, TriangleList};

/// Outcome of [`MeshCollider::check_position`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionReport {
    /// Number of candidate triangles returned by the tree.
    pub candidates: usize,
    /// The sphere touches the mesh's bounding sphere.
    pub touches_bounding_sphere: bool,
    /// The sphere passes the fast test against the mesh's bounding box.
    pub touches_bounding_box: bool,
    /// First candidate the sphere actually touches. The plane is in model
    /// space.
    pub hit: Option<Collision>,
}

impl CollisionReport {
    /// Returns `true` if the sphere touches a triangle of the mesh.
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.hit.is_some()
    }
}

/// An [`AabbTree`] together with the mesh's placement in the world.
#[derive(Debug, Clone)]
pub struct MeshCollider {
    tree: AabbTree,
    placement: Isometry3<f32>,
    bounding_sphere: BoundingSphere,
}

impl MeshCollider {
    /// Builds the tree over `triangles`, given in model space.
    pub fn new(
        triangles: impl Into<TriangleList>,
        policy: BuildPolicy,
        placement: Isometry3<f32>,
    ) -> Result<Self, BuildError> {
        let tree = AabbTree::build(triangles, policy)?;
        let bounding_sphere = tree.triangles().bounding_sphere();

        log::debug!(
            "mesh collider ready: {} triangles, bounding radius {:.3}",
            tree.triangles().len(),
            bounding_sphere.radius()
        );

        Ok(Self {
            tree,
            placement,
            bounding_sphere,
        })
    }

    #[inline]
    pub fn tree(&self) -> &AabbTree {
        &self.tree
    }

    #[inline]
    pub fn placement(&self) -> &Isometry3<f32> {
        &self.placement
    }

    /// Moves or turns the mesh.
    pub fn set_placement(&mut self, placement: Isometry3<f32>) {
        self.placement = placement;
    }

    /// Bounding box of the mesh in model space.
    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox {
        self.tree.bounds()
    }

    /// Bounding sphere of the mesh in model space.
    #[inline]
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// Maps a world position into model space.
    #[inline]
    pub fn to_model(&self, world: Point3<f32>) -> Point3<f32> {
        self.placement.inverse_transform_point(&world)
    }

    /// Maps a model-space position into the world.
    #[inline]
    pub fn to_world(&self, model: Point3<f32>) -> Point3<f32> {
        self.placement.transform_point(&model)
    }

    /// Tests a sphere at a world position against the mesh.
    pub fn check_position(&self, world: Point3<f32>, radius: f32) -> CollisionReport {
        let center = self.to_model(world);
        let sphere = BoundingSphere::new(center, radius);
        let candidates = self.tree.query(&sphere);

        let hit = candidates.iter().find_map(|id| {
            let triangle = self.tree.triangle(id)?;
            let plane = crate::collision::sphere_triangle_collision(center, radius, triangle)?;
            Some(Collision { id, plane })
        });

        CollisionReport {
            candidates: candidates.len(),
            touches_bounding_sphere: sphere_intersects_sphere(
                center,
                radius,
                self.bounding_sphere.center(),
                self.bounding_sphere.radius(),
            ),
            touches_bounding_box: sphere_intersects_box(center, radius, self.bounding_box()),
            hit,
        }
    }

    /// Model-space planes of every triangle a sphere at `world` touches.
    pub fn collision_planes(&self, world: Point3<f32>, radius: f32) -> Vec<Plane3D> {
        let sphere = BoundingSphere::new(self.to_model(world), radius);
        self.tree
            .collisions(&sphere)
            .into_iter()
            .map(|c| c.plane)
            .collect()
    }

    /// Resolves a movement from `current` to `next`, both in world space.
    ///
    /// See [`resolve_movement`] for the rules.
    pub fn resolve_move(
        &self,
        mode: CollisionMode,
        current: Point3<f32>,
        next: Point3<f32>,
        radius: f32,
    ) -> Point3<f32> {
        if mode == CollisionMode::Disabled {
            return next;
        }

        let planes = self.collision_planes(next, radius);
        if planes.is_empty() {
            return next;
        }

        let resolved = resolve_movement(
            mode,
            self.to_model(current),
            self.to_model(next),
            radius,
            &planes,
        );
        self.to_world(resolved)
    }

    /// Moves a sphere by `step` until it no longer touches the mesh.
    ///
    /// Returns the first free position, or `None` if the sphere still
    /// collides after `max_steps` steps.
    pub fn push_out(
        &self,
        position: Point3<f32>,
        radius: f32,
        step: Vector3<f32>,
        max_steps: usize,
    ) -> Option<Point3<f32>> {
        let mut position = position;
        for _ in 0..max_steps {
            if !self.check_position(position, radius).is_colliding() {
                return Some(position);
            }
            position += step;
        }

        if self.check_position(position, radius).is_colliding() {
            log::debug!("sphere still stuck after {max_steps} steps");
            return None;
        }
        Some(position)
    }
}
