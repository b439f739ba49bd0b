//! Sphere against triangle-mesh collision detection.
//!
//! The broad phase is an [`AabbTree`] over the mesh, the narrow phase the
//! exact tests in [`collision`], and [`sliding`] turns a blocked movement
//! into a slide along the wall that was hit. [`MeshCollider`] ties them
//! together for a mesh placed in the world.

pub mod aabb;
pub mod collider;
pub mod collision;
pub mod config;
pub mod sliding;

mod bounds;
mod error;
mod plane;
mod triangle;
mod triangle_list;

pub use aabb::{AabbTree, BuildPolicy, Collision, SplitAxis, UndersizedChildren};
pub use bounds::{Axis, BoundingBox, BoundingSphere};
pub use collider::{CollisionReport, MeshCollider};
pub use config::{CollisionConfig, Config, ConfigError};
pub use error::BuildError;
pub use plane::{Classification, Plane3D, PlaneSide};
pub use sliding::CollisionMode;
pub use triangle::Triangle;
pub use triangle_list::{CandidateList, TriangleId, TriangleList};
