//! Shared visualization utilities for the AABB tree demos.

use std::hash::{Hash, Hasher};

use aabb_tree::aabb::{AabbNode, AabbVisitor};
use aabb_tree::{BoundingBox, Triangle};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Point3, Rotation3, Unit, Vector3};

pub mod navigator;
pub use navigator::TreeNavigator;

/// Converts a nalgebra point into a macroquad vector.
#[inline]
pub fn to_vec3(p: Point3<f32>) -> Vec3 {
    vec3(p.x, p.y, p.z)
}

/// Generates a deterministic color from a triangle's vertices using hashing.
pub fn triangle_color(triangle: &Triangle) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for v in triangle.vertices() {
        v.x.to_bits().hash(&mut hasher);
        v.y.to_bits().hash(&mut hasher);
        v.z.to_bits().hash(&mut hasher);
    }
    let hash = hasher.finish();

    let r = (((hash >> 16) & 0xFF) as u8).max(40);
    let g = (((hash >> 8) & 0xFF) as u8).max(40);
    let b = ((hash & 0xFF) as u8).max(40);

    Color::from_rgba(r, g, b, 255)
}

/// Draws a triangle moved into the world by `placement`.
pub fn draw_triangle(triangle: &Triangle, placement: &Isometry3<f32>, color: Color) {
    let vertices = triangle
        .transformed(placement)
        .vertices()
        .iter()
        .map(|p| Vertex::new2(to_vec3(*p), vec2(0.0, 0.0), color))
        .collect();

    let mesh = Mesh {
        vertices,
        indices: vec![0, 1, 2],
        texture: None,
    };

    draw_mesh(&mesh);
}

/// Draws the twelve edges of a box moved into the world by `placement`.
pub fn draw_box_wires(bounds: &BoundingBox, placement: &Isometry3<f32>, color: Color) {
    let (lo, hi) = (bounds.min(), bounds.max());
    let corner = |x: bool, y: bool, z: bool| {
        let p = Point3::new(
            if x { hi.x } else { lo.x },
            if y { hi.y } else { lo.y },
            if z { hi.z } else { lo.z },
        );
        to_vec3(placement * p)
    };

    for a in [false, true] {
        for b in [false, true] {
            draw_line_3d(corner(false, a, b), corner(true, a, b), color);
            draw_line_3d(corner(a, false, b), corner(a, true, b), color);
            draw_line_3d(corner(a, b, false), corner(a, b, true), color);
        }
    }
}

/// Color for a tree level, cycling through a small palette.
pub fn depth_color(depth: usize) -> Color {
    const PALETTE: [Color; 6] = [WHITE, YELLOW, ORANGE, GREEN, SKYBLUE, VIOLET];
    PALETTE[depth % PALETTE.len()]
}

/// Visitor that draws the boxes of every node down to `max_depth`.
pub struct BoxVisitor<'a> {
    pub placement: &'a Isometry3<f32>,
    pub max_depth: usize,
    pub leaves_only: bool,
}

impl AabbVisitor for BoxVisitor<'_> {
    fn visit(&mut self, node: &AabbNode, depth: usize) {
        if depth > self.max_depth || (self.leaves_only && !node.is_leaf()) {
            return;
        }
        draw_box_wires(node.bounds(), self.placement, depth_color(depth));
    }
}

/// Generates the 12 triangles of an axis-aligned cube, wound
/// counter-clockwise when viewed from outside.
pub fn generate_cube_triangles(center: Point3<f32>, size: f32) -> Vec<Triangle> {
    generate_rotated_cube(center, size, &Rotation3::identity())
}

/// Generates the 12 triangles of a rotated cube.
pub fn generate_rotated_cube(center: Point3<f32>, size: f32, rotation: &Rotation3<f32>) -> Vec<Triangle> {
    let half = size / 2.0;

    let corners = [
        Vector3::new(-half, -half, -half), // 0: left-bottom-back
        Vector3::new(half, -half, -half),  // 1: right-bottom-back
        Vector3::new(half, half, -half),   // 2: right-top-back
        Vector3::new(-half, half, -half),  // 3: left-top-back
        Vector3::new(-half, -half, half),  // 4: left-bottom-front
        Vector3::new(half, -half, half),   // 5: right-bottom-front
        Vector3::new(half, half, half),    // 6: right-top-front
        Vector3::new(-half, half, half),   // 7: left-top-front
    ]
    .map(|v| center + rotation * v);

    let faces: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // front (+Z)
        [1, 0, 3, 2], // back (-Z)
        [0, 4, 7, 3], // left (-X)
        [5, 1, 2, 6], // right (+X)
        [7, 6, 2, 3], // top (+Y)
        [0, 1, 5, 4], // bottom (-Y)
    ];

    faces
        .iter()
        .flat_map(|[a, b, c, d]| {
            [
                Triangle::new(corners[*a], corners[*b], corners[*c]),
                Triangle::new(corners[*a], corners[*c], corners[*d]),
            ]
        })
        .collect()
}

/// Simple seeded random number generator (LCG).
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Returns a value in `[0, 1]`.
    pub fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 33) as f32) / (u32::MAX as f32 / 2.0)
    }

    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Scatters `count` randomly rotated cubes in a cube of side `world_size`.
pub fn random_rotated_cubes(seed: u64, count: usize, world_size: f32, sizes: (f32, f32)) -> Vec<Triangle> {
    let mut rng = Rng::new(seed);
    let mut triangles = Vec::with_capacity(count * 12);

    for _ in 0..count {
        let x = (rng.next_f32() - 0.5) * world_size;
        let y = (rng.next_f32() - 0.5) * world_size;
        let z = (rng.next_f32() - 0.5) * world_size;
        let size = rng.range(sizes.0, sizes.1);

        let axis = Vector3::new(rng.next_f32() - 0.5, rng.next_f32() - 0.5, rng.next_f32() - 0.5);
        let axis = if axis.norm() > 0.01 {
            Unit::new_normalize(axis)
        } else {
            Vector3::x_axis()
        };
        let angle = rng.next_f32() * std::f32::consts::TAU;
        let rotation = Rotation3::from_axis_angle(&axis, angle);

        triangles.extend(generate_rotated_cube(Point3::new(x, y, z), size, &rotation));
    }

    triangles
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 5.0,
            min_distance: 5.0,
            max_distance: 200.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Updates camera state from the mouse: drag to rotate, scroll to zoom.
    ///
    /// The keyboard is left to the demos for moving the player.
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Unit vectors pointing forward and right on the ground plane, as seen
    /// from the camera.
    pub fn ground_axes(&self) -> (Vector3<f32>, Vector3<f32>) {
        let forward = Vector3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let right = Vector3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        (forward, right)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}

/// Reads WASD (and Q/E for up/down) into a movement direction relative to
/// the camera. Not normalized.
pub fn movement_input(camera: &OrbitCamera) -> Vector3<f32> {
    let (forward, right) = camera.ground_axes();
    let mut direction = Vector3::zeros();

    if is_key_down(KeyCode::W) {
        direction += forward;
    }
    if is_key_down(KeyCode::S) {
        direction -= forward;
    }
    if is_key_down(KeyCode::D) {
        direction += right;
    }
    if is_key_down(KeyCode::A) {
        direction -= right;
    }
    if is_key_down(KeyCode::E) {
        direction += Vector3::y();
    }
    if is_key_down(KeyCode::Q) {
        direction -= Vector3::y();
    }

    direction
}
