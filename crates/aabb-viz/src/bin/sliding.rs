//! Walk a sphere through a walled room and watch it slide along the walls.
//!
//! Pass a `.toml` or `.ron` file holding a `CollisionConfig` as the first
//! argument to override the defaults.

use aabb_tree::{CollisionConfig, CollisionMode, Config, MeshCollider, Triangle};
use aabb_viz::{draw_triangle, movement_input, to_vec3, triangle_color, BoxVisitor, OrbitCamera};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Point3};

const WALL_HEIGHT: f32 = 4.0;
const PLAYER_SPEED: f32 = 6.0;

/// Two triangles forming a vertical wall from `a` to `b` on the ground.
fn wall(a: [f32; 2], b: [f32; 2]) -> [Triangle; 2] {
    let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
    let (a0, a1) = (p(a[0], 0.0, a[1]), p(a[0], WALL_HEIGHT, a[1]));
    let (b0, b1) = (p(b[0], 0.0, b[1]), p(b[0], WALL_HEIGHT, b[1]));
    [Triangle::new(a0, b0, b1), Triangle::new(a0, b1, a1)]
}

/// A square room with an inner pillar and a dividing wall.
fn room() -> Vec<Triangle> {
    let walls = [
        ([-20.0, -20.0], [20.0, -20.0]),
        ([20.0, -20.0], [20.0, 20.0]),
        ([20.0, 20.0], [-20.0, 20.0]),
        ([-20.0, 20.0], [-20.0, -20.0]),
        // pillar
        ([4.0, 4.0], [8.0, 4.0]),
        ([8.0, 4.0], [8.0, 8.0]),
        ([8.0, 8.0], [4.0, 8.0]),
        ([4.0, 8.0], [4.0, 4.0]),
        // divider
        ([-20.0, -5.0], [-6.0, -5.0]),
    ];
    walls.iter().flat_map(|(a, b)| wall(*a, *b)).collect()
}

fn load_config() -> CollisionConfig {
    let Some(path) = std::env::args().nth(1) else {
        return CollisionConfig::default();
    };
    match CollisionConfig::load_from_file(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring {path}: {err}");
            CollisionConfig::default()
        }
    }
}

#[macroquad::main("AABB Tree Sliding")]
async fn main() {
    env_logger::init();

    let config = load_config();
    let collider = match MeshCollider::new(room(), config.tree, Isometry3::identity()) {
        Ok(collider) => collider,
        Err(err) => {
            log::error!("cannot build collider: {err}");
            return;
        }
    };

    let radius = config.player_radius;
    let mut mode = config.mode;
    let mut camera = OrbitCamera::new(35.0, 0.0, 0.9).with_zoom(3.0, 10.0, 120.0);
    let mut player = Point3::new(-10.0, radius, 10.0);
    let mut show_boxes = false;

    loop {
        let dt = get_frame_time();
        camera.update();

        if is_key_pressed(KeyCode::M) {
            mode = mode.cycle();
            log::info!("collision mode: {mode:?}");
        }
        if is_key_pressed(KeyCode::B) {
            show_boxes = !show_boxes;
        }

        let mut direction = movement_input(&camera);
        direction.y = 0.0;
        if let Some(direction) = direction.try_normalize(f32::EPSILON) {
            let next = player + direction * PLAYER_SPEED * dt;
            player = collider.resolve_move(mode, player, next, radius);
        }
        camera.target = to_vec3(player);

        let touching = collider.collision_planes(player, radius * 1.05);

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        draw_grid(40, 1.0, DARKGRAY, Color::from_rgba(40, 40, 50, 255));
        let placement = *collider.placement();
        for triangle in collider.tree().triangles() {
            draw_triangle(triangle, &placement, triangle_color(triangle));
        }
        if show_boxes {
            collider.tree().walk(&mut BoxVisitor {
                placement: &placement,
                max_depth: usize::MAX,
                leaves_only: true,
            });
        }
        let color = if touching.is_empty() { GREEN } else { ORANGE };
        draw_sphere_wires(to_vec3(player), radius, None, color);

        set_default_camera();

        draw_text(&format!("Mode: {mode:?}"), 10.0, 25.0, 20.0, WHITE);
        draw_text(
            &format!("Walls touched: {}", touching.len()),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        draw_text("WASD move | M mode | B boxes", 10.0, 70.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 90.0, 16.0, DARKGRAY);

        if mode == CollisionMode::Disabled {
            draw_text("Collisions off", 10.0, 115.0, 18.0, RED);
        }

        next_frame().await
    }
}
