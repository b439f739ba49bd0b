use aabb_tree::{BuildPolicy, CollisionMode, MeshCollider, SplitAxis};
use aabb_viz::{
    draw_triangle, movement_input, random_rotated_cubes, to_vec3, triangle_color, BoxVisitor,
    OrbitCamera,
};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Point3, Vector3};

const NUM_CUBES: usize = 12;
const WORLD_SIZE: f32 = 30.0;
const PLAYER_RADIUS: f32 = 1.5;
const PLAYER_SPEED: f32 = 8.0;
const SPIN_SPEED: f32 = 0.2;

#[macroquad::main("AABB Tree Sphere Query")]
async fn main() {
    env_logger::init();

    let triangles = random_rotated_cubes(42, NUM_CUBES, WORLD_SIZE, (3.0, 8.0));
    let policy = BuildPolicy::default()
        .with_min_leaf_triangles(4)
        .with_split_axis(SplitAxis::BestAxis);

    let mut collider = match MeshCollider::new(triangles, policy, Isometry3::identity()) {
        Ok(collider) => collider,
        Err(err) => {
            log::error!("cannot build collider: {err}");
            return;
        }
    };
    log::info!(
        "tree ready: {} triangles, {} nodes, depth {}",
        collider.tree().triangles().len(),
        collider.tree().node_count(),
        collider.tree().depth()
    );

    let mut camera = OrbitCamera::new(60.0, 0.0, 0.4).with_zoom(3.0, 10.0, 150.0);
    let mut player = Point3::new(0.0, WORLD_SIZE, 0.0);
    let mut angle = 0.0_f32;
    let mut spinning = true;
    let mut show_boxes = true;
    let mut leaves_only = true;
    let mut box_depth: usize = 32;

    loop {
        let dt = get_frame_time();
        camera.update();

        if is_key_pressed(KeyCode::Space) {
            spinning = !spinning;
        }
        if is_key_pressed(KeyCode::B) {
            show_boxes = !show_boxes;
        }
        if is_key_pressed(KeyCode::V) {
            leaves_only = !leaves_only;
        }
        if is_key_pressed(KeyCode::Equal) {
            box_depth += 1;
        }
        if is_key_pressed(KeyCode::Minus) {
            box_depth = box_depth.saturating_sub(1);
        }

        if spinning {
            angle += SPIN_SPEED * dt;
            collider.set_placement(Isometry3::rotation(Vector3::y() * angle));

            // The mesh turned into the player: step back until free.
            if collider.check_position(player, PLAYER_RADIUS).is_colliding() {
                let away = (player - Point3::origin())
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::y);
                if let Some(free) = collider.push_out(player, PLAYER_RADIUS, away * 0.1, 100) {
                    player = free;
                }
            }
        }

        let direction = movement_input(&camera);
        if let Some(direction) = direction.try_normalize(f32::EPSILON) {
            let next = player + direction * PLAYER_SPEED * dt;
            player = collider.resolve_move(CollisionMode::CollisionOnly, player, next, PLAYER_RADIUS);
        }
        camera.target = to_vec3(player);

        let report = collider.check_position(player, PLAYER_RADIUS);
        let model_center = collider.to_model(player);
        let candidates = collider
            .tree()
            .query(&aabb_tree::BoundingSphere::new(model_center, PLAYER_RADIUS));

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        let placement = *collider.placement();
        for (id, triangle) in collider.tree().triangles().iter_with_ids() {
            let color = if report.hit.is_some_and(|hit| hit.id == id) {
                RED
            } else if candidates.contains(id) {
                YELLOW
            } else {
                triangle_color(triangle)
            };
            draw_triangle(triangle, &placement, color);
        }

        if show_boxes {
            collider.tree().walk(&mut BoxVisitor {
                placement: &placement,
                max_depth: box_depth,
                leaves_only,
            });
        }

        let player_color = if report.is_colliding() { RED } else { GREEN };
        draw_sphere_wires(to_vec3(player), PLAYER_RADIUS, None, player_color);

        set_default_camera();

        draw_text(
            &format!(
                "AABB Tree - {} triangles, {} nodes, depth {}",
                collider.tree().triangles().len(),
                collider.tree().node_count(),
                collider.tree().depth()
            ),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("Candidates tested: {}", report.candidates),
            10.0,
            50.0,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!(
                "Bounding sphere: {} | Bounding box: {} | Mesh: {}",
                yes_no(report.touches_bounding_sphere),
                yes_no(report.touches_bounding_box),
                yes_no(report.is_colliding())
            ),
            10.0,
            70.0,
            18.0,
            if report.is_colliding() { RED } else { GRAY },
        );
        draw_text(
            "WASD/QE move | Space spin | B boxes | V leaves only | +/- box depth",
            10.0,
            95.0,
            16.0,
            DARKGRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 115.0, 16.0, DARKGRAY);

        next_frame().await
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
