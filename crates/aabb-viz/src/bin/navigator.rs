use aabb_tree::{AabbTree, BuildPolicy};
use aabb_viz::{random_rotated_cubes, OrbitCamera, TreeNavigator};
use macroquad::prelude::*;
use nalgebra::Isometry3;

const NUM_CUBES: usize = 10;
const WORLD_SIZE: f32 = 30.0;

#[macroquad::main("AABB Tree Navigator")]
async fn main() {
    env_logger::init();

    let triangles = random_rotated_cubes(42, NUM_CUBES, WORLD_SIZE, (3.0, 8.0));
    let triangle_count = triangles.len();

    let tree = match AabbTree::build(triangles, BuildPolicy::default().with_min_leaf_triangles(2)) {
        Ok(tree) => tree,
        Err(err) => {
            log::error!("cannot build tree: {err}");
            return;
        }
    };
    log::info!(
        "tree built: {} nodes, depth {}",
        tree.node_count(),
        tree.depth()
    );

    let placement = Isometry3::identity();
    let mut camera = OrbitCamera::new(50.0, 0.0, 0.3).with_zoom(3.0, 10.0, 150.0);
    let mut navigator = TreeNavigator::new();

    loop {
        camera.update();
        navigator.update(&tree);

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        navigator.render(&tree, &placement);

        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(8.0, 0.0, 0.0), RED);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 8.0, 0.0), GREEN);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 8.0), BLUE);

        set_default_camera();

        draw_text(
            &format!("AABB Tree Navigator - {triangle_count} triangles"),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("Tree depth: {} | Nodes: {}", tree.depth(), tree.node_count()),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(&tree, 70.0);

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 155.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 175.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
