//! AABB tree navigation utilities for interactive visualization.

use aabb_tree::aabb::{AabbNode, AabbTree};
use macroquad::prelude::*;
use nalgebra::Isometry3;

use crate::{depth_color, draw_box_wires, draw_triangle, triangle_color};

/// Direction taken at each node in the navigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Interactive tree navigator for exploring tree structure.
#[derive(Debug, Default)]
pub struct TreeNavigator {
    path: Vec<Direction>,
}

impl TreeNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    /// Returns the current depth in the tree.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Attempts to navigate to the left child. Returns true if successful.
    pub fn go_left(&mut self, tree: &AabbTree) -> bool {
        self.go(tree, Direction::Left)
    }

    /// Attempts to navigate to the right child. Returns true if successful.
    pub fn go_right(&mut self, tree: &AabbTree) -> bool {
        self.go(tree, Direction::Right)
    }

    fn go(&mut self, tree: &AabbTree, direction: Direction) -> bool {
        let Some(node) = self.current_node(tree) else {
            return false;
        };
        if child(node, direction).is_none() {
            return false;
        }
        self.path.push(direction);
        true
    }

    /// Navigates to the parent node. Returns true if not already at root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Returns to the root node.
    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles keyboard input for navigation: L/R for children, P for the
    /// parent, H for the root. Returns true if navigation state changed.
    pub fn update(&mut self, tree: &AabbTree) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::L) {
            changed = self.go_left(tree);
        }
        if is_key_pressed(KeyCode::R) {
            changed = self.go_right(tree);
        }
        if is_key_pressed(KeyCode::P) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::H) && !self.path.is_empty() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// Returns the node at the end of the current path.
    pub fn current_node<'a>(&self, tree: &'a AabbTree) -> Option<&'a AabbNode> {
        get_node_at_path(tree.root(), &self.path)
    }

    /// Draws the triangles of the current node, its box, and the boxes of its
    /// children.
    pub fn render(&self, tree: &AabbTree, placement: &Isometry3<f32>) {
        let Some(node) = self.current_node(tree) else {
            return;
        };

        for id in node.triangles() {
            if let Some(triangle) = tree.triangle(*id) {
                draw_triangle(triangle, placement, triangle_color(triangle));
            }
        }

        draw_box_wires(node.bounds(), placement, depth_color(self.depth()));
        for child in [node.left(), node.right()].into_iter().flatten() {
            draw_box_wires(child.bounds(), placement, depth_color(self.depth() + 1));
        }
    }

    /// Draws the navigation UI overlay.
    pub fn draw_ui(&self, tree: &AabbTree, y_offset: f32) {
        let (triangles, has_left, has_right, is_leaf) = match self.current_node(tree) {
            Some(node) => (
                node.triangles().len(),
                node.left().is_some(),
                node.right().is_some(),
                node.is_leaf(),
            ),
            None => (0, false, false, true),
        };

        draw_text(
            &format!("Node: {triangles} triangles"),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Path: {} (depth {})", path_label(&self.path), self.path.len()),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!(
                "Children: {}{}{}",
                if has_left { "[L]eft " } else { "" },
                if has_right { "[R]ight " } else { "" },
                if is_leaf { "(leaf)" } else { "" }
            ),
            10.0,
            y_offset + 40.0,
            18.0,
            if is_leaf { ORANGE } else { GREEN },
        );
        draw_text("[P]arent | [H]ome", 10.0, y_offset + 60.0, 16.0, DARKGRAY);
    }
}

fn child(node: &AabbNode, direction: Direction) -> Option<&AabbNode> {
    match direction {
        Direction::Left => node.left(),
        Direction::Right => node.right(),
    }
}

/// Navigates to a node following the path, returns None if path is invalid.
fn get_node_at_path<'a>(root: &'a AabbNode, path: &[Direction]) -> Option<&'a AabbNode> {
    path.iter().try_fold(root, |node, direction| child(node, *direction))
}

fn path_label(path: &[Direction]) -> String {
    if path.is_empty() {
        return "root".to_string();
    }
    path.iter()
        .map(|d| match d {
            Direction::Left => "L",
            Direction::Right => "R",
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
