use std::collections::{HashMap, HashSet};

use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::{
    metadata::{Bounds, Frame},
    model::{GraphModel, NodeId},
    settings::{Orientation, SettingsLayout},
    sinks::Renderer,
};

const DEFAULT_CANVAS: Vec2 = Vec2::new(800., 600.);

/// Top-down tree layout over the visible part of the hierarchy.
///
/// Visible nodes without a visible hierarchy parent start a new tree. Trees
/// are packed left to right in node order, each subtree advancing the next
/// free column by its width.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    order: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    parent: HashMap<NodeId, NodeId>,
    settings: SettingsLayout,

    canvas: Rect,
    positions: HashMap<NodeId, Pos2>,
    frame: Frame,
    selected: Option<NodeId>,
}

impl TreeLayout {
    pub fn new(model: &GraphModel, settings: SettingsLayout) -> Self {
        let order: Vec<NodeId> = model.nodes().map(|n| n.id.clone()).collect();
        let mut children = HashMap::new();
        let mut parent = HashMap::new();
        for id in &order {
            let kids = model.children_of(id);
            if kids.is_empty() {
                continue;
            }
            for kid in kids {
                parent.entry(kid.clone()).or_insert_with(|| id.clone());
            }
            children.insert(id.clone(), kids.to_vec());
        }

        Self {
            order,
            children,
            parent,
            settings,
            canvas: Rect::from_min_size(Pos2::ZERO, DEFAULT_CANVAS),
            positions: HashMap::new(),
            frame: Frame::default(),
            selected: None,
        }
    }

    pub fn with_canvas(mut self, canvas: Rect) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Graph position of `id`, `None` if it is not laid out.
    pub fn position(&self, id: &str) -> Option<Pos2> {
        self.positions.get(id).copied()
    }

    pub fn screen_position(&self, id: &str) -> Option<Pos2> {
        self.position(id).map(|p| self.frame.canvas_to_screen_pos(p))
    }

    /// Laid out nodes in node order.
    pub fn laid_out(&self) -> impl Iterator<Item = (&str, Pos2)> {
        self.order
            .iter()
            .filter_map(|id| self.positions.get(id).map(|p| (id.as_str(), *p)))
    }

    /// First laid out node within `radius` graph units of the screen position.
    pub fn node_at(&self, screen_pos: Pos2, radius: f32) -> Option<&str> {
        let pos = self.frame.screen_to_canvas_pos(screen_pos);
        self.laid_out()
            .find(|(_, p)| (*p - pos).length() <= radius)
            .map(|(id, _)| id)
    }
}

impl Renderer for TreeLayout {
    fn relayout(&mut self, visible: &[String]) {
        let mut placement = Placement {
            children: &self.children,
            settings: &self.settings,
            visible: visible.iter().map(String::as_str).collect(),
            visited: HashSet::new(),
            positions: HashMap::with_capacity(visible.len()),
        };

        let mut next_col = 0;
        for id in &self.order {
            if !placement.visible.contains(id.as_str()) || placement.visited.contains(id.as_str()) {
                continue;
            }
            let parent_visible = self
                .parent
                .get(id)
                .is_some_and(|p| placement.visible.contains(p.as_str()));
            if parent_visible {
                continue;
            }
            next_col = placement.place(id, 0, next_col) + 1;
        }

        // visible nodes on a hierarchy cycle never start a tree, place them last
        for id in &self.order {
            if placement.visible.contains(id.as_str()) && !placement.visited.contains(id.as_str()) {
                next_col = placement.place(id, 0, next_col) + 1;
            }
        }

        debug!("laid out {} nodes over {next_col} columns", placement.positions.len());
        self.positions = placement.positions;
    }

    fn fit(&mut self, visible: &[String], padding: f32) {
        let mut bounds = Bounds::default();
        for id in visible {
            if let Some(p) = self.positions.get(id) {
                bounds.compute_next(*p);
            }
        }
        let Some(rect) = bounds.rect() else {
            return;
        };
        self.frame = Frame::fit(rect, padding, self.canvas);
    }

    fn set_selected_marker(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }
}

struct Placement<'a> {
    children: &'a HashMap<NodeId, Vec<NodeId>>,
    settings: &'a SettingsLayout,
    visible: HashSet<&'a str>,
    visited: HashSet<&'a str>,
    positions: HashMap<NodeId, Pos2>,
}

impl<'a> Placement<'a> {
    /// Places the subtree of `id` starting at `start_col`, returns the last column used.
    fn place(&mut self, id: &'a str, row: usize, start_col: usize) -> usize {
        self.visited.insert(id);

        let mut had_child = false;
        let mut max_col = start_col;
        let mut child_col = start_col;

        let children: &'a HashMap<NodeId, Vec<NodeId>> = self.children;
        let kids = children.get(id).map(Vec::as_slice).unwrap_or_default();
        for kid in kids {
            if !self.visible.contains(kid.as_str()) || self.visited.contains(kid.as_str()) {
                continue;
            }
            had_child = true;
            let kid_max = self.place(kid, row + 1, child_col);
            max_col = max_col.max(kid_max);
            child_col = kid_max + 1;
        }

        let col = if self.settings.center_parent && had_child {
            (start_col + max_col) as f32 / 2.
        } else {
            start_col as f32
        };
        let row = row as f32;

        let (x, y) = match self.settings.orientation {
            Orientation::TopDown => (col * self.settings.col_dist, row * self.settings.row_dist),
            Orientation::LeftRight => (row * self.settings.row_dist, col * self.settings.col_dist),
        };
        self.positions.insert(id.to_string(), Pos2::new(x, y));

        max_col
    }
}
