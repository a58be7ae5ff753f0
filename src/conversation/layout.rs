use std::collections::HashMap;

use super::graph::{ConversationGraph, GraphNode, NodeKind, ViewMode};

pub const COMPACT_COLUMNS: usize = 4;
pub const COMPACT_COLUMN_WIDTH: f32 = 300.0;
pub const COMPACT_ROW_HEIGHT: f32 = 170.0;

pub const FLOW_COLUMN_OFFSET: f32 = 420.0;
pub const FLOW_ROW_SPACING: f32 = 220.0;
pub const FLOW_WORKFLOW_COLUMN_X: f32 = 980.0;
pub const FLOW_WORKFLOW_ROW_SPACING: f32 = 300.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Node id to world coordinate for one view mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    positions: HashMap<String, Point>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions
            .iter()
            .map(|(id, point)| (id.as_str(), *point))
    }

    /// Smallest rectangle containing every position, as (min, max).
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.positions.values();
        let first = *points.next()?;
        Some(points.fold((first, first), |(min, max), point| {
            (
                Point::new(min.x.min(point.x), min.y.min(point.y)),
                Point::new(max.x.max(point.x), max.y.max(point.y)),
            )
        }))
    }
}

/// Coordinates for every node of `graph` in `view_mode`.
///
/// Table view has nothing to position and yields `None`. The result depends
/// only on node order, kind and sequence index.
pub fn layout(graph: &ConversationGraph, view_mode: ViewMode) -> Option<Layout> {
    let positions = match view_mode {
        ViewMode::Table => return None,
        ViewMode::Compact => compact_grid(&graph.nodes),
        ViewMode::Flow => flow_columns(&graph.nodes),
    };
    Some(Layout { positions })
}

fn compact_grid(nodes: &[GraphNode]) -> HashMap<String, Point> {
    let mut ordered = nodes.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|node| node.sequence_index);

    ordered
        .into_iter()
        .enumerate()
        .map(|(slot, node)| {
            let column = slot % COMPACT_COLUMNS;
            let row = slot / COMPACT_COLUMNS;
            (
                node.id.clone(),
                Point::new(
                    column as f32 * COMPACT_COLUMN_WIDTH,
                    row as f32 * COMPACT_ROW_HEIGHT,
                ),
            )
        })
        .collect()
}

fn flow_columns(nodes: &[GraphNode]) -> HashMap<String, Point> {
    let mut positions = HashMap::with_capacity(nodes.len());
    let mut event_slot = 0usize;
    let mut workflow_slot = 0usize;

    let mut ordered = nodes.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|node| node.sequence_index);

    for node in ordered {
        let point = match node.kind {
            NodeKind::Event => {
                let x = if event_slot % 2 == 0 {
                    0.0
                } else {
                    FLOW_COLUMN_OFFSET
                };
                let point = Point::new(x, event_slot as f32 * FLOW_ROW_SPACING);
                event_slot += 1;
                point
            }
            NodeKind::Workflow => {
                let point = Point::new(
                    FLOW_WORKFLOW_COLUMN_X,
                    workflow_slot as f32 * FLOW_WORKFLOW_ROW_SPACING,
                );
                workflow_slot += 1;
                point
            }
        };
        positions.insert(node.id.clone(), point);
    }

    positions
}
