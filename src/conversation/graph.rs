use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use super::category::Category;
use super::document::{Document, Event, Workflow};

/// How the conversation is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Dense row-major grid of event nodes.
    Compact,
    /// Two-column event flow with the workflow overlay.
    #[default]
    Flow,
    /// Sortable rows, no coordinates.
    Table,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Compact, Self::Flow, Self::Table];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Flow => "flow",
            Self::Table => "table",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Flow => "Flow",
            Self::Table => "Table",
        }
    }

    pub fn is_graph(self) -> bool {
        !matches!(self, Self::Table)
    }

    fn includes_workflow_nodes(self) -> bool {
        matches!(self, Self::Flow | Self::Table)
    }

    fn includes_workflow_edges(self) -> bool {
        matches!(self, Self::Flow)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown view mode '{0}' (expected compact, flow or table)")]
pub struct ParseViewModeError(pub String);

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseViewModeError(value.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Event,
    Workflow,
}

/// Index of the record a node was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeSource {
    Event(usize),
    Workflow(usize),
}

/// Borrowed view of the record behind a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodePayload<'a> {
    Event(&'a Event),
    Workflow(&'a Workflow),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub category: Category,
    pub title: String,
    /// 1-based position across events then workflows.
    pub sequence_index: usize,
    pub source: NodeSource,
    pub dimmed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Sequential,
    /// Workflow node to a part it touched. Drawn dashed and animated.
    WorkflowAttachment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub dimmed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationGraph {
    pub view_mode: ViewMode,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub index_by_id: HashMap<String, usize>,
}

impl<'a> NodePayload<'a> {
    pub fn author(&self) -> &'a str {
        match *self {
            Self::Event(event) => event.author.as_deref().unwrap_or("System"),
            Self::Workflow(_) => "System",
        }
    }

    pub fn timestamp_raw(&self) -> &'a str {
        match *self {
            Self::Event(event) => event.created_at.as_str(),
            Self::Workflow(workflow) => workflow.started_at.as_str(),
        }
    }

    pub fn part_type(&self) -> &'a str {
        match *self {
            Self::Event(event) => event.part_type.as_str(),
            Self::Workflow(_) => "workflow",
        }
    }
}

impl ConversationGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.nodes.get(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn payload<'a>(&self, document: &'a Document, node: &GraphNode) -> Option<NodePayload<'a>> {
        match node.source {
            NodeSource::Event(index) => document.parts.get(index).map(NodePayload::Event),
            NodeSource::Workflow(index) => {
                document.workflows().get(index).map(NodePayload::Workflow)
            }
        }
    }
}

/// Builds the node and edge lists for `view_mode`.
///
/// Events become nodes in document order, joined by one sequential edge per
/// consecutive pair. Workflow nodes follow the events; in flow view each one
/// links to the parts it touched. Related ids with no matching event are
/// dropped.
pub fn build_graph(document: &Document, view_mode: ViewMode) -> ConversationGraph {
    let workflows: &[Workflow] = if view_mode.includes_workflow_nodes() {
        document.workflows()
    } else {
        &[]
    };

    let mut nodes = Vec::with_capacity(document.parts.len() + workflows.len());
    let mut index_by_id = HashMap::with_capacity(nodes.capacity());

    for (index, event) in document.parts.iter().enumerate() {
        if index_by_id.contains_key(event.id.as_str()) {
            debug!(id = %event.id, "duplicate part id; first occurrence keeps the lookup");
        } else {
            index_by_id.insert(event.id.to_string(), nodes.len());
        }

        nodes.push(GraphNode {
            id: event.id.to_string(),
            kind: NodeKind::Event,
            category: event.category(),
            title: event.title().to_owned(),
            sequence_index: index + 1,
            source: NodeSource::Event(index),
            dimmed: false,
        });
    }

    let mut edges = document
        .parts
        .windows(2)
        .filter_map(|pair| match pair {
            [source, target] => Some(GraphEdge {
                id: format!("e{}-{}", source.id, target.id),
                source: source.id.to_string(),
                target: target.id.to_string(),
                kind: EdgeKind::Sequential,
                dimmed: false,
            }),
            _ => None,
        })
        .collect::<Vec<_>>();

    let event_count = document.parts.len();
    for (index, workflow) in workflows.iter().enumerate() {
        let node_id = workflow.node_id();
        index_by_id.entry(node_id.clone()).or_insert(nodes.len());

        nodes.push(GraphNode {
            id: node_id.clone(),
            kind: NodeKind::Workflow,
            category: Category::Workflows,
            title: workflow.title(),
            sequence_index: event_count + index + 1,
            source: NodeSource::Workflow(index),
            dimmed: false,
        });

        if !view_mode.includes_workflow_edges() {
            continue;
        }

        let mut attached = HashSet::new();
        for part_id in &workflow.related_parts {
            let is_event = index_by_id
                .get(part_id.as_str())
                .and_then(|&node_index| nodes.get(node_index))
                .is_some_and(|node: &GraphNode| node.kind == NodeKind::Event);
            if !is_event {
                debug!(workflow = %workflow.id, part = %part_id, "dropping dangling workflow reference");
                continue;
            }
            if !attached.insert(part_id.as_str()) {
                continue;
            }

            edges.push(GraphEdge {
                id: format!("{node_id}-{part_id}"),
                source: node_id.clone(),
                target: part_id.to_string(),
                kind: EdgeKind::WorkflowAttachment,
                dimmed: false,
            });
        }
    }

    debug!(
        mode = %view_mode,
        nodes = nodes.len(),
        edges = edges.len(),
        "built conversation graph"
    );

    ConversationGraph {
        view_mode,
        nodes,
        edges,
        index_by_id,
    }
}
