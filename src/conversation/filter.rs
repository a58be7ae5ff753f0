use super::category::{Category, CategoryFilter};
use super::graph::{ConversationGraph, EdgeKind, GraphEdge};

/// Copy of `graph` with `dimmed` recomputed for `filter`.
///
/// Identity, order and categories are untouched, so applying the same filter
/// twice gives the same graph.
pub fn apply_filter(graph: &ConversationGraph, filter: CategoryFilter) -> ConversationGraph {
    let mut filtered = graph.clone();

    for node in &mut filtered.nodes {
        node.dimmed = !filter.matches(node.category);
    }

    let dimmed_edges = filtered
        .edges
        .iter()
        .map(|edge| edge_dimmed(graph, edge, filter))
        .collect::<Vec<_>>();
    for (edge, dimmed) in filtered.edges.iter_mut().zip(dimmed_edges) {
        edge.dimmed = dimmed;
    }

    filtered
}

/// A sequential edge stays lit when either endpoint is in the selected
/// category. Attachment edges are lit only under the workflows filter.
fn edge_dimmed(graph: &ConversationGraph, edge: &GraphEdge, filter: CategoryFilter) -> bool {
    let CategoryFilter::Only(selected) = filter else {
        return false;
    };

    match edge.kind {
        EdgeKind::WorkflowAttachment => selected != Category::Workflows,
        EdgeKind::Sequential => {
            let touches = |id: &str| {
                graph
                    .node(id)
                    .is_some_and(|node| node.category == selected)
            };
            !(touches(&edge.source) || touches(&edge.target))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::apply_filter;
    use crate::conversation::category::{Category, CategoryFilter};
    use crate::conversation::document::Document;
    use crate::conversation::graph::{EdgeKind, ViewMode, build_graph};

    fn document() -> Document {
        serde_json::from_value(json!({
            "id": "c1",
            "parts": [
                { "id": "a", "partType": "customer_initiated", "createdAt": "2025-06-10 21:29:04 UTC" },
                { "id": "b", "partType": "assignment", "createdAt": "2025-06-10 21:29:05 UTC" },
                { "id": "c", "partType": "comment", "createdAt": "2025-06-10 21:29:06 UTC" }
            ],
            "workflows": [
                { "id": "w", "name": "Route", "state": "completed", "started_at": "2025-06-10 21:29:05 UTC", "related_parts": ["c"] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn attachment_edges_light_only_for_workflows() {
        let graph = build_graph(&document(), ViewMode::Flow);

        let comments = apply_filter(&graph, CategoryFilter::Only(Category::Comments));
        let attachment = comments
            .edges
            .iter()
            .find(|edge| edge.kind == EdgeKind::WorkflowAttachment)
            .unwrap();
        assert!(attachment.dimmed, "comment target must not light the attachment");

        let workflows = apply_filter(&graph, CategoryFilter::Only(Category::Workflows));
        assert!(workflows.edges.iter().all(|edge| match edge.kind {
            EdgeKind::WorkflowAttachment => !edge.dimmed,
            EdgeKind::Sequential => edge.dimmed,
        }));
        assert!(!workflows.node("workflow_w").unwrap().dimmed);
        assert!(workflows.node("c").unwrap().dimmed);
    }

    #[test]
    fn filter_never_changes_identity() {
        let graph = build_graph(&document(), ViewMode::Flow);
        let filtered = apply_filter(&graph, CategoryFilter::Only(Category::System));

        let ids = |g: &crate::conversation::graph::ConversationGraph| {
            g.nodes.iter().map(|node| node.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&graph), ids(&filtered));
        assert_eq!(graph.edges.len(), filtered.edges.len());
        assert_eq!(apply_filter(&filtered, CategoryFilter::All), graph);
    }
}
