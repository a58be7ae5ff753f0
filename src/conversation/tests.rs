use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use super::{
    Category, CategoryFilter, Document, EdgeKind, Event, ExecutedControl, PartType, Scalar,
    ViewMode, Workflow, WorkflowState, apply_filter, build_graph, export_document, layout, parse_document,
};

const PART_TYPES: [&str; 10] = [
    "customer_initiated",
    "default_assignment",
    "assignment",
    "comment",
    "language_detection",
    "conversation_attribute_updated",
    "custom_action_started",
    "custom_action_finished",
    "sla_applied",
    "",
];

fn arb_part_type() -> impl Strategy<Value = PartType> {
    prop_oneof![
        4 => prop::sample::select(PART_TYPES.to_vec()).prop_map(PartType::from),
        1 => "[a-z_]{1,16}".prop_map(PartType::from),
    ]
}

fn arb_details() -> impl Strategy<Value = Option<Value>> {
    let object = prop::collection::btree_map("[a-z_]{1,8}", "[ -~]{0,12}", 0..3).prop_map(
        |entries| {
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, json!(value)))
                    .collect(),
            )
        },
    );
    prop::option::of(prop_oneof![
        4 => object,
        1 => "[ -~]{0,12}".prop_map(Value::from),
    ])
}

/// Part `index` as the export would name it, either `"p3"` or `1003`.
fn part_id(index: usize, numeric: bool) -> Scalar {
    if numeric {
        Scalar::from(1000 + index as u64)
    } else {
        Scalar::from(format!("p{index}"))
    }
}

fn arb_document() -> impl Strategy<Value = Document> {
    let parts = prop::collection::vec(
        (
            arb_part_type(),
            prop::option::of("[ -~]{0,20}"),
            prop::option::of("[a-zA-Z0-9]{1,10}"),
            arb_details(),
        ),
        0..12,
    );
    let workflows = prop::option::of(prop::collection::vec(
        (
            "[A-Za-z ]{1,12}",
            prop::collection::vec(0usize..16, 0..5),
            prop::sample::select(vec!["pending", "running", "completed", "failed"]),
        ),
        0..4,
    ));

    (parts, workflows, any::<bool>()).prop_map(|(parts, workflows, numeric)| {
        let parts = parts
            .into_iter()
            .enumerate()
            .map(|(index, (part_type, content, author, details))| Event {
                id: part_id(index, numeric),
                part_type,
                created_at: format!("2025-06-10 21:{:02}:00 UTC", index % 60).into(),
                author,
                channel: None,
                content,
                details,
                extra: Map::new(),
            })
            .collect::<Vec<_>>();

        let workflows = workflows.map(|workflows| {
            workflows
                .into_iter()
                .enumerate()
                .map(|(index, (name, related, state))| Workflow {
                    id: format!("w{index}").into(),
                    name,
                    state: WorkflowState::from(state.to_owned()),
                    started_at: "2025-06-10T21:29:05Z".into(),
                    finished_at: Scalar::default(),
                    entity: None,
                    executed_controls: vec![ExecutedControl {
                        step: "Route".to_owned(),
                        extra: Map::new(),
                    }],
                    related_parts: related
                        .into_iter()
                        .map(|part| part_id(part, numeric))
                        .collect(),
                    extra: Map::new(),
                })
                .collect()
        });

        Document {
            id: "c1".into(),
            state: Some("state_open".to_owned()),
            channel: Some("messenger".to_owned()),
            parts,
            workflows,
            extra: Map::new(),
        }
    })
}

fn arb_filter() -> impl Strategy<Value = CategoryFilter> {
    prop_oneof![
        Just(CategoryFilter::All),
        prop::sample::select(Category::ALL.to_vec()).prop_map(CategoryFilter::Only),
    ]
}

fn arb_view_mode() -> impl Strategy<Value = ViewMode> {
    prop::sample::select(ViewMode::ALL.to_vec())
}

fn existing_related(document: &Document, workflow: &Workflow) -> usize {
    let ids = document
        .parts
        .iter()
        .map(|event| event.id.as_str())
        .collect::<HashSet<_>>();
    workflow
        .related_parts
        .iter()
        .filter(|part| ids.contains(part.as_str()))
        .collect::<HashSet<_>>()
        .len()
}

proptest! {
    #[test]
    fn flow_graph_counts(document in arb_document()) {
        let graph = build_graph(&document, ViewMode::Flow);
        let n = document.parts.len();
        let w = document.workflows().len();
        let attachments = document
            .workflows()
            .iter()
            .map(|workflow| existing_related(&document, workflow))
            .sum::<usize>();

        prop_assert_eq!(graph.node_count(), n + w);
        prop_assert_eq!(graph.edge_count(), n.saturating_sub(1) + attachments);
        prop_assert_eq!(
            graph.edges.iter().filter(|edge| edge.kind == EdgeKind::Sequential).count(),
            n.saturating_sub(1)
        );
    }

    #[test]
    fn edges_reference_existing_nodes(document in arb_document(), mode in arb_view_mode()) {
        let graph = build_graph(&document, mode);
        for edge in &graph.edges {
            prop_assert!(graph.contains(&edge.source));
            prop_assert!(graph.contains(&edge.target));
        }
    }

    #[test]
    fn sequence_indices_are_one_based_and_dense(document in arb_document(), mode in arb_view_mode()) {
        let graph = build_graph(&document, mode);
        let indices = graph.nodes.iter().map(|node| node.sequence_index).collect::<Vec<_>>();
        let expected = (1..=graph.node_count()).collect::<Vec<_>>();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn build_is_deterministic(document in arb_document(), mode in arb_view_mode()) {
        prop_assert_eq!(build_graph(&document, mode), build_graph(&document, mode));
    }

    #[test]
    fn filter_is_idempotent(document in arb_document(), filter in arb_filter()) {
        let graph = build_graph(&document, ViewMode::Flow);
        let once = apply_filter(&graph, filter);
        let twice = apply_filter(&once, filter);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_all_focuses_everything(document in arb_document(), other in arb_filter()) {
        let graph = apply_filter(&build_graph(&document, ViewMode::Flow), other);
        let all = apply_filter(&graph, CategoryFilter::All);
        prop_assert!(all.nodes.iter().all(|node| !node.dimmed));
        prop_assert!(all.edges.iter().all(|edge| !edge.dimmed));
    }

    #[test]
    fn layout_is_deterministic(document in arb_document(), mode in arb_view_mode()) {
        let graph = build_graph(&document, mode);
        let first = layout(&graph, mode);
        let second = layout(&graph, mode);
        prop_assert_eq!(&first, &second);
        match first {
            Some(positions) => prop_assert_eq!(positions.len(), graph.node_count()),
            None => prop_assert_eq!(mode, ViewMode::Table),
        }
    }

    #[test]
    fn export_round_trips(document in arb_document()) {
        let exported = export_document(&document).unwrap();
        let parsed = parse_document(&exported).unwrap();
        prop_assert_eq!(parsed, document);
    }
}

#[test]
fn compact_grid_uses_four_columns() {
    let document: Document = serde_json::from_value(json!({
        "parts": (0..6)
            .map(|index| json!({ "id": format!("p{index}"), "partType": "comment" }))
            .collect::<Vec<_>>()
    }))
    .unwrap();
    let graph = build_graph(&document, ViewMode::Compact);
    let positions = layout(&graph, ViewMode::Compact).unwrap();

    let column = |id: &str| positions.position(id).unwrap().x / super::COMPACT_COLUMN_WIDTH;
    let row = |id: &str| positions.position(id).unwrap().y / super::COMPACT_ROW_HEIGHT;
    assert_eq!((column("p0"), row("p0")), (0.0, 0.0));
    assert_eq!((column("p3"), row("p3")), (3.0, 0.0));
    assert_eq!((column("p4"), row("p4")), (0.0, 1.0));
    assert_eq!((column("p5"), row("p5")), (1.0, 1.0));
}

#[test]
fn flow_layout_alternates_and_stacks_workflows() {
    let document: Document = serde_json::from_value(json!({
        "parts": [
            { "id": "a", "partType": "comment" },
            { "id": "b", "partType": "comment" },
            { "id": "c", "partType": "comment" }
        ],
        "workflows": [
            { "id": "1", "name": "One", "related_parts": ["a"] },
            { "id": "2", "name": "Two", "related_parts": [] }
        ]
    }))
    .unwrap();
    let graph = build_graph(&document, ViewMode::Flow);
    let positions = layout(&graph, ViewMode::Flow).unwrap();

    let a = positions.position("a").unwrap();
    let b = positions.position("b").unwrap();
    let c = positions.position("c").unwrap();
    assert_eq!(a.x, c.x);
    assert_ne!(a.x, b.x);
    assert!(a.y < b.y && b.y < c.y);

    let first = positions.position("workflow_1").unwrap();
    let second = positions.position("workflow_2").unwrap();
    assert_eq!(first.x, second.x);
    assert!(first.x > b.x.max(a.x));
    assert!(first.y < second.y);
}

#[test]
fn compact_and_table_graphs_skip_attachment_edges() {
    let document: Document = serde_json::from_value(json!({
        "parts": [{ "id": "a", "partType": "comment" }, { "id": "b", "partType": "assignment" }],
        "workflows": [{ "id": "1", "name": "One", "related_parts": ["a", "b"] }]
    }))
    .unwrap();

    let compact = build_graph(&document, ViewMode::Compact);
    assert_eq!(compact.node_count(), 2);
    assert_eq!(compact.edge_count(), 1);

    let table = build_graph(&document, ViewMode::Table);
    assert_eq!(table.node_count(), 3);
    assert_eq!(table.edge_count(), 1);
    assert!(layout(&table, ViewMode::Table).is_none());

    let flow = build_graph(&document, ViewMode::Flow);
    assert_eq!(flow.edge_count(), 3);
}

#[test]
fn repeated_related_ids_attach_once() {
    let document: Document = serde_json::from_value(json!({
        "parts": [{ "id": "a", "partType": "comment" }],
        "workflows": [{ "id": "1", "name": "One", "related_parts": ["a", "a", "workflow_1"] }]
    }))
    .unwrap();

    let graph = build_graph(&document, ViewMode::Flow);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges[0].id, "workflow_1-a");
}
