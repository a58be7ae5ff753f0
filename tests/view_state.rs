use convo_visualizer::conversation::{
    Action, Category, CategoryFilter, ConversationStats, Document, EdgeKind, NodeKind,
    NodePayload, TableSort, ViewMode, ViewState, apply_filter, build_graph, parse_document,
    sample_document, stats,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn scenario_a() -> Document {
    serde_json::from_value(json!({
        "id": "a",
        "state": "state_open",
        "channel": "messenger",
        "parts": [
            { "id": "start", "partType": "customer_initiated", "createdAt": "2025-06-10 21:29:04 UTC" },
            { "id": "assign", "partType": "assignment", "createdAt": "2025-06-10 21:29:05 UTC" },
            { "id": "reply", "partType": "comment", "createdAt": "2025-06-10 21:29:06 UTC" }
        ]
    }))
    .unwrap()
}

#[fixture]
fn scenario_b() -> Document {
    serde_json::from_value(json!({
        "id": "b",
        "parts": [
            { "id": "one", "partType": "customer_initiated", "createdAt": "2025-06-10 21:29:04 UTC" },
            { "id": "two", "partType": "comment", "createdAt": "2025-06-10 21:29:05 UTC" }
        ],
        "workflows": [{
            "id": "77",
            "name": "Auto reply",
            "state": "completed",
            "started_at": "2025-06-10 21:29:04 UTC",
            "finished_at": "2025-06-10 21:29:05 UTC",
            "executed_controls": [{ "step": "Send reply" }],
            "related_parts": ["two", "missing"]
        }]
    }))
    .unwrap()
}

#[rstest]
fn scenario_a_graph_and_stats(scenario_a: Document) {
    let graph = build_graph(&scenario_a, ViewMode::Flow);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph
        .edges
        .iter()
        .all(|edge| edge.kind == EdgeKind::Sequential));
    assert_eq!(
        graph.nodes.iter().map(|node| node.title.as_str()).collect::<Vec<_>>(),
        ["Conversation Started", "Manual Assignment", "Message"]
    );
    assert_eq!(
        stats(&scenario_a),
        ConversationStats {
            total: 3,
            assignments: 1,
            comments: 1,
            system: 1,
            workflows: 0,
        }
    );
}

#[rstest]
fn scenario_b_drops_dangling_reference(scenario_b: Document) {
    let graph = build_graph(&scenario_b, ViewMode::Flow);

    assert_eq!(graph.node_count(), 3);
    let sequential = graph
        .edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Sequential)
        .count();
    let attachments = graph
        .edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::WorkflowAttachment)
        .collect::<Vec<_>>();
    assert_eq!(sequential, 1);
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].source, "workflow_77");
    assert_eq!(attachments[0].target, "two");

    let workflow = graph.node("workflow_77").unwrap();
    assert_eq!(workflow.kind, NodeKind::Workflow);
    assert_eq!(workflow.category, Category::Workflows);
    assert_eq!(workflow.title, "Workflow: Auto reply");
    assert_eq!(workflow.sequence_index, 3);
}

#[rstest]
fn scenario_c_comment_filter(scenario_a: Document) {
    let graph = apply_filter(
        &build_graph(&scenario_a, ViewMode::Flow),
        CategoryFilter::Only(Category::Comments),
    );

    let dimmed = |id: &str| graph.node(id).unwrap().dimmed;
    assert!(dimmed("start"));
    assert!(dimmed("assign"));
    assert!(!dimmed("reply"));

    let edge = |source: &str| {
        graph
            .edges
            .iter()
            .find(|edge| edge.source == source)
            .unwrap()
            .dimmed
    };
    assert!(edge("start"), "neither endpoint is a comment");
    assert!(!edge("assign"), "target is a comment");
}

#[rstest]
#[case(Action::SetCategoryFilter(CategoryFilter::Only(Category::Comments)))]
#[case(Action::SetCategoryFilter(CategoryFilter::All))]
#[case(Action::SetViewMode(ViewMode::Table))]
#[case(Action::SetViewMode(ViewMode::Flow))]
#[case(Action::SelectNode(None))]
fn selection_closes_on_context_change(scenario_a: Document, #[case] action: Action) {
    let mut state = ViewState::new(scenario_a, ViewMode::Flow, CategoryFilter::All);
    assert!(state.select_node(Some("assign")));
    assert_eq!(state.selected_id(), Some("assign"));

    state.apply(action);
    assert_eq!(state.selected_id(), None);
    assert!(state.selected_payload().is_none());
}

#[rstest]
fn selection_exposes_payload(scenario_b: Document) {
    let mut state = ViewState::new(scenario_b, ViewMode::Flow, CategoryFilter::All);

    state.apply(Action::SelectNode(Some("workflow_77".to_owned())));
    match state.selected_payload() {
        Some(NodePayload::Workflow(workflow)) => {
            assert_eq!(workflow.duration_seconds(), Some(1));
            assert_eq!(workflow.latest_step(), Some("Send reply"));
        }
        other => panic!("expected workflow payload, got {other:?}"),
    }

    assert!(state.select_node(Some("not-a-node")));
    assert_eq!(state.selected_id(), None);
}

#[rstest]
fn compact_view_has_no_workflow_nodes(scenario_b: Document) {
    let mut state = ViewState::new(scenario_b, ViewMode::Flow, CategoryFilter::All);
    state.set_view_mode(ViewMode::Compact);

    assert_eq!(state.graph().node_count(), 2);
    assert!(!state.select_node(Some("workflow_77")));
    assert_eq!(state.positioned_nodes().count(), 2);

    state.set_view_mode(ViewMode::Table);
    assert!(state.layout().is_none());
    assert_eq!(state.positioned_nodes().count(), 0);
    let rows = state.table_rows(TableSort::default(), None);
    assert_eq!(rows.len(), 3);
}

#[rstest]
fn filter_keeps_layout(scenario_b: Document) {
    let mut state = ViewState::new(scenario_b, ViewMode::Flow, CategoryFilter::All);
    let before = state.layout().cloned();
    let revision = state.revision();

    state.set_category_filter(CategoryFilter::Only(Category::Workflows));
    assert_eq!(state.layout().cloned(), before);
    assert!(state.revision() > revision);
    assert!(!state.graph().node("workflow_77").unwrap().dimmed);
    assert!(state.graph().node("one").unwrap().dimmed);
}

#[rstest]
fn failed_load_keeps_previous_document(scenario_a: Document) {
    let mut state = ViewState::new(scenario_a.clone(), ViewMode::Flow, CategoryFilter::All);
    state.set_category_filter(CategoryFilter::Only(Category::Comments));
    state.select_node(Some("reply"));
    let revision = state.revision();

    let error = state.load_json(r#"{"id": "broken"}"#).unwrap_err();
    assert!(error.is_malformed());
    assert_eq!(state.document(), &scenario_a);
    assert_eq!(state.selected_id(), Some("reply"));
    assert_eq!(state.category_filter(), CategoryFilter::Only(Category::Comments));
    assert_eq!(state.revision(), revision);
}

#[rstest]
fn successful_load_resets_filter_and_selection(scenario_a: Document, scenario_b: Document) {
    let mut state = ViewState::new(scenario_a, ViewMode::Compact, CategoryFilter::All);
    state.set_category_filter(CategoryFilter::Only(Category::System));
    state.select_node(Some("start"));

    let raw = serde_json::to_string(&scenario_b).unwrap();
    state.load_json(&raw).unwrap();

    assert_eq!(state.document(), &scenario_b);
    assert_eq!(state.category_filter(), CategoryFilter::All);
    assert_eq!(state.view_mode(), ViewMode::Compact);
    assert_eq!(state.selected_id(), None);
    assert_eq!(state.stats().workflows, 1);
    assert!(state.graph().nodes.iter().all(|node| !node.dimmed));
}

#[test]
fn bundled_sample_loads() {
    let document = sample_document().unwrap();
    let graph = build_graph(&document, ViewMode::Flow);

    assert_eq!(document.parts.len(), 7);
    assert_eq!(graph.node_count(), 9);
    // 6 sequential, 3 + 1 attachments; "deleted-part" is dangling.
    assert_eq!(graph.edge_count(), 10);
    assert_eq!(
        stats(&document),
        ConversationStats {
            total: 7,
            assignments: 3,
            comments: 1,
            system: 3,
            workflows: 2,
        }
    );
    assert!(parse_document(&serde_json::to_string(&document).unwrap()).is_ok());
}
