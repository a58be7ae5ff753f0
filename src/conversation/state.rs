use std::collections::HashSet;

use tracing::debug;

use super::category::CategoryFilter;
use super::document::Document;
use super::filter::apply_filter;
use super::graph::{ConversationGraph, GraphNode, NodePayload, ViewMode, build_graph};
use super::io::{DocumentError, parse_document};
use super::layout::{Layout, Point, layout};
use super::selection::{ClearReason, Selection};
use super::stats::{ConversationStats, stats};
use super::table::{TableRow, TableSort, table_rows};

/// User actions the engine reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetDocument(Box<Document>),
    SetCategoryFilter(CategoryFilter),
    SetViewMode(ViewMode),
    SelectNode(Option<String>),
}

/// Authoritative document plus the few UI choices, and everything derived
/// from them.
///
/// Every action rebuilds the derived graph and layout from scratch rather
/// than patching the previous one.
#[derive(Clone, Debug)]
pub struct ViewState {
    document: Document,
    category_filter: CategoryFilter,
    view_mode: ViewMode,
    selection: Selection,
    revision: u64,
    graph: ConversationGraph,
    layout: Option<Layout>,
    stats: ConversationStats,
}

impl ViewState {
    pub fn new(document: Document, view_mode: ViewMode, category_filter: CategoryFilter) -> Self {
        let base = build_graph(&document, view_mode);
        let graph = apply_filter(&base, category_filter);
        let layout = layout(&graph, view_mode);
        let stats = stats(&document);

        Self {
            document,
            category_filter,
            view_mode,
            selection: Selection::default(),
            revision: 0,
            graph,
            layout,
            stats,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetDocument(document) => self.set_document(*document),
            Action::SetCategoryFilter(filter) => self.set_category_filter(filter),
            Action::SetViewMode(mode) => self.set_view_mode(mode),
            Action::SelectNode(id) => {
                self.select_node(id.as_deref());
            }
        }
    }

    /// Replaces the document and resets filter and selection. View mode is
    /// kept.
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        self.category_filter = CategoryFilter::All;
        self.selection.clear(ClearReason::DocumentReplaced);
        self.stats = stats(&self.document);
        self.rebuild();
    }

    /// Parses and installs `raw`. On error nothing changes.
    pub fn load_json(&mut self, raw: &str) -> Result<(), DocumentError> {
        let document = parse_document(raw)?;
        self.set_document(document);
        Ok(())
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.selection.clear(ClearReason::FilterChanged);
        self.category_filter = filter;
        self.rebuild();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.selection.clear(ClearReason::ViewModeChanged);
        self.view_mode = mode;
        self.rebuild();
    }

    /// Opens `id`, or closes the panel for `None` or an id not in the
    /// current graph. Returns whether the selection changed.
    pub fn select_node(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.graph.contains(id) => self.selection.open(id),
            Some(_) => self.selection.clear(ClearReason::Missing),
            None => self.selection.clear(ClearReason::Background),
        }
    }

    fn rebuild(&mut self) {
        let base = build_graph(&self.document, self.view_mode);
        self.graph = apply_filter(&base, self.category_filter);
        self.layout = layout(&self.graph, self.view_mode);
        self.revision = self.revision.wrapping_add(1);
        debug!(
            revision = self.revision,
            mode = %self.view_mode,
            filter = %self.category_filter,
            "derived view state rebuilt"
        );
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category_filter
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn graph(&self) -> &ConversationGraph {
        &self.graph
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn stats(&self) -> ConversationStats {
        self.stats
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.get()
    }

    pub fn selected_node(&self) -> Option<&GraphNode> {
        self.selected_id().and_then(|id| self.graph.node(id))
    }

    pub fn selected_payload(&self) -> Option<NodePayload<'_>> {
        let node = self.selected_node()?;
        self.graph.payload(&self.document, node)
    }

    /// Nodes paired with their coordinates. Empty in table view.
    pub fn positioned_nodes(&self) -> impl Iterator<Item = (&GraphNode, Point)> {
        self.graph.nodes.iter().filter_map(|node| {
            self.layout
                .as_ref()
                .and_then(|layout| layout.position(&node.id))
                .map(|point| (node, point))
        })
    }

    pub fn table_rows(&self, sort: TableSort, matches: Option<&HashSet<String>>) -> Vec<TableRow> {
        table_rows(
            &self.document,
            &self.graph,
            self.category_filter,
            sort,
            matches,
        )
    }
}
