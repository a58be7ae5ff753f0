//! Conversation graph construction and view-state engine.
//!
//! A [`Document`] is turned into a [`ConversationGraph`] per [`ViewMode`],
//! positioned by [`layout`], dimmed by [`apply_filter`], and tracked together
//! with the current selection in [`ViewState`].

mod category;
mod document;
mod filter;
mod graph;
mod io;
mod layout;
mod part;
mod sample;
mod scalar;
mod search;
mod selection;
mod state;
mod stats;
mod table;

#[cfg(test)]
mod tests;

pub use category::{Category, CategoryFilter, ParseCategoryError, categorize, category_of};
pub use document::{
    Document, Event, ExecutedControl, WORKFLOW_NODE_PREFIX, Workflow, WorkflowState,
    parse_timestamp,
};
pub use filter::apply_filter;
pub use graph::{
    ConversationGraph, EdgeKind, GraphEdge, GraphNode, NodeKind, NodePayload, NodeSource,
    ParseViewModeError, ViewMode, build_graph,
};
pub use io::{
    DocumentError, export_document, export_file_name, parse_document, read_document,
    write_document,
};
pub use layout::{
    COMPACT_COLUMN_WIDTH, COMPACT_COLUMNS, COMPACT_ROW_HEIGHT, FLOW_COLUMN_OFFSET,
    FLOW_ROW_SPACING, FLOW_WORKFLOW_COLUMN_X, FLOW_WORKFLOW_ROW_SPACING, Layout, Point, layout,
};
pub use part::{PartInfo, PartType};
pub use sample::{SAMPLE_CONVERSATION, sample_document};
pub use scalar::Scalar;
pub use search::search_matches;
pub use selection::{ClearReason, Selection};
pub use state::{Action, ViewState};
pub use stats::{ConversationStats, stats};
pub use table::{SortDirection, SortField, TableRow, TableSort, sort_rows, table_rows};
