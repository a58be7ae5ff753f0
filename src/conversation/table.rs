use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::category::{Category, CategoryFilter};
use super::document::{Document, parse_timestamp};
use super::graph::{ConversationGraph, NodeKind, NodePayload};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    Position,
    #[default]
    Timestamp,
    Author,
    Type,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TableSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TableSort {
    /// Same field flips direction; a new field starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub node_id: String,
    pub position: usize,
    pub kind: NodeKind,
    pub part_type: String,
    pub label: String,
    pub category: Category,
    pub timestamp_raw: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub author: String,
    pub content: String,
    pub summary: String,
}

/// Rows for the table view.
///
/// Unlike the graph, the table drops rows outside the category filter (and
/// outside `matches` when a search is active) instead of dimming them.
pub fn table_rows(
    document: &Document,
    graph: &ConversationGraph,
    filter: CategoryFilter,
    sort: TableSort,
    matches: Option<&HashSet<String>>,
) -> Vec<TableRow> {
    let mut rows = graph
        .nodes
        .iter()
        .filter(|node| filter.matches(node.category))
        .filter(|node| matches.is_none_or(|matches| matches.contains(&node.id)))
        .filter_map(|node| {
            let payload = graph.payload(document, node)?;
            let (content, summary) = match payload {
                NodePayload::Event(event) => {
                    let summary = event
                        .details_map()
                        .map(|details| {
                            details
                                .keys()
                                .take(2)
                                .map(String::as_str)
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                        .unwrap_or_default();
                    (event.content.clone().unwrap_or_default(), summary)
                }
                NodePayload::Workflow(workflow) => (
                    workflow.title(),
                    format!(
                        "{} \u{2022} {} parts",
                        workflow.state,
                        workflow.related_parts.len()
                    ),
                ),
            };

            let timestamp_raw = payload.timestamp_raw().to_owned();
            Some(TableRow {
                node_id: node.id.clone(),
                position: node.sequence_index,
                kind: node.kind,
                part_type: payload.part_type().to_owned(),
                label: match payload {
                    NodePayload::Event(event) => event.title().to_owned(),
                    NodePayload::Workflow(_) => "Workflow".to_owned(),
                },
                category: node.category,
                timestamp: parse_timestamp(&timestamp_raw),
                timestamp_raw,
                author: payload.author().to_owned(),
                content,
                summary,
            })
        })
        .collect::<Vec<_>>();

    sort_rows(&mut rows, sort);
    rows
}

pub fn sort_rows(rows: &mut [TableRow], sort: TableSort) {
    rows.sort_by(|a, b| compare_rows(a, b, sort).then_with(|| a.position.cmp(&b.position)));
}

fn compare_rows(a: &TableRow, b: &TableRow, sort: TableSort) -> Ordering {
    let ordering = match sort.field {
        SortField::Position => a.position.cmp(&b.position),
        SortField::Author => a.author.cmp(&b.author),
        SortField::Type => a.part_type.cmp(&b.part_type),
        SortField::Timestamp => match (a.timestamp, b.timestamp) {
            (Some(left), Some(right)) => left.cmp(&right),
            // Unparsable timestamps stay at the bottom in both directions.
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };

    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
