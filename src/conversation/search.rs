use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::document::Document;
use super::graph::{ConversationGraph, NodePayload};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Ids of nodes whose title, type, author or content fuzzy-match `query`.
///
/// `None` when the query is blank, meaning no search is active.
pub fn search_matches(
    graph: &ConversationGraph,
    document: &Document,
    query: &str,
) -> Option<HashSet<String>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default();
    let matches = graph
        .nodes
        .iter()
        .filter(|node| {
            let mut haystacks = vec![node.title.as_str()];
            if let Some(payload) = graph.payload(document, node) {
                haystacks.push(payload.part_type());
                haystacks.push(payload.author());
                if let NodePayload::Event(event) = payload
                    && let Some(content) = event.content.as_deref()
                {
                    haystacks.push(content);
                }
            }

            haystacks
                .into_iter()
                .any(|text| fuzzy_match_score(&matcher, text, query).is_some())
        })
        .map(|node| node.id.clone())
        .collect();

    Some(matches)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::search_matches;
    use crate::conversation::document::Document;
    use crate::conversation::graph::{ViewMode, build_graph};

    #[test]
    fn matches_titles_authors_and_content() {
        let document: Document = serde_json::from_value(json!({
            "parts": [
                { "id": "a", "partType": "customer_initiated", "author": "Ada", "content": "Printer is on fire" },
                { "id": "b", "partType": "comment", "author": "Operator", "content": "Have you tried water" }
            ],
            "workflows": [{ "id": "w", "name": "Escalate", "started_at": "" }]
        }))
        .unwrap();
        let graph = build_graph(&document, ViewMode::Flow);

        assert_eq!(search_matches(&graph, &document, "   "), None);

        let printer = search_matches(&graph, &document, "printer").unwrap();
        assert!(printer.contains("a"));
        assert!(!printer.contains("b"));

        let escalate = search_matches(&graph, &document, "Escalate").unwrap();
        assert_eq!(escalate.len(), 1);
        assert!(escalate.contains("workflow_w"));

        let operator = search_matches(&graph, &document, "operatr").unwrap();
        assert!(operator.contains("b"));
    }

    #[test]
    fn payload_text_borrows_from_the_document() {
        let document: Document = serde_json::from_value(json!({
            "parts": [
                { "id": 1, "partType": "comment", "author": "Ada", "createdAt": 1749590944 },
                { "id": 2, "partType": "assignment" }
            ],
            "workflows": [{ "id": 9, "name": "Route", "started_at": "2025-06-10 21:29:05 UTC" }]
        }))
        .unwrap();
        let graph = build_graph(&document, ViewMode::Flow);

        let fields = graph
            .nodes
            .iter()
            .filter_map(|node| graph.payload(&document, node))
            .map(|payload| (payload.author(), payload.part_type(), payload.timestamp_raw()))
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            [
                ("Ada", "comment", "1749590944"),
                ("System", "assignment", ""),
                ("System", "workflow", "2025-06-10 21:29:05 UTC"),
            ]
        );

        let matches = search_matches(&graph, &document, "ada").unwrap();
        assert!(matches.contains("1"));
    }
}
