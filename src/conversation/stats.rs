use serde::Serialize;

use super::category::Category;
use super::document::Document;

/// Per-category counts. `total` counts parts; workflows are only in
/// `workflows`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversationStats {
    pub total: usize,
    pub assignments: usize,
    pub comments: usize,
    pub system: usize,
    pub workflows: usize,
}

impl ConversationStats {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Assignments => self.assignments,
            Category::Comments => self.comments,
            Category::Workflows => self.workflows,
            Category::System => self.system,
        }
    }
}

pub fn stats(document: &Document) -> ConversationStats {
    let mut stats = ConversationStats {
        total: document.parts.len(),
        workflows: document.workflows().len(),
        ..ConversationStats::default()
    };

    for event in &document.parts {
        match event.category() {
            Category::Assignments => stats.assignments += 1,
            Category::Comments => stats.comments += 1,
            Category::System => stats.system += 1,
            Category::Workflows => stats.workflows += 1,
        }
    }

    stats
}
