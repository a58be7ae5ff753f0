use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::part::PartType;

/// Coarse grouping used for filtering and highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Assignments,
    Comments,
    Workflows,
    System,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::Assignments,
        Self::Comments,
        Self::Workflows,
        Self::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignments => "assignments",
            Self::Comments => "comments",
            Self::Workflows => "workflows",
            Self::System => "system",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Assignments => "Assignments",
            Self::Comments => "Comments",
            Self::Workflows => "Workflows",
            Self::System => "System",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an event part.
///
/// This is the only place the mapping lives; node construction, stats and
/// table filtering all call it. Events never land in
/// [`Category::Workflows`], which is reserved for workflow-derived nodes.
pub fn categorize(part_type: &PartType) -> Category {
    match part_type {
        PartType::DefaultAssignment | PartType::Assignment => Category::Assignments,
        PartType::Comment => Category::Comments,
        _ => Category::System,
    }
}

/// [`categorize`] over a raw wire string.
pub fn category_of(raw_part_type: &str) -> Category {
    categorize(&PartType::from(raw_part_type))
}

/// The active category selection: everything, or one category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category '{0}' (expected all, assignments, comments, workflows or system)")]
pub struct ParseCategoryError(pub String);

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(Self::All);
        }

        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .map(Self::Only)
            .ok_or_else(|| ParseCategoryError(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{Category, CategoryFilter, category_of};

    #[rstest]
    #[case("default_assignment", Category::Assignments)]
    #[case("assignment", Category::Assignments)]
    #[case("comment", Category::Comments)]
    #[case("customer_initiated", Category::System)]
    #[case("language_detection", Category::System)]
    #[case("conversation_attribute_updated", Category::System)]
    #[case("custom_action_started", Category::System)]
    #[case("custom_action_finished", Category::System)]
    #[case("workflow", Category::System)]
    #[case("Comment", Category::System)]
    fn maps_part_types(#[case] raw: &str, #[case] expected: Category) {
        assert_eq!(category_of(raw), expected);
    }

    proptest! {
        #[test]
        fn categorization_is_total(raw in ".*") {
            let category = category_of(&raw);
            prop_assert!(Category::ALL.contains(&category));
            prop_assert_ne!(category, Category::Workflows);
        }
    }

    #[rstest]
    #[case("all", CategoryFilter::All)]
    #[case("Comments", CategoryFilter::Only(Category::Comments))]
    #[case(" workflows ", CategoryFilter::Only(Category::Workflows))]
    fn parses_filters(#[case] raw: &str, #[case] expected: CategoryFilter) {
        assert_eq!(raw.parse::<CategoryFilter>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!("billing".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn all_matches_every_category() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.matches(category));
        }
        assert!(!CategoryFilter::Only(Category::Comments).matches(Category::System));
    }
}
