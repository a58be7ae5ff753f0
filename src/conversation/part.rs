use std::fmt;

use serde::{Deserialize, Serialize};

/// The recorded kind of a conversation part.
///
/// Unrecognised values are kept verbatim in [`PartType::Other`] so a document
/// from a newer producer still loads and exports unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartType {
    CustomerInitiated,
    DefaultAssignment,
    Assignment,
    Comment,
    LanguageDetection,
    ConversationAttributeUpdated,
    CustomActionStarted,
    CustomActionFinished,
    Other(String),
}

/// Display metadata for one part type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartInfo {
    pub label: &'static str,
    pub description: &'static str,
}

const SYSTEM_EVENT: PartInfo = PartInfo {
    label: "System Event",
    description: "Automated system action",
};

impl PartType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CustomerInitiated => "customer_initiated",
            Self::DefaultAssignment => "default_assignment",
            Self::Assignment => "assignment",
            Self::Comment => "comment",
            Self::LanguageDetection => "language_detection",
            Self::ConversationAttributeUpdated => "conversation_attribute_updated",
            Self::CustomActionStarted => "custom_action_started",
            Self::CustomActionFinished => "custom_action_finished",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Label and description for this type. Every type without its own row
    /// shares the "System Event" entry.
    pub fn info(&self) -> PartInfo {
        match self {
            Self::CustomerInitiated => PartInfo {
                label: "Conversation Started",
                description: "Initial customer contact that began this conversation",
            },
            Self::DefaultAssignment => PartInfo {
                label: "Default Assignment",
                description: "Automatically assigned based on rules and conditions",
            },
            Self::Assignment => PartInfo {
                label: "Manual Assignment",
                description: "Manually assigned by a team member",
            },
            Self::Comment => PartInfo {
                label: "Message",
                description: "Communication between customer and support team",
            },
            Self::LanguageDetection => PartInfo {
                label: "Language Detection",
                description: "Automated language identification process",
            },
            Self::ConversationAttributeUpdated => PartInfo {
                label: "Attribute Updated",
                description: "Conversation properties were modified",
            },
            Self::CustomActionStarted => PartInfo {
                label: "Custom Action Started",
                description: "An external custom action was invoked",
            },
            Self::CustomActionFinished => PartInfo {
                label: "Custom Action Finished",
                description: "An external custom action returned",
            },
            Self::Other(_) => SYSTEM_EVENT,
        }
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }
}

impl Default for PartType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for PartType {
    fn from(value: &str) -> Self {
        match value {
            "customer_initiated" => Self::CustomerInitiated,
            "default_assignment" => Self::DefaultAssignment,
            "assignment" => Self::Assignment,
            "comment" => Self::Comment,
            "language_detection" => Self::LanguageDetection,
            "conversation_attribute_updated" => Self::ConversationAttributeUpdated,
            "custom_action_started" => Self::CustomActionStarted,
            "custom_action_finished" => Self::CustomActionFinished,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for PartType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<PartType> for String {
    fn from(value: PartType) -> Self {
        match value {
            PartType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
