use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::{Category, categorize};
use super::part::PartType;
use super::scalar::Scalar;

/// Prefix that turns a workflow id into its graph node id.
pub const WORKFLOW_NODE_PREFIX: &str = "workflow_";

/// A conversation transcript: ordered parts plus optional automation runs.
///
/// Fields the engine does not interpret are kept in `extra` so an export
/// writes them back out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Scalar::is_missing")]
    pub id: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub parts: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflows: Option<Vec<Workflow>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One conversation part. Document order is chronological order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Scalar,
    #[serde(default)]
    pub part_type: PartType,
    #[serde(default, skip_serializing_if = "Scalar::is_missing")]
    pub created_at: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Usually an object of extra facts; other JSON is kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recorded automation run. Read-only history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Scalar,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: WorkflowState,
    #[serde(default, skip_serializing_if = "Scalar::is_missing")]
    pub started_at: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_missing")]
    pub finished_at: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default)]
    pub executed_controls: Vec<ExecutedControl>,
    #[serde(default)]
    pub related_parts: Vec<Scalar>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutedControl {
    #[serde(default)]
    pub step: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkflowState {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl WorkflowState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Unknown".to_owned(),
        }
    }
}

impl From<String> for WorkflowState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<WorkflowState> for String {
    fn from(value: WorkflowState) -> Self {
        match value {
            WorkflowState::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Document {
    pub fn workflows(&self) -> &[Workflow] {
        self.workflows.as_deref().unwrap_or_default()
    }

    pub fn workflow_by_node_id(&self, node_id: &str) -> Option<&Workflow> {
        let workflow_id = node_id.strip_prefix(WORKFLOW_NODE_PREFIX)?;
        self.workflows()
            .iter()
            .find(|workflow| workflow.id == workflow_id)
    }

    /// `state` without the `state_` prefix, e.g. `open`.
    pub fn state_label(&self) -> &str {
        match self.state.as_deref() {
            Some(state) => state.strip_prefix("state_").unwrap_or(state),
            None => "unknown",
        }
    }
}

impl Event {
    pub fn category(&self) -> Category {
        categorize(&self.part_type)
    }

    pub fn title(&self) -> &'static str {
        self.part_type.label()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_str())
    }

    /// `details` when it is an object. Anything else has no keys to list.
    pub fn details_map(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref().and_then(Value::as_object)
    }
}

impl Workflow {
    pub fn node_id(&self) -> String {
        format!("{WORKFLOW_NODE_PREFIX}{}", self.id)
    }

    pub fn title(&self) -> String {
        format!("Workflow: {}", self.name)
    }

    pub fn started(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.started_at.as_str())
    }

    /// Whole seconds between start and finish, rounded to nearest.
    pub fn duration_seconds(&self) -> Option<i64> {
        let start = self.started()?;
        let end = parse_timestamp(self.finished_at.non_empty()?)?;
        let millis = (end - start).num_milliseconds();
        Some((millis as f64 / 1000.0).round() as i64)
    }

    pub fn latest_step(&self) -> Option<&str> {
        self.executed_controls
            .first()
            .map(|control| control.step.as_str())
    }
}

const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Parses the timestamp spellings seen in exports: RFC 3339,
/// `YYYY-MM-DD HH:MM:SS[.fff][ UTC]` and Unix seconds or milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = raw.strip_suffix("UTC").map(str::trim_end).unwrap_or(raw);
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    if let Some(parsed) = FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
    {
        return Some(parsed.and_utc());
    }

    let epoch = raw.parse::<i64>().ok()?;
    if epoch.abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(epoch)
    } else {
        DateTime::from_timestamp(epoch, 0)
    }
}
