use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MalformedRecord;

/// One benchmark record as parsed from a JSONL line.
///
/// Keys are kept as-is. [`get`](Self::get) and the required-field accessors
/// treat a key holding `null` as absent; [`get_raw`](Self::get_raw) does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap a parsed JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Look up a field, skipping explicit nulls
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Look up a field as stored, `null` included
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a required string field
    pub fn require_str(&self, key: &str) -> Result<&str, MalformedRecord> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(MalformedRecord::wrong_type(key, "a string")),
            None => Err(MalformedRecord::missing(key)),
        }
    }

    /// The nested `problem_info` structure.
    ///
    /// Rejects the record when `problem_info` is missing or not an object,
    /// and also when `pr_title` or `pr_body` is present with a non-string
    /// value (a number, say); such values are not rendered as text.
    pub fn problem_info(&self) -> Result<ProblemInfo, MalformedRecord> {
        let value = self
            .get("problem_info")
            .ok_or_else(|| MalformedRecord::missing("problem_info"))?;

        if !value.is_object() {
            return Err(MalformedRecord::wrong_type("problem_info", "an object"));
        }

        ProblemInfo::deserialize(value).map_err(|_| {
            MalformedRecord::wrong_type("problem_info", "an object with string pr_title/pr_body")
        })
    }

    /// Instance id if present, for log messages about rejected records
    pub fn instance_id(&self) -> Option<&str> {
        self.get("instance_id").and_then(Value::as_str)
    }
}

/// Pull request text attached to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemInfo {
    #[serde(default)]
    pub pr_title: Option<String>,
    #[serde(default)]
    pub pr_body: Option<String>,
}

impl ProblemInfo {
    /// Compose the problem statement shown to the agent.
    ///
    /// Format is `Title: <title>`, a blank line, `Body:`, then the body
    /// verbatim. Missing parts render as empty strings.
    pub fn problem_statement(&self) -> String {
        format!(
            "Title: {}\n\nBody:\n{}",
            self.pr_title.as_deref().unwrap_or_default(),
            self.pr_body.as_deref().unwrap_or_default()
        )
    }
}
