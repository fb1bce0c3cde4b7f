//! Record to instance conversion

use serde_json::Value;
use std::collections::BTreeMap;

use super::fields::EXTRA_FIELDS;
use super::types::RawRecord;
use crate::error::MalformedRecord;
use crate::instance::{InstanceConfig, RepoLayout, DEFAULT_IMAGE};

/// Converts FEA-Bench records into instance configurations.
///
/// Holds only immutable settings, so one mapper can be shared across threads.
#[derive(Debug, Clone)]
pub struct InstanceMapper {
    layout: RepoLayout,
    image_name: String,
}

impl InstanceMapper {
    pub fn new(layout: RepoLayout) -> Self {
        Self {
            layout,
            image_name: DEFAULT_IMAGE.to_string(),
        }
    }

    pub fn with_image(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    /// Map one record. Fails only when `instance_id`, `repo`, `base_commit`
    /// or `problem_info` is missing or has the wrong shape.
    pub fn map(&self, record: &RawRecord) -> Result<InstanceConfig, MalformedRecord> {
        let instance_id = record.require_str("instance_id")?;
        let repo = record.require_str("repo")?;
        if !RepoLayout::is_valid_repo(repo) {
            return Err(MalformedRecord::wrong_type("repo", "an owner/name path"));
        }
        let base_commit = record.require_str("base_commit")?;
        let problem_info = record.problem_info()?;

        Ok(InstanceConfig {
            instance_id: instance_id.to_string(),
            repo_name: self.layout.repo_path(repo).to_string_lossy().into_owned(),
            base_commit: base_commit.to_string(),
            problem_statement: problem_info.problem_statement(),
            image_name: self.image_name.clone(),
            extra_fields: extra_fields(record),
        })
    }
}

/// Copy every forwarded field, substituting its default only when the key is
/// missing. A stored `null` is forwarded as-is.
pub fn extra_fields(record: &RawRecord) -> BTreeMap<String, Value> {
    EXTRA_FIELDS
        .iter()
        .map(|(name, default)| {
            let value = record
                .get_raw(name)
                .cloned()
                .unwrap_or_else(|| default.value());
            (name.to_string(), value)
        })
        .collect()
}
