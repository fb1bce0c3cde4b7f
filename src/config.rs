//! Loader Configuration
//!
//! Settings for converting an FEA-Bench JSONL file:
//! - where the instances file and repository testbed live
//! - which container image the instances run in
//! - which instances to keep (id filter, slice)
//! - whether a malformed record halts the whole load

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::instance::{RepoLayout, DEFAULT_IMAGE};

/// Complete loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Path to the FEA-Bench .jsonl file
    #[serde(default)]
    pub instances_path: PathBuf,
    /// Repository checkouts; defaults to `testbed` next to the instances file
    #[serde(default)]
    pub testbed_dir: Option<PathBuf>,
    /// Container image for every instance
    #[serde(default = "default_image_name")]
    pub image_name: String,
    /// Stop at the first malformed record instead of skipping it
    #[serde(default)]
    pub fail_fast: bool,
    /// Regex an instance id must match to be kept
    #[serde(default)]
    pub filter: Option<String>,
    /// Keep only this range of the converted instances
    #[serde(default)]
    pub slice: Option<InstanceSlice>,
}

fn default_image_name() -> String {
    DEFAULT_IMAGE.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            instances_path: PathBuf::new(),
            testbed_dir: None,
            image_name: default_image_name(),
            fail_fast: false,
            filter: None,
            slice: None,
        }
    }
}

impl LoaderConfig {
    pub fn new(instances_path: impl Into<PathBuf>) -> Self {
        Self {
            instances_path: instances_path.into(),
            ..Default::default()
        }
    }

    /// Load config from a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Repository layout derived from `testbed_dir` or the instances path
    pub fn repo_layout(&self) -> RepoLayout {
        match &self.testbed_dir {
            Some(dir) => RepoLayout::new(dir),
            None => RepoLayout::beside(&self.instances_path),
        }
    }

    /// Compiled instance id filter
    pub fn filter_regex(&self) -> Result<Option<Regex>> {
        self.filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| Error::Config(format!("invalid filter '{}': {}", pattern, e)))
            })
            .transpose()
    }

    pub fn validate(&self) -> Result<()> {
        if self.instances_path.as_os_str().is_empty() {
            return Err(Error::Config("instances_path is not set".to_string()));
        }
        if self.image_name.trim().is_empty() {
            return Err(Error::Config("image_name must not be empty".to_string()));
        }
        self.filter_regex()?;
        Ok(())
    }
}

/// `start:end` range over converted instances; either bound may be omitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceSlice {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl InstanceSlice {
    /// Apply to a list, clamping bounds to its length
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let len = items.len();
        let start = self.start.unwrap_or(0).min(len);
        let end = self.end.unwrap_or(len).clamp(start, len);
        items.into_iter().skip(start).take(end - start).collect()
    }
}

impl FromStr for InstanceSlice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| Error::Config(format!("slice '{}' must look like start:end", s)))?;

        let bound = |part: &str| -> Result<Option<usize>> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            part.parse()
                .map(Some)
                .map_err(|_| Error::Config(format!("invalid slice bound '{}'", part)))
        };

        Ok(Self {
            start: bound(start)?,
            end: bound(end)?,
        })
    }
}

impl TryFrom<String> for InstanceSlice {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<InstanceSlice> for String {
    fn from(slice: InstanceSlice) -> Self {
        slice.to_string()
    }
}

impl fmt::Display for InstanceSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(end) = self.end {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}
