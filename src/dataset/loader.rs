//! FEA-Bench JSONL loading

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::mapper::InstanceMapper;
use super::types::RawRecord;
use crate::config::{InstanceSlice, LoaderConfig};
use crate::error::{Error, MalformedRecord, Result};
use crate::instance::BatchInstance;

/// A record dropped during loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 1-based line in the instances file
    pub line: usize,
    pub instance_id: Option<String>,
    pub reason: String,
}

/// Outcome of loading one instances file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub instances: Vec<BatchInstance>,
    pub skipped: Vec<SkippedRecord>,
}

/// Loads FEA-Bench instances from a `.jsonl` file
pub struct InstanceLoader {
    path: PathBuf,
    mapper: InstanceMapper,
    filter: Option<Regex>,
    slice: Option<InstanceSlice>,
    fail_fast: bool,
}

impl InstanceLoader {
    pub fn new(path: impl Into<PathBuf>, mapper: InstanceMapper) -> Self {
        Self {
            path: path.into(),
            mapper,
            filter: None,
            slice: None,
            fail_fast: false,
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        config.validate()?;
        let mapper =
            InstanceMapper::new(config.repo_layout()).with_image(config.image_name.clone());

        Ok(Self {
            path: config.instances_path.clone(),
            mapper,
            filter: config.filter_regex()?,
            slice: config.slice,
            fail_fast: config.fail_fast,
        })
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_slice(mut self, slice: InstanceSlice) -> Self {
        self.slice = Some(slice);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and convert every record.
    ///
    /// Invalid JSON or a non-object line aborts the load. A record missing a
    /// required field is skipped and reported, or aborts the load when
    /// `fail_fast` is set.
    pub async fn load(&self) -> Result<LoadReport> {
        info!(path = %self.path.display(), "loading FEA-Bench instances");

        if !tokio::fs::try_exists(&self.path).await? {
            return Err(Error::NotFound(self.path.clone()));
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let report = self.convert(&content)?;

        info!(
            path = %self.path.display(),
            converted = report.instances.len(),
            skipped = report.skipped.len(),
            "converted FEA-Bench instances"
        );

        Ok(report)
    }

    /// Like [`load`](Self::load), but only the instances, and an empty
    /// result is an error
    pub async fn load_instances(&self) -> Result<Vec<BatchInstance>> {
        let report = self.load().await?;
        if report.instances.is_empty() {
            return Err(Error::NoInstances(self.path.clone()));
        }
        Ok(report.instances)
    }

    /// Convert already-read JSONL content
    pub fn convert(&self, content: &str) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(trimmed).map_err(|source| Error::Json {
                    line: line_no,
                    source,
                })?;
            let record =
                RawRecord::from_value(value).ok_or(Error::NotAnObject { line: line_no })?;

            if let (Some(filter), Some(id)) = (&self.filter, record.instance_id()) {
                if !filter.is_match(id) {
                    continue;
                }
            }

            match self.mapper.map(&record) {
                Ok(instance) => {
                    debug!(
                        instance_id = %instance.instance_id,
                        repo_path = %instance.repo_name,
                        "converted instance"
                    );
                    let deployment = instance.deployment();
                    report.instances.push(instance.into_batch_instance(deployment));
                }
                Err(source) => self.reject(&mut report, line_no, &record, source)?,
            }
        }

        if let Some(slice) = &self.slice {
            report.instances = slice.apply(report.instances);
        }

        Ok(report)
    }

    fn reject(
        &self,
        report: &mut LoadReport,
        line: usize,
        record: &RawRecord,
        source: MalformedRecord,
    ) -> Result<()> {
        if self.fail_fast {
            return Err(Error::MalformedRecord { line, source });
        }

        error!(
            path = %self.path.display(),
            line,
            field = %source.field,
            "skipping malformed FEA-Bench record: {}",
            source
        );
        report.skipped.push(SkippedRecord {
            line,
            instance_id: record.instance_id().map(String::from),
            reason: source.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::RepoLayout;

    const GOOD: &str = r#"{"instance_id":"a__b-1","repo":"a/b","base_commit":"c1","problem_info":{"pr_title":"T1","pr_body":"B1"}}"#;
    const GOOD_2: &str = r#"{"instance_id":"c__d-2","repo":"c/d","base_commit":"c2","problem_info":{"pr_title":"T2","pr_body":"B2"},"FAIL_TO_PASS":["t"]}"#;
    const NO_REPO: &str = r#"{"instance_id":"e__f-3","base_commit":"c3","problem_info":{}}"#;

    fn loader() -> InstanceLoader {
        InstanceLoader::new(
            "/data/fea.jsonl",
            InstanceMapper::new(RepoLayout::new("/data/testbed")),
        )
    }

    #[test]
    fn test_convert_skips_blank_lines() {
        let content = format!("{GOOD}\n\n   \n{GOOD_2}\n");
        let report = loader().convert(&content).unwrap();
        assert_eq!(report.instances.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.instances[0].id(), "a__b-1");
        assert_eq!(report.instances[1].env.repo.path, "/data/testbed/c__d");
    }

    #[test]
    fn test_convert_records_skipped() {
        let content = format!("{GOOD}\n{NO_REPO}\n{GOOD_2}");
        let report = loader().convert(&content).unwrap();
        assert_eq!(report.instances.len(), 2);
        assert_eq!(
            report.skipped,
            vec![SkippedRecord {
                line: 2,
                instance_id: Some("e__f-3".to_string()),
                reason: MalformedRecord::missing("repo").to_string(),
            }]
        );
    }

    #[test]
    fn test_convert_fail_fast() {
        let content = format!("{GOOD}\n{NO_REPO}");
        let err = loader().with_fail_fast(true).convert(&content).unwrap_err();
        match err {
            Error::MalformedRecord { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source.field, "repo");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_convert_invalid_json() {
        let content = format!("{GOOD}\n{{not json");
        assert!(matches!(
            loader().convert(&content),
            Err(Error::Json { line: 2, .. })
        ));

        assert!(matches!(
            loader().convert("[1, 2]"),
            Err(Error::NotAnObject { line: 1 })
        ));
    }

    #[test]
    fn test_convert_filter_and_slice() {
        let content = format!("{GOOD}\n{GOOD_2}\n{NO_REPO}");
        let report = loader()
            .with_filter(Regex::new("^c__").unwrap())
            .convert(&content)
            .unwrap();
        assert_eq!(report.instances.len(), 1);
        assert_eq!(report.instances[0].id(), "c__d-2");
        assert!(report.skipped.is_empty());

        let report = loader()
            .with_slice(":1".parse().unwrap())
            .convert(&content)
            .unwrap();
        assert_eq!(report.instances.len(), 1);
        assert_eq!(report.instances[0].id(), "a__b-1");
        assert_eq!(report.skipped.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loader = InstanceLoader::new(
            "/nonexistent/fea.jsonl",
            InstanceMapper::new(RepoLayout::new("/tmp")),
        );
        assert!(matches!(loader.load().await, Err(Error::NotFound(_))));
    }
}
