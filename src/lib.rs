//! FEA-Bench instance loader
//!
//! Converts FEA-Bench `.jsonl` records into batch instances for an agent
//! runner. Each record keeps its promoted fields (id, repository, base
//! commit, problem statement) and forwards a fixed set of metadata fields
//! into `extra_fields` for prompt templates.
//!
//! ## Module Structure
//!
//! - `dataset/`: raw records, the field table, the mapper and the JSONL loader
//! - `instance`: converted instance, deployment and repository layout types
//! - `config`: loader configuration
//! - `error`: error types

/// Records, field mapping and loading
pub mod dataset;

/// Converted instance types
pub mod instance;

/// Loader configuration
pub mod config;

/// Error types
pub mod error;

pub use config::{InstanceSlice, LoaderConfig};
pub use dataset::{
    InstanceLoader, InstanceMapper, LoadReport, ProblemInfo, RawRecord, SkippedRecord,
    EXTRA_FIELDS,
};
pub use error::{Error, MalformedRecord, Result};
pub use instance::{
    BatchInstance, DeploymentConfig, EnvironmentConfig, InstanceConfig, ProblemStatement,
    RepoConfig, RepoLayout, DEFAULT_IMAGE,
};
