//! Instance configuration handed to the agent runner

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Default container image for FEA-Bench runs
pub const DEFAULT_IMAGE: &str = "sweagent/swe-agent:latest";

/// One converted benchmark instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub instance_id: String,
    /// Local checkout of the repository, see [`RepoLayout`]
    pub repo_name: String,
    pub base_commit: String,
    pub problem_statement: String,
    pub image_name: String,
    /// Forwarded record metadata, always holding every key of
    /// [`crate::dataset::EXTRA_FIELDS`]
    pub extra_fields: BTreeMap<String, Value>,
}

impl InstanceConfig {
    /// Deployment matching this instance's image
    pub fn deployment(&self) -> DeploymentConfig {
        DeploymentConfig::docker(&self.image_name)
    }

    /// Attach a deployment and split into the shape the runner consumes
    pub fn into_batch_instance(self, deployment: DeploymentConfig) -> BatchInstance {
        BatchInstance {
            problem_statement: ProblemStatement {
                id: self.instance_id,
                text: self.problem_statement,
                extra_fields: self.extra_fields,
            },
            env: EnvironmentConfig {
                deployment,
                repo: RepoConfig {
                    path: self.repo_name,
                    base_commit: self.base_commit,
                },
            },
        }
    }
}

/// Where the agent's environment runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeploymentConfig {
    Docker { image: String },
}

impl DeploymentConfig {
    pub fn docker(image: impl Into<String>) -> Self {
        DeploymentConfig::Docker {
            image: image.into(),
        }
    }

    pub fn image(&self) -> &str {
        match self {
            DeploymentConfig::Docker { image } => image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemStatement {
    pub id: String,
    pub text: String,
    pub extra_fields: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    pub path: String,
    pub base_commit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub deployment: DeploymentConfig,
    pub repo: RepoConfig,
}

/// Instance ready for the batch runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInstance {
    pub problem_statement: ProblemStatement,
    pub env: EnvironmentConfig,
}

impl BatchInstance {
    pub fn id(&self) -> &str {
        &self.problem_statement.id
    }

    /// Number of FAIL_TO_PASS tests, 0 when the field is not a list
    pub fn fail_to_pass_count(&self) -> usize {
        self.problem_statement
            .extra_fields
            .get("FAIL_TO_PASS")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Maps `owner/name` repositories onto checkouts under a testbed directory.
///
/// `org/proj` lives at `<testbed>/org__proj`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
    testbed_dir: PathBuf,
}

impl RepoLayout {
    pub fn new(testbed_dir: impl Into<PathBuf>) -> Self {
        Self {
            testbed_dir: testbed_dir.into(),
        }
    }

    /// Testbed next to the instances file
    pub fn beside(instances_path: &Path) -> Self {
        let parent = instances_path.parent().unwrap_or_else(|| Path::new(""));
        Self::new(parent.join("testbed"))
    }

    pub fn testbed_dir(&self) -> &Path {
        &self.testbed_dir
    }

    pub fn folder_name(repo: &str) -> String {
        repo.replace('/', "__")
    }

    /// False when the checkout folder would be empty, `.` or `..` and so
    /// resolve outside the testbed
    pub fn is_valid_repo(repo: &str) -> bool {
        !matches!(Self::folder_name(repo).as_str(), "" | "." | "..")
    }

    /// Absolute checkout path for a repository
    pub fn repo_path(&self, repo: &str) -> PathBuf {
        absolutize(&self.testbed_dir.join(Self::folder_name(repo)))
    }
}

/// Make a path absolute against the current directory and drop `.`/`..`
/// components lexically, without touching the filesystem.
fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
