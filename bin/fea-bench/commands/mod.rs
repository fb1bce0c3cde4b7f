pub mod convert;
pub mod list;

use anyhow::{Context, Result};
use clap::Args;
use fea_bench::{InstanceLoader, InstanceSlice, LoadReport, LoaderConfig};
use std::path::PathBuf;

/// Options shared by every command that loads an instances file
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Path to the FEA-Bench .jsonl file
    #[arg(short, long, env = "FEA_BENCH_INSTANCES_PATH")]
    pub instances_path: Option<PathBuf>,

    /// TOML file with loader settings; flags override it
    #[arg(short, long, env = "FEA_BENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding repository checkouts (default: testbed next to the instances file)
    #[arg(long, env = "FEA_BENCH_TESTBED_DIR")]
    pub testbed_dir: Option<PathBuf>,

    /// Container image for every instance
    #[arg(long, env = "FEA_BENCH_IMAGE_NAME")]
    pub image_name: Option<String>,

    /// Abort on the first malformed record instead of skipping it
    #[arg(long, env = "FEA_BENCH_FAIL_FAST")]
    pub fail_fast: bool,

    /// Only keep instances whose id matches this regex
    #[arg(long, env = "FEA_BENCH_FILTER")]
    pub filter: Option<String>,

    /// Keep a range of instances, e.g. `0:10`
    #[arg(long, env = "FEA_BENCH_SLICE")]
    pub slice: Option<InstanceSlice>,
}

impl LoadArgs {
    /// Merge the config file (if any) with command line overrides
    pub fn resolve(&self) -> Result<LoaderConfig> {
        let mut config = match &self.config {
            Some(path) => LoaderConfig::from_path(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => LoaderConfig::default(),
        };

        if let Some(path) = &self.instances_path {
            config.instances_path = path.clone();
        }
        if let Some(dir) = &self.testbed_dir {
            config.testbed_dir = Some(dir.clone());
        }
        if let Some(image) = &self.image_name {
            config.image_name = image.clone();
        }
        if self.fail_fast {
            config.fail_fast = true;
        }
        if let Some(filter) = &self.filter {
            config.filter = Some(filter.clone());
        }
        if let Some(slice) = self.slice {
            config.slice = Some(slice);
        }

        config.validate().context("Invalid loader configuration")?;
        Ok(config)
    }

    pub async fn load(&self) -> Result<LoadReport> {
        let config = self.resolve()?;
        let loader = InstanceLoader::from_config(&config)?;
        loader
            .load()
            .await
            .with_context(|| format!("Failed to load instances from {}", loader.path().display()))
    }
}
