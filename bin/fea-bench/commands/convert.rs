//! Convert command - write batch instances as JSON lines or YAML

use super::LoadArgs;
use crate::style::*;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use fea_bench::BatchInstance;
use std::io::Write;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jsonl,
    Yaml,
}

pub async fn run(args: &LoadArgs, output: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let report = args.load().await?;
    if report.instances.is_empty() {
        bail!("No instances to convert. Please check the path to your .jsonl file.");
    }

    let rendered = render(&report.instances, format)?;
    match &output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    eprintln!();
    eprintln!("{} Converted FEA-Bench instances", icon_success());
    eprint_key_value("Converted", &report.instances.len().to_string());
    if !report.skipped.is_empty() {
        eprint_key_value(
            "Skipped",
            &format!("{} {}", icon_warning(), report.skipped.len()),
        );
    }
    if let Some(path) = output {
        eprint_key_value("Output", &path.display().to_string());
    }
    eprintln!();

    Ok(())
}

fn render(instances: &[BatchInstance], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for instance in instances {
                out.push_str(&serde_json::to_string(instance)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(instances)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fea_bench::{DeploymentConfig, InstanceConfig};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn instance(id: &str) -> BatchInstance {
        let mut extra_fields = BTreeMap::new();
        extra_fields.insert("FAIL_TO_PASS".to_string(), json!(["tests/test_x.py::test_new"]));
        extra_fields.insert("pull_number".to_string(), json!(42));
        extra_fields.insert("patch".to_string(), serde_json::Value::Null);
        extra_fields.insert(
            "new_components".to_string(),
            json!([{"file": "x.py", "components": [{"name": "Foo", "type": "class"}]}]),
        );
        InstanceConfig {
            instance_id: id.to_string(),
            repo_name: "/bench/testbed/org__proj".to_string(),
            base_commit: "abc123".to_string(),
            problem_statement: "Title: Fix bug\n\nBody:\nLine one\nLine two".to_string(),
            image_name: "fea/agent:1".to_string(),
            extra_fields,
        }
        .into_batch_instance(DeploymentConfig::docker("fea/agent:1"))
    }

    #[test]
    fn test_render_jsonl_one_line_per_instance() {
        let instances = vec![instance("x1"), instance("x2")];
        let out = render(&instances, OutputFormat::Jsonl).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for (line, expected) in lines.iter().zip(&instances) {
            let parsed: BatchInstance = serde_json::from_str(line).unwrap();
            assert_eq!(&parsed, expected);
        }
    }

    #[test]
    fn test_render_yaml_parses_back() {
        let instances = vec![instance("x1")];
        let out = render(&instances, OutputFormat::Yaml).unwrap();

        let parsed: Vec<BatchInstance> = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed, instances);
        assert!(out.contains("type: docker"));
    }
}
