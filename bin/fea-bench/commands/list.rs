//! List command - show converted instances

use super::LoadArgs;
use crate::style::*;
use anyhow::Result;

pub async fn run(args: &LoadArgs) -> Result<()> {
    let report = args.load().await?;

    print_header("FEA-Bench Instances");

    if report.instances.is_empty() {
        println!("  No instances found.\n");
    } else {
        println!(
            "  {:<40} {:<12} {:>6}  {}",
            "Instance", "Commit", "F2P", "Repository"
        );
        println!("  {}", "-".repeat(90));

        for instance in &report.instances {
            let commit: String = instance.env.repo.base_commit.chars().take(12).collect();
            println!(
                "  {:<40} {:<12} {:>6}  {}",
                instance.id(),
                commit,
                instance.fail_to_pass_count(),
                style_dim(&instance.env.repo.path)
            );
        }
        println!();
    }

    print_key_value("Instances", &style_bold(&report.instances.len().to_string()));
    if !report.skipped.is_empty() {
        print_key_value("Skipped", &report.skipped.len().to_string());
        for skipped in &report.skipped {
            println!(
                "    {} line {} ({}): {}",
                icon_warning(),
                skipped.line,
                skipped.instance_id.as_deref().unwrap_or("?"),
                skipped.reason
            );
        }
    }
    println!();

    Ok(())
}
