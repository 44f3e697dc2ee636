//! The audit sweep: enumerate resources service by service, check the
//! target tag, and write every gap to the report.

use crate::aws::{errors, TaggingClient};
use crate::report::{GapReport, GapRow, COMPANION_KEYS};
use crate::services::{ServiceKind, BILLING_NAMES};
use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Tag key whose absence puts a resource in the report
    #[arg(long, default_value = "Channel")]
    pub tag: String,

    /// Restrict the sweep to these services (short names, e.g. `s3,ec2`)
    #[arg(long, value_delimiter = ',')]
    pub services: Vec<String>,

    /// Where to write the gap report
    #[arg(long, default_value = "missing-tags.csv")]
    pub output: PathBuf,
}

/// The billing names to sweep, deduplicated by service so EC2 is not
/// enumerated twice (`AmazonEC2` and `AmazonVPC` both land on it).
fn sweep_targets(filter: &[String]) -> Result<Vec<(&'static str, ServiceKind)>> {
    let mut wanted = Vec::new();
    for name in filter {
        match ServiceKind::from_short_name(name) {
            Some(kind) => wanted.push(kind),
            None => bail!("unknown service {:?} in --services", name),
        }
    }

    let mut seen = Vec::new();
    let mut targets = Vec::new();
    for (billing_name, kind) in BILLING_NAMES {
        if !kind.supports_discovery() || seen.contains(kind) {
            continue;
        }
        if !wanted.is_empty() && !wanted.contains(kind) {
            continue;
        }
        seen.push(*kind);
        targets.push((*billing_name, *kind));
    }
    Ok(targets)
}

pub async fn run(client: &TaggingClient, args: &AuditArgs) -> Result<()> {
    let targets = sweep_targets(&args.services)?;
    let mut report = GapReport::create(&args.output)?;

    let mut wanted_keys: Vec<&str> = vec![args.tag.as_str()];
    for key in COMPANION_KEYS {
        if *key != args.tag {
            wanted_keys.push(key);
        }
    }

    let mut per_service: Vec<(&'static str, usize)> = Vec::new();
    let mut missing = 0usize;

    for (billing_name, kind) in targets {
        info!("Discovering {} resources", kind.as_str());
        let resources = match client.list_resources(kind).await {
            Ok(resources) => resources,
            Err(e) => {
                error!("{}: discovery failed: {:#}", kind.as_str(), e);
                continue;
            }
        };
        info!("{}: {} resources", kind.as_str(), resources.len());
        per_service.push((kind.as_str(), resources.len()));

        for resource_id in &resources {
            let tags = match client.tag_values(kind, resource_id, &wanted_keys).await {
                Ok(tags) => tags,
                Err(e) => {
                    warn!(
                        "{}: skipping {} ({:?}): {:#}",
                        kind.as_str(),
                        resource_id,
                        errors::categorize(&e),
                        e
                    );
                    continue;
                }
            };

            if !crate::tags::has_key(&tags, &args.tag) {
                missing += 1;
                report.record(&GapRow::new(resource_id, billing_name, &tags))?;
            }
        }
    }

    report.finish()?;
    let summary = discovery_summary(&per_service);
    info!("{}", summary);
    info!("Missing {}: {}", args.tag, missing);
    println!("{}", summary);
    println!("Missing {}: {} (see {})", args.tag, missing, args.output.display());
    Ok(())
}

/// Render the per-service discovery map, one line per swept service,
/// with the overall total last.
fn discovery_summary(per_service: &[(&'static str, usize)]) -> String {
    let mut summary = String::from("Resources Discovered:");
    let mut total = 0usize;
    for (service, count) in per_service {
        summary.push_str(&format!("\n  {}: {}", service, count));
        total += count;
    }
    summary.push_str(&format!("\nTotal: {}", total));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sweep_targets_dedupes_ec2() {
        let targets = sweep_targets(&[]).unwrap();
        let ec2_count = targets
            .iter()
            .filter(|(_, kind)| *kind == ServiceKind::Ec2)
            .count();
        assert_eq!(ec2_count, 1);
        assert!(targets
            .iter()
            .all(|(_, kind)| !matches!(kind, ServiceKind::Elb | ServiceKind::Elbv2)));
    }

    #[test]
    fn test_sweep_targets_filter() {
        let filter = vec!["s3".to_string(), "kinesis".to_string()];
        let targets = sweep_targets(&filter).unwrap();
        assert_eq!(
            targets,
            vec![
                ("AmazonS3", ServiceKind::S3),
                ("AmazonKinesis", ServiceKind::Kinesis),
            ]
        );
    }

    #[test]
    fn test_sweep_targets_rejects_unknown_service() {
        let filter = vec!["sns".to_string()];
        assert!(sweep_targets(&filter).is_err());
    }

    #[test]
    fn test_discovery_summary_lists_each_service() {
        let summary = discovery_summary(&[("ec2", 120), ("s3", 14), ("kinesis", 0)]);
        assert_eq!(
            summary,
            "Resources Discovered:\n  ec2: 120\n  s3: 14\n  kinesis: 0\nTotal: 134"
        );
    }

    #[test]
    fn test_discovery_summary_empty_sweep() {
        assert_eq!(discovery_summary(&[]), "Resources Discovered:\nTotal: 0");
    }
}
