//! The backfill pass: stream a CSV of resources and tag values, and
//! push one tag onto each resource through its service's API.

use crate::aws::{errors, TaggingClient};
use crate::report::{read_apply_rows, should_skip_value};
use crate::sanitize;
use crate::services::{classify, ServiceKind};
use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Mapping from the AWS tag key to the CSV column holding its
    /// value, as `AwsTag=CsvColumn` (e.g. `Channel=tag_channel`)
    #[arg(long)]
    pub tag: String,

    /// Retag resources that already carry the tag
    #[arg(long)]
    pub overwrite: bool,

    /// CSV produced by the audit (or a billing export with matching columns)
    #[arg(long)]
    pub csvfile: PathBuf,
}

/// Split `AwsTag=CsvColumn` into its halves.
fn parse_tag_mapping(mapping: &str) -> Result<(&str, &str)> {
    match mapping.split_once('=') {
        Some((key, column)) if !key.is_empty() && !column.is_empty() => Ok((key, column)),
        _ => bail!("--tag must look like AwsTag=CsvColumn, got {:?}", mapping),
    }
}

/// Skip reason after the pre-apply tag lookup, if any. A resource
/// whose tags cannot be read is left alone and counted as a skip, not
/// a failure: the backfill only writes where it can verify.
fn skip_after_lookup(lookup: &anyhow::Result<bool>) -> Option<&'static str> {
    match lookup {
        Ok(true) => Some("already set"),
        Ok(false) => None,
        Err(_) => Some("tag lookup failed"),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplyCounters {
    pub total: usize,
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub async fn run(client: &TaggingClient, args: &ApplyArgs) -> Result<()> {
    let (aws_key, csv_column) = parse_tag_mapping(&args.tag)?;
    let rows = read_apply_rows(&args.csvfile, csv_column)?;

    let mut counters = ApplyCounters::default();

    for row in &rows {
        counters.total += 1;

        if should_skip_value(&row.value) {
            info!("skip {} ({}): no usable value", row.resource_id, row.service);
            counters.skipped += 1;
            continue;
        }

        let Some(service) = ServiceKind::from_billing_name(&row.service) else {
            warn!("fail {}: unknown service {:?}", row.resource_id, row.service);
            counters.failed += 1;
            continue;
        };

        let kind = match classify(service, &row.resource_id) {
            Ok(kind) => kind,
            Err(e) => {
                warn!("fail {}: {:#}", row.resource_id, e);
                counters.failed += 1;
                continue;
            }
        };
        let resource_id = sanitize::sanitize(kind, &row.resource_id);

        if !args.overwrite {
            let lookup = client.has_tag(kind, &resource_id, aws_key).await;
            if let Some(reason) = skip_after_lookup(&lookup) {
                match &lookup {
                    Err(e) => warn!(
                        "skip {} ({}): {} ({:?}): {:#}",
                        resource_id,
                        kind.as_str(),
                        reason,
                        errors::categorize(e),
                        e
                    ),
                    _ => info!(
                        "skip {} ({}): {} {}",
                        resource_id,
                        kind.as_str(),
                        aws_key,
                        reason
                    ),
                }
                counters.skipped += 1;
                continue;
            }
        }

        match client.apply_tag(kind, &resource_id, aws_key, &row.value).await {
            Ok(()) => {
                info!(
                    "tagged {} ({}): {}={}",
                    resource_id,
                    kind.as_str(),
                    aws_key,
                    row.value
                );
                counters.successful += 1;
            }
            // A concurrent bucket-tagging change; the tag set will
            // settle, so the backfill counts it as done.
            Err(e) if kind == ServiceKind::S3 && errors::is_operation_aborted(&e) => {
                info!("tagged {} (s3): OperationAborted, counted as success", resource_id);
                counters.successful += 1;
            }
            Err(e) => {
                error!(
                    "fail {} ({}): {:?}: {:#}",
                    resource_id,
                    kind.as_str(),
                    errors::categorize(&e),
                    e
                );
                counters.failed += 1;
            }
        }
    }

    info!(
        "Total: {} Successful: {} Skip: {} Failed: {}",
        counters.total, counters.successful, counters.skipped, counters.failed
    );
    println!(
        "Total: {}\nSuccessful: {}\nSkip: {}\nFailed: {}",
        counters.total, counters.successful, counters.skipped, counters.failed
    );

    if counters.failed > 0 {
        bail!("{} resources failed to tag", counters.failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tag_mapping() {
        assert_eq!(
            parse_tag_mapping("Channel=tag_channel").unwrap(),
            ("Channel", "tag_channel")
        );
    }

    #[test]
    fn test_parse_tag_mapping_rejects_bad_shapes() {
        assert!(parse_tag_mapping("Channel").is_err());
        assert!(parse_tag_mapping("=tag_channel").is_err());
        assert!(parse_tag_mapping("Channel=").is_err());
    }

    #[test]
    fn test_already_tagged_resource_is_skipped() {
        assert_eq!(skip_after_lookup(&Ok(true)), Some("already set"));
        assert_eq!(skip_after_lookup(&Ok(false)), None);
    }

    #[test]
    fn test_unreadable_resource_is_skipped_not_failed() {
        let lookup = Err(anyhow::anyhow!("AccessDeniedException: no kms:ListResourceTags"));
        assert_eq!(skip_after_lookup(&lookup), Some("tag lookup failed"));
    }
}
