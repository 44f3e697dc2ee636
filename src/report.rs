//! CSV surfaces: the gap report the audit writes and the row reader
//! the apply pass consumes. The two share a schema so an audit output
//! can be annotated by hand and fed straight back in.

use crate::tags::{self, Tag};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tag keys the audit snapshots alongside the missing key, in column
/// order.
pub const COMPANION_KEYS: &[&str] = &["Channel", "BillingCostCenter", "Name", "Environment"];

/// One line of the gap report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRow {
    pub resource_id: String,
    /// Billing-report service name, e.g. `AmazonEC2`.
    pub service: String,
    pub tag_channel: String,
    pub tag_billing_cost_center: String,
    pub tag_name: String,
    pub tag_environment: String,
}

impl GapRow {
    pub fn new(resource_id: impl Into<String>, service: impl Into<String>, tags: &[Tag]) -> Self {
        let value = |key| tags::value_of(tags, key).unwrap_or_default().to_string();
        Self {
            resource_id: resource_id.into(),
            service: service.into(),
            tag_channel: value("Channel"),
            tag_billing_cost_center: value("BillingCostCenter"),
            tag_name: value("Name"),
            tag_environment: value("Environment"),
        }
    }
}

/// Column names, in the order they appear in the file.
const HEADER: [&str; 6] = [
    "resource_id",
    "service",
    "tag_channel",
    "tag_billing_cost_center",
    "tag_name",
    "tag_environment",
];

/// Streaming writer for the gap report. The header goes out on
/// creation so an empty sweep still leaves a well-formed file.
pub struct GapReport {
    writer: csv::Writer<std::fs::File>,
}

impl GapReport {
    pub fn create(path: &Path) -> Result<Self> {
        // The csv crate only emits serde-derived headers on the first
        // serialize call, which would leave a zero-gap sweep with an
        // empty file. Write the header up front instead.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("failed to create report at {}", path.display()))?;
        writer
            .write_record(HEADER)
            .context("failed to write report header")?;
        Ok(Self { writer })
    }

    pub fn record(&mut self, row: &GapRow) -> Result<()> {
        self.writer
            .serialize(row)
            .context("failed to write report row")
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().context("failed to flush report")
    }
}

/// A row pulled from the apply CSV: the resource, its service, and the
/// value found under the requested column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRow {
    pub resource_id: String,
    pub service: String,
    pub value: String,
}

/// Read `(resource_id, service, <value_column>)` triples from a CSV.
/// Columns are located by header name, so extra columns and arbitrary
/// ordering are fine.
pub fn read_apply_rows(path: &Path, value_column: &str) -> Result<Vec<ApplyRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = reader.headers().context("failed to read CSV header")?;
    let position = |name: &str| headers.iter().position(|h| h == name);

    let Some(id_idx) = position("resource_id") else {
        bail!("{} has no resource_id column", path.display());
    };
    let Some(service_idx) = position("service") else {
        bail!("{} has no service column", path.display());
    };
    let Some(value_idx) = position(value_column) else {
        bail!("{} has no {} column", path.display(), value_column);
    };

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record at line {}", line + 2))?;
        rows.push(ApplyRow {
            resource_id: record.get(id_idx).unwrap_or_default().trim().to_string(),
            service: record.get(service_idx).unwrap_or_default().trim().to_string(),
            value: record.get(value_idx).unwrap_or_default().trim().to_string(),
        });
    }
    Ok(rows)
}

/// Placeholder values that mean "nobody filled this in yet".
pub fn should_skip_value(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case("unknown") || v.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gap_row_snapshots_companion_tags() {
        let tags = vec![Tag::new("Name", "web-01"), Tag::new("Environment", "prod")];
        let row = GapRow::new("i-abc123", "AmazonEC2", &tags);
        assert_eq!(row.tag_channel, "");
        assert_eq!(row.tag_billing_cost_center, "");
        assert_eq!(row.tag_name, "web-01");
        assert_eq!(row.tag_environment, "prod");
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-tags.csv");

        let mut report = GapReport::create(&path).unwrap();
        report
            .record(&GapRow::new(
                "i-abc123",
                "AmazonEC2",
                &[Tag::new("Name", "web-01")],
            ))
            .unwrap();
        report
            .record(&GapRow::new("my-bucket", "AmazonS3", &[]))
            .unwrap();
        report.finish().unwrap();

        let rows = read_apply_rows(&path, "tag_name").unwrap();
        assert_eq!(
            rows,
            vec![
                ApplyRow {
                    resource_id: "i-abc123".into(),
                    service: "AmazonEC2".into(),
                    value: "web-01".into(),
                },
                ApplyRow {
                    resource_id: "my-bucket".into(),
                    service: "AmazonS3".into(),
                    value: "".into(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_report_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        GapReport::create(&path).unwrap().finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(
            "resource_id,service,tag_channel,tag_billing_cost_center,tag_name,tag_environment"
        ));
    }

    #[test]
    fn test_read_rejects_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "resource_id,service\nabc,AmazonEC2\n").unwrap();

        let err = read_apply_rows(&path, "tag_channel").unwrap_err();
        assert!(err.to_string().contains("tag_channel"));
    }

    #[test]
    fn test_columns_found_by_name_not_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reordered.csv");
        std::fs::write(
            &path,
            "tag_channel,service,resource_id\nmobile,AmazonS3,my-bucket\n",
        )
        .unwrap();

        let rows = read_apply_rows(&path, "tag_channel").unwrap();
        assert_eq!(rows[0].resource_id, "my-bucket");
        assert_eq!(rows[0].service, "AmazonS3");
        assert_eq!(rows[0].value, "mobile");
    }

    #[test]
    fn test_should_skip_value() {
        assert!(should_skip_value("unknown"));
        assert!(should_skip_value("Unknown"));
        assert!(should_skip_value("NONE"));
        assert!(should_skip_value(""));
        assert!(should_skip_value("  "));
        assert!(!should_skip_value("prod"));
    }
}
