//! The audit-to-apply CSV handoff: a report written by the audit must
//! read back row for row on the apply side, including the skip rules
//! for placeholder values.

use tagsweep::report::{read_apply_rows, should_skip_value, GapReport, GapRow};
use tagsweep::tags::Tag;

#[test]
fn audit_output_feeds_apply_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-tags.csv");

    let mut report = GapReport::create(&path).unwrap();
    report
        .record(&GapRow::new(
            "vol-0aa11bb22cc33dd44",
            "AmazonEC2",
            &[Tag::new("Name", "pg-data"), Tag::new("Environment", "prod")],
        ))
        .unwrap();
    report
        .record(&GapRow::new(
            "arn:aws:kinesis:eu-west-1:123456789012:stream/audit-trail",
            "AmazonKinesis",
            &[Tag::new("Environment", "unknown")],
        ))
        .unwrap();
    report.finish().unwrap();

    let rows = read_apply_rows(&path, "tag_environment").unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].resource_id, "vol-0aa11bb22cc33dd44");
    assert_eq!(rows[0].service, "AmazonEC2");
    assert!(!should_skip_value(&rows[0].value));

    // The second row's Environment was never filled in for real.
    assert_eq!(rows[1].value, "unknown");
    assert!(should_skip_value(&rows[1].value));
}

#[test]
fn hand_edited_export_with_extra_columns_still_reads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billing-export.csv");
    std::fs::write(
        &path,
        "cost,resource_id,owner,service,tag_channel\n\
         12.50,my-bucket,ops,AmazonS3,web\n\
         3.10,arn:aws:sqs:eu-west-1:123456789012:jobs,ops,AWSQueueService,None\n",
    )
    .unwrap();

    let rows = read_apply_rows(&path, "tag_channel").unwrap();
    assert_eq!(rows[0].resource_id, "my-bucket");
    assert_eq!(rows[0].value, "web");
    assert_eq!(rows[1].service, "AWSQueueService");
    assert!(should_skip_value(&rows[1].value));
}
