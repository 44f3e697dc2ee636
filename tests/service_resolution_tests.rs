//! Billing-name resolution and identifier handling, end to end the
//! way the apply pass exercises them: CSV service name to ServiceKind,
//! load balancer refinement, then identifier sanitization.

use tagsweep::sanitize;
use tagsweep::services::{classify, ServiceKind, BILLING_NAMES};

#[test]
fn every_billing_name_resolves_to_itself() {
    for (billing_name, kind) in BILLING_NAMES {
        assert_eq!(
            ServiceKind::from_billing_name(billing_name),
            Some(*kind),
            "lookup failed for {}",
            billing_name
        );
    }
}

#[test]
fn csv_row_with_classic_lb_arn_lands_on_elb_with_bare_name() {
    // Billed as AmazonEC2 but tagged through the classic ELB API.
    let service = ServiceKind::from_billing_name("AmazonEC2").unwrap();
    let arn = "arn:aws:elasticloadbalancing:eu-west-1:123456789012:loadbalancer/edge-lb";

    let kind = classify(service, arn).unwrap();
    assert_eq!(kind, ServiceKind::Elb);
    assert_eq!(sanitize::sanitize(kind, arn), "edge-lb");
}

#[test]
fn csv_row_with_v2_lb_arn_keeps_full_arn() {
    let service = ServiceKind::from_billing_name("AmazonEC2").unwrap();
    let arn =
        "arn:aws:elasticloadbalancing:eu-west-1:123456789012:loadbalancer/net/ingress/0f3d9a2b";

    let kind = classify(service, arn).unwrap();
    assert_eq!(kind, ServiceKind::Elbv2);
    assert_eq!(sanitize::sanitize(kind, arn), arn);
}

#[test]
fn vpc_billing_rows_sanitize_like_ec2() {
    let service = ServiceKind::from_billing_name("AmazonVPC").unwrap();
    let arn = "arn:aws:ec2:eu-west-1:123456789012:natgateway/nat-0a1b2c3d";

    let kind = classify(service, arn).unwrap();
    assert_eq!(kind, ServiceKind::Ec2);
    assert_eq!(sanitize::sanitize(kind, arn), "nat-0a1b2c3d");
}

#[test]
fn cloudwatch_billing_rows_reach_the_logs_api() {
    let service = ServiceKind::from_billing_name("AmazonCloudWatch").unwrap();
    assert_eq!(service, ServiceKind::Logs);

    let arn = "arn:aws:logs:eu-west-1:123456789012:log-group:/ecs/checkout";
    assert_eq!(sanitize::sanitize(service, arn), "/ecs/checkout");
}
