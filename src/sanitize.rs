//! Resource identifier sanitization.
//!
//! Billing reports hand out ARNs; most tagging APIs want something
//! shorter (an instance id, a stream name, a bare hosted zone id).
//! Each function here reduces an ARN to the identifier its service
//! expects, and passes non-ARN input through unchanged.

use crate::services::ServiceKind;

/// Reduce a billing-report identifier to the form `service`'s tagging
/// API expects. Services that take the full ARN (or already-bare ids)
/// pass through.
pub fn sanitize(service: ServiceKind, resource_id: &str) -> String {
    match service {
        ServiceKind::Ec2 => last_path_segment(resource_id),
        ServiceKind::Elb => load_balancer_name(resource_id),
        ServiceKind::Logs => log_group_name(resource_id),
        ServiceKind::Emr
        | ServiceKind::Firehose
        | ServiceKind::Glacier
        | ServiceKind::Kinesis
        | ServiceKind::Efs => last_path_segment(resource_id),
        ServiceKind::Route53 => hosted_zone_id(resource_id),
        _ => resource_id.to_string(),
    }
}

/// Last `/`-segment of the last `:`-segment. Covers every EC2 id form
/// (`instance/i-…`, `volume/vol-…`, `subnet/subnet-…`) as well as EMR
/// cluster ids, Kinesis stream names, Firehose delivery stream names,
/// Glacier vault names and EFS file system ids.
pub fn last_path_segment(resource_id: &str) -> String {
    resource_id
        .rsplit(':')
        .next()
        .unwrap_or(resource_id)
        .rsplit('/')
        .next()
        .unwrap_or(resource_id)
        .to_string()
}

/// Classic load balancer name from its ARN (`…:loadbalancer/name`).
pub fn load_balancer_name(resource_id: &str) -> String {
    last_path_segment(resource_id)
}

/// Log group name: everything after the final `:` (log group names may
/// contain `/`, so only the ARN colon-prefix is stripped).
pub fn log_group_name(resource_id: &str) -> String {
    resource_id
        .rsplit(':')
        .next()
        .unwrap_or(resource_id)
        .to_string()
}

/// Hosted zone id without the `/hostedzone/` prefix ListHostedZones
/// returns; ChangeTagsForResource wants the bare id.
pub fn hosted_zone_id(resource_id: &str) -> String {
    resource_id
        .strip_prefix("/hostedzone/")
        .unwrap_or(resource_id)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ec2_instance_arn() {
        assert_eq!(
            sanitize(
                ServiceKind::Ec2,
                "arn:aws:ec2:us-east-1:123456789012:instance/i-1234567890abcdef0"
            ),
            "i-1234567890abcdef0"
        );
    }

    #[test]
    fn test_ec2_bare_id_passes_through() {
        assert_eq!(sanitize(ServiceKind::Ec2, "vol-0abc123"), "vol-0abc123");
    }

    #[test]
    fn test_classic_lb_name() {
        assert_eq!(
            sanitize(
                ServiceKind::Elb,
                "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/my-classic-lb"
            ),
            "my-classic-lb"
        );
    }

    #[test]
    fn test_elbv2_keeps_full_arn() {
        let arn =
            "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/my-alb/50dc6c49";
        assert_eq!(sanitize(ServiceKind::Elbv2, arn), arn);
    }

    #[test]
    fn test_log_group_keeps_slashes() {
        assert_eq!(
            sanitize(
                ServiceKind::Logs,
                "arn:aws:logs:us-east-1:123456789012:log-group:/aws/lambda/my-fn"
            ),
            "/aws/lambda/my-fn"
        );
    }

    #[test]
    fn test_kinesis_stream_name() {
        assert_eq!(
            sanitize(
                ServiceKind::Kinesis,
                "arn:aws:kinesis:us-east-1:123456789012:stream/click-events"
            ),
            "click-events"
        );
    }

    #[test]
    fn test_glacier_vault_name() {
        assert_eq!(
            sanitize(
                ServiceKind::Glacier,
                "arn:aws:glacier:us-east-1:123456789012:vaults/backup-vault"
            ),
            "backup-vault"
        );
    }

    #[test]
    fn test_efs_file_system_id() {
        assert_eq!(
            sanitize(
                ServiceKind::Efs,
                "arn:aws:elasticfilesystem:us-east-1:123456789012:file-system/fs-0abc123"
            ),
            "fs-0abc123"
        );
    }

    #[test]
    fn test_hosted_zone_prefix_stripped() {
        assert_eq!(
            sanitize(ServiceKind::Route53, "/hostedzone/Z0123456789ABCDEF"),
            "Z0123456789ABCDEF"
        );
        assert_eq!(
            sanitize(ServiceKind::Route53, "Z0123456789ABCDEF"),
            "Z0123456789ABCDEF"
        );
    }

    #[test]
    fn test_passthrough_services() {
        let arn = "arn:aws:dynamodb:us-east-1:123456789012:table/orders";
        assert_eq!(sanitize(ServiceKind::DynamoDb, arn), arn);
        assert_eq!(sanitize(ServiceKind::Rds, "arn:aws:rds:us-east-1:123456789012:db:mydb"), "arn:aws:rds:us-east-1:123456789012:db:mydb");
    }
}
