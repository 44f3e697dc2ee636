//! Supported services and the billing-report name table.
//!
//! Billing exports name services like `AmazonEC2` or `AWSQueueService`;
//! the SDK world wants `ec2` or `sqs`. This module owns that mapping
//! plus the one genuinely fiddly case: load balancers are billed under
//! EC2 and can only be told apart (classic vs v2) by the shape of
//! their ARN.

use anyhow::{bail, Result};

/// Every AWS service the tag sweep knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Ec2,
    Elb,
    Elbv2,
    S3,
    Lambda,
    Logs,
    Rds,
    Es,
    Emr,
    DynamoDb,
    Firehose,
    Glacier,
    Kms,
    ApiGateway,
    Kinesis,
    CloudTrail,
    Sqs,
    SecretsManager,
    CloudFront,
    Efs,
    SageMaker,
    Redshift,
    ElastiCache,
    Workspaces,
    DirectoryService,
    Dax,
    Route53,
    DirectConnect,
    DataPipeline,
}

/// Billing-report service name to service, in the order the audit
/// sweeps them. `AmazonVPC` bills separately but its resources are
/// tagged through the EC2 API.
pub const BILLING_NAMES: &[(&str, ServiceKind)] = &[
    ("AmazonEC2", ServiceKind::Ec2),
    ("AmazonS3", ServiceKind::S3),
    ("AmazonVPC", ServiceKind::Ec2),
    ("AWSLambda", ServiceKind::Lambda),
    ("AmazonCloudWatch", ServiceKind::Logs),
    ("AmazonRDS", ServiceKind::Rds),
    ("AmazonES", ServiceKind::Es),
    ("ElasticMapReduce", ServiceKind::Emr),
    ("AmazonDynamoDB", ServiceKind::DynamoDb),
    ("AmazonKinesisFirehose", ServiceKind::Firehose),
    ("AmazonGlacier", ServiceKind::Glacier),
    ("awskms", ServiceKind::Kms),
    ("AmazonApiGateway", ServiceKind::ApiGateway),
    ("AmazonKinesis", ServiceKind::Kinesis),
    ("AWSCloudTrail", ServiceKind::CloudTrail),
    ("AWSQueueService", ServiceKind::Sqs),
    ("AWSSecretsManager", ServiceKind::SecretsManager),
    ("AmazonCloudFront", ServiceKind::CloudFront),
    ("AmazonEFS", ServiceKind::Efs),
    ("AmazonSageMaker", ServiceKind::SageMaker),
    ("AmazonRedshift", ServiceKind::Redshift),
    ("AmazonElastiCache", ServiceKind::ElastiCache),
    ("AmazonWorkSpaces", ServiceKind::Workspaces),
    ("AWSDirectoryService", ServiceKind::DirectoryService),
    ("AmazonDAX", ServiceKind::Dax),
    ("AmazonRoute53", ServiceKind::Route53),
    ("AWSDirecttConnect", ServiceKind::DirectConnect),
    ("datapipeline", ServiceKind::DataPipeline),
];

impl ServiceKind {
    /// Short name, matching the SDK crate suffix where one exists.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Ec2 => "ec2",
            ServiceKind::Elb => "elb",
            ServiceKind::Elbv2 => "elbv2",
            ServiceKind::S3 => "s3",
            ServiceKind::Lambda => "lambda",
            ServiceKind::Logs => "logs",
            ServiceKind::Rds => "rds",
            ServiceKind::Es => "es",
            ServiceKind::Emr => "emr",
            ServiceKind::DynamoDb => "dynamodb",
            ServiceKind::Firehose => "firehose",
            ServiceKind::Glacier => "glacier",
            ServiceKind::Kms => "kms",
            ServiceKind::ApiGateway => "apigateway",
            ServiceKind::Kinesis => "kinesis",
            ServiceKind::CloudTrail => "cloudtrail",
            ServiceKind::Sqs => "sqs",
            ServiceKind::SecretsManager => "secretsmanager",
            ServiceKind::CloudFront => "cloudfront",
            ServiceKind::Efs => "efs",
            ServiceKind::SageMaker => "sagemaker",
            ServiceKind::Redshift => "redshift",
            ServiceKind::ElastiCache => "elasticache",
            ServiceKind::Workspaces => "workspaces",
            ServiceKind::DirectoryService => "ds",
            ServiceKind::Dax => "dax",
            ServiceKind::Route53 => "route53",
            ServiceKind::DirectConnect => "directconnect",
            ServiceKind::DataPipeline => "datapipeline",
        }
    }

    /// Resolve a short service name (the `--services` filter uses these).
    pub fn from_short_name(name: &str) -> Option<ServiceKind> {
        BILLING_NAMES
            .iter()
            .map(|(_, kind)| *kind)
            .find(|kind| kind.as_str() == name)
    }

    /// Resolve a billing-report service name (`service` column in the CSV).
    pub fn from_billing_name(name: &str) -> Option<ServiceKind> {
        BILLING_NAMES
            .iter()
            .find(|(billing, _)| *billing == name)
            .map(|(_, kind)| *kind)
    }

    /// Whether the audit can enumerate resources for this service.
    /// Load balancers only show up on the apply path, where the CSV
    /// hands us their ARNs under the EC2 billing name.
    pub fn supports_discovery(&self) -> bool {
        !matches!(self, ServiceKind::Elb | ServiceKind::Elbv2)
    }
}

/// Refine a service for a concrete resource identifier. Resources
/// billed under EC2 whose ARN points at `elasticloadbalancing` are
/// really classic or v2 load balancers: a classic LB ARN ends in
/// `loadbalancer/name` (2 segments), a v2 ARN in
/// `loadbalancer/app/name/id` (4 segments).
pub fn classify(service: ServiceKind, resource_id: &str) -> Result<ServiceKind> {
    if resource_id.contains("elasticloadbalancing") {
        let suffix = resource_id.rsplit(':').next().unwrap_or_default();
        match suffix.split('/').count() {
            2 => return Ok(ServiceKind::Elb),
            4 => return Ok(ServiceKind::Elbv2),
            n => bail!(
                "unrecognized load balancer identifier {} ({} path segments)",
                resource_id,
                n
            ),
        }
    }
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_billing_table_covers_expected_services() {
        // 28 billing names mapping onto 26 distinct discoverable kinds
        assert_eq!(BILLING_NAMES.len(), 28);
        let mut kinds: Vec<&str> = BILLING_NAMES.iter().map(|(_, k)| k.as_str()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert!(kinds.len() >= 26);
    }

    #[test]
    fn test_billing_name_lookup() {
        assert_eq!(
            ServiceKind::from_billing_name("AmazonApiGateway"),
            Some(ServiceKind::ApiGateway)
        );
        assert_eq!(
            ServiceKind::from_billing_name("AmazonVPC"),
            Some(ServiceKind::Ec2)
        );
        assert_eq!(
            ServiceKind::from_billing_name("AWSQueueService"),
            Some(ServiceKind::Sqs)
        );
        assert_eq!(ServiceKind::from_billing_name("AmazonSNS"), None);
    }

    #[test]
    fn test_short_name_lookup() {
        assert_eq!(ServiceKind::from_short_name("s3"), Some(ServiceKind::S3));
        assert_eq!(
            ServiceKind::from_short_name("ds"),
            Some(ServiceKind::DirectoryService)
        );
        assert_eq!(ServiceKind::from_short_name("nosuch"), None);
    }

    #[test]
    fn test_classify_classic_load_balancer() {
        let arn = "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/my-classic-lb";
        assert_eq!(
            classify(ServiceKind::Ec2, arn).unwrap(),
            ServiceKind::Elb
        );
    }

    #[test]
    fn test_classify_v2_load_balancer() {
        let arn = "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/my-alb/50dc6c495c0c9188";
        assert_eq!(
            classify(ServiceKind::Ec2, arn).unwrap(),
            ServiceKind::Elbv2
        );
    }

    #[test]
    fn test_classify_plain_ec2_instance() {
        let arn = "arn:aws:ec2:us-east-1:123456789012:instance/i-1234567890abcdef0";
        assert_eq!(
            classify(ServiceKind::Ec2, arn).unwrap(),
            ServiceKind::Ec2
        );
    }

    #[test]
    fn test_classify_rejects_odd_lb_shapes() {
        let arn = "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/broken";
        assert!(classify(ServiceKind::Ec2, arn).is_err());
    }

    #[test]
    fn test_discovery_excludes_load_balancers() {
        assert!(!ServiceKind::Elb.supports_discovery());
        assert!(!ServiceKind::Elbv2.supports_discovery());
        assert!(ServiceKind::S3.supports_discovery());
    }
}
