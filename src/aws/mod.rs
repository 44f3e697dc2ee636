//! Per-service AWS bindings and the dispatch layer that folds ~20
//! vendor API shapes into three operations: list resources, read
//! tags, write a tag.

pub mod apigateway;
pub mod cloudfront;
pub mod cloudtrail;
pub mod datapipeline;
pub mod dax;
pub mod directconnect;
pub mod directory;
pub mod dynamodb;
pub mod ec2;
pub mod efs;
pub mod elasticache;
pub mod elb;
pub mod elbv2;
pub mod emr;
pub mod errors;
pub mod es;
pub mod firehose;
pub mod glacier;
pub mod kinesis;
pub mod kms;
pub mod lambda;
pub mod logs;
pub mod rds;
pub mod redshift;
pub mod route53;
pub mod s3;
pub mod sagemaker;
pub mod secretsmanager;
pub mod sqs;
pub mod workspaces;

use crate::services::{classify, ServiceKind};
use crate::tags::{self, Tag};
use anyhow::{bail, Result};
use aws_config::{BehaviorVersion, SdkConfig};
use aws_types::region::Region;

/// Cursor for name-keyed pagination (the Kinesis/Firehose style, where
/// the last name seen is the next request's exclusive start). Follow up
/// only when the service reports more pages and this page actually
/// advanced the list; an empty page with `has_more` set would otherwise
/// re-issue the same request forever.
pub(crate) fn next_exclusive_start(
    names: &[String],
    len_before: usize,
    has_more: bool,
) -> Option<String> {
    if has_more && names.len() > len_before {
        names.last().cloned()
    } else {
        None
    }
}

/// One loaded `SdkConfig` shared by every service; clients are cheap
/// to construct, so they are built on demand per call rather than
/// cached.
pub struct TaggingClient {
    config: SdkConfig,
}

impl TaggingClient {
    /// Load credentials and region from the default provider chain,
    /// with optional CLI overrides.
    pub async fn load(region: Option<String>, profile: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(&profile);
        }
        Self {
            config: loader.load().await,
        }
    }

    #[cfg(test)]
    pub fn from_config(config: SdkConfig) -> Self {
        Self { config }
    }

    fn ec2(&self) -> ec2::Ec2Service {
        ec2::Ec2Service::new(&self.config)
    }

    fn elb(&self) -> elb::ElbService {
        elb::ElbService::new(&self.config)
    }

    fn elbv2(&self) -> elbv2::Elbv2Service {
        elbv2::Elbv2Service::new(&self.config)
    }

    fn s3(&self) -> s3::S3Service {
        s3::S3Service::new(&self.config)
    }

    fn lambda(&self) -> lambda::LambdaService {
        lambda::LambdaService::new(&self.config)
    }

    fn logs(&self) -> logs::LogsService {
        logs::LogsService::new(&self.config)
    }

    fn rds(&self) -> rds::RdsService {
        rds::RdsService::new(&self.config)
    }

    fn es(&self) -> es::EsService {
        es::EsService::new(&self.config)
    }

    fn emr(&self) -> emr::EmrService {
        emr::EmrService::new(&self.config)
    }

    fn dynamodb(&self) -> dynamodb::DynamoDbService {
        dynamodb::DynamoDbService::new(&self.config)
    }

    fn firehose(&self) -> firehose::FirehoseService {
        firehose::FirehoseService::new(&self.config)
    }

    fn glacier(&self) -> glacier::GlacierService {
        glacier::GlacierService::new(&self.config)
    }

    fn kms(&self) -> kms::KmsService {
        kms::KmsService::new(&self.config)
    }

    fn apigateway(&self) -> apigateway::ApiGatewayService {
        apigateway::ApiGatewayService::new(&self.config)
    }

    fn kinesis(&self) -> kinesis::KinesisService {
        kinesis::KinesisService::new(&self.config)
    }

    fn cloudtrail(&self) -> cloudtrail::CloudTrailService {
        cloudtrail::CloudTrailService::new(&self.config)
    }

    fn sqs(&self) -> sqs::SqsService {
        sqs::SqsService::new(&self.config)
    }

    fn secretsmanager(&self) -> secretsmanager::SecretsManagerService {
        secretsmanager::SecretsManagerService::new(&self.config)
    }

    fn cloudfront(&self) -> cloudfront::CloudFrontService {
        cloudfront::CloudFrontService::new(&self.config)
    }

    fn efs(&self) -> efs::EfsService {
        efs::EfsService::new(&self.config)
    }

    fn sagemaker(&self) -> sagemaker::SageMakerService {
        sagemaker::SageMakerService::new(&self.config)
    }

    fn redshift(&self) -> redshift::RedshiftService {
        redshift::RedshiftService::new(&self.config)
    }

    fn elasticache(&self) -> elasticache::ElastiCacheService {
        elasticache::ElastiCacheService::new(&self.config)
    }

    fn workspaces(&self) -> workspaces::WorkspacesService {
        workspaces::WorkspacesService::new(&self.config)
    }

    fn directory(&self) -> directory::DirectoryService {
        directory::DirectoryService::new(&self.config)
    }

    fn dax(&self) -> dax::DaxService {
        dax::DaxService::new(&self.config)
    }

    fn route53(&self) -> route53::Route53Service {
        route53::Route53Service::new(&self.config)
    }

    fn directconnect(&self) -> directconnect::DirectConnectService {
        directconnect::DirectConnectService::new(&self.config)
    }

    fn datapipeline(&self) -> datapipeline::DataPipelineService {
        datapipeline::DataPipelineService::new(&self.config)
    }

    /// Discover resource identifiers for a service.
    pub async fn list_resources(&self, service: ServiceKind) -> Result<Vec<String>> {
        match service {
            ServiceKind::Ec2 => self.ec2().list_resources().await,
            ServiceKind::S3 => self.s3().list_resources().await,
            ServiceKind::Lambda => self.lambda().list_resources().await,
            ServiceKind::Logs => self.logs().list_resources().await,
            ServiceKind::Rds => self.rds().list_resources().await,
            ServiceKind::Es => self.es().list_resources().await,
            ServiceKind::Emr => self.emr().list_resources().await,
            ServiceKind::DynamoDb => self.dynamodb().list_resources().await,
            ServiceKind::Firehose => self.firehose().list_resources().await,
            ServiceKind::Glacier => self.glacier().list_resources().await,
            ServiceKind::Kms => self.kms().list_resources().await,
            ServiceKind::ApiGateway => self.apigateway().list_resources().await,
            ServiceKind::Kinesis => self.kinesis().list_resources().await,
            ServiceKind::CloudTrail => self.cloudtrail().list_resources().await,
            ServiceKind::Sqs => self.sqs().list_resources().await,
            ServiceKind::SecretsManager => self.secretsmanager().list_resources().await,
            ServiceKind::CloudFront => self.cloudfront().list_resources().await,
            ServiceKind::Efs => self.efs().list_resources().await,
            ServiceKind::SageMaker => self.sagemaker().list_resources().await,
            ServiceKind::Redshift => self.redshift().list_resources().await,
            ServiceKind::ElastiCache => self.elasticache().list_resources().await,
            ServiceKind::Workspaces => self.workspaces().list_resources().await,
            ServiceKind::DirectoryService => self.directory().list_resources().await,
            ServiceKind::Dax => self.dax().list_resources().await,
            ServiceKind::Route53 => self.route53().list_resources().await,
            ServiceKind::DirectConnect => self.directconnect().list_resources().await,
            ServiceKind::DataPipeline => self.datapipeline().list_resources().await,
            ServiceKind::Elb | ServiceKind::Elbv2 => {
                bail!("load balancers are not discoverable; they arrive via the apply CSV")
            }
        }
    }

    /// Read a resource's tags, normalized to flat pairs. The service
    /// is refined first so EC2-billed load balancer ARNs land on the
    /// right API.
    pub async fn list_tags(&self, service: ServiceKind, resource_id: &str) -> Result<Vec<Tag>> {
        match classify(service, resource_id)? {
            ServiceKind::Ec2 => self.ec2().list_tags(resource_id).await,
            ServiceKind::Elb => self.elb().list_tags(resource_id).await,
            ServiceKind::Elbv2 => self.elbv2().list_tags(resource_id).await,
            ServiceKind::S3 => self.s3().list_tags(resource_id).await,
            ServiceKind::Lambda => self.lambda().list_tags(resource_id).await,
            ServiceKind::Logs => self.logs().list_tags(resource_id).await,
            ServiceKind::Rds => self.rds().list_tags(resource_id).await,
            ServiceKind::Es => self.es().list_tags(resource_id).await,
            ServiceKind::Emr => self.emr().list_tags(resource_id).await,
            ServiceKind::DynamoDb => self.dynamodb().list_tags(resource_id).await,
            ServiceKind::Firehose => self.firehose().list_tags(resource_id).await,
            ServiceKind::Glacier => self.glacier().list_tags(resource_id).await,
            ServiceKind::Kms => self.kms().list_tags(resource_id).await,
            ServiceKind::ApiGateway => self.apigateway().list_tags(resource_id).await,
            ServiceKind::Kinesis => self.kinesis().list_tags(resource_id).await,
            ServiceKind::CloudTrail => self.cloudtrail().list_tags(resource_id).await,
            ServiceKind::Sqs => self.sqs().list_tags(resource_id).await,
            ServiceKind::SecretsManager => self.secretsmanager().list_tags(resource_id).await,
            ServiceKind::CloudFront => self.cloudfront().list_tags(resource_id).await,
            ServiceKind::Efs => self.efs().list_tags(resource_id).await,
            ServiceKind::SageMaker => self.sagemaker().list_tags(resource_id).await,
            ServiceKind::Redshift => self.redshift().list_tags(resource_id).await,
            ServiceKind::ElastiCache => self.elasticache().list_tags(resource_id).await,
            ServiceKind::Workspaces => self.workspaces().list_tags(resource_id).await,
            ServiceKind::DirectoryService => self.directory().list_tags(resource_id).await,
            ServiceKind::Dax => self.dax().list_tags(resource_id).await,
            ServiceKind::Route53 => self.route53().list_tags(resource_id).await,
            ServiceKind::DirectConnect => self.directconnect().list_tags(resource_id).await,
            ServiceKind::DataPipeline => self.datapipeline().list_tags(resource_id).await,
        }
    }

    /// Write one tag through the service's tagging API.
    pub async fn apply_tag(
        &self,
        service: ServiceKind,
        resource_id: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        match classify(service, resource_id)? {
            ServiceKind::Ec2 => self.ec2().put_tag(resource_id, key, value).await,
            ServiceKind::Elb => self.elb().put_tag(resource_id, key, value).await,
            ServiceKind::Elbv2 => self.elbv2().put_tag(resource_id, key, value).await,
            ServiceKind::S3 => self.s3().put_tag(resource_id, key, value).await,
            ServiceKind::Lambda => self.lambda().put_tag(resource_id, key, value).await,
            ServiceKind::Logs => self.logs().put_tag(resource_id, key, value).await,
            ServiceKind::Rds => self.rds().put_tag(resource_id, key, value).await,
            ServiceKind::Es => self.es().put_tag(resource_id, key, value).await,
            ServiceKind::Emr => self.emr().put_tag(resource_id, key, value).await,
            ServiceKind::DynamoDb => self.dynamodb().put_tag(resource_id, key, value).await,
            ServiceKind::Firehose => self.firehose().put_tag(resource_id, key, value).await,
            ServiceKind::Glacier => self.glacier().put_tag(resource_id, key, value).await,
            ServiceKind::Kms => self.kms().put_tag(resource_id, key, value).await,
            ServiceKind::ApiGateway => self.apigateway().put_tag(resource_id, key, value).await,
            ServiceKind::Kinesis => self.kinesis().put_tag(resource_id, key, value).await,
            ServiceKind::CloudTrail => self.cloudtrail().put_tag(resource_id, key, value).await,
            ServiceKind::Sqs => self.sqs().put_tag(resource_id, key, value).await,
            ServiceKind::SecretsManager => {
                self.secretsmanager().put_tag(resource_id, key, value).await
            }
            ServiceKind::CloudFront => self.cloudfront().put_tag(resource_id, key, value).await,
            ServiceKind::Efs => self.efs().put_tag(resource_id, key, value).await,
            ServiceKind::SageMaker => self.sagemaker().put_tag(resource_id, key, value).await,
            ServiceKind::Redshift => self.redshift().put_tag(resource_id, key, value).await,
            ServiceKind::ElastiCache => self.elasticache().put_tag(resource_id, key, value).await,
            ServiceKind::Workspaces => self.workspaces().put_tag(resource_id, key, value).await,
            ServiceKind::DirectoryService => {
                self.directory().put_tag(resource_id, key, value).await
            }
            ServiceKind::Dax => self.dax().put_tag(resource_id, key, value).await,
            ServiceKind::Route53 => self.route53().put_tag(resource_id, key, value).await,
            ServiceKind::DirectConnect => {
                self.directconnect().put_tag(resource_id, key, value).await
            }
            ServiceKind::DataPipeline => {
                self.datapipeline().put_tag(resource_id, key, value).await
            }
        }
    }

    /// Whether `key` is present on the resource. An S3 bucket with no
    /// tag set at all simply has no tags.
    pub async fn has_tag(
        &self,
        service: ServiceKind,
        resource_id: &str,
        key: &str,
    ) -> Result<bool> {
        match self.list_tags(service, resource_id).await {
            Ok(tags) => Ok(tags::has_key(&tags, key)),
            Err(e) if service == ServiceKind::S3 && errors::is_no_such_tag_set(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// The resource's tags projected onto `wanted` keys, with the S3
    /// no-tag-set case reading as empty.
    pub async fn tag_values(
        &self,
        service: ServiceKind,
        resource_id: &str,
        wanted: &[&str],
    ) -> Result<Vec<Tag>> {
        match self.list_tags(service, resource_id).await {
            Ok(all) => Ok(tags::project(&all, wanted)),
            Err(e) if service == ServiceKind::S3 && errors::is_no_such_tag_set(&e) => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_next_exclusive_start_follows_advancing_pages() {
        let names = vec!["alpha".to_string(), "bravo".to_string()];
        assert_eq!(
            next_exclusive_start(&names, 0, true),
            Some("bravo".to_string())
        );
    }

    #[test]
    fn test_next_exclusive_start_stops_at_last_page() {
        let names = vec!["alpha".to_string()];
        assert_eq!(next_exclusive_start(&names, 0, false), None);
    }

    #[test]
    fn test_next_exclusive_start_stops_on_empty_page() {
        // has_more with no new names must not re-issue the same request
        let names = vec!["alpha".to_string()];
        assert_eq!(next_exclusive_start(&names, 1, true), None);
        assert_eq!(next_exclusive_start(&[], 0, true), None);
    }
}
