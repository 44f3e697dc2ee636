//! CloudTrail trails. The tag read is ListTags over a resource id
//! list, answering with one `ResourceTag` envelope per trail.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_cloudtrail as cloudtrail;

pub struct CloudTrailService {
    client: cloudtrail::Client,
}

impl CloudTrailService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: cloudtrail::Client::new(config),
        }
    }

    /// Trail ARNs.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .describe_trails()
            .send()
            .await
            .context("DescribeTrails failed")?;
        Ok(resp
            .trail_list()
            .iter()
            .filter_map(|t| t.trail_arn().map(String::from))
            .collect())
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags()
            .resource_id_list(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTags failed for {}", resource_id))?;

        let mut tags = Vec::new();
        for resource in resp.resource_tag_list() {
            for tag in resource.tags_list() {
                tags.push(Tag::new(tag.key(), tag.value().unwrap_or_default()));
            }
        }
        Ok(tags)
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = cloudtrail::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .add_tags()
            .resource_id(resource_id)
            .tags_list(tag)
            .send()
            .await
            .with_context(|| format!("AddTags failed for {}", resource_id))?;
        Ok(())
    }
}
