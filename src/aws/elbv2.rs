//! Application/network load balancers. Same split-brain situation as
//! classic ELB, except v2 keys on the full ARN.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_elasticloadbalancingv2 as elbv2;

pub struct Elbv2Service {
    client: elbv2::Client,
}

impl Elbv2Service {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: elbv2::Client::new(config),
        }
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .describe_tags()
            .resource_arns(resource_id)
            .send()
            .await
            .with_context(|| format!("DescribeTags failed for {}", resource_id))?;

        let mut tags = Vec::new();
        for description in resp.tag_descriptions() {
            for tag in description.tags() {
                tags.push(Tag::new(tag.key(), tag.value().unwrap_or_default()));
            }
        }
        Ok(tags)
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = elbv2::types::Tag::builder().key(key).value(value).build()?;
        self.client
            .add_tags()
            .resource_arns(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("AddTags failed for {}", resource_id))?;
        Ok(())
    }
}
