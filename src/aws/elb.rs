//! Classic load balancers. Only reachable through the backfill: the
//! billing report files them under EC2 and the ARN shape tells them
//! apart (see `services::classify`). The API keys on the LB name, not
//! the ARN.

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_elasticloadbalancing as elb;

pub struct ElbService {
    client: elb::Client,
}

impl ElbService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: elb::Client::new(config),
        }
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let name = sanitize::load_balancer_name(resource_id);
        let resp = self
            .client
            .describe_tags()
            .load_balancer_names(&name)
            .send()
            .await
            .with_context(|| format!("DescribeTags failed for load balancer {}", name))?;

        let mut tags = Vec::new();
        for description in resp.tag_descriptions() {
            for tag in description.tags() {
                tags.push(Tag::new(tag.key(), tag.value().unwrap_or_default()));
            }
        }
        Ok(tags)
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let name = sanitize::load_balancer_name(resource_id);
        let tag = elb::types::Tag::builder().key(key).value(value).build()?;
        self.client
            .add_tags()
            .load_balancer_names(&name)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("AddTags failed for load balancer {}", name))?;
        Ok(())
    }
}
