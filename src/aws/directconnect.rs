//! Direct Connect virtual interfaces. The one service spelling its
//! tag fields lowercase `key`/`value` on the wire; the SDK hides that.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_directconnect as directconnect;

pub struct DirectConnectService {
    client: directconnect::Client,
}

impl DirectConnectService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: directconnect::Client::new(config),
        }
    }

    /// Virtual interface ids.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .describe_virtual_interfaces()
            .send()
            .await
            .context("DescribeVirtualInterfaces failed")?;

        Ok(resp
            .virtual_interfaces()
            .iter()
            .filter_map(|v| v.virtual_interface_id().map(String::from))
            .collect())
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
        for resource in resp.resource_tags() {
            for tag in resource.tags() {
                tags.push(Tag::new(tag.key(), tag.value().unwrap_or_default()));
            }
        }
        Ok(tags)
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = directconnect::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .tag_resource()
            .resource_arn(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
