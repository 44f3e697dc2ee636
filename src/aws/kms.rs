//! KMS is the one service that spells its tag fields `TagKey` and
//! `TagValue`.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_kms as kms;

pub struct KmsService {
    client: kms::Client,
}

impl KmsService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: kms::Client::new(config),
        }
    }

    /// Key ids, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_keys();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListKeys failed")?;

            ids.extend(
                resp.keys()
                    .iter()
                    .filter_map(|k| k.key_id().map(String::from)),
            );

            if resp.truncated() {
                marker = resp.next_marker().map(String::from);
            } else {
                break;
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_resource_tags()
            .key_id(resource_id)
            .send()
            .await
            .with_context(|| format!("ListResourceTags failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.tag_key(), t.tag_value()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = kms::types::Tag::builder()
            .tag_key(key)
            .tag_value(value)
            .build()?;
        self.client
            .tag_resource()
            .key_id(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
