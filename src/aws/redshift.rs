//! Redshift clusters. DescribeTags answers with `TaggedResource`
//! wrappers, each holding a single tag.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_redshift as redshift;

pub struct RedshiftService {
    client: redshift::Client,
}

impl RedshiftService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: redshift::Client::new(config),
        }
    }

    /// Cluster identifiers, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.describe_clusters();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("DescribeClusters failed")?;

            ids.extend(
                resp.clusters()
                    .iter()
                    .filter_map(|c| c.cluster_identifier().map(String::from)),
            );

            match resp.marker() {
                Some(m) => marker = Some(m.to_string()),
                None => break,
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .describe_tags()
            .resource_name(resource_id)
            .send()
            .await
            .with_context(|| format!("DescribeTags failed for {}", resource_id))?;

        Ok(resp
            .tagged_resources()
            .iter()
            .filter_map(|r| r.tag())
            .filter_map(|t| match (t.key(), t.value()) {
                (Some(k), Some(v)) => Some(Tag::new(k, v)),
                _ => None,
            })
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.client
            .create_tags()
            .resource_name(resource_id)
            .tags(
                redshift::types::Tag::builder()
                    .key(key)
                    .value(value)
                    .build(),
            )
            .send()
            .await
            .with_context(|| format!("CreateTags failed for {}", resource_id))?;
        Ok(())
    }
}
