//! CloudFront wraps its tag list in an extra `Tags { Items }`
//! envelope on both the read and write sides.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_cloudfront as cloudfront;

pub struct CloudFrontService {
    client: cloudfront::Client,
}

impl CloudFrontService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: cloudfront::Client::new(config),
        }
    }

    /// Distribution ARNs, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_distributions();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListDistributions failed")?;

            let Some(list) = resp.distribution_list() else {
                break;
            };
            arns.extend(list.items().iter().map(|d| d.arn().to_string()));

            match list.next_marker() {
                Some(m) if list.is_truncated() => marker = Some(m.to_string()),
                _ => break,
            }
        }

        Ok(arns)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags_for_resource()
            .resource(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTagsForResource failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .map(|tags| {
                tags.items()
                    .iter()
                    .map(|t| Tag::new(t.key(), t.value().unwrap_or_default()))
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = cloudfront::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .tag_resource()
            .resource(resource_id)
            .tags(cloudfront::types::Tags::builder().items(tag).build())
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
