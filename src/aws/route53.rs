//! Route 53 hosted zones. The tagging API takes a resource type plus
//! the bare zone id; ListHostedZones hands ids back with a
//! `/hostedzone/` prefix that has to go.

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_route53 as route53;
use route53::types::TagResourceType;

pub struct Route53Service {
    client: route53::Client,
}

impl Route53Service {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: route53::Client::new(config),
        }
    }

    /// Hosted zone ids (prefixed form, as the API returns them),
    /// paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_hosted_zones();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListHostedZones failed")?;

            ids.extend(resp.hosted_zones().iter().map(|z| z.id().to_string()));

            if resp.is_truncated() {
                marker = resp.next_marker().map(String::from);
            } else {
                break;
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let id = sanitize::hosted_zone_id(resource_id);
        let resp = self
            .client
            .list_tags_for_resource()
            .resource_type(TagResourceType::Hostedzone)
            .resource_id(&id)
            .send()
            .await
            .with_context(|| format!("ListTagsForResource failed for hosted zone {}", id))?;

        let Some(tag_set) = resp.resource_tag_set() else {
            return Ok(Vec::new());
        };
        Ok(tag_set
            .tags()
            .iter()
            .filter_map(|t| match (t.key(), t.value()) {
                (Some(k), Some(v)) => Some(Tag::new(k, v)),
                _ => None,
            })
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let id = sanitize::hosted_zone_id(resource_id);
        self.client
            .change_tags_for_resource()
            .resource_type(TagResourceType::Hostedzone)
            .resource_id(&id)
            .add_tags(
                route53::types::Tag::builder()
                    .key(key)
                    .value(value)
                    .build(),
            )
            .send()
            .await
            .with_context(|| format!("ChangeTagsForResource failed for hosted zone {}", id))?;
        Ok(())
    }
}
