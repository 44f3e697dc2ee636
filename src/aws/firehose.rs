use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_firehose as firehose;

pub struct FirehoseService {
    client: firehose::Client,
}

impl FirehoseService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: firehose::Client::new(config),
        }
    }

    /// Delivery stream names, paginated by exclusive start name.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        let mut start: Option<String> = None;

        loop {
            let mut request = self.client.list_delivery_streams();
            if let Some(name) = &start {
                request = request.exclusive_start_delivery_stream_name(name);
            }
            let resp = request
                .send()
                .await
                .context("ListDeliveryStreams failed")?;

            let before = names.len();
            names.extend(resp.delivery_stream_names().iter().cloned());

            match crate::aws::next_exclusive_start(&names, before, resp.has_more_delivery_streams())
            {
                Some(name) => start = Some(name),
                None => break,
            }
        }

        Ok(names)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let name = sanitize::last_path_segment(resource_id);
        let resp = self
            .client
            .list_tags_for_delivery_stream()
            .delivery_stream_name(&name)
            .send()
            .await
            .with_context(|| format!("ListTagsForDeliveryStream failed for {}", name))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key(), t.value().unwrap_or_default()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let name = sanitize::last_path_segment(resource_id);
        let tag = firehose::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .tag_delivery_stream()
            .delivery_stream_name(&name)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("TagDeliveryStream failed for {}", name))?;
        Ok(())
    }
}
