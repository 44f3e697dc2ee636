use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_kinesis as kinesis;

pub struct KinesisService {
    client: kinesis::Client,
}

impl KinesisService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: kinesis::Client::new(config),
        }
    }

    /// Stream names, paginated by exclusive start name.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        let mut start: Option<String> = None;

        loop {
            let mut request = self.client.list_streams();
            if let Some(name) = &start {
                request = request.exclusive_start_stream_name(name);
            }
            let resp = request.send().await.context("ListStreams failed")?;

            let before = names.len();
            names.extend(resp.stream_names().iter().cloned());

            match crate::aws::next_exclusive_start(&names, before, resp.has_more_streams()) {
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
            .list_tags_for_stream()
            .stream_name(&name)
            .send()
            .await
            .with_context(|| format!("ListTagsForStream failed for {}", name))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key(), t.value().unwrap_or_default()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let name = sanitize::last_path_segment(resource_id);
        self.client
            .add_tags_to_stream()
            .stream_name(&name)
            .tags(key, value)
            .send()
            .await
            .with_context(|| format!("AddTagsToStream failed for {}", name))?;
        Ok(())
    }
}
