//! Directory Service (AD/Simple AD directories).

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_directoryservice as ds;

pub struct DirectoryService {
    client: ds::Client,
}

impl DirectoryService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: ds::Client::new(config),
        }
    }

    /// Directory ids, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.describe_directories();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request.send().await.context("DescribeDirectories failed")?;

            ids.extend(
                resp.directory_descriptions()
                    .iter()
                    .filter_map(|d| d.directory_id().map(String::from)),
            );

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags_for_resource()
            .resource_id(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTagsForResource failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = ds::types::Tag::builder().key(key).value(value).build()?;
        self.client
            .add_tags_to_resource()
            .resource_id(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("AddTagsToResource failed for {}", resource_id))?;
        Ok(())
    }
}
