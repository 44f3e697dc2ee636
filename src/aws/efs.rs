use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_efs as efs;

pub struct EfsService {
    client: efs::Client,
}

impl EfsService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: efs::Client::new(config),
        }
    }

    /// File system ids, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.describe_file_systems();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("DescribeFileSystems failed")?;

            ids.extend(
                resp.file_systems()
                    .iter()
                    .map(|fs| fs.file_system_id().to_string()),
            );

            match resp.next_marker() {
                Some(m) => marker = Some(m.to_string()),
                None => break,
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let id = sanitize::last_path_segment(resource_id);
        #[allow(deprecated)]
        let resp = self
            .client
            .describe_tags()
            .file_system_id(&id)
            .send()
            .await
            .with_context(|| format!("DescribeTags failed for {}", id))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let id = sanitize::last_path_segment(resource_id);
        let tag = efs::types::Tag::builder().key(key).value(value).build()?;
        #[allow(deprecated)]
        self.client
            .create_tags()
            .file_system_id(&id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("CreateTags failed for {}", id))?;
        Ok(())
    }
}
