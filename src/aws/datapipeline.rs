//! Data Pipeline. Tags ride on DescribePipelines output; writes go
//! through AddTags on the pipeline id.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_datapipeline as datapipeline;

pub struct DataPipelineService {
    client: datapipeline::Client,
}

impl DataPipelineService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: datapipeline::Client::new(config),
        }
    }

    /// Pipeline ids, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_pipelines();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListPipelines failed")?;

            ids.extend(
                resp.pipeline_id_list()
                    .iter()
                    .filter_map(|p| p.id().map(String::from)),
            );

            if resp.has_more_results() {
                marker = resp.marker().map(String::from);
            } else {
                break;
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .describe_pipelines()
            .pipeline_ids(resource_id)
            .send()
            .await
            .with_context(|| format!("DescribePipelines failed for {}", resource_id))?;

        let mut tags = Vec::new();
        for description in resp.pipeline_description_list() {
            for tag in description.tags() {
                tags.push(Tag::new(tag.key(), tag.value()));
            }
        }
        Ok(tags)
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = datapipeline::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .add_tags()
            .pipeline_id(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("AddTags failed for {}", resource_id))?;
        Ok(())
    }
}
