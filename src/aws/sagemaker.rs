//! SageMaker notebook instances, the one SageMaker resource the
//! billing report surfaces.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_sagemaker as sagemaker;

pub struct SageMakerService {
    client: sagemaker::Client,
}

impl SageMakerService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: sagemaker::Client::new(config),
        }
    }

    /// Notebook instance ARNs, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.list_notebook_instances();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request
                .send()
                .await
                .context("ListNotebookInstances failed")?;

            arns.extend(
                resp.notebook_instances()
                    .iter()
                    .filter_map(|n| n.notebook_instance_arn().map(String::from)),
            );

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(arns)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags()
            .resource_arn(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTags failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = sagemaker::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .add_tags()
            .resource_arn(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("AddTags failed for {}", resource_id))?;
        Ok(())
    }
}
