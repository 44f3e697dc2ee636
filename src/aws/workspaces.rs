use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_workspaces as workspaces;

pub struct WorkspacesService {
    client: workspaces::Client,
}

impl WorkspacesService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: workspaces::Client::new(config),
        }
    }

    /// Workspace ids, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.describe_workspaces();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request.send().await.context("DescribeWorkspaces failed")?;

            ids.extend(
                resp.workspaces()
                    .iter()
                    .filter_map(|w| w.workspace_id().map(String::from)),
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
            .describe_tags()
            .resource_id(resource_id)
            .send()
            .await
            .with_context(|| format!("DescribeTags failed for {}", resource_id))?;

        Ok(resp
            .tag_list()
            .iter()
            .map(|t| Tag::new(t.key(), t.value().unwrap_or_default()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = workspaces::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .create_tags()
            .resource_id(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("CreateTags failed for {}", resource_id))?;
        Ok(())
    }
}
