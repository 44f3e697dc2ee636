use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_dax as dax;

pub struct DaxService {
    client: dax::Client,
}

impl DaxService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: dax::Client::new(config),
        }
    }

    /// Cluster ARNs, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.describe_clusters();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request.send().await.context("DescribeClusters failed")?;

            arns.extend(
                resp.clusters()
                    .iter()
                    .filter_map(|c| c.cluster_arn().map(String::from)),
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
            .resource_name(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTags failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .iter()
            .filter_map(|t| match (t.key(), t.value()) {
                (Some(k), Some(v)) => Some(Tag::new(k, v)),
                _ => None,
            })
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.client
            .tag_resource()
            .resource_name(resource_id)
            .tags(dax::types::Tag::builder().key(key).value(value).build())
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
