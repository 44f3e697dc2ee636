use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_rds as rds;

pub struct RdsService {
    client: rds::Client,
}

impl RdsService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: rds::Client::new(config),
        }
    }

    /// DB instance ARNs, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.describe_db_instances();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("DescribeDBInstances failed")?;

            arns.extend(
                resp.db_instances()
                    .iter()
                    .filter_map(|i| i.db_instance_arn().map(String::from)),
            );

            match resp.marker() {
                Some(m) => marker = Some(m.to_string()),
                None => break,
            }
        }

        Ok(arns)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags_for_resource()
            .resource_name(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTagsForResource failed for {}", resource_id))?;

        Ok(resp
            .tag_list()
            .iter()
            .filter_map(|t| match (t.key(), t.value()) {
                (Some(k), Some(v)) => Some(Tag::new(k, v)),
                _ => None,
            })
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.client
            .add_tags_to_resource()
            .resource_name(resource_id)
            .tags(rds::types::Tag::builder().key(key).value(value).build())
            .send()
            .await
            .with_context(|| format!("AddTagsToResource failed for {}", resource_id))?;
        Ok(())
    }
}
