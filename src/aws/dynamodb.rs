use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_dynamodb as dynamodb;

pub struct DynamoDbService {
    client: dynamodb::Client,
}

impl DynamoDbService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: dynamodb::Client::new(config),
        }
    }

    /// Table names, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start_table: Option<String> = None;

        loop {
            let mut request = self.client.list_tables();
            if let Some(t) = &start_table {
                request = request.exclusive_start_table_name(t);
            }
            let resp = request.send().await.context("ListTables failed")?;

            names.extend(resp.table_names().iter().cloned());

            match resp.last_evaluated_table_name() {
                Some(t) => start_table = Some(t.to_string()),
                None => break,
            }
        }

        Ok(names)
    }

    /// ListTagsOfResource wants the table ARN; rows sourced from a
    /// billing export carry it.
    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags_of_resource()
            .resource_arn(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTagsOfResource failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = dynamodb::types::Tag::builder()
            .key(key)
            .value(value)
            .build()?;
        self.client
            .tag_resource()
            .resource_arn(resource_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
