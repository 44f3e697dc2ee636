//! CloudWatch Logs. The billing report calls this `AmazonCloudWatch`,
//! but the taggable resources are log groups, keyed by name (which may
//! itself contain slashes, hence the colon-only ARN strip).

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs as logs;

pub struct LogsService {
    client: logs::Client,
}

impl LogsService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: logs::Client::new(config),
        }
    }

    /// Log group names, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.describe_log_groups();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request.send().await.context("DescribeLogGroups failed")?;

            names.extend(
                resp.log_groups()
                    .iter()
                    .filter_map(|g| g.log_group_name().map(String::from)),
            );

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(names)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let name = sanitize::log_group_name(resource_id);
        #[allow(deprecated)]
        let resp = self
            .client
            .list_tags_log_group()
            .log_group_name(&name)
            .send()
            .await
            .with_context(|| format!("ListTagsLogGroup failed for {}", name))?;

        Ok(resp
            .tags()
            .map(|map| map.iter().map(|(k, v)| Tag::new(k, v)).collect())
            .unwrap_or_default())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let name = sanitize::log_group_name(resource_id);
        #[allow(deprecated)]
        self.client
            .tag_log_group()
            .log_group_name(&name)
            .tags(key, value)
            .send()
            .await
            .with_context(|| format!("TagLogGroup failed for {}", name))?;
        Ok(())
    }
}
