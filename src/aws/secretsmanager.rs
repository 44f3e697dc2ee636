//! Secrets Manager. Tags ride along on DescribeSecret; there is no
//! separate list-tags call.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_secretsmanager as secretsmanager;

pub struct SecretsManagerService {
    client: secretsmanager::Client,
}

impl SecretsManagerService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: secretsmanager::Client::new(config),
        }
    }

    /// Secret names, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.list_secrets();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request.send().await.context("ListSecrets failed")?;

            names.extend(
                resp.secret_list()
                    .iter()
                    .filter_map(|s| s.name().map(String::from)),
            );

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(names)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .describe_secret()
            .secret_id(resource_id)
            .send()
            .await
            .with_context(|| format!("DescribeSecret failed for {}", resource_id))?;

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
            .secret_id(resource_id)
            .tags(
                secretsmanager::types::Tag::builder()
                    .key(key)
                    .value(value)
                    .build(),
            )
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
