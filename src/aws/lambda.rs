//! Lambda tags live on the function ARN (ListTags/TagResource take no
//! bare name), so discovery returns ARNs rather than function names.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_lambda as lambda;

pub struct LambdaService {
    client: lambda::Client,
}

impl LambdaService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: lambda::Client::new(config),
        }
    }

    /// Function ARNs, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_functions();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListFunctions failed")?;

            arns.extend(
                resp.functions()
                    .iter()
                    .filter_map(|f| f.function_arn().map(String::from)),
            );

            match resp.next_marker() {
                Some(next) => marker = Some(next.to_string()),
                None => break,
            }
        }

        Ok(arns)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags()
            .resource(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTags failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .map(|map| map.iter().map(|(k, v)| Tag::new(k, v)).collect())
            .unwrap_or_default())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.client
            .tag_resource()
            .resource(resource_id)
            .tags(key, value)
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
