//! API Gateway REST APIs. Tag reads and writes key on an ARN; the
//! billing export supplies it on the apply path.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_apigateway as apigateway;

pub struct ApiGatewayService {
    client: apigateway::Client,
}

impl ApiGatewayService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: apigateway::Client::new(config),
        }
    }

    /// REST API ids, paginated by position.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut position: Option<String> = None;

        loop {
            let mut request = self.client.get_rest_apis();
            if let Some(p) = &position {
                request = request.position(p);
            }
            let resp = request.send().await.context("GetRestApis failed")?;

            ids.extend(
                resp.items()
                    .iter()
                    .filter_map(|api| api.id().map(String::from)),
            );

            match resp.position() {
                Some(p) => position = Some(p.to_string()),
                None => break,
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .get_tags()
            .resource_arn(resource_id)
            .send()
            .await
            .with_context(|| format!("GetTags failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .map(|map| map.iter().map(|(k, v)| Tag::new(k, v)).collect())
            .unwrap_or_default())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.client
            .tag_resource()
            .resource_arn(resource_id)
            .tags(key, value)
            .send()
            .await
            .with_context(|| format!("TagResource failed for {}", resource_id))?;
        Ok(())
    }
}
