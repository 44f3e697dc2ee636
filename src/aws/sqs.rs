//! SQS queues, identified by queue URL end to end.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_sqs as sqs;

pub struct SqsService {
    client: sqs::Client,
}

impl SqsService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: sqs::Client::new(config),
        }
    }

    /// Queue URLs, paginated.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.list_queues();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }
            let resp = request.send().await.context("ListQueues failed")?;

            urls.extend(resp.queue_urls().iter().cloned());

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(urls)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_queue_tags()
            .queue_url(resource_id)
            .send()
            .await
            .with_context(|| format!("ListQueueTags failed for {}", resource_id))?;

        Ok(resp
            .tags()
            .map(|map| map.iter().map(|(k, v)| Tag::new(k, v)).collect())
            .unwrap_or_default())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.client
            .tag_queue()
            .queue_url(resource_id)
            .tags(key, value)
            .send()
            .await
            .with_context(|| format!("TagQueue failed for {}", resource_id))?;
        Ok(())
    }
}
