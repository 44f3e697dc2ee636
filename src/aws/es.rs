//! Elasticsearch Service domains. Discovery is a two-step: domain
//! names first, then a describe to turn names into the ARNs the
//! tagging API wants.

use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_elasticsearch as es;

pub struct EsService {
    client: es::Client,
}

impl EsService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: es::Client::new(config),
        }
    }

    /// Domain ARNs.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .list_domain_names()
            .send()
            .await
            .context("ListDomainNames failed")?;

        let names: Vec<String> = resp
            .domain_names()
            .iter()
            .filter_map(|d| d.domain_name().map(String::from))
            .collect();

        if names.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self
            .client
            .describe_elasticsearch_domains()
            .set_domain_names(Some(names))
            .send()
            .await
            .context("DescribeElasticsearchDomains failed")?;

        Ok(resp
            .domain_status_list()
            .iter()
            .map(|d| d.arn().to_string())
            .collect())
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .list_tags()
            .arn(resource_id)
            .send()
            .await
            .with_context(|| format!("ListTags failed for {}", resource_id))?;

        Ok(resp
            .tag_list()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let tag = es::types::Tag::builder().key(key).value(value).build()?;
        self.client
            .add_tags()
            .arn(resource_id)
            .tag_list(tag)
            .send()
            .await
            .with_context(|| format!("AddTags failed for {}", resource_id))?;
        Ok(())
    }
}
