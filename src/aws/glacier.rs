//! Glacier vaults. Every Glacier call carries an account id; `-`
//! means the credentialed account (boto3 filled this in implicitly).

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_glacier as glacier;

const CURRENT_ACCOUNT: &str = "-";

pub struct GlacierService {
    client: glacier::Client,
}

impl GlacierService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: glacier::Client::new(config),
        }
    }

    /// Vault names, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_vaults().account_id(CURRENT_ACCOUNT);
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListVaults failed")?;

            names.extend(
                resp.vault_list()
                    .iter()
                    .filter_map(|v| v.vault_name().map(String::from)),
            );

            match resp.marker() {
                Some(m) => marker = Some(m.to_string()),
                None => break,
            }
        }

        Ok(names)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let vault = sanitize::last_path_segment(resource_id);
        let resp = self
            .client
            .list_tags_for_vault()
            .account_id(CURRENT_ACCOUNT)
            .vault_name(&vault)
            .send()
            .await
            .with_context(|| format!("ListTagsForVault failed for {}", vault))?;

        Ok(resp
            .tags()
            .map(|map| map.iter().map(|(k, v)| Tag::new(k, v)).collect())
            .unwrap_or_default())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let vault = sanitize::last_path_segment(resource_id);
        self.client
            .add_tags_to_vault()
            .account_id(CURRENT_ACCOUNT)
            .vault_name(&vault)
            .tags(key, value)
            .send()
            .await
            .with_context(|| format!("AddTagsToVault failed for {}", vault))?;
        Ok(())
    }
}
