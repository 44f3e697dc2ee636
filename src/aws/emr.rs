//! EMR clusters. Tags come back on DescribeCluster rather than a
//! dedicated list-tags call.

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_emr as emr;

pub struct EmrService {
    client: emr::Client,
}

impl EmrService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: emr::Client::new(config),
        }
    }

    /// Cluster ids, paginated by marker.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_clusters();
            if let Some(m) = &marker {
                request = request.marker(m);
            }
            let resp = request.send().await.context("ListClusters failed")?;

            ids.extend(
                resp.clusters()
                    .iter()
                    .filter_map(|c| c.id().map(String::from)),
            );

            match resp.marker() {
                Some(m) => marker = Some(m.to_string()),
                None => break,
            }
        }

        Ok(ids)
    }

    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let id = sanitize::last_path_segment(resource_id);
        let resp = self
            .client
            .describe_cluster()
            .cluster_id(&id)
            .send()
            .await
            .with_context(|| format!("DescribeCluster failed for {}", id))?;

        let Some(cluster) = resp.cluster() else {
            return Ok(Vec::new());
        };
        Ok(cluster
            .tags()
            .iter()
            .filter_map(|t| match (t.key(), t.value()) {
                (Some(k), Some(v)) => Some(Tag::new(k, v)),
                _ => None,
            })
            .collect())
    }

    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let id = sanitize::last_path_segment(resource_id);
        self.client
            .add_tags()
            .resource_id(&id)
            .tags(emr::types::Tag::builder().key(key).value(value).build())
            .send()
            .await
            .with_context(|| format!("AddTags failed for {}", id))?;
        Ok(())
    }
}
