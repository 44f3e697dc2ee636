//! S3 is the awkward one: `PutBucketTagging` replaces the whole tag
//! set, so writing one tag means read-merge-write. A bucket that has
//! never been tagged answers `GetBucketTagging` with `NoSuchTagSet`,
//! which callers fold into "no tags" via `errors::is_no_such_tag_set`.

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_s3 as s3;

pub struct S3Service {
    client: s3::Client,
}

impl S3Service {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: s3::Client::new(config),
        }
    }

    /// Bucket names in the account.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .list_buckets()
            .send()
            .await
            .context("ListBuckets failed")?;
        Ok(resp
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(String::from))
            .collect())
    }

    /// Bucket tag set. Errors (including NoSuchTagSet) propagate; the
    /// dispatch layer decides what an absent tag set means.
    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let bucket = sanitize::last_path_segment(resource_id);
        let resp = self
            .client
            .get_bucket_tagging()
            .bucket(&bucket)
            .send()
            .await
            .with_context(|| format!("GetBucketTagging failed for {}", bucket))?;

        Ok(resp
            .tag_set()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    /// Merge one tag into the bucket's tag set and write it back.
    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let bucket = sanitize::last_path_segment(resource_id);

        // Existing set, or empty if the bucket was never tagged.
        let mut tags = match self.list_tags(&bucket).await {
            Ok(tags) => tags,
            Err(e) if crate::aws::errors::is_no_such_tag_set(&e) => Vec::new(),
            Err(e) => return Err(e),
        };

        if let Some(existing) = tags.iter_mut().find(|t| t.key == key) {
            existing.value = value.to_string();
        } else {
            tags.push(Tag::new(key, value));
        }

        let tag_set = tags
            .iter()
            .map(|t| {
                s3::types::Tag::builder()
                    .key(&t.key)
                    .value(&t.value)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .put_bucket_tagging()
            .bucket(&bucket)
            .tagging(s3::types::Tagging::builder().set_tag_set(Some(tag_set)).build()?)
            .send()
            .await
            .with_context(|| format!("PutBucketTagging failed for {}", bucket))?;
        Ok(())
    }
}
