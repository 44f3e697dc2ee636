//! Flat key-value tags, the one data shape every service agrees on
//! once its envelope (list, map, nested tag-set) is peeled off.

use serde::{Deserialize, Serialize};

/// A single resource tag. Keys are unique per resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// True if `tags` contains `key`.
pub fn has_key(tags: &[Tag], key: &str) -> bool {
    tags.iter().any(|t| t.key == key)
}

/// Value for `key`, if present.
pub fn value_of<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
    tags.iter().find(|t| t.key == key).map(|t| t.value.as_str())
}

/// Project `tags` onto `wanted`, keeping only pairs whose key is wanted.
pub fn project(tags: &[Tag], wanted: &[&str]) -> Vec<Tag> {
    tags.iter()
        .filter(|t| wanted.contains(&t.key.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Tag> {
        vec![
            Tag::new("Channel", "web"),
            Tag::new("Environment", "prod"),
            Tag::new("Team", "data"),
        ]
    }

    #[test]
    fn test_has_key() {
        let tags = sample();
        assert!(has_key(&tags, "Channel"));
        assert!(!has_key(&tags, "BillingCostCenter"));
    }

    #[test]
    fn test_value_of() {
        let tags = sample();
        assert_eq!(value_of(&tags, "Environment"), Some("prod"));
        assert_eq!(value_of(&tags, "Name"), None);
    }

    #[test]
    fn test_project() {
        let tags = sample();
        let projected = project(&tags, &["Channel", "Name", "Environment"]);
        assert_eq!(
            projected,
            vec![Tag::new("Channel", "web"), Tag::new("Environment", "prod")]
        );
    }
}
