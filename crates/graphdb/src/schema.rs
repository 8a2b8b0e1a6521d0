use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a repository-creation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub id: String,
    pub params: Map<String, Value>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl RepositoryConfig {
    /// A "free" repository with default parameters.
    pub fn free(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: Map::new(),
            title: title.into(),
            kind: "free".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_repository_json() {
        let cfg = RepositoryConfig::free("kegg_drug_ttl", "kegg-drug.ttl - Data Quality Computational Metrics");
        assert_eq!(
            serde_json::to_value(&cfg).unwrap(),
            serde_json::json!({
                "id": "kegg_drug_ttl",
                "params": {},
                "title": "kegg-drug.ttl - Data Quality Computational Metrics",
                "type": "free"
            })
        );
    }
}
