//! GraphDB repository management over its REST API.
//!
//! Only the three calls the pipeline needs: drop a repository, create it,
//! and start an import from a URL.

mod client;
mod schema;

pub use client::GraphDbClient;
pub use schema::RepositoryConfig;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphDbError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GraphDB answered HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, GraphDbError>;

/// Remote repository operations. Every call is a single request; nothing is retried.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Succeeds when the repository is absent.
    async fn delete_repository(&self, repo_id: &str) -> Result<()>;

    /// Fails when the repository already exists. `repo_id` is sanitized first.
    async fn create_repository(&self, repo_id: &str, title: &str) -> Result<()>;

    /// Starts an import of `data_url` and returns without waiting for it to finish.
    async fn import_from_url(&self, repo_id: &str, data_url: &str) -> Result<()>;
}

/// Repository ids may only hold alphanumerics and `_`; everything else becomes `_`.
pub fn sanitize_repo_id(suggested: &str) -> String {
    suggested
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_repo_id() {
        assert_eq!(sanitize_repo_id("kegg-drug.ttl"), "kegg_drug_ttl");
        assert_eq!(sanitize_repo_id("chembl_18.0_cellline.ttl"), "chembl_18_0_cellline_ttl");
        assert_eq!(sanitize_repo_id("plain"), "plain");
    }
}
