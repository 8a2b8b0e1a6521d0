use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use tracing::{info, warn};

use crate::{sanitize_repo_id, GraphDbError, RepositoryClient, RepositoryConfig, Result};

const API_REPOSITORIES: &str = "rest/repositories/";
const API_IMPORT_URL: &str = "rest/data/import/url/";

pub struct GraphDbClient {
    base_url: String,
    client: reqwest::Client,
}

impl GraphDbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_err(url: &str) -> impl FnOnce(reqwest::Error) -> GraphDbError + '_ {
        move |source| GraphDbError::Request { url: url.to_string(), source }
    }
}

/// Turn any status outside 2xx into an error carrying the response body.
async fn check(resp: Response, url: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GraphDbError::Status { url: url.to_string(), status: status.as_u16(), body })
}

#[async_trait]
impl RepositoryClient for GraphDbClient {
    async fn delete_repository(&self, repo_id: &str) -> Result<()> {
        info!(repo_id=%repo_id, "graphdb: deleting repository");

        let url = format!("{}{API_REPOSITORIES}{repo_id}", self.base_url);
        let resp = self
            .client
            .delete(&url)
            .header(ACCEPT, "*/*")
            .send()
            .await
            .map_err(Self::request_err(&url))?;

        if resp.status() == StatusCode::NOT_FOUND {
            info!(repo_id=%repo_id, "graphdb: repository did not exist");
            return Ok(());
        }
        check(resp, &url).await?;
        info!(repo_id=%repo_id, "graphdb: delete successful");
        Ok(())
    }

    async fn create_repository(&self, repo_id: &str, title: &str) -> Result<()> {
        let repo_id = sanitize_repo_id(repo_id);
        info!(repo_id=%repo_id, "graphdb: creating repository");

        let url = format!("{}{API_REPOSITORIES}", self.base_url);
        let resp = self
            .client
            .put(&url)
            .header(ACCEPT, "*/*")
            .json(&RepositoryConfig::free(repo_id.as_str(), title))
            .send()
            .await
            .map_err(Self::request_err(&url))?;

        let resp = check(resp, &url).await?;
        if resp.status() != StatusCode::CREATED {
            warn!(repo_id=%repo_id, status=%resp.status(), "graphdb: unexpected status on create");
        }
        info!(repo_id=%repo_id, "graphdb: repository created");
        Ok(())
    }

    async fn import_from_url(&self, repo_id: &str, data_url: &str) -> Result<()> {
        info!(repo_id=%repo_id, data_url=%data_url, "graphdb: importing");

        let url = format!("{}{API_IMPORT_URL}{repo_id}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .query(&[("url", data_url)])
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::request_err(&url))?;

        check(resp, &url).await?;
        // GraphDB keeps importing after answering; nothing here waits for it.
        info!(repo_id=%repo_id, "graphdb: data import started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        assert_eq!(GraphDbClient::new("http://localhost:7200").base_url(), "http://localhost:7200/");
        assert_eq!(GraphDbClient::new("http://localhost:7200/").base_url(), "http://localhost:7200/");
    }
}
