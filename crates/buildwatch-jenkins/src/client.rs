//! Jenkins HTTP client

use buildwatch_api::{
    FeedError,
    FeedResult,
};
use reqwest::Client;

use crate::config;

/// Thin wrapper over a configured `reqwest::Client` for one Jenkins server
pub(crate) struct JenkinsClient {
    client: Client,
    server_url: String,
}

impl JenkinsClient {
    pub fn new(client: Client, server_url: String) -> Self {
        Self { client, server_url }
    }

    pub fn view_url(&self, view: &str) -> String {
        config::view_feed_url(&self.server_url, view)
    }

    /// Fetches the raw `cc.xml` body of one view.
    ///
    /// 4xx and 5xx answers are reported as [`FeedError::HttpStatus`], anything
    /// that prevents getting a complete answer as [`FeedError::Transport`].
    pub async fn fetch_view(&self, view: &str) -> FeedResult<String> {
        let url = self.view_url(view);
        tracing::debug!(url = %url, "Fetching view status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status / 100 >= 4 {
            return Err(FeedError::HttpStatus { url, status });
        }

        response.text().await.map_err(|e| FeedError::Transport {
            url: url.clone(),
            message: format!("Failed to read response body: {e}"),
        })
    }
}
