//! Jenkins status feed

use std::time::Duration;

use async_trait::async_trait;
use buildwatch_api::{
    BuildSet,
    FeedError,
    FeedResult,
    StatusFeed,
};
use futures::future::join_all;
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    AUTHORIZATION,
};

use crate::client::JenkinsClient;
use crate::parser;

const USER_AGENT: &str = concat!("buildwatch/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for one Jenkins server
#[derive(Debug, Clone)]
pub struct JenkinsSettings {
    pub server_url: String,
    /// Views to poll, in merge order.
    pub views: Vec<String>,
    pub username: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
}

/// Polls the `cc.xml` feed of every configured view
pub struct JenkinsFeed {
    client: JenkinsClient,
    views: Vec<String>,
}

impl JenkinsFeed {
    pub fn new(settings: JenkinsSettings) -> FeedResult<Self> {
        if settings.views.is_empty() {
            return Err(FeedError::InvalidConfig("No views configured".to_string()));
        }

        let mut headers = HeaderMap::new();
        if let (Some(username), Some(token)) = (&settings.username, &settings.api_token) {
            let auth_value = format!("{username}:{token}");
            let auth_header = format!(
                "Basic {}",
                base64::Engine::encode(
                    &base64::engine::general_purpose::STANDARD,
                    auth_value.as_bytes()
                )
            );
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_header)
                    .map_err(|e| FeedError::InvalidConfig(format!("Invalid auth format: {e}")))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(settings.request_timeout))
            .build()
            .map_err(|e| FeedError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let server_url = settings.server_url.trim_end_matches('/').to_string();

        Ok(Self {
            client: JenkinsClient::new(http_client, server_url),
            views: settings.views,
        })
    }

    pub fn views(&self) -> &[String] {
        &self.views
    }
}

#[async_trait]
impl StatusFeed for JenkinsFeed {
    fn name(&self) -> &str {
        "jenkins"
    }

    async fn fetch_builds(&self) -> FeedResult<BuildSet> {
        let requests = self.views.iter().map(|view| self.client.fetch_view(view));
        let responses = join_all(requests).await;

        merge_views(self.views.iter().map(String::as_str).zip(responses))
    }
}

/// Combines the per-view results of one cycle, in view order.
///
/// Views answered with an HTTP error status are logged and left out. Any
/// other failure, or a document that does not parse, fails the whole cycle.
fn merge_views<'a>(
    responses: impl IntoIterator<Item = (&'a str, FeedResult<String>)>,
) -> FeedResult<BuildSet> {
    let mut documents = Vec::new();

    for (view, response) in responses {
        match response {
            Ok(body) => documents.push((view, body)),
            Err(e) if !e.aborts_cycle() => {
                tracing::warn!(view = %view, error = %e, "Failed to fetch reports");
            }
            Err(e) => return Err(e),
        }
    }

    let mut builds = BuildSet::new();
    for (view, body) in documents {
        let view_builds = parser::parse_build_set(&body).map_err(|e| match e {
            FeedError::Parse(message) => FeedError::Parse(format!("view {view}: {message}")),
            other => other,
        })?;
        tracing::debug!(view = %view, projects = view_builds.len(), "Parsed view");
        builds.extend(view_builds);
    }

    Ok(builds)
}
