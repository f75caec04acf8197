use crate::domain::model::ReviewRequest;
use crate::domain::ports::{ConfigProvider, ReviewService};
use crate::utils::error::{Result, ReviewFailure};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Posts code to `<base><review_path>` and returns the body as the review.
pub struct HttpReviewService<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpReviewService<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("code-reviewer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> ReviewService for HttpReviewService<C> {
    async fn review(&self, code: &str) -> std::result::Result<String, ReviewFailure> {
        let url = self.config.review_url();
        let timeout = self.config.request_timeout();

        tracing::debug!("Posting {} bytes of code to {}", code.len(), url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&ReviewRequest::new(code))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e, timeout))?;

        let status = response.status();
        tracing::debug!("Review response status: {}", status);

        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| classify_transport_error(&e, timeout));
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &url, body))
    }
}

/// Maps a non-success status to a failure. 404 and 5xx get their own kinds;
/// everything else carries the response body, or a generic line if empty.
pub fn classify_status(status: StatusCode, url: &str, body: String) -> ReviewFailure {
    if status == StatusCode::NOT_FOUND {
        ReviewFailure::NotFound {
            url: url.to_string(),
        }
    } else if status.is_server_error() {
        ReviewFailure::Server {
            status: status.as_u16(),
        }
    } else if body.trim().is_empty() {
        ReviewFailure::Other(format!(
            "Request failed with status code {}",
            status.as_u16()
        ))
    } else {
        ReviewFailure::Other(body)
    }
}

fn classify_transport_error(error: &reqwest::Error, timeout: Duration) -> ReviewFailure {
    if error.is_timeout() {
        ReviewFailure::Timeout(timeout)
    } else if error.is_connect() {
        ReviewFailure::Offline(error.to_string())
    } else {
        ReviewFailure::Other(error.to_string())
    }
}
