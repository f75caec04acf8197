use crate::utils::error::ReviewFailure;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn review_path(&self) -> &str;
    fn request_timeout(&self) -> Duration;

    fn review_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url().trim_end_matches('/'),
            self.review_path()
        )
    }
}

/// Remote service that turns source code into a Markdown review.
#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn review(&self, code: &str) -> std::result::Result<String, ReviewFailure>;
}
