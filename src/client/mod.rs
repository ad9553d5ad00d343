mod http;

pub use http::HttpPredictionClient;

use crate::{Result, form::FormPayload};
use async_trait::async_trait;
use serde_json::Value;

/// Transport for one prediction exchange.
///
/// Returns the decoded JSON body whatever the HTTP status was; deciding what
/// the body means is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, endpoint: &str, payload: FormPayload) -> Result<Value>;
}
