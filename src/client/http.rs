use super::PredictionClient;
use crate::{Error, Result, config::ServerConfig, form::FormPayload};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Prediction client over HTTP. Keeps a cookie store so a session opened by
/// [`login`](HttpPredictionClient::login) carries over to predict calls.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPredictionClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        debug!("Creating prediction client for: {}", config.base_url);

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, endpoint: &str, payload: FormPayload) -> Result<Value> {
        let url = self.url(endpoint);
        debug!("POST {} with {} fields", url, payload.len());

        let form = payload.into_multipart()?;
        let response = self.client.post(&url).multipart(form).send().await?;

        // Status is not inspected; error bodies carry an `error` field.
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Received {} ({} bytes) from {}", status, body.len(), url);

        serde_json::from_slice(&body).map_err(|e| Error::invalid_json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn server_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpPredictionClient::new(&server_config("http://localhost:5000/")).unwrap();

        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url("/predict/heart"),
            "http://localhost:5000/predict/heart"
        );
    }
}
