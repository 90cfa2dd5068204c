//! HTTP plumbing shared by the OSM-family clients.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::planner::ProviderError;

use super::config::OsmConfig;

/// A reqwest client bound to one service, with a concurrency cap.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HttpClient {
    pub fn new(config: &OsmConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and return the status code with the raw body.
    ///
    /// Only transport failures and 429 are errors here; callers decide what
    /// other statuses mean.
    pub async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(u16, String), ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Http("semaphore closed".to_string()))?;

        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        let body = response.text().await?;
        Ok((status.as_u16(), body))
    }

    /// GET `path` and decode a successful JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let (status, body) = self.get_text(path, query).await?;
        if !(200..300).contains(&status) {
            return Err(ProviderError::Api {
                status,
                message: body.chars().take(200).collect(),
            });
        }
        parse_json(&body)
    }
}

/// Decode a JSON body, keeping a prefix of it in the error.
pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Json {
        message: format!("{e} (body: {})", body.chars().take(200).collect::<String>()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: u32,
    }

    #[test]
    fn parse_json_ok() {
        let probe: Probe = parse_json(r#"{"value": 7}"#).unwrap();
        assert_eq!(probe.value, 7);
    }

    #[test]
    fn parse_json_error_keeps_body_prefix() {
        let err = parse_json::<Probe>("<html>busy</html>").unwrap_err();
        match err {
            ProviderError::Json { message } => assert!(message.contains("<html>busy")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn client_builds_from_config() {
        let client = HttpClient::new(&OsmConfig::new("http://localhost:1")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1");
    }
}
