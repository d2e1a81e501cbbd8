use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{BreedError, Result};
use crate::types::{BreedRecord, UpstreamResponse};

/// Anything that can hand out upstream pages of breeds.
#[async_trait]
pub trait BreedSource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Fetch upstream page `page` (1-based).
    async fn fetch_page(&self, page: u32) -> Result<Vec<BreedRecord>>;
}

#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BreedError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Map a status and raw body onto a page or an error.
fn interpret(status: StatusCode, body: &str) -> Result<Vec<BreedRecord>> {
    match serde_json::from_str::<UpstreamResponse>(body) {
        Ok(UpstreamResponse::Error { error }) => Err(BreedError::Upstream(error)),
        _ if status.is_server_error() => Err(BreedError::Transport(format!("HTTP {}", status))),
        _ if !status.is_success() => Err(BreedError::Upstream(format!("HTTP {}", status))),
        Ok(UpstreamResponse::Breeds(breeds)) => Ok(breeds),
        Err(e) => Err(BreedError::Decode(e.to_string())),
    }
}

#[async_trait]
impl BreedSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<BreedRecord>> {
        tracing::debug!(page, url = %self.base_url, "fetching breeds");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        interpret(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_page_is_returned() {
        let body = r#"[{"breed": "beagle", "image": null}]"#;
        let breeds = interpret(StatusCode::OK, body).unwrap();
        assert_eq!(breeds, vec![BreedRecord::new("beagle", None)]);
    }

    #[test]
    fn error_payload_wins_regardless_of_status() {
        for status in [StatusCode::OK, StatusCode::BAD_REQUEST, StatusCode::BAD_GATEWAY] {
            let err = interpret(status, r#"{"error": "boom"}"#).unwrap_err();
            assert!(matches!(err, BreedError::Upstream(ref m) if m == "boom"));
        }
    }

    #[test]
    fn server_error_without_payload_is_retryable() {
        let err = interpret(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>").unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn client_error_without_payload_is_not_retryable() {
        let err = interpret(StatusCode::NOT_FOUND, "not found").unwrap_err();
        assert!(matches!(err, BreedError::Upstream(ref m) if m.contains("404")));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let err = interpret(StatusCode::OK, "{\"message\": 1}").unwrap_err();
        assert!(matches!(err, BreedError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let source = HttpSource::new("http://127.0.0.1:9/breeds", Duration::from_secs(1)).unwrap();
        let err = source.fetch_page(1).await.unwrap_err();
        assert!(err.is_retryable());
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Serves canned responses in order and records which pages were asked for.
    #[derive(Debug, Default)]
    pub struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Vec<BreedRecord>>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        pub fn new(responses: impl IntoIterator<Item = Result<Vec<BreedRecord>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requested: Mutex::new(Vec::new()),
            }
        }

        /// Upstream pages of the given sizes, numbered consecutively.
        pub fn pages(sizes: &[usize]) -> Self {
            let mut next = 0;
            Self::new(sizes.iter().map(|&n| {
                let page = breeds(next, n);
                next += n;
                Ok(page)
            }))
        }

        pub fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BreedSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_page(&self, page: u32) -> Result<Vec<BreedRecord>> {
            self.requested.lock().unwrap().push(page);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BreedError::Upstream("script exhausted".into())))
        }
    }

    /// `count` records named `breed-<start>`, `breed-<start+1>`, ...
    pub fn breeds(start: usize, count: usize) -> Vec<BreedRecord> {
        (start..start + count)
            .map(|i| BreedRecord::new(format!("breed-{}", i), None))
            .collect()
    }
}
