// HTTP dataset client for the synthetic data endpoint
use crate::application::dataset::{DatasetError, DatasetSource};
use crate::domain::chart::{DataPoint, SeriesKind};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct HttpDatasetClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    kind: String,
    count: u64,
    #[serde(default)]
    data: Vec<DataPoint>,
}

impl HttpDatasetClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// The timestamp parameter defeats intermediary caches: repeated calls
    /// with identical logical parameters must still hit the origin.
    fn build_url(&self, kind: SeriesKind, point_count: u64, cache_buster: i64) -> String {
        format!(
            "{}/api/data/1m?type={}&count={}&timestamp={}",
            self.base_url,
            urlencoding::encode(kind.as_str()),
            point_count,
            cache_buster
        )
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetClient {
    async fn fetch(&self, kind: SeriesKind, point_count: u64) -> Result<Vec<DataPoint>, DatasetError> {
        let url = self.build_url(kind, point_count, chrono::Utc::now().timestamp_millis());
        tracing::debug!(%url, "fetching dataset");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DatasetError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DatasetError::Status(response.status().as_u16()));
        }

        let body = response
            .json::<DatasetResponse>()
            .await
            .map_err(|e| DatasetError::Parse(e.to_string()))?;

        tracing::debug!(declared = body.count, received = body.data.len(), "dataset response");
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_carries_all_parameters() {
        let client = HttpDatasetClient::new("http://localhost:3001/".to_string());
        let url = client.build_url(SeriesKind::Scatter, 10_000, 1_700_000_000_000);
        assert_eq!(
            url,
            "http://localhost:3001/api/data/1m?type=scatter&count=10000&timestamp=1700000000000"
        );
    }

    #[test]
    fn test_cache_buster_distinguishes_identical_requests() {
        let client = HttpDatasetClient::new("http://localhost:3001".to_string());
        let first = client.build_url(SeriesKind::Line, 1_000, 1);
        let second = client.build_url(SeriesKind::Line, 1_000, 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_response_body_parses() {
        let body = r#"{"type":"line","count":2,"data":[[1000,1.5],[2000,2.5]]}"#;
        let parsed: DatasetResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.count, 2);
        assert_eq!(parsed.data, vec![DataPoint(1000, 1.5), DataPoint(2000, 2.5)]);
    }

    #[test]
    fn test_missing_data_field_parses_as_empty() {
        let body = r#"{"type":"line","count":0}"#;
        let parsed: DatasetResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.data.is_empty());
    }
}
