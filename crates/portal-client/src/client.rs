//! Backend API Client
//!
//! One method per backend capability. Every call issues exactly one HTTP
//! request: no retries, no timeout, no caching. Failures come back verbatim
//! as [`ApiError`] for the caller to handle.

use chrono::NaiveDateTime;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::PortalConfig;
use crate::error::{ApiError, Result};
use crate::models::{
    rank_spenders, Amounts, CustomerProfile, GenerationReport, JobAck, LocationCounts,
    PredictionResponse, TopSpender,
};

/// Date-time layout the analytics service parses (ISO local date-time)
const QUERY_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Backend services, each mounted under `/api/v1/{segment}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Analytics,
    Ingestion,
    Generation,
    Segmentation,
}

impl Service {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Service::Analytics => "analytics",
            Service::Ingestion => "ingestion",
            Service::Generation => "generate",
            Service::Segmentation => "segmentation",
        }
    }
}

/// Stateless handle to the backend services; cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: PortalConfig,
}

impl ApiClient {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Absolute URL of `path` on `service`
    pub fn endpoint(&self, service: Service, path: &str) -> String {
        format!(
            "{}/api/v1/{}/{}",
            self.config.base_url(),
            service.path_segment(),
            path.trim_start_matches('/')
        )
    }

    // ========================
    // Analytics
    // ========================

    pub async fn counts_by_location(&self) -> Result<LocationCounts> {
        self.get_json(self.endpoint(Service::Analytics, "counts-by-location"))
            .await
    }

    pub async fn spending_by_category(&self) -> Result<Amounts> {
        self.get_json(self.endpoint(Service::Analytics, "spending-by-category"))
            .await
    }

    /// Average spending of one bank against the platform.
    ///
    /// The analytics service only knows upper-case bank ids, so the id is
    /// upper-cased here and callers may pass any case.
    pub async fn comparative_spending(&self, bank_id: &str) -> Result<Amounts> {
        let path = format!("compare-spending/{}", bank_id.to_uppercase());
        self.get_json(self.endpoint(Service::Analytics, &path)).await
    }

    /// Platform-wide average spend; `None` while there is no data yet.
    pub async fn overall_average(&self) -> Result<Option<f64>> {
        let url = self.endpoint(Service::Analytics, "average-spending/overall");
        let response = self.send(self.http.get(&url), &url).await?;
        read_optional(response, &url).await
    }

    /// Top spending customers between `start` and `end`, biggest first.
    pub async fn top_customers(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        limit: u32,
    ) -> Result<Vec<TopSpender>> {
        let url = self.endpoint(Service::Analytics, "top-customers");
        let request = self.http.get(&url).query(&[
            ("startDate", start.format(QUERY_DATETIME_FORMAT).to_string()),
            ("endDate", end.format(QUERY_DATETIME_FORMAT).to_string()),
            ("limit", limit.to_string()),
        ]);
        let response = self.send(request, &url).await?;
        let totals: Amounts = read_json(response, &url).await?;
        Ok(rank_spenders(totals))
    }

    // ========================
    // Ingestion
    // ========================

    pub async fn start_ingestion_all(&self) -> Result<JobAck> {
        self.post_ack(self.endpoint(Service::Ingestion, "start-all"))
            .await
    }

    pub async fn start_ingestion(&self, bank_id: &str) -> Result<JobAck> {
        let path = format!("start/{}", bank_id);
        self.post_ack(self.endpoint(Service::Ingestion, &path)).await
    }

    // ========================
    // Generation
    // ========================

    pub async fn generate_data(&self, bank_id: &str, count: u32) -> Result<GenerationReport> {
        let url = self.endpoint(Service::Generation, &format!("bank/{}", bank_id));
        let request = self.http.post(&url).query(&[("count", count)]);
        let response = self.send(request, &url).await?;
        read_json(response, &url).await
    }

    // ========================
    // Segmentation
    // ========================

    /// Ask the model service to retrain. Answers 202 before training ends.
    pub async fn trigger_retraining(&self) -> Result<JobAck> {
        self.post_ack(self.endpoint(Service::Segmentation, "trigger-training"))
            .await
    }

    pub async fn predict_segment(&self, profiles: &[CustomerProfile]) -> Result<PredictionResponse> {
        self.post_json(self.endpoint(Service::Segmentation, "predict-segment"), profiles)
            .await
    }

    // ========================
    // Plumbing
    // ========================

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self.send(self.http.get(&url), &url).await?;
        read_json(response, &url).await
    }

    async fn post_json<B, T>(&self, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.http.post(&url).json(body), &url).await?;
        read_json(response, &url).await
    }

    /// POST an empty JSON object, tolerate an empty answer
    async fn post_ack(&self, url: String) -> Result<JobAck> {
        let request = self.http.post(&url).json(&serde_json::json!({}));
        let response = self.send(request, &url).await?;
        Ok(read_optional(response, &url).await?.unwrap_or_default())
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Response> {
        debug!(url = %url, "Sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(url = %url, status = status.as_u16(), "Request succeeded");
        Ok(response)
    }
}

async fn body_bytes(response: Response, url: &str) -> Result<Vec<u8>> {
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })
}

async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let bytes = body_bytes(response, url).await?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Like [`read_json`], but an empty body (or JSON `null`) is `None`
async fn read_optional<T: DeserializeOwned>(response: Response, url: &str) -> Result<Option<T>> {
    let bytes = body_bytes(response, url).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(PortalConfig::new(base).unwrap())
    }

    #[test]
    fn test_endpoint_layout() {
        let api = client("http://gateway:8080/");
        assert_eq!(
            api.endpoint(Service::Analytics, "counts-by-location"),
            "http://gateway:8080/api/v1/analytics/counts-by-location"
        );
        assert_eq!(
            api.endpoint(Service::Generation, "/bank/BANK_A"),
            "http://gateway:8080/api/v1/generate/bank/BANK_A"
        );
    }

    #[test]
    fn test_same_origin_endpoint_is_rooted() {
        let api = client("");
        assert_eq!(
            api.endpoint(Service::Segmentation, "predict-segment"),
            "/api/v1/segmentation/predict-segment"
        );
    }
}
