//! Scoring service client
//!
//! HTTP/JSON client for the prediction, search and ranking endpoints.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use shared::{
    PairPredictionRequest, RawPredictionResponse, SearchRequest, SearchSuggestion,
    SinglePredictionRequest, TopPairEntry,
};
use validator::Validate;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// What a prediction endpoint answered, once transport succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// A scored response to normalize
    Prediction(RawPredictionResponse),
    /// The service understood the request and refused it
    Rejected { reason: String },
}

/// Prediction and ranking endpoints
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// `POST /predict-single/`
    async fn predict_single(&self, plant: &str) -> ClientResult<PredictionOutcome>;

    /// `POST /predict/`
    async fn predict_pair(&self, plant_a: &str, plant_b: &str) -> ClientResult<PredictionOutcome>;

    /// `GET ranks`
    async fn fetch_top_pairs(&self) -> ClientResult<Vec<TopPairEntry>>;
}

/// Autocomplete endpoint
#[async_trait]
pub trait PlantSearchApi: Send + Sync {
    /// `POST /search-plants/`
    async fn search_plants(&self, query: &str) -> ClientResult<Vec<SearchSuggestion>>;
}

/// Client for the remote scoring service
#[derive(Clone)]
pub struct ScoringClient {
    http_client: Client,
    base_url: String,
    ranks_url: String,
}

impl ScoringClient {
    /// Create a new client from the API section of the configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ranks_url: config.ranks_endpoint(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_prediction<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<PredictionOutcome> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("{} returned non-JSON body: {}", path, e))
        })?;

        interpret_prediction(status, body)
    }
}

/// Classify a prediction response body.
///
/// A `"status": "Error"` marker wins regardless of HTTP status. A non-2xx
/// response with an `error` string is a rejection; without one it is a
/// transport-level failure.
pub fn interpret_prediction(status: StatusCode, body: Value) -> ClientResult<PredictionOutcome> {
    let raw = RawPredictionResponse::from_value(body);

    if raw.is_error() {
        return Ok(PredictionOutcome::Rejected {
            reason: raw.reason.unwrap_or_default(),
        });
    }

    if !status.is_success() {
        return match raw.error {
            Some(error) => Ok(PredictionOutcome::Rejected { reason: error }),
            None => Err(ClientError::Http {
                status: status.as_u16(),
            }),
        };
    }

    Ok(PredictionOutcome::Prediction(raw))
}

/// Parse the ranking payload; only a JSON array is accepted
pub fn parse_top_pairs(body: Value) -> ClientResult<Vec<TopPairEntry>> {
    if !body.is_array() {
        return Err(ClientError::InvalidResponse(
            "ranking payload is not an array".to_string(),
        ));
    }
    serde_json::from_value(body)
        .map_err(|e| ClientError::InvalidResponse(format!("malformed ranking entry: {}", e)))
}

#[async_trait]
impl PredictionApi for ScoringClient {
    async fn predict_single(&self, plant: &str) -> ClientResult<PredictionOutcome> {
        let request = SinglePredictionRequest {
            plant: plant.to_string(),
        };
        request.validate()?;
        self.post_prediction("predict-single/", &request).await
    }

    async fn predict_pair(&self, plant_a: &str, plant_b: &str) -> ClientResult<PredictionOutcome> {
        let request = PairPredictionRequest {
            plant_a: plant_a.to_string(),
            plant_b: plant_b.to_string(),
        };
        request.validate()?;
        self.post_prediction("predict/", &request).await
    }

    async fn fetch_top_pairs(&self) -> ClientResult<Vec<TopPairEntry>> {
        tracing::debug!("GET {}", self.ranks_url);

        let response = self.http_client.get(&self.ranks_url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse ranking response: {}", e)))?;

        parse_top_pairs(body)
    }
}

#[async_trait]
impl PlantSearchApi for ScoringClient {
    async fn search_plants(&self, query: &str) -> ClientResult<Vec<SearchSuggestion>> {
        let request = SearchRequest {
            query: query.to_string(),
        };
        request.validate()?;

        let response = self
            .http_client
            .post(self.endpoint("search-plants/"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse search response: {}", e)))
    }
}
