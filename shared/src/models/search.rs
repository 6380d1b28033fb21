//! Plant search and prediction request models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One autocomplete suggestion from `/search-plants/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchSuggestion {
    /// Text placed in the input when picked, e.g. "Shrubby Indian mallow (Abutilon)"
    pub display_name: String,
    #[serde(default)]
    pub common_name: String,
    /// Scientific genus sent to the prediction endpoints
    #[serde(rename = "genus")]
    pub canonical_id: String,
}

/// Body of `POST /search-plants/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    pub query: String,
}

/// Body of `POST /predict-single/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SinglePredictionRequest {
    #[validate(length(min = 1, message = "plant is required"))]
    pub plant: String,
}

/// Body of `POST /predict/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PairPredictionRequest {
    #[validate(length(min = 1, message = "plant_a is required"))]
    pub plant_a: String,
    #[validate(length(min = 1, message = "plant_b is required"))]
    pub plant_b: String,
}
