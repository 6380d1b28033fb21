//! Precomputed top pair rankings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::prediction::{lenient, RawPredictionResponse};

/// One row of the ranked list returned by the `ranks` endpoint.
///
/// Rows carry the same shape as a prediction response. Fields without a
/// typed slot (traits, states, explanation) are kept in `details` and survive
/// a cache round trip untouched. A typed field holding a value of the wrong
/// type reads as absent and is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopPairEntry {
    #[serde(rename = "Plant_A", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plant_a: Option<String>,

    #[serde(rename = "Plant_B", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plant_b: Option<String>,

    #[serde(rename = "Score", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(rename = "Future_Score", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub future_score: Option<f64>,

    #[serde(rename = "Zone", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl TopPairEntry {
    /// View this row as a prediction response for normalization
    pub fn to_raw(&self) -> RawPredictionResponse {
        serde_json::to_value(self)
            .map(RawPredictionResponse::from_value)
            .unwrap_or_default()
    }

    /// True when the projected score beats the current one
    pub fn is_improving(&self) -> bool {
        matches!((self.future_score, self.score), (Some(future), Some(now)) if future > now)
    }
}

/// The persisted ranked list
pub type CacheEntry = Vec<TopPairEntry>;
