//! Raw prediction payloads as returned by the scoring service
//!
//! Every field is optional and tolerant of wrong types: a field that is
//! missing, null or of an unexpected shape deserializes to `None` instead of
//! failing the whole payload.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::TraitValue;

/// Status marker the service uses for a well-formed failure response
pub const ERROR_STATUS: &str = "Error";

/// Prediction response from `/predict/` or `/predict-single/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPredictionResponse {
    #[serde(rename = "Compatible", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub compatible: Option<bool>,

    #[serde(rename = "Score", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(rename = "Future_Score", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub future_score: Option<f64>,

    #[serde(rename = "Plant_A", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plant_a: Option<String>,

    #[serde(rename = "Plant_B", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plant_b: Option<String>,

    #[serde(rename = "Traits", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub traits: Option<RawTraits>,

    #[serde(rename = "Agronomics", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub agronomics: Option<RawAgronomics>,

    #[serde(rename = "Zone", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(rename = "States", default, deserialize_with = "lenient_strings", skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,

    #[serde(rename = "Resilience", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub resilience: Option<String>,

    #[serde(rename = "Explanation", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// `"Error"` when the service rejects the request
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Error text carried by non-2xx responses
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Nested synergy traits block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTraits {
    #[serde(rename = "Drought_Tol", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub drought_tol: Option<TraitValue>,

    #[serde(rename = "Growth_Speed", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub growth_speed: Option<TraitValue>,

    #[serde(rename = "Salinity_Tol", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub salinity_tol: Option<TraitValue>,
}

/// Nested agronomic indicators block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAgronomics {
    #[serde(rename = "Water_Usage", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub water_usage: Option<TraitValue>,

    #[serde(rename = "Irrigation_Strategy", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub irrigation_strategy: Option<TraitValue>,

    #[serde(rename = "Disease_Pressure", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub disease_pressure: Option<TraitValue>,

    #[serde(rename = "Pathogen_Alert", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pathogen_alert: Option<TraitValue>,
}

impl RawPredictionResponse {
    /// Build from an arbitrary JSON value. Never fails: anything that is not
    /// an object yields an empty response.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Parse a JSON document, falling back to an empty response on bad input
    pub fn from_json_str(json: &str) -> Self {
        serde_json::from_str::<Value>(json)
            .map(Self::from_value)
            .unwrap_or_default()
    }

    /// True when the body carries the `"Error"` status marker
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some(ERROR_STATUS)
    }
}

/// Deserialize a field, mapping any type mismatch to `None`
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a list of names, keeping only the string elements
pub(crate) fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let raw = RawPredictionResponse::from_value(json!({
            "Compatible": true,
            "Score": 87.3,
            "Future_Score": 90.1,
            "Plant_A": "Wheat",
            "Plant_B": "Clover",
            "Traits": { "Drought_Tol": "High", "Growth_Speed": 3 },
            "Agronomics": { "Pathogen_Alert": false },
            "Zone": "Tell Atlas",
            "States": ["Algiers", "Oran"],
            "Resilience": "Stable",
            "Explanation": "Nitrogen fixing partner."
        }));

        assert_eq!(raw.compatible, Some(true));
        assert_eq!(raw.score, Some(87.3));
        assert_eq!(raw.plant_b.as_deref(), Some("Clover"));
        let traits = raw.traits.unwrap();
        assert_eq!(traits.drought_tol, Some(TraitValue::Text("High".into())));
        assert_eq!(traits.growth_speed, Some(TraitValue::Number(3.0)));
        assert_eq!(traits.salinity_tol, None);
        assert_eq!(
            raw.agronomics.unwrap().pathogen_alert,
            Some(TraitValue::Flag(false))
        );
        assert_eq!(raw.states.unwrap().len(), 2);
    }

    #[test]
    fn test_mistyped_fields_become_none() {
        let raw = RawPredictionResponse::from_value(json!({
            "Compatible": "yes",
            "Score": "87",
            "Plant_A": 12,
            "Traits": [1, 2, 3],
            "States": "Algiers",
            "Zone": null
        }));

        assert_eq!(raw.compatible, None);
        assert_eq!(raw.score, None);
        assert_eq!(raw.plant_a, None);
        assert_eq!(raw.traits, None);
        assert_eq!(raw.states, None);
        assert_eq!(raw.zone, None);
    }

    #[test]
    fn test_non_string_states_are_dropped() {
        let raw = RawPredictionResponse::from_value(json!({
            "States": ["Oran", 4, null, "Blida"]
        }));
        assert_eq!(raw.states, Some(vec!["Oran".to_string(), "Blida".to_string()]));
    }

    #[test]
    fn test_non_object_payloads() {
        assert_eq!(RawPredictionResponse::from_value(json!([1, 2])), RawPredictionResponse::default());
        assert_eq!(RawPredictionResponse::from_value(Value::Null), RawPredictionResponse::default());
        assert_eq!(RawPredictionResponse::from_json_str("not json"), RawPredictionResponse::default());
    }

    #[test]
    fn test_error_marker() {
        let raw = RawPredictionResponse::from_value(json!({
            "status": "Error",
            "reason": "Genus not found"
        }));
        assert!(raw.is_error());
        assert_eq!(raw.reason.as_deref(), Some("Genus not found"));
        assert!(!RawPredictionResponse::default().is_error());
    }
}
