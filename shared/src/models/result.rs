//! Canonical view models rendered by the presentation layer

use serde::{Deserialize, Serialize};

use crate::types::{MapPointKind, ResultStatus, TraitValue};

/// Reason shown when a rejection carries no explanation
pub const DEFAULT_ERROR_REASON: &str = "Unable to process request.";

/// Normalized prediction ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedResult {
    pub status: ResultStatus,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_score: Option<f64>,
    pub plant_a_name: String,
    pub plant_b_name: String,
    pub traits: SynergyTraits,
    pub agronomics: AgronomicInsights,
    pub recommended_zone: String,
    pub recommended_states: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resilience: Option<String>,
    pub explanation: String,
    pub heatmap_points: Vec<HeatmapPoint>,
}

/// Predicted synergy traits of the pair
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SynergyTraits {
    pub drought_tolerance: Option<TraitValue>,
    pub growth_speed: Option<TraitValue>,
    pub salinity_tolerance: Option<TraitValue>,
}

impl SynergyTraits {
    /// Named entries in display order
    pub fn entries(&self) -> [(&'static str, Option<&TraitValue>); 3] {
        [
            ("drought_tolerance", self.drought_tolerance.as_ref()),
            ("growth_speed", self.growth_speed.as_ref()),
            ("salinity_tolerance", self.salinity_tolerance.as_ref()),
        ]
    }
}

/// Agronomic indicators for growing the pair together
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgronomicInsights {
    pub water_usage: Option<TraitValue>,
    pub irrigation_strategy: Option<TraitValue>,
    pub disease_pressure: Option<TraitValue>,
    pub pathogen_alert: Option<TraitValue>,
}

impl AgronomicInsights {
    /// Named entries in display order
    pub fn entries(&self) -> [(&'static str, Option<&TraitValue>); 4] {
        [
            ("water_usage", self.water_usage.as_ref()),
            ("irrigation_strategy", self.irrigation_strategy.as_ref()),
            ("disease_pressure", self.disease_pressure.as_ref()),
            ("pathogen_alert", self.pathogen_alert.as_ref()),
        ]
    }
}

/// A recommended region projected onto the map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapPoint {
    /// Source region name as returned by the service
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    #[serde(rename = "type")]
    pub kind: MapPointKind,
}

/// A failed calculation as shown on the error card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResult {
    pub status: ResultStatus,
    pub reason: String,
}

impl ErrorResult {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            status: ResultStatus::Error,
            reason: if reason.trim().is_empty() {
                DEFAULT_ERROR_REASON.to_string()
            } else {
                reason
            },
        }
    }
}
