//! Raw prediction response to view model normalization
//!
//! `normalize` is total: every missing, null or mistyped field degrades to its
//! default, so there is no error path.

use crate::models::{
    AgronomicInsights, HeatmapPoint, NormalizedResult, RawPredictionResponse, SynergyTraits,
    TopPairEntry,
};
use crate::regions::CoordinateResolver;
use crate::types::{MapPointKind, ResultStatus};

/// Fixed intensity for recommended map points
pub const HEATMAP_INTENSITY: f64 = 0.9;

/// Placeholder for a missing plant identifier
pub const UNKNOWN_PLANT: &str = "Unknown";

/// Convert a raw response into the canonical view model
pub fn normalize(raw: &RawPredictionResponse, resolver: &CoordinateResolver) -> NormalizedResult {
    let recommended_states = raw.states.clone().unwrap_or_default();
    let heatmap_points = heatmap_points(&recommended_states, resolver);

    let traits = raw
        .traits
        .as_ref()
        .map(|t| SynergyTraits {
            drought_tolerance: t.drought_tol.clone(),
            growth_speed: t.growth_speed.clone(),
            salinity_tolerance: t.salinity_tol.clone(),
        })
        .unwrap_or_default();

    let agronomics = raw
        .agronomics
        .as_ref()
        .map(|a| AgronomicInsights {
            water_usage: a.water_usage.clone(),
            irrigation_strategy: a.irrigation_strategy.clone(),
            disease_pressure: a.disease_pressure.clone(),
            pathogen_alert: a.pathogen_alert.clone(),
        })
        .unwrap_or_default();

    NormalizedResult {
        status: if raw.compatible == Some(true) {
            ResultStatus::Compatible
        } else {
            ResultStatus::NotCompatible
        },
        percentage: raw.score.unwrap_or(0.0),
        future_score: raw.future_score,
        plant_a_name: plant_name(raw.plant_a.as_deref()),
        plant_b_name: plant_name(raw.plant_b.as_deref()),
        traits,
        agronomics,
        recommended_zone: raw.zone.clone().unwrap_or_default(),
        recommended_states,
        resilience: raw.resilience.clone(),
        explanation: raw.explanation.clone().unwrap_or_default(),
        heatmap_points,
    }
}

/// Normalize a ranked row through the same pipeline as a live prediction
pub fn normalize_top_pair(entry: &TopPairEntry, resolver: &CoordinateResolver) -> NormalizedResult {
    normalize(&entry.to_raw(), resolver)
}

/// Project region names onto map points, skipping names the table lacks
pub fn heatmap_points(states: &[String], resolver: &CoordinateResolver) -> Vec<HeatmapPoint> {
    states
        .iter()
        .filter_map(|name| {
            resolver.resolve(name).map(|coord| HeatmapPoint {
                id: name.clone(),
                name: name.clone(),
                lat: coord.lat,
                lng: coord.lng,
                intensity: HEATMAP_INTENSITY,
                kind: MapPointKind::Recommended,
            })
        })
        .collect()
}

// Blank identifiers count as missing
fn plant_name(name: Option<&str>) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => UNKNOWN_PLANT.to_string(),
    }
}
