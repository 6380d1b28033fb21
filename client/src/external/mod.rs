//! External API integrations

pub mod scoring;

pub use scoring::{PlantSearchApi, PredictionApi, PredictionOutcome, ScoringClient};
