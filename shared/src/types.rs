//! Common types used across the client

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which prediction mode the workflow is in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    /// One target plant, the service finds the best partner
    #[default]
    Single,
    /// Two parents evaluated as a pair
    Cross,
}

impl ActiveTab {
    pub fn code(&self) -> &'static str {
        match self {
            ActiveTab::Single => "single",
            ActiveTab::Cross => "cross",
        }
    }
}

/// Headline status of a displayed result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ResultStatus {
    Compatible,
    #[default]
    #[serde(rename = "Not Compatible")]
    NotCompatible,
    Error,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Compatible => write!(f, "Compatible"),
            ResultStatus::NotCompatible => write!(f, "Not Compatible"),
            ResultStatus::Error => write!(f, "Error"),
        }
    }
}

/// Kind of marker drawn on the suitability map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MapPointKind {
    #[default]
    Recommended,
}

/// A scalar trait or agronomic value as sent by the scoring service.
///
/// The service is not consistent about types: the same indicator may arrive
/// as a number on one response and as a label on another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TraitValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Flag(v) => write!(f, "{}", if *v { "Yes" } else { "No" }),
            TraitValue::Number(v) => write!(f, "{}", v),
            TraitValue::Text(v) => write!(f, "{}", v),
        }
    }
}
