//! Administrative region coordinates

use serde::{Deserialize, Serialize};

/// A known region with its map position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionCoordinate {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl RegionCoordinate {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }
}
