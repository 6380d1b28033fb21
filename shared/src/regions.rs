//! Region name to coordinate resolution
//!
//! The scoring service recommends Algerian provinces (wilayas) by name. The
//! names arrive with inconsistent casing, accents and apostrophes, so lookups
//! go through [`canonicalize`] before hitting the fixed table.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::RegionCoordinate;

/// Built-in table: canonical name, latitude, longitude.
///
/// `algiers` and `alger` are two spellings of the capital and share a point.
pub const ALGERIA_REGIONS: &[(&str, f64, f64)] = &[
    ("adrar", 27.8743, -0.2939),
    ("chlef", 36.1652, 1.3345),
    ("laghouat", 33.8000, 2.8651),
    ("oum el bouaghi", 35.8754, 7.1135),
    ("batna", 35.5559, 6.1741),
    ("bejaia", 36.7509, 5.0567),
    ("biskra", 34.8505, 5.7280),
    ("bechar", 31.6212, -2.2121),
    ("blida", 36.4702, 2.8286),
    ("bouira", 36.3748, 3.9020),
    ("tamanrasset", 22.7850, 5.5228),
    ("tebessa", 35.4041, 8.1143),
    ("tlemcen", 34.8790, -1.3158),
    ("tiaret", 35.3710, 1.3169),
    ("tizi ouzou", 36.7118, 4.0459),
    ("algiers", 36.7528, 3.0420),
    ("alger", 36.7528, 3.0420),
    ("djelfa", 34.6727, 3.2630),
    ("jijel", 36.8205, 5.7667),
    ("setif", 36.1898, 5.4108),
    ("saida", 34.8303, 0.1477),
    ("skikda", 36.8663, 6.9046),
    ("sidi bel abbes", 35.1899, -0.6308),
    ("annaba", 36.9009, 7.7669),
    ("guelma", 36.4621, 7.4260),
    ("constantine", 36.3650, 6.6147),
    ("medea", 36.2641, 2.7539),
    ("mostaganem", 35.9398, 0.0898),
    ("msila", 35.7058, 4.5419),
    ("mascara", 35.3966, 0.1544),
    ("ouargla", 31.9493, 5.3250),
    ("oran", 35.6969, -0.6331),
    ("el bayadh", 33.6831, 1.0192),
    ("illizi", 26.4833, 8.4666),
    ("bordj bou arreridj", 36.0732, 4.7610),
    ("boumerdes", 36.7664, 3.4771),
    ("el tarf", 36.7672, 8.3137),
    ("tindouf", 27.6711, -8.1474),
    ("tissemsilt", 35.6072, 1.8109),
    ("el oued", 33.3683, 6.8674),
    ("khenchela", 35.4358, 7.1433),
    ("souk ahras", 36.2863, 7.9511),
    ("tipaza", 36.5897, 2.4475),
    ("mila", 36.4502, 6.2644),
    ("ain defla", 36.2590, 1.9679),
    ("naama", 32.7500, -0.3000),
    ("ain temouchent", 35.3072, -1.1400),
    ("ghardaia", 32.4909, 3.6734),
    ("relizane", 35.7373, 0.5559),
    ("timimoun", 29.2638, 0.2309),
    ("in salah", 27.1935, 2.4606),
];

/// Errors raised while building a custom table
#[derive(Debug, Error, PartialEq)]
pub enum RegionTableError {
    #[error("region '{name}' collides with '{existing}' after canonicalization")]
    Collision { name: String, existing: String },

    #[error("region name '{0}' is empty after canonicalization")]
    EmptyName(String),
}

/// Canonical lookup key for a region name.
///
/// Lower-cases, decomposes (NFD) and drops combining marks, removes straight
/// and curly apostrophes, then trims.
pub fn canonicalize(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Read-only table of known regions keyed by canonical name
#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    regions: HashMap<String, RegionCoordinate>,
}

impl CoordinateResolver {
    /// Resolver over the built-in Algerian province table
    pub fn new() -> Self {
        let regions = ALGERIA_REGIONS
            .iter()
            .map(|(name, lat, lng)| (canonicalize(name), RegionCoordinate::new(*name, *lat, *lng)))
            .collect();
        Self { regions }
    }

    /// Process-wide instance of the built-in table
    pub fn builtin() -> &'static CoordinateResolver {
        static BUILTIN: OnceLock<CoordinateResolver> = OnceLock::new();
        BUILTIN.get_or_init(CoordinateResolver::new)
    }

    /// Build a resolver from custom entries, rejecting canonical collisions
    pub fn from_entries<I, S>(entries: I) -> Result<Self, RegionTableError>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let mut regions: HashMap<String, RegionCoordinate> = HashMap::new();
        for (name, lat, lng) in entries {
            let name = name.into();
            let key = canonicalize(&name);
            if key.is_empty() {
                return Err(RegionTableError::EmptyName(name));
            }
            if let Some(existing) = regions.get(&key) {
                return Err(RegionTableError::Collision {
                    name,
                    existing: existing.name.clone(),
                });
            }
            regions.insert(key, RegionCoordinate::new(name, lat, lng));
        }
        Ok(Self { regions })
    }

    /// Look up a region by name. Unknown names are a normal outcome.
    pub fn resolve(&self, name: &str) -> Option<&RegionCoordinate> {
        if name.is_empty() {
            return None;
        }
        self.regions.get(&canonicalize(name))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::new()
    }
}
