//! Shared types and pure logic for the plant pairing client
//!
//! This crate contains the models, region resolver and response normalizer
//! shared between the native client and the browser front-end (via WASM).

pub mod display;
pub mod models;
pub mod normalize;
pub mod regions;
pub mod types;
pub mod validation;

pub use display::*;
pub use models::*;
pub use normalize::*;
pub use regions::*;
pub use types::*;
pub use validation::*;
