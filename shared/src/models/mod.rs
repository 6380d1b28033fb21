//! Domain models for the plant pairing client

mod prediction;
mod ranking;
mod region;
mod result;
mod search;

pub use prediction::*;
pub use ranking::*;
pub use region::*;
pub use result::*;
pub use search::*;
