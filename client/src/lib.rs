//! Plant pairing client
//!
//! Talks to the remote scoring service, caches the ranked pair list and
//! drives the calculation workflow. The `pairing-cli` binary is a thin shell
//! over these services.

pub mod config;
pub mod error;
pub mod external;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{ClientError, ClientResult};
