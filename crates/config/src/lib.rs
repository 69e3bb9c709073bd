//! Ledger configuration: the constructor-time parameters and the
//! owner-administered settings the minting guards read.

mod admin;
pub mod defaults;
mod errors;
mod params;
pub mod serde_helpers;

pub use admin::{AdminConfig, LiveState};
pub use errors::{ConfigError, ConfigResult, ParamsError, ParamsResult};
pub use params::LedgerParams;
