//! Defaults for optional parameters.

/// Default supply cap, in items sold through the minting paths.
pub const DEFAULT_MAX_SUPPLY: u64 = 10_000;

/// Default per-wallet cap, in items bought by one address.
pub const DEFAULT_MAX_PER_WALLET: u64 = 100;

/// Suffix appended to every item URI.
pub const ITEM_URI_SUFFIX: &str = ".json";
