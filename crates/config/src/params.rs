use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tandem_primitives::{Address, Unit, B256, U256};
use tracing::*;

use crate::{
    defaults::{DEFAULT_MAX_PER_WALLET, DEFAULT_MAX_SUPPLY},
    errors::{ParamsError, ParamsResult},
    serde_helpers::serde_u256,
};

/// Constructor-time parameters.  Together these fully determine the
/// ledger's initial state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LedgerParams {
    pub name: String,

    pub symbol: String,

    /// Fungible amount backing one item.
    #[serde(with = "serde_u256")]
    pub unit: U256,

    /// Root of the allowlist merkle tree.
    pub allowlist_root: B256,

    /// Native value charged per item on the public path.
    #[serde(with = "serde_u256")]
    pub public_price: U256,

    /// Native value charged per item on the allowlist path.
    #[serde(with = "serde_u256")]
    pub allowlist_price: U256,

    /// Fungible amount minted to `initial_supply_owner` at construction.
    #[serde(with = "serde_u256")]
    pub initial_supply: U256,

    pub initial_supply_owner: Address,

    /// Identity allowed to administer the ledger.
    pub owner: Address,

    /// Address of the external operator registry.
    pub registry: Address,

    /// Supply cap, in items sold.
    #[serde(default = "default_max_supply")]
    pub max_supply: u64,

    /// Per-wallet cap, in items bought.
    #[serde(default = "default_max_per_wallet")]
    pub max_per_wallet: u64,

    #[serde(default)]
    pub base_uri: String,

    /// Strictness level for registry queries, the gate's default if unset.
    #[serde(default)]
    pub registry_level: Option<u32>,

    #[serde(default = "default_restrict_enabled")]
    pub restrict_enabled: bool,

    /// Where withdrawals go, the owner if unset.
    #[serde(default)]
    pub withdraw_address: Option<Address>,
}

fn default_max_supply() -> u64 {
    DEFAULT_MAX_SUPPLY
}

fn default_max_per_wallet() -> u64 {
    DEFAULT_MAX_PER_WALLET
}

fn default_restrict_enabled() -> bool {
    true
}

impl LedgerParams {
    /// Parses params from a TOML string.
    pub fn from_toml_str(s: &str) -> ParamsResult<Self> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads params from a TOML file.
    pub fn load_from_path(path: &Path) -> ParamsResult<Self> {
        let raw = fs::read_to_string(path)?;
        let params = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), name = %params.name, "loaded ledger params");
        Ok(params)
    }

    /// Checks the params describe a constructible ledger.
    pub fn validate(&self) -> ParamsResult<()> {
        self.unit_checked().map(|_| ())
    }

    /// Returns the unit, failing if it's zero.
    pub fn unit_checked(&self) -> ParamsResult<Unit> {
        Unit::new(self.unit).ok_or(ParamsError::ZeroUnit)
    }

    /// Resolves the withdraw address, defaulting to the owner.
    pub fn resolved_withdraw_address(&self) -> Address {
        self.withdraw_address.unwrap_or(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tandem_primitives::{address, ether};

    use super::*;

    const FULL: &str = r#"
        name = "TestToken"
        symbol = "TT"
        unit = "10_000_000_000_000_000_000"
        allowlist_root = "0x1111111111111111111111111111111111111111111111111111111111111111"
        public_price = "100000000000000000"
        allowlist_price = "0xb1a2bc2ec50000"
        initial_supply = "1000000000000000000000000"
        initial_supply_owner = "0x00000000000000000000000000000000000000a1"
        owner = "0x00000000000000000000000000000000000000a1"
        registry = "0x00000000000000000000000000000000000000ca"
        max_supply = 2000
        max_per_wallet = 500
        base_uri = "https://example.com/"
        registry_level = 2
        restrict_enabled = false
        withdraw_address = "0x00000000000000000000000000000000000000b2"
    "#;

    const MINIMAL: &str = r#"
        name = "TestToken"
        symbol = "TT"
        unit = "10000000000000000000"
        allowlist_root = "0x1111111111111111111111111111111111111111111111111111111111111111"
        public_price = 0
        allowlist_price = 0
        initial_supply = 0
        initial_supply_owner = "0x00000000000000000000000000000000000000a1"
        owner = "0x00000000000000000000000000000000000000a1"
        registry = "0x00000000000000000000000000000000000000ca"
    "#;

    #[test]
    fn test_parse_full_params() {
        let params = LedgerParams::from_toml_str(FULL).expect("params should parse");
        assert_eq!(params.unit, ether(10));
        assert_eq!(params.public_price, ether(1) / U256::from(10));
        assert_eq!(params.allowlist_price, ether(1) / U256::from(20));
        assert_eq!(params.initial_supply, ether(1_000_000));
        assert_eq!(params.max_supply, 2000);
        assert_eq!(params.max_per_wallet, 500);
        assert_eq!(params.registry_level, Some(2));
        assert!(!params.restrict_enabled);
        assert_eq!(
            params.resolved_withdraw_address(),
            address!("0x00000000000000000000000000000000000000b2")
        );
    }

    #[test]
    fn test_parse_minimal_params_uses_defaults() {
        let params = LedgerParams::from_toml_str(MINIMAL).expect("params should parse");
        assert_eq!(params.max_supply, DEFAULT_MAX_SUPPLY);
        assert_eq!(params.max_per_wallet, DEFAULT_MAX_PER_WALLET);
        assert_eq!(params.base_uri, "");
        assert_eq!(params.registry_level, None);
        assert!(params.restrict_enabled);
        assert_eq!(params.resolved_withdraw_address(), params.owner);
    }

    #[test]
    fn test_zero_unit_rejected() {
        let raw = MINIMAL.replace("unit = \"10000000000000000000\"", "unit = \"0\"");
        assert!(matches!(
            LedgerParams::from_toml_str(&raw),
            Err(ParamsError::ZeroUnit)
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let params = LedgerParams::load_from_path(file.path()).expect("params should load");
        assert_eq!(params.name, "TestToken");
        assert_eq!(params.symbol, "TT");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = LedgerParams::load_from_path(&dir.path().join("nope.toml"));
        assert!(matches!(res, Err(ParamsError::Io(_))));
    }

    #[test]
    fn test_serialize_roundtrips_through_toml() {
        let params = LedgerParams::from_toml_str(FULL).unwrap();
        let encoded = toml::to_string(&params).unwrap();
        // Separators are dropped and amounts come back as decimal.
        assert!(encoded.contains("unit = \"10000000000000000000\""));
        assert!(encoded.contains("allowlist_price = \"50000000000000000\""));
        assert_eq!(LedgerParams::from_toml_str(&encoded).unwrap(), params);
    }
}
