//! Shared fixtures for ledger tests.
//!
//! Includes the pieces that live outside the ledger in production: an
//! off-chain allowlist tree builder and a settable operator registry.

mod merkle;
mod registry;

use tandem_config::LedgerParams;
use tandem_primitives::{ether, Address, B256, U256};

pub use merkle::MerkleTree;
pub use registry::StaticRegistry;

/// Deterministic test address with `n` in the low bytes.
pub fn addr(n: u64) -> Address {
    let mut buf = [0u8; 20];
    buf[12..].copy_from_slice(&n.to_be_bytes());
    Address::from(buf)
}

/// Owner used by [`test_params`].
pub fn owner() -> Address {
    addr(0xa0)
}

/// Registry address used by [`test_params`].
pub fn registry_addr() -> Address {
    addr(0xca)
}

/// Params resembling a typical deployment, with a 10-token unit, prices of
/// 0.1 and 0.05 per item and no initial supply.
pub fn test_params(allowlist_root: B256) -> LedgerParams {
    LedgerParams {
        name: "TestToken".to_owned(),
        symbol: "TT".to_owned(),
        unit: ether(10),
        allowlist_root,
        public_price: ether(1) / U256::from(10),
        allowlist_price: ether(1) / U256::from(20),
        initial_supply: U256::ZERO,
        initial_supply_owner: owner(),
        owner: owner(),
        registry: registry_addr(),
        max_supply: 10_000,
        max_per_wallet: 100,
        base_uri: String::new(),
        registry_level: None,
        restrict_enabled: true,
        withdraw_address: None,
    }
}
