//! Primitive types shared across the ledger crates.
//!
//! Addresses, hashes and amounts are the host chain's own types re-exported
//! from `alloy-primitives`, so values round-trip with the host environment
//! without conversion.

pub mod amount;
pub mod hash;
pub mod item;

pub use alloy_primitives::{address, b256, Address, B256, U256};
pub use amount::{ether, Unit, ETHER};
pub use hash::{hash_sorted_pair, keccak_leaf};
pub use item::ItemId;
