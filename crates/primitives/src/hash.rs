//! Hashing used by allowlist commitments.
//!
//! The layout matches what off-chain tooling produces for the host chain:
//! leaves are the keccak of the raw 20 address bytes and interior nodes hash
//! the two children in ascending order, so a proof never needs to say which
//! side a sibling sits on.

use alloy_primitives::{keccak256, Address, B256};

/// Computes the allowlist leaf for an address.
pub fn keccak_leaf(addr: Address) -> B256 {
    keccak256(addr.as_slice())
}

/// Hashes two nodes after sorting them.
pub fn hash_sorted_pair(a: B256, b: B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_sorted_pair_is_symmetric() {
        let a = keccak_leaf(address!("0x00000000000000000000000000000000000000aa"));
        let b = keccak_leaf(address!("0x00000000000000000000000000000000000000bb"));
        assert_eq!(hash_sorted_pair(a, b), hash_sorted_pair(b, a));
        assert_ne!(hash_sorted_pair(a, b), hash_sorted_pair(a, a));
    }

    #[test]
    fn test_leaf_hashes_raw_bytes() {
        let addr = address!("0x1111111111111111111111111111111111111111");
        assert_eq!(keccak_leaf(addr), keccak256([0x11u8; 20]));
    }
}
