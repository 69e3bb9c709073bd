//! Allowlist membership checks against a fixed merkle commitment.
//!
//! The root is fixed when the ledger is constructed.  Membership is proven
//! per call and never materialized as a stored set.

use tandem_primitives::{hash_sorted_pair, keccak_leaf, Address, B256};

/// Verifies allowlist proofs against a stored root.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AllowlistGate {
    root: B256,
}

impl AllowlistGate {
    pub fn new(root: B256) -> Self {
        Self { root }
    }

    /// Returns the committed root.
    pub fn root(&self) -> B256 {
        self.root
    }

    /// Checks if `addr` is a member of the committed set.
    ///
    /// Siblings are folded with [`hash_sorted_pair`], so the order of each
    /// pair does not matter, only the order of levels.  Malformed proofs just
    /// fail to reproduce the root.
    pub fn verify(&self, addr: Address, proof: &[B256]) -> bool {
        compute_root(keccak_leaf(addr), proof) == self.root
    }
}

/// Folds a proof path from a leaf up to the root it implies.
pub fn compute_root(leaf: B256, proof: &[B256]) -> B256 {
    proof
        .iter()
        .fold(leaf, |acc, sibling| hash_sorted_pair(acc, *sibling))
}
