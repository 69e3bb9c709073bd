use tandem_primitives::{hash_sorted_pair, keccak_leaf, Address, B256};

/// Allowlist tree as built by off-chain tooling.
///
/// Leaves keep their input order, interior nodes hash sorted pairs and an
/// odd node at the end of a level is carried up unchanged.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    leaves: Vec<Address>,
    levels: Vec<Vec<B256>>,
}

impl MerkleTree {
    /// Builds the tree over `members`.
    ///
    /// # Panics
    ///
    /// If `members` is empty.
    pub fn from_addresses(members: &[Address]) -> Self {
        assert!(!members.is_empty(), "merkle: empty allowlist");

        let mut levels = vec![members.iter().copied().map(keccak_leaf).collect::<Vec<_>>()];
        while levels.last().map(Vec::len).unwrap_or(0) > 1 {
            let cur = levels.last().expect("merkle: no level");
            let next = cur
                .chunks(2)
                .map(|pair| match pair {
                    [l, r] => hash_sorted_pair(*l, *r),
                    [single] => *single,
                    _ => unreachable!("chunks(2)"),
                })
                .collect();
            levels.push(next);
        }

        Self {
            leaves: members.to_vec(),
            levels,
        }
    }

    pub fn root(&self) -> B256 {
        self.levels.last().expect("merkle: no level")[0]
    }

    /// Sibling path for `member`, `None` if it is not a leaf.
    pub fn proof(&self, member: Address) -> Option<Vec<B256>> {
        let mut idx = self.leaves.iter().position(|m| *m == member)?;
        let mut proof = Vec::new();

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = idx ^ 1;
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            idx /= 2;
        }

        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr;

    fn fold(leaf: B256, proof: &[B256]) -> B256 {
        proof.iter().fold(leaf, |acc, s| hash_sorted_pair(acc, *s))
    }

    #[test]
    fn test_two_leaf_root() {
        let tree = MerkleTree::from_addresses(&[addr(1), addr(2)]);
        let expected = hash_sorted_pair(keccak_leaf(addr(1)), keccak_leaf(addr(2)));
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.proof(addr(1)).unwrap(), vec![keccak_leaf(addr(2))]);
    }

    #[test]
    fn test_odd_leaf_promoted() {
        let members: Vec<_> = (1..=3).map(addr).collect();
        let tree = MerkleTree::from_addresses(&members);

        // third leaf has no sibling at the bottom level
        assert_eq!(tree.proof(addr(3)).unwrap().len(), 1);
        for m in members {
            assert_eq!(fold(keccak_leaf(m), &tree.proof(m).unwrap()), tree.root());
        }
    }

    #[test]
    fn test_non_member_has_no_proof() {
        let tree = MerkleTree::from_addresses(&[addr(1), addr(2)]);
        assert!(tree.proof(addr(3)).is_none());
    }
}
