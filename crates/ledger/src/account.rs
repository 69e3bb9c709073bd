use std::collections::BTreeSet;

use tandem_primitives::{Address, ItemId, U256};

/// Per-address ledger state.
///
/// `items` is derived from `balance` and is only written by the
/// reconciliation routines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
    pub(crate) balance: U256,
    pub(crate) items: BTreeSet<ItemId>,
    pub(crate) sale_minted: u64,
    pub(crate) operators: BTreeSet<Address>,
}

impl Account {
    /// Fungible balance.
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Items backed by the balance, in ascending id order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    pub fn item_count(&self) -> u64 {
        self.items.len() as u64
    }

    /// Items bought through the minting paths, which the wallet cap counts.
    pub fn sale_minted(&self) -> u64 {
        self.sale_minted
    }

    /// Checks if `operator` holds blanket approval over this account.
    pub fn has_operator(&self, operator: Address) -> bool {
        self.operators.contains(&operator)
    }
}
