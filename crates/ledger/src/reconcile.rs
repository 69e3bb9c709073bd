//! Keeps item ownership in step with fungible balances.
//!
//! These routines are the only writers of item ownership, in both the
//! account's item set and the global index.

use tandem_primitives::{Address, ItemId, Unit, U256};

use crate::{account::Account, items::ItemIndex};

/// Items created and destroyed by one reconciliation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ItemDelta {
    /// Ids burned, highest first.
    pub burned: Vec<ItemId>,

    /// Ids minted, ascending.
    pub minted: Vec<ItemId>,
}

impl ItemDelta {
    pub fn is_empty(&self) -> bool {
        self.burned.is_empty() && self.minted.is_empty()
    }

    fn extend(&mut self, other: ItemDelta) {
        self.burned.extend(other.burned);
        self.minted.extend(other.minted);
    }
}

/// Number of fresh ids reconciling `acct` at `new_balance` would take.
pub(crate) fn items_needed(unit: &Unit, acct: Option<&Account>, new_balance: U256) -> u64 {
    let held = acct.map(Account::item_count).unwrap_or(0);
    unit.items_for(new_balance).saturating_sub(held)
}

/// Mints or burns items until `acct` holds exactly `floor(balance / unit)`.
///
/// Burns take the highest ids first, so the ids that stay are the ones that
/// were already backing the remaining balance.  Mints always take fresh ids.
pub(crate) fn reconcile(
    unit: &Unit,
    owner: Address,
    acct: &mut Account,
    index: &mut ItemIndex,
) -> ItemDelta {
    let target = unit.items_for(acct.balance);
    let held = acct.item_count();
    let mut delta = ItemDelta::default();

    if target < held {
        for _ in target..held {
            let id = acct
                .items
                .pop_last()
                .expect("reconcile: item set shorter than count");
            index.remove(id);
            delta.burned.push(id);
        }
    } else {
        for _ in held..target {
            let id = index.allocate(owner);
            acct.items.insert(id);
            delta.minted.push(id);
        }
    }

    delta
}

/// Reconciles both sides of a balance move between distinct accounts.
pub(crate) fn reconcile_pair(
    unit: &Unit,
    (from, from_acct): (Address, &mut Account),
    (to, to_acct): (Address, &mut Account),
    index: &mut ItemIndex,
) -> ItemDelta {
    // Burn before minting so a transfer never holds more live items than
    // its balances back, even transiently.
    let mut delta = reconcile(unit, from, from_acct, index);
    delta.extend(reconcile(unit, to, to_acct, index));
    delta
}

/// Moves one specific item, together with the unit backing it.
///
/// Taking exactly one unit from `from` drops its item target by exactly one
/// and adding it to `to` raises that by exactly one, so moving the id keeps
/// both sides reconciled without any mint or burn.
pub(crate) fn move_item(
    unit: &Unit,
    id: ItemId,
    from_acct: &mut Account,
    (to, to_acct): (Address, &mut Account),
    index: &mut ItemIndex,
) {
    from_acct.balance -= unit.amount();
    from_acct.items.remove(&id);
    to_acct.balance += unit.amount();
    to_acct.items.insert(id);
    index.reassign(id, to);
}

#[cfg(test)]
mod tests {
    use tandem_primitives::ether;
    use tandem_test_utils::addr;

    use super::*;

    fn unit() -> Unit {
        Unit::new(ether(10)).unwrap()
    }

    #[test]
    fn test_reconcile_mints_fresh_ascending() {
        let mut index = ItemIndex::default();
        let mut acct = Account {
            balance: ether(25),
            ..Default::default()
        };

        let delta = reconcile(&unit(), addr(1), &mut acct, &mut index);
        assert_eq!(delta.minted, vec![ItemId::new(1), ItemId::new(2)]);
        assert!(delta.burned.is_empty());
        assert_eq!(index.owner_of(ItemId::new(2)), Some(addr(1)));
        assert_eq!(index.next_id(), ItemId::new(3));
    }

    #[test]
    fn test_reconcile_burns_highest_first() {
        let mut index = ItemIndex::default();
        let mut acct = Account {
            balance: ether(30),
            ..Default::default()
        };
        reconcile(&unit(), addr(1), &mut acct, &mut index);

        acct.balance = ether(10);
        let delta = reconcile(&unit(), addr(1), &mut acct, &mut index);
        assert_eq!(delta.burned, vec![ItemId::new(3), ItemId::new(2)]);
        assert_eq!(acct.items().collect::<Vec<_>>(), vec![ItemId::new(1)]);
        assert!(!index.exists(ItemId::new(3)));
    }

    #[test]
    fn test_reconcile_noop_inside_boundary() {
        let mut index = ItemIndex::default();
        let mut acct = Account {
            balance: ether(15),
            ..Default::default()
        };
        reconcile(&unit(), addr(1), &mut acct, &mut index);

        acct.balance = ether(19);
        assert!(reconcile(&unit(), addr(1), &mut acct, &mut index).is_empty());
        acct.balance = ether(10);
        assert!(reconcile(&unit(), addr(1), &mut acct, &mut index).is_empty());
    }

    #[test]
    fn test_burned_ids_never_reused() {
        let mut index = ItemIndex::default();
        let mut acct = Account {
            balance: ether(20),
            ..Default::default()
        };
        reconcile(&unit(), addr(1), &mut acct, &mut index);
        acct.balance = ether(0);
        reconcile(&unit(), addr(1), &mut acct, &mut index);
        acct.balance = ether(10);

        let delta = reconcile(&unit(), addr(1), &mut acct, &mut index);
        assert_eq!(delta.minted, vec![ItemId::new(3)]);
    }
}
