//! Item-centric view over the ledger.
//!
//! The view owns no state.  Every answer is read from the ledger and every
//! change goes through it, so the two surfaces can never drift apart.

use tandem_primitives::{Address, ItemId};

use crate::{errors::LedgerResult, ledger::Ledger};

/// Read-only item view.
#[derive(Copy, Clone, Debug)]
pub struct MirrorView<'a> {
    ledger: &'a Ledger,
}

impl<'a> MirrorView<'a> {
    pub(crate) fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn name(&self) -> &'a str {
        self.ledger.name()
    }

    pub fn symbol(&self) -> &'a str {
        self.ledger.symbol()
    }

    /// Number of live items.
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_items()
    }

    /// Number of items `owner` holds.
    pub fn balance_of(&self, owner: Address) -> u64 {
        self.ledger.item_count_of(owner)
    }

    pub fn owner_of(&self, id: ItemId) -> LedgerResult<Address> {
        self.ledger.item_owner(id)
    }

    /// Metadata URI of a live item.
    pub fn token_uri(&self, id: ItemId) -> LedgerResult<String> {
        self.ledger.item_owner(id)?;
        Ok(self.ledger.config().item_uri(id))
    }

    /// Approved spender of a live item, zero if there is none.
    pub fn get_approved(&self, id: ItemId) -> LedgerResult<Address> {
        self.ledger.item_owner(id)?;
        Ok(self
            .ledger
            .item_index()
            .approved(id)
            .unwrap_or(Address::ZERO))
    }

    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.ledger.is_approved_for_all(owner, operator)
    }
}

/// Item view that can approve and move individual items.
#[derive(Debug)]
pub struct MirrorViewMut<'a> {
    ledger: &'a mut Ledger,
}

impl<'a> MirrorViewMut<'a> {
    pub(crate) fn new(ledger: &'a mut Ledger) -> Self {
        Self { ledger }
    }

    /// Reborrows as a read-only view.
    pub fn view(&self) -> MirrorView<'_> {
        self.ledger.mirror()
    }

    /// Approves `spender` for item `id`, or clears the approval with the
    /// zero address.
    pub fn approve(&mut self, caller: Address, spender: Address, id: ItemId) -> LedgerResult<()> {
        self.ledger.approve_item(caller, spender, id)
    }

    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> LedgerResult<()> {
        self.ledger.set_approval_for_all(caller, operator, approved)
    }

    /// Moves item `id` from `from` to `to`, along with exactly one unit of
    /// fungible balance.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        id: ItemId,
    ) -> LedgerResult<()> {
        self.ledger.transfer_item(caller, from, to, id)
    }
}
