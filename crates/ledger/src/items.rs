//! Item-to-owner index.

use std::collections::{BTreeMap, HashMap};

use tandem_primitives::{Address, ItemId};

/// Index of live items, their owners and per-item approvals.
///
/// Ownership entries are only written from the `reconcile` module.
#[derive(Clone, Debug)]
pub struct ItemIndex {
    owners: BTreeMap<ItemId, Address>,
    approvals: HashMap<ItemId, Address>,
    next_id: ItemId,
}

impl Default for ItemIndex {
    fn default() -> Self {
        Self {
            owners: BTreeMap::new(),
            approvals: HashMap::new(),
            next_id: ItemId::FIRST,
        }
    }
}

impl ItemIndex {
    /// Owner of a live item.
    pub fn owner_of(&self, id: ItemId) -> Option<Address> {
        self.owners.get(&id).copied()
    }

    pub fn exists(&self, id: ItemId) -> bool {
        self.owners.contains_key(&id)
    }

    /// Number of live items.
    pub fn len(&self) -> u64 {
        self.owners.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// The id the next minted item will get.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    /// Approved spender of a live item.
    pub fn approved(&self, id: ItemId) -> Option<Address> {
        self.approvals.get(&id).copied()
    }

    /// Checks `n` more ids can be handed out.
    pub(crate) fn can_allocate(&self, n: u64) -> bool {
        self.next_id.get().checked_add(n).is_some()
    }

    /// Assigns the next fresh id to `owner`.
    ///
    /// # Panics
    ///
    /// If the id space is exhausted, which callers rule out with
    /// [`Self::can_allocate`] before mutating anything.
    pub(crate) fn allocate(&mut self, owner: Address) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next().expect("items: id space exhausted");
        self.owners.insert(id, owner);
        id
    }

    pub(crate) fn remove(&mut self, id: ItemId) {
        self.owners.remove(&id);
        self.approvals.remove(&id);
    }

    pub(crate) fn reassign(&mut self, id: ItemId, owner: Address) {
        self.owners.insert(id, owner);
        self.approvals.remove(&id);
    }

    pub(crate) fn set_approval(&mut self, id: ItemId, spender: Address) {
        if spender.is_zero() {
            self.approvals.remove(&id);
        } else {
            self.approvals.insert(id, spender);
        }
    }
}
