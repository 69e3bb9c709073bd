//! The ledger: fungible balances plus the items derived from them.

use std::{collections::BTreeMap, mem, sync::Arc};

use tandem_allowlist::AllowlistGate;
use tandem_config::{AdminConfig, LedgerParams};
use tandem_operator_gate::{OperatorGate, OperatorRegistry, OperatorStatus};
use tandem_primitives::{Address, ItemId, Unit, B256, U256};
use tracing::*;

use crate::{
    account::Account,
    errors::{InvalidMintReason, LedgerError, LedgerResult},
    events::LedgerEvent,
    items::ItemIndex,
    mirror::{MirrorView, MirrorViewMut},
    reconcile::{items_needed, move_item, reconcile, reconcile_pair, ItemDelta},
};

/// Which price a sale is charged at.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum SalePath {
    Public,
    Allowlist,
}

/// Payout the host has to perform after a successful withdrawal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub to: Address,
    pub amount: U256,
}

/// Hybrid ledger holding one supply as both fungible balances and items.
///
/// Every account always holds exactly `floor(balance / unit)` items.  Each
/// public entry point validates all of its preconditions before it touches
/// any state, so a returned error means nothing changed.  Events are only
/// recorded once a call's mutations and reconciliation are complete.
#[derive(Debug)]
pub struct Ledger {
    name: String,
    symbol: String,
    unit: Unit,
    config: AdminConfig,
    allowlist: AllowlistGate,
    gate: OperatorGate,
    accounts: BTreeMap<Address, Account>,
    items: ItemIndex,
    total_supply: U256,
    total_sale_minted: u64,
    collected: U256,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Constructs the ledger, minting the initial supply to its owner.
    pub fn new(params: &LedgerParams, registry: Arc<dyn OperatorRegistry>) -> LedgerResult<Self> {
        let unit = params.unit_checked().map_err(|_| LedgerError::ZeroUnit)?;

        let mut gate = OperatorGate::new(params.registry, registry)
            .with_restrict_enabled(params.restrict_enabled);
        if let Some(level) = params.registry_level {
            gate = gate.with_level(level);
        }

        let mut ledger = Self {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            unit,
            config: AdminConfig::from_params(params),
            allowlist: AllowlistGate::new(params.allowlist_root),
            gate,
            accounts: BTreeMap::new(),
            items: ItemIndex::default(),
            total_supply: U256::ZERO,
            total_sale_minted: 0,
            collected: U256::ZERO,
            events: Vec::new(),
        };

        if !params.initial_supply.is_zero() {
            let owner = params.initial_supply_owner;
            if owner.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }

            if !ledger.items.can_allocate(unit.items_for(params.initial_supply)) {
                return Err(LedgerError::ItemIdsExhausted);
            }

            ledger.issue(owner, params.initial_supply);
        }

        info!(
            name = %ledger.name,
            symbol = %ledger.symbol,
            unit = %ledger.unit,
            initial_supply = %ledger.total_supply,
            "ledger constructed"
        );
        Ok(ledger)
    }

    // ===== Queries =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn gate(&self) -> &OperatorGate {
        &self.gate
    }

    pub fn allowlist(&self) -> &AllowlistGate {
        &self.allowlist
    }

    pub fn item_index(&self) -> &ItemIndex {
        &self.items
    }

    pub fn owner(&self) -> Address {
        self.config.owner()
    }

    pub fn account(&self, addr: Address) -> Option<&Account> {
        self.accounts.get(&addr)
    }

    /// Iterates all accounts ever touched, in address order.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &Account)> {
        self.accounts.iter()
    }

    pub fn balance_of(&self, addr: Address) -> U256 {
        self.account(addr).map(Account::balance).unwrap_or_default()
    }

    /// Total fungible supply.
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn item_count_of(&self, addr: Address) -> u64 {
        self.account(addr).map(Account::item_count).unwrap_or(0)
    }

    /// Items held by `addr`, ascending.
    pub fn items_of(&self, addr: Address) -> Vec<ItemId> {
        self.account(addr)
            .map(|a| a.items().collect())
            .unwrap_or_default()
    }

    /// Number of live items.
    pub fn total_items(&self) -> u64 {
        self.items.len()
    }

    pub fn item_owner(&self, id: ItemId) -> LedgerResult<Address> {
        self.items
            .owner_of(id)
            .ok_or(LedgerError::NonexistentItem(id))
    }

    pub fn next_item_id(&self) -> ItemId {
        self.items.next_id()
    }

    /// Items `addr` bought through the minting paths.
    pub fn minted_by(&self, addr: Address) -> u64 {
        self.account(addr).map(Account::sale_minted).unwrap_or(0)
    }

    /// Items sold through the minting paths overall.
    pub fn total_sale_minted(&self) -> u64 {
        self.total_sale_minted
    }

    /// Native value collected from sales and not yet withdrawn.
    pub fn collected_value(&self) -> U256 {
        self.collected
    }

    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.account(owner)
            .is_some_and(|a| a.has_operator(operator))
    }

    pub fn is_operator_allowed(&self, operator: Address) -> bool {
        self.gate.is_operator_allowed(operator)
    }

    pub fn operator_status(&self, operator: Address) -> OperatorStatus {
        self.gate.operator_status(operator)
    }

    /// Events recorded so far and not yet drained.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Takes the recorded events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        mem::take(&mut self.events)
    }

    /// Read-only item view.
    pub fn mirror(&self) -> MirrorView<'_> {
        MirrorView::new(self)
    }

    /// Item view that can approve and transfer individual items.
    pub fn mirror_mut(&mut self) -> MirrorViewMut<'_> {
        MirrorViewMut::new(self)
    }

    /// Returns the first account whose items don't match its balance, or
    /// whose items the index attributes to someone else.
    pub fn check_conservation(&self) -> Option<Address> {
        let mut indexed = 0u64;
        for (addr, acct) in &self.accounts {
            if acct.item_count() != self.unit.items_for(acct.balance) {
                return Some(*addr);
            }

            if acct.items().any(|id| self.items.owner_of(id) != Some(*addr)) {
                return Some(*addr);
            }

            indexed += acct.item_count();
        }

        // Catch index entries no account claims.
        if indexed != self.items.len() {
            return Some(Address::ZERO);
        }

        None
    }

    // ===== Minting =====

    /// Public sale of `amount` fungible units to `to`, paid with `paid`.
    ///
    /// Returns the ids of the items minted to `to`.
    pub fn mint(&mut self, to: Address, amount: U256, paid: U256) -> LedgerResult<Vec<ItemId>> {
        self.ensure_live()?;
        self.sale_mint(to, amount, paid, SalePath::Public)
    }

    /// Public sale priced in whole items, same as minting `count * unit`.
    pub fn mint_items(&mut self, to: Address, count: u64, paid: U256) -> LedgerResult<Vec<ItemId>> {
        self.ensure_live()?;
        let amount = self
            .unit
            .amount_for(count)
            .ok_or(LedgerError::AmountOverflow)?;
        self.sale_mint(to, amount, paid, SalePath::Public)
    }

    /// Allowlist sale to `caller`, who must prove membership.
    ///
    /// Membership is not consumed, a member may keep minting up to the caps.
    pub fn allowlist_mint(
        &mut self,
        caller: Address,
        amount: U256,
        proof: &[B256],
        paid: U256,
    ) -> LedgerResult<Vec<ItemId>> {
        self.ensure_live()?;
        if !self.allowlist.verify(caller, proof) {
            return Err(LedgerError::NotAllowlisted(caller));
        }

        self.sale_mint(caller, amount, paid, SalePath::Allowlist)
    }

    fn ensure_live(&self) -> LedgerResult<()> {
        if self.config.is_live() {
            Ok(())
        } else {
            Err(LedgerError::NotLive)
        }
    }

    fn sale_mint(
        &mut self,
        to: Address,
        amount: U256,
        paid: U256,
        path: SalePath,
    ) -> LedgerResult<Vec<ItemId>> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let count = self.unit.items_for(amount);
        if count == 0 {
            return Err(LedgerError::InvalidMint(InvalidMintReason::ZeroItems));
        }

        let price = match path {
            SalePath::Public => self.config.public_price(),
            SalePath::Allowlist => self.config.allowlist_price(),
        };
        let expected = price
            .checked_mul(U256::from(count))
            .ok_or(LedgerError::AmountOverflow)?;
        if paid != expected {
            return Err(LedgerError::InvalidPrice { expected, paid });
        }

        let max_supply = self.config.max_supply();
        let sold = self
            .total_sale_minted
            .checked_add(count)
            .filter(|sold| *sold <= max_supply)
            .ok_or(LedgerError::TotalSupplyReached { max: max_supply })?;

        let max_per_wallet = self.config.max_per_wallet();
        let acct = self.accounts.get(&to);
        let bought = acct
            .map(Account::sale_minted)
            .unwrap_or(0)
            .checked_add(count)
            .filter(|bought| *bought <= max_per_wallet)
            .ok_or(LedgerError::InvalidMint(InvalidMintReason::WalletCap {
                max: max_per_wallet,
            }))?;

        self.total_supply
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        let collected = self
            .collected
            .checked_add(paid)
            .ok_or(LedgerError::AmountOverflow)?;

        // Can't overflow, it's bounded by the new total supply.
        let new_balance = acct.map(Account::balance).unwrap_or_default() + amount;
        if !self
            .items
            .can_allocate(items_needed(&self.unit, acct, new_balance))
        {
            return Err(LedgerError::ItemIdsExhausted);
        }

        self.collected = collected;
        self.total_sale_minted = sold;
        self.accounts.entry(to).or_default().sale_minted = bought;
        let delta = self.issue(to, amount);

        debug!(
            %to,
            %amount,
            items = count,
            minted = delta.minted.len(),
            ?path,
            "sale mint"
        );
        Ok(delta.minted)
    }

    /// Credits freshly created balance and reconciles the recipient.
    ///
    /// Callers must have checked the supply and id space can take it.
    fn issue(&mut self, to: Address, amount: U256) -> ItemDelta {
        self.total_supply += amount;
        let acct = self.accounts.entry(to).or_default();
        acct.balance += amount;
        let delta = reconcile(&self.unit, to, acct, &mut self.items);

        self.emit(LedgerEvent::Transfer {
            from: Address::ZERO,
            to,
            amount,
        });
        self.emit_item_events(Address::ZERO, to, &delta);
        self.debug_check(&[to]);
        delta
    }

    // ===== Transfers =====

    /// Moves `amount` of fungible balance from `from` to `to`.
    ///
    /// Whenever either side crosses a unit boundary, the sender's highest
    /// ids are burned and/or fresh ids are minted to the recipient.  A move
    /// that crosses no boundary leaves every item untouched.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> LedgerResult<ItemDelta> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let have = self.balance_of(from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }

        if from == to {
            self.emit(LedgerEvent::Transfer { from, to, amount });
            return Ok(ItemDelta::default());
        }

        let to_acct = self.accounts.get(&to);
        let to_balance = to_acct.map(Account::balance).unwrap_or_default() + amount;
        if !self
            .items
            .can_allocate(items_needed(&self.unit, to_acct, to_balance))
        {
            return Err(LedgerError::ItemIdsExhausted);
        }

        let mut from_acct = self.accounts.remove(&from).unwrap_or_default();
        from_acct.balance -= amount;
        let to_acct = self.accounts.entry(to).or_default();
        to_acct.balance += amount;
        let delta = reconcile_pair(
            &self.unit,
            (from, &mut from_acct),
            (to, to_acct),
            &mut self.items,
        );
        self.accounts.insert(from, from_acct);

        self.emit(LedgerEvent::Transfer { from, to, amount });
        self.emit_item_events(from, to, &delta);
        self.debug_check(&[from, to]);

        trace!(
            %from,
            %to,
            %amount,
            burned = delta.burned.len(),
            minted = delta.minted.len(),
            "transfer"
        );
        Ok(delta)
    }

    /// Destroys `amount` of `from`'s balance, burning items it no longer
    /// backs.  Returns the burned ids.
    pub fn burn(&mut self, from: Address, amount: U256) -> LedgerResult<Vec<ItemId>> {
        let have = self.balance_of(from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }

        self.total_supply -= amount;
        let acct = self.accounts.entry(from).or_default();
        acct.balance -= amount;
        let delta = reconcile(&self.unit, from, acct, &mut self.items);

        self.emit(LedgerEvent::Transfer {
            from,
            to: Address::ZERO,
            amount,
        });
        self.emit_item_events(from, Address::ZERO, &delta);
        self.debug_check(&[from]);

        debug!(%from, %amount, burned = delta.burned.len(), "burn");
        Ok(delta.burned)
    }

    /// Moves item `id` and the unit backing it from `from` to `to`.
    ///
    /// `caller` must be `from`, an operator of `from`, or the item's
    /// approved spender.
    pub(crate) fn transfer_item(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        id: ItemId,
    ) -> LedgerResult<()> {
        let owner = self.item_owner(id)?;
        if owner != from {
            return Err(LedgerError::NotItemOwner { id, claimed: from });
        }

        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        if !self.may_move_item(caller, owner, id) {
            return Err(LedgerError::Unauthorized(caller));
        }

        let have = self.balance_of(from);
        let need = self.unit.amount();
        if have < need {
            return Err(LedgerError::InsufficientBalance { have, need });
        }

        // Any transfer spends the item's approval, a self-transfer included.
        // Like the move below, the clear records no `ItemApproval`.
        if from == to {
            self.items.set_approval(id, Address::ZERO);
        } else {
            let mut from_acct = self.accounts.remove(&from).unwrap_or_default();
            let to_acct = self.accounts.entry(to).or_default();
            move_item(&self.unit, id, &mut from_acct, (to, to_acct), &mut self.items);
            self.accounts.insert(from, from_acct);
        }

        self.emit(LedgerEvent::Transfer {
            from,
            to,
            amount: need,
        });
        self.emit(LedgerEvent::ItemTransfer { from, to, id });
        self.debug_check(&[from, to]);

        trace!(%from, %to, %id, "item transfer");
        Ok(())
    }

    fn may_move_item(&self, caller: Address, owner: Address, id: ItemId) -> bool {
        caller == owner
            || self.is_approved_for_all(owner, caller)
            || self.items.approved(id) == Some(caller)
    }

    // ===== Approvals =====

    /// Grants or revokes blanket approval over `caller`'s items.
    ///
    /// Grants must pass the operator gate, revocations always go through.
    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> LedgerResult<()> {
        if approved {
            self.gate.check_operator(operator)?;
        }

        let acct = self.accounts.entry(caller).or_default();
        if approved {
            acct.operators.insert(operator);
        } else {
            acct.operators.remove(&operator);
        }

        self.emit(LedgerEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
        Ok(())
    }

    /// Approves `spender` for a single item, or clears it with the zero
    /// address.
    pub(crate) fn approve_item(
        &mut self,
        caller: Address,
        spender: Address,
        id: ItemId,
    ) -> LedgerResult<()> {
        let owner = self.item_owner(id)?;
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            return Err(LedgerError::Unauthorized(caller));
        }

        if !spender.is_zero() {
            self.gate.check_operator(spender)?;
        }

        self.items.set_approval(id, spender);
        self.emit(LedgerEvent::ItemApproval { owner, spender, id });
        Ok(())
    }

    // ===== Value =====

    /// Hands all collected value to the withdraw address.
    ///
    /// The ledger's books are settled before the payout is returned, the
    /// host performs the actual value transfer afterwards.
    pub fn withdraw(&mut self, caller: Address) -> LedgerResult<Withdrawal> {
        self.config.ensure_owner(caller)?;

        let to = self.config.withdraw_address();
        let amount = mem::take(&mut self.collected);
        self.emit(LedgerEvent::Withdrawn {
            by: caller,
            to,
            amount,
        });

        info!(%to, %amount, "withdrawal");
        Ok(Withdrawal { to, amount })
    }

    // ===== Internals =====

    pub(crate) fn config_mut(&mut self) -> &mut AdminConfig {
        &mut self.config
    }

    pub(crate) fn gate_mut(&mut self) -> &mut OperatorGate {
        &mut self.gate
    }

    pub(crate) fn emit(&mut self, ev: LedgerEvent) {
        self.events.push(ev);
    }

    fn emit_item_events(&mut self, from: Address, to: Address, delta: &ItemDelta) {
        // Only a losing side burns and only a gaining side mints.
        for id in &delta.burned {
            self.emit(LedgerEvent::ItemTransfer {
                from,
                to: Address::ZERO,
                id: *id,
            });
        }

        for id in &delta.minted {
            self.emit(LedgerEvent::ItemTransfer {
                from: Address::ZERO,
                to,
                id: *id,
            });
        }
    }

    fn debug_check(&self, touched: &[Address]) {
        if cfg!(debug_assertions) {
            for addr in touched {
                let count = self.item_count_of(*addr);
                let target = self.unit.items_for(self.balance_of(*addr));
                assert_eq!(count, target, "ledger: {addr} holds {count} items, backs {target}");
            }
        }
    }
}
