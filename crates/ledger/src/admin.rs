//! Owner-only administration.

use std::sync::Arc;

use tandem_operator_gate::{GateEvent, OperatorRegistry};
use tandem_primitives::{Address, U256};
use tracing::*;

use crate::{
    errors::{LedgerError, LedgerResult},
    events::{ConfigChange, LedgerEvent},
    ledger::Ledger,
};

impl Ledger {
    /// Flips minting between paused and live.
    pub fn toggle_live(&mut self, caller: Address) -> LedgerResult<()> {
        let live = self.config_mut().toggle_live(caller)?;
        info!(?live, "live state toggled");
        self.emit(LedgerEvent::LiveToggled { by: caller, live });
        Ok(())
    }

    pub fn set_max_supply(&mut self, caller: Address, max: u64) -> LedgerResult<()> {
        let old = self.config_mut().set_max_supply(caller, max)?;
        self.emit_config(caller, ConfigChange::MaxSupply { old, new: max });
        Ok(())
    }

    pub fn set_max_per_wallet(&mut self, caller: Address, max: u64) -> LedgerResult<()> {
        let old = self.config_mut().set_max_per_wallet(caller, max)?;
        self.emit_config(caller, ConfigChange::MaxPerWallet { old, new: max });
        Ok(())
    }

    pub fn set_public_price(&mut self, caller: Address, price: U256) -> LedgerResult<()> {
        let old = self.config_mut().set_public_price(caller, price)?;
        self.emit_config(caller, ConfigChange::PublicPrice { old, new: price });
        Ok(())
    }

    pub fn set_allowlist_price(&mut self, caller: Address, price: U256) -> LedgerResult<()> {
        let old = self.config_mut().set_allowlist_price(caller, price)?;
        self.emit_config(caller, ConfigChange::AllowlistPrice { old, new: price });
        Ok(())
    }

    pub fn set_base_uri(&mut self, caller: Address, uri: impl Into<String>) -> LedgerResult<()> {
        let new = uri.into();
        let old = self.config_mut().set_base_uri(caller, new.clone())?;
        self.emit_config(caller, ConfigChange::BaseUri { old, new });
        Ok(())
    }

    /// Changes where withdrawals are paid to.
    pub fn set_withdraw_address(&mut self, caller: Address, to: Address) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let old = self.config_mut().set_withdraw_address(caller, to)?;
        info!(%old, new = %to, "withdraw address set");
        self.emit(LedgerEvent::WithdrawAddressSet {
            by: caller,
            old,
            new: to,
        });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let old = self.config_mut().transfer_ownership(caller, new_owner)?;
        info!(%old, new = %new_owner, "ownership transferred");
        self.emit(LedgerEvent::OwnershipTransferred {
            old,
            new: new_owner,
        });
        Ok(())
    }

    // ===== Operator gate =====

    /// Points the gate at a different operator registry.
    pub fn set_registry(
        &mut self,
        caller: Address,
        registry_addr: Address,
        registry: Arc<dyn OperatorRegistry>,
    ) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        let ev = self.gate_mut().set_registry(registry_addr, registry);
        self.emit_gate(caller, ev);
        Ok(())
    }

    pub fn set_registry_level(&mut self, caller: Address, level: u32) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        let ev = self.gate_mut().set_level(level);
        self.emit_gate(caller, ev);
        Ok(())
    }

    pub fn set_restrict_enabled(&mut self, caller: Address, enabled: bool) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        let ev = self.gate_mut().set_restrict_enabled(enabled);
        self.emit_gate(caller, ev);
        Ok(())
    }

    pub fn add_local_allowed(&mut self, caller: Address, operator: Address) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        let ev = self.gate_mut().add_local_allowed(operator);
        self.emit_gate(caller, ev);
        Ok(())
    }

    pub fn remove_local_allowed(&mut self, caller: Address, operator: Address) -> LedgerResult<()> {
        self.config().ensure_owner(caller)?;
        let ev = self.gate_mut().remove_local_allowed(operator);
        self.emit_gate(caller, ev);
        Ok(())
    }

    fn emit_config(&mut self, by: Address, change: ConfigChange) {
        debug!(%by, ?change, "config updated");
        self.emit(LedgerEvent::ConfigUpdated { by, change });
    }

    fn emit_gate(&mut self, by: Address, ev: GateEvent) {
        debug!(%by, ?ev, "operator gate updated");
        self.emit(LedgerEvent::from_gate(by, ev));
    }
}
