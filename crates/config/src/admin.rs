use std::mem;

use tandem_primitives::{Address, ItemId, U256};

use crate::{
    defaults::ITEM_URI_SUFFIX,
    errors::{ConfigError, ConfigResult},
    params::LedgerParams,
};

/// Whether minting is open.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LiveState {
    #[default]
    Paused,
    Live,
}

impl LiveState {
    pub fn is_live(self) -> bool {
        matches!(self, LiveState::Live)
    }

    /// Returns the other state.
    pub fn flipped(self) -> Self {
        match self {
            LiveState::Paused => LiveState::Live,
            LiveState::Live => LiveState::Paused,
        }
    }
}

/// Owner-administered settings read by the minting guards.
///
/// Every setter is a plain replacement gated on the owner and returns the
/// previous value, so callers can report the change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminConfig {
    owner: Address,
    live: LiveState,
    max_supply: u64,
    max_per_wallet: u64,
    public_price: U256,
    allowlist_price: U256,
    base_uri: String,
    withdraw_address: Address,
}

impl AdminConfig {
    /// Builds the initial settings, paused.
    pub fn from_params(params: &LedgerParams) -> Self {
        Self {
            owner: params.owner,
            live: LiveState::Paused,
            max_supply: params.max_supply,
            max_per_wallet: params.max_per_wallet,
            public_price: params.public_price,
            allowlist_price: params.allowlist_price,
            base_uri: params.base_uri.clone(),
            withdraw_address: params.resolved_withdraw_address(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn live(&self) -> LiveState {
        self.live
    }

    pub fn is_live(&self) -> bool {
        self.live.is_live()
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn max_per_wallet(&self) -> u64 {
        self.max_per_wallet
    }

    pub fn public_price(&self) -> U256 {
        self.public_price
    }

    pub fn allowlist_price(&self) -> U256 {
        self.allowlist_price
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn withdraw_address(&self) -> Address {
        self.withdraw_address
    }

    /// Renders the URI of an item, `base_uri + id + ".json"`.
    pub fn item_uri(&self, id: ItemId) -> String {
        format!("{}{}{}", self.base_uri, id, ITEM_URI_SUFFIX)
    }

    /// Fails unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: Address) -> ConfigResult<()> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(ConfigError::Unauthorized(caller))
        }
    }

    /// Flips the live flag, returning the new state.
    pub fn toggle_live(&mut self, caller: Address) -> ConfigResult<LiveState> {
        self.ensure_owner(caller)?;
        self.live = self.live.flipped();
        Ok(self.live)
    }

    pub fn set_max_supply(&mut self, caller: Address, v: u64) -> ConfigResult<u64> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.max_supply, v))
    }

    pub fn set_max_per_wallet(&mut self, caller: Address, v: u64) -> ConfigResult<u64> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.max_per_wallet, v))
    }

    pub fn set_public_price(&mut self, caller: Address, v: U256) -> ConfigResult<U256> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.public_price, v))
    }

    pub fn set_allowlist_price(&mut self, caller: Address, v: U256) -> ConfigResult<U256> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.allowlist_price, v))
    }

    pub fn set_base_uri(&mut self, caller: Address, v: String) -> ConfigResult<String> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.base_uri, v))
    }

    pub fn set_withdraw_address(&mut self, caller: Address, v: Address) -> ConfigResult<Address> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.withdraw_address, v))
    }

    /// Hands ownership to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> ConfigResult<Address> {
        self.ensure_owner(caller)?;
        Ok(mem::replace(&mut self.owner, new_owner))
    }
}
