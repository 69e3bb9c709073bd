use tandem_config::LiveState;
use tandem_operator_gate::GateEvent;
use tandem_primitives::{Address, ItemId, U256};

/// A setting changed through one of the plain admin setters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigChange {
    MaxSupply { old: u64, new: u64 },
    MaxPerWallet { old: u64, new: u64 },
    PublicPrice { old: U256, new: U256 },
    AllowlistPrice { old: U256, new: U256 },
    BaseUri { old: String, new: String },
}

/// Observable effects of committed ledger calls, in commit order.
///
/// Item mints are reported as transfers from the zero address and burns as
/// transfers to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerEvent {
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
    },

    ItemTransfer {
        from: Address,
        to: Address,
        id: ItemId,
    },

    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },

    ItemApproval {
        owner: Address,
        spender: Address,
        id: ItemId,
    },

    LiveToggled {
        by: Address,
        live: LiveState,
    },

    ConfigUpdated {
        by: Address,
        change: ConfigChange,
    },

    WithdrawAddressSet {
        by: Address,
        old: Address,
        new: Address,
    },

    OwnershipTransferred {
        old: Address,
        new: Address,
    },

    Withdrawn {
        by: Address,
        to: Address,
        amount: U256,
    },

    RegistrySet {
        by: Address,
        old: Address,
        new: Address,
    },

    RegistryLevelUpdated {
        by: Address,
        old: u32,
        new: u32,
    },

    RestrictStatusUpdated {
        by: Address,
        old: bool,
        new: bool,
    },

    LocalAllowListAdded {
        by: Address,
        operator: Address,
    },

    LocalAllowListRemoved {
        by: Address,
        operator: Address,
    },
}

impl LedgerEvent {
    /// Attributes a gate change to the account that made it.
    pub fn from_gate(by: Address, ev: GateEvent) -> Self {
        match ev {
            GateEvent::RegistrySet { old, new } => LedgerEvent::RegistrySet { by, old, new },
            GateEvent::RegistryLevelUpdated { old, new } => {
                LedgerEvent::RegistryLevelUpdated { by, old, new }
            }
            GateEvent::RestrictStatusUpdated { old, new } => {
                LedgerEvent::RestrictStatusUpdated { by, old, new }
            }
            GateEvent::LocalAllowListAdded { operator } => {
                LedgerEvent::LocalAllowListAdded { by, operator }
            }
            GateEvent::LocalAllowListRemoved { operator } => {
                LedgerEvent::LocalAllowListRemoved { by, operator }
            }
        }
    }
}
