use tandem_config::ConfigError;
use tandem_operator_gate::GateError;
use tandem_primitives::{Address, ItemId, U256};
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Why a mint was refused with [`LedgerError::InvalidMint`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InvalidMintReason {
    /// The amount does not back a single whole item.
    ZeroItems,

    /// The recipient would exceed the per-wallet cap.
    WalletCap { max: u64 },
}

/// Ledger errors.
///
/// All of these are detected before any state is touched, so a failed call
/// leaves the ledger exactly as it was.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LedgerError {
    #[error("minting is not live")]
    NotLive,

    #[error("sale would exceed the supply cap of {max} items")]
    TotalSupplyReached { max: u64 },

    #[error("invalid mint: {0:?}")]
    InvalidMint(InvalidMintReason),

    #[error("payment of {paid} does not match price {expected}")]
    InvalidPrice { expected: U256, paid: U256 },

    #[error("{0} is not allowlisted")]
    NotAllowlisted(Address),

    #[error("operator {0} not allowed")]
    AccessDenied(Address),

    #[error("{0} is not authorized")]
    Unauthorized(Address),

    #[error("item {0} does not exist")]
    NonexistentItem(ItemId),

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: U256, need: U256 },

    #[error("item {id} is not owned by {claimed}")]
    NotItemOwner { id: ItemId, claimed: Address },

    #[error("zero address")]
    ZeroAddress,

    #[error("amount overflow")]
    AmountOverflow,

    #[error("item id space exhausted")]
    ItemIdsExhausted,

    #[error("unit must be non-zero")]
    ZeroUnit,
}

impl From<GateError> for LedgerError {
    fn from(value: GateError) -> Self {
        match value {
            GateError::AccessDenied(op) => LedgerError::AccessDenied(op),
        }
    }
}

impl From<ConfigError> for LedgerError {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::Unauthorized(who) => LedgerError::Unauthorized(who),
        }
    }
}
