//! Hybrid asset ledger.
//!
//! One supply is tracked as fungible balances and, in parallel, as discrete
//! items.  Each account holds exactly `floor(balance / unit)` items at all
//! times: crossing a unit boundary upwards mints fresh ids, crossing it
//! downwards burns the account's highest ids.  Sales go through a public or
//! merkle allowlist path, blanket approvals through the operator gate.

mod account;
mod admin;
mod errors;
mod events;
mod items;
mod ledger;
mod mirror;
mod reconcile;


pub use account::Account;
pub use errors::{InvalidMintReason, LedgerError, LedgerResult};
pub use events::{ConfigChange, LedgerEvent};
pub use items::ItemIndex;
pub use ledger::{Ledger, Withdrawal};
pub use mirror::{MirrorView, MirrorViewMut};
pub use reconcile::ItemDelta;
