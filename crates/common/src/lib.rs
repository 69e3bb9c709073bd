//! Ambient utilities shared by hosts embedding the ledger.

pub mod logging;
