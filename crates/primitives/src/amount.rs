//! Fungible amount helpers.

use std::fmt;

use alloy_primitives::U256;

/// Number of base units in one whole token (18 decimals).
pub const ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Converts a whole-token count into base units.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * ETHER
}

/// The fixed fungible amount backing exactly one item.
///
/// Always non-zero, which is what makes the item count of a balance well
/// defined.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Unit(U256);

impl Unit {
    /// Wraps a unit amount, returning `None` for zero.
    pub fn new(amt: U256) -> Option<Self> {
        if amt.is_zero() {
            None
        } else {
            Some(Self(amt))
        }
    }

    /// Returns the raw amount of one unit.
    pub fn amount(&self) -> U256 {
        self.0
    }

    /// Number of whole items a balance backs, `floor(balance / unit)`.
    pub fn items_for(&self, balance: U256) -> u64 {
        let items = balance / self.0;
        // Balances are bounded by total supply, which must be representable
        // as an item count for ids to be allocatable at all.
        u64::try_from(items).unwrap_or(u64::MAX)
    }

    /// Amount backing `items` whole items, `None` on overflow.
    pub fn amount_for(&self, items: u64) -> Option<U256> {
        self.0.checked_mul(U256::from(items))
    }

    /// Remainder of a balance that does not back a whole item.
    pub fn remainder(&self, balance: U256) -> U256 {
        balance % self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
