use std::collections::HashMap;

use parking_lot::RwLock;
use tandem_operator_gate::OperatorRegistry;
use tandem_primitives::Address;

/// Registry whose answers are set directly by the test.
///
/// Each operator is cleared up to some maximum level; queries above it and
/// queries for unknown operators are refused.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    allowed: RwLock<HashMap<Address, u32>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears `operator` at every level.
    pub fn allow(&self, operator: Address) {
        self.allow_up_to(operator, u32::MAX);
    }

    /// Clears `operator` for levels `<= max_level`.
    pub fn allow_up_to(&self, operator: Address, max_level: u32) {
        self.allowed.write().insert(operator, max_level);
    }

    pub fn deny(&self, operator: Address) {
        self.allowed.write().remove(&operator);
    }
}

impl OperatorRegistry for StaticRegistry {
    fn query_allowed(&self, operator: Address, level: u32) -> bool {
        self.allowed
            .read()
            .get(&operator)
            .is_some_and(|max| level <= *max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr;

    #[test]
    fn test_levels_respected() {
        let reg = StaticRegistry::new();
        reg.allow_up_to(addr(1), 2);
        assert!(reg.query_allowed(addr(1), 1));
        assert!(reg.query_allowed(addr(1), 2));
        assert!(!reg.query_allowed(addr(1), 3));
        assert!(!reg.query_allowed(addr(2), 0));

        reg.deny(addr(1));
        assert!(!reg.query_allowed(addr(1), 1));
    }
}
