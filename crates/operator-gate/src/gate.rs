use std::{collections::BTreeSet, fmt, sync::Arc};

use tandem_primitives::Address;
use tracing::*;

use crate::{
    errors::{GateError, GateResult},
    events::GateEvent,
    registry::OperatorRegistry,
};

/// Strictness level used until the owner picks another one.
pub const DEFAULT_REGISTRY_LEVEL: u32 = 1;

/// Snapshot of how the gate sees an operator, for diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OperatorStatus {
    /// If the global restriction is on.
    pub restricted: bool,

    /// If the operator is on the local override list.
    pub locally_allowed: bool,

    /// Strictness level the registry would be queried at.
    pub level: u32,
}

/// Decides whether an operator may be granted blanket approval.
pub struct OperatorGate {
    registry_addr: Address,
    registry: Arc<dyn OperatorRegistry>,
    level: u32,
    restrict_enabled: bool,
    local_allowed: BTreeSet<Address>,
}

impl OperatorGate {
    /// Constructs a gate with restriction enabled at the default level.
    pub fn new(registry_addr: Address, registry: Arc<dyn OperatorRegistry>) -> Self {
        Self {
            registry_addr,
            registry,
            level: DEFAULT_REGISTRY_LEVEL,
            restrict_enabled: true,
            local_allowed: BTreeSet::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_restrict_enabled(mut self, enabled: bool) -> Self {
        self.restrict_enabled = enabled;
        self
    }

    pub fn registry_addr(&self) -> Address {
        self.registry_addr
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn restrict_enabled(&self) -> bool {
        self.restrict_enabled
    }

    /// Iterates the local override list in address order.
    pub fn local_allowlist(&self) -> impl Iterator<Item = &Address> {
        self.local_allowed.iter()
    }

    pub fn is_locally_allowed(&self, operator: Address) -> bool {
        self.local_allowed.contains(&operator)
    }

    /// Checks if `operator` may receive blanket approval.
    ///
    /// The registry is only consulted when restriction is on and the local
    /// list does not already clear the operator.
    pub fn is_operator_allowed(&self, operator: Address) -> bool {
        if !self.restrict_enabled {
            return true;
        }

        if self.is_locally_allowed(operator) {
            return true;
        }

        self.registry.query_allowed(operator, self.level)
    }

    /// Like [`Self::is_operator_allowed`], but as a guard.
    pub fn check_operator(&self, operator: Address) -> GateResult<()> {
        if self.is_operator_allowed(operator) {
            Ok(())
        } else {
            debug!(%operator, level = self.level, "operator rejected");
            Err(GateError::AccessDenied(operator))
        }
    }

    pub fn operator_status(&self, operator: Address) -> OperatorStatus {
        OperatorStatus {
            restricted: self.restrict_enabled,
            locally_allowed: self.is_locally_allowed(operator),
            level: self.level,
        }
    }

    /// Replaces the registry the gate consults.
    pub fn set_registry(
        &mut self,
        registry_addr: Address,
        registry: Arc<dyn OperatorRegistry>,
    ) -> GateEvent {
        let old = self.registry_addr;
        self.registry_addr = registry_addr;
        self.registry = registry;
        info!(%old, new = %registry_addr, "operator registry replaced");
        GateEvent::RegistrySet {
            old,
            new: registry_addr,
        }
    }

    pub fn set_level(&mut self, level: u32) -> GateEvent {
        let old = self.level;
        self.level = level;
        GateEvent::RegistryLevelUpdated { old, new: level }
    }

    pub fn set_restrict_enabled(&mut self, enabled: bool) -> GateEvent {
        let old = self.restrict_enabled;
        self.restrict_enabled = enabled;
        GateEvent::RestrictStatusUpdated { old, new: enabled }
    }

    /// Adds an operator to the local override list.  Re-adding is not an
    /// error, the change is still reported.
    pub fn add_local_allowed(&mut self, operator: Address) -> GateEvent {
        self.local_allowed.insert(operator);
        GateEvent::LocalAllowListAdded { operator }
    }

    pub fn remove_local_allowed(&mut self, operator: Address) -> GateEvent {
        self.local_allowed.remove(&operator);
        GateEvent::LocalAllowListRemoved { operator }
    }
}

impl fmt::Debug for OperatorGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorGate")
            .field("registry_addr", &self.registry_addr)
            .field("level", &self.level)
            .field("restrict_enabled", &self.restrict_enabled)
            .field("local_allowed", &self.local_allowed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use proptest::prelude::*;
    use tandem_primitives::address;

    use super::*;
    use crate::registry::MockOperatorRegistry;

    const REGISTRY: Address = address!("0x00000000000000000000000000000000000000ca");
    const MARKET: Address = address!("0x000000000000000000000000000000000000beef");
    const STRANGER: Address = address!("0x000000000000000000000000000000000000dead");

    /// Registry that clears only `MARKET`, at any level.
    fn market_only_registry() -> Arc<dyn OperatorRegistry> {
        let mut mock = MockOperatorRegistry::new();
        mock.expect_query_allowed()
            .returning(|op, _level| op == MARKET);
        Arc::new(mock)
    }

    #[test]
    fn test_disabled_restriction_allows_everyone() {
        let mut mock = MockOperatorRegistry::new();
        mock.expect_query_allowed().never();

        let gate = OperatorGate::new(REGISTRY, Arc::new(mock)).with_restrict_enabled(false);
        assert!(gate.is_operator_allowed(STRANGER));
        assert!(gate.check_operator(STRANGER).is_ok());
    }

    #[test]
    fn test_registry_consulted_at_configured_level() {
        let mut mock = MockOperatorRegistry::new();
        mock.expect_query_allowed()
            .with(eq(MARKET), eq(3))
            .times(1)
            .return_const(true);

        let gate = OperatorGate::new(REGISTRY, Arc::new(mock)).with_level(3);
        assert!(gate.is_operator_allowed(MARKET));
    }

    #[test]
    fn test_rejection_is_access_denied() {
        let gate = OperatorGate::new(REGISTRY, market_only_registry());
        assert_eq!(
            gate.check_operator(STRANGER),
            Err(GateError::AccessDenied(STRANGER))
        );
        assert!(gate.check_operator(MARKET).is_ok());
    }

    #[test]
    fn test_local_override_skips_registry() {
        let mut mock = MockOperatorRegistry::new();
        mock.expect_query_allowed().never();

        let mut gate = OperatorGate::new(REGISTRY, Arc::new(mock));
        gate.add_local_allowed(STRANGER);
        assert!(gate.is_operator_allowed(STRANGER));

        let status = gate.operator_status(STRANGER);
        assert!(status.restricted);
        assert!(status.locally_allowed);
        assert_eq!(status.level, DEFAULT_REGISTRY_LEVEL);
    }

    #[test]
    fn test_local_list_add_remove_reported() {
        let mut gate = OperatorGate::new(REGISTRY, market_only_registry());

        assert_eq!(
            gate.add_local_allowed(STRANGER),
            GateEvent::LocalAllowListAdded { operator: STRANGER }
        );
        assert!(gate.is_locally_allowed(STRANGER));
        assert_eq!(gate.local_allowlist().collect::<Vec<_>>(), vec![&STRANGER]);

        assert_eq!(
            gate.remove_local_allowed(STRANGER),
            GateEvent::LocalAllowListRemoved { operator: STRANGER }
        );
        assert!(!gate.is_locally_allowed(STRANGER));
        assert!(!gate.is_operator_allowed(STRANGER));
    }

    #[test]
    fn test_setters_report_old_values() {
        let mut gate = OperatorGate::new(REGISTRY, market_only_registry());

        assert_eq!(
            gate.set_level(2),
            GateEvent::RegistryLevelUpdated { old: 1, new: 2 }
        );
        assert_eq!(
            gate.set_restrict_enabled(false),
            GateEvent::RestrictStatusUpdated {
                old: true,
                new: false
            }
        );

        let new_registry = address!("0x00000000000000000000000000000000000000cb");
        assert_eq!(
            gate.set_registry(new_registry, market_only_registry()),
            GateEvent::RegistrySet {
                old: REGISTRY,
                new: new_registry
            }
        );
        assert_eq!(gate.registry_addr(), new_registry);
    }

    proptest! {
        #[test]
        fn test_toggle_roundtrip_restores_decisions(
            ops in prop::collection::vec(any::<[u8; 20]>(), 1..16),
            local_mask in any::<u16>(),
        ) {
            let ops: Vec<Address> = ops.into_iter().map(Address::from).collect();
            let mut gate = OperatorGate::new(REGISTRY, market_only_registry());
            for (i, op) in ops.iter().enumerate() {
                if local_mask & (1 << i) != 0 {
                    gate.add_local_allowed(*op);
                }
            }

            let before: Vec<bool> = ops.iter().map(|op| gate.is_operator_allowed(*op)).collect();
            gate.set_restrict_enabled(false);
            prop_assert!(ops.iter().all(|op| gate.is_operator_allowed(*op)));
            gate.set_restrict_enabled(true);
            let after: Vec<bool> = ops.iter().map(|op| gate.is_operator_allowed(*op)).collect();

            prop_assert_eq!(before, after);
        }
    }
}
