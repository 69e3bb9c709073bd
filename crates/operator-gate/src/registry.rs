use tandem_primitives::Address;

/// Read-only view of the external operator registry.
///
/// The registry interprets `level` itself; higher levels are stricter by
/// convention but the gate never assumes anything about it.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait OperatorRegistry: Send + Sync {
    /// Checks if `operator` is allowed at strictness `level`.
    fn query_allowed(&self, operator: Address, level: u32) -> bool;
}
