use tandem_primitives::Address;
use thiserror::Error;

pub type GateResult<T> = Result<T, GateError>;

/// Errors from the operator gate.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GateError {
    /// The operator is neither locally allowed nor cleared by the registry.
    #[error("operator {0} not allowed")]
    AccessDenied(Address),
}
