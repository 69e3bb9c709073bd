//! Restriction on which operators may receive blanket transfer approval.
//!
//! The decision combines a global on/off switch, a local override allowlist
//! and an external operator registry queried at a configurable strictness
//! level.  Only approvals are gated; revocations never are.

mod errors;
mod events;
mod gate;
mod registry;

pub use errors::{GateError, GateResult};
pub use events::GateEvent;
pub use gate::{OperatorGate, OperatorStatus, DEFAULT_REGISTRY_LEVEL};
#[cfg(any(test, feature = "test-utils"))]
pub use registry::MockOperatorRegistry;
pub use registry::OperatorRegistry;
