//! Per-call context supplied by the host platform.

use crate::types::Principal;

/// What the host hands the vault with every write call.
///
/// The host guarantees `caller` cannot be forged and that `sequence` never
/// decreases across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Identity of the caller.
    pub caller: Principal,
    /// Host sequence counter; recorded as the genesis block on registration.
    pub sequence: u64,
}

impl CallContext {
    pub const fn new(caller: Principal, sequence: u64) -> Self {
        Self { caller, sequence }
    }
}
