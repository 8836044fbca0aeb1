//! UI-agnostic trigger state
//!
//! Shared between front-ends so each can render the same lifecycle without
//! knowing how the trigger reached it.

/// Where the most recent request stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Idle,
    /// Waiting on the request with this sequence number
    Pending(u64),
    Resolved,
    Failed,
}

impl TriggerState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TriggerState::Pending(_))
    }
}
