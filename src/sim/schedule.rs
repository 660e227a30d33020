//! Single-slot deferred task
//!
//! Holds at most one pending action with a due time on the simulation clock.
//! The tick loop takes the task once it is due and applies it before anything
//! else in that tick observes state.

use serde::{Deserialize, Serialize};

/// Deferred actions the round state machine can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Leave Scoring: re-center paddles, unlock input, await the next serve
    ReturnToServe,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub action: DeferredAction,
    pub due_ms: f64,
}

/// One-shot, non-cancellable schedule slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeferredSlot {
    pending: Option<ScheduledTask>,
}

impl DeferredSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` at `due_ms`. Returns false if the slot is already taken.
    pub fn schedule(&mut self, action: DeferredAction, due_ms: f64) -> bool {
        if self.pending.is_some() {
            log::warn!("Deferred slot busy, dropping {:?}", action);
            return false;
        }
        self.pending = Some(ScheduledTask { action, due_ms });
        true
    }

    /// Take the pending action if it is due at `now_ms`
    pub fn take_due(&mut self, now_ms: f64) -> Option<DeferredAction> {
        match self.pending {
            Some(task) if task.due_ms <= now_ms => {
                self.pending = None;
                Some(task.action)
            }
            _ => None,
        }
    }

    /// Take the pending action regardless of its due time
    pub fn take_now(&mut self) -> Option<DeferredAction> {
        self.pending.take().map(|task| task.action)
    }

    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut slot = DeferredSlot::new();
        assert!(slot.schedule(DeferredAction::ReturnToServe, 100.0));

        assert_eq!(slot.take_due(99.9), None);
        assert_eq!(slot.take_due(100.0), Some(DeferredAction::ReturnToServe));
        assert_eq!(slot.take_due(200.0), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_second_schedule_is_ignored() {
        let mut slot = DeferredSlot::new();
        assert!(slot.schedule(DeferredAction::ReturnToServe, 100.0));
        assert!(!slot.schedule(DeferredAction::ReturnToServe, 5.0));
        assert_eq!(slot.pending().map(|t| t.due_ms), Some(100.0));
    }

    #[test]
    fn test_take_now_ignores_due_time() {
        let mut slot = DeferredSlot::new();
        slot.schedule(DeferredAction::ReturnToServe, 1e9);
        assert_eq!(slot.take_now(), Some(DeferredAction::ReturnToServe));
        assert_eq!(slot.take_now(), None);
    }
}
