//! External reminder delivery, abstracted behind a trait so the engine can be
//! driven deterministically in tests and wired to a real notifier by shells.

use std::sync::{Mutex, PoisonError};

use crate::engine::reminders::ReminderRequest;
use crate::errors::RentError;

/// Collaborator that fires reminders at requested instants.
///
/// Implementations must treat cancellation of an unknown id as a no-op; the
/// planner cancels its full well-known id set without checking what was
/// actually scheduled.
pub trait ReminderScheduler: Send + Sync {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), RentError>;
    fn cancel(&self, ids: &[String]) -> Result<(), RentError>;
}

/// Scheduler that drops every request, for callers that opt out of reminders.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScheduler;

impl ReminderScheduler for NoopScheduler {
    fn schedule(&self, _request: &ReminderRequest) -> Result<(), RentError> {
        Ok(())
    }

    fn cancel(&self, _ids: &[String]) -> Result<(), RentError> {
        Ok(())
    }
}

/// Scheduler that records every request and cancellation it receives.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<ReminderRequest>>,
    cancelled: Mutex<Vec<String>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Vec<ReminderRequest> {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn scheduled_ids(&self) -> Vec<String> {
        self.scheduled()
            .into_iter()
            .map(|request| request.id)
            .collect()
    }

    pub fn cancelled(&self) -> Vec<String> {
        self.cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ReminderScheduler for RecordingScheduler {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), RentError> {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        Ok(())
    }

    fn cancel(&self, ids: &[String]) -> Result<(), RentError> {
        self.cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(ids);
        Ok(())
    }
}
