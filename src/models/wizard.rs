//! Step state of the booking wizard.
//!
//! The routes are stateless and never hold a wizard. This is a library type
//! for the booking front end, which drives the flow itself and needs the same
//! step ordering the API assumes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Steps of the booking flow, in the only order they can be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Arrangement,
    Rooms,
    Summary,
    Confirmed,
}

impl BookingStep {
    pub fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Arrangement => Some(BookingStep::Rooms),
            BookingStep::Rooms => Some(BookingStep::Summary),
            BookingStep::Summary => Some(BookingStep::Confirmed),
            BookingStep::Confirmed => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum WizardError {
    AlreadyConfirmed,
    NotReachable {
        from: BookingStep,
        to: BookingStep,
    },
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::AlreadyConfirmed => write!(f, "Booking is already confirmed"),
            WizardError::NotReachable { from, to } => {
                write!(f, "Cannot go from {:?} to {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for WizardError {}

/// Linear three step wizard. Completing a step moves to the next one, going
/// back is allowed to any earlier step, jumping ahead is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWizard {
    current: BookingStep,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self {
            current: BookingStep::Arrangement,
        }
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> BookingStep {
        self.current
    }

    pub fn is_completed(&self, step: BookingStep) -> bool {
        step < self.current
    }

    /// Marks the current step as done once its form validated.
    pub fn complete_current(&mut self) -> Result<BookingStep, WizardError> {
        let next = self.current.next().ok_or(WizardError::AlreadyConfirmed)?;
        self.current = next;
        Ok(next)
    }

    pub fn go_back(&mut self, step: BookingStep) -> Result<(), WizardError> {
        if self.current == BookingStep::Confirmed {
            return Err(WizardError::AlreadyConfirmed);
        }
        if !self.is_completed(step) {
            return Err(WizardError::NotReachable {
                from: self.current,
                to: step,
            });
        }
        self.current = step;
        Ok(())
    }
}
