//! Error types for `agenda-core`.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::{
  appointment::{AppointmentId, ProfessionalId},
  calendar::ViewMode,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("invalid time range: end {end} is not after start {start}")]
  InvalidRange {
    start: NaiveDateTime,
    end:   NaiveDateTime,
  },

  #[error("hour {hour} is outside the visible window {day_start}:00-{day_end}:00")]
  TimeOutOfRange {
    hour:      f64,
    day_start: u32,
    day_end:   u32,
  },

  #[error("pixel offset {0} does not fall on the time grid")]
  OffsetOutOfRange(f64),

  #[error("professional not found in directory: {0}")]
  UnresolvedProfessional(ProfessionalId),

  #[error("draft is invalid: {}", join_issues(.0))]
  Validation(Vec<ValidationIssue>),

  #[error("appointment not found: {0}")]
  AppointmentNotFound(AppointmentId),

  #[error("appointment {0} already exists")]
  DuplicateAppointment(AppointmentId),

  #[error("no draft is open")]
  NoActiveDraft,

  #[error("slots cannot be selected in {0} view")]
  SlotsUnavailable(ViewMode),

  #[error("month cells can only be selected in month view (current: {0})")]
  NotMonthView(ViewMode),

  #[error("invalid schedule configuration: {0}")]
  InvalidConfig(String),
}

/// A single reason a draft cannot be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
  /// Consultations need a title or a patient.
  MissingTitle,
  InvalidRange,
  UnresolvedProfessional(ProfessionalId),
}

impl std::fmt::Display for ValidationIssue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingTitle => f.write_str("a consultation needs a title or a patient"),
      Self::InvalidRange => f.write_str("end must be after start"),
      Self::UnresolvedProfessional(id) => write!(f, "unknown professional {id}"),
    }
  }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
  issues
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
