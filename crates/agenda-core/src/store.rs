//! The `AppointmentStore` trait and supporting query types.
//!
//! The scheduling engine renders from and commits into this abstraction. The
//! in-memory index in `agenda-schedule` is the implementation used by the
//! console; durable backends are the host's concern.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  Result,
  appointment::{
    Appointment, AppointmentId, AppointmentPatch, AppointmentStatus, PresentationTag,
    ProfessionalId,
  },
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`AppointmentStore::search`]. Empty fields match anything.
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
  pub professional_id: Option<ProfessionalId>,
  /// First civil date (inclusive) an appointment may start on.
  pub from:            Option<NaiveDate>,
  /// Last civil date (inclusive) an appointment may start on.
  pub to:              Option<NaiveDate>,
  pub tag:             Option<PresentationTag>,
  pub status:          Option<AppointmentStatus>,
}

impl AppointmentQuery {
  pub fn matches(&self, a: &Appointment) -> bool {
    self.professional_id.as_ref().is_none_or(|p| *p == a.professional_id)
      && self.from.is_none_or(|d| a.date() >= d)
      && self.to.is_none_or(|d| a.date() <= d)
      && self.tag.is_none_or(|t| a.presentation_tag() == t)
      && self.status.is_none_or(|s| a.status == s)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the appointment collection.
///
/// All calls are synchronous and run to completion. Callers serialise
/// mutations themselves; implementations carry no locking.
pub trait AppointmentStore {
  // ── Writes ────────────────────────────────────────────────────────────

  /// Add a committed appointment.
  ///
  /// Fails with [`Error::InvalidRange`](crate::Error::InvalidRange) when
  /// `end <= start`. Overlapping appointments are accepted.
  fn insert(&mut self, appointment: Appointment) -> Result<()>;

  /// Remove and return the appointment with `id`.
  fn remove(&mut self, id: AppointmentId) -> Result<Appointment>;

  /// Apply `patch` in place. The resulting range is re-validated and the
  /// appointment is left untouched on failure.
  fn update(&mut self, id: AppointmentId, patch: AppointmentPatch) -> Result<&Appointment>;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn get(&self, id: AppointmentId) -> Option<&Appointment>;

  /// Appointments whose `start` falls on `date`, in insertion order.
  fn appointments_on(&self, date: NaiveDate) -> Vec<&Appointment>;

  /// Appointments of `professional_id` intersecting `[start, end)`.
  fn overlapping(
    &self,
    professional_id: &ProfessionalId,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Vec<&Appointment>;

  /// Appointments matching `query`, in insertion order.
  fn search(&self, query: &AppointmentQuery) -> Vec<&Appointment>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }
}
