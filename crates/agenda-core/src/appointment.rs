//! The appointment, the unit the scheduler stores and renders.
//!
//! An appointment is created once from a validated draft and is never
//! reshaped afterwards except through an explicit [`AppointmentPatch`]. The
//! presentation tag is always derived, never stored.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Opaque identity assigned by the factory at creation time.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AppointmentId(pub Uuid);

impl fmt::Display for AppointmentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Key into the professional directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfessionalId(pub String);

impl fmt::Display for ProfessionalId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ProfessionalId {
  fn from(value: &str) -> Self { Self(value.to_owned()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

impl fmt::Display for PatientId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for PatientId {
  fn from(value: &str) -> Self { Self(value.to_owned()) }
}

// ─── Kind and modality ───────────────────────────────────────────────────────

/// How a consultation takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modality {
  InPerson,
  /// A video session; the reference is the room URI handed to both parties.
  Remote { meeting_reference: String },
}

/// What occupies the time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppointmentKind {
  /// Time the professional has blocked off; no patient attached.
  Block,
  Consultation {
    #[serde(default)]
    patient_id: Option<PatientId>,
    /// Absent on records that never specified one.
    #[serde(default)]
    modality:   Option<Modality>,
  },
}

impl AppointmentKind {
  pub fn patient_id(&self) -> Option<&PatientId> {
    match self {
      Self::Consultation { patient_id, .. } => patient_id.as_ref(),
      Self::Block => None,
    }
  }

  pub fn meeting_reference(&self) -> Option<&str> {
    match self {
      Self::Consultation {
        modality: Some(Modality::Remote { meeting_reference }),
        ..
      } => Some(meeting_reference.as_str()),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
  #[default]
  Scheduled,
  Completed,
  Canceled,
}

/// Display category derived from kind and modality. The caller maps each
/// category to its own visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTag {
  Block,
  InPerson,
  Remote,
  Default,
}

impl PresentationTag {
  pub fn of(kind: &AppointmentKind) -> Self {
    match kind {
      AppointmentKind::Block => Self::Block,
      AppointmentKind::Consultation { modality: Some(Modality::InPerson), .. } => {
        Self::InPerson
      }
      AppointmentKind::Consultation {
        modality: Some(Modality::Remote { .. }), ..
      } => Self::Remote,
      AppointmentKind::Consultation { modality: None, .. } => Self::Default,
    }
  }
}

// ─── Appointment ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
  pub id:              AppointmentId,
  pub start:           NaiveDateTime,
  pub end:             NaiveDateTime,
  pub title:           String,
  pub professional_id: ProfessionalId,
  #[serde(flatten)]
  pub kind:            AppointmentKind,
  #[serde(default)]
  pub status:          AppointmentStatus,
}

impl Appointment {
  /// The civil date the appointment is filed under.
  pub fn date(&self) -> NaiveDate { self.start.date() }

  pub fn presentation_tag(&self) -> PresentationTag { PresentationTag::of(&self.kind) }

  pub fn duration_minutes(&self) -> i64 { (self.end - self.start).num_minutes() }

  /// Half-open interval intersection.
  pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    self.start < end && start < self.end
  }
}

/// Changes applied by [`crate::store::AppointmentStore::update`]. `None`
/// leaves a field as it is; the id has no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPatch {
  pub start:           Option<NaiveDateTime>,
  pub end:             Option<NaiveDateTime>,
  pub title:           Option<String>,
  pub professional_id: Option<ProfessionalId>,
  pub kind:            Option<AppointmentKind>,
  pub status:          Option<AppointmentStatus>,
}

impl AppointmentPatch {
  pub fn reschedule(start: NaiveDateTime, end: NaiveDateTime) -> Self {
    Self { start: Some(start), end: Some(end), ..Self::default() }
  }

  pub fn status(status: AppointmentStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }
}
