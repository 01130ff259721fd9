//! Draft appointments: the editable, uncommitted form behind the booking
//! dialog.
//!
//! A draft mirrors [`Appointment`] without id and status. Block and
//! consultation drafts are separate variants so a block can never carry a
//! modality or a meeting reference.

use chrono::NaiveDateTime;

use crate::{
  appointment::{Appointment, AppointmentId, AppointmentKind, Modality, PatientId, ProfessionalId},
  availability::{SlotAvailability, WeeklyAvailability},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftModality {
  InPerson,
  /// A reference is generated on save when none was typed in.
  Remote { meeting_reference: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftKind {
  Block,
  Consultation {
    patient_id: Option<PatientId>,
    modality:   Option<DraftModality>,
  },
}

impl DraftKind {
  pub fn in_person() -> Self {
    Self::Consultation { patient_id: None, modality: Some(DraftModality::InPerson) }
  }

  pub fn remote() -> Self {
    Self::Consultation {
      patient_id: None,
      modality:   Some(DraftModality::Remote { meeting_reference: None }),
    }
  }
}

impl From<&AppointmentKind> for DraftKind {
  fn from(kind: &AppointmentKind) -> Self {
    match kind {
      AppointmentKind::Block => Self::Block,
      AppointmentKind::Consultation { patient_id, modality } => Self::Consultation {
        patient_id: patient_id.clone(),
        modality:   modality.as_ref().map(|m| match m {
          Modality::InPerson => DraftModality::InPerson,
          Modality::Remote { meeting_reference } => DraftModality::Remote {
            meeting_reference: Some(meeting_reference.clone()),
          },
        }),
      },
    }
  }
}

/// Validation state shown next to the form. Recomputed on every edit; never
/// an error by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftFlags {
  pub range_valid:  bool,
  /// `None` when no availability window was supplied.
  pub availability: Option<SlotAvailability>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
  pub start:           NaiveDateTime,
  pub end:             NaiveDateTime,
  pub title:           String,
  pub professional_id: ProfessionalId,
  pub kind:            DraftKind,
  /// Set when the draft edits an already committed appointment.
  pub editing:         Option<AppointmentId>,
  flags:               DraftFlags,
}

impl Draft {
  /// A fresh in-person consultation draft over `[start, end)`.
  pub fn new(start: NaiveDateTime, end: NaiveDateTime, professional_id: ProfessionalId) -> Self {
    let mut draft = Self {
      start,
      end,
      title: String::new(),
      professional_id,
      kind: DraftKind::in_person(),
      editing: None,
      flags: DraftFlags { range_valid: false, availability: None },
    };
    draft.revalidate(None);
    draft
  }

  /// Pre-fill a draft from a committed appointment for editing.
  pub fn from_appointment(appointment: &Appointment) -> Self {
    let mut draft = Self::new(
      appointment.start,
      appointment.end,
      appointment.professional_id.clone(),
    );
    draft.title = appointment.title.clone();
    draft.kind = DraftKind::from(&appointment.kind);
    draft.editing = Some(appointment.id);
    draft
  }

  pub fn flags(&self) -> DraftFlags { self.flags }

  pub fn range_valid(&self) -> bool { self.end > self.start }

  /// Recompute [`DraftFlags`] against the current fields.
  pub fn revalidate(&mut self, availability: Option<&WeeklyAvailability>) {
    let range_valid = self.range_valid();
    // Working days never cross midnight, so multi-day ranges are out of hours.
    let availability = availability.map(|a| {
      if range_valid && self.end.date() == self.start.date() {
        a.classify(self.start.date(), self.start.time(), self.end.time())
      } else {
        SlotAvailability::OutsideHours
      }
    });
    self.flags = DraftFlags { range_valid, availability };
  }
}
