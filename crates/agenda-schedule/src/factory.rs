//! Turns validated drafts into committed appointments.

use agenda_core::{
  Error, Result, ValidationIssue,
  appointment::{
    Appointment, AppointmentKind, AppointmentPatch, AppointmentStatus, Modality, PresentationTag,
  },
  config::ScheduleConfig,
  directory::ProfessionalDirectory,
  draft::{Draft, DraftKind, DraftModality},
  identity::IdentitySource,
};
use serde::Serialize;

/// A committed appointment together with what the caller needs to show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
  pub appointment:       Appointment,
  pub professional_name: String,
  pub tag:               PresentationTag,
}

pub struct AppointmentFactory<G> {
  ids:    G,
  config: ScheduleConfig,
}

impl<G: IdentitySource> AppointmentFactory<G> {
  pub fn new(config: &ScheduleConfig, ids: G) -> Self {
    Self { ids, config: config.clone() }
  }

  /// Check a draft without committing it. Returns the professional's display
  /// name on success.
  ///
  /// A single problem is reported as its own error kind; several are
  /// aggregated into [`Error::Validation`].
  pub fn validate<'d, D>(&self, draft: &Draft, directory: &'d D) -> Result<&'d str>
  where
    D: ProfessionalDirectory + ?Sized,
  {
    let mut issues = Vec::new();

    if let DraftKind::Consultation { patient_id, .. } = &draft.kind
      && draft.title.trim().is_empty()
      && patient_id.is_none()
    {
      issues.push(ValidationIssue::MissingTitle);
    }
    if !draft.range_valid() {
      issues.push(ValidationIssue::InvalidRange);
    }
    let name = directory.display_name(&draft.professional_id);
    if name.is_none() {
      issues.push(ValidationIssue::UnresolvedProfessional(draft.professional_id.clone()));
    }

    match (name, issues.as_slice()) {
      (Some(name), []) => Ok(name),
      (_, [ValidationIssue::InvalidRange]) => Err(Error::InvalidRange {
        start: draft.start,
        end:   draft.end,
      }),
      (_, [ValidationIssue::UnresolvedProfessional(id)]) => {
        Err(Error::UnresolvedProfessional(id.clone()))
      }
      _ => Err(Error::Validation(issues)),
    }
  }

  /// Build a new appointment with a fresh id and `Scheduled` status.
  pub fn create<D>(&mut self, draft: &Draft, directory: &D) -> Result<Booking>
  where
    D: ProfessionalDirectory + ?Sized,
  {
    let professional_name = self.validate(draft, directory)?.to_owned();
    let appointment = Appointment {
      id:              self.ids.appointment_id(),
      start:           draft.start,
      end:             draft.end,
      title:           self.title_for(draft),
      professional_id: draft.professional_id.clone(),
      kind:            self.resolve_kind(&draft.kind),
      status:          AppointmentStatus::Scheduled,
    };
    tracing::debug!(id = %appointment.id, professional = %professional_name, "appointment created from draft");
    Ok(Booking {
      tag: appointment.presentation_tag(),
      appointment,
      professional_name,
    })
  }

  /// The patch that brings a committed appointment in line with an edit
  /// draft, plus the professional's display name.
  pub fn amend<D>(&mut self, draft: &Draft, directory: &D) -> Result<(AppointmentPatch, String)>
  where
    D: ProfessionalDirectory + ?Sized,
  {
    let professional_name = self.validate(draft, directory)?.to_owned();
    let patch = AppointmentPatch {
      start:           Some(draft.start),
      end:             Some(draft.end),
      title:           Some(self.title_for(draft)),
      professional_id: Some(draft.professional_id.clone()),
      kind:            Some(self.resolve_kind(&draft.kind)),
      status:          None,
    };
    Ok((patch, professional_name))
  }

  /// A fresh meeting-room URI from the configured template.
  pub fn generate_meeting_reference(&mut self) -> String {
    let token = self.ids.meeting_token();
    self.config.meeting_uri(&token)
  }

  fn title_for(&self, draft: &Draft) -> String {
    let title = draft.title.trim();
    match &draft.kind {
      DraftKind::Block if title.is_empty() => self.config.block_label.clone(),
      DraftKind::Consultation { patient_id: Some(patient), .. } if title.is_empty() => {
        patient.to_string()
      }
      _ => title.to_owned(),
    }
  }

  fn resolve_kind(&mut self, kind: &DraftKind) -> AppointmentKind {
    match kind {
      DraftKind::Block => AppointmentKind::Block,
      DraftKind::Consultation { patient_id, modality } => AppointmentKind::Consultation {
        patient_id: patient_id.clone(),
        modality:   modality.as_ref().map(|m| match m {
          DraftModality::InPerson => Modality::InPerson,
          DraftModality::Remote { meeting_reference } => Modality::Remote {
            meeting_reference: match meeting_reference.as_deref().map(str::trim) {
              Some(existing) if !existing.is_empty() => existing.to_owned(),
              _ => self.generate_meeting_reference(),
            },
          },
        }),
      },
    }
  }
}
