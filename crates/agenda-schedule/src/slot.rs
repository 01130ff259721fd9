//! Slot clicks and the draft lifecycle.
//!
//! ```text
//! Idle --click/quick-create/edit--> Drafting --save ok--> Idle
//!                                   Drafting --save err--> Drafting
//!                                   Drafting --cancel----> Idle
//! ```

use agenda_core::{
  Error, Result,
  appointment::{Appointment, ProfessionalId},
  availability::WeeklyAvailability,
  config::ScheduleConfig,
  directory::ProfessionalDirectory,
  draft::{Draft, DraftFlags, DraftKind},
  identity::IdentitySource,
  store::AppointmentStore,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::{
  factory::{AppointmentFactory, Booking},
  time_axis::TimeAxis,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotState<'a> {
  Idle,
  Drafting(&'a Draft),
}

#[derive(Debug, Clone)]
pub struct SlotController {
  draft:            Option<Draft>,
  axis:             TimeAxis,
  default_duration: Duration,
  availability:     Option<WeeklyAvailability>,
}

impl SlotController {
  /// Fails on a config the time axis rejects.
  pub fn new(config: &ScheduleConfig) -> Result<Self> {
    Ok(Self {
      draft:            None,
      axis:             TimeAxis::new(config)?,
      default_duration: config.default_duration(),
      availability:     None,
    })
  }

  /// Flag drafts against a professional's working hours.
  pub fn with_availability(mut self, availability: WeeklyAvailability) -> Self {
    self.availability = Some(availability);
    self
  }

  pub fn state(&self) -> SlotState<'_> {
    self.draft.as_ref().map_or(SlotState::Idle, SlotState::Drafting)
  }

  pub fn draft(&self) -> Option<&Draft> { self.draft.as_ref() }

  pub fn is_drafting(&self) -> bool { self.draft.is_some() }

  // ── Opening a draft ───────────────────────────────────────────────────

  /// Start of the hour row `date@hour`, if the grid shows that row.
  fn slot_start(&self, date: NaiveDate, hour: u32) -> Result<NaiveDateTime> {
    let out_of_range = || Error::TimeOutOfRange {
      hour:      f64::from(hour),
      day_start: self.axis.day_start(),
      day_end:   self.axis.day_end(),
    };
    if !self.axis.contains_slot(hour) {
      return Err(out_of_range());
    }
    date.and_hms_opt(hour, 0, 0).ok_or_else(out_of_range)
  }

  /// Open a draft of the default duration at `date@hour`.
  pub fn on_slot_click(
    &mut self,
    date: NaiveDate,
    hour: u32,
    professional_id: ProfessionalId,
  ) -> Result<&Draft> {
    let start = self.slot_start(date, hour)?;
    Ok(self.open_at(start, professional_id))
  }

  /// Open a draft at the slot under a vertical pixel offset.
  pub fn on_grid_click(
    &mut self,
    date: NaiveDate,
    y_px: f64,
    professional_id: ProfessionalId,
  ) -> Result<&Draft> {
    let time = self.axis.offset_to_time(y_px)?;
    Ok(self.open_at(date.and_time(time), professional_id))
  }

  /// Open a draft at the top of the current hour. Outside the visible hours
  /// this fails like a click on a missing row.
  pub fn on_quick_create(
    &mut self,
    now: NaiveDateTime,
    professional_id: ProfessionalId,
  ) -> Result<&Draft> {
    let start = self.slot_start(now.date(), now.hour())?;
    Ok(self.open_at(start, professional_id))
  }

  /// Open a draft pre-filled from a committed appointment.
  pub fn begin_edit(&mut self, appointment: &Appointment) -> &Draft {
    tracing::debug!(id = %appointment.id, "editing appointment");
    let draft = Draft::from_appointment(appointment);
    self.replace_draft(draft)
  }

  fn open_at(&mut self, start: NaiveDateTime, professional_id: ProfessionalId) -> &Draft {
    let draft = Draft::new(start, start + self.default_duration, professional_id);
    tracing::debug!(start = %draft.start, end = %draft.end, "draft opened");
    self.replace_draft(draft)
  }

  fn replace_draft(&mut self, mut draft: Draft) -> &Draft {
    if let Some(previous) = &self.draft {
      tracing::warn!(start = %previous.start, "discarding open draft");
    }
    draft.revalidate(self.availability.as_ref());
    self.draft.insert(draft)
  }

  // ── Editing ───────────────────────────────────────────────────────────

  /// Apply `change` to the open draft and re-validate it.
  ///
  /// Invalid results are reported through the returned flags; only a missing
  /// draft is an error.
  pub fn edit(&mut self, change: impl FnOnce(&mut Draft)) -> Result<DraftFlags> {
    let Some(draft) = &mut self.draft else {
      return Err(Error::NoActiveDraft);
    };
    change(draft);
    draft.revalidate(self.availability.as_ref());
    Ok(draft.flags())
  }

  pub fn set_start(&mut self, start: NaiveDateTime) -> Result<DraftFlags> {
    self.edit(|d| d.start = start)
  }

  pub fn set_end(&mut self, end: NaiveDateTime) -> Result<DraftFlags> { self.edit(|d| d.end = end) }

  pub fn set_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<DraftFlags> {
    self.edit(|d| {
      d.start = start;
      d.end = end;
    })
  }

  pub fn set_title(&mut self, title: impl Into<String>) -> Result<DraftFlags> {
    let title = title.into();
    self.edit(|d| d.title = title)
  }

  pub fn set_kind(&mut self, kind: DraftKind) -> Result<DraftFlags> { self.edit(|d| d.kind = kind) }

  pub fn set_professional(&mut self, professional_id: ProfessionalId) -> Result<DraftFlags> {
    self.edit(|d| d.professional_id = professional_id)
  }

  // ── Closing ───────────────────────────────────────────────────────────

  /// Commit the open draft.
  ///
  /// New drafts are created through `factory` and inserted; edit drafts are
  /// applied as a patch. On any failure the draft stays open.
  pub fn save<G, D, S>(
    &mut self,
    factory: &mut AppointmentFactory<G>,
    directory: &D,
    store: &mut S,
  ) -> Result<Booking>
  where
    G: IdentitySource,
    D: ProfessionalDirectory + ?Sized,
    S: AppointmentStore + ?Sized,
  {
    let Some(draft) = &self.draft else {
      return Err(Error::NoActiveDraft);
    };

    let booking = match draft.editing {
      None => {
        let booking = factory.create(draft, directory)?;
        store.insert(booking.appointment.clone())?;
        booking
      }
      Some(id) => {
        let (patch, professional_name) = factory.amend(draft, directory)?;
        let appointment = store.update(id, patch)?.clone();
        Booking {
          tag: appointment.presentation_tag(),
          appointment,
          professional_name,
        }
      }
    };

    tracing::info!(
      id = %booking.appointment.id,
      start = %booking.appointment.start,
      professional = %booking.professional_name,
      "appointment saved"
    );
    self.draft = None;
    Ok(booking)
  }

  /// Discard the open draft, if any.
  pub fn cancel(&mut self) -> Option<Draft> {
    let draft = self.draft.take()?;
    tracing::debug!(start = %draft.start, "draft cancelled");
    Some(draft)
  }
}
