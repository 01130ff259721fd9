//! [`Agenda`], the in-process surface a calendar screen talks to.
//!
//! Owns the appointment index and wires the view model, the slot controller
//! and the factory together. It also keeps the two state machines
//! consistent: a draft only exists while an hour grid (day or week) is shown.

use agenda_core::{
  Error, Result,
  appointment::{Appointment, AppointmentId, AppointmentStatus, ProfessionalId},
  availability::WeeklyAvailability,
  calendar::{Direction, ViewMode},
  clock::Clock,
  config::ScheduleConfig,
  directory::ProfessionalDirectory,
  draft::{Draft, DraftFlags, DraftKind},
  identity::IdentitySource,
  store::AppointmentStore,
};
use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  factory::{AppointmentFactory, Booking},
  index::AppointmentIndex,
  slot::{SlotController, SlotState},
  view::{CalendarView, CalendarViewModel, CalendarViewState},
};

pub struct Agenda<D, G, C> {
  config:               ScheduleConfig,
  index:                AppointmentIndex,
  directory:            D,
  default_professional: ProfessionalId,
  view:                 CalendarViewModel,
  slots:                SlotController,
  factory:              AppointmentFactory<G>,
  clock:                C,
}

impl<D, G, C> Agenda<D, G, C>
where
  D: ProfessionalDirectory,
  G: IdentitySource,
  C: Clock,
{
  /// Build an empty agenda in week view anchored at today.
  ///
  /// `default_professional` pre-populates every new draft. Fails with
  /// [`Error::InvalidConfig`] before anything is built.
  pub fn new(
    config: ScheduleConfig,
    directory: D,
    default_professional: ProfessionalId,
    ids: G,
    clock: C,
  ) -> Result<Self> {
    Ok(Self {
      index: AppointmentIndex::new(),
      directory,
      default_professional,
      view: CalendarViewModel::new(&config, clock.today())?,
      slots: SlotController::new(&config)?,
      factory: AppointmentFactory::new(&config, ids),
      clock,
      config,
    })
  }

  /// Load the initial appointment list.
  pub fn with_appointments(
    mut self,
    appointments: impl IntoIterator<Item = Appointment>,
  ) -> Result<Self> {
    for appointment in appointments {
      self.index.insert(appointment)?;
    }
    tracing::debug!(count = self.index.len(), "appointments loaded");
    Ok(self)
  }

  /// Flag slots and drafts against the default professional's hours.
  pub fn with_availability(mut self, availability: WeeklyAvailability) -> Self {
    self.view = self.view.with_availability(availability.clone());
    self.slots = self.slots.with_availability(availability);
    self
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn config(&self) -> &ScheduleConfig { &self.config }

  pub fn index(&self) -> &AppointmentIndex { &self.index }

  pub fn directory(&self) -> &D { &self.directory }

  pub fn view_state(&self) -> CalendarViewState { self.view.state() }

  pub fn slot_state(&self) -> SlotState<'_> { self.slots.state() }

  pub fn draft(&self) -> Option<&Draft> { self.slots.draft() }

  pub fn default_professional(&self) -> &ProfessionalId { &self.default_professional }

  // ── Rendering ─────────────────────────────────────────────────────────

  pub fn render(&self) -> CalendarView { self.view.render(&self.index) }

  /// Column and offset of the current-time line when today is visible and
  /// the time falls inside the grid.
  pub fn now_indicator(&self) -> Option<(NaiveDate, f64)> {
    if !self.view.mode().has_time_grid() {
      return None;
    }
    let now = self.clock.now();
    if !self.view.visible_dates().contains(&now.date()) {
      return None;
    }
    self
      .view
      .axis()
      .now_indicator(now.time())
      .map(|px| (now.date(), px))
  }

  // ── Navigation ────────────────────────────────────────────────────────

  /// Switch projection. Leaving the hour grids discards an open draft.
  pub fn set_mode(&mut self, mode: ViewMode) {
    if !mode.has_time_grid() && self.slots.cancel().is_some() {
      tracing::warn!(%mode, "open draft discarded by view change");
    }
    self.view.set_mode(mode);
  }

  pub fn navigate(&mut self, direction: Direction) { self.view.navigate(direction); }

  pub fn jump_to_today(&mut self) { self.jump_to(self.clock.today()); }

  /// Re-anchor the current projection at `date`.
  pub fn jump_to(&mut self, date: NaiveDate) { self.view.jump_to(date); }

  pub fn select_month_cell(&mut self, date: NaiveDate) -> Result<()> {
    self.view.select_month_cell(date)
  }

  // ── Drafts ────────────────────────────────────────────────────────────

  fn require_grid(&self) -> Result<()> {
    let mode = self.view.mode();
    if mode.has_time_grid() { Ok(()) } else { Err(Error::SlotsUnavailable(mode)) }
  }

  pub fn on_slot_click(&mut self, date: NaiveDate, hour: u32) -> Result<&Draft> {
    self.require_grid()?;
    self
      .slots
      .on_slot_click(date, hour, self.default_professional.clone())
  }

  pub fn on_grid_click(&mut self, date: NaiveDate, y_px: f64) -> Result<&Draft> {
    self.require_grid()?;
    self
      .slots
      .on_grid_click(date, y_px, self.default_professional.clone())
  }

  /// Draft at the current hour. From month view this then drills down to
  /// today; outside the visible hours nothing changes.
  pub fn on_quick_create(&mut self) -> Result<&Draft> {
    let now = self.clock.now();
    let draft = self
      .slots
      .on_quick_create(now, self.default_professional.clone())?;
    if !self.view.mode().has_time_grid() {
      self.view.set_mode(ViewMode::Day);
      self.view.jump_to(now.date());
    }
    Ok(draft)
  }

  /// Open an edit draft for a committed appointment.
  pub fn begin_edit(&mut self, id: AppointmentId) -> Result<&Draft> {
    let appointment = self.index.get(id).ok_or(Error::AppointmentNotFound(id))?;
    if !self.view.mode().has_time_grid() {
      self.view.set_mode(ViewMode::Day);
      self.view.jump_to(appointment.date());
    }
    Ok(self.slots.begin_edit(appointment))
  }

  pub fn edit_draft(&mut self, change: impl FnOnce(&mut Draft)) -> Result<DraftFlags> {
    self.slots.edit(change)
  }

  pub fn set_draft_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<DraftFlags> {
    self.slots.set_range(start, end)
  }

  pub fn set_draft_title(&mut self, title: impl Into<String>) -> Result<DraftFlags> {
    self.slots.set_title(title)
  }

  pub fn set_draft_kind(&mut self, kind: DraftKind) -> Result<DraftFlags> {
    self.slots.set_kind(kind)
  }

  pub fn set_draft_professional(&mut self, professional_id: ProfessionalId) -> Result<DraftFlags> {
    self.slots.set_professional(professional_id)
  }

  pub fn save(&mut self) -> Result<Booking> {
    self
      .slots
      .save(&mut self.factory, &self.directory, &mut self.index)
  }

  pub fn cancel(&mut self) -> Option<Draft> { self.slots.cancel() }

  // ── Committed appointments ────────────────────────────────────────────

  pub fn remove(&mut self, id: AppointmentId) -> Result<Appointment> {
    let removed = self.index.remove(id)?;
    tracing::info!(%id, "appointment removed");
    Ok(removed)
  }

  pub fn set_status(&mut self, id: AppointmentId, status: AppointmentStatus) -> Result<&Appointment> {
    let updated = self.index.set_status(id, status)?;
    tracing::info!(%id, ?status, "appointment status changed");
    Ok(updated)
  }

  /// Overlapping same-professional pairs starting on `date`.
  pub fn conflicts_on(&self, date: NaiveDate) -> Vec<(&Appointment, &Appointment)> {
    self.index.conflicts_on(date)
  }
}
