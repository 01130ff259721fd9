//! Calendar view state machine and its renderable projection.
//!
//! The view owns only `(mode, anchor)`; appointments are read from the store
//! on every [`CalendarViewModel::render`]. Rendering holds no cache, so the
//! same state over the same store always yields the same [`CalendarView`].

use agenda_core::{
  Error, Result,
  appointment::{Appointment, PresentationTag},
  availability::{SlotAvailability, WeeklyAvailability},
  calendar::{Direction, ViewMode},
  config::ScheduleConfig,
  store::AppointmentStore,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::{
  period::PeriodCalculator,
  time_axis::{HourRow, TimeAxis, fractional_hour},
};

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarViewState {
  pub mode:   ViewMode,
  /// Date the visible period is computed from. Only navigation moves it.
  pub anchor: NaiveDate,
}

// ─── Rendered output ─────────────────────────────────────────────────────────

/// Absolute position of an appointment box inside its day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
  pub top_px:    f64,
  pub height_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
  pub appointment: Appointment,
  pub tag:         PresentationTag,
  /// `None` in month view and for appointments starting outside the visible
  /// hours.
  pub geometry:    Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
  pub date:     NaiveDate,
  /// False for the leading and trailing days of a month grid.
  pub in_focus: bool,
  /// Availability per hour row; empty without an availability window and in
  /// month view.
  pub slots:    Vec<SlotAvailability>,
  /// Sorted by start time, ties in insertion order.
  pub entries:  Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarView {
  pub mode:   ViewMode,
  pub anchor: NaiveDate,
  /// First and last date of the period (not of the padded month grid).
  pub range:  (NaiveDate, NaiveDate),
  /// Hour rows of the time grid; empty in month view.
  pub rows:   Vec<HourRow>,
  pub days:   Vec<DayColumn>,
}

// ─── View model ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CalendarViewModel {
  state:           CalendarViewState,
  periods:         PeriodCalculator,
  axis:            TimeAxis,
  full_month_grid: bool,
  availability:    Option<WeeklyAvailability>,
}

impl CalendarViewModel {
  /// Start in week view at `anchor`. Fails on a config the time axis
  /// rejects.
  pub fn new(config: &ScheduleConfig, anchor: NaiveDate) -> Result<Self> {
    Ok(Self {
      state:           CalendarViewState { mode: ViewMode::Week, anchor },
      periods:         PeriodCalculator::new(config.first_day_of_week),
      axis:            TimeAxis::new(config)?,
      full_month_grid: config.full_month_grid,
      availability:    None,
    })
  }

  /// Shade slots against a professional's working hours.
  pub fn with_availability(mut self, availability: WeeklyAvailability) -> Self {
    self.availability = Some(availability);
    self
  }

  pub fn state(&self) -> CalendarViewState { self.state }

  pub fn mode(&self) -> ViewMode { self.state.mode }

  pub fn anchor(&self) -> NaiveDate { self.state.anchor }

  pub fn axis(&self) -> &TimeAxis { &self.axis }

  pub fn periods(&self) -> &PeriodCalculator { &self.periods }

  pub fn availability(&self) -> Option<&WeeklyAvailability> { self.availability.as_ref() }

  // ── Transitions ───────────────────────────────────────────────────────

  pub fn set_mode(&mut self, mode: ViewMode) {
    tracing::debug!(from = %self.state.mode, to = %mode, "view mode changed");
    self.state.mode = mode;
  }

  pub fn navigate(&mut self, direction: Direction) {
    let next = self.periods.advance(self.state.anchor, self.state.mode, direction);
    tracing::debug!(mode = %self.state.mode, %direction, from = %self.state.anchor, to = %next, "navigate");
    self.state.anchor = next;
  }

  pub fn jump_to(&mut self, today: NaiveDate) { self.state.anchor = today; }

  /// Drill down from a month cell into that day.
  pub fn select_month_cell(&mut self, date: NaiveDate) -> Result<()> {
    if self.state.mode != ViewMode::Month {
      return Err(Error::NotMonthView(self.state.mode));
    }
    self.state = CalendarViewState { mode: ViewMode::Day, anchor: date };
    Ok(())
  }

  // ── Projection ────────────────────────────────────────────────────────

  /// Dates shown for the current state, in display order.
  pub fn visible_dates(&self) -> Vec<NaiveDate> {
    let anchor = self.state.anchor;
    match self.state.mode {
      ViewMode::Day => vec![anchor],
      ViewMode::Week => self.periods.week_dates(anchor).to_vec(),
      ViewMode::Month if self.full_month_grid => self.periods.month_grid_adaptive(anchor),
      ViewMode::Month => self.periods.month_grid(anchor).to_vec(),
    }
  }

  pub fn render<S: AppointmentStore + ?Sized>(&self, store: &S) -> CalendarView {
    let CalendarViewState { mode, anchor } = self.state;
    let grid = mode.has_time_grid();
    let rows = if grid { self.axis.hour_rows() } else { Vec::new() };

    let days = self
      .visible_dates()
      .into_iter()
      .map(|date| {
        let mut entries: Vec<CalendarEntry> = store
          .appointments_on(date)
          .into_iter()
          .map(|appointment| CalendarEntry {
            tag:         appointment.presentation_tag(),
            geometry:    if grid { self.place(appointment) } else { None },
            appointment: appointment.clone(),
          })
          .collect();
        entries.sort_by_key(|e| e.appointment.start);

        DayColumn {
          date,
          in_focus: mode != ViewMode::Month
            || (date.year() == anchor.year() && date.month() == anchor.month()),
          slots: if grid { self.slot_availability(date, &rows) } else { Vec::new() },
          entries,
        }
      })
      .collect();

    CalendarView {
      mode,
      anchor,
      range: self.periods.period_range(anchor, mode),
      rows,
      days,
    }
  }

  /// Box for an appointment in its start-date column. The bottom is cut at
  /// the end of the visible day.
  fn place(&self, appointment: &Appointment) -> Option<Geometry> {
    let start = fractional_hour(appointment.start.time());
    let top_px = match self.axis.time_to_offset(start) {
      Ok(px) if start < f64::from(self.axis.day_end()) => px,
      Ok(_) | Err(_) => {
        tracing::warn!(id = %appointment.id, start = %appointment.start, "appointment starts outside the visible hours");
        return None;
      }
    };
    let day_end = f64::from(self.axis.day_end());
    let end = if appointment.end.date() == appointment.start.date() {
      fractional_hour(appointment.end.time()).min(day_end)
    } else {
      day_end
    };
    Some(Geometry {
      top_px,
      height_px: (end - start) * self.axis.row_height(),
    })
  }

  fn slot_availability(&self, date: NaiveDate, rows: &[HourRow]) -> Vec<SlotAvailability> {
    let Some(availability) = &self.availability else {
      return Vec::new();
    };
    rows
      .iter()
      .map(|row| {
        // The 23:00 row of a grid ending at midnight closes at 23:59:59.
        let end = NaiveTime::from_hms_opt(row.hour + 1, 0, 0)
          .or_else(|| NaiveTime::from_hms_opt(23, 59, 59));
        match (NaiveTime::from_hms_opt(row.hour, 0, 0), end) {
          (Some(start), Some(end)) => availability.classify(date, start, end),
          _ => SlotAvailability::OutsideHours,
        }
      })
      .collect()
  }
}
