//! Weekly working hours of a professional.
//!
//! Maintained by the profile editor; the scheduler only reads it to flag
//! slots and drafts that fall outside working time. Nothing here blocks a
//! booking.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Working window for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
  pub weekday:     Weekday,
  #[serde(default = "default_active")]
  pub active:      bool,
  pub work_start:  NaiveTime,
  pub work_end:    NaiveTime,
  #[serde(default)]
  pub break_start: Option<NaiveTime>,
  #[serde(default)]
  pub break_end:   Option<NaiveTime>,
}

fn default_active() -> bool { true }

impl WorkingDay {
  fn break_window(&self) -> Option<(NaiveTime, NaiveTime)> {
    match (self.break_start, self.break_end) {
      (Some(s), Some(e)) if s < e => Some((s, e)),
      _ => None,
    }
  }
}

/// How a time range relates to the professional's working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAvailability {
  Available,
  OutsideHours,
  OnBreak,
  /// The weekday is inactive or not configured at all.
  DayOff,
}

impl SlotAvailability {
  pub fn is_available(self) -> bool { matches!(self, Self::Available) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
  days: Vec<WorkingDay>,
}

impl WeeklyAvailability {
  /// Later entries for the same weekday replace earlier ones.
  pub fn new(days: impl IntoIterator<Item = WorkingDay>) -> Self {
    let mut out = Self::default();
    for day in days {
      out.days.retain(|d| d.weekday != day.weekday);
      out.days.push(day);
    }
    out
  }

  pub fn day(&self, weekday: Weekday) -> Option<&WorkingDay> {
    self.days.iter().rev().find(|d| d.weekday == weekday)
  }

  /// Classify the half-open range `[start, end)` on `date`.
  ///
  /// A range touching a break counts as `OnBreak` even if it also covers
  /// working time.
  pub fn classify(
    &self,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
  ) -> SlotAvailability {
    let Some(day) = self.day(date.weekday()).filter(|d| d.active) else {
      return SlotAvailability::DayOff;
    };
    if start < day.work_start || end > day.work_end || end <= start {
      return SlotAvailability::OutsideHours;
    }
    if let Some((bs, be)) = day.break_window()
      && start < be
      && bs < end
    {
      return SlotAvailability::OnBreak;
    }
    SlotAvailability::Available
  }
}
