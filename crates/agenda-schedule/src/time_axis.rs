//! Vertical time axis of the day and week grids.
//!
//! Maps an hour of the day onto a pixel offset from the top of the column
//! (header included) and back. Times outside the visible window are rejected
//! rather than clamped, so an early appointment can never be drawn over the
//! header.

use agenda_core::{Error, Result, config::ScheduleConfig};
use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// Guards `floor` against values like 13.999999999 produced by division.
const EPSILON: f64 = 1e-9;

/// One hour row of the grid, as the renderer lays it out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourRow {
  pub hour:   u32,
  pub top_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
  day_start:     u32,
  day_end:       u32,
  row_height:    f64,
  header_height: f64,
  slot_minutes:  u32,
}

/// `14:30` → `14.5`.
pub fn fractional_hour(time: NaiveTime) -> f64 {
  f64::from(time.hour())
    + f64::from(time.minute()) / 60.0
    + f64::from(time.second()) / 3600.0
}

impl TimeAxis {
  /// Fails with [`Error::InvalidConfig`] when the visible hours or the slot
  /// size cannot be laid out.
  pub fn new(config: &ScheduleConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      day_start:     config.day_start,
      day_end:       config.day_end,
      row_height:    config.row_height_px,
      header_height: config.header_height_px,
      slot_minutes:  config.slot_minutes,
    })
  }

  pub fn day_start(&self) -> u32 { self.day_start }

  pub fn day_end(&self) -> u32 { self.day_end }

  pub fn row_height(&self) -> f64 { self.row_height }

  /// Total column height, header included.
  pub fn grid_height(&self) -> f64 {
    self.header_height + f64::from(self.day_end - self.day_start) * self.row_height
  }

  fn out_of_range(&self, hour: f64) -> Error {
    Error::TimeOutOfRange {
      hour,
      day_start: self.day_start,
      day_end: self.day_end,
    }
  }

  /// `header + (hour - day_start) * row_height`.
  ///
  /// `hour` may be fractional and may equal `day_end` (the bottom edge).
  pub fn time_to_offset(&self, hour: f64) -> Result<f64> {
    if !(hour >= f64::from(self.day_start) && hour <= f64::from(self.day_end)) {
      return Err(self.out_of_range(hour));
    }
    Ok(self.header_height + (hour - f64::from(self.day_start)) * self.row_height)
  }

  pub fn time_of_day_to_offset(&self, time: NaiveTime) -> Result<f64> {
    self.time_to_offset(fractional_hour(time))
  }

  /// Inverse of [`time_to_offset`](Self::time_to_offset), floored to the
  /// configured slot granularity.
  ///
  /// Offsets inside the header or at/after the bottom edge do not name a
  /// slot and are rejected.
  pub fn offset_to_hour(&self, px: f64) -> Result<f64> {
    let rel = (px - self.header_height) / self.row_height;
    let span = f64::from(self.day_end - self.day_start);
    if !(rel >= 0.0 && rel < span) {
      return Err(Error::OffsetOutOfRange(px));
    }
    let slots_per_hour = 60.0 / f64::from(self.slot_minutes);
    let hour = f64::from(self.day_start) + rel;
    Ok((hour * slots_per_hour + EPSILON).floor() / slots_per_hour)
  }

  /// Like [`offset_to_hour`](Self::offset_to_hour) but as a wall-clock time.
  pub fn offset_to_time(&self, px: f64) -> Result<NaiveTime> {
    let hour = self.offset_to_hour(px)?;
    let minutes = (hour * 60.0).round() as u32;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).ok_or(Error::OffsetOutOfRange(px))
  }

  /// Whether a slot may start at `hour` (the bottom edge cannot).
  pub fn contains_slot(&self, hour: u32) -> bool {
    hour >= self.day_start && hour < self.day_end
  }

  pub fn hour_rows(&self) -> Vec<HourRow> {
    (self.day_start..self.day_end)
      .map(|hour| HourRow {
        hour,
        top_px: self.header_height
          + f64::from(hour - self.day_start) * self.row_height,
      })
      .collect()
  }

  /// Offset of the current-time line, or `None` while outside the window.
  ///
  /// Pure; the host decides how often to call it.
  pub fn now_indicator(&self, now: NaiveTime) -> Option<f64> {
    self.time_of_day_to_offset(now).ok()
  }
}
