//! Host-tunable scheduling constants.

use chrono::{Duration, Weekday};
use serde::Deserialize;

use crate::{Error, Result};

/// Placeholder replaced by a generated token in [`ScheduleConfig::meeting_uri_template`].
pub const TOKEN_PLACEHOLDER: &str = "{token}";

/// Scheduling configuration, deserialised from `agenda.toml` or built with
/// [`Default`]. Missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
  /// First visible hour of the day/week grid.
  pub day_start:                u32,
  /// Hour at which the grid ends (exclusive for slots, inclusive for edges).
  pub day_end:                  u32,
  pub row_height_px:            f64,
  /// Height of the column header sitting above the first hour row.
  pub header_height_px:         f64,
  /// Click granularity inside an hour row.
  pub slot_minutes:             u32,
  pub first_day_of_week:        Weekday,
  pub default_duration_minutes: u32,
  /// Render six-row months in full instead of the fixed five-week grid.
  pub full_month_grid:          bool,
  /// Title given to blocks saved without one.
  pub block_label:              String,
  pub meeting_uri_template:     String,
}

impl Default for ScheduleConfig {
  fn default() -> Self {
    Self {
      day_start:                8,
      day_end:                  19,
      row_height_px:            60.0,
      header_height_px:         40.0,
      slot_minutes:             60,
      first_day_of_week:        Weekday::Sun,
      default_duration_minutes: 60,
      full_month_grid:          false,
      block_label:              "Blocked".into(),
      meeting_uri_template:     "https://meet.jit.si/clinic-{token}".into(),
    }
  }
}

impl ScheduleConfig {
  /// Reject combinations the time axis cannot represent.
  pub fn validate(&self) -> Result<()> {
    let fail = |msg: String| Err(Error::InvalidConfig(msg));

    if self.day_start >= self.day_end || self.day_end > 24 {
      return fail(format!(
        "visible hours {}..{} must satisfy start < end <= 24",
        self.day_start, self.day_end
      ));
    }
    if !(self.row_height_px > 0.0) {
      return fail(format!("row height must be positive, got {}", self.row_height_px));
    }
    if !(self.header_height_px >= 0.0) {
      return fail(format!(
        "header height must not be negative, got {}",
        self.header_height_px
      ));
    }
    if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
      return fail(format!("slot size {} does not divide an hour", self.slot_minutes));
    }
    if self.default_duration_minutes == 0 {
      return fail("default duration must be at least one minute".into());
    }
    if !self.meeting_uri_template.contains(TOKEN_PLACEHOLDER) {
      return fail(format!(
        "meeting URI template must contain {TOKEN_PLACEHOLDER}"
      ));
    }
    Ok(())
  }

  pub fn default_duration(&self) -> Duration {
    Duration::minutes(i64::from(self.default_duration_minutes))
  }

  pub fn meeting_uri(&self, token: &str) -> String {
    self.meeting_uri_template.replace(TOKEN_PLACEHOLDER, token)
  }
}
