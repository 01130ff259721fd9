//! View granularity and navigation direction.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which projection of the calendar is active.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
  Day,
  #[default]
  Week,
  Month,
}

impl ViewMode {
  /// Day and week views are hour grids; month view is a date matrix.
  pub fn has_time_grid(self) -> bool { !matches!(self, Self::Month) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
  Prev,
  Next,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn view_mode_parses_case_insensitively() {
    assert_eq!(ViewMode::from_str("Month").unwrap(), ViewMode::Month);
    assert_eq!(ViewMode::from_str("day").unwrap(), ViewMode::Day);
    assert!(ViewMode::from_str("year").is_err());
    assert_eq!(ViewMode::Week.to_string(), "week");
  }
}
