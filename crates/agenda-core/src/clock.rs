//! Wall-clock access, injectable so "today" and "now" are testable.

use chrono::{Local, NaiveDate, NaiveDateTime};

pub trait Clock {
  /// Current civil date and time in the configured locale.
  fn now(&self) -> NaiveDateTime;

  fn today(&self) -> NaiveDate { self.now().date() }
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime { Local::now().naive_local() }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
  fn now(&self) -> NaiveDateTime { self.0 }
}
