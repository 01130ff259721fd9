//! Pure civil-date arithmetic behind the three calendar projections.

use agenda_core::calendar::{Direction, ViewMode};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Cells in the fixed five-week month grid.
pub const MONTH_GRID_CELLS: usize = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCalculator {
  first_day: Weekday,
}

impl Default for PeriodCalculator {
  fn default() -> Self { Self { first_day: Weekday::Sun } }
}

impl PeriodCalculator {
  pub fn new(first_day: Weekday) -> Self { Self { first_day } }

  pub fn first_day(&self) -> Weekday { self.first_day }

  /// The configured first weekday on or before `date`.
  pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() + 7
      - self.first_day.num_days_from_monday())
      % 7;
    date
      .checked_sub_days(Days::new(u64::from(back)))
      .unwrap_or(date)
  }

  pub fn week_dates(&self, date: NaiveDate) -> [NaiveDate; 7] {
    consecutive(self.start_of_week(date))
  }

  /// Five weeks starting at the week of the first of the month.
  ///
  /// Months that begin late in the week and have 30 or 31 days spill into a
  /// sixth row; those trailing days are not part of this grid. See
  /// [`month_grid_adaptive`](Self::month_grid_adaptive) for the full cover.
  pub fn month_grid(&self, date: NaiveDate) -> [NaiveDate; MONTH_GRID_CELLS] {
    consecutive(self.start_of_week(first_of_month(date)))
  }

  /// 35 or 42 cells, whichever covers every day of the month.
  pub fn month_grid_adaptive(&self, date: NaiveDate) -> Vec<NaiveDate> {
    let start = self.start_of_week(first_of_month(date));
    let last = last_of_month(date);
    let cells = if (last - start).num_days() < MONTH_GRID_CELLS as i64 {
      MONTH_GRID_CELLS
    } else {
      42
    };
    start.iter_days().take(cells).collect()
  }

  /// Move one period forwards or backwards.
  ///
  /// Month steps keep the day of month where possible and otherwise clamp to
  /// the last day (Jan 31 → Feb 29 in leap years). Dates at the chrono
  /// bounds are returned unchanged.
  pub fn advance(&self, date: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    let moved = match (mode, direction) {
      (ViewMode::Day, Direction::Next) => date.checked_add_days(Days::new(1)),
      (ViewMode::Day, Direction::Prev) => date.checked_sub_days(Days::new(1)),
      (ViewMode::Week, Direction::Next) => date.checked_add_days(Days::new(7)),
      (ViewMode::Week, Direction::Prev) => date.checked_sub_days(Days::new(7)),
      (ViewMode::Month, Direction::Next) => date.checked_add_months(Months::new(1)),
      (ViewMode::Month, Direction::Prev) => date.checked_sub_months(Months::new(1)),
    };
    moved.unwrap_or(date)
  }

  /// First and last date of the period `date` belongs to in `mode`.
  pub fn period_range(&self, date: NaiveDate, mode: ViewMode) -> (NaiveDate, NaiveDate) {
    match mode {
      ViewMode::Day => (date, date),
      ViewMode::Week => {
        let week = self.week_dates(date);
        (week[0], week[6])
      }
      ViewMode::Month => (first_of_month(date), last_of_month(date)),
    }
  }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate { date.with_day(1).unwrap_or(date) }

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
  first_of_month(date)
    .checked_add_months(Months::new(1))
    .and_then(|d| d.pred_opt())
    .unwrap_or(date)
}

fn consecutive<const N: usize>(start: NaiveDate) -> [NaiveDate; N] {
  let mut out = [start; N];
  for (slot, day) in out.iter_mut().zip(start.iter_days()) {
    *slot = day;
  }
  out
}
