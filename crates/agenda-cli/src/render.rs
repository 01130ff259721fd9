//! Plain-text rendering of calendar views for the terminal.

use std::fmt::Write as _;

use agenda_core::{
  appointment::{Appointment, AppointmentStatus, PresentationTag},
  availability::SlotAvailability,
  calendar::ViewMode,
  directory::ProfessionalDirectory,
};
use agenda_schedule::{
  Booking,
  view::{CalendarEntry, CalendarView, DayColumn},
};
use chrono::{Datelike, NaiveDate, Timelike};

// ─── Labels ───────────────────────────────────────────────────────────────────

fn tag_label(tag: PresentationTag) -> &'static str {
  match tag {
    PresentationTag::Block => "block",
    PresentationTag::InPerson => "in person",
    PresentationTag::Remote => "remote",
    PresentationTag::Default => "consult",
  }
}

fn availability_mark(slot: SlotAvailability) -> char {
  match slot {
    SlotAvailability::Available => ' ',
    SlotAvailability::OnBreak => '~',
    SlotAvailability::OutsideHours => '.',
    SlotAvailability::DayOff => 'x',
  }
}

fn professional_name<'a, D: ProfessionalDirectory + ?Sized>(
  directory: &'a D,
  appointment: &'a Appointment,
) -> &'a str {
  directory
    .display_name(&appointment.professional_id)
    .unwrap_or(&appointment.professional_id.0)
}

fn entry_line<D: ProfessionalDirectory + ?Sized>(entry: &CalendarEntry, directory: &D) -> String {
  let a = &entry.appointment;
  let mut line = format!(
    "{}-{}  [{}]  {}  ({})",
    a.start.format("%H:%M"),
    a.end.format("%H:%M"),
    tag_label(entry.tag),
    a.title,
    professional_name(directory, a),
  );
  if let Some(patient) = a.kind.patient_id()
    && patient.0 != a.title
  {
    let _ = write!(line, "  #{patient}");
  }
  if let Some(link) = a.kind.meeting_reference() {
    let _ = write!(line, "  {link}");
  }
  match a.status {
    AppointmentStatus::Scheduled => {}
    AppointmentStatus::Completed => line.push_str("  (completed)"),
    AppointmentStatus::Canceled => line.push_str("  (canceled)"),
  }
  line
}

// ─── Views ────────────────────────────────────────────────────────────────────

pub fn calendar<D: ProfessionalDirectory + ?Sized>(
  view: &CalendarView,
  directory: &D,
  now: Option<(NaiveDate, f64)>,
) -> String {
  let mut out = String::new();
  let (first, last) = view.range;
  let _ = match view.mode {
    ViewMode::Day => writeln!(out, "{}", first.format("%A %Y-%m-%d")),
    ViewMode::Week => writeln!(out, "Week {first} .. {last}"),
    ViewMode::Month => writeln!(out, "{}", view.anchor.format("%B %Y")),
  };

  match view.mode {
    ViewMode::Day => {
      if let Some(column) = view.days.first() {
        day_grid(&mut out, view, column, directory, now);
      }
    }
    ViewMode::Week => {
      for column in &view.days {
        day_list(&mut out, column, directory);
      }
    }
    ViewMode::Month => month_grid(&mut out, view),
  }
  out
}

/// One line per hour row, appointments listed under the row they start in.
fn day_grid<D: ProfessionalDirectory + ?Sized>(
  out: &mut String,
  view: &CalendarView,
  column: &DayColumn,
  directory: &D,
  now: Option<(NaiveDate, f64)>,
) {
  let now_px = now.filter(|(date, _)| *date == column.date).map(|(_, px)| px);
  let row_height = match view.rows.as_slice() {
    [a, b, ..] => b.top_px - a.top_px,
    _ => 0.0,
  };

  for (i, row) in view.rows.iter().enumerate() {
    let mark = column
      .slots
      .get(i)
      .map_or(' ', |slot| availability_mark(*slot));
    let here = now_px.is_some_and(|px| px >= row.top_px && px < row.top_px + row_height);
    let _ = writeln!(
      out,
      "{:02}:00 {mark}|{}",
      row.hour,
      if here { " <- now" } else { "" }
    );
    for entry in column
      .entries
      .iter()
      .filter(|e| e.geometry.is_some() && e.appointment.start.hour() == row.hour)
    {
      let _ = writeln!(out, "        {}", entry_line(entry, directory));
    }
  }

  let off_grid: Vec<_> = column
    .entries
    .iter()
    .filter(|e| e.geometry.is_none())
    .collect();
  if !off_grid.is_empty() {
    let _ = writeln!(out, "outside visible hours:");
    for entry in off_grid {
      let _ = writeln!(out, "        {}", entry_line(entry, directory));
    }
  }
}

fn day_list<D: ProfessionalDirectory + ?Sized>(out: &mut String, column: &DayColumn, directory: &D) {
  let off = !column.slots.is_empty()
    && column.slots.iter().all(|s| *s == SlotAvailability::DayOff);
  let _ = writeln!(
    out,
    "{}{}",
    column.date.format("%a %Y-%m-%d"),
    if off { "  (day off)" } else { "" }
  );
  if column.entries.is_empty() {
    let _ = writeln!(out, "  -");
  }
  for entry in &column.entries {
    let _ = writeln!(out, "  {}", entry_line(entry, directory));
  }
}

/// Seven columns; each cell shows the day of month and the number of
/// appointments. Days outside the month are bracketed.
fn month_grid(out: &mut String, view: &CalendarView) {
  for column in view.days.iter().take(7) {
    let _ = write!(out, " {:<7} ", column.date.format("%a"));
  }
  out.push('\n');
  for week in view.days.chunks(7) {
    for column in week {
      let day = column.date.day();
      let cell = if column.in_focus { format!(" {day:>2} ") } else { format!("({day:>2})") };
      let count = match column.entries.len() {
        0 => "   ".to_owned(),
        n => format!("+{n:<2}"),
      };
      let _ = write!(out, "{cell}{count} ");
    }
    out.push('\n');
  }
}

// ─── Reports ──────────────────────────────────────────────────────────────────

pub fn booking(booking: &Booking) -> String {
  let a = &booking.appointment;
  let mut out = format!(
    "Booked {} {}-{} ({} min) [{}] {} with {}\n",
    a.date(),
    a.start.format("%H:%M"),
    a.end.format("%H:%M"),
    a.duration_minutes(),
    tag_label(booking.tag),
    a.title,
    booking.professional_name,
  );
  if let Some(link) = a.kind.meeting_reference() {
    let _ = writeln!(out, "Meeting link: {link}");
  }
  let _ = writeln!(out, "Id: {}", a.id);
  out
}

pub fn conflicts<D: ProfessionalDirectory + ?Sized>(
  pairs: &[(&Appointment, &Appointment)],
  directory: &D,
) -> String {
  let mut out = String::new();
  for (a, b) in pairs {
    let _ = writeln!(
      out,
      "{}: {} {}-{} overlaps {} {}-{}",
      professional_name(directory, a),
      a.title,
      a.start.format("%H:%M"),
      a.end.format("%H:%M"),
      b.title,
      b.start.format("%H:%M"),
      b.end.format("%H:%M"),
    );
  }
  out
}
