//! [`AppointmentIndex`]: the in-memory implementation of [`AppointmentStore`].

use agenda_core::{
  Error, Result,
  appointment::{Appointment, AppointmentId, AppointmentPatch, AppointmentStatus, ProfessionalId},
  store::{AppointmentQuery, AppointmentStore},
};
use chrono::{NaiveDate, NaiveDateTime};

/// Insertion-ordered appointment collection.
///
/// Double-booking is permitted: two appointments of the same professional may
/// share or overlap a range. Conflicts are reported by
/// [`AppointmentStore::overlapping`], never enforced on insert.
#[derive(Debug, Clone, Default)]
pub struct AppointmentIndex {
  items: Vec<Appointment>,
}

fn check_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
  if end <= start {
    return Err(Error::InvalidRange { start, end });
  }
  Ok(())
}

impl AppointmentIndex {
  pub fn new() -> Self { Self::default() }

  /// Build an index from an initial sequence, rejecting the first invalid
  /// entry.
  pub fn from_appointments(appointments: impl IntoIterator<Item = Appointment>) -> Result<Self> {
    let mut index = Self::new();
    for appointment in appointments {
      index.insert(appointment)?;
    }
    Ok(index)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Appointment> { self.items.iter() }

  fn position(&self, id: AppointmentId) -> Result<usize> {
    self
      .items
      .iter()
      .position(|a| a.id == id)
      .ok_or(Error::AppointmentNotFound(id))
  }

  /// Appointments starting on a date in `[from, to]`, in insertion order.
  pub fn in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Appointment> {
    self.search(&AppointmentQuery { from: Some(from), to: Some(to), ..Default::default() })
  }

  pub fn set_status(&mut self, id: AppointmentId, status: AppointmentStatus) -> Result<&Appointment> {
    self.update(id, AppointmentPatch::status(status))
  }

  /// Every pair of overlapping appointments of the same professional that
  /// starts on `date`.
  pub fn conflicts_on(&self, date: NaiveDate) -> Vec<(&Appointment, &Appointment)> {
    let day = self.appointments_on(date);
    let mut pairs = Vec::new();
    for (i, a) in day.iter().enumerate() {
      for b in &day[i + 1..] {
        if a.professional_id == b.professional_id && a.overlaps(b.start, b.end) {
          pairs.push((*a, *b));
        }
      }
    }
    pairs
  }
}

impl AppointmentStore for AppointmentIndex {
  fn insert(&mut self, appointment: Appointment) -> Result<()> {
    check_range(appointment.start, appointment.end)?;
    if self.items.iter().any(|a| a.id == appointment.id) {
      return Err(Error::DuplicateAppointment(appointment.id));
    }
    self.items.push(appointment);
    Ok(())
  }

  fn remove(&mut self, id: AppointmentId) -> Result<Appointment> {
    let pos = self.position(id)?;
    Ok(self.items.remove(pos))
  }

  fn update(&mut self, id: AppointmentId, patch: AppointmentPatch) -> Result<&Appointment> {
    let pos = self.position(id)?;
    let current = &self.items[pos];
    let start = patch.start.unwrap_or(current.start);
    let end = patch.end.unwrap_or(current.end);
    check_range(start, end)?;

    let item = &mut self.items[pos];
    item.start = start;
    item.end = end;
    if let Some(title) = patch.title {
      item.title = title;
    }
    if let Some(professional_id) = patch.professional_id {
      item.professional_id = professional_id;
    }
    if let Some(kind) = patch.kind {
      item.kind = kind;
    }
    if let Some(status) = patch.status {
      item.status = status;
    }
    Ok(&*item)
  }

  fn get(&self, id: AppointmentId) -> Option<&Appointment> {
    self.items.iter().find(|a| a.id == id)
  }

  fn appointments_on(&self, date: NaiveDate) -> Vec<&Appointment> {
    self.items.iter().filter(|a| a.date() == date).collect()
  }

  fn overlapping(
    &self,
    professional_id: &ProfessionalId,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Vec<&Appointment> {
    self
      .items
      .iter()
      .filter(|a| a.professional_id == *professional_id && a.overlaps(start, end))
      .collect()
  }

  fn search(&self, query: &AppointmentQuery) -> Vec<&Appointment> {
    self.items.iter().filter(|a| query.matches(a)).collect()
  }

  fn len(&self) -> usize { self.items.len() }
}
