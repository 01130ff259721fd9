//! The JSON data file read at startup.

use std::{collections::HashMap, path::Path};

use agenda_core::{
  appointment::{Appointment, ProfessionalId},
  availability::WeeklyAvailability,
  directory::Directory,
};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Shape of `--data`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct DataFile {
  #[serde(default)]
  pub professionals: Directory,
  #[serde(default)]
  pub availability:  HashMap<ProfessionalId, WeeklyAvailability>,
  #[serde(default)]
  pub appointments:  Vec<Appointment>,
}

impl DataFile {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading data file {}", path.display()))?;
    serde_json::from_str(&raw)
      .with_context(|| format!("parsing data file {}", path.display()))
  }

  /// Lowest professional id, so the choice is stable across runs.
  pub fn default_professional(&self) -> Option<ProfessionalId> {
    self
      .professionals
      .iter()
      .map(|(id, _)| id)
      .min_by(|a, b| a.0.cmp(&b.0))
      .cloned()
  }
}

#[cfg(test)]
mod tests {
  use agenda_core::{appointment::PresentationTag, directory::ProfessionalDirectory};
  use chrono::Weekday;

  use super::*;

  const SAMPLE: &str = r#"{
    "professionals": { "p2": "Dr. Rafael Costa", "p1": "Dr. Helena Souza" },
    "availability": {
      "p1": [
        { "weekday": "Wed", "work_start": "08:00:00", "work_end": "17:00:00",
          "break_start": "12:00:00", "break_end": "13:00:00" }
      ]
    },
    "appointments": [
      { "id": "6f1c1d8e-0000-4000-8000-000000000001",
        "start": "2024-06-12T09:00:00", "end": "2024-06-12T10:00:00",
        "title": "Ana Lima", "professional_id": "p1",
        "type": "consultation", "modality": { "type": "in_person" } },
      { "id": "6f1c1d8e-0000-4000-8000-000000000002",
        "start": "2024-06-12T12:00:00", "end": "2024-06-12T13:00:00",
        "title": "Lunch", "professional_id": "p2", "type": "block" }
    ]
  }"#;

  #[test]
  fn parses_all_sections() {
    let data: DataFile = serde_json::from_str(SAMPLE).unwrap();
    assert_eq!(data.professionals.display_name(&"p1".into()), Some("Dr. Helena Souza"));
    let hours = &data.availability[&ProfessionalId::from("p1")];
    assert!(hours.day(Weekday::Wed).is_some_and(|d| d.active));
    assert_eq!(data.appointments.len(), 2);
    assert_eq!(data.appointments[1].presentation_tag(), PresentationTag::Block);
  }

  #[test]
  fn empty_object_is_valid() {
    let data: DataFile = serde_json::from_str("{}").unwrap();
    assert!(data.professionals.is_empty());
    assert_eq!(data.default_professional(), None);
  }

  #[test]
  fn default_professional_is_lowest_id() {
    let data: DataFile = serde_json::from_str(SAMPLE).unwrap();
    assert_eq!(data.default_professional(), Some(ProfessionalId::from("p1")));
  }
}
