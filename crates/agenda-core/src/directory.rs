//! Professional directory. Resolves professional ids to display names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::appointment::ProfessionalId;

/// Read-only lookup supplied by the host application.
pub trait ProfessionalDirectory {
  fn display_name(&self, id: &ProfessionalId) -> Option<&str>;

  fn contains(&self, id: &ProfessionalId) -> bool { self.display_name(id).is_some() }
}

impl ProfessionalDirectory for HashMap<ProfessionalId, String> {
  fn display_name(&self, id: &ProfessionalId) -> Option<&str> {
    self.get(id).map(String::as_str)
  }
}

/// A plain in-memory directory, deserialisable from `{ "id": "name" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
  entries: HashMap<ProfessionalId, String>,
}

impl Directory {
  pub fn new() -> Self { Self::default() }

  pub fn with(mut self, id: impl Into<ProfessionalId>, name: impl Into<String>) -> Self {
    self.insert(id, name);
    self
  }

  pub fn insert(&mut self, id: impl Into<ProfessionalId>, name: impl Into<String>) {
    self.entries.insert(id.into(), name.into());
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Entries in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (&ProfessionalId, &str)> {
    self.entries.iter().map(|(id, name)| (id, name.as_str()))
  }
}

impl ProfessionalDirectory for Directory {
  fn display_name(&self, id: &ProfessionalId) -> Option<&str> {
    self.entries.display_name(id)
  }
}

impl FromIterator<(ProfessionalId, String)> for Directory {
  fn from_iter<T: IntoIterator<Item = (ProfessionalId, String)>>(iter: T) -> Self {
    Self { entries: iter.into_iter().collect() }
  }
}
