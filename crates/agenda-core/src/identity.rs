//! Sources of appointment ids and meeting-room tokens.
//!
//! Tokens only need to be unique enough to keep two rooms apart; they are
//! not secrets.

use rand_core::{OsRng, RngCore};
use uuid::Uuid;

use crate::appointment::AppointmentId;

pub trait IdentitySource {
  fn appointment_id(&mut self) -> AppointmentId;

  /// A URL-safe token to embed in a meeting URI.
  fn meeting_token(&mut self) -> String;
}

/// Random v4 ids and hex tokens from the OS RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentity;

impl IdentitySource for RandomIdentity {
  fn appointment_id(&mut self) -> AppointmentId { AppointmentId(Uuid::new_v4()) }

  fn meeting_token(&mut self) -> String {
    let mut bytes = [0u8; 8];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
  }
}

/// Counts upwards from one; ids and tokens are predictable.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdentity {
  next_id:    u128,
  next_token: u64,
}

impl SequentialIdentity {
  pub fn new() -> Self { Self::default() }
}

impl IdentitySource for SequentialIdentity {
  fn appointment_id(&mut self) -> AppointmentId {
    self.next_id += 1;
    AppointmentId(Uuid::from_u128(self.next_id))
  }

  fn meeting_token(&mut self) -> String {
    self.next_token += 1;
    format!("room-{:04}", self.next_token)
  }
}
