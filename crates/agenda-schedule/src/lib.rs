//! Scheduling engine for the clinic agenda.
//!
//! Pure, synchronous components layered over the `agenda-core` types: the
//! time axis and period arithmetic, the in-memory appointment index, the
//! calendar view model, the slot/draft controller and the appointment
//! factory. [`Agenda`] composes them for a host screen.

mod agenda;

pub mod factory;
pub mod index;
pub mod period;
pub mod slot;
pub mod time_axis;
pub mod view;

pub use agenda::Agenda;
pub use agenda_core::{Error, Result};
pub use factory::{AppointmentFactory, Booking};
pub use index::AppointmentIndex;
pub use view::{CalendarView, CalendarViewModel};

#[cfg(test)]
mod tests;
