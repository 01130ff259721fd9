//! Core types and trait definitions for the Agenda scheduling engine.
//!
//! This crate holds the data model shared by the engine and its hosts:
//! appointments, drafts, availability windows, the professional directory
//! and the store abstraction. It performs no I/O.

pub mod appointment;
pub mod availability;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod directory;
pub mod draft;
pub mod error;
pub mod identity;
pub mod store;

pub use error::{Error, Result, ValidationIssue};
