//! Shared types and pure logic for the docpulse polling subsystem.
//!
//! This crate contains no I/O: document identifiers, probe outcome and
//! payload types, session status, the result-merge function, and polling
//! configuration. The [`probe::Prober`] trait is the seam between this
//! crate and the HTTP client in `docpulse-client`.

pub mod config;
pub mod merge;
pub mod payload;
pub mod probe;
pub mod status;
pub mod types;
