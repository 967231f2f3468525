//! HTTP client for the document-processing backend.
//!
//! Wraps the backend's read-only status endpoints with [`reqwest`] and
//! provides [`prober::HttpProber`], the network implementation of the
//! [`docpulse_core::probe::Prober`] seam.

pub mod api;
pub mod prober;
