//! Data models used throughout the application
//!
//! This module contains the request envelopes and error bodies exchanged
//! with the Rosetta API.

// Rosetta request and error structures
pub mod rosetta;
