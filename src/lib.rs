//! Work-shift and time-slot engine for factory production forms.
//!
//! This crate resolves which time slots make up a shift, which slot is
//! current at a given moment, aligns hourly production counts to those
//! slots, and computes attendance and productivity statistics for a form.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod polling;
