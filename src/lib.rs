//! Payroll and financial rollup engine for tea estates.
//!
//! This crate prices daily plucking and advance entries, aggregates them over
//! reporting periods, and rolls them up with tea sales and bonuses into the
//! revenue, expenses and profit figures of an estate's dashboard.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
