//! Law-office efficiency calculator.
//!
//! Turns a handful of office inputs (profile, caseload, staff, routine
//! minutes, automation level) into monthly lost hours and lost cost,
//! plus three comparison series for chart widgets.
//!
//! FLOW (one reactive cycle, no intermediate states):
//!   input changes -> engine::MetricsEngine -> series::ComparisonSet
//!                 -> report::CalcReport -> observer

pub mod catalog;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod report;
pub mod series;
pub mod session;
pub mod types;
