//! Fleet commission engine
//!
//! This crate ranks a delivery fleet's workers by monthly occurrence count to
//! pick each worker's commission percentage, computes commission amounts, and
//! gates the weekly vehicle checklist each driver owes on an assigned weekday.
//!
//! The rules live in [`calculation`] as pure functions; [`service`] wires them
//! to a [`store::RecordStore`] and [`api`] exposes them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod telemetry;
