//! fieldmerge Test Harness - Fixtures, generators and reconciliation scenarios
//!
//! This crate provides:
//! - Calendar, rental and property-matrix fixtures
//! - A field-by-field event resolver
//! - Seeded random record generation
//! - End-to-end scenario tests across diff, change set and merge set

pub mod fixtures;
pub mod generator;
mod scenarios;

pub use fixtures::*;
pub use generator::*;
