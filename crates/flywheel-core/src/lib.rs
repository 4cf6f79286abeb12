//! Flywheel Core Types and Definitions
//!
//! This crate provides the foundational types for the Flywheel state-machine
//! editor model. It includes:
//!
//! - **Geometry**: Basic geometric value types and the per-item geometry
//!   records carried by diagram documents ([`geometry`] module)
//! - **Identifiers**: The identifier registry with collision resolution and
//!   fresh-identifier generation ([`identifier`] module)

pub mod geometry;
pub mod identifier;
