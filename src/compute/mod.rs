//! Compute layer for the analytics pipeline.
//!
//! This module separates the temporal-geometric algorithms from state
//! management. It provides:
//! - Temporal algorithms: resampling, common-activity intersection, activity profile
//! - Spatial algorithms: movement scoring, edge synchronization, density estimation
//!
//! Every function here is pure: inputs are borrowed, outputs are new values.

pub mod spatial;
pub mod temporal;
