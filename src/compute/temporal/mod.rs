//! Temporal computation.
//!
//! - `interpolation`: linear resampling of interval samples to a fixed subdivision count
//! - `intersection`: multi-way sweep for spans where every selected entity is active
//! - `activity`: concurrent-activity profile over the whole dataset

pub mod activity;
pub mod intersection;
pub mod interpolation;

pub use activity::{ActivityPoint, activity_profile};
pub use intersection::{common_intervals, merge_adjacent};
pub use interpolation::{resample_graph, resample_node};
