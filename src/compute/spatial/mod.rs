//! Spatial computation over node trajectories.

pub mod density;
pub mod movement;
pub mod synchronize;

pub use density::{DensityGrid, estimate_density};
pub use movement::{MovementScore, color_domain, path_length, rank_movement, top_entities};
pub use synchronize::{EdgeGeometry, SyncedEdge, nearest_sample, synchronize_edges};
