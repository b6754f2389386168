//! # chronograph-types
//!
//! Core temporal data types for the chronograph analytics core.
//!
//! This crate provides the value types shared by every stage of the pipeline:
//!
//! - **Identity**: `EntityId`
//! - **Samples**: `Sample`, a timestamped position with its derived age
//! - **Time spans**: `Window` (observed slice) and `Interval` (activity span)
//!
//! All types are serializable with Serde and positions are built on top of the
//! `geo` crate's `Point`.
//!
//! ## Examples
//!
//! ```rust
//! use chronograph_types::sample::Sample;
//! use chronograph_types::window::Window;
//! use geo::Point;
//!
//! let sample = Sample::new(4.0, Point::new(1.0, 2.0), 4.0);
//! let window = Window::new(0.0, 10.0).unwrap();
//! assert!(window.contains(sample.time));
//! ```

pub mod id;
pub mod sample;
pub mod window;

pub use id::EntityId;
pub use sample::Sample;
pub use window::{Interval, Window};
