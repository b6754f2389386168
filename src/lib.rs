//! Analytics core for exploring temporal graphs: trajectory resampling,
//! edge synchronization, movement ranking, and common-activity intervals.
//!
//! ```rust
//! use chronograph::{Config, Explorer, GraphBuilder, IntervalRecord, Point};
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_node_record("a", "Alice", IntervalRecord::new(0.0, 10.0, Point::new(0.0, 0.0), Point::new(10.0, 0.0)))?;
//! builder.add_node_record("a", "Alice", IntervalRecord::new(10.0, 20.0, Point::new(10.0, 0.0), Point::new(10.0, 10.0)))?;
//! builder.add_node_record("b", "Bob", IntervalRecord::new(5.0, 15.0, Point::new(0.0, 5.0), Point::new(3.0, 9.0)))?;
//! builder.add_edge_presence("ab", "a", "b", (6.0, 12.0))?;
//!
//! let mut explorer = Explorer::load(builder.build(), Config::default().with_auto_pin_count(2))?;
//! let view = explorer.view();
//! assert_eq!(view.movement[0].id.as_str(), "a");
//! assert_eq!(view.common_intervals.len(), 2);
//!
//! explorer.set_window(0.0, 12.0)?;
//! assert_eq!(explorer.view().score("a"), Some(10.0));
//! # Ok::<(), chronograph::ChronoError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod graph;
pub mod selection;
pub mod state;
pub mod view;

pub use builder::GraphBuilder;
pub use config::Config;
pub use error::{ChronoError, Result};
pub use graph::ingest::{IntervalRecord, RawDataset};
pub use graph::{Edge, Graph, Node, PresenceSample};
pub use selection::{Selection, SelectionEntry};
pub use state::{Explorer, WindowState};
pub use view::{DerivedView, TrajectorySegment, derive_view};

#[cfg(feature = "sync")]
pub use state::sync::SyncExplorer;

pub use chronograph_types::{EntityId, Interval, Sample, Window};
pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ChronoError, Config, Explorer, GraphBuilder, IntervalRecord, Result};

    pub use crate::{DerivedView, Graph, Selection, WindowState};

    pub use crate::{EntityId, Interval, Point, Sample, Window};

    #[cfg(feature = "sync")]
    pub use crate::SyncExplorer;
}
