//! Window and selection state over a loaded graph.
//!
//! [`Explorer`] owns the immutable source graph, the current window, the
//! selection, and the last published [`DerivedView`]. Every trigger rebuilds
//! the view from scratch and swaps it in only once it is complete.

#[cfg(feature = "sync")]
pub mod sync;

use crate::compute::spatial::{MovementScore, rank_movement, top_entities};
use crate::compute::temporal::{ActivityPoint, activity_profile};
use crate::config::{Config, MAX_RESAMPLE_FREQUENCY};
use crate::error::{ChronoError, Result};
use crate::graph::Graph;
use crate::selection::Selection;
use crate::view::{DerivedView, derive_view};
use chronograph_types::Window;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Time window of an [`Explorer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum WindowState {
    /// No dataset loaded, or the dataset has no timestamps.
    #[default]
    Unset,
    Active(Window),
}

impl WindowState {
    pub fn window(&self) -> Option<&Window> {
        match self {
            WindowState::Unset => None,
            WindowState::Active(window) => Some(window),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, WindowState::Active(_))
    }
}

/// Interactive exploration state for one dataset.
///
/// # Examples
///
/// ```
/// use chronograph::{Config, Explorer, GraphBuilder, IntervalRecord};
/// use geo::Point;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node_record("a", "A", IntervalRecord::new(0.0, 10.0, Point::new(0.0, 0.0), Point::new(10.0, 10.0)))?;
/// builder.add_node_record("b", "B", IntervalRecord::new(5.0, 15.0, Point::new(0.0, 0.0), Point::new(1.0, 0.0)))?;
///
/// let mut explorer = Explorer::load(builder.build(), Config::default().with_auto_pin_count(1))?;
/// assert!(explorer.selection().is_pinned("a"));
///
/// explorer.set_window(0.0, 6.0)?;
/// assert_eq!(explorer.view().window.unwrap().end, 6.0);
/// # Ok::<(), chronograph::ChronoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Explorer {
    source: Arc<Graph>,
    config: Config,
    window: WindowState,
    selection: Selection,
    view: Arc<DerivedView>,
    intrinsic: Vec<MovementScore>,
    activity: Vec<ActivityPoint>,
}

impl Explorer {
    /// Load a dataset.
    ///
    /// The window is set to the graph's full extent and the top
    /// `config.auto_pin_count` movers are pinned.
    pub fn load(graph: Graph, config: Config) -> Result<Self> {
        config.validate().map_err(ChronoError::InvalidConfig)?;

        let mut explorer = Self {
            source: Arc::new(Graph::default()),
            config,
            window: WindowState::Unset,
            selection: Selection::new(),
            view: Arc::new(DerivedView::default()),
            intrinsic: Vec::new(),
            activity: Vec::new(),
        };
        explorer.install(graph);
        Ok(explorer)
    }

    /// Replace the dataset, keeping the configuration.
    ///
    /// Pins and window of the previous dataset are discarded.
    pub fn reload(&mut self, graph: Graph) {
        self.install(graph);
    }

    fn install(&mut self, graph: Graph) {
        self.window = WindowState::Unset;
        self.selection = Selection::from_ids(graph.node_ids().cloned());
        self.intrinsic = rank_movement(graph.nodes(), None);
        self.activity = activity_profile(&graph);

        for id in top_entities(&self.intrinsic, self.config.auto_pin_count) {
            self.selection.pin(id.as_str());
        }
        if let Some(extent) = graph.time_extent() {
            self.window = WindowState::Active(extent);
        }

        log::debug!(
            "Loaded graph: {} nodes, {} edges, window {:?}",
            graph.node_count(),
            graph.edge_count(),
            self.window
        );

        self.source = Arc::new(graph);
        self.recompute();
    }

    /// Move the window, clamped to the dataset extent.
    ///
    /// A dataset without timestamps has no extent, so every request is
    /// rejected and the window stays [`WindowState::Unset`].
    pub fn set_window(&mut self, start: f64, end: f64) -> Result<()> {
        let requested = Window::new(start, end).ok_or(ChronoError::InvalidWindow { start, end })?;
        let extent = self
            .source
            .time_extent()
            .ok_or(ChronoError::InvalidWindow { start, end })?;
        self.window = WindowState::Active(requested.clamp_to(&extent));
        self.recompute();
        Ok(())
    }

    /// Flip an entity's pin. Returns the new pin state.
    pub fn toggle_pin(&mut self, id: &str) -> Result<bool> {
        let pinned = self
            .selection
            .toggle(id)
            .ok_or_else(|| ChronoError::UnknownEntity(id.to_string()))?;
        self.recompute();
        Ok(pinned)
    }

    pub fn pin(&mut self, id: &str) -> Result<()> {
        if !self.selection.pin(id) {
            return Err(ChronoError::UnknownEntity(id.to_string()));
        }
        self.recompute();
        Ok(())
    }

    pub fn unpin(&mut self, id: &str) -> Result<()> {
        if !self.selection.unpin(id) {
            return Err(ChronoError::UnknownEntity(id.to_string()));
        }
        self.recompute();
        Ok(())
    }

    /// Change the interpolation density. The window is left untouched.
    pub fn set_resample_frequency(&mut self, frequency: usize) -> Result<()> {
        if frequency == 0 || frequency > MAX_RESAMPLE_FREQUENCY {
            return Err(ChronoError::InvalidInput(format!(
                "resample_frequency must be between 1 and {}, got {}",
                MAX_RESAMPLE_FREQUENCY, frequency
            )));
        }
        self.config.resample_frequency = frequency;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        let view = derive_view(
            &self.source,
            self.window.window(),
            &self.selection,
            &self.config,
        );
        for score in &view.movement {
            self.selection.set_score(score.id.as_str(), score.distance);
        }
        self.view = Arc::new(view);
    }

    /// The last published view.
    pub fn view(&self) -> Arc<DerivedView> {
        Arc::clone(&self.view)
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &Arc<Graph> {
        &self.source
    }

    /// Unwindowed path lengths over the source graph, highest first.
    pub fn intrinsic_ranking(&self) -> &[MovementScore] {
        &self.intrinsic
    }

    pub fn activity_profile(&self) -> &[ActivityPoint] {
        &self.activity
    }
}
