//! Thread-safe explorer handle.
//!
//! `SyncExplorer` wraps an optional [`Explorer`] in `Arc<RwLock<..>>` so a
//! loader thread and any number of readers can share it. Readers that start
//! before a dataset arrives block on [`SyncExplorer::wait_ready`] instead of
//! polling.
//!
//! # Examples
//!
//! ```rust
//! use chronograph::{Config, GraphBuilder, IntervalRecord, SyncExplorer};
//! use geo::Point;
//! use std::thread;
//!
//! let explorer = SyncExplorer::new(Config::default());
//! let loader = explorer.clone();
//!
//! let handle = thread::spawn(move || {
//!     let mut builder = GraphBuilder::new();
//!     builder
//!         .add_node_record("a", "a", IntervalRecord::new(0.0, 1.0, Point::new(0.0, 0.0), Point::new(1.0, 0.0)))
//!         .unwrap();
//!     loader.load(builder.build()).unwrap();
//! });
//!
//! let view = explorer.wait_ready();
//! assert_eq!(view.nodes.len(), 1);
//! handle.join().unwrap();
//! ```

use super::{Explorer, WindowState};
use crate::compute::spatial::MovementScore;
use crate::config::Config;
use crate::error::{ChronoError, Result};
use crate::graph::Graph;
use crate::view::DerivedView;
use parking_lot::{Condvar, Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Ready {
    loaded: Mutex<bool>,
    signal: Condvar,
}

/// Shared handle to one exploration session.
///
/// Triggers take the write lock, so recomputations are serialized. Views are
/// handed out as `Arc<DerivedView>` and stay valid after later triggers.
#[derive(Debug, Clone)]
pub struct SyncExplorer {
    inner: Arc<RwLock<Option<Explorer>>>,
    config: Config,
    ready: Arc<Ready>,
}

impl SyncExplorer {
    /// An empty session; `config` is used by every later [`load`](Self::load).
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            config,
            ready: Arc::new(Ready::default()),
        }
    }

    /// Load or replace the dataset and wake every waiting reader.
    pub fn load(&self, graph: Graph) -> Result<()> {
        {
            let mut guard = self.inner.write();
            match guard.as_mut() {
                Some(explorer) => explorer.reload(graph),
                None => *guard = Some(Explorer::load(graph, self.config.clone())?),
            }
        }

        let mut loaded = self.ready.loaded.lock();
        *loaded = true;
        self.ready.signal.notify_all();
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.loaded.lock()
    }

    /// Block until a dataset is loaded, then return the current view.
    pub fn wait_ready(&self) -> Arc<DerivedView> {
        let mut loaded = self.ready.loaded.lock();
        while !*loaded {
            self.ready.signal.wait(&mut loaded);
        }
        drop(loaded);
        self.current_view()
    }

    /// Like [`wait_ready`](Self::wait_ready) but gives up after `timeout`.
    pub fn wait_ready_timeout(&self, timeout: Duration) -> Option<Arc<DerivedView>> {
        let mut loaded = self.ready.loaded.lock();
        if !*loaded {
            let result = self
                .ready
                .signal
                .wait_while_for(&mut loaded, |loaded| !*loaded, timeout);
            if result.timed_out() && !*loaded {
                return None;
            }
        }
        drop(loaded);
        Some(self.current_view())
    }

    /// Current view, or `None` before the first load.
    pub fn view(&self) -> Option<Arc<DerivedView>> {
        self.inner.read().as_ref().map(Explorer::view)
    }

    fn current_view(&self) -> Arc<DerivedView> {
        self.view().unwrap_or_default()
    }

    pub fn window(&self) -> WindowState {
        self.inner
            .read()
            .as_ref()
            .map(Explorer::window)
            .unwrap_or_default()
    }

    pub fn set_window(&self, start: f64, end: f64) -> Result<()> {
        self.with_explorer(|explorer| explorer.set_window(start, end))
    }

    pub fn toggle_pin(&self, id: &str) -> Result<bool> {
        self.with_explorer(|explorer| explorer.toggle_pin(id))
    }

    pub fn pin(&self, id: &str) -> Result<()> {
        self.with_explorer(|explorer| explorer.pin(id))
    }

    pub fn unpin(&self, id: &str) -> Result<()> {
        self.with_explorer(|explorer| explorer.unpin(id))
    }

    pub fn set_resample_frequency(&self, frequency: usize) -> Result<()> {
        self.with_explorer(|explorer| explorer.set_resample_frequency(frequency))
    }

    pub fn intrinsic_ranking(&self) -> Vec<MovementScore> {
        self.inner
            .read()
            .as_ref()
            .map(|explorer| explorer.intrinsic_ranking().to_vec())
            .unwrap_or_default()
    }

    fn with_explorer<T>(&self, f: impl FnOnce(&mut Explorer) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.write();
        let explorer = guard
            .as_mut()
            .ok_or_else(|| ChronoError::InvalidInput("no dataset loaded".to_string()))?;
        f(explorer)
    }
}

impl Default for SyncExplorer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
