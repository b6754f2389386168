//! The temporal entity model: nodes, edges and the graph that owns them.
//!
//! A [`Graph`] is built once per dataset through [`GraphBuilder`](crate::GraphBuilder)
//! or [`Graph::from_raw`] and is never mutated afterwards. Derived working
//! copies (resampled nodes, synchronized edges) live in
//! [`DerivedView`](crate::DerivedView) so the source stays available for
//! statistics over the full data.

pub mod ingest;

use chronograph_types::{EntityId, Interval, Sample, Window};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A node and its ordered position samples.
///
/// Nodes built from source data hold an even number of samples, read as
/// consecutive `[start, end]` interval pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: EntityId,
    pub label: String,
    pub samples: Vec<Sample>,
    /// `time[last] - time[0]`
    pub age: f64,
}

impl Node {
    pub fn new(id: EntityId, label: impl Into<String>, samples: Vec<Sample>) -> Self {
        let age = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        };
        Self {
            id,
            label: label.into(),
            samples,
            age,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.samples.first().map(|s| s.time)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn ages(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.age)
    }

    /// Raw timestamps paired two-at-a-time.
    pub fn intervals(&self) -> Vec<Interval> {
        self.samples
            .chunks_exact(2)
            .map(|pair| Interval::new(pair[0].time, pair[1].time))
            .collect()
    }

    pub fn time_extent(&self) -> Option<Window> {
        Window::from_times(self.times())
    }
}

/// A timestamp at which an edge is present, with its cumulative age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceSample {
    pub time: f64,
    pub age: f64,
}

/// An edge between two nodes of the same graph, referenced by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EntityId,
    pub source: EntityId,
    pub target: EntityId,
    pub samples: Vec<PresenceSample>,
    pub age: f64,
}

impl Edge {
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn intervals(&self) -> Vec<Interval> {
        self.samples
            .chunks_exact(2)
            .map(|pair| Interval::new(pair[0].time, pair[1].time))
            .collect()
    }
}

/// Nodes and edges of one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    index: FxHashMap<EntityId, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Assemble a graph from already-validated parts.
    ///
    /// Later nodes with a duplicate ID shadow earlier ones in lookups; use
    /// [`GraphBuilder`](crate::GraphBuilder) to merge records instead.
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();
        Self {
            nodes,
            index,
            edges,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.nodes.iter().map(|n| &n.id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Union of all node and edge timestamp extents.
    pub fn time_extent(&self) -> Option<Window> {
        let node_times = self.nodes.iter().flat_map(|n| n.times());
        let edge_times = self.edges.iter().flat_map(|e| e.times());
        Window::from_times(node_times.chain(edge_times))
    }
}

/// Cumulative ages for an ordered timestamp sequence.
///
/// `ages[i] = times[i + 1] - times[0]` for every index but the last, and
/// `ages[last] = times[last] - times[0]`. Returns the scalar age alongside.
pub(crate) fn cumulative_ages(times: &[f64]) -> (f64, Vec<f64>) {
    let Some(&first) = times.first() else {
        return (0.0, Vec::new());
    };
    let last = times.len() - 1;
    let ages = (0..times.len())
        .map(|i| times[(i + 1).min(last)] - first)
        .collect();
    (times[last] - first, ages)
}
