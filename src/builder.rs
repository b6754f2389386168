//! Graph builder for assembling a temporal graph from interval records
//!
//! Records may arrive in any order and per-entity records accumulate across
//! calls. All derived state (sample ordering, cumulative ages, edge endpoint
//! resolution) is computed once in [`GraphBuilder::build`].

use crate::error::{ChronoError, Result};
use crate::graph::ingest::IntervalRecord;
use crate::graph::{Edge, Graph, Node, PresenceSample, cumulative_ages};
use chronograph_types::{EntityId, Sample};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug)]
struct PendingNode {
    id: EntityId,
    label: String,
    records: Vec<IntervalRecord>,
}

#[derive(Debug)]
struct PendingEdge {
    id: EntityId,
    source: EntityId,
    target: EntityId,
    presence: Vec<(f64, f64)>,
}

/// Builder collecting node position records and edge presence pairs.
///
/// # Examples
///
/// ```rust
/// use chronograph::{GraphBuilder, IntervalRecord};
/// use geo::Point;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node_record("a", "Alice", IntervalRecord::new(0.0, 10.0, Point::new(0.0, 0.0), Point::new(10.0, 10.0)))?;
/// builder.add_node_record("b", "Bob", IntervalRecord::new(0.0, 10.0, Point::new(5.0, 0.0), Point::new(5.0, 5.0)))?;
/// builder.add_edge_presence("ab", "a", "b", (2.0, 4.0))?;
///
/// let graph = builder.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), chronograph::ChronoError>(())
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<PendingNode>,
    node_index: FxHashMap<EntityId, usize>,
    edges: Vec<PendingEdge>,
    edge_index: FxHashMap<EntityId, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `[(t0,t1): (x0,y0,x1,y1)]` record to a node.
    ///
    /// The label of the first call for an ID is kept.
    pub fn add_node_record(
        &mut self,
        id: impl Into<EntityId>,
        label: impl Into<String>,
        record: IntervalRecord,
    ) -> Result<&mut Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ChronoError::InvalidInput("Node id cannot be empty".into()));
        }
        record.validate()?;

        let slot = match self.node_index.get(&id) {
            Some(&slot) => slot,
            None => {
                self.nodes.push(PendingNode {
                    id: id.clone(),
                    label: label.into(),
                    records: Vec::new(),
                });
                self.node_index.insert(id, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        self.nodes[slot].records.push(record);
        Ok(self)
    }

    /// Append one presence pair `(t0, t1)` to an edge.
    ///
    /// Endpoints are resolved in [`build`](Self::build); the endpoints given on
    /// the first call for an edge ID are kept.
    pub fn add_edge_presence(
        &mut self,
        id: impl Into<EntityId>,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        (t0, t1): (f64, f64),
    ) -> Result<&mut Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ChronoError::InvalidInput("Edge id cannot be empty".into()));
        }
        if !t0.is_finite() || !t1.is_finite() || t0 > t1 {
            return Err(ChronoError::InvalidInput(format!(
                "Presence interval must be finite and ordered, got [{}, {}]",
                t0, t1
            )));
        }

        let slot = match self.edge_index.get(&id) {
            Some(&slot) => slot,
            None => {
                self.edges.push(PendingEdge {
                    id: id.clone(),
                    source: source.into(),
                    target: target.into(),
                    presence: Vec::new(),
                });
                self.edge_index.insert(id, self.edges.len() - 1);
                self.edges.len() - 1
            }
        };
        self.edges[slot].presence.push((t0, t1));
        Ok(self)
    }

    /// Number of distinct node IDs recorded so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build the graph.
    ///
    /// Self-loops and edges naming an unknown node are dropped.
    pub fn build(self) -> Graph {
        let nodes: Vec<Node> = self.nodes.into_iter().map(build_node).collect();

        let known: FxHashSet<&EntityId> = nodes.iter().map(|n| &n.id).collect();
        let mut edges = Vec::with_capacity(self.edges.len());
        for pending in self.edges {
            if pending.source == pending.target {
                log::debug!("Dropping self-loop edge '{}' on '{}'", pending.id, pending.source);
                continue;
            }
            if !known.contains(&pending.source) || !known.contains(&pending.target) {
                log::debug!(
                    "Dropping edge '{}': unresolved endpoint '{}' -> '{}'",
                    pending.id,
                    pending.source,
                    pending.target
                );
                continue;
            }
            edges.push(build_edge(pending));
        }

        Graph::from_parts(nodes, edges)
    }
}

fn build_node(mut pending: PendingNode) -> Node {
    pending.records.sort_by(|a, b| a.t0.total_cmp(&b.t0));

    let times: Vec<f64> = pending
        .records
        .iter()
        .flat_map(|r| [r.t0, r.t1])
        .collect();
    let (_, ages) = cumulative_ages(&times);

    let samples = pending
        .records
        .iter()
        .flat_map(|r| [(r.t0, r.from), (r.t1, r.to)])
        .zip(ages)
        .map(|((time, position), age)| Sample::new(time, position, age))
        .collect();

    Node::new(pending.id, pending.label, samples)
}

fn build_edge(mut pending: PendingEdge) -> Edge {
    pending.presence.sort_by(|a, b| a.0.total_cmp(&b.0));

    let times: Vec<f64> = pending.presence.iter().flat_map(|&(a, b)| [a, b]).collect();
    let (age, ages) = cumulative_ages(&times);

    Edge {
        id: pending.id,
        source: pending.source,
        target: pending.target,
        samples: times
            .into_iter()
            .zip(ages)
            .map(|(time, age)| PresenceSample { time, age })
            .collect(),
        age,
    }
}
