//! Edge synchronization: place edge presence samples on node trajectories.

use crate::graph::{Edge, Node};
use chronograph_types::{EntityId, Sample, Window};
use geo::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Geometry of an edge at one presence timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub time: f64,
    pub age: f64,
    pub from: Point<f64>,
    pub to: Point<f64>,
}

/// All in-window presence geometry for one (source, target) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedEdge {
    /// ID of the first edge seen for this pair
    pub id: EntityId,
    pub source: EntityId,
    pub target: EntityId,
    pub samples: Vec<EdgeGeometry>,
}

/// First sample with minimal `|time - t|`.
pub fn nearest_sample(samples: &[Sample], t: f64) -> Option<&Sample> {
    samples
        .iter()
        .min_by(|a, b| (a.time - t).abs().total_cmp(&(b.time - t).abs()))
}

/// Synchronize `edges` against (typically resampled) `nodes`.
///
/// Every presence timestamp inside `window` is matched to the nearest sample
/// of each endpoint. Samples for the same (source, target) pair accumulate in
/// arrival order. Edges whose endpoints are absent from `nodes` are skipped.
///
/// # Examples
///
/// ```
/// use chronograph::{GraphBuilder, IntervalRecord};
/// use chronograph::compute::spatial::synchronize_edges;
/// use geo::Point;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node_record("a", "a", IntervalRecord::new(0.0, 10.0, Point::new(0.0, 0.0), Point::new(10.0, 0.0)))?;
/// builder.add_node_record("b", "b", IntervalRecord::new(0.0, 10.0, Point::new(0.0, 5.0), Point::new(0.0, 5.0)))?;
/// builder.add_edge_presence("ab", "a", "b", (1.0, 9.0))?;
/// let graph = builder.build();
///
/// let edges = synchronize_edges(graph.edges(), graph.nodes(), None);
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].samples.len(), 2);
/// assert_eq!(edges[0].samples[0].from, Point::new(0.0, 0.0));
/// assert_eq!(edges[0].samples[1].from, Point::new(10.0, 0.0));
/// # Ok::<(), chronograph::ChronoError>(())
/// ```
pub fn synchronize_edges(
    edges: &[Edge],
    nodes: &[Node],
    window: Option<&Window>,
) -> Vec<SyncedEdge> {
    let lookup: FxHashMap<&EntityId, &Node> = nodes.iter().map(|n| (&n.id, n)).collect();
    let mut slots: FxHashMap<(&EntityId, &EntityId), usize> = FxHashMap::default();
    let mut synced: Vec<SyncedEdge> = Vec::new();

    for edge in edges {
        let (Some(source), Some(target)) = (lookup.get(&edge.source), lookup.get(&edge.target))
        else {
            log::trace!(
                "Edge '{}' excluded: endpoint '{}' or '{}' not in view",
                edge.id,
                edge.source,
                edge.target
            );
            continue;
        };

        for presence in &edge.samples {
            if window.is_some_and(|w| !w.contains(presence.time)) {
                continue;
            }
            let (Some(from), Some(to)) = (
                nearest_sample(&source.samples, presence.time),
                nearest_sample(&target.samples, presence.time),
            ) else {
                continue;
            };

            let slot = *slots.entry((&edge.source, &edge.target)).or_insert_with(|| {
                synced.push(SyncedEdge {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    samples: Vec::new(),
                });
                synced.len() - 1
            });
            synced[slot].samples.push(EdgeGeometry {
                time: presence.time,
                age: presence.age,
                from: from.position,
                to: to.position,
            });
        }
    }

    synced
}
