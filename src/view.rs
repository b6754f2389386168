//! The derived view: everything the rendering layer consumes for one
//! (graph, window, selection, config) combination.

use crate::compute::spatial::{
    DensityGrid, MovementScore, SyncedEdge, color_domain, estimate_density, rank_movement,
    synchronize_edges,
};
use crate::compute::temporal::{common_intervals, merge_adjacent, resample_graph};
use crate::config::Config;
use crate::graph::{Graph, Node};
use crate::selection::Selection;
use chronograph_types::{EntityId, Interval, Window};
use geo::Point;
use serde::Serialize;

/// One straight piece of a resampled trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySegment {
    pub id: EntityId,
    pub from: Point<f64>,
    pub to: Point<f64>,
    pub t0: f64,
    pub t1: f64,
    /// Mean of the two endpoint ages
    pub age: f64,
}

/// Immutable result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedView {
    pub window: Option<Window>,
    pub resample_frequency: usize,
    /// Resampled nodes: in-window entities plus every pinned entity
    pub nodes: Vec<Node>,
    pub edges: Vec<SyncedEdge>,
    pub segments: Vec<TrajectorySegment>,
    /// Windowed path lengths over the source samples, highest first
    pub movement: Vec<MovementScore>,
    pub color_domain: (f64, f64),
    pub pinned: Vec<EntityId>,
    /// Spans where every pinned entity is active
    pub common_intervals: Vec<Interval>,
    /// Extent of source sample ages inside the window
    pub age_domain: Option<(f64, f64)>,
    pub density: Option<DensityGrid>,
}

impl DerivedView {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn score(&self, id: &str) -> Option<f64> {
        self.movement
            .iter()
            .find(|s| s.id.as_str() == id)
            .map(|s| s.distance)
    }
}

/// Run the full pipeline.
///
/// The source graph is only borrowed; the returned view shares nothing with
/// it, so callers may keep both.
pub fn derive_view(
    graph: &Graph,
    window: Option<&Window>,
    selection: &Selection,
    config: &Config,
) -> DerivedView {
    let nodes = resample_graph(graph, window, selection, config.resample_frequency);
    let edges = synchronize_edges(graph.edges(), &nodes, window);
    let segments = trajectory_segments(&nodes);

    let movement = rank_movement(graph.nodes(), window);
    let color_domain = color_domain(&movement);

    let pinned: Vec<EntityId> = selection.pinned_ids().cloned().collect();
    let common = pinned_common_intervals(graph, &pinned, config.merge_adjacent_intervals);

    let in_window = |t: f64| window.is_none_or(|w| w.contains(t));
    let age_domain = Window::from_times(
        graph
            .nodes()
            .iter()
            .flat_map(|n| n.samples.iter())
            .filter(|s| in_window(s.time))
            .map(|s| s.age),
    )
    .map(|w| (w.start, w.end));

    let points: Vec<Point<f64>> = graph
        .nodes()
        .iter()
        .flat_map(|n| n.samples.iter())
        .filter(|s| in_window(s.time))
        .map(|s| s.position)
        .collect();
    let density = estimate_density(&points, config.density_bandwidth, config.density_grid_size);

    log::debug!(
        "Derived view: {} nodes, {} edges, {} pinned, {} common intervals",
        nodes.len(),
        edges.len(),
        pinned.len(),
        common.len()
    );

    DerivedView {
        window: window.copied(),
        resample_frequency: config.resample_frequency,
        nodes,
        edges,
        segments,
        movement,
        color_domain,
        pinned,
        common_intervals: common,
        age_domain,
        density,
    }
}

/// Common-activity intervals of the given entities, from their raw interval pairs.
pub fn pinned_common_intervals(graph: &Graph, ids: &[EntityId], merge: bool) -> Vec<Interval> {
    let sets: Vec<Vec<Interval>> = ids
        .iter()
        .filter_map(|id| graph.node(id.as_str()))
        .map(|node| node.intervals())
        .collect();
    if sets.is_empty() {
        return Vec::new();
    }

    let global_end = graph.time_extent().map(|w| w.end);
    let common = common_intervals(&sets, global_end);
    if merge { merge_adjacent(&common) } else { common }
}

/// Consecutive-sample segments of each node.
pub fn trajectory_segments(nodes: &[Node]) -> Vec<TrajectorySegment> {
    nodes
        .iter()
        .flat_map(|node| {
            node.samples.windows(2).map(move |pair| TrajectorySegment {
                id: node.id.clone(),
                from: pair[0].position,
                to: pair[1].position,
                t0: pair[0].time,
                t1: pair[1].time,
                age: (pair[0].age + pair[1].age) / 2.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::graph::ingest::IntervalRecord;

    fn sample_graph() -> Graph {
        let mut builder = GraphBuilder::new();
        let add = |b: &mut GraphBuilder, id: &str, t0: f64, t1: f64, from: (f64, f64), to: (f64, f64)| {
            b.add_node_record(
                id,
                id,
                IntervalRecord::new(t0, t1, Point::new(from.0, from.1), Point::new(to.0, to.1)),
            )
            .unwrap();
        };
        add(&mut builder, "a", 0.0, 10.0, (0.0, 0.0), (10.0, 0.0));
        add(&mut builder, "a", 10.0, 20.0, (10.0, 0.0), (10.0, 10.0));
        add(&mut builder, "b", 5.0, 15.0, (0.0, 5.0), (3.0, 9.0));
        add(&mut builder, "c", 30.0, 40.0, (1.0, 1.0), (1.0, 2.0));
        builder.add_edge_presence("ab", "a", "b", (6.0, 12.0)).unwrap();
        builder.build()
    }

    #[test]
    fn test_derive_view_unwindowed() {
        let graph = sample_graph();
        let selection = Selection::from_ids(graph.node_ids().cloned());
        let config = Config::default().with_resample_frequency(2);

        let view = derive_view(&graph, None, &selection, &config);
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.node("a").unwrap().len(), 6);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.segments.len(), 5 + 2 + 2);
        assert_eq!(view.movement[0].id.as_str(), "a");
        assert_eq!(view.color_domain, (0.0, 20.0));
        assert!(view.common_intervals.is_empty());
        assert!(view.density.is_some());
    }

    #[test]
    fn test_common_intervals_follow_pins() {
        let graph = sample_graph();
        let mut selection = Selection::from_ids(graph.node_ids().cloned());
        selection.pin("a");
        selection.pin("b");

        let view = derive_view(&graph, None, &selection, &Config::default());
        assert_eq!(
            view.common_intervals,
            vec![Interval::new(5.0, 10.0), Interval::new(10.0, 15.0)]
        );

        let merged = derive_view(
            &graph,
            None,
            &selection,
            &Config::default().with_merge_adjacent_intervals(true),
        );
        assert_eq!(merged.common_intervals, vec![Interval::new(5.0, 15.0)]);
    }

    #[test]
    fn test_windowed_view_keeps_pinned_entities() {
        let graph = sample_graph();
        let mut selection = Selection::from_ids(graph.node_ids().cloned());
        selection.pin("c");

        let window = Window::new(0.0, 12.0).unwrap();
        let view = derive_view(&graph, Some(&window), &selection, &Config::default());

        assert!(view.node("c").is_some());
        assert!(view.node("a").is_some());
        assert_eq!(view.score("a"), Some(10.0));
        assert_eq!(view.score("c"), Some(0.0));
        assert_eq!(view.window, Some(window));
    }

    #[test]
    fn test_segment_age_is_mean() {
        let graph = sample_graph();
        let segments = trajectory_segments(graph.nodes());
        let first = &segments[0];
        let node = graph.node("a").unwrap();
        assert_eq!(first.age, (node.samples[0].age + node.samples[1].age) / 2.0);
    }
}
