//! Linear resampling of interval samples.
//!
//! Each `[t0, t1]` pair of a node becomes `F + 1` evenly spaced samples, so a
//! trajectory with `k` surviving pairs resamples to `k * (F + 1)` samples.
//! Segment boundaries are copied from the source rather than interpolated,
//! which keeps `F = 1` an exact reproduction of the input.

use crate::graph::{Graph, Node};
use crate::selection::Selection;
use chronograph_types::{Sample, Window};

/// Resample one node for the given window.
///
/// Samples outside `window` are dropped unless `pinned` is set. When an odd
/// number of samples survive, the original sample closest to the window end
/// is appended as a closing endpoint with `age = end - time[0]`. Returns
/// `None` when nothing survives the filter or the resampled length does not
/// fit in `usize`.
///
/// # Examples
///
/// ```
/// use chronograph::{GraphBuilder, IntervalRecord};
/// use chronograph::compute::temporal::resample_node;
/// use geo::Point;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node_record("a", "a", IntervalRecord::new(0.0, 10.0, Point::new(0.0, 0.0), Point::new(10.0, 10.0)))?;
/// let graph = builder.build();
///
/// let dense = resample_node(graph.node("a").unwrap(), None, false, 2).unwrap();
/// let times: Vec<f64> = dense.times().collect();
/// assert_eq!(times, vec![0.0, 5.0, 10.0]);
/// # Ok::<(), chronograph::ChronoError>(())
/// ```
pub fn resample_node(
    node: &Node,
    window: Option<&Window>,
    pinned: bool,
    frequency: usize,
) -> Option<Node> {
    let frequency = frequency.max(1);

    let mut kept: Vec<Sample> = match window {
        Some(w) if !pinned => node
            .samples
            .iter()
            .filter(|s| w.contains(s.time))
            .copied()
            .collect(),
        _ => node.samples.clone(),
    };
    if kept.is_empty() {
        return None;
    }

    if kept.len() % 2 == 1 {
        let first = node.first_time()?;
        let end = match window {
            Some(w) => w.end,
            None => kept.last()?.time,
        };
        let closest = closest_in_time(&node.samples, end)?;
        kept.push(Sample::new(closest.time, closest.position, end - first));
    }

    let segments = kept.len() / 2;
    let step = frequency as f64;
    let capacity = frequency
        .checked_add(1)
        .and_then(|per_segment| per_segment.checked_mul(segments))?;
    let mut samples = Vec::with_capacity(capacity);

    for (k, pair) in kept.chunks_exact(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let last_segment = k + 1 == segments;

        samples.push(a.with_resampled(false));
        for j in 1..frequency {
            samples.push(a.lerp(b, j as f64 / step));
        }
        samples.push(b.with_resampled(!last_segment));
    }

    Some(Node {
        id: node.id.clone(),
        label: node.label.clone(),
        samples,
        age: node.age,
    })
}

/// Resample every node of `graph`, in graph order.
///
/// Pinned entities in `selection` bypass the window filter. Nodes with no
/// samples in the window are omitted.
pub fn resample_graph(
    graph: &Graph,
    window: Option<&Window>,
    selection: &Selection,
    frequency: usize,
) -> Vec<Node> {
    graph
        .nodes()
        .iter()
        .filter_map(|node| {
            resample_node(node, window, selection.is_pinned(node.id.as_str()), frequency)
        })
        .collect()
}

/// First sample with minimal `|time - target|`.
fn closest_in_time(samples: &[Sample], target: f64) -> Option<&Sample> {
    samples
        .iter()
        .min_by(|a, b| (a.time - target).abs().total_cmp(&(b.time - target).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::graph::ingest::IntervalRecord;
    use geo::Point;

    fn graph_with(records: &[(f64, f64, (f64, f64), (f64, f64))]) -> Graph {
        let mut builder = GraphBuilder::new();
        for &(t0, t1, (x0, y0), (x1, y1)) in records {
            builder
                .add_node_record(
                    "a",
                    "a",
                    IntervalRecord::new(t0, t1, Point::new(x0, y0), Point::new(x1, y1)),
                )
                .unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_two_steps_single_interval() {
        let graph = graph_with(&[(0.0, 10.0, (0.0, 0.0), (10.0, 10.0))]);
        let node = resample_node(graph.node("a").unwrap(), None, false, 2).unwrap();

        assert_eq!(node.times().collect::<Vec<_>>(), vec![0.0, 5.0, 10.0]);
        let coords: Vec<(f64, f64)> = node.samples.iter().map(|s| (s.x(), s.y())).collect();
        assert_eq!(coords, vec![(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        let flags: Vec<bool> = node.samples.iter().map(|s| s.resampled).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_frequency_one_reproduces_input() {
        let graph = graph_with(&[
            (0.0, 3.3, (0.1, 0.2), (1.7, -4.0)),
            (3.3, 9.1, (1.7, -4.0), (2.9, 8.25)),
        ]);
        let source = graph.node("a").unwrap();
        let node = resample_node(source, None, false, 1).unwrap();

        assert_eq!(node.len(), source.len());
        for (a, b) in node.samples.iter().zip(&source.samples) {
            assert_eq!(a.time, b.time);
            assert_eq!(a.position, b.position);
            assert_eq!(a.age, b.age);
        }
    }

    #[test]
    fn test_segment_flags_across_multiple_intervals() {
        let graph = graph_with(&[
            (0.0, 4.0, (0.0, 0.0), (4.0, 0.0)),
            (4.0, 8.0, (4.0, 0.0), (8.0, 0.0)),
        ]);
        let node = resample_node(graph.node("a").unwrap(), None, false, 4).unwrap();

        assert_eq!(node.len(), 10);
        let flags: Vec<bool> = node.samples.iter().map(|s| s.resampled).collect();
        assert_eq!(
            flags,
            vec![false, true, true, true, true, false, true, true, true, false]
        );
        assert_eq!(node.samples[4].time, 4.0);
        assert_eq!(node.samples[9].time, 8.0);
    }

    #[test]
    fn test_window_filter_and_degenerate_endpoint() {
        let graph = graph_with(&[
            (0.0, 10.0, (0.0, 0.0), (10.0, 0.0)),
            (20.0, 30.0, (20.0, 0.0), (30.0, 0.0)),
        ]);
        let source = graph.node("a").unwrap();

        // Only t=10 survives; closest original sample to end=18 is t=20.
        let window = Window::new(5.0, 18.0).unwrap();
        let node = resample_node(source, Some(&window), false, 2).unwrap();

        assert_eq!(node.times().collect::<Vec<_>>(), vec![10.0, 15.0, 20.0]);
        let last = node.samples.last().unwrap();
        assert_eq!(last.age, 18.0);
        assert_eq!(last.x(), 20.0);
        assert!(!last.resampled);
    }

    #[test]
    fn test_pinned_ignores_window() {
        let graph = graph_with(&[(0.0, 10.0, (0.0, 0.0), (10.0, 0.0))]);
        let window = Window::new(50.0, 60.0).unwrap();
        let source = graph.node("a").unwrap();

        assert!(resample_node(source, Some(&window), false, 3).is_none());
        let pinned = resample_node(source, Some(&window), true, 3).unwrap();
        assert_eq!(pinned.len(), 4);
    }

    #[test]
    fn test_unaddressable_frequency_yields_none() {
        let graph = graph_with(&[(0.0, 10.0, (0.0, 0.0), (10.0, 0.0))]);
        assert!(resample_node(graph.node("a").unwrap(), None, false, usize::MAX).is_none());
    }

    #[test]
    fn test_resampling_is_deterministic() {
        let graph = graph_with(&[
            (0.0, 7.0, (0.3, 0.9), (2.2, 1.1)),
            (9.0, 13.0, (5.0, 5.0), (-1.0, 3.3)),
        ]);
        let source = graph.node("a").unwrap();
        let a = resample_node(source, None, false, 7).unwrap();
        let b = resample_node(source, None, false, 7).unwrap();
        for (x, y) in a.samples.iter().zip(&b.samples) {
            assert_eq!(x.time.to_bits(), y.time.to_bits());
            assert_eq!(x.x().to_bits(), y.x().to_bits());
            assert_eq!(x.y().to_bits(), y.y().to_bits());
            assert_eq!(x.age.to_bits(), y.age.to_bits());
        }
    }

    #[test]
    fn test_resample_graph_skips_empty_nodes() {
        let mut builder = GraphBuilder::new();
        builder
            .add_node_record("a", "a", IntervalRecord::new(0.0, 1.0, Point::new(0.0, 0.0), Point::new(1.0, 1.0)))
            .unwrap();
        builder
            .add_node_record("b", "b", IntervalRecord::new(5.0, 6.0, Point::new(0.0, 0.0), Point::new(1.0, 1.0)))
            .unwrap();
        let graph = builder.build();

        let window = Window::new(0.0, 2.0).unwrap();
        let mut selection = Selection::from_ids(["a", "b"]);
        let nodes = resample_graph(&graph, Some(&window), &selection, 2);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id.as_str(), "a");

        selection.pin("b");
        let nodes = resample_graph(&graph, Some(&window), &selection, 2);
        assert_eq!(nodes.len(), 2);
    }
}
