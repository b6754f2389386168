//! Concurrent-activity profile of a dataset.
//!
//! For every node interval the profile counts how many distinct nodes have a
//! recorded timestamp inside it, then projects those counts onto the interval
//! boundaries. The result is a time-sorted series suitable for an area chart
//! under the timeline.

use crate::graph::Graph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub time: f64,
    pub count: usize,
}

/// Activity profile over the full graph.
///
/// When several intervals share a boundary time the maximum count wins.
pub fn activity_profile(graph: &Graph) -> Vec<ActivityPoint> {
    let sorted_times: Vec<Vec<f64>> = graph
        .nodes()
        .iter()
        .map(|node| {
            let mut times: Vec<f64> = node.times().collect();
            times.sort_by(f64::total_cmp);
            times
        })
        .collect();

    let mut points = Vec::new();
    for node in graph.nodes() {
        for interval in node.intervals() {
            let count = sorted_times
                .iter()
                .filter(|times| {
                    let idx = times.partition_point(|&t| t < interval.start);
                    idx < times.len() && times[idx] <= interval.end
                })
                .count();
            points.push(ActivityPoint {
                time: interval.start,
                count,
            });
            points.push(ActivityPoint {
                time: interval.end,
                count,
            });
        }
    }

    points.sort_by(|a, b| a.time.total_cmp(&b.time));
    let mut profile: Vec<ActivityPoint> = Vec::with_capacity(points.len());
    for point in points {
        match profile.last_mut() {
            Some(last) if last.time == point.time => last.count = last.count.max(point.count),
            _ => profile.push(point),
        }
    }
    profile
}
