//! Movement scoring: cumulative Euclidean path length per entity.

use crate::graph::Node;
use chronograph_types::{EntityId, Sample, Window};
use geo::{Distance, Euclidean};
use serde::{Deserialize, Serialize};

/// Path length of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementScore {
    pub id: EntityId,
    pub distance: f64,
}

/// Sum of Euclidean distances between consecutive samples.
///
/// With a window, only consecutive pairs whose `[t_i, t_{i+1}]` lies entirely
/// inside it contribute.
///
/// # Examples
///
/// ```
/// use chronograph::compute::spatial::path_length;
/// use chronograph_types::Sample;
/// use geo::Point;
///
/// let samples = vec![
///     Sample::new(0.0, Point::new(0.0, 0.0), 0.0),
///     Sample::new(1.0, Point::new(3.0, 0.0), 1.0),
///     Sample::new(2.0, Point::new(3.0, 4.0), 2.0),
/// ];
/// assert_eq!(path_length(&samples, None), 7.0);
/// ```
pub fn path_length(samples: &[Sample], window: Option<&Window>) -> f64 {
    samples
        .windows(2)
        .filter(|pair| window.is_none_or(|w| w.contains_span(pair[0].time, pair[1].time)))
        .map(|pair| Euclidean.distance(pair[0].position, pair[1].position))
        .sum()
}

/// Rank nodes by path length, highest first.
///
/// The sort is stable, so equal distances keep node order.
pub fn rank_movement(nodes: &[Node], window: Option<&Window>) -> Vec<MovementScore> {
    let mut scores: Vec<MovementScore> = nodes
        .iter()
        .map(|node| MovementScore {
            id: node.id.clone(),
            distance: path_length(&node.samples, window),
        })
        .collect();
    scores.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    scores
}

/// `[0, max distance]`, or `[0, 0]` when there are no scores.
pub fn color_domain(scores: &[MovementScore]) -> (f64, f64) {
    let max = scores
        .iter()
        .map(|s| s.distance)
        .fold(0.0_f64, f64::max);
    (0.0, max)
}

/// IDs of the first `n` entries of a ranking.
pub fn top_entities(scores: &[MovementScore], n: usize) -> Vec<EntityId> {
    scores.iter().take(n).map(|s| s.id.clone()).collect()
}
