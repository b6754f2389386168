//! Common-activity intervals across a set of entities.
//!
//! Given one list of intervals per entity, find the spans during which every
//! entity has an open interval. The computation is a single sweep over all
//! interval endpoints, `O(M log M)` for `M` endpoints, regardless of how many
//! entities participate.

use chronograph_types::Interval;
use smallvec::{SmallVec, smallvec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    // Declaration order is the tie-break: starts sort before ends.
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    time: f64,
    kind: EventKind,
    set: usize,
}

/// Spans where all `sets` are simultaneously active.
///
/// Events are ordered by time with starts before ends at equal timestamps.
/// A candidate opens when the number of covered sets reaches `sets.len()`.
/// Every end event closes the open candidate at its time; if all sets are
/// still covered afterwards a new candidate opens at the same instant, so
/// boundaries between consecutive intervals of one entity are preserved.
/// Zero-width spans are discarded, and ends at or beyond `global_end` are
/// clamped to it.
///
/// # Examples
///
/// ```
/// use chronograph::compute::temporal::common_intervals;
/// use chronograph_types::Interval;
///
/// let a = vec![Interval::new(0.0, 10.0), Interval::new(10.0, 20.0)];
/// let b = vec![Interval::new(5.0, 15.0)];
///
/// let common = common_intervals(&[a, b], None);
/// assert_eq!(common, vec![Interval::new(5.0, 10.0), Interval::new(10.0, 15.0)]);
/// ```
pub fn common_intervals<S: AsRef<[Interval]>>(sets: &[S], global_end: Option<f64>) -> Vec<Interval> {
    let required = sets.len();
    if required == 0 {
        return Vec::new();
    }

    let total: usize = sets.iter().map(|s| s.as_ref().len()).sum();
    let mut events = Vec::with_capacity(total * 2);
    for (set, intervals) in sets.iter().enumerate() {
        for interval in intervals.as_ref() {
            if !interval.start.is_finite() || !interval.end.is_finite() || interval.start > interval.end {
                log::debug!("Ignoring invalid interval {:?} in set {}", interval, set);
                continue;
            }
            events.push(Event {
                time: interval.start,
                kind: EventKind::Start,
                set,
            });
            events.push(Event {
                time: interval.end,
                kind: EventKind::End,
                set,
            });
        }
    }
    events.sort_by(|a, b| a.time.total_cmp(&b.time).then(a.kind.cmp(&b.kind)));

    let mut open: SmallVec<[u32; 8]> = smallvec![0; required];
    let mut covered = 0usize;
    let mut candidate: Option<f64> = None;
    let mut result = Vec::new();

    for event in events {
        match event.kind {
            EventKind::Start => {
                open[event.set] += 1;
                if open[event.set] == 1 {
                    covered += 1;
                    if covered == required {
                        candidate = Some(event.time);
                    }
                }
            }
            EventKind::End => {
                if let Some(start) = candidate.take()
                    && event.time > start
                {
                    result.push(Interval::new(start, event.time));
                }
                open[event.set] -= 1;
                if open[event.set] == 0 {
                    covered -= 1;
                }
                if covered == required {
                    candidate = Some(event.time);
                }
            }
        }
    }

    if let Some(end) = global_end {
        for interval in &mut result {
            if interval.end >= end {
                interval.end = end;
            }
        }
        result.retain(|i| i.start < i.end);
    }

    result
}

/// Merge touching or overlapping intervals of a start-ordered list.
///
/// ```
/// use chronograph::compute::temporal::merge_adjacent;
/// use chronograph_types::Interval;
///
/// let merged = merge_adjacent(&[Interval::new(5.0, 10.0), Interval::new(10.0, 15.0)]);
/// assert_eq!(merged, vec![Interval::new(5.0, 15.0)]);
/// ```
pub fn merge_adjacent(intervals: &[Interval]) -> Vec<Interval> {
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(*interval),
        }
    }
    merged
}
