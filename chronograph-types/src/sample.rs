use geo::Point;
use serde::{Deserialize, Serialize};

/// A position observed (or synthesized) at a point in time.
///
/// `age` is the elapsed time from the owning entity's first recorded
/// timestamp. `resampled` is `false` for samples taken from the source data
/// and for segment anchors, `true` for samples produced by interpolation.
///
/// # Examples
///
/// ```
/// use chronograph_types::sample::Sample;
/// use geo::Point;
///
/// let a = Sample::new(0.0, Point::new(0.0, 0.0), 0.0);
/// let b = Sample::new(10.0, Point::new(10.0, 10.0), 10.0);
///
/// let mid = a.lerp(&b, 0.5);
/// assert_eq!(mid.time, 5.0);
/// assert_eq!(mid.x(), 5.0);
/// assert_eq!(mid.age, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub position: Point<f64>,
    pub age: f64,
    #[serde(default)]
    pub resampled: bool,
}

impl Sample {
    /// Create an original (non-resampled) sample.
    pub fn new(time: f64, position: Point<f64>, age: f64) -> Self {
        Self {
            time,
            position,
            age,
            resampled: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    /// Return a copy with the `resampled` flag replaced.
    pub fn with_resampled(mut self, resampled: bool) -> Self {
        self.resampled = resampled;
        self
    }

    /// Linear interpolation towards `other`, applied independently to time,
    /// x, y and age. The result is flagged as resampled.
    pub fn lerp(&self, other: &Sample, t: f64) -> Sample {
        Sample {
            time: lerp(self.time, other.time, t),
            position: Point::new(lerp(self.x(), other.x(), t), lerp(self.y(), other.y(), t)),
            age: lerp(self.age, other.age, t),
            resampled: true,
        }
    }
}

/// `a + (b - a) * t`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
