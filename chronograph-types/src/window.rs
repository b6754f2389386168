use serde::{Deserialize, Serialize};

/// The observed time slice `[start, end]`.
///
/// Construction rejects non-finite bounds and `start > end`, so a `Window`
/// value always satisfies `start <= end`.
///
/// # Examples
///
/// ```
/// use chronograph_types::window::Window;
///
/// let window = Window::new(5.0, 15.0).unwrap();
/// assert!(window.contains(5.0));
/// assert!(window.contains_span(6.0, 15.0));
/// assert!(!window.contains_span(4.0, 6.0));
///
/// assert!(Window::new(10.0, 0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

/// Unchecked wire form of a [`Window`], validated through [`Window::new`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowBounds {
    pub start: f64,
    pub end: f64,
}

impl TryFrom<WindowBounds> for Window {
    type Error = String;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Window::new(bounds.start, bounds.end).ok_or_else(|| {
            format!(
                "window bounds must be finite and ordered, got [{}, {}]",
                bounds.start, bounds.end
            )
        })
    }
}

impl Window {
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Inclusive membership test.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Whether `[t0, t1]` lies entirely inside the window.
    pub fn contains_span(&self, t0: f64, t1: f64) -> bool {
        self.contains(t0) && self.contains(t1)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Smallest window covering both `self` and `other`.
    pub fn union(&self, other: &Window) -> Window {
        Window {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Clamp both bounds into `extent`.
    pub fn clamp_to(&self, extent: &Window) -> Window {
        Window {
            start: self.start.clamp(extent.start, extent.end),
            end: self.end.clamp(extent.start, extent.end),
        }
    }

    /// Extent of a set of timestamps, skipping non-finite values.
    pub fn from_times(times: impl IntoIterator<Item = f64>) -> Option<Window> {
        times
            .into_iter()
            .filter(|t| t.is_finite())
            .fold(None, |acc: Option<Window>, t| match acc {
                None => Some(Window { start: t, end: t }),
                Some(w) => Some(Window {
                    start: w.start.min(t),
                    end: w.end.max(t),
                }),
            })
    }
}

impl From<Window> for Interval {
    fn from(window: Window) -> Self {
        Interval {
            start: window.start,
            end: window.end,
        }
    }
}

/// A span of activity `[start, end]` for one entity or a set of entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }
}

impl From<(f64, f64)> for Interval {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}
