//! Gaussian kernel density of positions over a regular lattice.

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};

/// Kernel support, in bandwidths.
const KERNEL_CUTOFF: f64 = 3.0;

/// Density values on a `width × height` lattice covering `bounds`.
///
/// Values are stored row-major, row 0 at `bounds.min().y`, and each value is
/// sampled at its cell center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    pub bounds: Rect<f64>,
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
    pub max: f64,
}

impl DensityGrid {
    pub fn value_at(&self, column: usize, row: usize) -> Option<f64> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + column).copied()
    }

    /// Center of a lattice cell in coordinate space.
    pub fn cell_center(&self, column: usize, row: usize) -> Coord<f64> {
        let min = self.bounds.min();
        let cell_w = self.bounds.width() / self.width as f64;
        let cell_h = self.bounds.height() / self.height as f64;
        Coord {
            x: min.x + (column as f64 + 0.5) * cell_w,
            y: min.y + (row as f64 + 0.5) * cell_h,
        }
    }
}

/// Estimate the density of `points` with an isotropic Gaussian kernel.
///
/// The lattice spans the points' bounding rectangle padded by three
/// bandwidths on every side. Returns `None` for no points, a non-positive
/// bandwidth, a zero grid size, or a lattice too large to address.
///
/// # Examples
///
/// ```
/// use chronograph::compute::spatial::estimate_density;
/// use geo::Point;
///
/// let points = vec![Point::new(0.0, 0.0), Point::new(0.5, 0.5)];
/// let grid = estimate_density(&points, 1.0, 8).unwrap();
/// assert_eq!(grid.values.len(), 64);
/// assert!(grid.max > 0.0);
/// ```
pub fn estimate_density(points: &[Point<f64>], bandwidth: f64, grid_size: usize) -> Option<DensityGrid> {
    if points.is_empty() || grid_size == 0 || !bandwidth.is_finite() || bandwidth <= 0.0 {
        return None;
    }

    let cells = grid_size.checked_mul(grid_size)?;
    let hull = MultiPoint::from(points.to_vec()).bounding_rect()?;
    let pad = KERNEL_CUTOFF * bandwidth;
    let bounds = Rect::new(
        Coord {
            x: hull.min().x - pad,
            y: hull.min().y - pad,
        },
        Coord {
            x: hull.max().x + pad,
            y: hull.max().y + pad,
        },
    );

    let mut grid = DensityGrid {
        bounds,
        width: grid_size,
        height: grid_size,
        values: vec![0.0; cells],
        max: 0.0,
    };

    let two_h2 = 2.0 * bandwidth * bandwidth;
    let norm = 1.0 / (std::f64::consts::PI * two_h2 * points.len() as f64);
    let cutoff2 = (KERNEL_CUTOFF * bandwidth).powi(2);

    for row in 0..grid.height {
        for column in 0..grid.width {
            let center = grid.cell_center(column, row);
            let sum: f64 = points
                .iter()
                .map(|p| {
                    let dx = p.x() - center.x;
                    let dy = p.y() - center.y;
                    dx * dx + dy * dy
                })
                .filter(|&d2| d2 <= cutoff2)
                .map(|d2| (-d2 / two_h2).exp())
                .sum();
            grid.values[row * grid.width + column] = sum * norm;
        }
    }
    grid.max = grid.values.iter().copied().fold(0.0, f64::max);

    Some(grid)
}
