// Zone grids: spatial histograms over non-uniform rectangular bins.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone grid needs at least two edges per axis, got {count} on {axis}")]
    TooFewEdges { axis: &'static str, count: usize },

    #[error("zone grid edges on {axis} must be strictly increasing at position {position}")]
    NonIncreasingEdges { axis: &'static str, position: usize },
}

/// A partition of the pitch into rectangular zones, defined by bin edges
/// along each axis. Zones need not be equal width; pass-zone charts cut the
/// pitch at the six-yard-box lines, not at even intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneGrid {
    edges_x: Vec<f64>,
    edges_y: Vec<f64>,
}

impl ZoneGrid {
    /// Build a grid from bin edges. Edges must be strictly increasing and
    /// each axis needs at least two of them.
    pub fn new(edges_x: Vec<f64>, edges_y: Vec<f64>) -> Result<Self, ZoneError> {
        validate_edges("x", &edges_x)?;
        validate_edges("y", &edges_y)?;
        Ok(ZoneGrid { edges_x, edges_y })
    }

    /// Evenly spaced edges, the common case for the x axis.
    pub fn uniform(
        x_range: (f64, f64),
        nx: usize,
        y_range: (f64, f64),
        ny: usize,
    ) -> Result<Self, ZoneError> {
        Self::new(linspace(x_range.0, x_range.1, nx + 1), linspace(y_range.0, y_range.1, ny + 1))
    }

    /// Number of zones along the x axis.
    pub fn nx(&self) -> usize {
        self.edges_x.len() - 1
    }

    /// Number of zones along the y axis.
    pub fn ny(&self) -> usize {
        self.edges_y.len() - 1
    }

    pub fn edges_x(&self) -> &[f64] {
        &self.edges_x
    }

    pub fn edges_y(&self) -> &[f64] {
        &self.edges_y
    }

    /// Zone index for a point, or `None` when it falls outside the grid.
    /// Intervals are half-open `[edge_i, edge_i+1)` except the last, which
    /// also includes its upper edge so boundary-maximum points count.
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let ix = locate_axis(&self.edges_x, x)?;
        let iy = locate_axis(&self.edges_y, y)?;
        Some((ix, iy))
    }
}

fn validate_edges(axis: &'static str, edges: &[f64]) -> Result<(), ZoneError> {
    if edges.len() < 2 {
        return Err(ZoneError::TooFewEdges {
            axis,
            count: edges.len(),
        });
    }
    for (i, pair) in edges.windows(2).enumerate() {
        if !(pair[1] > pair[0]) {
            return Err(ZoneError::NonIncreasingEdges {
                axis,
                position: i + 1,
            });
        }
    }
    Ok(())
}

fn locate_axis(edges: &[f64], v: f64) -> Option<usize> {
    let last = edges[edges.len() - 1];
    if v == last {
        return Some(edges.len() - 2);
    }
    edges.windows(2).position(|pair| v >= pair[0] && v < pair[1])
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Count points per zone.
///
/// Points are paired from `xs` and `ys`; any point outside the grid (or with
/// a NaN coordinate) is dropped, not an error. With `normalize` the counts
/// are divided by the total number of assigned points, so the cells sum to
/// 1.0 whenever anything was assigned; an empty grid stays all zeros rather
/// than going NaN. The result is indexed `[ix][iy]` and is independent of
/// input order.
pub fn bin_statistic(xs: &[f64], ys: &[f64], grid: &ZoneGrid, normalize: bool) -> Vec<Vec<f64>> {
    let mut cells = vec![vec![0.0_f64; grid.ny()]; grid.nx()];
    let mut assigned = 0_u64;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if let Some((ix, iy)) = grid.locate(x, y) {
            cells[ix][iy] += 1.0;
            assigned += 1;
        }
    }

    if normalize && assigned > 0 {
        let total = assigned as f64;
        for column in &mut cells {
            for cell in column {
                *cell /= total;
            }
        }
    }

    cells
}
