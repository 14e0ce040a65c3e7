use super::filter::FilteredView;
use crate::data::models::{PITCH_LENGTH, PITCH_WIDTH};
use crate::error::AppError;
use serde::Serialize;

/// Blur width in cells.
pub const SMOOTHING_SIGMA: f64 = 1.0;
const TRUNCATE_SIGMAS: f64 = 4.0;

/// Largest heatmap resolution accepted per axis.
pub const MAX_BINS: usize = 500;

/// Accepts `1..=MAX_BINS` bins per axis.
pub fn check_bins(bins: usize) -> Result<usize, AppError> {
    if (1..=MAX_BINS).contains(&bins) {
        Ok(bins)
    } else {
        Err(AppError::BinsOutOfRange {
            bins,
            max: MAX_BINS,
        })
    }
}

/// Shot counts binned over the full pitch, stored row-major with
/// `bins_y` rows of `bins_x` cells. Row 0 covers the lowest Y band and
/// column 0 the lowest X band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityGrid {
    pub bins_x: usize,
    pub bins_y: usize,
    cells: Vec<f64>,
}

impl DensityGrid {
    /// An all-zero grid. A shape whose cell count overflows `usize`
    /// collapses to an empty 0×0 grid.
    pub fn zeros(bins_x: usize, bins_y: usize) -> Self {
        match bins_x.checked_mul(bins_y) {
            Some(len) => DensityGrid {
                bins_x,
                bins_y,
                cells: vec![0.0; len],
            },
            None => DensityGrid {
                bins_x: 0,
                bins_y: 0,
                cells: Vec::new(),
            },
        }
    }

    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.cells[row * self.bins_x + col]
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    #[cfg(test)]
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// Pitch-space extent of a cell as `(x0, x1, y0, y1)`.
    pub fn cell_bounds(&self, col: usize, row: usize) -> (f64, f64, f64, f64) {
        let w = PITCH_LENGTH / self.bins_x as f64;
        let h = PITCH_WIDTH / self.bins_y as f64;
        (
            col as f64 * w,
            (col + 1) as f64 * w,
            row as f64 * h,
            (row + 1) as f64 * h,
        )
    }

    fn add(&mut self, col: usize, row: usize) {
        self.cells[row * self.bins_x + col] += 1.0;
    }

    /// Separable Gaussian blur with reflected edges.
    pub fn smoothed(&self, sigma: f64) -> DensityGrid {
        if self.cells.is_empty() || sigma <= 0.0 {
            return self.clone();
        }
        let kernel = gaussian_kernel(sigma);

        let mut horizontal = DensityGrid::zeros(self.bins_x, self.bins_y);
        for row in 0..self.bins_y {
            let line: Vec<f64> = (0..self.bins_x).map(|c| self.get(c, row)).collect();
            for (col, value) in convolve(&line, &kernel).into_iter().enumerate() {
                horizontal.cells[row * self.bins_x + col] = value;
            }
        }

        let mut out = DensityGrid::zeros(self.bins_x, self.bins_y);
        for col in 0..self.bins_x {
            let line: Vec<f64> = (0..self.bins_y).map(|r| horizontal.get(col, r)).collect();
            for (row, value) in convolve(&line, &kernel).into_iter().enumerate() {
                out.cells[row * self.bins_x + col] = value;
            }
        }
        out
    }
}

/// Count shots per cell then blur by one cell.
///
/// `bins_x` splits the pitch length and `bins_y` its width. Shots on the far
/// touchline or goal line land in the last cell. With `goals_only` set, only
/// scored shots are counted.
pub fn spatial_density(
    view: &FilteredView,
    bins_x: usize,
    bins_y: usize,
    goals_only: bool,
) -> DensityGrid {
    let mut grid = DensityGrid::zeros(bins_x, bins_y);
    if grid.cells.is_empty() {
        return grid;
    }

    for record in view.iter().filter(|r| !goals_only || r.goal) {
        if let (Some(col), Some(row)) = (
            bin_index(record.x, PITCH_LENGTH, grid.bins_x),
            bin_index(record.y, PITCH_WIDTH, grid.bins_y),
        ) {
            grid.add(col, row);
        }
    }

    grid.smoothed(SMOOTHING_SIGMA)
}

/// All-shots and goals-only densities for one heatmap request.
pub fn shot_and_goal_density(
    view: &FilteredView,
    bins_x: usize,
    bins_y: usize,
) -> (DensityGrid, DensityGrid) {
    let shots = spatial_density(view, bins_x, bins_y, false);
    let goals = spatial_density(view, bins_x, bins_y, true);
    (shots, goals)
}

fn bin_index(value: f64, extent: f64, bins: usize) -> Option<usize> {
    if !(0.0..=extent).contains(&value) {
        return None;
    }
    let idx = (value / extent * bins as f64).floor() as usize;
    Some(idx.min(bins - 1))
}

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE_SIGMAS * sigma + 0.5) as i64;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-0.5 * (i as f64 / sigma).powi(2)).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

// Reflect mode: d c b a | a b c d | d c b a
fn reflect(idx: i64, len: i64) -> usize {
    let period = 2 * len;
    let mut i = idx.rem_euclid(period);
    if i >= len {
        i = period - 1 - i;
    }
    i as usize
}

fn convolve(line: &[f64], kernel: &[f64]) -> Vec<f64> {
    let len = line.len() as i64;
    let radius = (kernel.len() / 2) as i64;
    (0..len)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * line[reflect(i + k as i64 - radius, len)])
                .sum()
        })
        .collect()
}
