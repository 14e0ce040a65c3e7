use super::encode::EncodedImage;
use super::pitch::{hex, HalfPitch};
use crate::analysis::density::{check_bins, shot_and_goal_density, DensityGrid};
use crate::analysis::filter::FilteredView;
use crate::error::AppError;
use image::{Rgb, RgbImage};

const BACKGROUND: &str = "#22312b";
const LINE_COLOR: &str = "#efefef";
const SCALE: f64 = 6.0;
const PADDING: f64 = 24.0;
const GUTTER: f64 = 32.0;

/// matplotlib's `hot`: black → red → yellow → white.
pub fn hot(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let ramp = |start: f64, end: f64| ((t - start) / (end - start)).clamp(0.0, 1.0);
    let channel = |v: f64| (v * 255.0).round() as u8;
    Rgb([
        channel(ramp(0.0, 0.365079)),
        channel(ramp(0.365079, 0.746032)),
        channel(ramp(0.746032, 1.0)),
    ])
}

// Cells first, then their outlines in the background colour
fn paint_density(img: &mut RgbImage, pitch: &HalfPitch, grid: &DensityGrid) {
    let max = grid.max();
    if max <= 0.0 {
        return;
    }
    for row in 0..grid.bins_y {
        for col in 0..grid.bins_x {
            let (x0, x1, y0, y1) = grid.cell_bounds(col, row);
            pitch.fill_region(img, x0, x1, y0, y1, hot(grid.get(col, row) / max));
        }
    }
    let edge = hex(BACKGROUND);
    for row in 0..grid.bins_y {
        for col in 0..grid.bins_x {
            let (x0, x1, y0, y1) = grid.cell_bounds(col, row);
            pitch.outline_region(img, x0, x1, y0, y1, edge);
        }
    }
}

/// Shots and goals heatmaps side by side, each on its own half pitch.
pub fn render_heatmap_pair(shots: &DensityGrid, goals: &DensityGrid) -> RgbImage {
    let left = HalfPitch::new(PADDING, PADDING, SCALE);
    let right = HalfPitch::new(PADDING + left.width_px() + GUTTER, PADDING, SCALE);
    let width = (right.left + right.width_px() + PADDING).ceil() as u32;
    let height = (PADDING * 2.0 + left.height_px()).ceil() as u32;

    let mut img = RgbImage::from_pixel(width, height, hex(BACKGROUND));
    let lines = hex(LINE_COLOR);
    for (pitch, grid) in [(left, shots), (right, goals)] {
        paint_density(&mut img, &pitch, grid);
        pitch.draw_markings(&mut img, lines);
    }
    img
}

/// Full heatmap request: both densities over the view, rendered and encoded.
pub fn heatmap(view: &FilteredView, bins: usize) -> Result<EncodedImage, AppError> {
    let bins = check_bins(bins)?;
    let (shots, goals) = shot_and_goal_density(view, bins, bins);
    tracing::debug!(
        bins,
        shots = view.len(),
        peak = shots.max(),
        "rendering shot heatmap"
    );
    EncodedImage::from_image(&render_heatmap_pair(&shots, &goals))
}
