//! Vertical half-pitch geometry and raster primitives.
//!
//! The attacking half of a StatsBomb pitch is drawn with the goal at the top
//! and the halfway line at the bottom: pitch Y runs left to right, pitch X
//! runs bottom (60) to top (120).

use crate::data::models::{PITCH_LENGTH, PITCH_WIDTH};
use image::{Rgb, RgbImage};

pub const HALFWAY: f64 = PITCH_LENGTH / 2.0;
const HALF_LENGTH: f64 = PITCH_LENGTH - HALFWAY;

const PENALTY_AREA_DEPTH: f64 = 18.0;
const PENALTY_AREA_Y: (f64, f64) = (18.0, 62.0);
const SIX_YARD_DEPTH: f64 = 6.0;
const SIX_YARD_Y: (f64, f64) = (30.0, 50.0);
const GOAL_Y: (f64, f64) = (36.0, 44.0);
const GOAL_DEPTH: f64 = 2.4;
const PENALTY_SPOT_X: f64 = 108.0;
const CIRCLE_RADIUS: f64 = 10.0;
const SPOT_RADIUS: f64 = 0.4;
const LINE_WIDTH_PX: f64 = 2.0;

/// Placement of one half pitch inside an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPitch {
    pub left: f64,
    pub top: f64,
    /// Pixels per pitch unit.
    pub scale: f64,
}

impl HalfPitch {
    pub fn new(left: f64, top: f64, scale: f64) -> Self {
        HalfPitch { left, top, scale }
    }

    pub fn width_px(&self) -> f64 {
        PITCH_WIDTH * self.scale
    }

    pub fn height_px(&self) -> f64 {
        HALF_LENGTH * self.scale
    }

    /// Pitch coordinates to pixel coordinates.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.left + y * self.scale,
            self.top + (PITCH_LENGTH - x) * self.scale,
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (HALFWAY..=PITCH_LENGTH).contains(&x) && (0.0..=PITCH_WIDTH).contains(&y)
    }

    /// Fill the pitch rectangle `[x0, x1] × [y0, y1]`, clipped to this half.
    pub fn fill_region(
        &self,
        img: &mut RgbImage,
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        color: Rgb<u8>,
    ) {
        let x0 = x0.max(HALFWAY);
        let x1 = x1.min(PITCH_LENGTH);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let (left, top) = self.to_pixel(x1, y0);
        let (right, bottom) = self.to_pixel(x0, y1);
        fill_rect(img, left, top, right, bottom, color);
    }

    /// One-pixel outline of the same clipped rectangle `fill_region` paints.
    pub fn outline_region(
        &self,
        img: &mut RgbImage,
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        color: Rgb<u8>,
    ) {
        let x0 = x0.max(HALFWAY);
        let x1 = x1.min(PITCH_LENGTH);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let (left, top) = self.to_pixel(x1, y0);
        let (right, bottom) = self.to_pixel(x0, y1);
        fill_rect(img, left, top, right, top + 1.0, color);
        fill_rect(img, left, bottom - 1.0, right, bottom, color);
        fill_rect(img, left, top, left + 1.0, bottom, color);
        fill_rect(img, right - 1.0, top, right, bottom, color);
    }

    pub fn line(&self, img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
        let a = self.to_pixel(from.0, from.1);
        let b = self.to_pixel(to.0, to.1);
        draw_line(img, a, b, LINE_WIDTH_PX, color);
    }

    fn boxed(&self, img: &mut RgbImage, depth: f64, span: (f64, f64), color: Rgb<u8>) {
        let inner = PITCH_LENGTH - depth;
        self.line(img, (inner, span.0), (inner, span.1), color);
        self.line(img, (inner, span.0), (PITCH_LENGTH, span.0), color);
        self.line(img, (inner, span.1), (PITCH_LENGTH, span.1), color);
    }

    // Arc points of a circle centred on (cx, cy), kept where `keep` holds
    fn arc<F>(&self, img: &mut RgbImage, cx: f64, cy: f64, radius: f64, color: Rgb<u8>, keep: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let steps = 720;
        let mut prev: Option<(f64, f64)> = None;
        for i in 0..=steps {
            let theta = i as f64 / steps as f64 * std::f64::consts::TAU;
            let x = cx + radius * theta.cos();
            let y = cy + radius * theta.sin();
            if keep(x, y) {
                let p = self.to_pixel(x, y);
                if let Some(q) = prev {
                    draw_line(img, q, p, LINE_WIDTH_PX, color);
                }
                prev = Some(p);
            } else {
                prev = None;
            }
        }
    }

    /// Touchlines, boxes, goal, spots and arcs.
    pub fn draw_markings(&self, img: &mut RgbImage, color: Rgb<u8>) {
        let l = PITCH_LENGTH;
        let w = PITCH_WIDTH;

        self.line(img, (HALFWAY, 0.0), (l, 0.0), color);
        self.line(img, (HALFWAY, w), (l, w), color);
        self.line(img, (l, 0.0), (l, w), color);
        self.line(img, (HALFWAY, 0.0), (HALFWAY, w), color);

        self.boxed(img, PENALTY_AREA_DEPTH, PENALTY_AREA_Y, color);
        self.boxed(img, SIX_YARD_DEPTH, SIX_YARD_Y, color);

        // goal frame sits behind the goal line
        let back = l + GOAL_DEPTH;
        self.line(img, (l, GOAL_Y.0), (back, GOAL_Y.0), color);
        self.line(img, (l, GOAL_Y.1), (back, GOAL_Y.1), color);
        self.line(img, (back, GOAL_Y.0), (back, GOAL_Y.1), color);

        let centre_y = w / 2.0;
        let penalty_box_edge = l - PENALTY_AREA_DEPTH;
        self.arc(img, PENALTY_SPOT_X, centre_y, CIRCLE_RADIUS, color, |x, _| {
            x <= penalty_box_edge
        });
        self.arc(img, HALFWAY, centre_y, CIRCLE_RADIUS, color, |x, _| x >= HALFWAY);

        for (x, y) in [(PENALTY_SPOT_X, centre_y), (HALFWAY, centre_y)] {
            let centre = self.to_pixel(x, y);
            fill_circle(img, centre, (SPOT_RADIUS * self.scale).max(1.5), color);
        }
    }
}

pub fn hex(code: &str) -> Rgb<u8> {
    let code = code.trim_start_matches('#');
    let channel = |i: usize| {
        code.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    Rgb([channel(0), channel(2), channel(4)])
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Fill pixels whose centres lie in `[left, right) × [top, bottom)`.
pub fn fill_rect(img: &mut RgbImage, left: f64, top: f64, right: f64, bottom: f64, color: Rgb<u8>) {
    let x0 = left.round() as i64;
    let x1 = right.round() as i64;
    let y0 = top.round() as i64;
    let y1 = bottom.round() as i64;
    for py in y0..y1 {
        for px in x0..x1 {
            put(img, px, py, color);
        }
    }
}

pub fn fill_circle(img: &mut RgbImage, centre: (f64, f64), radius: f64, color: Rgb<u8>) {
    stamp_circle(img, centre, radius, |_, _| Some(color));
}

/// Ring of the given thickness, measured inward from `radius`.
pub fn draw_ring(
    img: &mut RgbImage,
    centre: (f64, f64),
    radius: f64,
    thickness: f64,
    color: Rgb<u8>,
) {
    let inner = (radius - thickness).max(0.0);
    stamp_circle(img, centre, radius, |dx, dy| {
        let d = (dx * dx + dy * dy).sqrt();
        (d >= inner).then_some(color)
    });
}

/// Diagonal `///` hatching clipped to a disc.
pub fn hatch_circle(img: &mut RgbImage, centre: (f64, f64), radius: f64, spacing: i64, color: Rgb<u8>) {
    let spacing = spacing.max(2);
    stamp_circle(img, centre, radius, |dx, dy| {
        let sum = (centre.0 + dx).floor() as i64 + (centre.1 + dy).floor() as i64;
        (sum.rem_euclid(spacing) == 0).then_some(color)
    });
}

// Calls `shade(dx, dy)` for every pixel inside the disc
fn stamp_circle<F>(img: &mut RgbImage, centre: (f64, f64), radius: f64, shade: F)
where
    F: Fn(f64, f64) -> Option<Rgb<u8>>,
{
    let (cx, cy) = centre;
    let r = radius.max(0.5);
    let x0 = (cx - r).floor() as i64;
    let x1 = (cx + r).ceil() as i64;
    let y0 = (cy - r).floor() as i64;
    let y1 = (cy + r).ceil() as i64;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                if let Some(color) = shade(dx, dy) {
                    put(img, px, py, color);
                }
            }
        }
    }
}

pub fn draw_line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb<u8>) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = (dx * dx + dy * dy).sqrt();
    let steps = (length * 2.0).ceil().max(1.0) as usize;
    let radius = width / 2.0;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        fill_circle(img, (from.0 + dx * t, from.1 + dy * t), radius, color);
    }
}
