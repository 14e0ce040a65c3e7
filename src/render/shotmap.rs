use super::encode::EncodedImage;
use super::pitch::{draw_ring, fill_circle, hatch_circle, hex, HalfPitch};
use crate::analysis::filter::FilteredView;
use crate::data::models::ShotRecord;
use crate::error::AppError;
use image::RgbImage;

const GRASS_LIGHT: &str = "#c2d59d";
const GRASS_DARK: &str = "#aabb97";
const LINE_COLOR: &str = "#ffffff";
const MISS_EDGE: &str = "#b94b75";
const GOAL_EDGE: &str = "#0000ff";
const GOAL_FACE: &str = "#ffffff";

const SCALE: f64 = 10.0;
const PADDING: f64 = 30.0;
const STRIPES: usize = 10;
// pitch units per typographic point at the reference figure size
const UNITS_PER_POINT: f64 = 0.11;

fn marker_radius_px(record: &ShotRecord) -> f64 {
    (record.marker_area() / std::f64::consts::PI).sqrt() * UNITS_PER_POINT * SCALE
}

fn paint_grass(img: &mut RgbImage, pitch: &HalfPitch) {
    let light = hex(GRASS_LIGHT);
    let dark = hex(GRASS_DARK);
    let band = (120.0 - 60.0) / STRIPES as f64;
    for i in 0..STRIPES {
        let x0 = 60.0 + band * i as f64;
        let color = if i % 2 == 0 { dark } else { light };
        pitch.fill_region(img, x0, x0 + band, 0.0, 80.0, color);
    }
}

/// The xG shot map: misses as hatched rings, goals as filled markers.
///
/// Marker area follows `my_xg`; shots in the defending half are not drawn.
pub fn render_shot_map(view: &FilteredView) -> RgbImage {
    let pitch = HalfPitch::new(PADDING, PADDING, SCALE);
    let width = (pitch.width_px() + PADDING * 2.0).ceil() as u32;
    let height = (pitch.height_px() + PADDING * 2.0).ceil() as u32;

    let mut img = RgbImage::from_pixel(width, height, hex(GRASS_LIGHT));
    paint_grass(&mut img, &pitch);
    pitch.draw_markings(&mut img, hex(LINE_COLOR));

    let miss_edge = hex(MISS_EDGE);
    for record in view.misses().iter().filter(|r| pitch.contains(r.x, r.y)) {
        let centre = pitch.to_pixel(record.x, record.y);
        let radius = marker_radius_px(record);
        hatch_circle(&mut img, centre, radius, 4, miss_edge);
        draw_ring(&mut img, centre, radius, 1.5, miss_edge);
    }

    let goal_edge = hex(GOAL_EDGE);
    let goal_face = hex(GOAL_FACE);
    for record in view.goals().iter().filter(|r| pitch.contains(r.x, r.y)) {
        let centre = pitch.to_pixel(record.x, record.y);
        let radius = marker_radius_px(record);
        fill_circle(&mut img, centre, radius, goal_face);
        draw_ring(&mut img, centre, radius, 1.0, goal_edge);
    }

    img
}

pub fn shot_map(view: &FilteredView) -> Result<EncodedImage, AppError> {
    tracing::debug!(shots = view.len(), "rendering xG shot map");
    EncodedImage::from_image(&render_shot_map(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter::tests::shot;
    use crate::analysis::filter::{filter, FilterCriteria};
    use crate::data::loader::ShotTable;

    #[test]
    fn bigger_xg_means_bigger_marker() {
        let mut low = shot("La Liga", "2019/2020", "Barcelona", "A", false);
        low.my_xg = 0.05;
        let mut high = low.clone();
        high.my_xg = 0.8;
        assert!(marker_radius_px(&high) > marker_radius_px(&low));
    }

    #[test]
    fn goal_marker_is_white_at_centre() {
        let mut goal = shot("La Liga", "2019/2020", "Barcelona", "A", true);
        goal.x = 110.0;
        goal.y = 40.0;
        goal.my_xg = 0.9;
        let table = ShotTable::new(vec![goal]);
        let view = filter(&table, &FilterCriteria::new());
        let img = render_shot_map(&view);

        let (px, py) = HalfPitch::new(PADDING, PADDING, SCALE).to_pixel(110.0, 40.0);
        assert_eq!(*img.get_pixel(px as u32, py as u32), hex(GOAL_FACE));
    }

    #[test]
    fn defending_half_shots_are_skipped() {
        let mut far = shot("La Liga", "2019/2020", "Barcelona", "A", true);
        far.x = 30.0;
        let table = ShotTable::new(vec![far]);
        let with_far = render_shot_map(&filter(&table, &FilterCriteria::new()));
        let empty = ShotTable::default();
        let without = render_shot_map(&filter(&empty, &FilterCriteria::new()));
        assert_eq!(with_far, without);
    }
}
