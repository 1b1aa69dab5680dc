// Linear coordinate conversion between pitch coordinate systems.

use crate::pitch::spec::PitchSpec;

/// Convert a single point from one coordinate system to another.
///
/// Each axis is rescaled independently: the value is normalized against the
/// source extent and projected onto the target extent. When the two systems'
/// y origins sit on opposite touchlines the y fraction is flipped. Values
/// outside the source extents extrapolate, since event feeds routinely contain
/// slightly out-of-bounds coordinates and they must survive conversion.
pub fn transform_point(x: f64, y: f64, from: &PitchSpec, to: &PitchSpec) -> (f64, f64) {
    let tx = (x - from.x_min) / from.x_extent();
    let mut ty = (y - from.y_min) / from.y_extent();
    if from.invert_y != to.invert_y {
        ty = 1.0 - ty;
    }
    (
        to.x_min + tx * to.x_extent(),
        to.y_min + ty * to.y_extent(),
    )
}

/// Convert parallel coordinate slices between systems.
///
/// Pure: preserves element order and count, returns empty output for empty
/// input. The axes are independent, so `xs` and `ys` need not have equal
/// lengths (callers pairing points should pass paired slices).
pub fn transform(xs: &[f64], ys: &[f64], from: &PitchSpec, to: &PitchSpec) -> (Vec<f64>, Vec<f64>) {
    let out_x = xs
        .iter()
        .map(|&x| to.x_min + (x - from.x_min) / from.x_extent() * to.x_extent())
        .collect();
    let out_y = ys
        .iter()
        .map(|&y| {
            let mut t = (y - from.y_min) / from.y_extent();
            if from.invert_y != to.invert_y {
                t = 1.0 - t;
            }
            to.y_min + t * to.y_extent()
        })
        .collect();
    (out_x, out_y)
}
