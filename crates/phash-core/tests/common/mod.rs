//! Synthetic test images built from DCT basis functions.
//!
//! An intensity pattern `128 + sum(a * b_v(y) * b_u(x))` has exactly the
//! coefficients `a` in its 32×32 DCT, so the expected fingerprints are known
//! in closed form instead of depending on checked-in fixtures.
#![allow(dead_code)]

use image::{DynamicImage, GrayImage, Luma};
use ndarray::Array2;
use std::f64::consts::PI;

pub const SIZE: usize = 32;
pub const MID_GREY: f64 = 128.0;
pub const AMPLITUDE: f64 = 200.0;

/// Band cells (row, col) carrying the base pattern; every column index is odd,
/// so a horizontal mirror negates all of them
pub const BASE_CELLS: [(usize, usize); 8] = [
    (0, 1),
    (0, 3),
    (1, 1),
    (2, 3),
    (3, 5),
    (4, 7),
    (5, 1),
    (6, 5),
];

/// Cells negated by the heavy alteration
pub const HEAVY_CELLS: [(usize, usize); 4] = [(2, 3), (3, 5), (4, 7), (6, 5)];

pub const BASE_FINGERPRINT: &str = "d040100401400400";
pub const HEAVY_FINGERPRINT: &str = "d040000000400000";
pub const FLIPPED_FINGERPRINT: &str = "8000000000000000";

pub type Coefficients = Vec<((usize, usize), f64)>;

pub fn base_coefficients() -> Coefficients {
    BASE_CELLS.iter().map(|&cell| (cell, AMPLITUDE)).collect()
}

pub fn heavy_coefficients() -> Coefficients {
    BASE_CELLS
        .iter()
        .map(|&cell| {
            let sign = if HEAVY_CELLS.contains(&cell) { -1.0 } else { 1.0 };
            (cell, sign * AMPLITUDE)
        })
        .collect()
}

/// DCT basis function of frequency `u` at continuous sample position `t`
fn basis(u: usize, t: f64) -> f64 {
    let n = SIZE as f64;
    let alpha = if u == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
    alpha * (PI / n * (t + 0.5) * u as f64).cos()
}

fn pattern_value(coefficients: &Coefficients, ty: f64, tx: f64) -> f64 {
    MID_GREY
        + coefficients
            .iter()
            .map(|&((v, u), a)| a * basis(v, ty) * basis(u, tx))
            .sum::<f64>()
}

/// The pattern sampled directly as a 32×32 intensity matrix
pub fn pattern_matrix(coefficients: &Coefficients) -> Array2<f64> {
    Array2::from_shape_fn((SIZE, SIZE), |(y, x)| {
        pattern_value(coefficients, y as f64, x as f64)
    })
}

/// The same pattern rendered as an 8-bit image at `resolution`×`resolution`
pub fn render(coefficients: &Coefficients, resolution: u32) -> GrayImage {
    let scale = SIZE as f64 / resolution as f64;
    GrayImage::from_fn(resolution, resolution, |x, y| {
        let tx = (x as f64 + 0.5) * scale - 0.5;
        let ty = (y as f64 + 0.5) * scale - 0.5;
        let value = pattern_value(coefficients, ty, tx).round().clamp(0.0, 255.0);
        Luma([value as u8])
    })
}

pub fn base_image(resolution: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(render(&base_coefficients(), resolution))
}

/// Base image with a small saturated block stamped in the top-right corner
pub fn watermarked_image(resolution: u32) -> DynamicImage {
    let mut image = render(&base_coefficients(), resolution);
    let mark = resolution / 16;
    for y in 0..mark {
        for x in resolution - mark..resolution {
            image.put_pixel(x, y, Luma([255]));
        }
    }
    DynamicImage::ImageLuma8(image)
}

pub fn heavily_altered_image(resolution: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(render(&heavy_coefficients(), resolution))
}

/// Base pattern rendered at `resolution`×`resolution` and centred on a canvas
/// twice as wide, with noise filling the side bands
pub fn letterboxed_image(resolution: u32) -> DynamicImage {
    let pattern = render(&base_coefficients(), resolution);
    let offset = resolution / 2;
    let canvas = GrayImage::from_fn(resolution * 2, resolution, |x, y| {
        if (offset..offset + resolution).contains(&x) {
            *pattern.get_pixel(x - offset, y)
        } else {
            Luma([((x * 7919 + y * 104_729) % 251) as u8])
        }
    });
    DynamicImage::ImageLuma8(canvas)
}
