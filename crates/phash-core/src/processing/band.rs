use ndarray::{s, Array2};

use crate::error::{Error, Result};

/// Keep the top-left `size`×`size` low-frequency block of a DCT output
pub fn crop_dct2d(matrix: &Array2<f64>, size: usize) -> Result<Array2<f64>> {
    if size == 0 {
        return Err(Error::Configuration(
            "crop size must be positive".to_string(),
        ));
    }

    let (rows, cols) = matrix.dim();
    if size > rows || size > cols {
        return Err(Error::ShapeMismatch(format!(
            "crop size {} exceeds matrix bounds {}x{}",
            size, rows, cols
        )));
    }

    Ok(matrix.slice(s![..size, ..size]).to_owned())
}

/// Rescale a matrix to [0, 255] so a DCT output can be viewed as an image.
/// A constant matrix has no range and maps to all zeros.
pub fn normalize(matrix: &Array2<f64>) -> Array2<f64> {
    let min = matrix.iter().copied().fold(f64::INFINITY, f64::min);
    let max = matrix.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !(range > 0.0) {
        return Array2::zeros(matrix.dim());
    }

    matrix.mapv(|value| (value - min) / range * 255.0)
}
