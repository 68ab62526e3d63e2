use ndarray::Array2;

use crate::error::{Error, Result};
use crate::types::BitMatrix;

/// Threshold a matrix against its own mean: 1 where `value >= mean`, else 0
pub fn binarize(matrix: &Array2<f64>) -> Result<BitMatrix> {
    if matrix.is_empty() {
        return Err(Error::ShapeMismatch(
            "cannot binarize an empty matrix".to_string(),
        ));
    }

    // Sequential row-major sum; ties against the mean are load-bearing
    let sum: f64 = matrix.iter().sum();
    let mean = sum / matrix.len() as f64;

    Ok(matrix.mapv(|value| u8::from(value >= mean)))
}
