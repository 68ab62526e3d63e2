//! # Discrete Cosine Transform
//!
//! Type-II DCT over sequences and square matrices, scaled so that the DC term
//! is `sqrt(1/n) * sum` and every AC term is `sqrt(2/n) * sum(x_j * cos(pi/n * (j + 0.5) * i))`.
//!
//! The unscaled transform comes from `rustdct`. Each output is then scaled and
//! rounded to a fixed number of decimal digits so that fingerprints stay
//! bit-exact across platforms on near-threshold coefficients.

use std::sync::Arc;

use ndarray::{Array2, ArrayViewMut1};
use rustdct::{DctPlanner, TransformType2And3};

use crate::error::{Error, Result};
use crate::types::FrequencyMatrix;

/// A planned DCT-II for one sequence length
pub struct DctPlan {
    len: usize,
    precision: u32,
    dct: Arc<dyn TransformType2And3<f64>>,
    dc_scale: f64,
    ac_scale: f64,
}

impl DctPlan {
    /// Plan a transform for sequences of `len` values
    pub fn new(len: usize, precision: u32) -> Result<Self> {
        if len == 0 {
            return Err(Error::ShapeMismatch(
                "cannot transform an empty sequence".to_string(),
            ));
        }

        let mut planner = DctPlanner::new();
        let n = len as f64;

        Ok(Self {
            len,
            precision,
            dct: planner.plan_dct2(len),
            dc_scale: (1.0 / n).sqrt(),
            ac_scale: (2.0 / n).sqrt(),
        })
    }

    /// Transform `buffer` in place
    pub fn process(&self, buffer: &mut [f64]) -> Result<()> {
        if buffer.len() != self.len {
            return Err(Error::ShapeMismatch(format!(
                "sequence of length {} does not match planned length {}",
                buffer.len(),
                self.len
            )));
        }

        self.dct.process_dct2(buffer);

        for (i, value) in buffer.iter_mut().enumerate() {
            let scale = if i == 0 { self.dc_scale } else { self.ac_scale };
            *value = round_to(*value * scale, self.precision);
        }

        Ok(())
    }

    /// Transform one row or column of a matrix in place
    fn process_lane(&self, mut lane: ArrayViewMut1<f64>, scratch: &mut Vec<f64>) -> Result<()> {
        scratch.clear();
        scratch.extend(lane.iter().copied());
        self.process(scratch)?;

        for (dst, src) in lane.iter_mut().zip(scratch.iter()) {
            *dst = *src;
        }
        Ok(())
    }
}

/// Round half away from zero to `digits` decimal places
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;

    // Keep -0.0 out of the output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// One-dimensional DCT-II of `sequence`, rounded to `precision` digits
pub fn dct1d(sequence: &[f64], precision: u32) -> Result<Vec<f64>> {
    let plan = DctPlan::new(sequence.len(), precision)?;
    let mut output = sequence.to_vec();
    plan.process(&mut output)?;
    Ok(output)
}

/// Two-dimensional DCT-II: every row is transformed, then every column
pub fn dct2d(matrix: &Array2<f64>, precision: u32) -> Result<FrequencyMatrix> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(Error::ShapeMismatch(format!(
            "DCT input must be square, got {}x{}",
            rows, cols
        )));
    }

    let plan = DctPlan::new(cols, precision)?;
    let mut output = matrix.to_owned();
    let mut scratch = Vec::with_capacity(cols);

    for row in output.rows_mut() {
        plan.process_lane(row, &mut scratch)?;
    }
    for column in output.columns_mut() {
        plan.process_lane(column, &mut scratch)?;
    }

    Ok(output)
}
