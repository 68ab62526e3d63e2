//! Adapters between image decoders and the intensity matrix the hash pipeline
//! consumes. Decoding, grayscale conversion and resampling all belong to the
//! `image` crate; this module only shapes its output.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::types::{FrequencyMatrix, IntensityMatrix};

use super::band::normalize;

/// Resampling filter used to reduce images to the configured size
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Anything that can produce a `size`×`size` grayscale intensity matrix
pub trait IntensitySource {
    fn intensity_matrix(&self, size: usize) -> Result<IntensityMatrix>;
}

impl IntensitySource for DynamicImage {
    fn intensity_matrix(&self, size: usize) -> Result<IntensityMatrix> {
        let side = side_length(size)?;
        if self.width() == 0 || self.height() == 0 {
            return Err(Error::ShapeMismatch("image has no pixels".to_string()));
        }

        // Scale to cover the square, crop the centre, then drop colour
        let small = self.resize_to_fill(side, side, RESIZE_FILTER).to_luma8();
        luma_to_matrix(&small, size)
    }
}

impl IntensitySource for GrayImage {
    fn intensity_matrix(&self, size: usize) -> Result<IntensityMatrix> {
        let side = side_length(size)?;
        if self.width() == 0 || self.height() == 0 {
            return Err(Error::ShapeMismatch("image has no pixels".to_string()));
        }

        if self.width() == side && self.height() == side {
            return luma_to_matrix(self, size);
        }

        let (x, y, extent) = centre_square(self.width(), self.height());
        let square = image::imageops::crop_imm(self, x, y, extent, extent).to_image();
        let small = image::imageops::resize(&square, side, side, RESIZE_FILTER);
        luma_to_matrix(&small, size)
    }
}

impl IntensitySource for IntensityMatrix {
    fn intensity_matrix(&self, size: usize) -> Result<IntensityMatrix> {
        validate_intensity(self, size)?;
        Ok(self.clone())
    }
}

/// Check that a matrix is `size`×`size` with only finite cells
pub fn validate_intensity(matrix: &IntensityMatrix, size: usize) -> Result<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(Error::ShapeMismatch(format!(
            "intensity matrix must be square, got {}x{}",
            rows, cols
        )));
    }
    if rows != size {
        return Err(Error::ShapeMismatch(format!(
            "intensity matrix must be {}x{}, got {}x{}",
            size, size, rows, cols
        )));
    }

    if let Some(((row, col), value)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(Error::InvalidIntensity(format!(
            "cell ({}, {}) is {}",
            row, col, value
        )));
    }

    Ok(())
}

/// Render a frequency matrix as a grayscale image for inspection
pub fn preview_image(matrix: &FrequencyMatrix) -> Result<GrayImage> {
    let (rows, cols) = matrix.dim();
    let (width, height) = match (u32::try_from(cols), u32::try_from(rows)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(Error::ShapeMismatch(format!(
                "cannot render a {}x{} matrix",
                rows, cols
            )))
        }
    };

    let normalized = normalize(matrix);
    Ok(GrayImage::from_fn(width, height, |x, y| {
        image::Luma([normalized[[y as usize, x as usize]].round() as u8])
    }))
}

fn side_length(size: usize) -> Result<u32> {
    match u32::try_from(size) {
        Ok(side) if side > 0 => Ok(side),
        _ => Err(Error::Configuration(format!(
            "invalid reduced size {}",
            size
        ))),
    }
}

/// Offset and side of the largest centred square inside a `width`×`height` image
fn centre_square(width: u32, height: u32) -> (u32, u32, u32) {
    let extent = width.min(height);
    ((width - extent) / 2, (height - extent) / 2, extent)
}

fn luma_to_matrix(image: &GrayImage, size: usize) -> Result<IntensityMatrix> {
    let values: Vec<f64> = image.pixels().map(|p| f64::from(p.0[0])).collect();
    Array2::from_shape_vec((size, size), values)
        .map_err(|e| Error::ShapeMismatch(format!("cannot shape pixels into matrix: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    #[test]
    fn test_gray_image_is_row_major() {
        let image = GrayImage::from_fn(4, 4, |x, y| Luma([(y * 4 + x) as u8]));
        let matrix = image.intensity_matrix(4).unwrap();

        assert_eq!(matrix.dim(), (4, 4));
        assert_eq!(matrix[[0, 1]], 1.0);
        assert_eq!(matrix[[1, 0]], 4.0);
        assert_eq!(matrix[[3, 3]], 15.0);
    }

    #[test]
    fn test_dynamic_image_is_resized_and_grayscaled() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 60, Rgb([200, 200, 200])));
        let matrix = image.intensity_matrix(32).unwrap();

        assert_eq!(matrix.dim(), (32, 32));
        assert!(matrix.iter().all(|v| (*v - 200.0).abs() <= 1.0));
    }

    #[test]
    fn test_centre_square() {
        assert_eq!(centre_square(256, 128), (64, 0, 128));
        assert_eq!(centre_square(60, 100), (0, 20, 60));
        assert_eq!(centre_square(32, 32), (0, 0, 32));
    }

    #[test]
    fn test_wide_gray_image_ignores_side_bands() {
        // Left and right quarters are black, the centre square is white
        let image = GrayImage::from_fn(64, 32, |x, _| {
            Luma([if (16..48).contains(&x) { 255 } else { 0 }])
        });
        let matrix = image.intensity_matrix(8).unwrap();
        assert!(matrix.iter().all(|v| *v >= 254.0), "{:?}", matrix);
    }

    #[test]
    fn test_matrix_passthrough_validates_shape() {
        let matrix = Array2::<f64>::zeros((16, 16));
        assert!(matches!(
            matrix.intensity_matrix(32),
            Err(Error::ShapeMismatch(_))
        ));
        assert!(matrix.intensity_matrix(16).is_ok());
    }

    #[test]
    fn test_preview_spans_full_range() {
        let mut matrix = Array2::<f64>::zeros((8, 8));
        matrix[[0, 0]] = 4096.0;
        matrix[[0, 1]] = -200.0;

        let preview = preview_image(&matrix).unwrap();
        assert_eq!(preview.dimensions(), (8, 8));
        assert_eq!(preview.get_pixel(0, 0).0[0], 255);
        assert_eq!(preview.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn test_non_finite_intensity_rejected() {
        let mut matrix = Array2::<f64>::zeros((4, 4));
        matrix[[2, 1]] = f64::NAN;
        assert!(matches!(
            validate_intensity(&matrix, 4),
            Err(Error::InvalidIntensity(_))
        ));
    }
}
