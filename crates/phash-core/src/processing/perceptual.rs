//! # Perceptual Hashing Module
//!
//! DCT-based perceptual fingerprints for image comparison and similarity detection.
//!
//! ## Overview
//!
//! Perceptual hashing generates "fingerprints" that remain similar for visually similar images,
//! unlike cryptographic hashes where minor changes produce completely different outputs.
//!
//! The pipeline works on an N×N grayscale intensity matrix (32×32 by default):
//!
//! 1. 2D DCT-II of the matrix, coefficients rounded to 8 decimal digits
//! 2. Crop to the top-left K×K low-frequency band (8×8 by default)
//! 3. Binarize the band against its own mean (`value >= mean` is 1)
//! 4. Pack the bits row-major, 4 per hex digit, into a 16-digit fingerprint
//!
//! ## Hamming Distance Interpretation
//!
//! With the default 64-bit fingerprint:
//!
//! - 0-3: Nearly identical images (resized, re-encoded, lightly watermarked)
//! - 4-10: Similar images (same subject with moderate differences)
//! - >10: Different images; mirrored images usually land here too

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{FrequencyMatrix, IntensityMatrix};

use super::band::crop_dct2d;
use super::binarize::binarize;
use super::dct::dct2d;
use super::distance::calc_distance_with_group;
use super::encode::encode_bits;
use super::intensity::{validate_intensity, IntensitySource};
use super::types::Fingerprint;

/// Computes fingerprints with a fixed, validated configuration.
///
/// Holds no mutable state, so one hasher can be shared across threads.
#[derive(Debug, Clone)]
pub struct PerceptualHasher {
    config: Config,
}

impl PerceptualHasher {
    /// Create a hasher, rejecting invalid configurations up front
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full 2D DCT of an intensity matrix
    pub fn frequency_matrix(&self, matrix: &IntensityMatrix) -> Result<FrequencyMatrix> {
        validate_intensity(matrix, self.config.reduced_size)?;
        dct2d(matrix, self.config.precision)
    }

    /// Run DCT, crop, binarize and encode over a pre-normalized intensity matrix
    pub fn compute_fingerprint(&self, matrix: &IntensityMatrix) -> Result<Fingerprint> {
        let frequencies = self.frequency_matrix(matrix)?;
        let band = crop_dct2d(&frequencies, self.config.sampling_size)?;
        let bits = binarize(&band)?;
        let fingerprint = encode_bits(&bits, self.config.bin_group_size)?;

        debug!(
            "Fingerprint {} from {}x{} matrix (DC {:.3})",
            fingerprint,
            self.config.reduced_size,
            self.config.reduced_size,
            frequencies[[0, 0]]
        );

        Ok(fingerprint)
    }

    /// Fingerprint any source that can supply an intensity matrix
    pub fn hash<S: IntensitySource + ?Sized>(&self, source: &S) -> Result<Fingerprint> {
        let matrix = source.intensity_matrix(self.config.reduced_size)?;
        self.compute_fingerprint(&matrix)
    }

    /// Hamming distance using this hasher's bits-per-digit
    pub fn distance(&self, a: &str, b: &str) -> Result<u32> {
        calc_distance_with_group(a, b, self.config.bin_group_size)
    }

    /// Check if two fingerprints are within the configured similarity threshold
    pub fn is_similar(&self, a: &Fingerprint, b: &Fingerprint) -> Result<bool> {
        Ok(self.distance(a.as_str(), b.as_str())? <= self.config.similarity_threshold)
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

/// Fingerprint an intensity matrix with the default configuration
pub fn compute_fingerprint(matrix: &IntensityMatrix) -> Result<Fingerprint> {
    PerceptualHasher::default().compute_fingerprint(matrix)
}

/// Calculate a perceptual hash from an image in memory
pub fn phash_from_img(img: &DynamicImage, hasher: &PerceptualHasher) -> Result<Fingerprint> {
    hasher.hash(img)
}

/// Calculate a perceptual hash from encoded image bytes
pub fn phash_from_memory(bytes: &[u8], hasher: &PerceptualHasher) -> Result<Fingerprint> {
    let img = image::load_from_memory(bytes)?;
    hasher.hash(&img)
}

/// Calculate a perceptual hash from an image file
pub fn phash_from_file<P: AsRef<Path>>(path: P, hasher: &PerceptualHasher) -> Result<Fingerprint> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let img = image::open(path)?;
    hasher.hash(&img)
}
