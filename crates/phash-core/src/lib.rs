//! DCT-based perceptual image fingerprints.
//!
//! This library provides the components of a "phash" pipeline:
//! - 2D DCT-II with fixed normalization and rounding
//! - Low-frequency band cropping and mean binarization
//! - Hex fingerprint encoding and Hamming distance comparison
//! - Image adapters, parallel batch hashing and near-duplicate search

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use processing::{
    binarize, calc_distance, compute_fingerprint, crop_dct2d, dct2d, Fingerprint,
    ImageHashResult, PerceptualHasher,
};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod deduplication;
pub mod logging;
pub mod processing;
pub mod types;
