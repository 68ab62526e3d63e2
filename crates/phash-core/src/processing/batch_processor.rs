//! Parallel fingerprinting of image files.
//!
//! Every hash computation is independent, so files are fanned out over a
//! dedicated rayon pool sharing one read-only `PerceptualHasher`. Failures are
//! logged and counted; they never produce a placeholder hash.

use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::logging::log_hash_error;

use super::perceptual::{phash_from_file, PerceptualHasher};
use super::types::ImageHashResult;

/// Number of worker threads for a configured value, where 0 means one per CPU
pub fn thread_count(configured: usize) -> usize {
    if configured == 0 {
        num_cpus::get().max(1)
    } else {
        configured
    }
}

/// Fingerprint a single file, logging any failure
pub fn process_single_image(path: &Path, hasher: &PerceptualHasher) -> Option<ImageHashResult> {
    let start = Instant::now();

    match phash_from_file(path, hasher) {
        Ok(fingerprint) => {
            log::debug!(
                "Hashed '{}' -> {} in {:?}",
                path.display(),
                fingerprint,
                start.elapsed()
            );
            Some(ImageHashResult {
                path: path.to_path_buf(),
                fingerprint,
            })
        }
        Err(e) => {
            log_hash_error(path, &e);
            None
        }
    }
}

/// Process a batch of images and compute their fingerprints with error handling
/// Returns a tuple of (successful results in input order, error count)
pub fn process_image_batch(
    paths: &[PathBuf],
    hasher: &PerceptualHasher,
) -> Result<(Vec<ImageHashResult>, usize)> {
    let thread_limit = thread_count(hasher.config().threads);
    info!(
        "Processing batch of {} images on {} threads",
        paths.len(),
        thread_limit
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_limit)
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to build thread pool: {}", e)))?;

    let batch_start = Instant::now();
    let error_counter = AtomicUsize::new(0);

    let results: Vec<ImageHashResult> = pool.install(|| {
        paths
            .par_iter()
            .filter_map(|path| {
                let result = process_single_image(path, hasher);
                if result.is_none() {
                    error_counter.fetch_add(1, Ordering::Relaxed);
                }
                result
            })
            .collect()
    });

    let errors = error_counter.load(Ordering::Relaxed);
    info!(
        "Batch complete: {} hashed, {} failed in {:.2?}",
        results.len(),
        errors,
        batch_start.elapsed()
    );

    Ok((results, errors))
}
