//! Near-duplicate search over computed fingerprints.

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::processing::{Fingerprint, ImageHashResult};

/// Two images whose fingerprints are within a distance threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub first: PathBuf,
    pub second: PathBuf,
    /// Hamming distance between the two fingerprints
    pub distance: u32,
}

/// Every pair of results at or under `threshold`, closest first
pub fn find_similar_pairs(results: &[ImageHashResult], threshold: u32) -> Vec<SimilarPair> {
    let mut pairs = Vec::new();

    for (i, a) in results.iter().enumerate() {
        for b in &results[i + 1..] {
            match a.fingerprint.distance(&b.fingerprint) {
                Ok(distance) if distance <= threshold => pairs.push(SimilarPair {
                    first: a.path.clone(),
                    second: b.path.clone(),
                    distance,
                }),
                Ok(_) => {}
                Err(e) => warn!(
                    "Skipping pair '{}' / '{}': {}",
                    a.path.display(),
                    b.path.display(),
                    e
                ),
            }
        }
    }

    pairs.sort_by_key(|pair| pair.distance);
    pairs
}

/// Candidate indices ordered by distance to `query`, nearest first.
/// Candidates that cannot be compared (different length) are left out.
pub fn rank_by_similarity(query: &Fingerprint, candidates: &[Fingerprint]) -> Vec<(usize, u32)> {
    let mut ranked: Vec<(usize, u32)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| query.distance(candidate).ok().map(|d| (i, d)))
        .collect();

    ranked.sort_by_key(|&(_, distance)| distance);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(path: &str, hex: &str) -> ImageHashResult {
        ImageHashResult {
            path: PathBuf::from(path),
            fingerprint: hex.parse().unwrap(),
        }
    }

    #[test]
    fn test_find_similar_pairs() {
        let results = vec![
            result("a.png", "ff00ff00ff00ff00"),
            result("b.png", "ff00ff00ff00ff01"),
            result("c.png", "00ff00ff00ff00ff"),
            result("d.png", "ff00ff00ff00ff03"),
        ];

        let pairs = find_similar_pairs(&results, 2);
        let summary: Vec<_> = pairs
            .iter()
            .map(|p| (p.first.to_str().unwrap(), p.second.to_str().unwrap(), p.distance))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("a.png", "b.png", 1),
                ("b.png", "d.png", 1),
                ("a.png", "d.png", 2),
            ]
        );
    }

    #[test]
    fn test_rank_by_similarity_skips_mismatched_lengths() {
        let query: Fingerprint = "ff00".parse().unwrap();
        let candidates: Vec<Fingerprint> = ["00ff", "ff01", "ff", "ff00"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        assert_eq!(
            rank_by_similarity(&query, &candidates),
            vec![(3, 0), (1, 1), (0, 16)]
        );
    }
}
