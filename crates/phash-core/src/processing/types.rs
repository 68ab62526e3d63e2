//! Fingerprint newtype and per-image results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::distance::{calc_distance, check_group_size, parse_digits};

/// A perceptual hash: lowercase hex digits, each encoding a group of bits
/// from the row-major flattening of the binarized low-frequency band
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an encoder output that is already known to be lowercase hex
    pub(crate) fn from_encoded(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of hex digits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Calculate the Hamming distance between two fingerprints
    pub fn distance(&self, other: &Fingerprint) -> Result<u32> {
        calc_distance(&self.0, &other.0)
    }

    /// Check if two images are perceptually similar based on a threshold
    pub fn is_similar(&self, other: &Fingerprint, threshold: u32) -> Result<bool> {
        Ok(self.distance(other)? <= threshold)
    }

    /// Expand into the bits it was encoded from, `group_size` per digit and
    /// most significant bit first
    pub fn to_bits(&self, group_size: usize) -> Result<Vec<u8>> {
        check_group_size(group_size)?;
        let digits = parse_digits(&self.0, group_size)?;

        Ok(digits
            .into_iter()
            .flat_map(|digit| {
                (0..group_size)
                    .rev()
                    .map(move |shift| ((digit >> shift) & 1) as u8)
            })
            .collect())
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::Format("fingerprint is empty".to_string()));
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(Error::Format(format!(
                "'{}' is not a hexadecimal digit in '{}'",
                bad, s
            )));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of processing a single image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHashResult {
    /// Path to the image file
    pub path: PathBuf,
    /// Perceptual hash of the image
    pub fingerprint: Fingerprint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::encode::encode_bits;

    #[test]
    fn test_parse_lowercases() {
        let fingerprint: Fingerprint = "D040100401400400".parse().unwrap();
        assert_eq!(fingerprint.as_str(), "d040100401400400");
        assert_eq!(fingerprint.len(), 16);
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(matches!(
            "1a2g".parse::<Fingerprint>(),
            Err(Error::Format(_))
        ));
        assert!(matches!("".parse::<Fingerprint>(), Err(Error::Format(_))));
    }

    #[test]
    fn test_to_bits_is_msb_first() {
        let fingerprint: Fingerprint = "3d".parse().unwrap();
        assert_eq!(fingerprint.to_bits(4).unwrap(), vec![0, 0, 1, 1, 1, 1, 0, 1]);
    }

    #[test]
    fn test_to_bits_honours_group_size() {
        let bits = ndarray::array![[1, 0], [1, 1]];

        let pairs = encode_bits(&bits, 2).unwrap();
        assert_eq!(pairs.as_str(), "23");
        assert_eq!(pairs.to_bits(2).unwrap(), vec![1, 0, 1, 1]);

        let singles = encode_bits(&bits, 1).unwrap();
        assert_eq!(singles.to_bits(1).unwrap(), vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_to_bits_rejects_wide_digits() {
        let fingerprint: Fingerprint = "3d".parse().unwrap();
        assert!(matches!(fingerprint.to_bits(2), Err(Error::Format(_))));
        assert!(matches!(fingerprint.to_bits(5), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_serde_validates() {
        let fingerprint: Fingerprint = serde_json::from_str("\"00ff\"").unwrap();
        assert_eq!(serde_json::to_string(&fingerprint).unwrap(), "\"00ff\"");
        assert!(serde_json::from_str::<Fingerprint>("\"zz\"").is_err());
    }

    #[test]
    fn test_is_similar() {
        let a: Fingerprint = "ff00".parse().unwrap();
        let b: Fingerprint = "ff0f".parse().unwrap();
        assert!(a.is_similar(&b, 4).unwrap());
        assert!(!a.is_similar(&b, 3).unwrap());
    }
}
