use crate::config::BIN_GROUP_SIZE;
use crate::error::{Error, Result};

/// Hamming distance between two hex fingerprints with 4 bits per digit
pub fn calc_distance(a: &str, b: &str) -> Result<u32> {
    calc_distance_with_group(a, b, BIN_GROUP_SIZE)
}

/// Hamming distance between two hex fingerprints whose digits each hold
/// `group_size` bits.
///
/// Fails with `LengthMismatch` when the strings differ in length and with
/// `Format` when either one is empty, holds a non-hex character, or holds a
/// digit too large for `group_size` bits.
pub fn calc_distance_with_group(a: &str, b: &str, group_size: usize) -> Result<u32> {
    check_group_size(group_size)?;

    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a != len_b {
        return Err(Error::LengthMismatch {
            left: len_a,
            right: len_b,
        });
    }

    let digits_a = parse_digits(a, group_size)?;
    let digits_b = parse_digits(b, group_size)?;

    Ok(digits_a
        .iter()
        .zip(digits_b.iter())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum())
}

pub(crate) fn check_group_size(group_size: usize) -> Result<()> {
    if group_size == 0 || group_size > BIN_GROUP_SIZE {
        return Err(Error::Configuration(format!(
            "bit group size must be between 1 and {}, got {}",
            BIN_GROUP_SIZE, group_size
        )));
    }
    Ok(())
}

pub(crate) fn parse_digits(hash: &str, group_size: usize) -> Result<Vec<u32>> {
    if hash.is_empty() {
        return Err(Error::Format("fingerprint is empty".to_string()));
    }

    let limit = 1u32 << group_size;
    hash.chars()
        .map(|c| match c.to_digit(16) {
            Some(digit) if digit < limit => Ok(digit),
            Some(_) => Err(Error::Format(format!(
                "digit '{}' in '{}' does not fit in {} bits",
                c, hash, group_size
            ))),
            None => Err(Error::Format(format!(
                "'{}' is not a hexadecimal digit in '{}'",
                c, hash
            ))),
        })
        .collect()
}
