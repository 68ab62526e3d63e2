use crate::config::BIN_GROUP_SIZE;
use crate::error::{Error, Result};
use crate::types::BitMatrix;

use super::types::Fingerprint;

/// Pack a bit matrix into hex digits.
///
/// The matrix is flattened row-major and split into groups of `group_size`
/// bits; each group, read most significant bit first, becomes one lowercase
/// hex digit. With an 8×8 band and groups of 4 this yields 16 digits.
pub fn encode_bits(bits: &BitMatrix, group_size: usize) -> Result<Fingerprint> {
    if group_size == 0 || group_size > BIN_GROUP_SIZE {
        return Err(Error::Configuration(format!(
            "bit group size must be between 1 and {}, got {}",
            BIN_GROUP_SIZE, group_size
        )));
    }
    if bits.is_empty() {
        return Err(Error::ShapeMismatch(
            "cannot encode an empty bit matrix".to_string(),
        ));
    }
    if bits.len() % group_size != 0 {
        return Err(Error::Configuration(format!(
            "{} bits are not divisible into groups of {}",
            bits.len(),
            group_size
        )));
    }

    let flat: Vec<u8> = bits.iter().copied().collect();
    let mut hex = String::with_capacity(flat.len() / group_size);

    for group in flat.chunks(group_size) {
        let value = group
            .iter()
            .fold(0u32, |acc, bit| (acc << 1) | u32::from(*bit & 1));

        let digit = char::from_digit(value, 16).ok_or_else(|| {
            Error::Configuration(format!(
                "bit group {:?} does not fit in one hex digit",
                group
            ))
        })?;
        hex.push(digit);
    }

    Ok(Fingerprint::from_encoded(hex))
}
