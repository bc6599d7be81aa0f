use crate::{Error, Result};

use super::BITS_PER_SAMPLE;

const M1: u64 = 0x5555_5555_5555_5555;
const M2: u64 = 0x3333_3333_3333_3333;
const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f;
const H01: u64 = 0x0101_0101_0101_0101;

/// Returns the number of set bits in `x`.
#[inline]
pub fn popcount(x: u64) -> u32 {
    x.count_ones()
}

/// Portable bit-trick popcount. Always agrees with [popcount].
pub fn popcount_swar(x: u64) -> u32 {
    // Count of each 2 bits into those 2 bits.
    let x = x - ((x >> 1) & M1);
    // Count of each 4 bits into those 4 bits.
    let x = (x & M2) + ((x >> 2) & M2);
    // Count of each 8 bits into those 8 bits.
    let x = (x + (x >> 4)) & M4;
    // Top byte holds the sum of all bytes.
    (x.wrapping_mul(H01) >> 56) as u32
}

/// Scores how similar two equal-length windows are.
///
/// The result is `1 - (total differing bits) / (64 * len)`, so 1.0 is an exact match and 0.0
/// means every bit differs.
pub fn window_score(a: &[u64], b: &[u64]) -> Result<f64> {
    if a.is_empty() {
        return Err(Error::InvalidInput("window must not be empty"));
    }
    if a.len() != b.len() {
        return Err(Error::InvalidInput("windows must have equal length"));
    }

    let dist: u64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| popcount(x ^ y) as u64)
        .sum();

    Ok(1.0 - dist as f64 / (BITS_PER_SAMPLE as u64 * a.len() as u64) as f64)
}

/// Computes the per-position Hamming distance between two aligned fingerprints of equal length.
pub fn distance_profile(a: &[u64], b: &[u64]) -> Result<Vec<u32>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            first: a.len(),
            second: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| popcount(x ^ y)).collect())
}
