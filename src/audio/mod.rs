mod aligner;
mod analyzer;
mod comparator;
mod config;
mod data;
mod hamming;
mod region;

pub use aligner::{aligned, best_offset, trim_to_even};
pub use analyzer::{Analyzer, MatchOutcome, PairResult, SearchResult};
pub use comparator::{pairs, Comparator};
pub use config::SearchConfig;
pub use data::Fingerprint;
pub use hamming::{distance_profile, popcount, popcount_swar, window_score};
pub use region::find_region;

/// Default total duration (seconds) represented by one full fingerprint.
///
/// Fingerprints are extracted from a fixed-length slice of each asset, so the number of
/// samples says nothing about duration. Every sample covers `total / len` seconds.
pub const DEFAULT_TOTAL_DURATION: f64 = 300.0;

/// Default Hamming distance threshold.
///
/// A profile position qualifies when the mean distance of the three positions after it is
/// strictly below this value. The range is 0 (exact match) to 64 (no match).
pub const DEFAULT_HAMMING_THRESHOLD: u32 = 8;

/// Default minimum match duration (seconds).
///
/// A region is only reported if it runs for at least this long in the first asset.
pub const DEFAULT_MIN_MATCH_DURATION: f64 = 5.0; // seconds

/// Number of bits in a single fingerprint sample.
pub(crate) const BITS_PER_SAMPLE: u32 = u64::BITS;
