use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::util;
use crate::Result;

use super::{aligner, hamming, region, SearchConfig};

/// Outcome of a pairwise search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// A region was found and is long enough.
    Found,
    /// No position in the distance profile qualified.
    NotFound,
    /// A region was found but is shorter than the configured minimum.
    TooShort,
}

/// Time range (seconds) of the shared region in a single asset.
///
/// When there is no match, `start` and `end` hold a sentinel: [SearchResult::NOT_FOUND] if no
/// region was found at all, or [SearchResult::TOO_SHORT] if the region was too short.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub start: f64,
    pub end: f64,
}

impl SearchResult {
    pub const NOT_FOUND: f64 = 0.0;
    pub const TOO_SHORT: f64 = -1.0;

    fn new(name: String, (start, end): (f64, f64)) -> Self {
        Self { name, start, end }
    }
}

/// Result of comparing two fingerprints. The order of `first` and `second` follows the order the
/// fingerprints were passed in.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PairResult {
    pub first: SearchResult,
    pub second: SearchResult,
    /// Best alignment offset in samples. Positive if the content in `first` starts later.
    pub offset: isize,
    pub outcome: MatchOutcome,
}

impl PairResult {
    pub fn is_match(&self) -> bool {
        self.outcome == MatchOutcome::Found
    }
}

impl Display for PairResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} <> {} (offset: {})",
            self.first.name, self.second.name, self.offset
        )?;
        for r in [&self.first, &self.second] {
            match self.outcome {
                MatchOutcome::Found => writeln!(
                    f,
                    "* {} - {}-{}",
                    r.name,
                    util::format_secs(r.start),
                    util::format_secs(r.end)
                )?,
                MatchOutcome::NotFound => writeln!(f, "* {} - N/A", r.name)?,
                MatchOutcome::TooShort => writeln!(f, "* {} - too short", r.name)?,
            }
        }
        Ok(())
    }
}

/// Finds the shared region between two fingerprints.
///
/// At a high-level, the analyzer does the following for a pair of fingerprints:
///
/// 1. Trims both to a common, even length `N`
/// 2. Finds the offset at which they line up best
/// 3. Computes the per-sample Hamming distance of the overlapping windows
/// 4. Picks the region spanning all positions whose lookahead distance is below the threshold
/// 5. Converts the region to seconds in each asset, given that `N` samples cover the configured
///    total duration
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: SearchConfig,
}

impl Analyzer {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Compares two fingerprints.
    ///
    /// Fails if the config is invalid, or if the fingerprints cannot be lined up: one of them is
    /// too short, or their lengths differ by more than one sample.
    pub fn search(
        &self,
        first_name: impl Into<String>,
        first: &[u64],
        second_name: impl Into<String>,
        second: &[u64],
    ) -> Result<PairResult> {
        let (first_name, second_name) = (first_name.into(), second_name.into());
        let span = tracing::span!(
            tracing::Level::TRACE,
            "search",
            first = first_name.as_str(),
            second = second_name.as_str()
        );
        let _enter = span.enter();

        self.config.validate()?;

        let (first, second) = aligner::trim_to_even(first, second)?;
        let n = first.len();

        let offset = aligner::best_offset(first, second)?;
        let (f1, f2) = aligner::aligned(offset, first, second)?;
        let profile = hamming::distance_profile(f1, f2)?;
        let region = region::find_region(&profile, self.config.hamming_threshold);

        tracing::debug!(samples = n, offset, ?region, "finished alignment");

        let (outcome, first_range, second_range) = self.to_ranges(offset, region, n);

        tracing::debug!(?outcome, ?first_range, ?second_range, "finished search");

        Ok(PairResult {
            first: SearchResult::new(first_name, first_range),
            second: SearchResult::new(second_name, second_range),
            offset,
            outcome,
        })
    }

    // Converts a region in the aligned profile into time ranges within each asset and applies
    // the minimum match duration. `n` is the trimmed fingerprint length before alignment.
    fn to_ranges(
        &self,
        offset: isize,
        region: Option<(usize, usize)>,
        n: usize,
    ) -> (MatchOutcome, (f64, f64), (f64, f64)) {
        let (start, end) = match region {
            Some(r) => r,
            None => {
                let s = SearchResult::NOT_FOUND;
                return (MatchOutcome::NotFound, (s, s), (s, s));
            }
        };

        let secs_per_sample = self.config.total_duration_secs / n as f64;
        let offset_secs = offset.unsigned_abs() as f64 * secs_per_sample;
        let region_start = start as f64 * secs_per_sample;
        let region_end = end as f64 * secs_per_sample;

        let shifted = (region_start + offset_secs, region_end + offset_secs);
        let unshifted = (region_start, region_end);
        let (first, second) = if offset >= 0 {
            (shifted, unshifted)
        } else {
            (unshifted, shifted)
        };

        if first.1 - first.0 < self.config.min_match_secs {
            let s = SearchResult::TOO_SHORT;
            return (MatchOutcome::TooShort, (s, s), (s, s));
        }

        (MatchOutcome::Found, first, second)
    }
}
