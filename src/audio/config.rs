use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::BITS_PER_SAMPLE;

/// Tunables for a pairwise search.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Duration (seconds) covered by one full fingerprint.
    pub total_duration_secs: f64,
    /// Lookahead mean distance must be strictly below this for a position to qualify.
    pub hamming_threshold: u32,
    /// Shortest match (seconds) that is reported.
    pub min_match_secs: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            total_duration_secs: super::DEFAULT_TOTAL_DURATION,
            hamming_threshold: super::DEFAULT_HAMMING_THRESHOLD,
            min_match_secs: super::DEFAULT_MIN_MATCH_DURATION,
        }
    }
}

impl SearchConfig {
    /// Returns a new [SearchConfig] with the provided `total_duration_secs`.
    pub fn with_total_duration(mut self, total_duration_secs: f64) -> Self {
        self.total_duration_secs = total_duration_secs;
        self
    }

    /// Returns a new [SearchConfig] with the provided `hamming_threshold`.
    pub fn with_hamming_threshold(mut self, hamming_threshold: u32) -> Self {
        self.hamming_threshold = hamming_threshold;
        self
    }

    /// Returns a new [SearchConfig] with the provided `min_match_secs`.
    pub fn with_min_match_duration(mut self, min_match_secs: f64) -> Self {
        self.min_match_secs = min_match_secs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.total_duration_secs > 0.0 && self.total_duration_secs.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "total duration must be a positive number, got {}",
                self.total_duration_secs
            )));
        }
        if self.hamming_threshold > BITS_PER_SAMPLE {
            return Err(Error::InvalidConfig(format!(
                "hamming threshold cannot be larger than {}, got {}",
                BITS_PER_SAMPLE, self.hamming_threshold
            )));
        }
        if !(self.min_match_secs >= 0.0 && self.min_match_secs.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "minimum match duration must not be negative, got {}",
                self.min_match_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.total_duration_secs, 300.0);
        assert_eq!(config.hamming_threshold, 8);
        assert_eq!(config.min_match_secs, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = SearchConfig::default();
        assert!(config.with_total_duration(0.0).validate().is_err());
        assert!(config.with_total_duration(f64::NAN).validate().is_err());
        assert!(config.with_hamming_threshold(65).validate().is_err());
        assert!(config.with_hamming_threshold(64).validate().is_ok());
        assert!(config.with_min_match_duration(-1.0).validate().is_err());
        assert!(config.with_min_match_duration(0.0).validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SearchConfig::default().with_hamming_threshold(10);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"total_duration_secs":300.0,"hamming_threshold":10,"min_match_secs":5.0}"#
        );
        let parsed: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
