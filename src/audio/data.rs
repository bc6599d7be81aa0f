use std::path::Path;

use crate::{Error, Result};

/// Fingerprint of a single audio asset: one 64-bit hash per fixed-length window of audio.
///
/// On disk, a fingerprint is a comma-separated list of base-10 signed 64-bit integers. The
/// signed values are reinterpreted bit-for-bit as unsigned hashes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub(crate) data: Vec<u64>,
}

impl From<Vec<u64>> for Fingerprint {
    fn from(data: Vec<u64>) -> Self {
        Self { data }
    }
}

impl Fingerprint {
    /// Returns the raw hashes.
    pub fn data(&self) -> &[u64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Parses the comma-separated text form of a fingerprint.
    ///
    /// Newlines and surrounding whitespace in each field are ignored, as are empty fields (e.g.,
    /// a trailing comma). `path` is only used for error reporting.
    pub fn parse(text: &str, path: impl AsRef<Path>) -> Result<Self> {
        let mut data = Vec::with_capacity(text.len() / 20 + 1);

        for token in text.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let value: i64 = token.parse().map_err(|source| Error::FingerprintParse {
                path: path.as_ref().to_owned(),
                token: token.to_owned(),
                source,
            })?;
            data.push(value as u64);
        }

        Ok(Self { data })
    }

    /// Loads a fingerprint from a text file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let fingerprint = Self::parse(&text, path)?;
        if fingerprint.is_empty() {
            return Err(Error::EmptyFingerprint(path.to_owned()));
        }

        tracing::debug!(
            samples = fingerprint.len(),
            "loaded fingerprint from {}",
            path.display()
        );

        Ok(fingerprint)
    }
}
