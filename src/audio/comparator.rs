#[cfg(feature = "rayon")]
extern crate rayon;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{Error, Result};

use super::{Analyzer, Fingerprint, PairResult, SearchConfig};

/// Returns every unordered pair `(i, j)` with `i < j` out of `n` items.
///
/// Given N items, this yields exactly `N * (N - 1) / 2` pairs in lexicographic order.
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Compares every pair among two or more fingerprint files.
///
/// By default, a fingerprint that cannot be loaded, or a pair that cannot be aligned, aborts the
/// whole run. With `skip_invalid` set, the offending asset or pair is logged and skipped instead.
#[derive(Debug)]
pub struct Comparator<P: AsRef<Path>> {
    paths: Vec<P>,
    config: SearchConfig,
    skip_invalid: bool,
    threading: bool,
    cancel: Arc<AtomicBool>,
}

impl<P: AsRef<Path>> Default for Comparator<P> {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            config: SearchConfig::default(),
            skip_invalid: false,
            threading: true,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<P: AsRef<Path> + Ord> Comparator<P> {
    /// Constructs a [Comparator] from a list of fingerprint paths.
    pub fn from_files(paths: impl Into<Vec<P>>) -> Self {
        let mut comparator = Self::default();
        comparator.paths = paths.into();
        comparator.paths.sort();
        comparator
    }
}

impl<P: AsRef<Path>> Comparator<P> {
    /// Returns the fingerprint paths used by this comparator.
    pub fn paths(&self) -> &[P] {
        &self.paths
    }

    /// Returns a new [Comparator] with the provided `config`.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns a new [Comparator] with `skip_invalid` set to the provided value.
    pub fn with_skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }

    /// Returns a new [Comparator] with `threading` set to the provided value.
    pub fn with_threading(mut self, threading: bool) -> Self {
        self.threading = threading;
        self
    }

    /// Returns a new [Comparator] that stops once `cancel` is set.
    ///
    /// Pairs that are already being compared run to completion; the remaining ones are not
    /// started and [run](Self::run) returns [Error::Cancelled].
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the flag that cancels this comparator when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }
}

impl<P: AsRef<Path> + Sync> Comparator<P> {
    fn load(&self) -> Result<Vec<(String, Fingerprint)>> {
        let mut assets = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let path = path.as_ref();
            match Fingerprint::from_path(path) {
                Ok(fingerprint) => assets.push((path.display().to_string(), fingerprint)),
                Err(e) if self.skip_invalid => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(assets)
    }

    fn search(
        &self,
        analyzer: &Analyzer,
        assets: &[(String, Fingerprint)],
        (i, j): (usize, usize),
    ) -> Result<Option<PairResult>> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }

        let ((first_name, first), (second_name, second)) = (&assets[i], &assets[j]);
        match analyzer.search(first_name, first.data(), second_name, second.data()) {
            Ok(result) => Ok(Some(result)),
            Err(e) if self.skip_invalid => {
                tracing::warn!("skipping pair {} and {}: {}", first_name, second_name, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Compares every pair among already-loaded fingerprints.
    ///
    /// Results are ordered by pair, i.e. `(0, 1), (0, 2), ..., (1, 2), ...`, regardless of the
    /// order in which they complete.
    pub fn search_all(&self, assets: &[(String, Fingerprint)]) -> Result<Vec<PairResult>> {
        self.config.validate()?;

        let analyzer = Analyzer::new(self.config);
        let pairs: Vec<(usize, (usize, usize))> = pairs(assets.len()).enumerate().collect();

        tracing::debug!(
            assets = assets.len(),
            pairs = pairs.len(),
            "starting pairwise search"
        );

        let search = |(idx, pair): &(usize, (usize, usize))| {
            self.search(&analyzer, assets, *pair)
                .map(|result| result.map(|r| (*idx, r)))
        };

        // Perform the search in parallel for all pairs.
        #[cfg(feature = "rayon")]
        let data = if self.threading {
            pairs.par_iter().map(search).collect::<Result<Vec<_>>>()?
        } else {
            pairs.iter().map(search).collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "rayon"))]
        let data = pairs.iter().map(search).collect::<Result<Vec<_>>>()?;

        let mut results: Vec<(usize, PairResult)> = data.into_iter().flatten().collect();
        results.sort_by_key(|(idx, _)| *idx);

        let results: Vec<PairResult> = results.into_iter().map(|(_, r)| r).collect();
        tracing::info!(
            pairs = results.len(),
            matches = results.iter().filter(|r| r.is_match()).count(),
            "finished pairwise search"
        );

        Ok(results)
    }

    /// Runs the comparator.
    pub fn run(&self) -> Result<Vec<PairResult>> {
        if self.paths.len() < 2 {
            return Err(Error::ComparatorMinimumPaths {
                found: self.paths.len(),
            });
        }

        let assets = self.load()?;
        self.search_all(&assets)
    }
}
