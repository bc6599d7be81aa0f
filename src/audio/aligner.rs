use crate::{Error, Result};

use super::hamming;

/// Trims two fingerprints to a common, even length.
///
/// Fingerprints of the same asset duration may differ by a single trailing sample; the extra
/// sample is dropped, and if the common length is odd, both lose their last sample. Anything
/// further apart cannot be lined up sample-for-sample and is rejected.
pub fn trim_to_even<'a>(a: &'a [u64], b: &'a [u64]) -> Result<(&'a [u64], &'a [u64])> {
    if a.len().abs_diff(b.len()) > 1 {
        return Err(Error::LengthMismatch {
            first: a.len(),
            second: b.len(),
        });
    }

    let mut n = a.len().min(b.len());
    n -= n % 2;
    if n < 2 {
        return Err(Error::FingerprintTooShort { len: n });
    }

    Ok((&a[..n], &b[..n]))
}

/// Returns the overlapping windows of `a` and `b` for the given `offset`.
///
/// A positive offset means the content in `a` starts later, so the tail of `a` is lined up with
/// the head of `b`. A negative offset does the opposite. Both slices must have the same length
/// and `|offset|` must be smaller than it.
pub fn aligned<'a>(offset: isize, a: &'a [u64], b: &'a [u64]) -> Result<(&'a [u64], &'a [u64])> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            first: a.len(),
            second: b.len(),
        });
    }
    let shift = offset.unsigned_abs();
    if shift >= a.len() {
        return Err(Error::InvalidInput("offset leaves no overlap"));
    }

    let len = a.len() - shift;
    if offset >= 0 {
        Ok((&a[shift..], &b[..len]))
    } else {
        Ok((&a[..len], &b[shift..]))
    }
}

/// Finds the offset at which `a` and `b` line up best.
///
/// Every offset in `[-(N/2), N/2]` is scored with [window_score](super::window_score) over the
/// overlapping windows. The highest score wins; on ties, the offset scanned first (the most
/// negative one) is kept.
pub fn best_offset(a: &[u64], b: &[u64]) -> Result<isize> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            first: a.len(),
            second: b.len(),
        });
    }
    if a.len() < 2 {
        return Err(Error::FingerprintTooShort { len: a.len() });
    }

    let half = (a.len() / 2) as isize;
    let mut best: Option<(isize, f64)> = None;

    for offset in -half..=half {
        let (x, y) = aligned(offset, a, b)?;
        let score = hamming::window_score(x, y)?;
        match best {
            Some((_, best_score)) if score <= best_score => (),
            _ => best = Some((offset, score)),
        }
    }

    let (offset, score) = best.ok_or(Error::InvalidInput("no candidate offsets"))?;
    tracing::trace!(offset, score, candidates = 2 * half + 1, "picked best offset");

    Ok(offset)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_fingerprint(seed: u64, len: usize) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen()).collect()
    }

    // Returns `f` delayed by `k` samples, with random filler in front.
    fn delayed(f: &[u64], k: usize, seed: u64) -> Vec<u64> {
        let mut out = random_fingerprint(seed, k);
        out.extend_from_slice(&f[..f.len() - k]);
        out
    }

    #[test]
    fn test_trim_to_even() {
        let a = [1u64, 2, 3, 4, 5];
        let b = [1u64, 2, 3, 4, 5];
        let (x, y) = trim_to_even(&a, &b).unwrap();
        assert_eq!(x, &[1, 2, 3, 4]);
        assert_eq!(y, &[1, 2, 3, 4]);

        // Off by one: the longer one is cut down to the shorter.
        let c = [1u64, 2, 3, 4];
        let (x, y) = trim_to_even(&a, &c).unwrap();
        assert_eq!(x.len(), 4);
        assert_eq!(y.len(), 4);
    }

    #[test]
    fn test_trim_to_even_rejects_bad_input() {
        assert!(matches!(
            trim_to_even(&[1], &[1]),
            Err(Error::FingerprintTooShort { len: 0 })
        ));
        assert!(matches!(
            trim_to_even(&[], &[]),
            Err(Error::FingerprintTooShort { len: 0 })
        ));
        assert!(matches!(
            trim_to_even(&[1, 2, 3, 4], &[1, 2]),
            Err(Error::LengthMismatch {
                first: 4,
                second: 2
            })
        ));
    }

    #[test]
    fn test_aligned_windows() {
        let a = [10u64, 11, 12, 13];
        let b = [20u64, 21, 22, 23];

        assert_eq!(aligned(0, &a, &b).unwrap(), (&a[..], &b[..]));
        assert_eq!(
            aligned(1, &a, &b).unwrap(),
            (&[11u64, 12, 13][..], &[20u64, 21, 22][..])
        );
        assert_eq!(
            aligned(-2, &a, &b).unwrap(),
            (&[10u64, 11][..], &[22u64, 23][..])
        );
    }

    #[test]
    fn test_aligned_rejects_bad_input() {
        assert!(matches!(
            aligned(5, &[1, 2], &[1, 2]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            aligned(-2, &[1, 2], &[1, 2]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            aligned(1, &[1, 2, 3, 4], &[1, 2]),
            Err(Error::LengthMismatch {
                first: 4,
                second: 2
            })
        ));
    }

    #[test]
    fn test_best_offset_first_is_late() {
        let b = random_fingerprint(1, 200);
        for k in [1usize, 7, 25] {
            let a = delayed(&b, k, 100 + k as u64);
            assert_eq!(best_offset(&a, &b).unwrap(), k as isize, "k={}", k);
        }
    }

    #[test]
    fn test_best_offset_second_is_late() {
        let a = random_fingerprint(2, 200);
        for k in [1usize, 13] {
            let b = delayed(&a, k, 200 + k as u64);
            assert_eq!(best_offset(&a, &b).unwrap(), -(k as isize), "k={}", k);
        }
    }

    #[test]
    fn test_best_offset_ties_prefer_most_negative() {
        // Every window scores 1.0, so the first candidate scanned wins.
        let a = vec![0u64; 10];
        assert_eq!(best_offset(&a, &a).unwrap(), -5);
    }

    #[test]
    fn test_best_offset_rejects_bad_input() {
        assert!(matches!(
            best_offset(&[1, 2], &[1, 2, 3]),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            best_offset(&[1], &[1]),
            Err(Error::FingerprintTooShort { len: 1 })
        ));
    }

    proptest! {
        #[test]
        fn prop_self_alignment_is_zero(
            f in proptest::collection::vec(any::<u64>(), 2..64usize)
                .prop_filter("fingerprint must not repeat itself", |f| {
                    f.iter().collect::<std::collections::HashSet<_>>().len() == f.len()
                }),
        ) {
            let (a, b) = trim_to_even(&f, &f).unwrap();
            prop_assume!(a.len() >= 4);
            prop_assert_eq!(best_offset(a, b).unwrap(), 0);
        }
    }
}
