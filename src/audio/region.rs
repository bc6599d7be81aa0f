/// Number of positions after the current one that are averaged to decide whether it qualifies.
const LOOKAHEAD: usize = 3;

/// Returns true if the mean of the [LOOKAHEAD] positions after `idx` is below `threshold`.
///
/// The value at `idx` itself is not considered. Positions without a full lookahead window never
/// qualify.
fn lookahead_qualifies(profile: &[u32], idx: usize, threshold: u32) -> bool {
    if idx + LOOKAHEAD >= profile.len() {
        return false;
    }
    let sum: u32 = profile[idx + 1..=idx + LOOKAHEAD].iter().sum();
    let mean = sum / LOOKAHEAD as u32;
    mean < threshold
}

/// Scans a distance profile for the matching region.
///
/// Returns the indices of the first and the last qualifying positions. Positions in between do
/// not need to qualify themselves, so the region is the envelope of all qualifying positions
/// rather than a single contiguous run. Returns `None` if nothing qualifies.
pub fn find_region(profile: &[u32], threshold: u32) -> Option<(usize, usize)> {
    let mut region: Option<(usize, usize)> = None;

    for idx in 0..profile.len() {
        if !lookahead_qualifies(profile, idx, threshold) {
            continue;
        }
        region = match region {
            None => Some((idx, idx)),
            Some((start, _)) => Some((start, idx)),
        };
    }

    region
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_find_region_all_zeros() {
        // The last three positions have no full lookahead.
        let profile = vec![0u32; 20];
        assert_eq!(find_region(&profile, 8), Some((0, 16)));
    }

    #[test]
    fn test_find_region_single_spike() {
        // Only index 3 sees an all-small lookahead (indices 4, 5 and 6); it qualifies even though
        // its own value is 50.
        let profile = [2u32, 2, 2, 50, 2, 2, 2];
        assert_eq!(find_region(&profile, 8), Some((3, 3)));
    }

    #[test]
    fn test_find_region_spans_gaps() {
        // Qualifying: 0, 6, 7, 8. Indices 1 through 5 do not qualify but fall inside the region.
        let profile = [0u32, 0, 0, 0, 50, 50, 50, 0, 0, 0, 0, 0];
        assert_eq!(find_region(&profile, 8), Some((0, 8)));
    }

    #[test]
    fn test_find_region_truncating_mean() {
        // (7 + 8 + 8) / 3 = 7 (truncated), which is below 8.
        let profile = [64u32, 7, 8, 8];
        assert_eq!(find_region(&profile, 8), Some((0, 0)));

        // (8 + 8 + 8) / 3 = 8, which is not strictly below 8.
        let profile = [0u32, 8, 8, 8];
        assert_eq!(find_region(&profile, 8), None);
    }

    #[test]
    fn test_find_region_not_found() {
        assert_eq!(find_region(&[], 8), None);
        assert_eq!(find_region(&[0, 0, 0], 8), None);
        assert_eq!(find_region(&[64u32; 10], 8), None);
    }

    #[test]
    fn test_lookahead_qualifies() {
        let profile = [50u32, 7, 7, 7, 50];
        assert!(lookahead_qualifies(&profile, 0, 8));
        assert!(!lookahead_qualifies(&profile, 0, 7));
        // No full lookahead window.
        assert!(!lookahead_qualifies(&profile, 2, 64));
    }

    #[test]
    fn test_find_region_zero_threshold() {
        assert_eq!(find_region(&[0u32; 10], 0), None);
    }
}
