use crate::error::{PamError, Result};
use crate::matrix::DistanceMatrix;
use crate::tracker::MedoidTracker;

fn argmin(v: impl IntoIterator<Item = f64>) -> usize {
    let mut i = 0;
    let mut m = f64::INFINITY;
    for (idx, x) in v.into_iter().enumerate() {
        if x < m {
            i = idx;
            m = x;
        }
    }
    i
}

/// The change in total distance if `c` became a medoid, not counting the
/// distance of `c` itself: every other non-medoid closer to `c` than to its
/// current medoid contributes the (negative) difference.
pub fn addition_delta(d: &DistanceMatrix, tracker: &MedoidTracker, c: usize) -> f64 {
    let nearest = tracker.nearest();
    let mut delta = 0.0;
    for &e in tracker.non_medoids() {
        if e == c {
            continue;
        }
        let change = d.get(c, e) - nearest[e];
        if change < 0.0 {
            delta += change;
        }
    }
    delta
}

/// Starts from the object with the smallest sum of distances, then adds the
/// non-medoid that reduces the total distance the most until there are `k`.
pub fn build(d: &DistanceMatrix, k: usize) -> Result<MedoidTracker> {
    let n = d.len();
    if k < 1 || k > n {
        return Err(PamError::InvalidK { k, n });
    }

    let first = argmin((0..n).map(|i| d.row(i).sum()));
    let mut tracker = MedoidTracker::with_first_medoid(d, first);
    log::debug!(
        "first medoid {first}, total distance {}",
        tracker.total_distance()
    );

    while tracker.k() < k {
        let mut best: Option<(usize, f64)> = None;
        for &c in tracker.non_medoids() {
            let delta = addition_delta(d, &tracker, c);
            if best.map_or(true, |(_, best_delta)| delta < best_delta) {
                best = Some((c, delta));
            }
        }
        // k <= n guarantees a candidate while the medoids are fewer than k
        let Some((c, delta)) = best else { break };

        // the candidate's own distance vanishes once it is a medoid
        let change = delta - tracker.nearest()[c];
        tracker.add_medoid(d, c, change);
        log::debug!(
            "added medoid {c} ({}/{k}), total distance {}",
            tracker.k(),
            tracker.total_distance()
        );
    }

    tracker.init_second_nearest(d);
    Ok(tracker)
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    use super::*;
    use crate::distance::Manhattan;
    use crate::tracker::test::check_invariants;

    fn scenario() -> DistanceMatrix {
        let objects = [[1i64, 0, 3], [0, 3, 2], [6, 1, 3], [2, 4, 3], [3, 8, 1]];
        DistanceMatrix::from_objects(&objects, &Manhattan).unwrap()
    }

    #[test]
    fn test_first_medoid_tie_goes_to_lowest_index() {
        // both 1 and 2 have a distance sum of 4
        let x = [0.0f64, 1.0, 2.0, 3.0];
        let d = DistanceMatrix::from_objects(&x, &|a: &f64, b: &f64| (a - b).abs()).unwrap();
        let tracker = build(&d, 1).unwrap();
        assert!(tracker.is_medoid(1));
    }

    #[test]
    fn test_invalid_k() {
        let d = scenario();
        assert_eq!(build(&d, 0).unwrap_err(), PamError::InvalidK { k: 0, n: 5 });
        assert_eq!(build(&d, 6).unwrap_err(), PamError::InvalidK { k: 6, n: 5 });
    }

    #[test]
    fn test_first_medoid_is_most_central() {
        let d = scenario();
        // row sums are 28, 27, 34, 23, 40
        let tracker = build(&d, 1).unwrap();
        assert_eq!(tracker.medoids().iter().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(tracker.total_distance(), 23.0);
        assert_eq!(tracker.second(), Array1::from_elem(5, f64::INFINITY));
        check_invariants(&tracker, &d);
    }

    #[test]
    fn test_greedy_additions() {
        let d = scenario();
        let tracker = build(&d, 2).unwrap();
        check_invariants(&tracker, &d);
        // adding 0 saves one unit on 2, plus its own distance of 5
        assert_eq!(tracker.medoids().iter().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(tracker.assignment(), array![0, 3, 0, 3, 3]);
        assert_eq!(tracker.total_distance(), 17.0);
    }

    #[test]
    fn test_k_equals_n() {
        let d = scenario();
        let tracker = build(&d, 5).unwrap();
        check_invariants(&tracker, &d);
        assert!(tracker.non_medoids().is_empty());
        assert_eq!(tracker.total_distance(), 0.0);
    }

    #[test]
    fn test_total_distance_tracks_every_addition() {
        let d = crate::test::blobs_matrix(3, 15, 4);
        for k in 1..=12 {
            let tracker = build(&d, k).unwrap();
            assert_eq!(tracker.k(), k);
            check_invariants(&tracker, &d);
        }
    }

    #[test]
    fn test_identical_objects() {
        let objects = vec![[2.0f64, 2.0]; 6];
        let d = DistanceMatrix::from_objects(&objects, &Manhattan).unwrap();
        for k in 1..=6 {
            let tracker = build(&d, k).unwrap();
            check_invariants(&tracker, &d);
            assert_abs_diff_eq!(tracker.total_distance(), 0.0);
        }
    }
}
