use std::collections::BTreeSet;

use ndarray::prelude::*;

use crate::matrix::DistanceMatrix;

/// Medoids `S`, non-medoids `U` and, for every object, its assigned medoid
/// with the distances to the nearest and second nearest medoid. The caches
/// are only mutated together, so between calls `nearest` is the minimum of
/// `d[i, S]`, `second` the next value (`+inf` with one medoid) and
/// `total_distance` the sum of `nearest`. An object equally close to several
/// medoids is assigned to the lowest of them, a medoid always to itself.
#[derive(Clone, Debug)]
pub struct MedoidTracker {
    medoids: BTreeSet<usize>,
    non_medoids: BTreeSet<usize>,
    assignment: Array1<usize>,
    nearest: Array1<f64>,
    second: Array1<f64>,
    total_distance: f64,
}

impl MedoidTracker {
    pub(crate) fn with_first_medoid(d: &DistanceMatrix, first: usize) -> Self {
        let n = d.len();
        let nearest = d.row(first).to_owned();
        let total_distance = nearest.sum();
        let mut non_medoids: BTreeSet<usize> = (0..n).collect();
        non_medoids.remove(&first);

        Self {
            medoids: BTreeSet::from([first]),
            non_medoids,
            assignment: Array1::from_elem(n, first),
            nearest,
            second: Array1::from_elem(n, f64::INFINITY),
            total_distance,
        }
    }

    /// Adds `c` to the medoids. `delta` is the change of the total distance,
    /// computed by the caller. The second nearest cache is left stale, see
    /// [`MedoidTracker::init_second_nearest`].
    pub(crate) fn add_medoid(&mut self, d: &DistanceMatrix, c: usize, delta: f64) {
        debug_assert!(self.non_medoids.contains(&c));
        self.non_medoids.remove(&c);
        self.medoids.insert(c);
        self.total_distance += delta;

        for i in 0..d.len() {
            let dic = d.get(i, c);
            if self.prefers(i, c, dic) {
                self.assignment[i] = c;
                self.nearest[i] = dic;
            }
        }
        // a duplicate of an existing medoid is at distance zero from it and
        // would otherwise stay assigned there
        self.assignment[c] = c;
        self.nearest[c] = 0.0;
    }

    pub(crate) fn init_second_nearest(&mut self, d: &DistanceMatrix) {
        for i in 0..d.len() {
            self.second[i] = self.second_nearest_distance(d, i);
        }
    }

    /// Replaces medoid `m` with non-medoid `x`, updating the caches
    /// incrementally. `delta` is the change of the total distance.
    pub(crate) fn apply_swap(&mut self, d: &DistanceMatrix, m: usize, x: usize, delta: f64) {
        debug_assert!(self.medoids.contains(&m));
        debug_assert!(self.non_medoids.contains(&x));
        self.medoids.remove(&m);
        self.medoids.insert(x);
        self.non_medoids.remove(&x);
        self.non_medoids.insert(m);
        self.total_distance += delta;

        for i in 0..d.len() {
            let dix = d.get(i, x);
            if i == x {
                self.assignment[i] = x;
                self.nearest[i] = 0.0;
                self.second[i] = self.second_nearest_distance(d, i);
            } else if self.assignment[i] != m {
                if self.prefers(i, x, dix) {
                    self.assignment[i] = x;
                    self.second[i] = self.nearest[i];
                    self.nearest[i] = dix;
                } else {
                    // the departing medoid may have been the second nearest
                    self.second[i] = self.second_nearest_distance(d, i);
                }
            } else if dix < self.second[i] {
                // the old second nearest stays second, on a tie the rescan
                // below picks the lowest index
                self.assignment[i] = x;
                self.nearest[i] = dix;
            } else {
                let (medoid, dist) = self.nearest_medoid(d, i);
                self.assignment[i] = medoid;
                self.nearest[i] = dist;
                self.second[i] = self.second_nearest_distance(d, i);
            }
        }
    }

    /// Whether `i` moves to the new medoid `c` at distance `dist`: it must be
    /// strictly closer, or as close and lower than the current medoid.
    fn prefers(&self, i: usize, c: usize, dist: f64) -> bool {
        let current = self.assignment[i];
        dist < self.nearest[i] || (dist == self.nearest[i] && c < current && current != i)
    }

    /// The closest medoid to `i` and its distance, found by scanning `S`.
    /// A medoid is always its own nearest medoid; other ties go to the lowest
    /// index.
    pub fn nearest_medoid(&self, d: &DistanceMatrix, i: usize) -> (usize, f64) {
        if self.medoids.contains(&i) {
            return (i, 0.0);
        }
        let mut best = (usize::MAX, f64::INFINITY);
        for &m in &self.medoids {
            let dim = d.get(i, m);
            if dim < best.1 {
                best = (m, dim);
            }
        }
        best
    }

    /// The second smallest value of `d[i, S]`, found by scanning `S`.
    pub fn second_nearest_distance(&self, d: &DistanceMatrix, i: usize) -> f64 {
        let mut first = f64::INFINITY;
        let mut second = f64::INFINITY;
        for &m in &self.medoids {
            let dim = d.get(i, m);
            if dim < first {
                second = first;
                first = dim;
            } else if dim < second {
                second = dim;
            }
        }
        second
    }

    /// Sums the distance of every object to its assigned medoid from scratch.
    pub fn recompute_total_distance(&self, d: &DistanceMatrix) -> f64 {
        self.assignment
            .iter()
            .enumerate()
            .map(|(i, &m)| d.get(i, m))
            .sum()
    }

    pub fn num_objects(&self) -> usize {
        self.assignment.len()
    }

    pub fn k(&self) -> usize {
        self.medoids.len()
    }

    pub fn medoids(&self) -> &BTreeSet<usize> {
        &self.medoids
    }

    pub fn non_medoids(&self) -> &BTreeSet<usize> {
        &self.non_medoids
    }

    pub fn is_medoid(&self, i: usize) -> bool {
        self.medoids.contains(&i)
    }

    pub fn assignment(&self) -> ArrayView1<usize> {
        self.assignment.view()
    }

    pub fn nearest(&self) -> ArrayView1<f64> {
        self.nearest.view()
    }

    pub fn second(&self) -> ArrayView1<f64> {
        self.second.view()
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }
}
