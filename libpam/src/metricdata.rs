pub mod euclideandata;
pub mod manhattandata;
pub mod objectdata;

/// A data set that can report the distance between any two of its points,
/// addressed by index.
pub trait MetricData {
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Fills `out[i]` with the distance from point `i` to point `j`.
    fn all_distances(&self, j: usize, out: &mut [f64]) {
        assert_eq!(out.len(), self.num_points());
        for (i, oo) in out.iter_mut().enumerate() {
            *oo = self.distance(i, j);
        }
    }

    fn num_points(&self) -> usize;
}

pub use self::euclideandata::EuclideanData;
pub use self::manhattandata::ManhattanData;
pub use self::objectdata::ObjectData;
