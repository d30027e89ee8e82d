use ndarray::{prelude::*, Data};

use crate::distance::{Distance, Manhattan};
use crate::metricdata::MetricData;

/// The rows of a two dimensional array under the manhattan distance.
pub struct ManhattanData<S: Data<Elem = f32>> {
    data: ArrayBase<S, Ix2>,
}

impl<S: Data<Elem = f32>> ManhattanData<S> {
    pub fn new(data: ArrayBase<S, Ix2>) -> Self {
        Self { data }
    }

    pub fn dimensions(&self) -> usize {
        self.data.ncols()
    }
}

impl<S: Data<Elem = f32>> MetricData for ManhattanData<S> {
    fn distance(&self, i: usize, j: usize) -> f64 {
        Manhattan.distance(&self.data.row(i), &self.data.row(j))
    }

    fn num_points(&self) -> usize {
        self.data.nrows()
    }
}

#[cfg(test)]
mod test {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_distances() {
        let data = ManhattanData::new(array![[1.0f32, 0.0, 3.0], [0.0, 3.0, 2.0]]);
        assert_eq!(data.dimensions(), 3);
        assert_eq!(data.distance(0, 1), 5.0);
        assert_eq!(data.distance(1, 0), 5.0);
        assert_eq!(data.distance(1, 1), 0.0);
    }
}
