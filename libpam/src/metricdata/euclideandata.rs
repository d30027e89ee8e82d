use ndarray::{prelude::*, Data};

use crate::distance::{Distance, Euclidean};
use crate::metricdata::MetricData;

/// The rows of a two dimensional array under the euclidean distance.
pub struct EuclideanData<S: Data<Elem = f32>> {
    data: ArrayBase<S, Ix2>,
}

impl<S: Data<Elem = f32>> EuclideanData<S> {
    pub fn new(data: ArrayBase<S, Ix2>) -> Self {
        Self { data }
    }

    pub fn dimensions(&self) -> usize {
        self.data.ncols()
    }
}

impl<S: Data<Elem = f32>> MetricData for EuclideanData<S> {
    fn distance(&self, i: usize, j: usize) -> f64 {
        // the coordinates are compared directly rather than through squared
        // norms, so that identical rows are at distance exactly zero
        Euclidean.distance(&self.data.row(i), &self.data.row(j))
    }

    fn num_points(&self) -> usize {
        self.data.nrows()
    }
}
