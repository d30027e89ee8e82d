use crate::distance::Distance;
use crate::metricdata::MetricData;

/// Adapts an arbitrary collection of objects and a [`Distance`] on them.
pub struct ObjectData<'data, T, D> {
    objects: &'data [T],
    dist: &'data D,
}

impl<'data, T, D: Distance<T>> ObjectData<'data, T, D> {
    pub fn new(objects: &'data [T], dist: &'data D) -> Self {
        Self { objects, dist }
    }
}

impl<'data, T, D: Distance<T>> MetricData for ObjectData<'data, T, D> {
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.dist.distance(&self.objects[i], &self.objects[j])
    }

    fn num_points(&self) -> usize {
        self.objects.len()
    }
}
