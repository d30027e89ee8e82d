use ndarray::prelude::*;

use crate::distance::Distance;
use crate::error::{PamError, Result};
use crate::metricdata::{MetricData, ObjectData};

/// A validated `n x n` dissimilarity matrix: every entry is finite and
/// non-negative, and the diagonal is zero.
///
/// The matrix is never mutated by a clustering run, so the same matrix can be
/// clustered several times with different values of `k`.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    d: Array2<f64>,
}

fn check_entry(i: usize, j: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PamError::NonFiniteDistance { i, j, value })
    }
}

impl DistanceMatrix {
    /// Computes the distances between all pairs of points of `data`.
    ///
    /// The diagonal is not evaluated: the distance of a point to itself is
    /// zero by contract.
    pub fn from_metric_data<D: MetricData>(data: &D) -> Result<Self> {
        let n = data.num_points();
        if n == 0 {
            return Err(PamError::InvalidInput);
        }

        let mut d = Array2::zeros((n, n));
        let mut column = vec![0.0; n];
        for j in 0..n {
            data.all_distances(j, &mut column);
            for (i, &value) in column.iter().enumerate() {
                if i == j {
                    continue;
                }
                check_entry(i, j, value)?;
                d[[i, j]] = value;
            }
        }
        log::debug!("built {n}x{n} distance matrix");

        Ok(Self { d })
    }

    /// Computes `d[i][j] = dist(objects[i], objects[j])`.
    pub fn from_objects<T, D: Distance<T>>(objects: &[T], dist: &D) -> Result<Self> {
        Self::from_metric_data(&ObjectData::new(objects, dist))
    }

    /// Wraps a precomputed dissimilarity matrix. The diagonal is ignored and
    /// set to zero.
    pub fn from_array(mut d: Array2<f64>) -> Result<Self> {
        let (rows, cols) = d.dim();
        if rows != cols {
            return Err(PamError::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Err(PamError::InvalidInput);
        }
        for ((i, j), &value) in d.indexed_iter() {
            if i != j {
                check_entry(i, j, value)?;
            }
        }
        d.diag_mut().fill(0.0);

        Ok(Self { d })
    }

    /// The number of objects.
    pub fn len(&self) -> usize {
        self.d.nrows()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.d[[i, j]]
    }

    pub fn row(&self, i: usize) -> ArrayView1<f64> {
        self.d.row(i)
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.d.view()
    }
}

#[cfg(test)]
mod test {
    use ndarray::array;

    use super::*;
    use crate::distance::Manhattan;
    use crate::metricdata::EuclideanData;
    use crate::test::make_blobs;

    #[test]
    fn test_from_objects() {
        let objects = [[1i64, 0, 3], [0, 3, 2], [6, 1, 3]];
        let d = DistanceMatrix::from_objects(&objects, &Manhattan).unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(
            d.view(),
            array![[0.0, 5.0, 6.0], [5.0, 0.0, 9.0], [6.0, 9.0, 0.0]]
        );
    }

    #[test]
    fn test_empty_input() {
        let objects: Vec<Vec<f64>> = Vec::new();
        assert_eq!(
            DistanceMatrix::from_objects(&objects, &Manhattan),
            Err(PamError::InvalidInput)
        );
        assert_eq!(
            DistanceMatrix::from_array(Array2::zeros((0, 0))),
            Err(PamError::InvalidInput)
        );
    }

    #[test]
    fn test_rejects_bad_distances() {
        let objects = [0.0f64, 1.0, 2.0];
        let signed = |a: &f64, b: &f64| a - b;
        assert!(matches!(
            DistanceMatrix::from_objects(&objects, &signed),
            Err(PamError::NonFiniteDistance { .. })
        ));

        let nan = |a: &f64, b: &f64| if a == b { 0.0 } else { f64::NAN };
        assert!(matches!(
            DistanceMatrix::from_objects(&objects, &nan),
            Err(PamError::NonFiniteDistance { i: 1, j: 0, .. })
        ));

        let inf = |_: &f64, _: &f64| f64::INFINITY;
        assert!(matches!(
            DistanceMatrix::from_objects(&objects, &inf),
            Err(PamError::NonFiniteDistance { .. })
        ));
    }

    #[test]
    fn test_from_array() {
        let d = DistanceMatrix::from_array(array![[7.0, 1.0], [2.0, 7.0]]).unwrap();
        assert_eq!(d.get(0, 0), 0.0);
        assert_eq!(d.get(0, 1), 1.0);
        assert_eq!(d.get(1, 0), 2.0);

        assert_eq!(
            DistanceMatrix::from_array(Array2::zeros((2, 3))),
            Err(PamError::NotSquare { rows: 2, cols: 3 })
        );
        assert!(DistanceMatrix::from_array(array![[0.0, -1.0], [1.0, 0.0]]).is_err());
    }

    #[test]
    fn test_blobs_matrix_is_symmetric() {
        let data = EuclideanData::new(make_blobs(3, 20, 4, 1.0, 10.0));
        let d = DistanceMatrix::from_metric_data(&data).unwrap();
        assert_eq!(d.len(), 80);
        for i in 0..d.len() {
            assert_eq!(d.get(i, i), 0.0);
            for j in 0..i {
                assert_eq!(d.get(i, j), d.get(j, i));
            }
        }
    }
}
