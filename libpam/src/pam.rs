use ndarray::prelude::*;

use crate::build::build;
use crate::distance::Distance;
use crate::error::{PamError, Result};
use crate::matrix::DistanceMatrix;
use crate::metricdata::MetricData;
use crate::swap::{Convergence, SwapEngine};

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pam {
    k: usize,
    max_iterations: usize,
}

impl Pam {
    /// Looks for `k` clusters, with at most [`DEFAULT_MAX_ITERATIONS`] SWAP
    /// iterations.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn check_k(&self, n: usize) -> Result<()> {
        if n == 0 {
            Err(PamError::InvalidInput)
        } else if self.k < 1 || self.k > n {
            Err(PamError::InvalidK { k: self.k, n })
        } else {
            Ok(())
        }
    }

    pub fn fit(&self, d: &DistanceMatrix) -> Result<FittedPam> {
        self.check_k(d.len())?;

        let tracker = build(d, self.k)?;
        let build_total_distance = tracker.total_distance();
        let outcome = SwapEngine::new(d, tracker, self.max_iterations).run();
        let tracker = outcome.tracker;

        Ok(FittedPam {
            medoid_indices: tracker.medoids().iter().copied().collect(),
            labels: tracker.assignment().to_owned(),
            total_distance: tracker.total_distance(),
            build_total_distance,
            iterations: outcome.iterations,
            swaps: outcome.swaps,
            convergence: outcome.convergence,
        })
    }

    /// Builds the distance matrix of `data` and fits on it. `k` is checked
    /// before any distance is computed.
    pub fn fit_data<D: MetricData>(&self, data: &D) -> Result<FittedPam> {
        self.check_k(data.num_points())?;
        self.fit(&DistanceMatrix::from_metric_data(data)?)
    }

    pub fn fit_objects<T, D: Distance<T>>(&self, objects: &[T], dist: &D) -> Result<FittedPam> {
        self.check_k(objects.len())?;
        self.fit(&DistanceMatrix::from_objects(objects, dist)?)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FittedPam {
    /// sorted indices of the medoids in the input
    medoid_indices: Array1<usize>,
    /// for every object, the index of its medoid in the input
    labels: Array1<usize>,
    total_distance: f64,
    build_total_distance: f64,
    iterations: usize,
    swaps: usize,
    convergence: Convergence,
}

impl FittedPam {
    pub fn medoid_indices(&self) -> ArrayView1<usize> {
        self.medoid_indices.view()
    }

    pub fn labels(&self) -> ArrayView1<usize> {
        self.labels.view()
    }

    /// Labels as positions `0..k` into [`FittedPam::medoid_indices`].
    pub fn cluster_labels(&self) -> Array1<usize> {
        let mut position = vec![0; self.labels.len()];
        for (p, &m) in self.medoid_indices.iter().enumerate() {
            position[m] = p;
        }
        self.labels.map(|&label| position[label])
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total distance after the BUILD phase, before any exchange.
    pub fn build_total_distance(&self) -> f64 {
        self.build_total_distance
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn swaps(&self) -> usize {
        self.swaps
    }

    pub fn convergence(&self) -> Convergence {
        self.convergence
    }

    pub fn is_converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }

    /// The medoid objects, in the order of [`FittedPam::medoid_indices`].
    pub fn medoids<T: Clone>(&self, objects: &[T]) -> Vec<T> {
        self.medoid_indices
            .iter()
            .map(|&m| objects[m].clone())
            .collect()
    }

    /// Every object replaced by its medoid, e.g. to quantize the colors of an
    /// image whose pixels were clustered.
    pub fn representatives<T: Clone>(&self, objects: &[T]) -> Vec<T> {
        self.labels.iter().map(|&m| objects[m].clone()).collect()
    }
}

/// The medoids, labels and total distance of a clustering of objects.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering<T> {
    pub medoids: Vec<T>,
    /// for every object, the index of its medoid in the input
    pub labels: Array1<usize>,
    pub total_distance: f64,
    pub convergence: Convergence,
}

/// Clusters `objects` into `k` groups under `dist`, running at most
/// `max_iterations` SWAP iterations.
///
/// ```
/// use libpam::{cluster, distance::Manhattan};
///
/// let pixels = vec![[250u8, 0, 0], [255, 5, 0], [0, 0, 250], [5, 0, 255]];
/// let clustering = cluster(&pixels, 2, &Manhattan, 100).unwrap();
/// assert_eq!(clustering.medoids, vec![[250, 0, 0], [0, 0, 250]]);
/// assert_eq!(clustering.labels.to_vec(), vec![0, 0, 2, 2]);
/// assert_eq!(clustering.total_distance, 20.0);
/// ```
pub fn cluster<T: Clone, D: Distance<T>>(
    objects: &[T],
    k: usize,
    dist: &D,
    max_iterations: usize,
) -> Result<Clustering<T>> {
    let fitted = Pam::new(k)
        .with_max_iterations(max_iterations)
        .fit_objects(objects, dist)?;

    Ok(Clustering {
        medoids: fitted.medoids(objects),
        labels: fitted.labels,
        total_distance: fitted.total_distance,
        convergence: fitted.convergence,
    })
}
