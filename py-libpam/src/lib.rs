use libpam::metricdata::{EuclideanData, ManhattanData};
use libpam::{FittedPam, Pam};
use numpy::*;
use pyo3::{exceptions::PyValueError, prelude::*};

#[derive(Clone, Copy)]
enum Metric {
    Manhattan,
    Euclidean,
}

#[pyclass(name = "PAM")]
pub struct PyPam {
    inner: Pam,
    metric: Metric,
    fitted: Option<FittedPam>,
}

impl PyPam {
    fn fitted(&self) -> PyResult<&FittedPam> {
        self.fitted
            .as_ref()
            .ok_or(PyValueError::new_err("model not trained"))
    }
}

#[pymethods]
impl PyPam {
    #[new]
    #[pyo3(signature = (k, max_iterations=libpam::DEFAULT_MAX_ITERATIONS, metric="manhattan"))]
    fn new(k: usize, max_iterations: usize, metric: &str) -> PyResult<Self> {
        let metric = match metric {
            "manhattan" | "l1" | "cityblock" => Metric::Manhattan,
            "euclidean" | "l2" => Metric::Euclidean,
            _ => {
                return Err(PyValueError::new_err(format!(
                    "unknown metric {metric:?}, expected \"manhattan\" or \"euclidean\""
                )))
            }
        };
        Ok(Self {
            inner: Pam::new(k).with_max_iterations(max_iterations),
            metric,
            fitted: None,
        })
    }

    /// Clusters the rows of `data`.
    fn fit<'py>(mut self_: PyRefMut<'py, Self>, data: PyReadonlyArray2<'py, f32>) -> PyResult<()> {
        let data = data.as_array();
        let fitted = match self_.metric {
            Metric::Manhattan => self_.inner.fit_data(&ManhattanData::new(data))?,
            Metric::Euclidean => self_.inner.fit_data(&EuclideanData::new(data))?,
        };
        self_.fitted.replace(fitted);
        Ok(())
    }

    #[getter]
    fn medoid_indices(self_: PyRef<Self>) -> PyResult<Bound<PyArray1<usize>>> {
        let py = self_.py();
        self_
            .fitted()
            .map(|fitted| fitted.medoid_indices().to_owned().into_pyarray_bound(py))
    }

    /// For every row, the index of the row that is its medoid.
    #[getter]
    fn labels(self_: PyRef<Self>) -> PyResult<Bound<PyArray1<usize>>> {
        let py = self_.py();
        self_
            .fitted()
            .map(|fitted| fitted.labels().to_owned().into_pyarray_bound(py))
    }

    #[getter]
    fn total_distance(&self) -> PyResult<f64> {
        self.fitted().map(FittedPam::total_distance)
    }

    #[getter]
    fn converged(&self) -> PyResult<bool> {
        self.fitted().map(FittedPam::is_converged)
    }

    #[getter]
    fn n_iter(&self) -> PyResult<usize> {
        self.fitted().map(FittedPam::iterations)
    }
}

#[pymodule]
#[pyo3(name = "libpam")]
fn py_libpam(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();
    m.add_class::<PyPam>()?;
    Ok(())
}
