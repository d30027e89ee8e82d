use thiserror::Error;

pub type Result<T> = std::result::Result<T, PamError>;

/// Everything that can go wrong before the BUILD phase starts. Once BUILD has
/// started a clustering run always completes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PamError {
    #[error("cannot cluster an empty collection of objects")]
    InvalidInput,
    #[error("k must be between 1 and the number of objects ({n}), got {k}")]
    InvalidK { k: usize, n: usize },
    #[error("distance between objects {i} and {j} is {value}, expected a finite non-negative value")]
    NonFiniteDistance { i: usize, j: usize, value: f64 },
    #[error("distance matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}

#[cfg(feature = "pyo3")]
impl From<PamError> for pyo3::PyErr {
    fn from(err: PamError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
