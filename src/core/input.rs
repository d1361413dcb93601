//! Conversion of array-like register inputs into the canonical 4x4 complex matrix.

use crate::core::errors::DimensionError;
use crate::core::utils::DIM;
use ndarray::Array2;
use num_complex::Complex64;

/// Anything a [`QubitRegister`](crate::QubitRegister) can be built from.
///
/// Real (`f64`) and complex (`Complex64`) entries are both accepted.
pub trait IntoStateMatrix {
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError>;
}

impl<T> IntoStateMatrix for Array2<T>
where
    T: Into<Complex64> + Clone,
{
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError> {
        let (rows, cols) = self.dim();
        if rows != DIM || cols != DIM {
            return Err(DimensionError { rows, cols });
        }
        Ok(self.mapv(Into::into))
    }
}

impl<T> IntoStateMatrix for &Array2<T>
where
    T: Into<Complex64> + Clone,
{
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError> {
        self.clone().into_state_matrix()
    }
}

impl<T> IntoStateMatrix for [[T; DIM]; DIM]
where
    T: Into<Complex64> + Clone,
{
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError> {
        Ok(Array2::from_shape_fn((DIM, DIM), |(i, j)| {
            self[i][j].clone().into()
        }))
    }
}

impl<T> IntoStateMatrix for Vec<Vec<T>>
where
    T: Into<Complex64> + Clone,
{
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError> {
        let rows = self.len();
        // Ragged input reports the first offending row length.
        let cols = self
            .iter()
            .map(Vec::len)
            .find(|&len| len != DIM)
            .unwrap_or(DIM);
        if rows != DIM || cols != DIM {
            return Err(DimensionError { rows, cols });
        }
        Ok(Array2::from_shape_fn((DIM, DIM), |(i, j)| {
            self[i][j].clone().into()
        }))
    }
}

/// Row-major flat input of 16 entries.
impl<T> IntoStateMatrix for &[T]
where
    T: Into<Complex64> + Clone,
{
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError> {
        if self.len() != DIM * DIM {
            return Err(DimensionError {
                rows: 1,
                cols: self.len(),
            });
        }
        Ok(Array2::from_shape_fn((DIM, DIM), |(i, j)| {
            self[i * DIM + j].clone().into()
        }))
    }
}

impl<T> IntoStateMatrix for [T; DIM * DIM]
where
    T: Into<Complex64> + Clone,
{
    fn into_state_matrix(self) -> Result<Array2<Complex64>, DimensionError> {
        self.as_slice().into_state_matrix()
    }
}
