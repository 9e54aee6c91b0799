use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::errors::NetworkError;
use crate::layers::neuron::Neuron;
use crate::math::vector::WeightVector;

/// Dense connection weights between two adjacent layers.
///
/// `rows` is the size of the previous layer and `cols` the size of the next
/// one, so `data[i][j]` connects input unit `i` to output unit `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsMat {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl WeightsMat {
    pub fn zeros(rows: usize, cols: usize) -> WeightsMat {
        WeightsMat {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Every weight drawn independently from U[-1, 1).
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> WeightsMat {
        let mut res = WeightsMat::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Result<WeightsMat, NetworkError> {
        let rows = data.len();
        let cols = data.first().map(|row| row.len()).unwrap_or(0);
        if let Some(row) = data.iter().find(|row| row.len() != cols) {
            return Err(NetworkError::DimensionMismatch { expected: cols, actual: row.len() });
        }
        Ok(WeightsMat { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Forward product: `out[j] = sum_i data[i][j] * neurons[i]`.
    pub fn mul_by_neurons(&self, neurons: &[Neuron]) -> Result<WeightVector, NetworkError> {
        if neurons.len() != self.rows {
            return Err(NetworkError::DimensionMismatch {
                expected: self.rows,
                actual: neurons.len(),
            });
        }

        let mut res = vec![0.0; self.cols];
        for (row, neuron) in self.data.iter().zip(neurons) {
            let a = neuron.get();
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += w * a;
            }
        }

        Ok(WeightVector::from_data(res))
    }

    /// Backward product: `out[i] = sum_j data[i][j] * delta[j]`.
    ///
    /// Carries the error of the next layer back to the previous one.
    pub fn mul_by_delta(&self, delta: &WeightVector) -> Result<WeightVector, NetworkError> {
        if delta.len() != self.cols {
            return Err(NetworkError::DimensionMismatch {
                expected: self.cols,
                actual: delta.len(),
            });
        }

        Ok(WeightVector::from_data(
            self.data
                .iter()
                .map(|row| row.iter().zip(delta.iter()).map(|(w, d)| w * d).sum())
                .collect(),
        ))
    }

    /// Outer product `left ⊗ right`, shaped `(left.len(), right.len())`.
    pub fn outer(left: &[f64], right: &WeightVector) -> WeightsMat {
        WeightsMat {
            rows: left.len(),
            cols: right.len(),
            data: left
                .iter()
                .map(|&l| right.iter().map(|&r| l * r).collect())
                .collect(),
        }
    }

    pub fn map<F>(&self, functor: F) -> WeightsMat
    where
        F: Fn(f64) -> f64,
    {
        WeightsMat {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Element-wise difference `self - rhs`.
    pub fn sub(&self, rhs: &WeightsMat) -> Result<WeightsMat, NetworkError> {
        if self.shape() != rhs.shape() {
            return Err(NetworkError::shapes(format!(
                "cannot subtract a {}x{} matrix from a {}x{} matrix",
                rhs.rows, rhs.cols, self.rows, self.cols
            )));
        }

        let mut res = WeightsMat::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        Ok(res)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter().flatten()
    }
}
