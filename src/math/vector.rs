use serde::{Serialize, Deserialize};

use crate::errors::NetworkError;

/// Ordered fixed-length sequence of scalars (bias terms, deltas, pre-activations).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub data: Vec<f64>,
}

impl WeightVector {
    pub fn zeros(len: usize) -> WeightVector {
        WeightVector { data: vec![0.0; len] }
    }

    pub fn from_data(data: Vec<f64>) -> WeightVector {
        WeightVector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Element-wise sum.
    pub fn sum(&self, rhs: &WeightVector) -> Result<WeightVector, NetworkError> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, rhs: &WeightVector) -> Result<WeightVector, NetworkError> {
        self.zip_with(rhs, |a, b| a * b)
    }

    pub fn map<F>(&self, functor: F) -> WeightVector
    where
        F: Fn(f64) -> f64,
    {
        WeightVector::from_data(self.data.iter().map(|&x| functor(x)).collect())
    }

    fn zip_with<F>(&self, rhs: &WeightVector, functor: F) -> Result<WeightVector, NetworkError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.len() != rhs.len() {
            return Err(NetworkError::DimensionMismatch {
                expected: self.len(),
                actual: rhs.len(),
            });
        }
        Ok(WeightVector::from_data(
            self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| functor(a, b)).collect(),
        ))
    }
}

impl From<Vec<f64>> for WeightVector {
    fn from(data: Vec<f64>) -> Self {
        WeightVector { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_and_hadamard_are_element_wise() {
        let a = WeightVector::from_data(vec![1.0, 2.0, 3.0]);
        let b = WeightVector::from_data(vec![0.5, -1.0, 2.0]);

        assert_eq!(a.sum(&b).unwrap().data, vec![1.5, 1.0, 5.0]);
        assert_eq!(a.hadamard(&b).unwrap().data, vec![0.5, -2.0, 6.0]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let a = WeightVector::zeros(2);
        let b = WeightVector::zeros(3);
        assert!(matches!(
            a.sum(&b),
            Err(NetworkError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }
}
