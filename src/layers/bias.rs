use rand::Rng;

use crate::errors::NetworkError;
use crate::math::vector::WeightVector;

/// Bias vector of one non-input layer: the additive term injected before activation.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasWeightPair {
    weights: WeightVector,
}

impl BiasWeightPair {
    /// Every bias drawn independently from U[-1, 1).
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> BiasWeightPair {
        BiasWeightPair {
            weights: WeightVector::from_data((0..size).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect()),
        }
    }

    pub fn from_weights(weights: WeightVector) -> BiasWeightPair {
        BiasWeightPair { weights }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn additions_to_next_layer(&self) -> &WeightVector {
        &self.weights
    }

    /// Whole-vector replacement. The length is fixed at construction.
    pub fn set_weights(&mut self, weights: WeightVector) -> Result<(), NetworkError> {
        if weights.len() != self.len() {
            return Err(NetworkError::DimensionMismatch {
                expected: self.len(),
                actual: weights.len(),
            });
        }
        self.weights = weights;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_biases_are_in_unit_range() {
        let bias = BiasWeightPair::random(64, &mut StdRng::seed_from_u64(3));
        assert_eq!(bias.len(), 64);
        assert!(bias.additions_to_next_layer().iter().all(|&b| (-1.0..1.0).contains(&b)));
    }

    #[test]
    fn set_weights_rejects_a_different_length() {
        let original = WeightVector::from_data(vec![0.1, 0.2]);
        let mut bias = BiasWeightPair::from_weights(original.clone());

        let result = bias.set_weights(WeightVector::zeros(3));

        assert!(matches!(
            result,
            Err(NetworkError::DimensionMismatch { expected: 2, actual: 3 })
        ));
        assert_eq!(bias.additions_to_next_layer(), &original);
    }

    #[test]
    fn set_weights_replaces_the_whole_vector() {
        let mut bias = BiasWeightPair::from_weights(WeightVector::zeros(2));
        bias.set_weights(WeightVector::from_data(vec![-0.5, 0.75])).unwrap();
        assert_eq!(bias.additions_to_next_layer().data, vec![-0.5, 0.75]);
    }
}
