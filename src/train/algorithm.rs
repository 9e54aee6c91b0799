use std::fmt::Debug;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::data::example::Data;
use crate::errors::NetworkError;
use crate::layers::bias::BiasWeightPair;
use crate::layers::layer::Layer;
use crate::math::matrix::WeightsMat;
use crate::math::vector::WeightVector;
use crate::train::backprop::BackPropagation;

/// Replacement parameters produced by one gradient pass.
///
/// Weights and biases come from the same pass so the network installs them together.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub weights: Vec<WeightsMat>,
    pub biases: Vec<WeightVector>,
}

/// Read-only view of the network state a training algorithm works on.
#[derive(Debug, Clone, Copy)]
pub struct NetworkState<'a> {
    /// Layers after a forward pass of the example being learned.
    pub layers: &'a [Layer],
    pub weights: &'a [WeightsMat],
    pub biases: &'a [BiasWeightPair],
    pub activation: &'a ActivationFunction,
}

/// Policy that adjusts weights for one example and decides when an example is learned.
///
/// Implementations never touch the network: they return fresh parameters and
/// the caller installs them.
pub trait TrainingAlgorithm: Debug + Send + Sync {
    /// New weight matrices and bias vectors that reduce the error on `example`.
    fn adjust(&self, state: NetworkState<'_>, example: &Data) -> Result<Adjustment, NetworkError>;

    /// Whether `output` (the output layer after a forward pass of `example`)
    /// is within the accepted error of the expected output.
    fn has_learned(&self, output: &Layer, example: &Data) -> Result<bool, NetworkError>;
}

/// Closed set of training algorithms, resolved once when a network is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingAlgorithmKind {
    BackPropagation,
}

impl TrainingAlgorithmKind {
    pub fn build(
        &self,
        learning_rate: f64,
        accepted_error: f64,
    ) -> Result<Box<dyn TrainingAlgorithm>, NetworkError> {
        match self {
            TrainingAlgorithmKind::BackPropagation => {
                Ok(Box::new(BackPropagation::new(learning_rate, accepted_error)?))
            }
        }
    }
}

impl FromStr for TrainingAlgorithmKind {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "back_propagation" | "backpropagation" | "backprop" => {
                Ok(TrainingAlgorithmKind::BackPropagation)
            }
            other => Err(NetworkError::invalid(format!("unknown training algorithm `{other}`"))),
        }
    }
}

/// Checks that `state` describes a consistent chain of layers.
pub(crate) fn check_state(state: &NetworkState<'_>) -> Result<(), NetworkError> {
    let depth = state.layers.len();
    if depth < 2 || state.weights.len() + 1 != depth || state.biases.len() + 1 != depth {
        return Err(NetworkError::shapes(format!(
            "{} layers need {} weight matrices and bias vectors, got {} and {}",
            depth,
            depth.saturating_sub(1),
            state.weights.len(),
            state.biases.len()
        )));
    }

    for (i, (w, b)) in state.weights.iter().zip(state.biases).enumerate() {
        let expected = (state.layers[i].len(), state.layers[i + 1].len());
        if w.shape() != expected || b.len() != expected.1 {
            return Err(NetworkError::shapes(format!(
                "layer pair {i}: expected {}x{} weights and {} biases, got {}x{} and {}",
                expected.0, expected.1, expected.1, w.rows, w.cols, b.len()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_name() {
        assert_eq!(
            "backprop".parse::<TrainingAlgorithmKind>().unwrap(),
            TrainingAlgorithmKind::BackPropagation
        );
        assert!("genetic".parse::<TrainingAlgorithmKind>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let kind: TrainingAlgorithmKind = serde_json::from_str("\"back_propagation\"").unwrap();
        assert_eq!(kind, TrainingAlgorithmKind::BackPropagation);
    }

    #[test]
    fn build_rejects_bad_hyperparameters() {
        assert!(TrainingAlgorithmKind::BackPropagation.build(0.0, 0.1).is_err());
        assert!(TrainingAlgorithmKind::BackPropagation.build(0.5, -1.0).is_err());
        assert!(TrainingAlgorithmKind::BackPropagation.build(0.5, 0.1).is_ok());
    }

    #[test]
    fn inconsistent_state_is_rejected() {
        let layers = vec![Layer::new(2), Layer::new(1)];
        let weights = vec![WeightsMat::zeros(2, 2)];
        let biases = vec![BiasWeightPair::from_weights(WeightVector::zeros(1))];
        let state = NetworkState {
            layers: &layers,
            weights: &weights,
            biases: &biases,
            activation: &ActivationFunction::Sigmoid,
        };
        assert!(matches!(check_state(&state), Err(NetworkError::IncompatibleShapes { .. })));
    }
}
