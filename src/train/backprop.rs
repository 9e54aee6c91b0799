use crate::data::example::Data;
use crate::errors::NetworkError;
use crate::layers::layer::Layer;
use crate::loss::mse::MseLoss;
use crate::math::matrix::WeightsMat;
use crate::math::vector::WeightVector;
use crate::train::algorithm::{check_state, Adjustment, NetworkState, TrainingAlgorithm};

/// Online gradient descent on the squared output error.
///
/// An example counts as learned once every output unit is within
/// `accepted_error` (absolute difference) of its expected value.
#[derive(Debug, Clone, PartialEq)]
pub struct BackPropagation {
    learning_rate: f64,
    accepted_error: f64,
}

impl BackPropagation {
    pub fn new(learning_rate: f64, accepted_error: f64) -> Result<BackPropagation, NetworkError> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetworkError::invalid(format!(
                "learning rate must be positive, got {learning_rate}"
            )));
        }
        if !(accepted_error.is_finite() && accepted_error > 0.0) {
            return Err(NetworkError::invalid(format!(
                "accepted error must be positive, got {accepted_error}"
            )));
        }
        Ok(BackPropagation { learning_rate, accepted_error })
    }

    fn check_output(output: &Layer, example: &Data) -> Result<(), NetworkError> {
        if example.output().len() != output.len() {
            return Err(NetworkError::shapes(format!(
                "expected output has {} values but the output layer has {} neurons",
                example.output().len(),
                output.len()
            )));
        }
        Ok(())
    }
}

impl TrainingAlgorithm for BackPropagation {
    fn adjust(&self, state: NetworkState<'_>, example: &Data) -> Result<Adjustment, NetworkError> {
        check_state(&state)?;
        let depth = state.layers.len();
        let output = &state.layers[depth - 1];
        Self::check_output(output, example)?;

        let lr = self.learning_rate;
        let act_derivative = |layer: &Layer| {
            layer.pre_activations().map(|z| state.activation.derivative(z))
        };

        // δ_out = (a - y) ⊙ σ'(z)
        let error = WeightVector::from(MseLoss::derivative(&output.values(), example.output()));
        let mut delta = error.hadamard(&act_derivative(output))?;

        let mut weights = Vec::with_capacity(depth - 1);
        let mut biases = Vec::with_capacity(depth - 1);

        for i in (0..depth - 1).rev() {
            let w = &state.weights[i];
            let inputs = state.layers[i].values();

            weights.push(w.sub(&WeightsMat::outer(&inputs, &delta).map(|x| x * lr))?);
            biases.push(
                state.biases[i]
                    .additions_to_next_layer()
                    .sum(&delta.map(|d| -lr * d))?,
            );

            if i > 0 {
                // Propagate δ through the old weights before moving down a layer.
                delta = w.mul_by_delta(&delta)?.hadamard(&act_derivative(&state.layers[i]))?;
            }
        }

        weights.reverse();
        biases.reverse();

        Ok(Adjustment { weights, biases })
    }

    fn has_learned(&self, output: &Layer, example: &Data) -> Result<bool, NetworkError> {
        Self::check_output(output, example)?;
        let values = output.values();
        if values.iter().any(|v| !v.is_finite()) {
            return Ok(false);
        }
        Ok(MseLoss::max_abs_error(&values, example.output()) <= self.accepted_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::layers::bias::BiasWeightPair;
    use approx::assert_abs_diff_eq;

    /// Layers of a 1-1 network after a forward pass of `x`.
    fn forward_1_1(x: f64, w: f64, b: f64, f: ActivationFunction) -> Vec<Layer> {
        let mut input = Layer::new(1);
        input.update_layer(&[x]).unwrap();
        let z = w * x + b;
        let mut output = Layer::new(1);
        output
            .replace(WeightVector::from_data(vec![z]), WeightVector::from_data(vec![f.function(z)]))
            .unwrap();
        vec![input, output]
    }

    #[test]
    fn identity_step_matches_hand_computation() {
        let f = ActivationFunction::Identity;
        let layers = forward_1_1(2.0, 0.5, 0.1, f);
        let weights = vec![WeightsMat::from_data(vec![vec![0.5]]).unwrap()];
        let biases = vec![BiasWeightPair::from_weights(WeightVector::from_data(vec![0.1]))];
        let state = NetworkState { layers: &layers, weights: &weights, biases: &biases, activation: &f };

        let algo = BackPropagation::new(0.5, 0.01).unwrap();
        let adj = algo.adjust(state, &Data::new(vec![2.0], vec![1.0])).unwrap();

        // output 1.1, delta 0.1
        assert_abs_diff_eq!(adj.weights[0].data[0][0], 0.5 - 0.5 * 2.0 * 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(adj.biases[0].data[0], 0.1 - 0.5 * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn sigmoid_step_moves_output_toward_target() {
        let f = ActivationFunction::Sigmoid;
        let (x, w, b) = (1.0, -0.3, 0.2);
        let layers = forward_1_1(x, w, b, f);
        let weights = vec![WeightsMat::from_data(vec![vec![w]]).unwrap()];
        let biases = vec![BiasWeightPair::from_weights(WeightVector::from_data(vec![b]))];
        let state = NetworkState { layers: &layers, weights: &weights, biases: &biases, activation: &f };

        let algo = BackPropagation::new(0.5, 0.01).unwrap();
        let example = Data::new(vec![x], vec![1.0]);
        let adj = algo.adjust(state, &example).unwrap();

        let before = f.function(w * x + b);
        let after = f.function(adj.weights[0].data[0][0] * x + adj.biases[0].data[0]);
        assert!(after > before);

        // Same inputs, same answer.
        assert_eq!(algo.adjust(state, &example).unwrap(), adj);
    }

    #[test]
    fn hidden_layer_weights_change_too() {
        let f = ActivationFunction::Sigmoid;
        let mut input = Layer::new(2);
        input.update_layer(&[1.0, 0.0]).unwrap();
        let mut hidden = Layer::new(2);
        hidden
            .replace(
                WeightVector::from_data(vec![0.3, -0.2]),
                WeightVector::from_data(vec![f.function(0.3), f.function(-0.2)]),
            )
            .unwrap();
        let mut output = Layer::new(1);
        output
            .replace(WeightVector::from_data(vec![0.1]), WeightVector::from_data(vec![f.function(0.1)]))
            .unwrap();
        let layers = vec![input, hidden, output];
        let weights = vec![
            WeightsMat::from_data(vec![vec![0.3, -0.2], vec![0.4, 0.1]]).unwrap(),
            WeightsMat::from_data(vec![vec![0.5], vec![-0.5]]).unwrap(),
        ];
        let biases = vec![
            BiasWeightPair::from_weights(WeightVector::zeros(2)),
            BiasWeightPair::from_weights(WeightVector::zeros(1)),
        ];
        let state = NetworkState { layers: &layers, weights: &weights, biases: &biases, activation: &f };

        let adj = BackPropagation::new(1.0, 0.1)
            .unwrap()
            .adjust(state, &Data::new(vec![1.0, 0.0], vec![1.0]))
            .unwrap();

        assert_eq!(adj.weights[0].shape(), (2, 2));
        assert_eq!(adj.weights[1].shape(), (2, 1));
        assert_ne!(adj.weights[0].data[0], weights[0].data[0]);
        // input unit 1 was zero: its outgoing weights get no gradient
        assert_eq!(adj.weights[0].data[1], weights[0].data[1]);
        assert_ne!(adj.biases[0], WeightVector::zeros(2));
    }

    #[test]
    fn wrong_expected_output_length_is_rejected() {
        let f = ActivationFunction::Sigmoid;
        let layers = forward_1_1(1.0, 0.0, 0.0, f);
        let weights = vec![WeightsMat::zeros(1, 1)];
        let biases = vec![BiasWeightPair::from_weights(WeightVector::zeros(1))];
        let state = NetworkState { layers: &layers, weights: &weights, biases: &biases, activation: &f };
        let algo = BackPropagation::new(0.5, 0.1).unwrap();
        let example = Data::new(vec![1.0], vec![1.0, 0.0]);

        assert!(matches!(algo.adjust(state, &example), Err(NetworkError::IncompatibleShapes { .. })));
        assert!(matches!(
            algo.has_learned(&layers[1], &example),
            Err(NetworkError::IncompatibleShapes { .. })
        ));
    }

    #[test]
    fn convergence_uses_absolute_error_per_unit() {
        let algo = BackPropagation::new(0.5, 0.1).unwrap();
        let mut output = Layer::new(2);
        output
            .replace(WeightVector::zeros(2), WeightVector::from_data(vec![0.95, 0.08]))
            .unwrap();

        assert!(algo.has_learned(&output, &Data::new(vec![], vec![1.0, 0.0])).unwrap());
        assert!(!algo.has_learned(&output, &Data::new(vec![], vec![1.0, 0.2])).unwrap());
        assert!(!algo.has_learned(&output, &Data::new(vec![], vec![0.8, 0.0])).unwrap());
    }

    #[test]
    fn non_finite_output_is_not_learned() {
        let algo = BackPropagation::new(0.5, 0.1).unwrap();
        let example = Data::new(vec![], vec![1.0, 0.0]);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut output = Layer::new(2);
            output
                .replace(WeightVector::zeros(2), WeightVector::from_data(vec![1.0, bad]))
                .unwrap();
            assert!(!algo.has_learned(&output, &example).unwrap(), "{bad} counted as learned");
        }
    }
}
