use crate::errors::NetworkError;
use crate::layers::neuron::Neuron;
use crate::math::vector::WeightVector;

/// Activations of one network depth level.
///
/// Besides the neuron values the layer keeps the pre-activation values
/// (`z = W·a + b`) of the last forward pass, which the activation derivative
/// needs during training. For the input layer both are the raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
    pre_activations: WeightVector,
}

impl Layer {
    pub fn new(size: usize) -> Layer {
        Layer {
            neurons: vec![Neuron::default(); size],
            pre_activations: WeightVector::zeros(size),
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn pre_activations(&self) -> &WeightVector {
        &self.pre_activations
    }

    /// Copy of the current activation values.
    pub fn values(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::get).collect()
    }

    /// Overwrites the layer with raw values (input layer).
    pub fn update_layer(&mut self, values: &[f64]) -> Result<(), NetworkError> {
        self.check_len(values.len())?;
        for (neuron, &value) in self.neurons.iter_mut().zip(values) {
            neuron.set(value);
        }
        self.pre_activations = WeightVector::from_data(values.to_vec());
        Ok(())
    }

    /// Bulk replacement after a propagation step; the layer never changes size.
    pub fn replace(
        &mut self,
        pre_activations: WeightVector,
        activations: WeightVector,
    ) -> Result<(), NetworkError> {
        self.check_len(pre_activations.len())?;
        self.check_len(activations.len())?;
        self.neurons = activations.data.into_iter().map(Neuron::new).collect();
        self.pre_activations = pre_activations;
        Ok(())
    }

    fn check_len(&self, actual: usize) -> Result<(), NetworkError> {
        if actual != self.len() {
            return Err(NetworkError::DimensionMismatch {
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }
}
