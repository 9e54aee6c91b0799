use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::errors::NetworkError;
use crate::train::algorithm::TrainingAlgorithmKind;
use crate::train::train_config::TrainingBudget;

/// A fully serializable description of a network and how it is trained.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Neurons per layer, input first, output last.
    pub layer_sizes: Vec<usize>,
    /// Examples per training cluster.
    pub cluster_size: usize,
    pub activation: ActivationFunction,
    pub algorithm: TrainingAlgorithmKind,
    pub learning_rate: f64,
    /// Largest per-output absolute error at which an example counts as learned.
    pub accepted_error: f64,
    #[serde(default)]
    pub budget: TrainingBudget,
    /// Seeds shuffling and weight initialization; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    pub fn new(
        layer_sizes: Vec<usize>,
        cluster_size: usize,
        activation: ActivationFunction,
        algorithm: TrainingAlgorithmKind,
        learning_rate: f64,
        accepted_error: f64,
    ) -> NetworkSpec {
        NetworkSpec {
            layer_sizes,
            cluster_size,
            activation,
            algorithm,
            learning_rate,
            accepted_error,
            budget: TrainingBudget::default(),
            seed: None,
        }
    }

    pub fn with_budget(mut self, budget: TrainingBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes.first().copied().unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes.last().copied().unwrap_or(0)
    }

    /// Rejects malformed parameters before anything is built.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.layer_sizes.len() < 2 {
            return Err(NetworkError::invalid(format!(
                "need at least an input and an output layer, got {} layer sizes",
                self.layer_sizes.len()
            )));
        }
        if let Some(pos) = self.layer_sizes.iter().position(|&size| size == 0) {
            return Err(NetworkError::invalid(format!("layer {pos} has size 0")));
        }
        if self.cluster_size == 0 {
            return Err(NetworkError::invalid("cluster size must be at least 1"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::invalid(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.accepted_error.is_finite() && self.accepted_error > 0.0) {
            return Err(NetworkError::invalid(format!(
                "accepted error must be positive, got {}",
                self.accepted_error
            )));
        }
        self.budget.validate()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), NetworkError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
