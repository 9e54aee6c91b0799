//! A from-scratch feedforward network trainer.
//!
//! Training data is shuffled into fixed-size clusters; each cluster is learned
//! online, example by example, until every example in it is predicted within
//! the accepted error. The trained network then answers `compute` queries.
//!
//! ```no_run
//! use clusternet::{ActivationFunction, Data, Network, TrainingAlgorithmKind};
//!
//! let data = vec![
//!     Data::new(vec![1.0, 0.0], vec![1.0]),
//!     Data::new(vec![1.0, 1.0], vec![0.0]),
//!     Data::new(vec![0.0, 1.0], vec![1.0]),
//!     Data::new(vec![0.0, 0.0], vec![0.0]),
//! ];
//! let mut network = Network::new(
//!     data,
//!     4,
//!     ActivationFunction::Sigmoid,
//!     TrainingAlgorithmKind::BackPropagation,
//!     1.0,
//!     0.1,
//!     &[2, 2, 1],
//! )?;
//! network.train()?;
//! println!("{:?}", network.compute(&[1.0, 0.0])?);
//! # Ok::<(), clusternet::NetworkError>(())
//! ```

pub mod math;
pub mod activation;
pub mod layers;
pub mod data;
pub mod network;
pub mod loss;
pub mod train;
pub mod errors;

// Convenience re-exports
pub use math::{WeightVector, WeightsMat};
pub use activation::activation::ActivationFunction;
pub use layers::{BiasWeightPair, Layer, Neuron};
pub use data::{Data, DataCluster};
pub use network::{Network, NetworkSpec};
pub use loss::mse::MseLoss;
pub use train::{
    Adjustment, BackPropagation, ClusterStats, NetworkState, TrainConfig, TrainingAlgorithm,
    TrainingAlgorithmKind, TrainingBudget,
};
pub use errors::NetworkError;
