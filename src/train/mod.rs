pub mod algorithm;
pub mod backprop;
pub mod cluster_stats;
pub mod train_config;

pub use algorithm::{Adjustment, NetworkState, TrainingAlgorithm, TrainingAlgorithmKind};
pub use backprop::BackPropagation;
pub use cluster_stats::ClusterStats;
pub use train_config::{TrainConfig, TrainingBudget};
