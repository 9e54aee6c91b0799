pub mod cluster;
pub mod example;

pub use cluster::{partition, DataCluster};
pub use example::Data;
