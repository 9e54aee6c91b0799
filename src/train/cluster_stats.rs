use serde::{Serialize, Deserialize};

/// Statistics for one converged cluster, emitted by `Network::train_with`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent as soon as each cluster converges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    /// 1-based cluster number.
    pub cluster: usize,
    pub total_clusters: usize,
    /// Examples in this cluster.
    pub examples: usize,
    /// Learning passes it took to converge.
    pub passes: usize,
    /// Mean squared error over the cluster after convergence.
    pub loss: f64,
    pub elapsed_ms: u64,
}
