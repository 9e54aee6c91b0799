use std::sync::mpsc;
use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::errors::NetworkError;
use crate::train::cluster_stats::ClusterStats;

/// Pass cap applied to every cluster unless configured otherwise.
pub const DEFAULT_MAX_PASSES: usize = 100_000;

/// Limits on how long one cluster may keep learning before training gives up
/// with `NetworkError::NonConvergence`.
///
/// Both limits are checked between passes, after the convergence re-check, so
/// a cluster may run up to one full pass past its wall-clock limit.
///
/// # Fields
/// - `max_passes`  — full learning passes over a cluster
/// - `time_budget` — optional wall-clock limit per cluster; stored in JSON as
///                   `time_budget_ms`, rounded up to whole milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingBudget {
    pub max_passes: usize,
    #[serde(default, rename = "time_budget_ms", with = "millis")]
    pub time_budget: Option<Duration>,
}

impl Default for TrainingBudget {
    fn default() -> Self {
        TrainingBudget {
            max_passes: DEFAULT_MAX_PASSES,
            time_budget: None,
        }
    }
}

impl TrainingBudget {
    pub fn new(max_passes: usize) -> Self {
        TrainingBudget { max_passes, time_budget: None }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget
    }

    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.max_passes == 0 {
            return Err(NetworkError::invalid("max_passes must be at least 1"));
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(budget) => {
                let ms = u64::try_from(budget.as_nanos().div_ceil(1_000_000))
                    .map_err(|_| ser::Error::custom("time budget does not fit in u64 milliseconds"))?;
                serializer.serialize_some(&ms)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// Configuration for a `Network::train_with` run.
///
/// - `budget`      — per-cluster convergence limits
/// - `progress_tx` — optional channel sender; one `ClusterStats` is sent per
///                   converged cluster. A dropped receiver is ignored.
#[derive(Debug, Clone, Default)]
pub struct TrainConfig {
    pub budget: TrainingBudget,
    pub progress_tx: Option<mpsc::Sender<ClusterStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(budget: TrainingBudget) -> Self {
        TrainConfig { budget, progress_tx: None }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<ClusterStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_bounded() {
        let budget = TrainingBudget::default();
        assert_eq!(budget.max_passes, DEFAULT_MAX_PASSES);
        assert_eq!(budget.time_budget(), None);
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn zero_passes_is_invalid() {
        assert!(TrainingBudget::new(0).validate().is_err());
    }

    #[test]
    fn time_budget_keeps_sub_millisecond_limits() {
        let budget = TrainingBudget::new(10).with_time_budget(Duration::from_micros(300));
        assert_eq!(budget.time_budget(), Some(Duration::from_micros(300)));

        let json = serde_json::to_string(&budget).unwrap();
        assert_eq!(json, r#"{"max_passes":10,"time_budget_ms":1}"#);
    }

    #[test]
    fn time_budget_is_read_from_millis() {
        let parsed: TrainingBudget =
            serde_json::from_str(r#"{ "max_passes": 5, "time_budget_ms": 250 }"#).unwrap();
        assert_eq!(parsed.time_budget(), Some(Duration::from_millis(250)));

        let parsed: TrainingBudget = serde_json::from_str(r#"{ "max_passes": 5 }"#).unwrap();
        assert_eq!(parsed, TrainingBudget::new(5));
    }

    #[test]
    fn oversized_time_budget_fails_to_serialize() {
        let budget = TrainingBudget::new(1).with_time_budget(Duration::MAX);
        assert!(serde_json::to_string(&budget).is_err());
    }
}
