use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::activation::ActivationFunction;
use crate::data::cluster::{partition, DataCluster};
use crate::data::example::Data;
use crate::errors::NetworkError;
use crate::layers::bias::BiasWeightPair;
use crate::layers::layer::Layer;
use crate::loss::mse::MseLoss;
use crate::math::matrix::WeightsMat;
use crate::network::spec::NetworkSpec;
use crate::train::algorithm::{Adjustment, NetworkState, TrainingAlgorithm, TrainingAlgorithmKind};
use crate::train::cluster_stats::ClusterStats;
use crate::train::train_config::{TrainConfig, TrainingBudget};

/// Passes between progress logs of a cluster that is still learning.
const LOG_INTERVAL: usize = 1000;

/// A fully-connected feedforward network together with its training clusters.
///
/// The network exclusively owns every layer, weight matrix and bias vector.
/// It is `Send`, so independent networks can be trained on separate threads,
/// but a single instance must not be shared between concurrent callers.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    weight_matrices: Vec<WeightsMat>,
    biases: Vec<BiasWeightPair>,
    clusters: Vec<DataCluster>,
    activation: ActivationFunction,
    algorithm: Box<dyn TrainingAlgorithm>,
    budget: TrainingBudget,
}

impl Network {
    /// Shuffles `data` into clusters of `cluster_size` and builds a network
    /// with one layer per entry of `layer_sizes`.
    pub fn new(
        data: Vec<Data>,
        cluster_size: usize,
        activation: ActivationFunction,
        algorithm: TrainingAlgorithmKind,
        learning_rate: f64,
        accepted_error: f64,
        layer_sizes: &[usize],
    ) -> Result<Network, NetworkError> {
        let spec = NetworkSpec::new(
            layer_sizes.to_vec(),
            cluster_size,
            activation,
            algorithm,
            learning_rate,
            accepted_error,
        );
        Network::from_spec(data, &spec)
    }

    /// Builds a network from a spec, seeding the RNG from `spec.seed` when set.
    pub fn from_spec(data: Vec<Data>, spec: &NetworkSpec) -> Result<Network, NetworkError> {
        let mut rng = match spec.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::with_rng(data, spec, &mut rng)
    }

    /// Builds a network drawing the shuffle and the initial weights from `rng`.
    ///
    /// Every weight and bias starts uniformly distributed in [-1, 1).
    pub fn with_rng<R: Rng + ?Sized>(
        data: Vec<Data>,
        spec: &NetworkSpec,
        rng: &mut R,
    ) -> Result<Network, NetworkError> {
        spec.validate()?;
        let algorithm = spec.algorithm.build(spec.learning_rate, spec.accepted_error)?;

        for example in &data {
            check_len(spec.input_size(), example.input().len())?;
            check_len(spec.output_size(), example.output().len())?;
        }

        let clusters = partition(data, spec.cluster_size, rng)?;

        let layers: Vec<Layer> = spec.layer_sizes.iter().map(|&size| Layer::new(size)).collect();
        let weight_matrices = spec
            .layer_sizes
            .windows(2)
            .map(|pair| WeightsMat::random(pair[0], pair[1], rng))
            .collect();
        let biases = spec
            .layer_sizes
            .iter()
            .skip(1)
            .map(|&size| BiasWeightPair::random(size, rng))
            .collect();

        tracing::debug!(
            layers = ?spec.layer_sizes,
            clusters = clusters.len(),
            activation = ?spec.activation,
            "network built"
        );

        Ok(Network {
            layers,
            weight_matrices,
            biases,
            clusters,
            activation: spec.activation,
            algorithm,
            budget: spec.budget.clone(),
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weight_matrices(&self) -> &[WeightsMat] {
        &self.weight_matrices
    }

    pub fn biases(&self) -> &[BiasWeightPair] {
        &self.biases
    }

    pub fn clusters(&self) -> &[DataCluster] {
        &self.clusters
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn budget(&self) -> &TrainingBudget {
        &self.budget
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_size(&self) -> usize {
        self.output_layer().len()
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Runs every cluster to convergence using the budget from the spec.
    pub fn train(&mut self) -> Result<Vec<ClusterStats>, NetworkError> {
        let config = TrainConfig::new(self.budget.clone());
        self.train_with(&config)
    }

    /// Runs every cluster to convergence, in order, and returns per-cluster stats.
    ///
    /// Stops at the first cluster that fails; clusters before it stay learned.
    pub fn train_with(&mut self, config: &TrainConfig) -> Result<Vec<ClusterStats>, NetworkError> {
        config.budget.validate()?;

        // Detach the clusters so their examples can be borrowed while the
        // network mutates itself.
        let clusters = std::mem::take(&mut self.clusters);
        let started = Instant::now();
        let result = self.train_clusters(&clusters, config);
        self.clusters = clusters;

        if let Ok(ref stats) = result {
            tracing::info!(
                "Trained {} clusters in {} ms",
                stats.len(),
                started.elapsed().as_millis()
            );
        }

        result
    }

    fn train_clusters(
        &mut self,
        clusters: &[DataCluster],
        config: &TrainConfig,
    ) -> Result<Vec<ClusterStats>, NetworkError> {
        let total = clusters.len();
        let mut all_stats = Vec::with_capacity(total);

        for (i, cluster) in clusters.iter().enumerate() {
            let stats = self.add_patterns(cluster, i + 1, total, &config.budget)?;

            tracing::info!(
                "Cluster {}/{} converged after {} passes: loss = {:.6}",
                stats.cluster, total, stats.passes, stats.loss
            );

            if let Some(ref tx) = config.progress_tx {
                // A dropped receiver only means nobody is listening any more.
                let _ = tx.send(stats.clone());
            }

            all_stats.push(stats);
        }

        Ok(all_stats)
    }

    /// Learns `cluster` until every example in it satisfies the convergence test.
    ///
    /// One pass applies `learn_pattern` to each example in cluster order; after
    /// each pass the whole cluster is re-checked. Fails with `NonConvergence`
    /// once the pass cap or the time budget is exhausted.
    ///
    /// `cluster_number` (1-based) and `total_clusters` only label the returned
    /// stats and the error.
    pub fn add_patterns(
        &mut self,
        cluster: &DataCluster,
        cluster_number: usize,
        total_clusters: usize,
        budget: &TrainingBudget,
    ) -> Result<ClusterStats, NetworkError> {
        budget.validate()?;
        let started = Instant::now();
        let time_budget = budget.time_budget();
        let mut passes = 0;

        loop {
            for example in cluster {
                self.learn_pattern(example)?;
            }
            passes += 1;

            if self.has_learned_cluster(cluster)? {
                break;
            }

            let elapsed = started.elapsed();
            let out_of_time = time_budget.is_some_and(|limit| elapsed >= limit);
            if passes >= budget.max_passes || out_of_time {
                tracing::warn!(
                    "Cluster {}/{} gave up after {} passes ({} ms)",
                    cluster_number,
                    total_clusters,
                    passes,
                    elapsed.as_millis()
                );
                return Err(NetworkError::NonConvergence {
                    cluster: cluster_number,
                    passes,
                    elapsed_ms: millis(elapsed),
                });
            }

            if passes % LOG_INTERVAL == 0 {
                tracing::debug!(passes, "cluster still learning");
            }
        }

        Ok(ClusterStats {
            cluster: cluster_number,
            total_clusters,
            examples: cluster.len(),
            passes,
            loss: self.cluster_loss(cluster)?,
            elapsed_ms: millis(started.elapsed()),
        })
    }

    /// Forward-passes every example of `cluster` and checks it against the
    /// training algorithm's convergence test. Stops at the first miss.
    pub fn has_learned_cluster(&mut self, cluster: &DataCluster) -> Result<bool, NetworkError> {
        for example in cluster {
            self.feed_forward(example.input())?;
            if !self.algorithm.has_learned(self.output_layer(), example)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// One online learning step: forward pass, then install the weights and
    /// biases the training algorithm computes for `example`.
    pub fn learn_pattern(&mut self, example: &Data) -> Result<(), NetworkError> {
        self.feed_forward(example.input())?;

        let state = NetworkState {
            layers: &self.layers,
            weights: &self.weight_matrices,
            biases: &self.biases,
            activation: &self.activation,
        };
        let adjustment = self.algorithm.adjust(state, example)?;
        self.replace_parameters(adjustment)?;

        tracing::trace!(
            output = ?self.output_layer().values(),
            expected = ?example.output(),
            "pattern learned"
        );

        Ok(())
    }

    /// Installs a full set of new parameters, or nothing if any shape is off.
    fn replace_parameters(&mut self, adjustment: Adjustment) -> Result<(), NetworkError> {
        let Adjustment { weights, biases } = adjustment;

        if weights.len() != self.weight_matrices.len() || biases.len() != self.biases.len() {
            return Err(NetworkError::shapes(format!(
                "adjustment has {} weight matrices and {} bias vectors, network has {} and {}",
                weights.len(),
                biases.len(),
                self.weight_matrices.len(),
                self.biases.len()
            )));
        }
        for (i, (new, old)) in weights.iter().zip(&self.weight_matrices).enumerate() {
            if new.shape() != old.shape() {
                return Err(NetworkError::shapes(format!(
                    "weight matrix {i} changed shape from {:?} to {:?}",
                    old.shape(),
                    new.shape()
                )));
            }
        }
        for (i, (new, old)) in biases.iter().zip(&self.biases).enumerate() {
            if new.len() != old.len() {
                return Err(NetworkError::shapes(format!(
                    "bias vector {i} changed length from {} to {}",
                    old.len(),
                    new.len()
                )));
            }
        }

        self.weight_matrices = weights;
        for (slot, new) in self.biases.iter_mut().zip(biases) {
            slot.set_weights(new)?;
        }

        Ok(())
    }

    /// Propagates `input` through every layer.
    ///
    /// The length is checked before anything is touched, so a mismatched input
    /// leaves all activations as they were.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<(), NetworkError> {
        check_len(self.input_size(), input.len())?;
        self.layers[0].update_layer(input)?;

        for i in 0..self.weight_matrices.len() {
            let pre = self.weight_matrices[i]
                .mul_by_neurons(self.layers[i].neurons())?
                .sum(self.biases[i].additions_to_next_layer())?;
            let activated = pre.map(|x| self.activation.function(x));
            self.layers[i + 1].replace(pre, activated)?;
        }

        Ok(())
    }

    /// Forward-passes `input` and returns a copy of the output activations.
    ///
    /// Weights and biases are left untouched.
    pub fn compute(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.feed_forward(input)?;
        Ok(self.output_layer().values())
    }

    /// Mean squared error of the network over `cluster`.
    pub fn cluster_loss(&mut self, cluster: &DataCluster) -> Result<f64, NetworkError> {
        if cluster.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for example in cluster {
            let output = self.compute(example.input())?;
            total += MseLoss::loss(&output, example.output());
        }
        Ok(total / cluster.len() as f64)
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), NetworkError> {
    if expected != actual {
        return Err(NetworkError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
