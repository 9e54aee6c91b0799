use std::sync::mpsc;
use std::thread;

use clusternet::{
    ActivationFunction, ClusterStats, Data, Network, NetworkError, NetworkSpec, TrainConfig,
    TrainingAlgorithmKind, TrainingBudget,
};

fn main() -> Result<(), NetworkError> {
    tracing_subscriber::fmt::init();

    let data = vec![
        Data::new(vec![1.0, 0.0], vec![1.0]),
        Data::new(vec![1.0, 1.0], vec![0.0]),
        Data::new(vec![0.0, 1.0], vec![1.0]),
        Data::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let spec = NetworkSpec::new(
        vec![2, 2, 1],
        4,
        ActivationFunction::Sigmoid,
        TrainingAlgorithmKind::BackPropagation,
        1.0,
        0.05,
    )
    .with_budget(TrainingBudget::new(50_000));

    // Two hidden sigmoids sometimes settle in a local minimum; start over
    // with fresh weights when that happens.
    let mut network = loop {
        let mut network = Network::from_spec(data.clone(), &spec)?;

        let (tx, rx) = mpsc::channel::<ClusterStats>();
        let printer = thread::spawn(move || {
            for stats in rx {
                println!(
                    "Cluster {}/{}: {} passes, loss = {:.6}",
                    stats.cluster, stats.total_clusters, stats.passes, stats.loss
                );
            }
        });

        let result = network.train_with(&TrainConfig::new(spec.budget.clone()).with_progress(tx));
        let _ = printer.join();

        match result {
            Ok(_) => break network,
            Err(NetworkError::NonConvergence { passes, .. }) => {
                println!("No convergence after {passes} passes, reinitializing");
            }
            Err(err) => return Err(err),
        }
    };

    for example in &data {
        println!(
            "Input: {:?} -> Output: {:.4}",
            example.input(),
            network.compute(example.input())?[0]
        );
    }

    Ok(())
}
