// Small driver around the library: load a spec and a data set (or fall back to
// the XOR table), train to convergence, print what the network computes.
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use clusternet::{
    ActivationFunction, Data, Network, NetworkError, NetworkSpec, TrainingAlgorithmKind,
};

#[derive(Parser, Debug)]
#[command(name = "clusternet", about = "Train a feedforward network cluster by cluster")]
struct Cli {
    /// Network spec (JSON). Defaults to a 2-2-1 sigmoid network.
    #[arg(long)]
    config: Option<String>,

    /// Training examples (JSON array of {"input": [...], "output": [...]}).
    /// Defaults to the XOR table.
    #[arg(long)]
    data: Option<String>,

    /// Overrides the seed from the spec.
    #[arg(long)]
    seed: Option<u64>,

    /// trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn xor_table() -> Vec<Data> {
    vec![
        Data::new(vec![1.0, 0.0], vec![1.0]),
        Data::new(vec![1.0, 1.0], vec![0.0]),
        Data::new(vec![0.0, 1.0], vec![1.0]),
        Data::new(vec![0.0, 0.0], vec![0.0]),
    ]
}

fn default_spec() -> NetworkSpec {
    NetworkSpec::new(
        vec![2, 2, 1],
        4,
        ActivationFunction::Sigmoid,
        TrainingAlgorithmKind::BackPropagation,
        1.0,
        0.1,
    )
}

fn run(cli: &Cli) -> Result<(), NetworkError> {
    let mut spec = match cli.config {
        Some(ref path) => NetworkSpec::load_json(path)?,
        None => default_spec(),
    };
    if let Some(seed) = cli.seed {
        spec.seed = Some(seed);
    }

    let data = match cli.data {
        Some(ref path) => Data::load_json(path)?,
        None => xor_table(),
    };

    let mut network = Network::from_spec(data.clone(), &spec)?;
    let stats = network.train()?;
    let passes: usize = stats.iter().map(|s| s.passes).sum();
    println!("Trained {} clusters in {} passes", stats.len(), passes);

    for example in &data {
        let output = network.compute(example.input())?;
        println!(
            "Input: {:?} -> Output: {:.4?} (expected {:?})",
            example.input(),
            output,
            example.output()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install logger: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
