//! CIFAR classification benchmark executable.
//!
//! Loads the model manifest onto the host reference driver, reads the CIFAR
//! test batch, runs every image through the accelerator pipeline and prints
//! a one-line accuracy and throughput summary.

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use tcu_cifar_benchmark::benchmarks::{BenchmarkRunner, ConfigLoader};
use tcu_cifar_benchmark::console::TerminalConsole;
use tcu_cifar_benchmark::live_reporter::LiveReporter;
use tcu_cifar_benchmark::{
    AcceleratorDriver, BenchmarkResult, CifarDataset, HostDriver, ModelDescriptor, Stopwatch,
};

#[derive(Parser)]
#[command(name = "cifar_benchmark")]
#[command(about = "Measure accuracy and throughput of an accelerator on the CIFAR test batch")]
struct Cli {
    /// Benchmark configuration file (defaults are used when it is missing)
    #[arg(short, long, default_value = "configs/cifar_benchmark.json")]
    config: PathBuf,

    /// Model manifest, overriding the configuration
    #[arg(short, long)]
    model: Option<String>,

    /// CIFAR binary test batch, overriding the configuration
    #[arg(short, long)]
    dataset: Option<String>,

    /// Disable the live progress display
    #[arg(long)]
    no_images: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run_benchmark(cli) {
        error!("Benchmark execution failed: {}", e);
        std::process::exit(1);
    }
}

fn run_benchmark(cli: Cli) -> BenchmarkResult<()> {
    let mut config = ConfigLoader::load_benchmark_config(&cli.config)?;
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if cli.no_images {
        config.print_images = false;
    }
    config.validate()?;

    let mut driver = HostDriver::initialize();
    let model = ModelDescriptor::from_file(&config.model_path)?;
    info!("Loading model {}", config.model_path);
    driver.load_model(&model)?;

    let dataset = CifarDataset::load(&config.dataset_path, config.dataset_capacity)?;

    let mut runner = BenchmarkRunner::new(&mut driver, &model, &config, Stopwatch::new());
    let statistics = if config.print_images {
        let mut reporter = LiveReporter::new(
            TerminalConsole::stdout(),
            config.preview_interval,
            config.class_names.clone(),
        );
        runner.run_with_reporter(&dataset, &mut reporter)?
    } else {
        runner.run(&dataset)?
    };

    println!("{}", statistics.summary(&config.name));
    Ok(())
}
