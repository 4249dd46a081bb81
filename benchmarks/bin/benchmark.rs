//! Main benchmark CLI executable.
//!
//! Prints `N\tTIME\tGFLOPS` per size on stdout and `N,TIME,GFLOPS` on stderr.

use clap::Parser;
use linalg_bench::{BenchmarkConfig, BenchmarkResult, BenchmarkRunner, ConfigLoader};
use log::{error, warn};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "benchmark", version)]
#[command(about = "Benchmark dense linear-algebra kernels over a range of problem sizes", long_about = None)]
struct Cli {
    /// Function to test e.g. dgemm, dgeqp3 [default: dgemm]
    #[arg(long)]
    function: Option<String>,

    /// Warm up runs per size [default: 1]
    #[arg(long)]
    warm_up_runs: Option<u32>,

    /// Timed runs per size [default: 10]
    #[arg(long)]
    num_runs: Option<u32>,

    /// N range i.e. start:stop:step [default: 1024:10240:1024]
    #[arg(long)]
    range: Option<String>,

    /// Seed for the random inputs
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// List available kernels and exit
    #[arg(long)]
    list: bool,

    /// Do not write a progress marker to stderr after each run
    #[arg(long)]
    no_progress: bool,
}

fn main() {
    // Initialize logger, warnings visible unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if cfg!(debug_assertions) {
        warn!("Running a debug build, timings are not representative");
    }

    let cli = Cli::parse();

    if let Err(e) = run_benchmark(cli) {
        error!("Benchmark execution failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_benchmark(cli: Cli) -> BenchmarkResult<()> {
    if cli.list {
        BenchmarkRunner::list_kernels(&mut io::stdout())?;
        return Ok(());
    }

    let config = resolve_config(cli)?;
    let mut runner = BenchmarkRunner::new(config)?;
    runner.run(&mut io::stdout(), &mut io::stderr())?;

    Ok(())
}

fn resolve_config(cli: Cli) -> BenchmarkResult<BenchmarkConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => BenchmarkConfig::default(),
    };

    if let Some(function) = cli.function {
        config.function = function;
    }
    if let Some(warm_up_runs) = cli.warm_up_runs {
        config.warm_up_runs = warm_up_runs;
    }
    if let Some(num_runs) = cli.num_runs {
        config.num_runs = num_runs;
    }
    if let Some(range) = cli.range {
        config.range = range.parse()?;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_progress {
        config.progress = false;
    }

    Ok(config)
}
