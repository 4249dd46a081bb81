//! Core benchmark execution logic.

use super::benchmark_errors::{BenchmarkError, BenchmarkResult};
use super::benchmark_types::{BenchmarkConfig, SizeResult};
use super::kernels::{Kernel, Workspace};
use super::performance_metrics::{benchmark_workload, write_csv_line, write_tsv_line};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Configuration loader for JSON benchmark configurations
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file; absent fields take their defaults.
    pub fn load_config(path: impl AsRef<Path>) -> BenchmarkResult<BenchmarkConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BenchmarkError::ConfigFileNotFound {
                path: path.display().to_string(),
            },
            _ => BenchmarkError::Io { source: e },
        })?;

        serde_json::from_str(&content).map_err(|e| BenchmarkError::ConfigParseError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Drives one kernel across every size of the configured range.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    kernel: Kernel,
    workspace: Workspace,
}

impl BenchmarkRunner {
    /// Validates `config` and allocates an empty workspace.
    pub fn new(config: BenchmarkConfig) -> BenchmarkResult<Self> {
        config.validate()?;
        let kernel = config.kernel()?;
        let workspace = Workspace::new(config.seed);

        Ok(Self {
            config,
            kernel,
            workspace,
        })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Benchmarks every size, writing tab-separated lines to `out` and
    /// comma-separated lines (plus progress markers) to `err`.
    pub fn run<O, E>(&mut self, out: &mut O, err: &mut E) -> BenchmarkResult<Vec<SizeResult>>
    where
        O: Write,
        E: Write,
    {
        let kernel = self.kernel;
        let range = self.config.range;
        let warm_ups = self.config.warm_up_runs;
        let num_runs = self.config.num_runs;
        let show_progress = self.config.progress;

        info!(
            "Benchmarking {} over N = {} ({} warm-up, {} timed runs per size)",
            kernel, range, warm_ups, num_runs
        );
        if range.is_empty() {
            warn!("Range {} contains no sizes, nothing to benchmark", range);
        }

        let mut results = Vec::with_capacity(range.len());
        for n in range.sizes() {
            info!("Preparing {} inputs for N = {}", kernel, n);
            self.workspace.prepare(n, kernel);

            let workspace = &mut self.workspace;
            let progress: Option<&mut dyn Write> = if show_progress {
                Some(&mut *err)
            } else {
                None
            };
            let result =
                benchmark_workload(n, warm_ups, num_runs, progress, || workspace.run(kernel))?;

            write_tsv_line(out, &result)?;
            write_csv_line(err, &result)?;
            debug!(
                "N = {}: time std dev {:.3e} s, throughput std dev {:.3e} GFLOPS",
                n, result.time_std_dev, result.gflops_std_dev
            );

            results.push(result);
        }

        info!("Benchmark of {} complete: {} size(s)", kernel, results.len());
        Ok(results)
    }

    /// Lists available kernels
    pub fn list_kernels<W: Write>(out: &mut W) -> io::Result<()> {
        writeln!(out, "Available kernels:")?;
        for kernel in Kernel::all() {
            writeln!(out, "  {:<8} - {}", kernel.name(), kernel.description())?;
        }
        Ok(())
    }
}
