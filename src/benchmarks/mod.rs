//! Benchmark driver for dense linear-algebra kernels.
//!
//! Each kernel is timed over a range of square problem sizes and reported as
//! mean wall-clock time and mean achieved GFLOPS per size.

pub mod accumulator;
pub mod benchmark_errors;
pub mod benchmark_runner;
pub mod benchmark_types;
pub mod kernels;
pub mod performance_metrics;

pub use accumulator::Accumulator;
pub use benchmark_errors::{BenchmarkError, BenchmarkResult};
pub use benchmark_runner::{BenchmarkRunner, ConfigLoader};
pub use benchmark_types::{BenchmarkConfig, SizeRange, SizeResult};
pub use kernels::{Kernel, Workspace};
pub use performance_metrics::{benchmark_workload, format_scientific};
