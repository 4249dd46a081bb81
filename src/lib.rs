//! Measurement harness for dense linear-algebra kernels.
//!
//! Times matrix multiply, QR, matrix-vector product, triangular solve,
//! Cholesky factorization and SVD from `nalgebra` over a range of problem
//! sizes and reports mean time and throughput per size.

pub mod benchmarks;

pub use benchmarks::{
    BenchmarkConfig, BenchmarkError, BenchmarkResult, BenchmarkRunner, ConfigLoader, Kernel,
    SizeRange, SizeResult,
};
