//! Error types for benchmark operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Sorry, the function '{name}' is not yet implemented")]
    UnknownKernel { name: String },

    #[error("Illegal range input: '{range}' ({reason})")]
    InvalidRange { range: String, reason: String },

    #[error("Invalid number of runs: {value}. Must be greater than 0")]
    InvalidNumRuns { value: u32 },

    #[error("Configuration file not found: {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration file '{path}': {source}")]
    ConfigParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Kernel '{kernel}' failed for N = {n}: {message}")]
    KernelFailed {
        kernel: String,
        n: usize,
        message: String,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type BenchmarkResult<T> = std::result::Result<T, BenchmarkError>;
