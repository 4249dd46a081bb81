//! Benchmark type definitions and configuration structures.

use super::benchmark_errors::{BenchmarkError, BenchmarkResult};
use super::kernels::Kernel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive range of problem sizes written as `start:stop:step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeRange {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl SizeRange {
    pub fn new(start: usize, stop: usize, step: usize) -> BenchmarkResult<Self> {
        let range = Self { start, stop, step };
        range.validate()?;
        Ok(range)
    }

    /// Problem sizes in ascending order, `stop` included when reachable.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + use<> {
        (self.start..=self.stop).step_by(self.step.max(1))
    }

    /// Number of sizes the range yields.
    pub fn len(&self) -> usize {
        if self.stop < self.start || self.step == 0 {
            0
        } else {
            (self.stop - self.start) / self.step + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> BenchmarkResult<()> {
        if self.start == 0 {
            return Err(self.invalid("start must be at least 1"));
        }
        if self.step == 0 {
            return Err(self.invalid("step must be at least 1"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> BenchmarkError {
        BenchmarkError::InvalidRange {
            range: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            start: 1024,
            stop: 10240,
            step: 1024,
        }
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

impl FromStr for SizeRange {
    type Err = BenchmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| BenchmarkError::InvalidRange {
            range: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid(format!(
                "expected start:stop:step, got {} field(s)",
                parts.len()
            )));
        }

        let mut values = [0usize; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|_| invalid(format!("'{}' is not a non-negative integer", part)))?;
        }

        Self::new(values[0], values[1], values[2]).map_err(|e| match e {
            BenchmarkError::InvalidRange { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

impl TryFrom<String> for SizeRange {
    type Error = BenchmarkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SizeRange> for String {
    fn from(range: SizeRange) -> Self {
        range.to_string()
    }
}

/// Configuration for a benchmark session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Kernel name, e.g. `dgemm`
    pub function: String,
    pub warm_up_runs: u32,
    pub num_runs: u32,
    pub range: SizeRange,
    /// Fixed RNG seed; entropy seeded when absent
    pub seed: Option<u64>,
    /// Write a `.` to stderr after each iteration
    pub progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            function: "dgemm".to_string(),
            warm_up_runs: 1,
            num_runs: 10,
            range: SizeRange::default(),
            seed: None,
            progress: true,
        }
    }
}

impl BenchmarkConfig {
    /// Resolves the configured kernel name
    pub fn kernel(&self) -> BenchmarkResult<Kernel> {
        self.function.parse()
    }

    /// Validates the configuration
    pub fn validate(&self) -> BenchmarkResult<()> {
        if self.num_runs == 0 {
            return Err(BenchmarkError::InvalidNumRuns {
                value: self.num_runs,
            });
        }

        self.range.validate()?;
        self.kernel()?;

        Ok(())
    }
}

/// Timing summary for one problem size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeResult {
    pub n: usize,
    /// Mean wall-clock seconds per timed run
    pub mean_time: f64,
    pub mean_gflops: f64,
    pub time_std_dev: f64,
    pub gflops_std_dev: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_range() {
        let range: SizeRange = "1024:10240:1024".parse().unwrap();
        assert_eq!(range, SizeRange::default());
        assert_eq!(range.len(), 10);
        assert_eq!(range.sizes().last(), Some(10240));
    }

    #[test]
    fn test_range_excludes_unreachable_stop() {
        let range: SizeRange = "2:9:3".parse().unwrap();
        assert_eq!(range.sizes().collect::<Vec<_>>(), vec![2, 5, 8]);
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn test_range_with_stop_below_start_is_empty() {
        let range: SizeRange = "10:5:1".parse().unwrap();
        assert!(range.is_empty());
        assert_eq!(range.sizes().count(), 0);
    }

    #[test]
    fn test_range_rejects_wrong_field_count() {
        for input in ["", "1024", "1:2", "1:2:3:4", "1::2"] {
            assert!(
                matches!(
                    input.parse::<SizeRange>(),
                    Err(BenchmarkError::InvalidRange { .. })
                ),
                "accepted '{}'",
                input
            );
        }
    }

    #[test]
    fn test_range_rejects_non_integers() {
        for input in ["a:b:c", "1.5:2:1", "-1:4:1", "1,4,1"] {
            assert!(input.parse::<SizeRange>().is_err(), "accepted '{}'", input);
        }
    }

    #[test]
    fn test_range_rejects_zero_step_and_start() {
        assert!("1:10:0".parse::<SizeRange>().is_err());
        assert!("0:10:1".parse::<SizeRange>().is_err());
    }

    #[test]
    fn test_range_serde_as_string() {
        let range = SizeRange::new(8, 64, 8).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"8:64:8\"");
        let back: SizeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_config_validation() {
        assert!(BenchmarkConfig::default().validate().is_ok());

        let config = BenchmarkConfig {
            num_runs: 0,
            ..BenchmarkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BenchmarkError::InvalidNumRuns { value: 0 })
        ));

        let config = BenchmarkConfig {
            function: "dfoo".to_string(),
            ..BenchmarkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BenchmarkError::UnknownKernel { .. })
        ));
    }
}
