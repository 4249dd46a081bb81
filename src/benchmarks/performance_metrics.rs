//! Performance measurement utilities for benchmarks.

use super::accumulator::Accumulator;
use super::benchmark_errors::BenchmarkResult;
use super::benchmark_types::SizeResult;
use std::io::Write;
use std::time::Instant;

/// Shortest duration a timed run is credited with, in seconds.
const MIN_ELAPSED_SECS: f64 = 1e-9;

/// Runs `workload` `warm_ups` times untimed, then `num_runs` times timed.
///
/// `workload` returns the flop count of one invocation. When `progress` is
/// given, a `.` is written to it after every invocation.
pub fn benchmark_workload<F>(
    n: usize,
    warm_ups: u32,
    num_runs: u32,
    mut progress: Option<&mut dyn Write>,
    mut workload: F,
) -> BenchmarkResult<SizeResult>
where
    F: FnMut() -> BenchmarkResult<f64>,
{
    let mut real_time_acc = Accumulator::new();
    let mut gflops_acc = Accumulator::new();

    for _ in 0..warm_ups {
        workload()?;
        tick(&mut progress)?;
    }

    for _ in 0..num_runs {
        let start = Instant::now();
        let flop_count = workload()?;
        let real_time = start.elapsed().as_secs_f64().max(MIN_ELAPSED_SECS);

        real_time_acc.push(real_time);
        gflops_acc.push(flop_count / (1e9 * real_time));

        tick(&mut progress)?;
    }

    Ok(SizeResult {
        n,
        mean_time: real_time_acc.mean(),
        mean_gflops: gflops_acc.mean(),
        time_std_dev: real_time_acc.std_dev(),
        gflops_std_dev: gflops_acc.std_dev(),
    })
}

fn tick(progress: &mut Option<&mut dyn Write>) -> BenchmarkResult<()> {
    if let Some(out) = progress {
        out.write_all(b".")?;
        out.flush()?;
    }
    Ok(())
}

/// Formats `value` like C's `%e`: six fractional digits and a signed exponent
/// of at least two digits.
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// Writes the tab-separated result line.
pub fn write_tsv_line<W: Write>(out: &mut W, result: &SizeResult) -> std::io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}",
        result.n,
        format_scientific(result.mean_time),
        format_scientific(result.mean_gflops)
    )?;
    out.flush()
}

/// Writes the comma-separated result line.
pub fn write_csv_line<W: Write>(out: &mut W, result: &SizeResult) -> std::io::Result<()> {
    writeln!(
        out,
        "{},{},{}",
        result.n,
        format_scientific(result.mean_time),
        format_scientific(result.mean_gflops)
    )?;
    out.flush()
}
