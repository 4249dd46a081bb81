//! Dense linear-algebra kernels under test and the working buffers they share.
//!
//! Every kernel is a single call into `nalgebra`; this module only prepares
//! inputs, invokes the call and reports the operation count it performed.

use super::benchmark_errors::{BenchmarkError, BenchmarkResult};
use nalgebra::linalg::{Cholesky, ColPivQR, SVD};
use nalgebra::{DMatrix, DVector, Dyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

/// Kernels available for benchmarking, named after their LAPACK/BLAS routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// General matrix-matrix multiply
    Dgemm,
    /// QR factorization with column pivoting
    Dgeqp3,
    /// General matrix-vector multiply
    Dgemv,
    /// Triangular solve against a QR factorization
    Dtrsm,
    /// Cholesky factorization
    Dpotrf,
    /// Singular value decomposition
    Dgesvd,
}

impl Kernel {
    pub fn all() -> &'static [Kernel] {
        &[
            Kernel::Dgemm,
            Kernel::Dgeqp3,
            Kernel::Dgemv,
            Kernel::Dtrsm,
            Kernel::Dpotrf,
            Kernel::Dgesvd,
        ]
    }

    pub fn get_by_name(name: &str) -> Option<Kernel> {
        Self::all()
            .iter()
            .copied()
            .find(|kernel| kernel.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Dgemm => "dgemm",
            Kernel::Dgeqp3 => "dgeqp3",
            Kernel::Dgemv => "dgemv",
            Kernel::Dtrsm => "dtrsm",
            Kernel::Dpotrf => "dpotrf",
            Kernel::Dgesvd => "dgesvd",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Kernel::Dgemm => "C = A * B, general matrix-matrix multiply",
            Kernel::Dgeqp3 => "column-pivoted Householder QR of A",
            Kernel::Dgemv => "c = A * b, general matrix-vector multiply",
            Kernel::Dtrsm => "C = A \\ B using a precomputed QR of A",
            Kernel::Dpotrf => "Cholesky factor L of a symmetric positive definite A",
            Kernel::Dgesvd => "thin SVD of A with U and V computed",
        }
    }

    /// Floating-point operation count for problem size `n`.
    ///
    /// Counts follow LAPACK Working Note 41.
    pub fn flop_count(&self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            Kernel::Dgemm => 2.0 * n * n * n,
            Kernel::Dgeqp3 => {
                n * n * n - (2.0 / 3.0) * n * n * n + n * n + n * n + (14.0 / 3.0) * n
            }
            Kernel::Dgemv => 2.0 * n * n - n,
            Kernel::Dtrsm => n * n * n,
            Kernel::Dpotrf => n * n * n / 3.0 + n * n / 2.0 + n / 6.0,
            Kernel::Dgesvd => 22.0 * n * n * n,
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = BenchmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::get_by_name(s).ok_or_else(|| BenchmarkError::UnknownKernel {
            name: s.to_string(),
        })
    }
}

/// Reusable matrices and vectors shared by all kernel invocations.
///
/// Buffers are reallocated only when the problem size changes. Inputs are
/// uniform in `[-1, 1]`.
pub struct Workspace {
    n: usize,
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    c: DMatrix<f64>,
    l: DMatrix<f64>,
    b_vec: DVector<f64>,
    c_vec: DVector<f64>,
    a_qr: Option<ColPivQR<f64, Dyn, Dyn>>,
    rng: StdRng,
}

impl Workspace {
    /// Creates an empty workspace; `seed` makes the inputs reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            n: 0,
            a: DMatrix::zeros(0, 0),
            b: DMatrix::zeros(0, 0),
            c: DMatrix::zeros(0, 0),
            l: DMatrix::zeros(0, 0),
            b_vec: DVector::zeros(0),
            c_vec: DVector::zeros(0),
            a_qr: None,
            rng,
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn c(&self) -> &DMatrix<f64> {
        &self.c
    }

    pub fn l(&self) -> &DMatrix<f64> {
        &self.l
    }

    pub fn c_vec(&self) -> &DVector<f64> {
        &self.c_vec
    }

    /// Regenerates random inputs of size `n` and applies the conditioning
    /// `kernel` needs.
    pub fn prepare(&mut self, n: usize, kernel: Kernel) {
        if n != self.n {
            self.a = DMatrix::zeros(n, n);
            self.b = DMatrix::zeros(n, n);
            self.c = DMatrix::zeros(n, n);
            self.l = DMatrix::zeros(n, n);
            self.b_vec = DVector::zeros(n);
            self.c_vec = DVector::zeros(n);
            self.n = n;
        }

        let rng = &mut self.rng;
        for value in self
            .a
            .iter_mut()
            .chain(self.b.iter_mut())
            .chain(self.b_vec.iter_mut())
        {
            *value = rng.gen_range(-1.0..=1.0);
        }

        self.a_qr = None;
        match kernel {
            Kernel::Dtrsm => {
                self.a_qr = Some(self.a.clone().col_piv_qr());
            }
            Kernel::Dpotrf => {
                // AᵀA is positive semi-definite; the diagonal shift makes it definite.
                let mut spd = self.a.tr_mul(&self.a);
                for i in 0..n {
                    spd[(i, i)] += n as f64;
                }
                self.a = spd;
            }
            _ => {}
        }
    }

    /// Runs `kernel` once on the prepared buffers and returns its flop count.
    pub fn run(&mut self, kernel: Kernel) -> BenchmarkResult<f64> {
        let n = self.n;
        match kernel {
            Kernel::Dgemm => {
                self.c.gemm(1.0, &self.a, &self.b, 0.0);
            }
            Kernel::Dgeqp3 => {
                let qr = self.a.clone().col_piv_qr();
                black_box(&qr);
            }
            Kernel::Dgemv => {
                self.c_vec.gemv(1.0, &self.a, &self.b_vec, 0.0);
            }
            Kernel::Dtrsm => {
                let qr = self
                    .a_qr
                    .as_ref()
                    .ok_or_else(|| failed(kernel, n, "workspace was not prepared for dtrsm"))?;
                self.c.copy_from(&self.b);
                if !qr.solve_mut(&mut self.c) {
                    return Err(failed(kernel, n, "matrix is singular"));
                }
            }
            Kernel::Dpotrf => {
                let cholesky = Cholesky::new(self.a.clone())
                    .ok_or_else(|| failed(kernel, n, "matrix is not positive definite"))?;
                self.l = cholesky.unpack();
            }
            Kernel::Dgesvd => {
                let svd = SVD::try_new(self.a.clone(), true, true, f64::EPSILON, 0)
                    .ok_or_else(|| failed(kernel, n, "SVD did not converge"))?;
                black_box(&svd);
            }
        }

        Ok(kernel.flop_count(n))
    }
}

fn failed(kernel: Kernel, n: usize, message: &str) -> BenchmarkError {
    BenchmarkError::KernelFailed {
        kernel: kernel.name().to_string(),
        n,
        message: message.to_string(),
    }
}
