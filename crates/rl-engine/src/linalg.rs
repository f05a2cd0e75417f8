//! Dense linear algebra for symmetric positive-definite systems.
//!
//! The bandit's per-action Gram matrices start as the identity and only ever
//! accumulate rank-one outer products, so they stay SPD and a Cholesky
//! factorization always exists. Factoring once and solving two triangular
//! systems replaces the explicit matrix inverse: `A·θ = b` gives the point
//! estimate and `A·y = x` gives the quadratic form `xᵀA⁻¹x = xᵀy`.

use adcue_core::{AdcueError, AdcueResult};
use ndarray::{Array1, Array2};

/// Lower-triangular Cholesky factor `L` of an SPD matrix, `A = L·Lᵗ`.
pub struct Cholesky {
    l: Array2<f64>,
}

impl Cholesky {
    /// Factor a symmetric positive-definite matrix.
    ///
    /// Fails with [`AdcueError::Numerical`] if the matrix is not square, not
    /// positive-definite, or contains non-finite values (a NaN anywhere
    /// surfaces as a non-positive pivot).
    pub fn factor(a: &Array2<f64>) -> AdcueResult<Self> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(AdcueError::Numerical(format!(
                "expected square matrix, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }

        let mut l = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in 0..=i {
                let mut sum = a[[i, j]];
                for k in 0..j {
                    sum -= l[[i, k]] * l[[j, k]];
                }
                if i == j {
                    if !sum.is_finite() || sum <= 0.0 {
                        return Err(AdcueError::Numerical(format!(
                            "matrix is not positive-definite (pivot {sum} at row {i})"
                        )));
                    }
                    l[[i, j]] = sum.sqrt();
                } else {
                    l[[i, j]] = sum / l[[j, j]];
                }
            }
        }

        Ok(Self { l })
    }

    /// Solve `A·z = rhs` by forward then backward substitution.
    pub fn solve(&self, rhs: &Array1<f64>) -> Array1<f64> {
        let n = self.l.nrows();
        debug_assert_eq!(rhs.len(), n);

        // L·y = rhs
        let mut y = Array1::<f64>::zeros(n);
        for i in 0..n {
            let mut sum = rhs[i];
            for k in 0..i {
                sum -= self.l[[i, k]] * y[k];
            }
            y[i] = sum / self.l[[i, i]];
        }

        // Lᵗ·z = y
        let mut z = Array1::<f64>::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for k in (i + 1)..n {
                sum -= self.l[[k, i]] * z[k];
            }
            z[i] = sum / self.l[[i, i]];
        }

        z
    }
}
