//! Quintic polynomials and the shared Hermite fit.
use std::sync::LazyLock;

use nalgebra::{Matrix6, Vector6, LU, U6};

use crate::error::{ConstructionError, Result};

/// Boundary-condition matrix for a quintic on `u ∈ [0, 1]`.
///
/// Rows: `p(0)`, `p(1)`, `p'(0)`, `p'(1)`, `p''(0)`, `p''(1)`; columns are
/// the coefficients `c0..c5` of `p(u) = Σ cᵢ uⁱ`.
#[rustfmt::skip]
fn fit_matrix() -> Matrix6<f64> {
    Matrix6::new(
        1.0, 0.0, 0.0, 0.0,  0.0,  0.0,
        1.0, 1.0, 1.0, 1.0,  1.0,  1.0,
        0.0, 1.0, 0.0, 0.0,  0.0,  0.0,
        0.0, 1.0, 2.0, 3.0,  4.0,  5.0,
        0.0, 0.0, 2.0, 0.0,  0.0,  0.0,
        0.0, 0.0, 2.0, 6.0, 12.0, 20.0,
    )
}

/// LU factorization of [`fit_matrix`], computed once and shared by every fit.
static FIT_LU: LazyLock<LU<f64, U6, U6>> = LazyLock::new(|| fit_matrix().lu());

/// A degree-5 polynomial `p(u) = c0 + c1·u + … + c5·u⁵`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quintic {
    coeffs: [f64; 6],
}

impl Quintic {
    /// Creates a polynomial from ascending-order coefficients.
    #[must_use]
    pub fn new(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// Fits the quintic with `p(0) = start`, `p(1) = end`,
    /// `p'(0) = start_slope`, `p'(1) = end_slope` and zero second
    /// derivative at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::SingularFitMatrix`] if the shared
    /// boundary matrix cannot be solved.
    pub fn hermite(start: f64, end: f64, start_slope: f64, end_slope: f64) -> Result<Self> {
        let rhs = Vector6::new(start, end, start_slope, end_slope, 0.0, 0.0);
        let solution = FIT_LU.solve(&rhs).ok_or(ConstructionError::SingularFitMatrix)?;
        let mut coeffs = [0.0; 6];
        coeffs.copy_from_slice(solution.as_slice());
        Ok(Self { coeffs })
    }

    /// Returns the ascending-order coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[f64; 6] {
        &self.coeffs
    }

    /// Evaluates `p(u)`.
    #[must_use]
    pub fn eval(&self, u: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * u + c)
    }

    /// Evaluates `p'(u)`.
    #[must_use]
    pub fn derivative(&self, u: f64) -> f64 {
        let c = &self.coeffs;
        (((5.0 * c[5] * u + 4.0 * c[4]) * u + 3.0 * c[3]) * u + 2.0 * c[2]) * u + c[1]
    }

    /// Evaluates `p''(u)`.
    #[must_use]
    pub fn second_derivative(&self, u: f64) -> f64 {
        let c = &self.coeffs;
        ((20.0 * c[5] * u + 12.0 * c[4]) * u + 6.0 * c[3]) * u + 2.0 * c[2]
    }
}
