//! Bounded scalar minimization backed by argmin's Brent solver.
use argmin::core::{CostFunction, Error, Executor, State};
use argmin::solver::brent::BrentOpt;

use crate::error::{MinimizeError, Result};

/// Adapts a fallible closure to argmin's [`CostFunction`].
struct ScalarCost<F> {
    f: F,
}

impl<F> CostFunction for ScalarCost<F>
where
    F: Fn(f64) -> Result<f64>,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, t: &Self::Param) -> std::result::Result<Self::Output, Error> {
        Ok((self.f)(*t)?)
    }
}

/// Minimizes `f` over `[lower, upper]` with Brent's method.
///
/// Returns the best parameter found.
///
/// # Errors
///
/// Returns [`MinimizeError::Failed`] if the solver or `f` fails, and
/// [`MinimizeError::NoResult`] if the solver finishes without a best parameter.
pub fn minimize_bounded<F>(
    f: F,
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iters: u64,
) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    if upper - lower <= tolerance {
        return Ok(0.5 * (lower + upper));
    }
    let solver = BrentOpt::new(lower, upper).set_tolerance(f64::EPSILON.sqrt(), tolerance);
    let res = Executor::new(ScalarCost { f }, solver)
        .configure(|state| state.max_iters(max_iters))
        .run()
        .map_err(|e| MinimizeError::Failed(e.to_string()))?;

    let best = res.state.get_best_param().copied().ok_or(MinimizeError::NoResult)?;
    tracing::trace!(best, iters = res.state.get_iter(), "brent search finished");
    Ok(best)
}
