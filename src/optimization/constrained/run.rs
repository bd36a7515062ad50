//! Execution helper that runs one inner L-BFGS minimization of the penalty
//! function and returns an [`InnerOutcome`].
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    constrained::{
        adapter::PenaltyAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        traits::{EpigraphProblem, LineSearcher, SolverOptions},
        types::{FnEvalMap, Grad, Theta},
        validation::validate_param,
    },
    errors::{OptError, OptResult},
};

/// Result of one inner run.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerOutcome {
    pub theta: Theta,
    pub cost: f64,
    pub status: String,
    pub iterations: u64,
    pub fn_evals: FnEvalMap,
}

/// Minimize the penalty function from `theta0` with the chosen line search.
pub fn run_inner<P: EpigraphProblem + ?Sized>(
    theta0: Theta, opts: &SolverOptions, line_searcher: LineSearcher,
    problem: PenaltyAdapter<'_, P>,
) -> OptResult<InnerOutcome> {
    match line_searcher {
        LineSearcher::MoreThuente => {
            run_lbfgs(theta0, opts, problem, build_optimizer_more_thuente(opts)?)
        }
        LineSearcher::HagerZhang => {
            run_lbfgs(theta0, opts, problem, build_optimizer_hager_zhang(opts)?)
        }
    }
}

/// Run an `argmin` solver on a penalty subproblem.
///
/// Sets `theta0` on the state, applies `max_iter` when configured and, with
/// the `obs_slog` feature and `opts.verbose`, attaches a terminal observer
/// and prints the initial penalty value.
///
/// # Errors
/// Any argmin error, normalized through `From<argmin::core::Error>`; crate
/// errors raised inside the adapter (timeouts, problem failures) come back
/// out unchanged.
pub fn run_lbfgs<'a, P, S>(
    theta0: Theta, opts: &SolverOptions, problem: PenaltyAdapter<'a, P>, solver: S,
) -> OptResult<InnerOutcome>
where
    P: EpigraphProblem + ?Sized,
    S: Solver<PenaltyAdapter<'a, P>, IterState<Theta, Grad, (), (), (), f64>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let cost = result.get_best_cost();
    if !cost.is_finite() {
        return Err(OptError::NonFiniteCost { value: cost });
    }
    Ok(InnerOutcome {
        iterations: result.get_iter(),
        fn_evals: result.get_func_counts().clone(),
        status: format!("{:?}", result.get_termination_status()),
        theta: validate_param(result.take_best_param())?,
        cost,
    })
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<P>(theta0: &Theta, problem: &PenaltyAdapter<'_, P>) -> OptResult<()>
where
    P: EpigraphProblem + ?Sized,
{
    let phi0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: penalty(theta0) = {:.6}{}",
        phi0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
