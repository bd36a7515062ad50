//! Construction of the inner L-BFGS solvers from [`SolverOptions`].
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    constrained::{
        traits::SolverOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
    errors::OptResult,
};

pub fn build_optimizer_hager_zhang(opts: &SolverOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), memory(opts));
    configure_lbfgs(lbfgs, opts)
}

pub fn build_optimizer_more_thuente(opts: &SolverOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), memory(opts));
    configure_lbfgs(lbfgs, opts)
}

/// Apply the inner gradient and cost tolerances; unset ones keep argmin's
/// defaults.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &SolverOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

fn memory(opts: &SolverOptions) -> usize {
    opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
}
