//! Adomian decomposition solver.
//!
//! This module builds the truncated series solution of the Lane-Emden type
//! problem
//!
//! ```text
//! L[θ] + N(θ) = 0,    θ(0) = 1,    θ'(0) = 0
//! L[θ] = ξ⁻² d/dξ (ξ² dθ/dξ)
//! N(θ) = (θ² - C)^(3/2)
//! ```
//!
//! ## Adomian Decomposition
//!
//! The solution is written as `θ = Σ θ_k` and the nonlinearity as
//! `N(θ) = Σ A_k`, where the Adomian polynomial `A_k` depends only on
//! `θ_0 ..= θ_k`:
//!
//! ```text
//! A_k = (1 / k!) d^k/dλ^k N(Σ λ^i θ_i) |_{λ=0}
//! ```
//!
//! Inverting `L` with the homogeneous initial conditions gives the recurrence
//!
//! ```text
//! θ_0     = 1
//! θ_{k+1} = -L⁻¹[A_k]
//! L⁻¹[f]  = ∫_0^ξ s⁻² ∫_0^s t² f(t) dt ds
//! ```
//!
//! Every step is exact; the terms are closed-form expressions in `ξ` and `C`.

mod adomian;
mod engine;
mod inverse;

pub use adomian::{adomian_polynomial, nonlinearity, NONLINEAR_EXPONENT};
pub use engine::{solve, solve_with, Solution, SolverConfig};
pub use inverse::{inverse_operator, linear_operator};
