//! # Lane-Emden ADM
//!
//! Exact Adomian decomposition of a Lane-Emden type equation.
//!
//! This library provides:
//! - A small exact symbolic backend (rational arithmetic, differentiation,
//!   definite integration, series expansion)
//! - Adomian polynomials for the nonlinearity `(θ² - C)^(3/2)`
//! - The inverse of the Lane-Emden operator with homogeneous initial conditions
//! - A recursive solver producing the truncated series `θ ≈ Σ θ_k`
//!
//! ## Architecture
//!
//! - [`symbolic`] - Expressions, rationals and calculus operations
//! - [`solver`] - Adomian polynomials, the inverse operator and the solve loop
//! - [`error`] - Error types shared by both layers
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! lane-emden --terms 5
//! ```
//!
//! ### Library
//!
//! ```
//! use lane_emden_adm::{solve, SolverConfig};
//!
//! let solution = solve(&SolverConfig::new(3)).unwrap();
//! assert_eq!(solution.terms()[1].to_string(), "-1/6*xi^2*(1 - c)^(3/2)");
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmAdmSolver } from 'lane_emden_adm';
//!
//! const solver = new WasmAdmSolver(5);
//! console.log(solver.partial_sum());
//! ```

pub mod error;
pub mod solver;
pub mod symbolic;

// Re-export main types for convenience
pub use error::{AdmError, Result, SymbolicError};
pub use solver::{solve, solve_with, Solution, SolverConfig};
pub use symbolic::{Expr, Rational, Symbol};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmAdmSolver;

/// Default number of series terms
pub const DEFAULT_NUM_TERMS: usize = 7;

/// Default name of the independent variable
pub const DEFAULT_VARIABLE: &str = "xi";

/// Default name of the nonlinearity parameter `C`
pub const DEFAULT_PARAMETER: &str = "c";
