//! Symbolic calculus backend.
//!
//! A narrow exact computer-algebra layer sized for the Adomian decomposition
//! of the Lane-Emden equation. It covers sums of monomials with rational
//! coefficients and rational exponents over symbols and powers of sums, which
//! is closed under every operation the solver performs:
//!
//! | Operation | Method |
//! |-----------|--------|
//! | Arithmetic | `+`, `-`, `*`, [`Expr::scale`], [`Expr::pow`], [`Expr::expand`] |
//! | Differentiation | [`Expr::diff`] |
//! | Definite integration | [`Expr::integrate`], [`Expr::antiderivative`] |
//! | Series expansion | [`Expr::series`], [`Expr::series_coefficient`] |
//! | Substitution | [`Expr::subs`] |
//! | Simplification | [`Expr::simplify`] |
//!
//! Anything outside this class (logarithms, integrands with the integration
//! variable inside a fractional power) is reported as a [`SymbolicError`] rather than
//! approximated.
//!
//! [`SymbolicError`]: crate::error::SymbolicError

mod calculus;
mod display;
mod expr;
mod rational;
mod series;
mod symbol;

pub use expr::Expr;
pub use rational::Rational;
pub use symbol::Symbol;
