//! The Lane-Emden linear operator and its inverse.
//!
//! ```text
//! L[θ](ξ)   = ξ⁻² d/dξ (ξ² dθ/dξ)
//! L⁻¹[f](ξ) = ∫₀^ξ s⁻² ∫₀^s t² f(t) dt ds
//! ```
//!
//! Both integrals start at 0, so every `L⁻¹[f]` vanishes together with its
//! first derivative at the origin.

use crate::error::SymbolicError;
use crate::symbolic::{Expr, Rational, Symbol};

/// Apply `L⁻¹` to `f`, an expression in `variable`.
///
/// Fails if either definite integral has no closed form in the symbolic
/// backend; the result is never approximated.
pub fn inverse_operator(f: &Expr, variable: &Symbol) -> Result<Expr, SymbolicError> {
    if f.is_zero() {
        return Ok(Expr::zero());
    }

    let t = Symbol::dummy("t");
    let s = Symbol::dummy("s");

    let integrand = &Expr::power_of(&t, Rational::from(2)) * &f.subs(variable, &Expr::symbol(&t))?;
    let inner = integrand.integrate(&t, &Expr::zero(), &Expr::symbol(&s))?;

    let outer_integrand = &Expr::power_of(&s, Rational::from(-2)) * &inner;
    let outer = outer_integrand.integrate(&s, &Expr::zero(), &Expr::symbol(variable))?;

    Ok(outer.simplify())
}

/// Apply `L` to `theta`, an expression in `variable`.
pub fn linear_operator(theta: &Expr, variable: &Symbol) -> Expr {
    let flux = &Expr::power_of(variable, Rational::from(2)) * &theta.diff(variable);
    &Expr::power_of(variable, Rational::from(-2)) * &flux.diff(variable)
}
