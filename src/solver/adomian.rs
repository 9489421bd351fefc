//! Adomian polynomials for the nonlinearity `N(θ) = (θ² - C)^(3/2)`.
//!
//! `A_k` is the coefficient of `λ^k` in `N(Σ_{i=0}^{k} λ^i θ_i)`. Only
//! `θ_0 ..= θ_k` take part, and the expansion is truncated at order `k` so
//! unknown later terms can never leak into `A_k`.

use crate::error::{AdmError, Result, SymbolicError};
use crate::symbolic::{Expr, Rational, Symbol};

/// Numerator and denominator of the fixed exponent of the nonlinearity.
pub const NONLINEAR_EXPONENT: (i64, i64) = (3, 2);

fn exponent() -> Rational {
    Rational::new(NONLINEAR_EXPONENT.0, NONLINEAR_EXPONENT.1)
}

/// `N(theta) = (theta² - parameter)^(3/2)`.
pub fn nonlinearity(theta: &Expr, parameter: &Symbol) -> std::result::Result<Expr, SymbolicError> {
    (theta * theta - Expr::symbol(parameter)).pow(&exponent())
}

/// Compute `A_index` from the term sequence prefix `terms[..=index]`.
///
/// Entries past `index` are ignored. Fails with
/// [`AdmError::OrderViolation`] if `θ_index` has not been computed yet.
pub fn adomian_polynomial(index: usize, terms: &[Expr], parameter: &Symbol) -> Result<Expr> {
    if terms.len() <= index {
        return Err(AdmError::order_violation(index, terms.len()));
    }
    let expansion_failure = |source: SymbolicError| AdmError::ExpansionFailure { index, source };

    if index == 0 {
        return nonlinearity(&terms[0], parameter).map_err(expansion_failure);
    }

    let lambda = Symbol::dummy("lambda");
    let perturbed: Expr = terms[..=index]
        .iter()
        .enumerate()
        .map(|(i, theta)| &Expr::power_of(&lambda, Rational::from(i)) * theta)
        .sum();

    nonlinearity(&perturbed, parameter)
        .and_then(|n| n.series_coefficient(&lambda, index))
        .map_err(expansion_failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c() -> Symbol {
        Symbol::new("c")
    }

    fn xi() -> Symbol {
        Symbol::new("xi")
    }

    fn one_minus_c() -> Expr {
        Expr::one() - Expr::symbol(&c())
    }

    fn theta_1() -> Expr {
        let radical = one_minus_c().pow(&Rational::new(3, 2)).unwrap();
        (&Expr::power_of(&xi(), Rational::from(2)) * &radical).scale(&Rational::new(-1, 6))
    }

    #[test]
    fn test_base_case() {
        let a0 = adomian_polynomial(0, &[Expr::one()], &c()).unwrap();
        assert_eq!(a0, one_minus_c().pow(&Rational::new(3, 2)).unwrap());
        assert_eq!(a0.to_string(), "(1 - c)^(3/2)");
    }

    #[test]
    fn test_first_order_polynomial() {
        // A_1 = N'(θ_0) θ_1 = 3 θ_0 (θ_0² - C)^(1/2) θ_1 = -ξ²/2 (1 - C)²
        let a1 = adomian_polynomial(1, &[Expr::one(), theta_1()], &c()).unwrap();
        let expected = (&Expr::power_of(&xi(), Rational::from(2))
            * &one_minus_c().pow(&Rational::from(2)).unwrap())
            .scale(&Rational::new(-1, 2));
        assert_eq!(a1, expected);
    }

    #[test]
    fn test_later_terms_are_ignored() {
        let extra = Expr::power_of(&xi(), Rational::from(7));
        let short = adomian_polynomial(1, &[Expr::one(), theta_1()], &c()).unwrap();
        let long = adomian_polynomial(1, &[Expr::one(), theta_1(), extra], &c()).unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn test_deterministic() {
        let terms = [Expr::one(), theta_1()];
        assert_eq!(
            adomian_polynomial(1, &terms, &c()).unwrap(),
            adomian_polynomial(1, &terms, &c()).unwrap()
        );
    }

    #[test]
    fn test_order_violation() {
        let err = adomian_polynomial(2, &[Expr::one(), theta_1()], &c()).unwrap_err();
        assert!(matches!(
            err,
            AdmError::OrderViolation {
                index: 2,
                available: 2
            }
        ));
        assert!(matches!(
            adomian_polynomial(0, &[], &c()),
            Err(AdmError::OrderViolation { index: 0, available: 0 })
        ));
    }

    #[test]
    fn test_nonlinearity_of_constant() {
        // N(2) with C = c: (4 - c)^(3/2)
        let n = nonlinearity(&Expr::integer(2), &c()).unwrap();
        let expected = (Expr::integer(4) - Expr::symbol(&c()))
            .pow(&Rational::new(3, 2))
            .unwrap();
        assert_eq!(n, expected);
    }
}
