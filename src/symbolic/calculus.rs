//! Differentiation, substitution, simplification and definite integration.

use num_traits::{One, Zero};

use crate::error::SymbolicError;

use super::expr::Atom;
use super::{Expr, Rational, Symbol};

impl Expr {
    /// Exact derivative with respect to `var`.
    pub fn diff(&self, var: &Symbol) -> Expr {
        let mut result = Expr::zero();
        for (mono, coeff) in self.terms() {
            for (atom, exponent) in mono.factors() {
                let inner = match atom {
                    Atom::Symbol(s) if s == var => Expr::one(),
                    Atom::Symbol(_) => continue,
                    Atom::Power(base) => {
                        let d = base.diff(var);
                        if d.is_zero() {
                            continue;
                        }
                        d
                    }
                };
                // d(atom^e) = e * atom^(e-1) * d(atom)
                let lowered = mono.with_exponent(atom, exponent - &Rational::one());
                let outer = Expr::from_term(coeff * exponent, lowered);
                result += &outer * &inner;
            }
        }
        result
    }

    /// Replace every occurrence of `var` by `value`.
    ///
    /// Power bases are rewritten too and distribute over their factors when
    /// the substitution leaves a single monomial.
    pub fn subs(&self, var: &Symbol, value: &Expr) -> Result<Expr, SymbolicError> {
        self.rewrite(&|s: &Symbol| (s == var).then(|| value.clone()))
    }

    /// Rebuild every term through [`Expr::pow`] and multiplication.
    ///
    /// Canonical form already collects like terms; this additionally folds
    /// power bases that have become a single monomial.
    pub fn simplify(&self) -> Expr {
        self.rewrite(&|_: &Symbol| None)
            .unwrap_or_else(|_| self.clone())
    }

    fn rewrite(&self, replace: &dyn Fn(&Symbol) -> Option<Expr>) -> Result<Expr, SymbolicError> {
        let mut result = Expr::zero();
        for (mono, coeff) in self.terms() {
            let mut term = Expr::constant(coeff.clone());
            for (atom, exponent) in mono.factors() {
                let factor = match atom {
                    Atom::Symbol(s) => match replace(s) {
                        Some(value) => value.pow(exponent)?,
                        None => Expr::power_of(s, exponent.clone()),
                    },
                    Atom::Power(base) => Expr::power_atom(base.rewrite(replace)?, exponent)?,
                };
                term = &term * &factor;
            }
            result += term;
        }
        Ok(result)
    }

    /// Antiderivative with respect to `var` by the power rule.
    ///
    /// Positive integer powers of sums containing `var` are expanded first.
    /// Each resulting term must then have the form `var^p * rest` with `rest`
    /// free of `var` and `p != -1`.
    pub fn antiderivative(&self, var: &Symbol) -> Result<Expr, SymbolicError> {
        let expanded = self.expand_where(&|base: &Expr| base.depends_on(var));
        let mut result = Expr::zero();
        for (mono, coeff) in expanded.terms() {
            let (p, rest) = mono.split_symbol(var);
            if rest.depends_on(var) {
                return Err(SymbolicError::no_closed_form(format!(
                    "'{var}' occurs inside a fractional power"
                )));
            }
            let raised = &p + &Rational::one();
            if raised.is_zero() {
                return Err(SymbolicError::no_closed_form(format!(
                    "integrand contains {var}^(-1)"
                )));
            }
            let mut mono = rest;
            mono.multiply_atom(Atom::Symbol(var.clone()), raised.clone());
            result += Expr::from_term(coeff / &raised, mono);
        }
        Ok(result)
    }

    /// Definite integral of `self` in `var` from `lower` to `upper`.
    pub fn integrate(
        &self,
        var: &Symbol,
        lower: &Expr,
        upper: &Expr,
    ) -> Result<Expr, SymbolicError> {
        let primitive = self.antiderivative(var)?;
        let at = |bound: &Expr| {
            primitive.subs(var, bound).map_err(|e| match e {
                SymbolicError::DivisionByZero => SymbolicError::DivergentIntegral {
                    variable: var.to_string(),
                },
                other => other,
            })
        };
        Ok(at(upper)? - at(lower)?)
    }

    /// Lowest exponent of the bare symbol `var` over all terms.
    ///
    /// Terms without `var` count as exponent zero; `None` for the zero
    /// expression.
    pub fn min_degree(&self, var: &Symbol) -> Option<Rational> {
        self.terms().map(|(mono, _)| mono.exponent_of(var)).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn xp(n: i64) -> Expr {
        Expr::power_of(&x(), Rational::from(n))
    }

    #[test]
    fn test_diff_power_rule() {
        // d/dx (3x^4 + x) = 12x^3 + 1
        let f = xp(4).scale(&Rational::from(3)) + xp(1);
        let expected = xp(3).scale(&Rational::from(12)) + Expr::one();
        assert_eq!(f.diff(&x()), expected);
        assert!(Expr::integer(5).diff(&x()).is_zero());
    }

    #[test]
    fn test_diff_chain_rule_through_power() {
        // d/dx (1 + x^2)^(1/2) = x * (1 + x^2)^(-1/2)
        let base = Expr::one() + xp(2);
        let f = base.pow(&Rational::new(1, 2)).unwrap();
        let expected = &xp(1) * &base.pow(&Rational::new(-1, 2)).unwrap();
        assert_eq!(f.diff(&x()), expected);
    }

    #[test]
    fn test_subs_collapses_powers() {
        let c = Symbol::new("c");
        let f = (Expr::one() - Expr::symbol(&c))
            .pow(&Rational::new(3, 2))
            .unwrap();
        // c -> 1 - y^2 turns (1 - c)^(3/2) into y^3
        let y = Symbol::new("y");
        let value = Expr::one() - Expr::power_of(&y, Rational::from(2));
        let g = f.subs(&c, &value).unwrap();
        assert_eq!(g, Expr::power_of(&y, Rational::from(3)));
    }

    #[test]
    fn test_subs_zero_into_negative_power_fails() {
        assert_eq!(
            xp(-2).subs(&x(), &Expr::zero()),
            Err(SymbolicError::DivisionByZero)
        );
        assert!(xp(2).subs(&x(), &Expr::zero()).unwrap().is_zero());
    }

    #[test]
    fn test_definite_integral() {
        // ∫_0^s t^2 dt = s^3 / 3
        let s = Symbol::new("s");
        let t = Symbol::new("t");
        let f = Expr::power_of(&t, Rational::from(2));
        let result = f.integrate(&t, &Expr::zero(), &Expr::symbol(&s)).unwrap();
        assert_eq!(
            result,
            Expr::power_of(&s, Rational::from(3)).scale(&Rational::new(1, 3))
        );
    }

    #[test]
    fn test_integral_of_fractional_power() {
        // ∫_0^1 x^(1/2) dx = 2/3
        let f = Expr::power_of(&x(), Rational::new(1, 2));
        let result = f.integrate(&x(), &Expr::zero(), &Expr::one()).unwrap();
        assert_eq!(result, Expr::constant(Rational::new(2, 3)));
    }

    #[test]
    fn test_integration_failures() {
        assert!(matches!(
            xp(-1).antiderivative(&x()),
            Err(SymbolicError::NoClosedForm { .. })
        ));

        let radical = (Expr::one() + xp(2)).pow(&Rational::new(1, 2)).unwrap();
        assert!(matches!(
            radical.antiderivative(&x()),
            Err(SymbolicError::NoClosedForm { .. })
        ));

        assert_eq!(
            xp(-3).integrate(&x(), &Expr::zero(), &Expr::one()),
            Err(SymbolicError::DivergentIntegral {
                variable: "x".to_string()
            })
        );
    }

    #[test]
    fn test_simplify_is_stable_on_canonical_input() {
        let f = (Expr::one() - xp(1)).pow(&Rational::new(1, 2)).unwrap() + xp(3);
        assert_eq!(f.simplify(), f);
    }

    #[test]
    fn test_min_degree() {
        let f = xp(4) + xp(2).scale(&Rational::from(7));
        assert_eq!(f.min_degree(&x()), Some(Rational::from(2)));
        assert_eq!(Expr::zero().min_degree(&x()), None);
    }
}
