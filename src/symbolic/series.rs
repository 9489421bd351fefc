//! Truncated Taylor expansion in an auxiliary parameter.
//!
//! Expressions are expanded term by term. A bare parameter factor shifts the
//! series; a power base that depends on the parameter is expanded first and
//! then raised to its exponent with the J.C.P. Miller recurrence
//!
//! ```text
//! g_0 = a_0^p
//! g_n = 1 / (n a_0) * Σ_{k=1}^{n} ((p + 1) k - n) a_k g_{n-k}
//! ```
//!
//! which needs `a_0 != 0` and works for any rational `p`.

use num_traits::{One, Zero};

use crate::error::SymbolicError;

use super::expr::{Atom, Monomial};
use super::{Expr, Rational, Symbol};

impl Expr {
    /// Taylor coefficients `c_0 ..= c_order` of `self` in `param` about `0`.
    ///
    /// Orders above `order` are discarded at every intermediate step.
    pub fn series(&self, param: &Symbol, order: usize) -> Result<Vec<Expr>, SymbolicError> {
        let mut coefficients = vec![Expr::zero(); order + 1];
        for (mono, coeff) in self.terms() {
            let term = term_series(coeff, mono, param, order)?;
            for (acc, c) in coefficients.iter_mut().zip(term) {
                *acc += c;
            }
        }
        Ok(coefficients)
    }

    /// Coefficient of `param^k` in the Taylor expansion of `self`.
    pub fn series_coefficient(&self, param: &Symbol, k: usize) -> Result<Expr, SymbolicError> {
        let mut coefficients = self.series(param, k)?;
        Ok(coefficients.pop().unwrap_or_else(Expr::zero))
    }
}

fn term_series(
    coeff: &Rational,
    mono: &Monomial,
    param: &Symbol,
    order: usize,
) -> Result<Vec<Expr>, SymbolicError> {
    let mut constant = Monomial::one();
    let mut shift = 0usize;
    let mut expanded: Option<Vec<Expr>> = None;

    for (atom, exponent) in mono.factors() {
        match atom {
            Atom::Symbol(s) if s == param => {
                shift = exponent
                    .to_i64()
                    .filter(|n| *n >= 0)
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        SymbolicError::series(format!("{param}^({exponent}) is not a power series"))
                    })?;
            }
            Atom::Power(base) if base.depends_on(param) => {
                let base_series = base.series(param, order)?;
                let powered = pow_series(&base_series, exponent, param, order)?;
                expanded = Some(match expanded {
                    Some(prev) => mul_series(&prev, &powered, order),
                    None => powered,
                });
            }
            _ => constant.multiply_atom(atom.clone(), exponent.clone()),
        }
    }

    let mut result = vec![Expr::zero(); order + 1];
    if shift > order {
        return Ok(result);
    }
    let scale = Expr::from_term(coeff.clone(), constant);
    match expanded {
        Some(series) => {
            for n in shift..=order {
                result[n] = &scale * &series[n - shift];
            }
        }
        None => result[shift] = scale,
    }
    Ok(result)
}

/// Cauchy product truncated at `order`.
fn mul_series(a: &[Expr], b: &[Expr], order: usize) -> Vec<Expr> {
    (0..=order)
        .map(|n| {
            let mut sum = Expr::zero();
            for i in 0..=n {
                if a[i].is_zero() || b[n - i].is_zero() {
                    continue;
                }
                sum += &a[i] * &b[n - i];
            }
            sum
        })
        .collect()
}

fn pow_series(
    a: &[Expr],
    exponent: &Rational,
    param: &Symbol,
    order: usize,
) -> Result<Vec<Expr>, SymbolicError> {
    let a0 = &a[0];
    if a0.is_zero() {
        // Only non-negative integer powers of a series without constant term
        // have a Taylor expansion.
        let n = exponent
            .to_i64()
            .filter(|n| *n >= 0)
            .ok_or_else(|| {
                SymbolicError::series(format!(
                    "base vanishes at {param} = 0 under exponent {exponent}"
                ))
            })?;
        let mut result = vec![Expr::zero(); order + 1];
        result[0] = Expr::one();
        for _ in 0..n {
            result = mul_series(&result, a, order);
        }
        return Ok(result);
    }

    let inverse = a0.pow(&-Rational::one())?;
    let raised = exponent + &Rational::one();
    let mut g = Vec::with_capacity(order + 1);
    g.push(a0.pow(exponent)?);
    for n in 1..=order {
        let mut sum = Expr::zero();
        for k in 1..=n {
            if a[k].is_zero() {
                continue;
            }
            let weight = &(&raised * &Rational::from(k)) - &Rational::from(n);
            if weight.is_zero() {
                continue;
            }
            sum += (&a[k] * &g[n - k]).scale(&weight);
        }
        g.push((&sum * &inverse).scale(&Rational::from(n).recip()));
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lambda() -> Symbol {
        Symbol::dummy("lambda")
    }

    fn lp(n: i64) -> Expr {
        Expr::power_of(&lambda(), Rational::from(n))
    }

    #[test]
    fn test_polynomial_coefficients() {
        // 3 + 2λ + λ^3
        let f = Expr::integer(3) + lp(1).scale(&Rational::from(2)) + lp(3);
        let coeffs = f.series(&lambda(), 4).unwrap();
        assert_eq!(
            coeffs,
            vec![
                Expr::integer(3),
                Expr::integer(2),
                Expr::zero(),
                Expr::one(),
                Expr::zero()
            ]
        );
    }

    #[test]
    fn test_truncation_drops_higher_orders() {
        let f = Expr::one() + lp(5);
        let coeffs = f.series(&lambda(), 2).unwrap();
        assert_eq!(coeffs, vec![Expr::one(), Expr::zero(), Expr::zero()]);
    }

    #[test]
    fn test_binomial_series_of_square_root() {
        // (1 + λ)^(1/2) = 1 + λ/2 - λ^2/8 + λ^3/16 + ...
        let f = (Expr::one() + lp(1)).pow(&Rational::new(1, 2)).unwrap();
        let coeffs = f.series(&lambda(), 3).unwrap();
        assert_eq!(
            coeffs,
            vec![
                Expr::one(),
                Expr::constant(Rational::new(1, 2)),
                Expr::constant(Rational::new(-1, 8)),
                Expr::constant(Rational::new(1, 16)),
            ]
        );
    }

    #[test]
    fn test_symbolic_constant_term() {
        // (c + λ)^(3/2) = c^(3/2) + 3/2 c^(1/2) λ + ...
        let c = Symbol::new("c");
        let f = (Expr::symbol(&c) + lp(1))
            .pow(&Rational::new(3, 2))
            .unwrap();
        let first = f.series_coefficient(&lambda(), 1).unwrap();
        let expected = Expr::power_of(&c, Rational::new(1, 2)).scale(&Rational::new(3, 2));
        assert_eq!(first, expected);
    }

    #[test]
    fn test_vanishing_base_rejects_fractional_power() {
        let f = lp(1).pow(&Rational::new(1, 2)).unwrap();
        // λ^(1/2) is a bare fractional power of the parameter
        assert!(matches!(
            f.series(&lambda(), 2),
            Err(SymbolicError::SeriesExpansion { .. })
        ));

        let g = (lp(1) + lp(2)).pow(&Rational::new(1, 2)).unwrap();
        assert!(matches!(
            g.series(&lambda(), 2),
            Err(SymbolicError::SeriesExpansion { .. })
        ));
    }

    #[test]
    fn test_inverse_series() {
        // 1 / (1 - λ) = 1 + λ + λ^2
        let f = (Expr::one() - lp(1)).pow(&Rational::from(-1)).unwrap();
        let coeffs = f.series(&lambda(), 2).unwrap();
        assert_eq!(coeffs, vec![Expr::one(), Expr::one(), Expr::one()]);
    }
}
