//! Text rendering of expressions.
//!
//! The output is deterministic: monomials appear in canonical order, and each
//! is written as `coefficient*factor*factor` with exponents `x^2`, `x^(-1)`,
//! `(1 - c)^(3/2)`.

use std::fmt;

use num_traits::One;

use super::expr::{Atom, Monomial};
use super::{Expr, Rational};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (mono, coeff)) in self.terms().enumerate() {
            let sign = match (i, coeff.is_negative()) {
                (0, true) => "-",
                (0, false) => "",
                (_, true) => " - ",
                (_, false) => " + ",
            };
            write!(f, "{sign}")?;
            write_term(f, &coeff.abs(), mono)?;
        }
        Ok(())
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, magnitude: &Rational, mono: &Monomial) -> fmt::Result {
    if mono.is_one() {
        return write!(f, "{magnitude}");
    }
    if !magnitude.is_one() {
        write!(f, "{magnitude}*")?;
    }
    for (i, (atom, exponent)) in mono.factors().enumerate() {
        if i > 0 {
            write!(f, "*")?;
        }
        match atom {
            Atom::Symbol(s) => write!(f, "{s}")?,
            Atom::Power(base) => write!(f, "({base})")?,
        }
        write_exponent(f, exponent)?;
    }
    Ok(())
}

fn write_exponent(f: &mut fmt::Formatter<'_>, exponent: &Rational) -> fmt::Result {
    if exponent.is_one() {
        Ok(())
    } else if exponent.is_integer() && !exponent.is_negative() {
        write!(f, "^{exponent}")
    } else {
        write!(f, "^({exponent})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Symbol;

    #[test]
    fn test_render_polynomial() {
        let x = Symbol::new("x");
        let f = Expr::one() - Expr::power_of(&x, Rational::from(2)).scale(&Rational::new(3, 4));
        assert_eq!(f.to_string(), "1 - 3/4*x^2");
        assert_eq!(Expr::zero().to_string(), "0");
        assert_eq!(Expr::integer(-2).to_string(), "-2");
    }

    #[test]
    fn test_render_powers_of_sums() {
        let c = Symbol::new("c");
        let xi = Symbol::new("xi");
        let radical = (Expr::one() - Expr::symbol(&c))
            .pow(&Rational::new(3, 2))
            .unwrap();
        let term = (&Expr::power_of(&xi, Rational::from(2)) * &radical)
            .scale(&Rational::new(-1, 6));
        assert_eq!(term.to_string(), "-1/6*xi^2*(1 - c)^(3/2)");
        assert_eq!(
            Expr::power_of(&xi, Rational::from(-2)).to_string(),
            "xi^(-2)"
        );
    }
}
