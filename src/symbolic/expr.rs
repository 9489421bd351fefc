//! Canonical symbolic expressions.
//!
//! An [`Expr`] is a sum of terms `coefficient * Π atom^exponent` with exact
//! rational coefficients and exponents. Atoms are either symbols or power
//! bases: sums (or constants) kept unexpanded under an exponent, such as
//! `(1 - c)^(3/2)`.
//!
//! Canonical form is maintained by every constructor and operation:
//! - like terms are collected and zero coefficients removed
//! - zero exponents are removed
//! - powers of the same base merge by adding exponents
//! - integer powers of constants are folded into the coefficient
//!
//! Powers of sums are never expanded implicitly, so two expressions built
//! from the same bases compare equal exactly when their terms agree, whatever
//! order the factors were multiplied in.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::error::SymbolicError;

use super::{Rational, Symbol};

/// An indivisible factor of a monomial.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Atom {
    Symbol(Symbol),
    Power(Box<Expr>),
}

impl Atom {
    pub(crate) fn depends_on(&self, var: &Symbol) -> bool {
        match self {
            Atom::Symbol(s) => s == var,
            Atom::Power(base) => base.depends_on(var),
        }
    }
}

/// A product of atoms raised to rational exponents.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Monomial(BTreeMap<Atom, Rational>);

impl Monomial {
    /// The empty product.
    pub(crate) fn one() -> Self {
        Self(BTreeMap::new())
    }

    pub(crate) fn from_atom(atom: Atom, exponent: Rational) -> Self {
        let mut mono = Self::one();
        mono.multiply_atom(atom, exponent);
        mono
    }

    pub(crate) fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn factors(&self) -> impl Iterator<Item = (&Atom, &Rational)> {
        self.0.iter()
    }

    /// Multiply in `atom^exponent`, merging with an existing factor.
    pub(crate) fn multiply_atom(&mut self, atom: Atom, exponent: Rational) {
        let merged = match self.0.remove(&atom) {
            Some(existing) => &existing + &exponent,
            None => exponent,
        };
        if !merged.is_zero() {
            self.0.insert(atom, merged);
        }
    }

    pub(crate) fn mul(&self, other: &Monomial) -> Monomial {
        let mut product = self.clone();
        for (atom, exponent) in other.factors() {
            product.multiply_atom(atom.clone(), exponent.clone());
        }
        product
    }

    /// Exponent of `var` as a bare symbol factor, zero if absent.
    pub(crate) fn exponent_of(&self, var: &Symbol) -> Rational {
        self.0
            .get(&Atom::Symbol(var.clone()))
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    /// Remove the bare symbol factor `var`, returning its exponent and the rest.
    pub(crate) fn split_symbol(&self, var: &Symbol) -> (Rational, Monomial) {
        let mut rest = self.clone();
        let exponent = rest
            .0
            .remove(&Atom::Symbol(var.clone()))
            .unwrap_or_else(Rational::zero);
        (exponent, rest)
    }

    /// Replace the exponent of `atom` (removing it when zero).
    pub(crate) fn with_exponent(&self, atom: &Atom, exponent: Rational) -> Monomial {
        let mut result = self.clone();
        result.0.remove(atom);
        if !exponent.is_zero() {
            result.0.insert(atom.clone(), exponent);
        }
        result
    }

    pub(crate) fn depends_on(&self, var: &Symbol) -> bool {
        self.0.keys().any(|atom| atom.depends_on(var))
    }
}

/// A symbolic expression in canonical sum-of-monomials form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expr {
    terms: BTreeMap<Monomial, Rational>,
}

impl Expr {
    /// The zero expression.
    pub fn zero() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// The constant expression `1`.
    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    /// A rational constant.
    pub fn constant(value: Rational) -> Self {
        let mut expr = Self::zero();
        expr.add_term(Monomial::one(), value);
        expr
    }

    /// An integer constant.
    pub fn integer(value: i64) -> Self {
        Self::constant(Rational::from(value))
    }

    /// A bare symbol.
    pub fn symbol(symbol: &Symbol) -> Self {
        Self::power_of(symbol, Rational::one())
    }

    /// `symbol^exponent`.
    pub fn power_of(symbol: &Symbol, exponent: Rational) -> Self {
        Self::from_term(
            Rational::one(),
            Monomial::from_atom(Atom::Symbol(symbol.clone()), exponent),
        )
    }

    /// Build a single term in canonical form.
    ///
    /// Powers of constants with integer exponents are folded into the
    /// coefficient; every other atom is kept as it is.
    pub(crate) fn from_term(coeff: Rational, mono: Monomial) -> Self {
        if coeff.is_zero() {
            return Self::zero();
        }

        let mut coeff = coeff;
        let mut rest = Monomial::one();
        for (atom, exponent) in mono.0 {
            let folded = match (&atom, exponent.to_i64()) {
                (Atom::Power(base), Some(n)) => base.as_constant().map(|c| c.powi(n)),
                _ => None,
            };
            match folded {
                Some(value) => coeff = &coeff * &value,
                None => rest.multiply_atom(atom, exponent),
            }
        }

        let mut result = Self::zero();
        result.add_term(rest, coeff);
        result
    }

    /// Add `coeff * mono` to this expression; `mono` must already be canonical.
    fn add_term(&mut self, mono: Monomial, coeff: Rational) {
        if coeff.is_zero() {
            return;
        }
        let merged = match self.terms.remove(&mono) {
            Some(existing) => &existing + &coeff,
            None => coeff,
        };
        if !merged.is_zero() {
            self.terms.insert(mono, merged);
        }
    }

    pub(crate) fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// Check if this is the zero expression.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check if this is the constant `1`.
    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// Check if this expression contains no atoms at all.
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// The rational value of a constant expression.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::zero()),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(mono, _)| mono.is_one())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    /// Number of monomials.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the expression has no monomials (same as [`Expr::is_zero`]).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check if `var` occurs anywhere, including inside power bases.
    pub fn depends_on(&self, var: &Symbol) -> bool {
        self.terms.keys().any(|mono| mono.depends_on(var))
    }

    fn single_term(&self) -> Option<(&Monomial, &Rational)> {
        if self.terms.len() == 1 {
            self.terms.iter().next()
        } else {
            None
        }
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: &Rational) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(mono, c)| (mono.clone(), c * factor))
                .collect(),
        }
    }

    fn pow_unsigned(&self, mut exponent: u64) -> Self {
        let mut base = self.clone();
        let mut result = Self::one();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = &result * &base;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Raise to a rational power.
    ///
    /// A power of a single monomial distributes over its factors. A power of
    /// a sum becomes a power atom, whose exponent merges with other powers of
    /// the same base under multiplication; [`Expr::expand`] multiplies out
    /// positive integer powers. `x^0` is `1` for every `x`, including zero.
    pub fn pow(&self, exponent: &Rational) -> Result<Self, SymbolicError> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return if exponent.is_positive() {
                Ok(Self::zero())
            } else {
                Err(SymbolicError::DivisionByZero)
            };
        }
        if exponent.is_one() {
            return Ok(self.clone());
        }

        if let Some((mono, coeff)) = self.single_term() {
            let mut distributed = Monomial::one();
            for (atom, e) in mono.factors() {
                distributed.multiply_atom(atom.clone(), e * exponent);
            }
            let coeff_power = constant_pow(coeff, exponent);
            return Ok(&coeff_power * &Self::from_term(Rational::one(), distributed));
        }

        Ok(Self::from_term(
            Rational::one(),
            Monomial::from_atom(Atom::Power(Box::new(self.clone())), exponent.clone()),
        ))
    }

    /// `base^exponent` keeping a sum as a power atom for every exponent,
    /// including integers.
    pub(crate) fn power_atom(base: Expr, exponent: &Rational) -> Result<Self, SymbolicError> {
        if base.terms.len() < 2 {
            return base.pow(exponent);
        }
        Ok(Self::from_term(
            Rational::one(),
            Monomial::from_atom(Atom::Power(Box::new(base)), exponent.clone()),
        ))
    }

    /// Multiply out every power atom with a positive integer exponent.
    pub fn expand(&self) -> Self {
        self.expand_where(&|_: &Expr| true)
    }

    /// Multiply out the positive integer power atoms whose base satisfies
    /// `select`.
    pub(crate) fn expand_where(&self, select: &dyn Fn(&Expr) -> bool) -> Self {
        let mut result = Self::zero();
        for (mono, coeff) in self.terms() {
            let mut kept = Monomial::one();
            let mut term = Self::one();
            for (atom, exponent) in mono.factors() {
                match (atom, exponent.to_i64()) {
                    (Atom::Power(base), Some(n)) if n > 0 && select(base.as_ref()) => {
                        term = &term * &base.expand_where(select).pow_unsigned(n.unsigned_abs());
                    }
                    _ => kept.multiply_atom(atom.clone(), exponent.clone()),
                }
            }
            result += &Self::from_term(coeff.clone(), kept) * &term;
        }
        result
    }
}

/// `value^exponent` for a nonzero rational, kept exact.
fn constant_pow(value: &Rational, exponent: &Rational) -> Expr {
    if let Some(n) = exponent.to_i64() {
        return Expr::constant(value.powi(n));
    }
    if value.is_one() {
        return Expr::one();
    }
    Expr::from_term(
        Rational::one(),
        Monomial::from_atom(
            Atom::Power(Box::new(Expr::constant(value.clone()))),
            exponent.clone(),
        ),
    )
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Self::constant(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Self::symbol(symbol)
    }
}

// Arithmetic operations
impl AddAssign<&Expr> for Expr {
    fn add_assign(&mut self, rhs: &Expr) {
        for (mono, coeff) in rhs.terms() {
            self.add_term(mono.clone(), coeff.clone());
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        for (mono, coeff) in rhs.terms {
            self.add_term(mono, coeff);
        }
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Expr) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<&Expr> for Expr {
    type Output = Expr;

    fn add(mut self, rhs: &Expr) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add for &Expr {
    type Output = Expr;

    fn add(self, rhs: &Expr) -> Self::Output {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr {
            terms: self.terms.into_iter().map(|(mono, c)| (mono, -c)).collect(),
        }
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        self + (-rhs)
    }
}

impl Sub<&Expr> for Expr {
    type Output = Expr;

    fn sub(self, rhs: &Expr) -> Self::Output {
        self + (-rhs)
    }
}

impl Sub for &Expr {
    type Output = Expr;

    fn sub(self, rhs: &Expr) -> Self::Output {
        self.clone() + (-rhs)
    }
}

impl Mul for &Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Self::Output {
        let mut product = Expr::zero();
        for (m1, c1) in self.terms() {
            for (m2, c2) in rhs.terms() {
                product += Expr::from_term(c1 * c2, m1.mul(m2));
            }
        }
        product
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Self::Output {
        &self * &rhs
    }
}

impl Mul<&Expr> for Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Self::Output {
        &self * rhs
    }
}

impl Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Self {
        iter.fold(Expr::zero(), |acc, e| acc + e)
    }
}

impl<'a> Sum<&'a Expr> for Expr {
    fn sum<I: Iterator<Item = &'a Expr>>(iter: I) -> Self {
        iter.fold(Expr::zero(), |acc, e| acc + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c() -> Expr {
        Expr::symbol(&Symbol::new("c"))
    }

    fn xi() -> Expr {
        Expr::symbol(&Symbol::new("xi"))
    }

    #[test]
    fn test_like_terms_collect() {
        let sum = &xi() + &xi();
        assert_eq!(sum, xi().scale(&Rational::from(2)));
        assert!((&xi() - &xi()).is_zero());
        assert_eq!(sum.len(), 1);
    }

    #[test]
    fn test_products_distribute() {
        // (1 - c)(1 + c) = 1 - c^2
        let product = &(Expr::one() - c()) * &(Expr::one() + c());
        assert_eq!(product, Expr::one() - &c() * &c());
    }

    #[test]
    fn test_integer_powers_of_sums_stay_atomic_until_expanded() {
        let d = Expr::one() - c();
        let squared = d.pow(&Rational::from(2)).unwrap();
        assert_eq!(squared.len(), 1);
        assert_eq!(squared.to_string(), "(1 - c)^2");

        // (1 - c)^2 = 1 - 2c + c^2
        let expected = Expr::one() - c().scale(&Rational::from(2)) + &c() * &c();
        assert_eq!(squared.expand(), expected);
        assert_eq!(d.pow(&Rational::one()).unwrap(), d);
    }

    #[test]
    fn test_power_exponents_merge_in_any_order() {
        let d = Expr::one() - c();
        let p = |n: i64, m: i64| d.pow(&Rational::new(n, m)).unwrap();

        // D^(1/2) * D^(3/2) = D^2
        assert_eq!(&p(1, 2) * &p(3, 2), p(2, 1));
        // D^(3/2) * D^(-1) = D^(1/2)
        assert_eq!(&p(3, 2) * &p(-1, 1), p(1, 2));
        // (D^(3/2) D^(3/2)) D^(-1) = D^(3/2) (D^(3/2) D^(-1))
        assert_eq!(
            &(&p(3, 2) * &p(3, 2)) * &p(-1, 1),
            &p(3, 2) * &(&p(3, 2) * &p(-1, 1))
        );
        // (D^(3/2))^(2/3) * D^(-1) = 1
        assert!((&p(-1, 1) * &p(3, 2).pow(&Rational::new(2, 3)).unwrap()).is_one());
    }

    #[test]
    fn test_monomial_powers_distribute() {
        let x = Symbol::new("xi");
        let term = Expr::power_of(&x, Rational::from(4)).scale(&Rational::from(2));
        let root = term.pow(&Rational::new(1, 2)).unwrap();
        // 2^(1/2) stays a constant power, xi^4 becomes xi^2
        let expected = &Expr::from(2).pow(&Rational::new(1, 2)).unwrap()
            * &Expr::power_of(&x, Rational::from(2));
        assert_eq!(root, expected);
        assert_eq!(
            Expr::one().pow(&Rational::new(3, 2)).unwrap(),
            Expr::one()
        );
    }

    #[test]
    fn test_constant_powers_fold() {
        let root_two = Expr::from(2).pow(&Rational::new(1, 2)).unwrap();
        assert!(!root_two.is_constant());
        assert_eq!(&root_two * &root_two, Expr::integer(2));
        assert_eq!(
            Expr::constant(Rational::new(2, 3)).pow(&Rational::from(-2)).unwrap(),
            Expr::constant(Rational::new(9, 4))
        );
    }

    #[test]
    fn test_zero_powers() {
        assert!(Expr::zero().pow(&Rational::new(1, 2)).unwrap().is_zero());
        assert_eq!(
            Expr::zero().pow(&Rational::from(-1)),
            Err(SymbolicError::DivisionByZero)
        );
        assert!(Expr::zero().pow(&Rational::zero()).unwrap().is_one());
    }

    #[test]
    fn test_constant_detection() {
        assert_eq!(Expr::integer(5).as_constant(), Some(Rational::from(5)));
        assert_eq!(Expr::zero().as_constant(), Some(Rational::zero()));
        assert!(xi().as_constant().is_none());
        assert!(!(Expr::one() - c()).is_constant());
    }

    #[test]
    fn test_depends_on_sees_power_bases() {
        let c_sym = Symbol::new("c");
        let power = (Expr::one() - c()).pow(&Rational::new(3, 2)).unwrap();
        assert!(power.depends_on(&c_sym));
        assert!(!power.depends_on(&Symbol::new("xi")));
    }
}
