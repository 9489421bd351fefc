//! Recursive term generation.

use crate::error::{AdmError, Result};
use crate::symbolic::{Expr, Symbol};
use crate::{DEFAULT_NUM_TERMS, DEFAULT_PARAMETER, DEFAULT_VARIABLE};

use super::adomian::adomian_polynomial;
use super::inverse::{inverse_operator, linear_operator};

/// Configuration for a solve.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Number of series terms to generate.
    num_terms: usize,
    /// Independent (radius-like) variable.
    variable: Symbol,
    /// Free parameter `C` of the nonlinearity.
    parameter: Symbol,
    /// Optional cap on the number of monomials in any generated expression.
    max_term_size: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_TERMS)
    }
}

impl SolverConfig {
    /// Create a configuration for `num_terms` terms with the default symbols.
    pub fn new(num_terms: usize) -> Self {
        Self {
            num_terms,
            variable: Symbol::new(DEFAULT_VARIABLE),
            parameter: Symbol::new(DEFAULT_PARAMETER),
            max_term_size: None,
        }
    }

    /// Set the independent variable.
    pub fn with_variable(mut self, variable: Symbol) -> Self {
        self.variable = variable;
        self
    }

    /// Set the symbol used for the parameter `C`.
    pub fn with_parameter(mut self, parameter: Symbol) -> Self {
        self.parameter = parameter;
        self
    }

    /// Abort the solve once a term or polynomial exceeds `limit` monomials.
    pub fn with_max_term_size(mut self, limit: usize) -> Self {
        self.max_term_size = Some(limit);
        self
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    pub fn variable(&self) -> &Symbol {
        &self.variable
    }

    pub fn parameter(&self) -> &Symbol {
        &self.parameter
    }

    pub fn max_term_size(&self) -> Option<usize> {
        self.max_term_size
    }

    /// Check the configuration before any computation starts.
    pub fn validate(&self) -> Result<()> {
        if self.num_terms < 1 {
            return Err(AdmError::invalid_configuration(
                "num_terms must be at least 1",
            ));
        }
        if self.variable == self.parameter {
            return Err(AdmError::invalid_configuration(format!(
                "variable and parameter must differ (both are '{}')",
                self.variable
            )));
        }
        if self.variable.is_dummy() || self.parameter.is_dummy() {
            return Err(AdmError::invalid_configuration(
                "internal bound symbols cannot be used as variable or parameter",
            ));
        }
        Ok(())
    }

    fn check_size(&self, term: usize, expr: &Expr) -> Result<()> {
        match self.max_term_size {
            Some(limit) if expr.len() > limit => Err(AdmError::ExpressionLimit {
                term,
                size: expr.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// The outcome of a solve: the term sequence and the polynomials behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    terms: Vec<Expr>,
    polynomials: Vec<Expr>,
    variable: Symbol,
    parameter: Symbol,
}

impl Solution {
    /// `θ_0 .. θ_{N-1}`.
    pub fn terms(&self) -> &[Expr] {
        &self.terms
    }

    /// `θ_index`, if it was generated.
    pub fn term(&self, index: usize) -> Option<&Expr> {
        self.terms.get(index)
    }

    /// `A_0 .. A_{N-2}`; `A_k` produced `θ_{k+1}`.
    pub fn polynomials(&self) -> &[Expr] {
        &self.polynomials
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false: a solution has at least `θ_0`.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The truncated series `Σ θ_i`, the approximate solution.
    pub fn partial_sum(&self) -> Expr {
        self.terms.iter().sum()
    }

    pub fn variable(&self) -> &Symbol {
        &self.variable
    }

    pub fn parameter(&self) -> &Symbol {
        &self.parameter
    }

    /// Consume the solution, keeping only the terms.
    pub fn into_terms(self) -> Vec<Expr> {
        self.terms
    }

    /// Re-check every step of the recurrence exactly.
    ///
    /// For each `k`: `A_k` is recomputed from the stored prefix,
    /// `L[θ_{k+1}] + A_k = 0`, and `θ_{k+1}` and its derivative vanish at the
    /// origin.
    pub fn verify(&self) -> Result<()> {
        if self.terms.first().map_or(true, |theta_0| !theta_0.is_one()) {
            return Err(AdmError::RecurrenceMismatch { term: 0 });
        }

        let origin = Expr::zero();
        for (k, a_k) in self.polynomials.iter().enumerate() {
            let term = k + 1;
            let mismatch = || AdmError::RecurrenceMismatch { term };
            let theta = self.terms.get(term).ok_or_else(mismatch)?;

            if adomian_polynomial(k, &self.terms, &self.parameter)? != *a_k {
                return Err(mismatch());
            }

            let residual = linear_operator(theta, &self.variable) + a_k;
            if !residual.simplify().is_zero() {
                return Err(mismatch());
            }

            let value = theta.subs(&self.variable, &origin).map_err(|_| mismatch())?;
            let slope = theta
                .diff(&self.variable)
                .subs(&self.variable, &origin)
                .map_err(|_| mismatch())?;
            if !value.is_zero() || !slope.is_zero() {
                return Err(mismatch());
            }
        }
        Ok(())
    }
}

/// Generate the term sequence described by `config`.
pub fn solve(config: &SolverConfig) -> Result<Solution> {
    solve_with(config, |_, _| {})
}

/// Generate the term sequence, calling `on_term(index, term)` as each term is
/// appended.
///
/// The first error aborts the solve; no partial sequence is returned.
pub fn solve_with<F>(config: &SolverConfig, mut on_term: F) -> Result<Solution>
where
    F: FnMut(usize, &Expr),
{
    config.validate()?;

    let n = config.num_terms;
    let mut terms = Vec::with_capacity(n);
    let mut polynomials = Vec::with_capacity(n - 1);

    // Initial condition θ(0) = 1
    let theta_0 = Expr::one();
    on_term(0, &theta_0);
    terms.push(theta_0);

    for k in 0..n - 1 {
        let next = k + 1;

        let a_k = adomian_polynomial(k, &terms, &config.parameter)?;
        config.check_size(next, &a_k)?;

        let theta = -inverse_operator(&a_k, &config.variable)
            .map_err(|source| AdmError::integration_failure(next, source))?;
        config.check_size(next, &theta)?;

        on_term(next, &theta);
        polynomials.push(a_k);
        terms.push(theta);
    }

    Ok(Solution {
        terms,
        polynomials,
        variable: config.variable.clone(),
        parameter: config.parameter.clone(),
    })
}
