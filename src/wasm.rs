//! WASM bindings for the ADM solver.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmAdmSolver } from 'lane_emden_adm';
//!
//! await init();
//!
//! const solver = new WasmAdmSolver(5);
//! for (let i = 0; i < solver.len; i++) {
//!   console.log(`theta_${i} = ${solver.term(i)}`);
//! }
//! console.log(solver.partial_sum());
//! ```

use wasm_bindgen::prelude::*;

use crate::error::AdmError;
use crate::solver::{solve, Solution, SolverConfig};
use crate::symbolic::Symbol;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: AdmError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible solver.
///
/// The series is computed once in the constructor; accessors return the
/// terms rendered as text.
#[wasm_bindgen]
pub struct WasmAdmSolver {
    solution: Solution,
}

#[wasm_bindgen]
impl WasmAdmSolver {
    /// Solve with `num_terms` terms and the default symbols.
    ///
    /// # Example
    /// ```javascript
    /// const solver = new WasmAdmSolver(5);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(num_terms: usize) -> Result<WasmAdmSolver, JsValue> {
        Self::with_symbols(num_terms, crate::DEFAULT_VARIABLE, crate::DEFAULT_PARAMETER)
    }

    /// Solve with custom variable and parameter names.
    ///
    /// # Arguments
    /// * `num_terms` - Number of series terms (at least 1)
    /// * `variable` - Name of the independent variable
    /// * `parameter` - Name of the parameter C
    #[wasm_bindgen]
    pub fn with_symbols(
        num_terms: usize,
        variable: &str,
        parameter: &str,
    ) -> Result<WasmAdmSolver, JsValue> {
        let config = SolverConfig::new(num_terms)
            .with_variable(Symbol::new(variable))
            .with_parameter(Symbol::new(parameter));
        let solution = solve(&config).map_err(to_js)?;
        Ok(WasmAdmSolver { solution })
    }

    /// Number of generated terms.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.solution.len()
    }

    /// `θ_index` as text, or `undefined` past the end.
    #[wasm_bindgen]
    pub fn term(&self, index: usize) -> Option<String> {
        self.solution.term(index).map(ToString::to_string)
    }

    /// `A_index` as text, or `undefined` past the end.
    #[wasm_bindgen]
    pub fn polynomial(&self, index: usize) -> Option<String> {
        self.solution.polynomials().get(index).map(ToString::to_string)
    }

    /// All terms as text.
    #[wasm_bindgen]
    pub fn terms(&self) -> Vec<String> {
        self.solution.terms().iter().map(ToString::to_string).collect()
    }

    /// The approximate solution `Σ θ_k` as text.
    #[wasm_bindgen]
    pub fn partial_sum(&self) -> String {
        self.solution.partial_sum().to_string()
    }

    /// Re-check the recurrence.
    #[wasm_bindgen]
    pub fn verify(&self) -> Result<(), JsValue> {
        self.solution.verify().map_err(to_js)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default number of terms.
#[wasm_bindgen]
pub fn default_num_terms() -> usize {
    crate::DEFAULT_NUM_TERMS
}
