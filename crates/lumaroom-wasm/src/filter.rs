//! Filter composition bindings.
//!
//! Both functions take two filters in the text format accepted by
//! [`lumaroom_core::Filter::parse`] and convolve them.
//!
//! ```typescript
//! const text = compose_filters("2 1\n0.5\n1 1\n", "2 1\n0.5\n1 1\n");
//! // "3 1\n0.25\n 1 2 1\n"
//! ```

use lumaroom_core::Filter;
use wasm_bindgen::prelude::*;

fn compose(a: &str, b: &str) -> Result<Filter, JsValue> {
    let a = Filter::parse(a).map_err(|e| JsValue::from_str(&format!("First filter: {}", e)))?;
    let b = Filter::parse(b).map_err(|e| JsValue::from_str(&format!("Second filter: {}", e)))?;
    Ok(a.convolve(&b))
}

/// Convolve two filters and return the result in filter text format.
#[wasm_bindgen]
pub fn compose_filters(a: &str, b: &str) -> Result<String, JsValue> {
    compose(a, b).map(|f| f.to_filter_text())
}

/// Convolve two filters and return the result as gnuplot data points.
#[wasm_bindgen]
pub fn plot_filter_composition(a: &str, b: &str) -> Result<String, JsValue> {
    compose(a, b).map(|f| f.plot_points())
}
