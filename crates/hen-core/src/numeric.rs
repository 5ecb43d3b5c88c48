/// Floating point type used throughout system
pub type Real = f64;

/// Absolute tolerance for temperature comparisons (K or °C, same scale).
pub const TOL_T: Real = 1e-6;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Absolute-only comparison, used where both operands share a unit.
pub fn approx_equal(a: Real, b: Real, tol: Real) -> bool {
    (a - b).abs() <= tol
}

/// Parse user-entered text into a number.
///
/// Empty or whitespace-only text, text that is not a number, and non-finite
/// results (`inf`, `NaN`) are all *absent*. Nothing ever parses to a default
/// zero, so required-field checks downstream can see the gap.
pub fn parse_num(text: &str) -> Option<Real> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<Real>().ok().filter(|v| v.is_finite())
}

/// Parse a list separated by commas and/or whitespace, dropping tokens that
/// are not numbers.
pub fn parse_number_list(text: &str) -> Vec<Real> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(parse_num)
        .collect()
}

/// Parse a comma-separated list (composition fractions), dropping tokens that
/// are not numbers.
pub fn parse_comma_list(text: &str) -> Vec<Real> {
    text.split(',').filter_map(parse_num).collect()
}
