//! Display formatting for heat duties.

/// Compact heat-duty text for result tables.
///
/// Zero and non-finite values render empty so unused matches read as blank
/// cells. Very large or very small magnitudes use exponent form
/// (`1.23e+6`).
pub fn format_heat(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return String::new();
    }
    let abs = value.abs();
    if !(1e-2..1e6).contains(&abs) {
        return exponent(value);
    }
    if abs >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

fn exponent(value: f64) -> String {
    let text = format!("{value:.2e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_for_zero_and_non_finite() {
        assert_eq!(format_heat(0.0), "");
        assert_eq!(format_heat(f64::NAN), "");
        assert_eq!(format_heat(f64::INFINITY), "");
    }

    #[test]
    fn precision_by_magnitude() {
        assert_eq!(format_heat(12.345), "12.35");
        assert_eq!(format_heat(-0.5), "-0.50");
        assert_eq!(format_heat(250.0), "250.0");
        assert_eq!(format_heat(999_999.0), "999999.0");
    }

    #[test]
    fn exponent_form_at_extremes() {
        assert_eq!(format_heat(1_234_567.0), "1.23e+6");
        assert_eq!(format_heat(0.001), "1.00e-3");
        assert_eq!(format_heat(-2.5e7), "-2.50e+7");
    }
}
