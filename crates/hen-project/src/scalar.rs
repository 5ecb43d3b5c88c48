//! Scalar spec operations: mode switching, mirroring and absent-aware reads.

use hen_core::units::{self, Quantity, SiValue};
use hen_core::{Real, parse_num};

use crate::schema::{ScalarMode, ScalarSpec, UnitNumber};

/// Ordered bounds of a resolved spec. A fixed value gives `min == max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: Real,
    pub max: Real,
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

impl ScalarSpec {
    pub fn empty(mode: ScalarMode, unit: impl Into<String>) -> Self {
        Self {
            mode,
            unit: unit.into(),
            value: String::new(),
            lo: String::new(),
            hi: String::new(),
        }
    }

    pub fn fixed(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::empty(ScalarMode::Fixed, unit)
        }
    }

    pub fn range(lo: impl Into<String>, hi: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            lo: lo.into(),
            hi: hi.into(),
            ..Self::empty(ScalarMode::Range, unit)
        }
    }

    /// Switch to `mode`, carrying entered text across.
    ///
    /// Going to range seeds each empty bound from the fixed value (a collapsed
    /// interval). Going to fixed takes the first non-empty of `value`, `lo`,
    /// `hi`. The fields of the abandoned mode are cleared. Setting the current
    /// mode is a no-op.
    pub fn set_mode(&mut self, mode: ScalarMode) {
        if self.mode == mode {
            return;
        }
        match mode {
            ScalarMode::Fixed => {
                self.value =
                    first_non_empty(&[self.value.as_str(), self.lo.as_str(), self.hi.as_str()])
                        .to_string();
                self.lo.clear();
                self.hi.clear();
            }
            ScalarMode::Range => {
                self.lo = first_non_empty(&[self.lo.as_str(), self.value.as_str()]).to_string();
                self.hi = first_non_empty(&[self.hi.as_str(), self.value.as_str()]).to_string();
                self.value.clear();
            }
        }
        self.mode = mode;
    }

    pub fn with_mode(mut self, mode: ScalarMode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            ScalarMode::Fixed => ScalarMode::Range,
            ScalarMode::Range => ScalarMode::Fixed,
        };
        self.set_mode(next);
    }

    /// Make `self` a copy of `source`'s mode, unit and active fields.
    pub fn mirror_from(&mut self, source: &ScalarSpec) {
        self.mode = source.mode;
        self.unit = source.unit.clone();
        match source.mode {
            ScalarMode::Fixed => {
                self.value = source.value.clone();
                self.lo.clear();
                self.hi.clear();
            }
            ScalarMode::Range => {
                self.value.clear();
                self.lo = source.lo.clone();
                self.hi = source.hi.clone();
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.mode == ScalarMode::Fixed
    }

    pub fn is_range(&self) -> bool {
        self.mode == ScalarMode::Range
    }

    /// The fixed value, if in fixed mode and parseable.
    pub fn as_fixed(&self) -> Option<Real> {
        if !self.is_fixed() {
            return None;
        }
        parse_num(&self.value)
    }

    /// `(lo, hi)` as entered, if in range mode and both parse.
    pub fn as_range(&self) -> Option<(Real, Real)> {
        if !self.is_range() {
            return None;
        }
        Some((parse_num(&self.lo)?, parse_num(&self.hi)?))
    }

    pub fn min_max(&self) -> Option<MinMax> {
        match self.mode {
            ScalarMode::Fixed => self.as_fixed().map(|v| MinMax { min: v, max: v }),
            ScalarMode::Range => self.as_range().map(|(lo, hi)| MinMax {
                min: lo.min(hi),
                max: lo.max(hi),
            }),
        }
    }

    /// [`min_max`](Self::min_max) after conversion to SI, so specs entered in
    /// different units compare correctly.
    pub fn si_min_max(&self, quantity: Quantity) -> Option<MinMax> {
        match self.to_si(quantity)? {
            SiValue::Fixed(v) => Some(MinMax { min: v, max: v }),
            SiValue::Range(lo, hi) => Some(MinMax {
                min: lo.min(hi),
                max: lo.max(hi),
            }),
        }
    }

    /// Convert the active fields to SI; `None` when they do not parse.
    pub fn to_si(&self, quantity: Quantity) -> Option<SiValue> {
        match self.mode {
            ScalarMode::Fixed => self
                .as_fixed()
                .map(|v| SiValue::Fixed(units::to_si(quantity, v, &self.unit))),
            ScalarMode::Range => self.as_range().map(|(lo, hi)| {
                SiValue::Range(
                    units::to_si(quantity, lo, &self.unit),
                    units::to_si(quantity, hi, &self.unit),
                )
            }),
        }
    }
}

impl UnitNumber {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    pub fn parsed(&self) -> Option<Real> {
        parse_num(&self.value)
    }

    pub fn to_si(&self, quantity: Quantity) -> Option<Real> {
        self.parsed().map(|v| units::to_si(quantity, v, &self.unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_to_range_collapses_interval() {
        let spec = ScalarSpec::fixed("5", "°C").with_mode(ScalarMode::Range);
        assert_eq!(spec.lo, "5");
        assert_eq!(spec.hi, "5");
        assert_eq!(spec.value, "");
    }

    #[test]
    fn range_to_fixed_prefers_lo_then_hi() {
        let spec = ScalarSpec::range("3", "7", "bar").with_mode(ScalarMode::Fixed);
        assert_eq!(spec.value, "3");

        let spec = ScalarSpec::range("", "7", "bar").with_mode(ScalarMode::Fixed);
        assert_eq!(spec.value, "7");
    }

    #[test]
    fn mode_round_trip_keeps_value() {
        let spec = ScalarSpec::fixed("5", "°C")
            .with_mode(ScalarMode::Range)
            .with_mode(ScalarMode::Fixed);
        assert_eq!(spec, ScalarSpec::fixed("5", "°C"));
    }

    #[test]
    fn toggle_flips_mode() {
        let mut spec = ScalarSpec::fixed("1", "mol/s");
        spec.toggle_mode();
        assert!(spec.is_range());
        spec.toggle_mode();
        assert!(spec.is_fixed());
        assert_eq!(spec.value, "1");
    }

    #[test]
    fn unparseable_text_is_absent_not_zero() {
        let spec = ScalarSpec::fixed("abc", "K");
        assert_eq!(spec.as_fixed(), None);
        assert_eq!(spec.min_max(), None);
        assert_eq!(spec.to_si(Quantity::Temperature), None);

        let spec = ScalarSpec::range("1", "", "K");
        assert_eq!(spec.as_range(), None);
    }

    #[test]
    fn min_max_orders_reversed_range() {
        let spec = ScalarSpec::range("9", "2", "K");
        assert_eq!(spec.min_max(), Some(MinMax { min: 2.0, max: 9.0 }));
    }

    #[test]
    fn range_converts_each_bound() {
        let spec = ScalarSpec::range("1", "5", "bar");
        assert_eq!(
            spec.to_si(Quantity::Pressure),
            Some(SiValue::Range(1e5, 5e5))
        );
    }

    #[test]
    fn si_min_max_orders_converted_bounds() {
        let spec = ScalarSpec::fixed("100", "°C");
        let mm = spec.si_min_max(Quantity::Temperature).unwrap();
        assert!((mm.min - 373.15).abs() < 1e-9 && mm.min == mm.max);

        let spec = ScalarSpec::range("2", "1", "bar");
        assert_eq!(
            spec.si_min_max(Quantity::Pressure),
            Some(MinMax { min: 1e5, max: 2e5 })
        );
        assert_eq!(ScalarSpec::fixed("", "K").si_min_max(Quantity::Temperature), None);
    }

    #[test]
    fn mirror_copies_active_fields_and_unit() {
        let tin = ScalarSpec::range("100", "110", "K");
        let mut tout = ScalarSpec::fixed("40", "°C");
        tout.mirror_from(&tin);
        assert_eq!(tout, tin);
    }
}
