//! Unit conversion engine.
//!
//! Every user-facing number carries a unit label from a small, quantity-specific
//! set. Conversions map `(value, label)` to the SI representation the solver
//! expects:
//!
//! | quantity | SI target |
//! |---|---|
//! | temperature | K |
//! | temperature difference | K |
//! | molar flow | mol/s |
//! | pressure | Pa |
//! | molar heat capacity | J/(mol·K) |
//! | latent heat | J/mol |
//! | heat-transfer coefficient | W/(m²·K) |
//!
//! The plain `to_si*` functions are total: an unrecognized label passes the
//! value through unchanged, as if it were already SI. Callers that want to
//! surface unknown labels use [`is_known_unit`] or [`to_si_strict`].

use std::fmt;

use uom::si::f64::{
    AmountOfSubstance, Pressure, TemperatureInterval, ThermodynamicTemperature, Time,
};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Dimension/quantity family for a user-entered number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Absolute temperature (canonical: K)
    Temperature,
    /// Temperature difference (canonical: K)
    TemperatureDelta,
    /// Molar flow (canonical: mol/s)
    Flow,
    /// Absolute pressure (canonical: Pa)
    Pressure,
    /// Molar heat capacity (canonical: J/(mol·K))
    HeatCapacity,
    /// Molar latent heat (canonical: J/mol)
    LatentHeat,
    /// Heat-transfer coefficient (canonical: W/(m²·K))
    HeatTransferCoefficient,
}

impl Quantity {
    /// Unit labels accepted for this quantity, SI label first.
    pub fn units(self) -> &'static [&'static str] {
        match self {
            Self::Temperature => &["K", "°C", "°F", "°R"],
            Self::TemperatureDelta => &["K", "°C"],
            Self::Flow => &["mol/s", "kmol/h", "kmol/s"],
            Self::Pressure => &["Pa", "kPa", "MPa", "bar"],
            Self::HeatCapacity => &["J/(mol*K)", "kJ/(mol*K)", "MJ/(mol*K)"],
            Self::LatentHeat => &["J/mol", "kJ/mol", "MJ/mol"],
            Self::HeatTransferCoefficient => &["W/(m^2*K)", "kW/(m^2*K)"],
        }
    }

    pub fn si_unit(self) -> &'static str {
        self.units()[0]
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::TemperatureDelta => write!(f, "Temperature Difference"),
            Self::Flow => write!(f, "Molar Flow"),
            Self::Pressure => write!(f, "Pressure"),
            Self::HeatCapacity => write!(f, "Heat Capacity"),
            Self::LatentHeat => write!(f, "Latent Heat"),
            Self::HeatTransferCoefficient => write!(f, "Heat Transfer Coefficient"),
        }
    }
}

/// A quantity after conversion: a single SI number or an SI `(lo, hi)` pair.
///
/// Serializes as a bare number or a two-element array.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SiValue {
    Fixed(Real),
    Range(Real, Real),
}

pub fn is_known_unit(quantity: Quantity, unit: &str) -> bool {
    quantity.units().contains(&unit)
}

/// Convert to SI. Unknown labels pass through unchanged.
pub fn to_si(quantity: Quantity, value: Real, unit: &str) -> Real {
    match quantity {
        Quantity::Temperature => to_si_t(value, unit),
        Quantity::TemperatureDelta => to_si_dt(value, unit),
        Quantity::Flow => to_si_flow(value, unit),
        Quantity::Pressure => to_si_pressure(value, unit),
        Quantity::HeatCapacity => to_si_cp(value, unit),
        Quantity::LatentHeat => to_si_hvap(value, unit),
        Quantity::HeatTransferCoefficient => to_si_htc(value, unit),
    }
}

/// Convert to SI, rejecting labels not listed for the quantity.
pub fn to_si_strict(quantity: Quantity, value: Real, unit: &str) -> CoreResult<Real> {
    if !is_known_unit(quantity, unit) {
        return Err(CoreError::UnknownUnit {
            unit: unit.to_string(),
            quantity: quantity.to_string(),
        });
    }
    Ok(to_si(quantity, value, unit))
}

pub fn to_si_t(value: Real, unit: &str) -> Real {
    use uom::si::thermodynamic_temperature::{
        degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
    };

    let t = match unit {
        "°C" => ThermodynamicTemperature::new::<degree_celsius>(value),
        "°F" => ThermodynamicTemperature::new::<degree_fahrenheit>(value),
        "°R" => ThermodynamicTemperature::new::<degree_rankine>(value),
        _ => return value,
    };
    t.get::<kelvin>()
}

pub fn to_si_dt(value: Real, unit: &str) -> Real {
    use uom::si::temperature_interval::{degree_celsius, kelvin};

    match unit {
        "°C" => TemperatureInterval::new::<degree_celsius>(value).get::<kelvin>(),
        _ => value,
    }
}

pub fn to_si_flow(value: Real, unit: &str) -> Real {
    use uom::si::amount_of_substance::{kilomole, mole};
    use uom::si::time::{hour, second};

    let (amount, per) = match unit {
        "kmol/h" => (
            AmountOfSubstance::new::<kilomole>(value),
            Time::new::<hour>(1.0),
        ),
        "kmol/s" => (
            AmountOfSubstance::new::<kilomole>(value),
            Time::new::<second>(1.0),
        ),
        _ => return value,
    };
    amount.get::<mole>() / per.get::<second>()
}

pub fn to_si_pressure(value: Real, unit: &str) -> Real {
    use uom::si::pressure::{bar, kilopascal, megapascal, pascal};

    let p = match unit {
        "kPa" => Pressure::new::<kilopascal>(value),
        "MPa" => Pressure::new::<megapascal>(value),
        "bar" => Pressure::new::<bar>(value),
        _ => return value,
    };
    p.get::<pascal>()
}

pub fn to_si_cp(value: Real, unit: &str) -> Real {
    match unit {
        "kJ/(mol*K)" => value * 1e3,
        "MJ/(mol*K)" => value * 1e6,
        _ => value,
    }
}

pub fn to_si_hvap(value: Real, unit: &str) -> Real {
    match unit {
        "kJ/mol" => value * 1e3,
        "MJ/mol" => value * 1e6,
        _ => value,
    }
}

pub fn to_si_htc(value: Real, unit: &str) -> Real {
    match unit {
        "kW/(m^2*K)" => value * 1e3,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    fn close(a: Real, b: Real) -> bool {
        nearly_equal(a, b, Tolerances::default())
    }

    #[test]
    fn temperature_to_kelvin() {
        assert!(close(to_si_t(0.0, "°C"), 273.15));
        assert!(close(to_si_t(300.0, "K"), 300.0));
        assert!(close(to_si_t(32.0, "°F"), 273.15));
        assert!(close(to_si_t(491.67, "°R"), 273.15));
    }

    #[test]
    fn flow_to_mol_per_s() {
        assert!((to_si_flow(1.0, "kmol/h") - 1000.0 / 3600.0).abs() < 1e-9);
        assert!(close(to_si_flow(2.0, "kmol/s"), 2000.0));
        assert!(close(to_si_flow(7.0, "mol/s"), 7.0));
    }

    #[test]
    fn pressure_to_pascal() {
        assert!(close(to_si_pressure(1.0, "bar"), 1e5));
        assert!(close(to_si_pressure(1.0, "kPa"), 1e3));
        assert!(close(to_si_pressure(1.5, "MPa"), 1.5e6));
    }

    #[test]
    fn delta_t_is_scale_equivalent() {
        assert!(close(to_si_dt(10.0, "°C"), 10.0));
        assert!(close(to_si_dt(10.0, "K"), 10.0));
    }

    #[test]
    fn property_scales() {
        assert!(close(to_si_cp(2.0, "kJ/(mol*K)"), 2000.0));
        assert!(close(to_si_hvap(40.0, "kJ/mol"), 40_000.0));
        assert!(close(to_si_htc(0.5, "kW/(m^2*K)"), 500.0));
    }

    #[test]
    fn unknown_label_passes_through() {
        assert_eq!(to_si(Quantity::Pressure, 12.0, "psi"), 12.0);
        assert!(!is_known_unit(Quantity::Pressure, "psi"));
        let err = to_si_strict(Quantity::Pressure, 12.0, "psi").unwrap_err();
        assert!(err.to_string().contains("psi"));
    }

    #[test]
    fn every_listed_unit_is_known() {
        for q in [
            Quantity::Temperature,
            Quantity::TemperatureDelta,
            Quantity::Flow,
            Quantity::Pressure,
            Quantity::HeatCapacity,
            Quantity::LatentHeat,
            Quantity::HeatTransferCoefficient,
        ] {
            for unit in q.units() {
                assert!(to_si_strict(q, 1.0, unit).is_ok(), "{q}: {unit}");
            }
        }
    }
}
