//! Stream construction defaults.

use crate::schema::{
    PricingBasis, ScalarMode, ScalarSpec, Stream, StreamKind, ThermalKind, UnitNumber,
};

/// Default name for the `n`-th stream of a thermal side: `h1`, `c2`, ...
pub fn default_name(n: usize, thermal: ThermalKind) -> String {
    match thermal {
        ThermalKind::Hot => format!("h{n}"),
        ThermalKind::Cold => format!("c{n}"),
    }
}

/// A fresh `Common` stream: fixed-mode empty quantities in default units,
/// constant heat capacity, zero cost and zero temperature margins.
pub fn new_stream(n: usize, thermal: ThermalKind) -> Stream {
    Stream {
        id: crate::new_id(),
        name: default_name(n, thermal),
        thermal,
        kind: StreamKind::Common,

        f: ScalarSpec::empty(ScalarMode::Fixed, "mol/s"),
        t_in: ScalarSpec::empty(ScalarMode::Fixed, "°C"),
        t_out: ScalarSpec::empty(ScalarMode::Fixed, "°C"),
        p_in: ScalarSpec::empty(ScalarMode::Fixed, "bar"),
        p_out: ScalarSpec::empty(ScalarMode::Fixed, "bar"),

        frac_text: String::new(),

        use_advanced_hcoeff: false,
        cp: UnitNumber::new("", "kJ/(mol*K)"),
        hcoeff6: vec!["0".to_string(); 6],
        hvap: UnitNumber::new("", "kJ/mol"),
        htc: UnitNumber::new("", "kW/(m^2*K)"),
        t_cont: UnitNumber::new("", "K"),
        cost: UnitNumber::new("0", "-"),
        pricing_basis: PricingBasis::Energy,

        min_td: UnitNumber::new("0", "K"),
        superheating_deg: UnitNumber::new("0", "K"),
        subcooling_deg: UnitNumber::new("0", "K"),
    }
}

impl Stream {
    /// Copy with a new identity and a `_copy` name suffix.
    pub fn duplicate(&self) -> Stream {
        Stream {
            id: crate::new_id(),
            name: format!("{}_copy", self.name),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_thermal_side() {
        let h = new_stream(1, ThermalKind::Hot);
        let c = new_stream(3, ThermalKind::Cold);
        assert_eq!(h.name, "h1");
        assert_eq!(c.name, "c3");
        assert_eq!(h.kind, StreamKind::Common);
        assert!(h.f.is_fixed() && h.f.value.is_empty());
        assert_eq!(h.t_in.unit, "°C");
        assert_eq!(h.hcoeff6.len(), 6);
        assert_ne!(h.id, c.id);
    }

    #[test]
    fn duplicate_gets_new_identity() {
        let s = new_stream(1, ThermalKind::Hot);
        let d = s.duplicate();
        assert_ne!(d.id, s.id);
        assert_eq!(d.name, "h1_copy");
        assert_eq!(d.t_in, s.t_in);
    }
}
