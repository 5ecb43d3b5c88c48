//! Model → SI payload conversion.

use hen_core::units::{self, Quantity};
use hen_core::{Real, SiValue, parse_comma_list, parse_num, parse_number_list};
use hen_project::schema::{IntervalsConfig, Stream, StreamKind, UnitNumber};

use crate::schema::{
    ForbiddenMatchPayloadSi, IntervalsConfigPayloadSi, MvrConfigPayloadSi, PayloadSi,
    StreamPayloadSi,
};

pub fn build_payload_si(streams: &[Stream], config: Option<&IntervalsConfig>) -> PayloadSi {
    PayloadSi {
        streams: streams.iter().map(build_stream_payload).collect(),
        intervals_config: config.map(build_intervals_config_payload),
    }
}

/// Heat-capacity polynomial as six SI coefficients.
///
/// The simple form puts the constant Cp in the linear slot: `[0, Cp, 0, 0, 0, 0]`.
/// Advanced coefficients are taken as already SI.
fn hcoeff(stream: &Stream) -> [Real; 6] {
    if !stream.use_advanced_hcoeff {
        let cp = stream.cp.to_si(Quantity::HeatCapacity).unwrap_or(0.0);
        return [0.0, cp, 0.0, 0.0, 0.0, 0.0];
    }

    let mut coeffs = [0.0; 6];
    for (slot, text) in coeffs.iter_mut().zip(&stream.hcoeff6) {
        *slot = parse_num(text).unwrap_or(0.0);
    }
    coeffs
}

pub fn build_stream_payload(stream: &Stream) -> StreamPayloadSi {
    let or_zero = |v: Option<SiValue>| v.unwrap_or(SiValue::Fixed(0.0));
    let is_mvr = stream.kind == StreamKind::Mvr;

    StreamPayloadSi {
        name: stream.name.trim().to_string(),
        thermal: stream.thermal,
        kind: stream.kind,

        f: or_zero(stream.f.to_si(Quantity::Flow)),
        t_in: or_zero(stream.t_in.to_si(Quantity::Temperature)),
        t_out: or_zero(stream.t_out.to_si(Quantity::Temperature)),
        p_in: is_mvr
            .then(|| stream.p_in.to_si(Quantity::Pressure))
            .flatten(),
        p_out: is_mvr
            .then(|| stream.p_out.to_si(Quantity::Pressure))
            .flatten(),

        frac: parse_comma_list(&stream.frac_text),
        hcoeff: hcoeff(stream),
        hvap: stream.hvap.to_si(Quantity::LatentHeat).unwrap_or(0.0),
        htc: stream
            .htc
            .to_si(Quantity::HeatTransferCoefficient)
            .unwrap_or(0.0),
        t_cont: stream
            .t_cont
            .to_si(Quantity::TemperatureDelta)
            .unwrap_or(0.0),
        // cost has no unit system; the solver applies its own factor
        cost: stream.cost.parsed().unwrap_or(0.0),
        pricing_basis: stream.pricing_basis,

        min_td: delta(&stream.min_td),
        superheating_deg: delta(&stream.superheating_deg),
        subcooling_deg: delta(&stream.subcooling_deg),
    }
}

fn delta(value: &UnitNumber) -> Real {
    value
        .parsed()
        .map(|v| units::to_si_dt(v, &value.unit))
        .unwrap_or(0.0)
}

pub fn build_intervals_config_payload(cfg: &IntervalsConfig) -> IntervalsConfigPayloadSi {
    let mvr = &cfg.mvr_config;
    let num = |text: &str| parse_num(text).unwrap_or(0.0);

    IntervalsConfigPayloadSi {
        forbidden_match: cfg
            .forbidden_match
            .iter()
            .filter_map(|row| {
                let hot = row.hot.trim();
                let cold = row.cold.trim();
                if hot.is_empty() || cold.is_empty() {
                    return None;
                }
                Some(ForbiddenMatchPayloadSi {
                    hot: hot.to_string(),
                    cold: cold.to_string(),
                    q_lb: num(&row.q_lb),
                    q_ub: num(&row.q_ub),
                })
            })
            .collect(),
        node_rule: cfg.node_rule,
        t_interval_method: cfg.t_interval_method,
        t_nodes_specified: parse_number_list(&cfg.t_nodes_specified_text),
        max_delta_t: num(&cfg.max_delta_t),
        maxnum_t: num(&cfg.maxnum_t).trunc() as i64,
        mvr_config: MvrConfigPayloadSi {
            method: mvr.method,
            mode: mvr.mode.trim().to_string(),
            step_ratio: num(&mvr.step_ratio),
            isentropic_efficiency: num(&mvr.isentropic_efficiency),
            polytropic_efficiency: num(&mvr.polytropic_efficiency),
            mechanical_efficiency: num(&mvr.mechanical_efficiency),
        },
        use_clapeyron: cfg.use_clapeyron,
    }
}
