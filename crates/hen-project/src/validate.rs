//! Stream and configuration validation.
//!
//! Validation never fails: it returns an ordered list of [`Issue`]s. Errors
//! block building and solving, warnings are informational. Issues come out in
//! stream order, then configuration issues, so repeated passes over the same
//! input produce the same list.

use std::collections::HashSet;

use hen_core::units::{self, Quantity};
use hen_core::{TOL_T, approx_equal, parse_comma_list, parse_num, parse_number_list};
use serde::{Deserialize, Serialize};

use crate::scalar::MinMax;
use crate::schema::{IntervalsConfig, ScalarSpec, Stream, StreamKind, ThermalKind};

/// Owner id for issues that belong to the interval configuration.
pub const INTERVALS_OWNER: &str = "__intervals__";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warn,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub level: IssueLevel,
    #[serde(rename = "streamId")]
    pub stream_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

/// True when at least one issue is an error.
pub fn has_blocking_error(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}

struct IssueSink<'a> {
    owner: &'a str,
    issues: Vec<Issue>,
}

impl<'a> IssueSink<'a> {
    fn new(owner: &'a str) -> Self {
        Self {
            owner,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, level: IssueLevel, field: &str, message: String) {
        self.issues.push(Issue {
            level,
            stream_id: self.owner.to_string(),
            field: Some(field.to_string()),
            message,
        });
    }

    fn error(&mut self, field: &str, message: impl Into<String>) {
        self.push(IssueLevel::Error, field, message.into());
    }

    fn warn(&mut self, field: &str, message: impl Into<String>) {
        self.push(IssueLevel::Warn, field, message.into());
    }
}

/// Validate every stream, then duplicate names, then the configuration.
pub fn validate_all(streams: &[Stream], config: Option<&IntervalsConfig>) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for stream in streams {
        issues.extend(validate_stream(stream));

        let name = stream.name.trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            issues.push(Issue {
                level: IssueLevel::Error,
                stream_id: stream.id.clone(),
                field: Some("name".to_string()),
                message: format!("duplicate name: {name}"),
            });
        }
    }

    if let Some(config) = config {
        issues.extend(validate_intervals_config(config, streams));
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    tracing::debug!(
        streams = streams.len(),
        errors,
        warnings = issues.len() - errors,
        "validation pass"
    );

    issues
}

pub fn validate_stream(s: &Stream) -> Vec<Issue> {
    let mut sink = IssueSink::new(&s.id);

    if s.name.trim().is_empty() {
        sink.error("name", "name is required");
    }

    check_core_specs(s, &mut sink);

    if s.kind.is_isothermal() {
        check_isothermal(s, &mut sink);
    } else {
        check_direction(s, &mut sink);
        if s.kind == StreamKind::Mvr {
            check_mvr(s, &mut sink);
        }
    }

    for (field, value) in [
        ("HTC", &s.htc),
        ("Tcont", &s.t_cont),
        ("min_TD", &s.min_td),
        ("superheating_deg", &s.superheating_deg),
        ("subcooling_deg", &s.subcooling_deg),
    ] {
        if let Some(v) = value.parsed()
            && v < 0.0
        {
            sink.error(field, format!("{field} must be ≥ 0"));
        }
    }

    check_heat_capacity(s, &mut sink);

    if !s.frac_text.trim().is_empty() && parse_comma_list(&s.frac_text).is_empty() {
        sink.warn("frac", "frac cannot be parsed");
    }

    check_unit_labels(s, &mut sink);

    sink.issues
}

fn core_specs(s: &Stream) -> [(&'static str, &ScalarSpec); 5] {
    [
        ("F", &s.f),
        ("Tin", &s.t_in),
        ("Tout", &s.t_out),
        ("Pin", &s.p_in),
        ("Pout", &s.p_out),
    ]
}

fn check_core_specs(s: &Stream, sink: &mut IssueSink<'_>) {
    for (key, spec) in core_specs(s) {
        if spec.is_range() {
            match (parse_num(&spec.lo), parse_num(&spec.hi)) {
                (Some(lo), Some(hi)) => {
                    if lo > hi {
                        sink.warn(key, format!("{key}: lo > hi (will be canonicalized)"));
                    }
                }
                _ => sink.error(key, format!("{key}: range requires lo and hi")),
            }
        } else if parse_num(&spec.value).is_none() {
            let optional_pressure = matches!(key, "Pin" | "Pout") && s.kind != StreamKind::Mvr;
            if !optional_pressure {
                sink.error(key, format!("{key}: value is required"));
            }
        }
    }
}

fn temperature_k(spec: &ScalarSpec) -> Option<MinMax> {
    spec.si_min_max(Quantity::Temperature)
}

fn check_isothermal(s: &Stream, sink: &mut IssueSink<'_>) {
    match (temperature_k(&s.t_in), temperature_k(&s.t_out)) {
        (Some(tin), Some(tout)) => {
            if !approx_equal(tin.min, tout.min, TOL_T) || !approx_equal(tin.max, tout.max, TOL_T)
            {
                sink.error("Tin/Tout", "isothermal requires Tin ≡ Tout");
            }
        }
        _ => sink.error("Tin/Tout", "isothermal requires Tin and Tout"),
    }

    if s.kind == StreamKind::IsothermalFixed {
        if !(s.t_in.is_fixed() && s.t_out.is_fixed()) {
            sink.error("Tin/Tout", "IsothermalFixed requires Tin and Tout fixed");
        }
    } else if !(s.t_in.is_range() && s.t_out.is_range()) {
        sink.error(
            "Tin/Tout",
            "IsothermalVariable requires Tin and Tout variable (range)",
        );
    }

    match s.hvap.parsed() {
        Some(hv) if hv > 0.0 => {}
        _ => sink.error("Hvap", "isothermal stream requires Hvap > 0"),
    }
}

fn check_direction(s: &Stream, sink: &mut IssueSink<'_>) {
    let tout = temperature_k(&s.t_out);
    if tout.is_none() {
        sink.error("Tout", "non-isothermal stream requires Tout");
    }

    let (Some(tin), Some(tout)) = (temperature_k(&s.t_in), tout) else {
        return;
    };
    match s.thermal {
        ThermalKind::Hot => {
            if tin.min < tout.max - TOL_T {
                sink.error("Tin/Tout", "thermal=hot requires Tin ≥ Tout");
            }
        }
        ThermalKind::Cold => {
            if tout.min < tin.max - TOL_T {
                sink.error("Tin/Tout", "thermal=cold requires Tout ≥ Tin");
            }
        }
    }
}

fn check_mvr(s: &Stream, sink: &mut IssueSink<'_>) {
    if !s.f.is_fixed() {
        sink.error("F", "MVR requires fixed F");
    }

    if !s.p_in.is_range() {
        sink.error("Pin", "MVR requires Pin to be a range (lo, hi)");
    } else if let (Some(lo), Some(hi)) = (parse_num(&s.p_in.lo), parse_num(&s.p_in.hi))
        && hi <= lo
    {
        sink.error("Pin", "MVR requires Pin.hi > Pin.lo");
    }

    let pout = if s.p_out.is_fixed() {
        parse_num(&s.p_out.value)
    } else {
        parse_num(&s.p_out.lo)
    };
    if pout.is_none() {
        sink.error("Pout", "MVR requires Pout");
    }
}

fn check_heat_capacity(s: &Stream, sink: &mut IssueSink<'_>) {
    if !s.use_advanced_hcoeff {
        if s.cp.parsed().is_none() {
            sink.warn("Cp", "Cp is empty (Hcoeff will be zeros)");
        }
        return;
    }

    if s.hcoeff6.len() != 6 {
        sink.error("Hcoeff6", "Hcoeff6 must have 6 entries");
        return;
    }
    if let Some(i) = s.hcoeff6.iter().position(|c| parse_num(c).is_none()) {
        sink.error("Hcoeff6", format!("Hcoeff6[{}] is not a number", i + 1));
    }
}

/// Unit labels outside the known set convert as if already SI. Flag them so
/// the silent pass-through is visible.
fn check_unit_labels(s: &Stream, sink: &mut IssueSink<'_>) {
    let mut labels: Vec<(&str, &str, Quantity)> = vec![
        ("F", s.f.unit.as_str(), Quantity::Flow),
        ("Tin", s.t_in.unit.as_str(), Quantity::Temperature),
        ("Tout", s.t_out.unit.as_str(), Quantity::Temperature),
        ("Hvap", s.hvap.unit.as_str(), Quantity::LatentHeat),
        ("HTC", s.htc.unit.as_str(), Quantity::HeatTransferCoefficient),
        ("Tcont", s.t_cont.unit.as_str(), Quantity::TemperatureDelta),
        ("min_TD", s.min_td.unit.as_str(), Quantity::TemperatureDelta),
        (
            "superheating_deg",
            s.superheating_deg.unit.as_str(),
            Quantity::TemperatureDelta,
        ),
        (
            "subcooling_deg",
            s.subcooling_deg.unit.as_str(),
            Quantity::TemperatureDelta,
        ),
    ];
    if s.kind == StreamKind::Mvr {
        labels.push(("Pin", s.p_in.unit.as_str(), Quantity::Pressure));
        labels.push(("Pout", s.p_out.unit.as_str(), Quantity::Pressure));
    }
    if !s.use_advanced_hcoeff {
        labels.push(("Cp", s.cp.unit.as_str(), Quantity::HeatCapacity));
    }

    for (field, unit, quantity) in labels {
        if let Err(err) = units::to_si_strict(quantity, 0.0, unit) {
            sink.warn(field, format!("{err}; value is used as {}", quantity.si_unit()));
        }
    }
}

pub fn validate_intervals_config(cfg: &IntervalsConfig, streams: &[Stream]) -> Vec<Issue> {
    let mut sink = IssueSink::new(INTERVALS_OWNER);

    if cfg.use_clapeyron {
        sink.error(
            "use_clapeyron",
            "use_clapeyron requires a mixture (not supported in this front-end)",
        );
    }

    if cfg.t_interval_method.limits_span() {
        match parse_num(&cfg.max_delta_t) {
            Some(v) if v > 0.0 => {}
            _ => sink.error(
                "maxDeltaT",
                "maxDeltaT must be > 0 when method is limit_span/both",
            ),
        }
    }

    if cfg.t_interval_method.caps_count() {
        match parse_num(&cfg.maxnum_t) {
            Some(n) if n.fract() == 0.0 && n > 0.0 => {}
            _ => sink.error(
                "maxnumT",
                "maxnumT must be an integer > 0 when method is cap_count/both",
            ),
        }
    }

    check_nodes(cfg, &mut sink);
    check_mvr_config(cfg, &mut sink);
    check_forbidden_matches(cfg, streams, &mut sink);

    sink.issues
}

fn check_nodes(cfg: &IntervalsConfig, sink: &mut IssueSink<'_>) {
    use crate::schema::NodeRule;

    if cfg.node_rule == NodeRule::Custom {
        let nodes = parse_number_list(&cfg.t_nodes_specified_text);
        if nodes.is_empty() {
            sink.error(
                "T_nodes_specified",
                "custom node_rule requires T_nodes_specified (K) list",
            );
        } else if nodes.windows(2).any(|w| w[0] < w[1] - TOL_T) {
            sink.warn(
                "T_nodes_specified",
                "T_nodes_specified should be descending in K",
            );
        }
    } else if !cfg.t_nodes_specified_text.trim().is_empty() {
        sink.warn(
            "T_nodes_specified",
            "T_nodes_specified will be ignored unless node_rule is custom",
        );
    }
}

fn check_mvr_config(cfg: &IntervalsConfig, sink: &mut IssueSink<'_>) {
    let mvr = &cfg.mvr_config;

    if mvr.mode.trim().is_empty() {
        sink.warn("mvr_config.mode", "mvr_config.mode is empty");
    }

    match parse_num(&mvr.step_ratio) {
        Some(v) if v > 0.0 => {}
        _ => sink.error(
            "mvr_config.step_ratio",
            "mvr_config.step_ratio must be > 0",
        ),
    }

    for (key, text) in [
        ("isentropic_efficiency", &mvr.isentropic_efficiency),
        ("polytropic_efficiency", &mvr.polytropic_efficiency),
        ("mechanical_efficiency", &mvr.mechanical_efficiency),
    ] {
        match parse_num(text) {
            Some(v) if v > 0.0 && v <= 1.0 => {}
            _ => sink.error(
                &format!("mvr_config.{key}"),
                format!("{key} must be in (0, 1]"),
            ),
        }
    }
}

fn check_forbidden_matches(cfg: &IntervalsConfig, streams: &[Stream], sink: &mut IssueSink<'_>) {
    let known: HashSet<&str> = streams
        .iter()
        .map(|s| s.name.trim())
        .filter(|n| !n.is_empty())
        .collect();

    for row in &cfg.forbidden_match {
        if row.is_blank() {
            continue;
        }

        let hot = row.hot.trim();
        let cold = row.cold.trim();
        if hot.is_empty() || cold.is_empty() {
            sink.error(
                "forbidden_match",
                "forbidden_match rows require hot and cold stream names",
            );
            continue;
        }

        if !known.is_empty() && !(known.contains(hot) && known.contains(cold)) {
            sink.warn(
                "forbidden_match",
                format!("unknown stream name(s) in forbidden_match: {hot}, {cold}"),
            );
        }

        let (Some(lb), Some(ub)) = (parse_num(&row.q_lb), parse_num(&row.q_ub)) else {
            sink.error(
                "forbidden_match",
                "forbidden_match Q_lb/Q_ub must be numbers",
            );
            continue;
        };
        if lb > ub {
            sink.error("forbidden_match", "forbidden_match requires Q_lb ≤ Q_ub");
        } else if lb == 0.0 && ub == 0.0 {
            sink.warn("forbidden_match", format!("forbid match ({hot}, {cold})"));
        }
    }
}
