//! Wire payload types. Field names match what the solver service expects.

use hen_core::{Real, SiValue};
use hen_project::schema::{
    MvrMethod, NodeRule, PricingBasis, StreamKind, TGridMethod, ThermalKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamPayloadSi {
    pub name: String,
    pub thermal: ThermalKind,
    pub kind: StreamKind,

    #[serde(rename = "F")]
    pub f: SiValue,
    #[serde(rename = "Tin")]
    pub t_in: SiValue,
    #[serde(rename = "Tout")]
    pub t_out: SiValue,

    /// Only populated for MVR streams.
    #[serde(rename = "Pin")]
    pub p_in: Option<SiValue>,
    #[serde(rename = "Pout")]
    pub p_out: Option<SiValue>,

    pub frac: Vec<Real>,
    #[serde(rename = "Hcoeff")]
    pub hcoeff: [Real; 6],
    #[serde(rename = "Hvap")]
    pub hvap: Real,
    #[serde(rename = "HTC")]
    pub htc: Real,
    #[serde(rename = "Tcont")]
    pub t_cont: Real,
    pub cost: Real,
    pub pricing_basis: PricingBasis,

    #[serde(rename = "min_TD")]
    pub min_td: Real,
    pub superheating_deg: Real,
    pub subcooling_deg: Real,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForbiddenMatchPayloadSi {
    pub hot: String,
    pub cold: String,
    #[serde(rename = "Q_lb")]
    pub q_lb: Real,
    #[serde(rename = "Q_ub")]
    pub q_ub: Real,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MvrConfigPayloadSi {
    pub method: MvrMethod,
    pub mode: String,
    pub step_ratio: Real,
    pub isentropic_efficiency: Real,
    pub polytropic_efficiency: Real,
    pub mechanical_efficiency: Real,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalsConfigPayloadSi {
    pub forbidden_match: Vec<ForbiddenMatchPayloadSi>,
    pub node_rule: NodeRule,
    #[serde(rename = "T_interval_method")]
    pub t_interval_method: TGridMethod,
    #[serde(rename = "T_nodes_specified")]
    pub t_nodes_specified: Vec<Real>,
    #[serde(rename = "maxDeltaT")]
    pub max_delta_t: Real,
    #[serde(rename = "maxnumT")]
    pub maxnum_t: i64,
    pub mvr_config: MvrConfigPayloadSi,
    pub use_clapeyron: bool,
}

/// Build request body: `{ streams, intervals_config? }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadSi {
    pub streams: Vec<StreamPayloadSi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervals_config: Option<IntervalsConfigPayloadSi>,
}
