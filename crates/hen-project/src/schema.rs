//! Editable stream model and interval configuration.
//!
//! Every numeric field is kept as the text the user typed, in the unit they
//! chose. Conversion to SI happens only when a payload is built.

use serde::{Deserialize, Serialize};

use crate::lenient;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThermalKind {
    Hot,
    Cold,
}

impl ThermalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Cold => "cold",
        }
    }
}

/// Structural category of a stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum StreamKind {
    #[default]
    Common,
    IsothermalFixed,
    IsothermalVariable,
    #[serde(rename = "MVR")]
    Mvr,
    #[serde(rename = "MHP")]
    Mhp,
    RankineCycle,
}

impl StreamKind {
    pub fn is_isothermal(self) -> bool {
        matches!(self, Self::IsothermalFixed | Self::IsothermalVariable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::IsothermalFixed => "IsothermalFixed",
            Self::IsothermalVariable => "IsothermalVariable",
            Self::Mvr => "MVR",
            Self::Mhp => "MHP",
            Self::RankineCycle => "RankineCycle",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PricingBasis {
    #[default]
    Energy,
    Power,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScalarMode {
    #[default]
    Fixed,
    Range,
}

/// A user-entered quantity: a fixed value or a closed range, in `unit`.
///
/// Only the fields selected by `mode` are meaningful; the others are kept so a
/// mode switch loses as little input as possible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScalarSpec {
    pub mode: ScalarMode,
    pub unit: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub lo: String,
    #[serde(default)]
    pub hi: String,
}

/// A scalar property with no range mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UnitNumber {
    #[serde(default)]
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stream {
    pub id: String,
    pub name: String,
    pub thermal: ThermalKind,
    #[serde(default)]
    pub kind: StreamKind,

    #[serde(rename = "F")]
    pub f: ScalarSpec,
    #[serde(rename = "Tin")]
    pub t_in: ScalarSpec,
    #[serde(rename = "Tout")]
    pub t_out: ScalarSpec,
    #[serde(rename = "Pin")]
    pub p_in: ScalarSpec,
    #[serde(rename = "Pout")]
    pub p_out: ScalarSpec,

    #[serde(rename = "fracText", default)]
    pub frac_text: String,

    #[serde(rename = "useAdvancedHcoeff", default)]
    pub use_advanced_hcoeff: bool,
    #[serde(rename = "Cp")]
    pub cp: UnitNumber,
    #[serde(rename = "Hcoeff6", default)]
    pub hcoeff6: Vec<String>,
    #[serde(rename = "Hvap")]
    pub hvap: UnitNumber,
    #[serde(rename = "HTC")]
    pub htc: UnitNumber,
    #[serde(rename = "Tcont")]
    pub t_cont: UnitNumber,
    pub cost: UnitNumber,
    #[serde(default)]
    pub pricing_basis: PricingBasis,

    #[serde(rename = "min_TD")]
    pub min_td: UnitNumber,
    pub superheating_deg: UnitNumber,
    pub subcooling_deg: UnitNumber,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeRule {
    Inlet,
    #[default]
    Inout,
    Custom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TGridMethod {
    #[default]
    Default,
    LimitSpan,
    CapCount,
    Both,
}

impl TGridMethod {
    pub fn limits_span(self) -> bool {
        matches!(self, Self::LimitSpan | Self::Both)
    }

    pub fn caps_count(self) -> bool {
        matches!(self, Self::CapCount | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MvrMethod {
    Gdp,
    #[default]
    Piecewise,
}

/// A row bounding (or, at zero bounds, forbidding) exchange between two streams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForbiddenMatch {
    #[serde(default = "crate::new_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hot: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cold: String,
    #[serde(rename = "Q_lb", default, deserialize_with = "lenient::text")]
    pub q_lb: String,
    #[serde(rename = "Q_ub", default, deserialize_with = "lenient::text")]
    pub q_ub: String,
}

impl ForbiddenMatch {
    pub fn is_blank(&self) -> bool {
        self.hot.trim().is_empty()
            && self.cold.trim().is_empty()
            && self.q_lb.trim().is_empty()
            && self.q_ub.trim().is_empty()
    }
}

/// Compressor settings. Fields that are missing, null or not scalar load as
/// their default rather than as empty text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "MvrConfigFile")]
pub struct MvrConfig {
    pub method: MvrMethod,
    pub mode: String,
    pub step_ratio: String,
    pub isentropic_efficiency: String,
    pub polytropic_efficiency: String,
    pub mechanical_efficiency: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MvrConfigFile {
    #[serde(deserialize_with = "lenient::or_default")]
    method: MvrMethod,
    #[serde(deserialize_with = "lenient::opt_text")]
    mode: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    step_ratio: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    isentropic_efficiency: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    polytropic_efficiency: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    mechanical_efficiency: Option<String>,
}

impl From<MvrConfigFile> for MvrConfig {
    fn from(file: MvrConfigFile) -> Self {
        let base = Self::default();
        Self {
            method: file.method,
            mode: file.mode.unwrap_or(base.mode),
            step_ratio: file.step_ratio.unwrap_or(base.step_ratio),
            isentropic_efficiency: file
                .isentropic_efficiency
                .unwrap_or(base.isentropic_efficiency),
            polytropic_efficiency: file
                .polytropic_efficiency
                .unwrap_or(base.polytropic_efficiency),
            mechanical_efficiency: file
                .mechanical_efficiency
                .unwrap_or(base.mechanical_efficiency),
        }
    }
}

impl Default for MvrConfig {
    fn default() -> Self {
        Self {
            method: MvrMethod::Piecewise,
            mode: "polytropic".to_string(),
            step_ratio: "0.007".to_string(),
            isentropic_efficiency: "0.72".to_string(),
            polytropic_efficiency: "0.75".to_string(),
            mechanical_efficiency: "0.97".to_string(),
        }
    }
}

/// Process-wide temperature-grid and compressor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct IntervalsConfig {
    #[serde(deserialize_with = "lenient::or_default")]
    pub forbidden_match: Vec<ForbiddenMatch>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub node_rule: NodeRule,
    #[serde(rename = "T_interval_method", deserialize_with = "lenient::or_default")]
    pub t_interval_method: TGridMethod,
    #[serde(rename = "T_nodes_specified_text", deserialize_with = "lenient::text")]
    pub t_nodes_specified_text: String,
    #[serde(rename = "maxDeltaT", deserialize_with = "lenient::text")]
    pub max_delta_t: String,
    #[serde(rename = "maxnumT", deserialize_with = "lenient::text")]
    pub maxnum_t: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mvr_config: MvrConfig,
    #[serde(deserialize_with = "lenient::truthy")]
    pub use_clapeyron: bool,
}

/// Saved editable state: streams in their original units plus configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Streamset {
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub name: String,
    pub streams: Vec<Stream>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub intervals_config: IntervalsConfig,
}
