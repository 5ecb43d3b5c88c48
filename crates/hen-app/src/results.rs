//! Solver responses and result-table helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BuildResponse {
    #[serde(default)]
    pub ok: bool,
    /// Opaque composite-curve data, forwarded to whatever renders it.
    #[serde(default)]
    pub plot: Option<Value>,
}

/// Total duty exchanged between one hot and one cold stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ResultEdge {
    pub hot: String,
    pub cold: String,
    pub q_total: f64,
}

impl ResultEdge {
    fn is_complete(&self) -> bool {
        !self.hot.is_empty() && !self.cold.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EconomicReport {
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    pub data: Vec<Vec<String>>,
}

/// Report keyed by section. Values are strings or one level of nested
/// string maps; key order is the order the solver sent.
pub type SolutionReport = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SolveResponse {
    pub ok: bool,
    pub hot_names: Vec<String>,
    pub cold_names: Vec<String>,
    pub edges: Vec<ResultEdge>,
    pub obj_value: Option<f64>,
    pub solution_report: Option<SolutionReport>,
    pub economic_report: Option<EconomicReport>,
}

impl SolveResponse {
    /// Drop edges that do not name both endpoints.
    pub fn ingest(mut self) -> Self {
        self.edges.retain(ResultEdge::is_complete);
        self
    }

    pub fn edge(&self, hot: &str, cold: &str) -> Option<&ResultEdge> {
        self.edges.iter().find(|e| e.hot == hot && e.cold == cold)
    }
}

/// One line of a flattened solution report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub key: String,
    pub value: String,
    pub indent: u8,
}

impl ReportRow {
    fn new(key: &str, value: String, indent: u8) -> Self {
        Self {
            key: key.to_string(),
            value,
            indent,
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Flatten a report into rows: scalars at indent 1, nested sections as a
/// header row followed by their entries at indent 2.
pub fn flatten_solution_report(report: &SolutionReport) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for (key, value) in report {
        match value {
            Value::Object(section) => {
                rows.push(ReportRow::new(key, String::new(), 1));
                rows.extend(
                    section
                        .iter()
                        .map(|(k, v)| ReportRow::new(k, value_text(v), 2)),
                );
            }
            other => rows.push(ReportRow::new(key, value_text(other), 1)),
        }
    }
    rows
}

/// Per-interval breakdown of one match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DetailMatrix {
    pub hot: String,
    pub cold: String,
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    pub q: Vec<Vec<f64>>,
}

/// Temperature-interval breakdown of one stream, in a display unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StreamDetail {
    pub name: String,
    pub unit: String,
    pub q_str: Vec<String>,
    pub describes: Vec<String>,
    pub t_upper: Vec<f64>,
    pub t_lower: Vec<f64>,
}

/// Temperature unit requested for stream detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StreamUnit {
    #[default]
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "K")]
    Kelvin,
    #[serde(rename = "°F")]
    Fahrenheit,
    #[serde(rename = "°R")]
    Rankine,
}

impl StreamUnit {
    pub const ALL: [StreamUnit; 4] = [
        Self::Celsius,
        Self::Kelvin,
        Self::Fahrenheit,
        Self::Rankine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Kelvin => "K",
            Self::Fahrenheit => "°F",
            Self::Rankine => "°R",
        }
    }
}

impl fmt::Display for StreamUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| format!("unknown temperature unit '{s}'"))
    }
}

/// Move the element at `from` to position `to`, shifting the rest.
///
/// An out-of-range `from` leaves the order unchanged; `to` past the end
/// appends.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    if from == to || from >= next.len() {
        return next;
    }
    let item = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, item);
    next
}
