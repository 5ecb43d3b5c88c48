//! hen-project: editable stream model, kind transitions, validation and the
//! streamset file format.

pub mod kind;
mod lenient;
pub mod migrate;
pub mod scalar;
pub mod schema;
pub mod stream;
pub mod validate;

use std::path::Path;

pub use kind::canonicalize;
pub use migrate::{SCHEMA_VERSION, migrate_to_latest};
pub use scalar::MinMax;
pub use schema::*;
pub use stream::{default_name, new_stream};
pub use validate::{
    INTERVALS_OWNER, Issue, IssueLevel, has_blocking_error, validate_all,
    validate_intervals_config, validate_stream,
};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Unsupported streamset schema: {version}")]
    UnsupportedSchema { version: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fresh process-unique identifier for streams and match rows.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Streamset {
    pub fn new(
        name: impl Into<String>,
        streams: Vec<Stream>,
        intervals_config: IntervalsConfig,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            name: name.into(),
            streams,
            intervals_config,
        }
    }
}

pub fn from_json_str(content: &str) -> ProjectResult<Streamset> {
    let streamset: Streamset = serde_json::from_str(content)?;
    migrate_to_latest(streamset)
}

pub fn to_json_string(streamset: &Streamset) -> ProjectResult<String> {
    Ok(serde_json::to_string_pretty(streamset)?)
}

pub fn load_json(path: &Path) -> ProjectResult<Streamset> {
    let content = std::fs::read_to_string(path)?;
    let streamset = from_json_str(&content)?;
    tracing::info!(
        path = %path.display(),
        streams = streamset.streams.len(),
        "loaded streamset"
    );
    Ok(streamset)
}

pub fn save_json(path: &Path, streamset: &Streamset) -> ProjectResult<()> {
    std::fs::write(path, to_json_string(streamset)?)?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<Streamset> {
    let content = std::fs::read_to_string(path)?;
    let streamset: Streamset = serde_yaml::from_str(&content)?;
    let streamset = migrate_to_latest(streamset)?;
    tracing::info!(
        path = %path.display(),
        streams = streamset.streams.len(),
        "loaded streamset"
    );
    Ok(streamset)
}

pub fn save_yaml(path: &Path, streamset: &Streamset) -> ProjectResult<()> {
    std::fs::write(path, serde_yaml::to_string(streamset)?)?;
    Ok(())
}

/// Load by extension: `.yaml`/`.yml` as YAML, anything else as JSON.
pub fn load(path: &Path) -> ProjectResult<Streamset> {
    if is_yaml(path) {
        load_yaml(path)
    } else {
        load_json(path)
    }
}

pub fn save(path: &Path, streamset: &Streamset) -> ProjectResult<()> {
    if is_yaml(path) {
        save_yaml(path, streamset)
    } else {
        save_json(path, streamset)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}
