//! Streamset loading, saving and naming.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use hen_project::schema::Streamset;

use crate::error::{AppError, AppResult};

/// Load a streamset, choosing the format by extension.
pub fn load_streamset(path: &Path) -> AppResult<Streamset> {
    hen_project::load(path).map_err(|e| AppError::StreamsetRead {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn save_streamset(path: &Path, streamset: &Streamset) -> AppResult<()> {
    hen_project::save(path, streamset).map_err(|e| AppError::StreamsetWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Suggested name for a streamset saved at `at`, e.g.
/// `streamset-2025-03-01T09:30:00.000Z`.
pub fn streamset_name_at(at: DateTime<Utc>) -> String {
    format!(
        "streamset-{}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

pub fn default_streamset_name() -> String {
    streamset_name_at(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn name_uses_utc_timestamp_with_millis() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(streamset_name_at(at), "streamset-2025-03-01T09:30:00.000Z");
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("definitely/not/here.json");
        let err = load_streamset(path).unwrap_err();
        assert!(matches!(err, AppError::StreamsetRead { .. }));
        assert!(err.to_string().contains("here.json"));
    }
}
