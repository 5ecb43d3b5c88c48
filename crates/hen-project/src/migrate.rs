//! Streamset schema versioning.

use crate::ProjectError;
use crate::schema::Streamset;

pub const SCHEMA_VERSION: &str = "ei-stream-ui-v1";

/// Bring a loaded streamset up to [`SCHEMA_VERSION`].
///
/// Files written before the version tag existed carry none and are read as
/// the current version.
pub fn migrate_to_latest(mut streamset: Streamset) -> Result<Streamset, ProjectError> {
    match streamset.schema_version.as_str() {
        "" => {
            streamset.schema_version = SCHEMA_VERSION.to_string();
            Ok(streamset)
        }
        SCHEMA_VERSION => Ok(streamset),
        other => Err(ProjectError::UnsupportedSchema {
            version: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IntervalsConfig;

    fn streamset(version: &str) -> Streamset {
        Streamset {
            schema_version: version.to_string(),
            name: "test".to_string(),
            streams: vec![],
            intervals_config: IntervalsConfig::default(),
        }
    }

    #[test]
    fn migrate_latest_is_noop() {
        let s = streamset(SCHEMA_VERSION);
        assert_eq!(migrate_to_latest(s.clone()).unwrap(), s);
    }

    #[test]
    fn missing_version_becomes_latest() {
        let migrated = migrate_to_latest(streamset("")).unwrap();
        assert_eq!(migrated.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = migrate_to_latest(streamset("ei-stream-ui-v9")).unwrap_err();
        assert!(err.to_string().contains("ei-stream-ui-v9"));
    }
}
