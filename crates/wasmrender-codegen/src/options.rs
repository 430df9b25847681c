//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::version::BinaryVersion;

/// Options for one render.
///
/// ```json
/// { "version": 12, "name_section": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Binary revision tag, `11` (0xB) or `12` (0xC).
    pub version: BinaryVersion,
    /// Emit the informational function-name section.
    pub name_section: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            version: BinaryVersion::default(),
            name_section: true,
        }
    }
}

impl RenderOptions {
    pub fn new(version: BinaryVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Parse options from JSON. An unsupported version tag is reported as
    /// [`RenderError::UnsupportedVersion`].
    pub fn from_json(json: &str) -> RenderResult<Self> {
        #[derive(Deserialize)]
        struct Raw {
            version: Option<u32>,
            name_section: Option<bool>,
        }

        let raw: Raw =
            serde_json::from_str(json).map_err(|e| RenderError::Config(format!("{e}")))?;
        let defaults = Self::default();
        Ok(Self {
            version: match raw.version {
                Some(tag) => BinaryVersion::try_from(tag)?,
                None => defaults.version,
            },
            name_section: raw.name_section.unwrap_or(defaults.name_section),
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.version, BinaryVersion::V0xC);
        assert!(options.name_section);
    }

    #[test]
    fn test_from_json() {
        let options = RenderOptions::from_json(r#"{"version": 11}"#).unwrap();
        assert_eq!(options.version, BinaryVersion::V0xB);
        assert!(options.name_section);

        let options = RenderOptions::from_json(r#"{"name_section": false}"#).unwrap();
        assert_eq!(options.version, BinaryVersion::V0xC);
        assert!(!options.name_section);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let err = RenderOptions::from_json(r#"{"version": 13}"#).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedVersion(13)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RenderOptions::from_json("{version").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let options = RenderOptions {
            version: BinaryVersion::V0xB,
            name_section: false,
        };
        let json = options.to_json();
        assert_eq!(json, r#"{"version":11,"name_section":false}"#);
        let back: RenderOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
