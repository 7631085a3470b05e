//! The `.manifest.json` record liblab commits to every SDK repository.

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path of the manifest relative to the SDK repository root.
pub const MANIFEST_PATH: &str = ".manifest.json";

/// Remote generation manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Engine version that produced the published SDK.
    pub liblab_version: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    pub fn new(liblab_version: impl Into<String>) -> Self {
        Manifest {
            liblab_version: liblab_version.into(),
            extra: Map::new(),
        }
    }

    /// The recorded engine version, if it is valid semver.
    pub fn engine_version(&self) -> Option<Version> {
        Version::parse(self.liblab_version.trim()).ok()
    }
}
