use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compose::BackgroundColor;
use crate::consts::DEFAULT_OUTPUT_FILENAME;
use crate::crop::AutoCropConfig;
use crate::removal::RemovalMethod;

/// Full configuration for turning one photo into an ID photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoConfig {
    /// Output PNG path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Solid color drawn behind the cut-out subject.
    #[serde(default)]
    pub background: BackgroundColor,
    #[serde(default)]
    pub removal: RemovalMethod,
    #[serde(default)]
    pub auto_crop: AutoCropConfig,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILENAME)
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            background: BackgroundColor::default(),
            removal: RemovalMethod::default(),
            auto_crop: AutoCropConfig::default(),
        }
    }
}
