//! Pipeline configuration.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::encoder::SAMPLE_RATE;
use crate::error::SynthesisError;

/// Where the pipeline stages assets and writes clips, and at what rate it
/// encodes them.
///
/// Construct directly, via [`PipelineConfigBuilder`], or from a JSON file:
///
/// ```json
/// {
///     "staging_dir": "/data/cache/models",
///     "clips_dir": "/data/cache/clips",
///     "sample_rate": 32000
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct PipelineConfig {
    /// Private directory model assets are byte-copied into before init.
    pub staging_dir: PathBuf,
    /// Directory synthesized WAV clips are written to.
    pub clips_dir: PathBuf,
    /// Encoder sample rate. Must match the vocoder's output rate.
    #[serde(default = "default_sample_rate")]
    #[builder(default = "SAMPLE_RATE")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    SAMPLE_RATE
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SynthesisError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_the_sample_rate() {
        let config = PipelineConfigBuilder::default()
            .staging_dir("/tmp/staging")
            .clips_dir("/tmp/clips")
            .build()
            .unwrap();
        assert_eq!(config.sample_rate, SAMPLE_RATE);
        assert_eq!(config.clips_dir, PathBuf::from("/tmp/clips"));
    }

    #[test]
    fn json_without_sample_rate_uses_default() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"staging_dir": "/a", "clips_dir": "/b"}"#).unwrap();
        assert_eq!(config.sample_rate, SAMPLE_RATE);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = PipelineConfig {
            staging_dir: PathBuf::from("/a"),
            clips_dir: PathBuf::from("/b"),
            sample_rate: 24000,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sample_rate, 24000);
        assert_eq!(back.staging_dir, config.staging_dir);
    }
}
