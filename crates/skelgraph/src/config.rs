use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sg_core::{BorderMode, Spacing};
use sg_graph::GraphBuildConfig;

use crate::error::{PipelineError, Result};

/// What to do with directory entries that are not TIFF files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Log a warning and move on.
    #[default]
    Skip,
    /// Fail with [`PipelineError::UnsupportedInput`].
    Abort,
}

/// How smoothing extends a slice past its edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingBorder {
    /// Replicate the edge pixel.
    #[default]
    Nearest,
    /// Reflect about the edge pixel without repeating it.
    Mirror,
    /// Pad with `smoothing_cval`.
    Constant,
}

/// Settings for one pipeline run. Every key is optional in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    /// Created if absent; preprocessed slices are written here.
    pub staging_dir: PathBuf,
    pub output_dir: PathBuf,
    pub smoothing_sigma: f32,
    pub smoothing_border: SmoothingBorder,
    /// Fill value for [`SmoothingBorder::Constant`], in unit intensity.
    pub smoothing_cval: f32,
    /// Smoothed 8-bit values strictly above this become `threshold_high`.
    pub threshold_low: u8,
    pub threshold_high: u8,
    /// Physical voxel size as `(plane, row, col)`.
    pub spacing: [f64; 3],
    pub input_policy: InputPolicy,
    pub prune_diagonal_links: bool,
    /// Also write the per-side node projections.
    pub write_node_projections: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("7_Tiff"),
            staging_dir: PathBuf::from("7_Tiff_"),
            output_dir: PathBuf::from("."),
            smoothing_sigma: 0.5,
            smoothing_border: SmoothingBorder::Nearest,
            smoothing_cval: 0.0,
            threshold_low: 250,
            threshold_high: 255,
            spacing: [1.0; 3],
            input_policy: InputPolicy::Skip,
            prune_diagonal_links: true,
            write_node_projections: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Reads a JSON config file; missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(PipelineError::io(path))?;
        let cfg = Self::from_json_str(&text).map_err(|source| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.smoothing_sigma.is_finite() || self.smoothing_sigma < 0.0 {
            return Err(PipelineError::Config(format!(
                "smoothing_sigma must be finite and >= 0, got {}",
                self.smoothing_sigma
            )));
        }
        if !self.smoothing_cval.is_finite() {
            return Err(PipelineError::Config(format!(
                "smoothing_cval must be finite, got {}",
                self.smoothing_cval
            )));
        }
        Spacing::new(self.spacing).map_err(|e| PipelineError::Config(e.to_string()))?;
        if self.input_dir == self.staging_dir {
            return Err(PipelineError::Config(format!(
                "staging_dir must differ from input_dir ({})",
                self.input_dir.display()
            )));
        }
        Ok(())
    }

    pub fn spacing(&self) -> Result<Spacing> {
        Spacing::new(self.spacing).map_err(|e| PipelineError::Config(e.to_string()))
    }

    pub fn border_mode(&self) -> BorderMode<f32> {
        match self.smoothing_border {
            SmoothingBorder::Nearest => BorderMode::Nearest,
            SmoothingBorder::Mirror => BorderMode::Mirror,
            SmoothingBorder::Constant => BorderMode::Constant(self.smoothing_cval),
        }
    }

    pub fn graph_build_config(&self) -> GraphBuildConfig {
        GraphBuildConfig {
            prune_diagonal_links: self.prune_diagonal_links,
        }
    }
}
