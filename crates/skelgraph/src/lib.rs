//! Batch pipeline from a directory of grayscale TIFF slices to skeleton graph
//! spreadsheets.
//!
//! 1. [`preprocess_dir`] smooths, converts to 8-bit and thresholds every input
//!    slice, writing each one to the staging directory as `_<name>`.
//! 2. [`load_staged`] stacks the slices staged by that run, and a
//!    [`BranchExtractor`] turns the volume into a branch summary. The default
//!    [`SkeletonBranchExtractor`] thins the volume and traces its skeleton.
//! 3. The summary is filtered to junction branches and written as branch,
//!    node and edge workbooks, see [`sg_table`].
//!
//! [`run`] wires the stages together from a [`PipelineConfig`].

mod config;
mod error;
mod extract;
mod listing;
mod pipeline;
mod preprocess;
mod stage;

pub use config::{InputPolicy, PipelineConfig, SmoothingBorder};
pub use error::{PipelineError, Result};
pub use extract::{BranchExtractor, SkeletonBranchExtractor};
pub use listing::has_tiff_extension;
pub use pipeline::{PipelineReport, run, run_pipeline};
pub use preprocess::{
    STAGED_PREFIX, StagedSlice, load_unit_f32, preprocess_dir, preprocess_slice, save_tiff_u8,
    staged_name,
};
pub use stage::{load_staged, load_volume};

pub use sg_core;
pub use sg_filter;
pub use sg_graph;
pub use sg_table;
pub use sg_thin;
