use std::fs;
use std::path::PathBuf;

use sg_core::Index3;
use sg_table::{ExportTables, write_exports};
use tracing::{info, info_span};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::extract::{BranchExtractor, SkeletonBranchExtractor};
use crate::preprocess::{StagedSlice, preprocess_dir};
use crate::stage::load_staged;

/// What one run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub staged: Vec<StagedSlice>,
    pub volume_shape: Index3,
    /// Rows in the branch summary before filtering.
    pub summary_rows: usize,
    pub tables: ExportTables,
    pub written: Vec<PathBuf>,
}

/// Runs all three stages with the thinning-based extractor.
pub fn run(cfg: &PipelineConfig) -> Result<PipelineReport> {
    cfg.validate()?;
    let extractor = SkeletonBranchExtractor::from_config(cfg)?;
    run_pipeline(cfg, &extractor)
}

/// Preprocess, extract, export. Stops at the first error; nothing is retried.
pub fn run_pipeline<E>(cfg: &PipelineConfig, extractor: &E) -> Result<PipelineReport>
where
    E: BranchExtractor + ?Sized,
{
    cfg.validate()?;

    let staged = {
        let _span = info_span!("preprocess", input = %cfg.input_dir.display()).entered();
        preprocess_dir(cfg)?
    };

    let (volume_shape, summary) = {
        let _span = info_span!("extract", staging = %cfg.staging_dir.display()).entered();
        let volume = load_staged(&cfg.staging_dir, &staged)?;
        let summary = extractor.extract(&volume)?;
        info!(branches = summary.len(), "branch summary ready");
        (volume.shape(), summary)
    };

    let _span = info_span!("export", out = %cfg.output_dir.display()).entered();
    let tables = ExportTables::from_branch_table(&summary);
    fs::create_dir_all(&cfg.output_dir).map_err(PipelineError::io(&cfg.output_dir))?;
    let written = write_exports(&cfg.output_dir, &tables, cfg.write_node_projections)?;
    info!(
        branches = tables.branches.len(),
        nodes = tables.nodes.len(),
        edges = tables.edges.len(),
        files = written.len(),
        "exports written"
    );

    Ok(PipelineReport {
        staged,
        volume_shape,
        summary_rows: summary.len(),
        tables,
        written,
    })
}
