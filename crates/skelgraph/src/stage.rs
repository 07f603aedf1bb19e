use std::path::{Path, PathBuf};

use sg_core::{Image, Volume};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::listing::{has_tiff_extension, sorted_entries};
use crate::preprocess::StagedSlice;

/// Stacks every staged TIFF in `dir` into a volume, one plane per file in
/// file-name order. All slices must share width and height.
pub fn load_volume(dir: &Path) -> Result<Volume<u8>> {
    if !dir.is_dir() {
        return Err(PipelineError::InputNotFound(dir.to_path_buf()));
    }
    let paths: Vec<PathBuf> = sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && has_tiff_extension(p))
        .collect();
    stack_slices(dir, &paths)
}

/// Stacks exactly the slices of one preprocessing run, in the order given.
///
/// Other files in `dir` are ignored, so leftovers from earlier runs never
/// reach the volume. `dir` is only used for error context.
pub fn load_staged(dir: &Path, staged: &[StagedSlice]) -> Result<Volume<u8>> {
    let paths: Vec<PathBuf> = staged.iter().map(|s| s.staged.clone()).collect();
    stack_slices(dir, &paths)
}

fn stack_slices(dir: &Path, paths: &[PathBuf]) -> Result<Volume<u8>> {
    let mut slices = Vec::with_capacity(paths.len());
    for path in paths {
        let luma = image::open(path)
            .map_err(PipelineError::image(path))?
            .to_luma8();
        let (w, h) = luma.dimensions();
        debug!(slice = %path.display(), width = w, height = h, "loaded staged slice");
        slices.push(Image::from_vec(w as usize, h as usize, luma.into_raw())?);
    }

    if slices.is_empty() {
        return Err(PipelineError::NoInput(dir.to_path_buf()));
    }

    let volume = Volume::from_slices(slices).map_err(|source| PipelineError::SliceShape {
        dir: dir.to_path_buf(),
        source,
    })?;
    info!(
        planes = volume.planes(),
        rows = volume.rows(),
        cols = volume.cols(),
        set = volume.count_nonzero(),
        "volume assembled"
    );
    Ok(volume)
}
