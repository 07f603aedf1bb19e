use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use sg_core::{Image, ImageView};
use sg_filter::{gaussian_blur_f32, threshold_binary_u8, to_ubyte};
use tracing::{debug, info, warn};

use crate::config::{InputPolicy, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::listing::{has_tiff_extension, sorted_entries};

/// Prefix prepended to a slice's file name when it is staged.
pub const STAGED_PREFIX: &str = "_";

/// One input slice after it has been written to the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSlice {
    pub source: PathBuf,
    pub staged: PathBuf,
    pub width: usize,
    pub height: usize,
}

pub fn staged_name(file_name: &OsStr) -> OsString {
    let mut name = OsString::from(STAGED_PREFIX);
    name.push(file_name);
    name
}

/// Smooths, converts to 8-bit and thresholds one unit-range slice.
pub fn preprocess_slice(src: &ImageView<'_, f32>, cfg: &PipelineConfig) -> Image<u8> {
    let smoothed = gaussian_blur_f32(src, cfg.smoothing_sigma, &cfg.border_mode());
    let ubyte = to_ubyte(&smoothed.as_view());
    threshold_binary_u8(&ubyte.as_view(), cfg.threshold_low, cfg.threshold_high)
}

/// Loads an image as single-channel intensities scaled to `0.0..=1.0` by the
/// maximum of its sample type.
pub fn load_unit_f32(path: &Path) -> Result<Image<f32>> {
    let luma = image::open(path)
        .map_err(PipelineError::image(path))?
        .to_luma32f();
    let (w, h) = luma.dimensions();
    Ok(Image::from_vec(w as usize, h as usize, luma.into_raw())?)
}

pub fn save_tiff_u8(path: &Path, img: &Image<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.data().to_vec(),
    )
    .ok_or(sg_core::Error::SizeMismatch {
        expected: img.width() * img.height(),
        actual: img.data().len(),
    })?;
    gray.save_with_format(path, ImageFormat::Tiff)
        .map_err(PipelineError::image(path))
}

/// Preprocesses every TIFF in `cfg.input_dir` into `cfg.staging_dir`.
///
/// Inputs are handled in file-name order. Entries that are not TIFF files
/// follow `cfg.input_policy`; a TIFF that cannot be decoded aborts the run.
pub fn preprocess_dir(cfg: &PipelineConfig) -> Result<Vec<StagedSlice>> {
    if !cfg.input_dir.is_dir() {
        return Err(PipelineError::InputNotFound(cfg.input_dir.clone()));
    }
    fs::create_dir_all(&cfg.staging_dir).map_err(PipelineError::io(&cfg.staging_dir))?;

    let mut staged = Vec::new();
    for path in sorted_entries(&cfg.input_dir)? {
        let Some(file_name) = path.file_name().filter(|_| path.is_file()) else {
            reject(&path, cfg.input_policy)?;
            continue;
        };
        if !has_tiff_extension(&path) {
            reject(&path, cfg.input_policy)?;
            continue;
        }

        let raw = load_unit_f32(&path)?;
        let binary = preprocess_slice(&raw.as_view(), cfg);
        let out = cfg.staging_dir.join(staged_name(file_name));
        save_tiff_u8(&out, &binary)?;
        debug!(
            source = %path.display(),
            staged = %out.display(),
            width = binary.width(),
            height = binary.height(),
            "staged slice"
        );

        staged.push(StagedSlice {
            source: path,
            staged: out,
            width: binary.width(),
            height: binary.height(),
        });
    }

    if staged.is_empty() {
        return Err(PipelineError::NoInput(cfg.input_dir.clone()));
    }
    info!(
        slices = staged.len(),
        staging = %cfg.staging_dir.display(),
        "preprocessing done"
    );
    Ok(staged)
}

fn reject(path: &Path, policy: InputPolicy) -> Result<()> {
    match policy {
        InputPolicy::Skip => {
            warn!(entry = %path.display(), "skipping non-TIFF input entry");
            Ok(())
        }
        InputPolicy::Abort => Err(PipelineError::UnsupportedInput(path.to_path_buf())),
    }
}
