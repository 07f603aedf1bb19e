use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("no TIFF slices accepted from {}", .0.display())]
    NoInput(PathBuf),
    #[error("unsupported input entry {}", .0.display())]
    UnsupportedInput(PathBuf),
    #[error("image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("stacking slices from {}: {source}", dir.display())]
    SliceShape {
        dir: PathBuf,
        #[source]
        source: sg_core::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("parsing config {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Raster(#[from] sg_core::Error),
    #[error(transparent)]
    Export(#[from] sg_table::ExportError),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn image(path: impl Into<PathBuf>) -> impl FnOnce(image::ImageError) -> Self {
        let path = path.into();
        move |source| Self::Image { path, source }
    }
}
