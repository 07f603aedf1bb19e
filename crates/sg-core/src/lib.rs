//! Foundational raster and volume types for skeleton graph extraction.
//!
//! ## Layout
//! [`Image`] is a row-major 2D raster (`width` columns, `height` rows).
//! [`Volume`] stacks equally sized slices along a third axis and is indexed
//! as `(plane, row, col)`, matching the order slices are read from disk.
//!
//! ## Border Modes
//! Filters that reach past the raster edge choose a [`BorderMode`]:
//! nearest (edge replicate), constant fill, or mirror without repeating the
//! edge element.
//!
//! ## Spacing
//! Voxel indices are converted to physical coordinates by multiplying each
//! axis with the matching [`Spacing`] component.

mod border;
mod error;
mod geom;
mod image;
mod volume;

pub use border::{BorderMode, map_index};
pub use error::Error;
pub use geom::{Coord3, Index3, Spacing, euclidean};
pub use image::{Image, ImageView};
pub use volume::Volume;
