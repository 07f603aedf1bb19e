//! Skeleton graph extraction and branch summaries for thinned volumes.
//!
//! Every set voxel of a skeleton becomes a graph vertex with a 1-based id in
//! raster order `(plane, row, col)`. Vertex degree decides its role:
//! - degree `1`: end, degree `>= 3`: junction; both are branch endpoints;
//! - degree `2`: interior voxel traced through by a branch;
//! - components made only of degree-2 voxels are isolated cycles, anchored
//!   at their lowest id.
//!
//! Links use 26-connectivity. Edge and corner links between voxels
//! that already meet through a set voxel in between are pruned, see
//! [`GraphBuildConfig::prune_diagonal_links`].
//!
//! [`summarize`] turns the graph into a [`BranchTable`] with one row per
//! branch: ids, branch type, path length, pixel statistics and both raw and
//! spacing-adjusted end coordinates.

mod build;
mod graph;
mod summary;

pub use build::{GraphBuildConfig, build_skeleton_graph};
pub use graph::{Branch, NodeId, NodeKind, SkeletonGraph, SkeletonId};
pub use summary::{BRANCH_COLUMNS, BranchRecord, BranchTable, BranchType, summarize};
