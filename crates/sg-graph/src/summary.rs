use sg_core::{Coord3, Index3, Spacing, Volume, euclidean};

use crate::graph::{Branch, NodeId, SkeletonGraph, SkeletonId};

/// Classification of a branch by the kinds of its end nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BranchType {
    EndpointToEndpoint = 0,
    JunctionToEndpoint = 1,
    JunctionToJunction = 2,
    IsolatedCycle = 3,
}

impl BranchType {
    pub fn code(self) -> u8 {
        self as u8
    }

    fn classify(branch: &Branch, src_degree: usize, dst_degree: usize) -> Self {
        if branch.is_cycle || branch.src == branch.dst {
            return Self::IsolatedCycle;
        }
        match (src_degree == 1, dst_degree == 1) {
            (true, true) => Self::EndpointToEndpoint,
            (true, false) | (false, true) => Self::JunctionToEndpoint,
            (false, false) => Self::JunctionToJunction,
        }
    }
}

/// One summarized branch. Field order follows [`BRANCH_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRecord {
    pub skeleton_id: SkeletonId,
    pub node_id_src: NodeId,
    pub node_id_dst: NodeId,
    pub branch_distance: f64,
    pub branch_type: BranchType,
    pub mean_pixel_value: f64,
    pub stdev_pixel_value: f64,
    pub image_coord_src: Index3,
    pub image_coord_dst: Index3,
    pub coord_src: Coord3,
    pub coord_dst: Coord3,
    pub euclidean_distance: f64,
}

pub const BRANCH_COLUMNS: [&str; 20] = [
    "skeleton-id",
    "node-id-src",
    "node-id-dst",
    "branch-distance",
    "branch-type",
    "mean-pixel-value",
    "stdev-pixel-value",
    "image-coord-src-0",
    "image-coord-src-1",
    "image-coord-src-2",
    "image-coord-dst-0",
    "image-coord-dst-1",
    "image-coord-dst-2",
    "coord-src-0",
    "coord-src-1",
    "coord-src-2",
    "coord-dst-0",
    "coord-dst-1",
    "coord-dst-2",
    "euclidean-distance",
];

/// Branch summary, one row per branch. A row's position is its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchTable {
    pub rows: Vec<BranchRecord>,
}

impl BranchTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<BranchRecord> for BranchTable {
    fn from_iter<I: IntoIterator<Item = BranchRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Summarizes every branch of `graph`.
///
/// Pixel statistics are taken from `skeleton` along each branch path;
/// distances and `coord-*` columns are scaled by `spacing`.
pub fn summarize(graph: &SkeletonGraph, skeleton: &Volume<u8>, spacing: &Spacing) -> BranchTable {
    graph
        .iter_branches()
        .map(|branch| summarize_branch(graph, branch, skeleton, spacing))
        .collect()
}

fn summarize_branch(
    graph: &SkeletonGraph,
    branch: &Branch,
    skeleton: &Volume<u8>,
    spacing: &Spacing,
) -> BranchRecord {
    let src_voxel = graph.voxel(branch.src);
    let dst_voxel = graph.voxel(branch.dst);
    let coord_src = spacing.scale(src_voxel);
    let coord_dst = spacing.scale(dst_voxel);

    let branch_distance = branch
        .path
        .windows(2)
        .map(|w| euclidean(spacing.scale(w[0]), spacing.scale(w[1])))
        .sum();

    let values: Vec<f64> = branch
        .path
        .iter()
        .map(|&idx| skeleton.get(idx).copied().unwrap_or(0) as f64)
        .collect();
    let (mean, stdev) = mean_stdev(&values);

    BranchRecord {
        skeleton_id: branch.skeleton_id,
        node_id_src: branch.src,
        node_id_dst: branch.dst,
        branch_distance,
        branch_type: BranchType::classify(
            branch,
            graph.degree(branch.src),
            graph.degree(branch.dst),
        ),
        mean_pixel_value: mean,
        stdev_pixel_value: stdev,
        image_coord_src: src_voxel,
        image_coord_dst: dst_voxel,
        coord_src,
        coord_dst,
        euclidean_distance: euclidean(coord_src, coord_dst),
    }
}

/// Population mean and standard deviation; `(0, 0)` for no samples.
fn mean_stdev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}
