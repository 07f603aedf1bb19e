use sg_core::Coord3;
use sg_graph::{BRANCH_COLUMNS, BranchType, NodeId, SkeletonId};

/// Branch row as exported: raw pixel columns dropped, summary index kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRow {
    pub index: usize,
    pub skeleton_id: SkeletonId,
    pub node_id_src: NodeId,
    pub node_id_dst: NodeId,
    pub branch_distance: f64,
    pub branch_type: BranchType,
    pub coord_src: Coord3,
    pub coord_dst: Coord3,
    pub euclidean_distance: f64,
}

/// Summary columns left out of the branch export.
pub const DROPPED_BRANCH_COLUMNS: [&str; 8] = [
    "mean-pixel-value",
    "stdev-pixel-value",
    "image-coord-src-0",
    "image-coord-src-1",
    "image-coord-src-2",
    "image-coord-dst-0",
    "image-coord-dst-1",
    "image-coord-dst-2",
];

impl BranchRow {
    /// Summary columns in summary order, minus [`DROPPED_BRANCH_COLUMNS`].
    pub fn export_columns() -> Vec<&'static str> {
        BRANCH_COLUMNS
            .into_iter()
            .filter(|c| !DROPPED_BRANCH_COLUMNS.contains(c))
            .collect()
    }
}

/// One side of a branch projected onto source-side column names, still
/// carrying the summary index of the branch it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProjectionRow {
    pub index: usize,
    pub node_id: NodeId,
    pub coord: Coord3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub node_id: NodeId,
    pub coord: Coord3,
}

impl NodeRow {
    pub const COLUMNS: [&'static str; 4] =
        ["node-id-src", "coord-src-0", "coord-src-1", "coord-src-2"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRow {
    pub index: usize,
    pub node_id_src: NodeId,
    pub node_id_dst: NodeId,
}

impl EdgeRow {
    pub const COLUMNS: [&'static str; 2] = ["node-id-src", "node-id-dst"];
}
