use sg_graph::{BranchTable, BranchType};

use crate::rows::{BranchRow, EdgeRow, NodeProjectionRow, NodeRow};

/// Branch types kept in every export.
pub const RETAINED_TYPES: [BranchType; 2] = [
    BranchType::JunctionToEndpoint,
    BranchType::JunctionToJunction,
];

pub fn is_retained(branch_type: BranchType) -> bool {
    RETAINED_TYPES.contains(&branch_type)
}

/// Drops raw pixel columns and every branch whose type is not retained.
pub fn branches_export(table: &BranchTable) -> Vec<BranchRow> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| is_retained(r.branch_type))
        .map(|(index, r)| BranchRow {
            index,
            skeleton_id: r.skeleton_id,
            node_id_src: r.node_id_src,
            node_id_dst: r.node_id_dst,
            branch_distance: r.branch_distance,
            branch_type: r.branch_type,
            coord_src: r.coord_src,
            coord_dst: r.coord_dst,
            euclidean_distance: r.euclidean_distance,
        })
        .collect()
}

pub fn node_projection_src(branches: &[BranchRow]) -> Vec<NodeProjectionRow> {
    branches
        .iter()
        .map(|b| NodeProjectionRow {
            index: b.index,
            node_id: b.node_id_src,
            coord: b.coord_src,
        })
        .collect()
}

/// Destination side, renamed onto the source-side columns
/// (`node-id-dst → node-id-src`, `coord-dst-k → coord-src-k`).
pub fn node_projection_dst(branches: &[BranchRow]) -> Vec<NodeProjectionRow> {
    branches
        .iter()
        .map(|b| NodeProjectionRow {
            index: b.index,
            node_id: b.node_id_dst,
            coord: b.coord_dst,
        })
        .collect()
}

/// Unique nodes ascending by id.
///
/// Source projection rows come before destination rows, the sort is stable,
/// and the first row per id wins.
pub fn nodes_export(branches: &[BranchRow]) -> Vec<NodeRow> {
    let mut nodes: Vec<NodeRow> = node_projection_src(branches)
        .into_iter()
        .chain(node_projection_dst(branches))
        .map(|p| NodeRow {
            node_id: p.node_id,
            coord: p.coord,
        })
        .collect();

    nodes.sort_by_key(|n| n.node_id);
    nodes.dedup_by_key(|n| n.node_id);
    nodes
}

pub fn edges_export(branches: &[BranchRow]) -> Vec<EdgeRow> {
    branches
        .iter()
        .map(|b| EdgeRow {
            index: b.index,
            node_id_src: b.node_id_src,
            node_id_dst: b.node_id_dst,
        })
        .collect()
}

/// The three export tables derived from one branch summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTables {
    pub branches: Vec<BranchRow>,
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

impl ExportTables {
    pub fn from_branch_table(table: &BranchTable) -> Self {
        let branches = branches_export(table);
        let nodes = nodes_export(&branches);
        let edges = edges_export(&branches);
        Self {
            branches,
            nodes,
            edges,
        }
    }
}
