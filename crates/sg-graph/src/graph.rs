use sg_core::{Index3, Volume};

use crate::build::{GraphBuildConfig, build_skeleton_graph};

/// 1-based id of a skeleton voxel, assigned in raster order.
pub type NodeId = usize;
/// 1-based id of a connected skeleton, assigned in order of its first voxel.
pub type SkeletonId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Degree 0.
    Isolated,
    /// Degree 1.
    End,
    /// Degree 2: interior of a branch.
    Path,
    /// Degree 3 or more.
    Junction,
}

impl NodeKind {
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 => NodeKind::Isolated,
            1 => NodeKind::End,
            2 => NodeKind::Path,
            _ => NodeKind::Junction,
        }
    }
}

/// Voxel path between two graph nodes.
///
/// `path` starts at `src` and ends at `dst`, both inclusive. For a cycle
/// `src == dst` and the anchor voxel appears at both ends of `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub skeleton_id: SkeletonId,
    pub src: NodeId,
    pub dst: NodeId,
    pub path: Vec<Index3>,
    pub is_cycle: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SkeletonGraph {
    pub shape: Index3,
    /// Voxel index of node `id` at position `id - 1`.
    pub voxels: Vec<Index3>,
    /// Linked neighbors of node `id` at position `id - 1`, ascending.
    pub adjacency: Vec<Vec<NodeId>>,
    pub skeleton_ids: Vec<SkeletonId>,
    pub branches: Vec<Branch>,
}

impl SkeletonGraph {
    /// Same as [`build_skeleton_graph`].
    pub fn build(skeleton: &Volume<u8>, cfg: &GraphBuildConfig) -> Self {
        build_skeleton_graph(skeleton, cfg)
    }

    pub fn num_nodes(&self) -> usize {
        self.voxels.len()
    }

    pub fn num_skeletons(&self) -> usize {
        self.skeleton_ids.iter().copied().max().unwrap_or(0)
    }

    pub fn voxel(&self, id: NodeId) -> Index3 {
        self.voxels[id - 1]
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.adjacency[id - 1].len()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        NodeKind::from_degree(self.degree(id))
    }

    pub fn skeleton_of(&self, id: NodeId) -> SkeletonId {
        self.skeleton_ids[id - 1]
    }

    pub fn num_junctions(&self) -> usize {
        self.count_kind(NodeKind::Junction)
    }

    pub fn num_ends(&self) -> usize {
        self.count_kind(NodeKind::End)
    }

    pub fn iter_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    fn count_kind(&self, kind: NodeKind) -> usize {
        (1..=self.num_nodes()).filter(|&id| self.kind(id) == kind).count()
    }
}
