use sg_core::{Spacing, Volume};
use sg_graph::{BranchTable, GraphBuildConfig, SkeletonGraph, summarize};
use sg_thin::skeletonize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Turns a binary volume into a branch summary.
pub trait BranchExtractor {
    fn extract(&self, volume: &Volume<u8>) -> Result<BranchTable>;
}

impl<F> BranchExtractor for F
where
    F: Fn(&Volume<u8>) -> Result<BranchTable>,
{
    fn extract(&self, volume: &Volume<u8>) -> Result<BranchTable> {
        self(volume)
    }
}

/// Thins the volume, traces the skeleton graph and summarizes its branches.
#[derive(Debug, Clone, Default)]
pub struct SkeletonBranchExtractor {
    pub spacing: Spacing,
    pub graph: GraphBuildConfig,
}

impl SkeletonBranchExtractor {
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            spacing: cfg.spacing()?,
            graph: cfg.graph_build_config(),
        })
    }
}

impl BranchExtractor for SkeletonBranchExtractor {
    fn extract(&self, volume: &Volume<u8>) -> Result<BranchTable> {
        let skeleton = skeletonize(volume);
        let graph = SkeletonGraph::build(&skeleton, &self.graph);
        info!(
            skeleton_voxels = graph.num_nodes(),
            skeletons = graph.num_skeletons(),
            junctions = graph.num_junctions(),
            ends = graph.num_ends(),
            "skeleton traced"
        );
        Ok(summarize(&graph, &skeleton, &self.spacing))
    }
}

#[cfg(test)]
mod tests {
    use sg_core::Volume;
    use sg_graph::BranchType;

    use super::{BranchExtractor, SkeletonBranchExtractor};

    #[test]
    fn empty_volume_has_no_branches() {
        let vol = Volume::new_fill(3, 4, 4, 0u8);
        let table = SkeletonBranchExtractor::default()
            .extract(&vol)
            .expect("extract");
        assert!(table.is_empty());
    }

    #[test]
    fn thick_cross_reduces_to_junction_branches() {
        // A plus sign, three voxels thick in every direction.
        let (planes, rows, cols) = (5, 21, 21);
        let mut vol = Volume::new_fill(planes, rows, cols, 0u8);
        for p in 1..4 {
            for r in 2..19 {
                for c in 9..12 {
                    *vol.get_mut([p, r, c]).expect("in bounds") = 255;
                    *vol.get_mut([p, c, r]).expect("in bounds") = 255;
                }
            }
        }

        let table = SkeletonBranchExtractor::default()
            .extract(&vol)
            .expect("extract");
        assert!(!table.is_empty());
        assert!(table.rows.iter().all(|r| r.skeleton_id == 1));
        assert!(
            table
                .rows
                .iter()
                .any(|r| r.branch_type == BranchType::JunctionToEndpoint)
        );
    }
}
