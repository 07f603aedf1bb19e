use std::collections::HashSet;

use sg_core::{Index3, Volume};

use crate::graph::{Branch, NodeId, SkeletonGraph, SkeletonId};

/// Links use 26-connectivity: face, edge and corner neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphBuildConfig {
    /// Drop an edge or corner link when both voxels already touch a common
    /// set voxel lying between them, so a staircase step does not form a
    /// triangle of degree-2 voxels.
    pub prune_diagonal_links: bool,
}

impl Default for GraphBuildConfig {
    fn default() -> Self {
        Self {
            prune_diagonal_links: true,
        }
    }
}

pub fn build_skeleton_graph(skeleton: &Volume<u8>, cfg: &GraphBuildConfig) -> SkeletonGraph {
    let shape = skeleton.shape();

    let mut id_at = vec![0usize; skeleton.len()];
    let mut voxels = Vec::new();
    for (i, &v) in skeleton.data().iter().enumerate() {
        if v != 0 {
            voxels.push(skeleton.unravel(i));
            id_at[i] = voxels.len();
        }
    }

    if voxels.is_empty() {
        return SkeletonGraph {
            shape,
            ..SkeletonGraph::default()
        };
    }

    let offsets = neighbor_offsets();
    let adjacency: Vec<Vec<NodeId>> = voxels
        .iter()
        .map(|&idx| {
            let mut linked: Vec<NodeId> = offsets
                .iter()
                .filter_map(|&o| {
                    linked_neighbor(idx, o, skeleton, &id_at, cfg.prune_diagonal_links)
                })
                .collect();
            linked.sort_unstable();
            linked
        })
        .collect();

    let skeleton_ids = label_skeletons(&adjacency);

    let mut graph = SkeletonGraph {
        shape,
        voxels,
        adjacency,
        skeleton_ids,
        branches: Vec::new(),
    };
    graph.branches = trace_branches(&graph);
    graph
}

/// Connected components over the link graph, numbered from 1 in id order.
fn label_skeletons(adjacency: &[Vec<NodeId>]) -> Vec<SkeletonId> {
    let mut labels = vec![0; adjacency.len()];
    let mut next = 0;
    let mut stack = Vec::new();

    for start in 1..=adjacency.len() {
        if labels[start - 1] != 0 {
            continue;
        }

        next += 1;
        labels[start - 1] = next;
        stack.push(start);
        while let Some(id) = stack.pop() {
            for &nb in &adjacency[id - 1] {
                if labels[nb - 1] == 0 {
                    labels[nb - 1] = next;
                    stack.push(nb);
                }
            }
        }
    }

    labels
}

fn trace_branches(graph: &SkeletonGraph) -> Vec<Branch> {
    let mut branches = Vec::new();
    let mut used: HashSet<(NodeId, NodeId)> = HashSet::new();

    // Paths that start at an end or junction voxel.
    for start in 1..=graph.num_nodes() {
        let degree = graph.degree(start);
        if degree == 0 || degree == 2 {
            continue;
        }

        for &first in &graph.adjacency[start - 1] {
            if used.contains(&link_key(start, first)) {
                continue;
            }
            let path = walk(graph, start, first, &mut used);
            let dst = path.last().copied().unwrap_or(start);
            branches.push(Branch {
                skeleton_id: graph.skeleton_of(start),
                src: start,
                dst,
                path: path.iter().map(|&id| graph.voxel(id)).collect(),
                is_cycle: false,
            });
        }
    }

    // Whatever is left consists of degree-2 voxels only: isolated cycles.
    for anchor in 1..=graph.num_nodes() {
        if graph.degree(anchor) != 2 {
            continue;
        }
        let Some(&first) = graph.adjacency[anchor - 1]
            .iter()
            .find(|&&nb| !used.contains(&link_key(anchor, nb)))
        else {
            continue;
        };

        let path = walk(graph, anchor, first, &mut used);
        let dst = path.last().copied().unwrap_or(anchor);
        branches.push(Branch {
            skeleton_id: graph.skeleton_of(anchor),
            src: anchor,
            dst,
            path: path.iter().map(|&id| graph.voxel(id)).collect(),
            is_cycle: dst == anchor,
        });
    }

    branches
}

/// Follows degree-2 voxels from `start` through `first` until a voxel of
/// another degree is reached or the walk returns to `start`.
fn walk(
    graph: &SkeletonGraph,
    start: NodeId,
    first: NodeId,
    used: &mut HashSet<(NodeId, NodeId)>,
) -> Vec<NodeId> {
    let mut path = vec![start];
    let mut prev = start;
    let mut cur = first;

    for _ in 0..=graph.num_nodes() {
        used.insert(link_key(prev, cur));
        path.push(cur);

        if cur == start || graph.degree(cur) != 2 {
            break;
        }

        let Some(&next) = graph.adjacency[cur - 1]
            .iter()
            .find(|&&nb| nb != prev && !used.contains(&link_key(cur, nb)))
        else {
            break;
        };

        prev = cur;
        cur = next;
    }

    path
}

#[inline]
fn link_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b { (a, b) } else { (b, a) }
}

fn neighbor_offsets() -> Vec<[isize; 3]> {
    let mut out = Vec::with_capacity(26);
    for dp in -1isize..=1 {
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if [dp, dr, dc] != [0, 0, 0] {
                    out.push([dp, dr, dc]);
                }
            }
        }
    }
    out
}

#[inline]
fn shifted(idx: Index3, o: [isize; 3], shape: Index3) -> Option<Index3> {
    let mut out = [0usize; 3];
    for k in 0..3 {
        let v = idx[k] as isize + o[k];
        if v < 0 || v as usize >= shape[k] {
            return None;
        }
        out[k] = v as usize;
    }
    Some(out)
}

fn linked_neighbor(
    idx: Index3,
    o: [isize; 3],
    skeleton: &Volume<u8>,
    id_at: &[usize],
    prune_diagonal_links: bool,
) -> Option<NodeId> {
    let shape = skeleton.shape();
    let nb = shifted(idx, o, shape)?;
    let id = id_at[skeleton.linear(nb)];
    if id == 0 {
        return None;
    }

    if prune_diagonal_links && o.iter().filter(|&&v| v != 0).count() >= 2 {
        // Proper sub-steps of `o`: zero out a non-empty, non-full subset of
        // its nonzero axes.
        for mask in 1u8..7 {
            let step = [
                if mask & 1 != 0 { o[0] } else { 0 },
                if mask & 2 != 0 { o[1] } else { 0 },
                if mask & 4 != 0 { o[2] } else { 0 },
            ];
            if step == o || step == [0, 0, 0] {
                continue;
            }
            let between = shifted(idx, step, shape)
                .is_some_and(|s| id_at[skeleton.linear(s)] != 0);
            if between {
                return None;
            }
        }
    }

    Some(id)
}
