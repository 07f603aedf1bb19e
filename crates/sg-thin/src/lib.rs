//! 3D topological thinning of binary volumes.
//!
//! Voxels are treated as set when `> 0`. Output voxels are `0` or `1`.
//!
//! The thinning follows the directional scheme of Lee, Kashyap and Chu
//! (1994): each pass sweeps the six face directions in turn, collects border
//! voxels that are neither line ends, nor Euler-variant, nor non-simple, and
//! then deletes them one at a time, re-checking simplicity before each
//! deletion so that parallel candidates cannot disconnect the object.
//! Thinning stops once a full pass over all six directions removes nothing.

mod topology;

pub use topology::{
    CENTER, Neighborhood, is_endpoint, is_euler_invariant, is_simple_point, offset_of,
};

use sg_core::Volume;

/// Face directions swept per pass, as `(plane, row, col)` offsets.
const BORDER_DIRS: [[isize; 3]; 6] = [
    [0, 0, -1],
    [0, 0, 1],
    [0, 1, 0],
    [0, -1, 0],
    [1, 0, 0],
    [-1, 0, 0],
];

pub fn skeletonize(src: &Volume<u8>) -> Volume<u8> {
    let [planes, rows, cols] = src.shape();
    let mut out = Volume::new_fill(planes, rows, cols, 0u8);
    if src.is_empty() {
        return out;
    }

    // One voxel of zero padding keeps every neighborhood in bounds.
    let mut img = Volume::new_fill(planes + 2, rows + 2, cols + 2, 0u8);
    let mut active = Vec::new();
    for (i, &v) in src.data().iter().enumerate() {
        if v == 0 {
            continue;
        }
        let [p, r, c] = src.unravel(i);
        let j = img.linear([p + 1, r + 1, c + 1]);
        img.data_mut()[j] = 1;
        active.push(j);
    }

    let plane_stride = ((rows + 2) * (cols + 2)) as isize;
    let row_stride = (cols + 2) as isize;
    let stride = |o: [isize; 3]| o[0] * plane_stride + o[1] * row_stride + o[2];

    let mut deltas = [0isize; 27];
    for (k, d) in deltas.iter_mut().enumerate() {
        *d = stride(offset_of(k));
    }

    let mut candidates = Vec::new();
    let mut unchanged_dirs = 0;
    while unchanged_dirs < BORDER_DIRS.len() {
        unchanged_dirs = 0;

        for dir in BORDER_DIRS {
            let step = stride(dir);

            candidates.clear();
            for &i in &active {
                if img.data()[(i as isize + step) as usize] != 0 {
                    continue;
                }

                let nb = neighborhood(img.data(), i, &deltas);
                if is_endpoint(&nb) || !is_euler_invariant(&nb) || !is_simple_point(&nb) {
                    continue;
                }
                candidates.push(i);
            }

            let mut changed = false;
            for &i in &candidates {
                let nb = neighborhood(img.data(), i, &deltas);
                if is_simple_point(&nb) {
                    img.data_mut()[i] = 0;
                    changed = true;
                }
            }

            if changed {
                active.retain(|&i| img.data()[i] != 0);
            } else {
                unchanged_dirs += 1;
            }
        }
    }

    for &i in &active {
        let [p, r, c] = img.unravel(i);
        let j = out.linear([p - 1, r - 1, c - 1]);
        out.data_mut()[j] = 1;
    }

    out
}

#[inline]
fn neighborhood(data: &[u8], center: usize, deltas: &[isize; 27]) -> Neighborhood {
    let mut nb = [false; 27];
    for (flag, &d) in nb.iter_mut().zip(deltas) {
        *flag = data[(center as isize + d) as usize] != 0;
    }
    nb
}

#[cfg(test)]
mod tests {
    use sg_core::Volume;

    use crate::skeletonize;

    fn solid_box(planes: usize, rows: usize, cols: usize, margin: usize) -> Volume<u8> {
        let mut vol = Volume::new_fill(planes + 2 * margin, rows + 2 * margin, cols + 2 * margin, 0);
        for p in 0..planes {
            for r in 0..rows {
                for c in 0..cols {
                    *vol
                        .get_mut([p + margin, r + margin, c + margin])
                        .expect("in-bounds box voxel") = 255;
                }
            }
        }
        vol
    }

    fn components_26(vol: &Volume<u8>) -> usize {
        let [planes, rows, cols] = vol.shape();
        let mut seen = vec![false; vol.len()];
        let mut stack = Vec::new();
        let mut count = 0;

        for start in 0..vol.len() {
            if vol.data()[start] == 0 || seen[start] {
                continue;
            }
            count += 1;
            seen[start] = true;
            stack.push(start);
            while let Some(i) = stack.pop() {
                let [p, r, c] = vol.unravel(i);
                for dp in -1isize..=1 {
                    for dr in -1isize..=1 {
                        for dc in -1isize..=1 {
                            let (np, nr, nc) = (p as isize + dp, r as isize + dr, c as isize + dc);
                            if np < 0 || nr < 0 || nc < 0 {
                                continue;
                            }
                            let idx = [np as usize, nr as usize, nc as usize];
                            if idx[0] >= planes || idx[1] >= rows || idx[2] >= cols {
                                continue;
                            }
                            let j = vol.linear(idx);
                            if vol.data()[j] != 0 && !seen[j] {
                                seen[j] = true;
                                stack.push(j);
                            }
                        }
                    }
                }
            }
        }

        count
    }

    #[test]
    fn empty_volume_stays_empty() {
        let vol = Volume::<u8>::from_slices(Vec::new()).expect("empty volume");
        assert!(skeletonize(&vol).is_empty());
    }

    #[test]
    fn single_voxel_is_kept() {
        let vol = solid_box(1, 1, 1, 1);
        let out = skeletonize(&vol);
        assert_eq!(out.count_nonzero(), 1);
        assert_eq!(out.get([1, 1, 1]), Some(&1));
    }

    #[test]
    fn one_voxel_line_is_already_thin() {
        let vol = solid_box(1, 1, 9, 1);
        let out = skeletonize(&vol);
        assert_eq!(out.count_nonzero(), 9);
    }

    #[test]
    fn bar_thins_to_single_connected_curve() {
        let vol = solid_box(5, 5, 15, 2);
        let out = skeletonize(&vol);

        let kept = out.count_nonzero();
        assert!(kept > 0);
        assert!(kept < vol.count_nonzero() / 5);
        assert_eq!(components_26(&out), 1);

        for (a, b) in vol.data().iter().zip(out.data()) {
            assert!(*b == 0 || *a != 0, "skeleton voxel outside the object");
        }
    }

    #[test]
    fn separate_objects_stay_separate() {
        let mut vol = solid_box(3, 3, 3, 1);
        let mut far = Volume::new_fill(5, 5, 12, 0u8);
        for (i, v) in vol.data().iter().enumerate() {
            let idx = vol.unravel(i);
            *far.get_mut(idx).expect("in bounds") = *v;
        }
        for c in 7..11 {
            *far.get_mut([2, 2, c]).expect("in bounds") = 255;
        }
        vol = far;

        let out = skeletonize(&vol);
        assert_eq!(components_26(&vol), 2);
        assert_eq!(components_26(&out), 2);
    }
}
