//! Local topology tests on a 3x3x3 neighborhood.
//!
//! The neighborhood is stored as 27 flags indexed by
//! `9 * (dp + 1) + 3 * (dr + 1) + (dc + 1)` for offsets in `-1..=1`, so the
//! center sits at index [`CENTER`]. Foreground uses 26-adjacency and
//! background 6-adjacency.

pub type Neighborhood = [bool; 27];

pub const CENTER: usize = 13;

#[inline]
pub fn offset_of(i: usize) -> [isize; 3] {
    [
        (i / 9) as isize - 1,
        ((i / 3) % 3) as isize - 1,
        (i % 3) as isize - 1,
    ]
}

#[inline]
fn index_of(o: [isize; 3]) -> usize {
    (9 * (o[0] + 1) + 3 * (o[1] + 1) + (o[2] + 1)) as usize
}

/// A voxel with exactly one set neighbor ends a line and is never removed.
pub fn is_endpoint(nb: &Neighborhood) -> bool {
    nb.iter().filter(|&&v| v).count() == 2
}

/// True when removing the center keeps the Euler characteristic.
///
/// Removing a closed unit cube `c` from `A ∪ c` leaves the Euler
/// characteristic unchanged iff `χ(A ∩ c) == 1`, where `A ∩ c` is the part of
/// the boundary of `c` covered by set neighbors. That boundary consists of 6
/// faces, 12 edges and 8 vertices, each identified by the direction from the
/// center, and a cell is covered iff some set neighbor's cube contains it.
pub fn is_euler_invariant(nb: &Neighborhood) -> bool {
    let mut chi = 0i32;
    for i in 0..27 {
        if i == CENTER {
            continue;
        }
        let d = offset_of(i);
        if !cell_covered(nb, d) {
            continue;
        }
        chi += match d.iter().filter(|&&v| v != 0).count() {
            1 => 1,  // face
            2 => -1, // edge
            _ => 1,  // vertex
        };
    }
    chi == 1
}

/// A neighbor cube at offset `o` contains boundary cell `d` iff `o` is
/// nonzero only on axes where `d` is nonzero, and agrees with `d` there.
fn cell_covered(nb: &Neighborhood, d: [isize; 3]) -> bool {
    let choices = |v: isize| -> &'static [isize] {
        match v {
            -1 => &[0, -1],
            1 => &[0, 1],
            _ => &[0],
        }
    };

    for &o0 in choices(d[0]) {
        for &o1 in choices(d[1]) {
            for &o2 in choices(d[2]) {
                let o = [o0, o1, o2];
                if o != [0, 0, 0] && nb[index_of(o)] {
                    return true;
                }
            }
        }
    }
    false
}

/// True when the set neighbors (center excluded) form exactly one
/// 26-connected component inside the neighborhood.
pub fn is_simple_point(nb: &Neighborhood) -> bool {
    let mut seen = [false; 27];
    let mut stack = Vec::with_capacity(26);
    let mut components = 0;

    for start in 0..27 {
        if start == CENTER || !nb[start] || seen[start] {
            continue;
        }

        components += 1;
        if components > 1 {
            return false;
        }

        seen[start] = true;
        stack.push(start);
        while let Some(i) = stack.pop() {
            let a = offset_of(i);
            for j in 0..27 {
                if j == CENTER || !nb[j] || seen[j] {
                    continue;
                }
                let b = offset_of(j);
                let adjacent = (0..3).all(|k| (a[k] - b[k]).abs() <= 1);
                if adjacent {
                    seen[j] = true;
                    stack.push(j);
                }
            }
        }
    }

    components == 1
}
