use crate::Error;

/// Voxel index in `(plane, row, col)` order.
pub type Index3 = [usize; 3];

/// Spacing-adjusted coordinate in `(plane, row, col)` order.
pub type Coord3 = [f64; 3];

/// Physical size of one voxel along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing([f64; 3]);

impl Spacing {
    pub fn new(axes: [f64; 3]) -> Result<Self, Error> {
        if axes.iter().all(|a| a.is_finite() && *a > 0.0) {
            Ok(Self(axes))
        } else {
            Err(Error::InvalidSpacing(axes))
        }
    }

    pub fn axes(&self) -> [f64; 3] {
        self.0
    }

    pub fn scale(&self, idx: Index3) -> Coord3 {
        [
            idx[0] as f64 * self.0[0],
            idx[1] as f64 * self.0[1],
            idx[2] as f64 * self.0[2],
        ]
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self([1.0; 3])
    }
}

pub fn euclidean(a: Coord3, b: Coord3) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    (d0 * d0 + d1 * d1 + d2 * d2).sqrt()
}
