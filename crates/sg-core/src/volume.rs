use crate::{Error, Image, ImageView, Index3};

/// Dense 3D raster indexed as `(plane, row, col)`.
///
/// Plane `p` holds the `p`-th slice of the stack; within a plane the layout
/// is the row-major layout of [`Image`].
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    planes: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Volume<T> {
    pub fn from_vec(planes: usize, rows: usize, cols: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = planes
            .checked_mul(rows)
            .and_then(|v| v.checked_mul(cols))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            planes,
            rows,
            cols,
            data,
        })
    }

    /// Stacks slices in the given order. All slices must share one size.
    ///
    /// An empty iterator produces a `0 x 0 x 0` volume.
    pub fn from_slices(slices: impl IntoIterator<Item = Image<T>>) -> Result<Self, Error> {
        let mut data = Vec::new();
        let mut shape: Option<(usize, usize)> = None;
        let mut planes = 0;

        for (index, slice) in slices.into_iter().enumerate() {
            let dims = slice.dims();
            match shape {
                None => shape = Some(dims),
                Some(expected) if expected != dims => {
                    return Err(Error::SliceShape {
                        index,
                        expected,
                        actual: dims,
                    });
                }
                Some(_) => {}
            }
            data.extend(slice.into_vec());
            planes += 1;
        }

        let (cols, rows) = shape.unwrap_or((0, 0));
        Ok(Self {
            planes,
            rows,
            cols,
            data,
        })
    }

    pub fn planes(&self) -> usize {
        self.planes
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Index3 {
        [self.planes, self.rows, self.cols]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn linear(&self, idx: Index3) -> usize {
        (idx[0] * self.rows + idx[1]) * self.cols + idx[2]
    }

    #[inline]
    pub fn unravel(&self, i: usize) -> Index3 {
        let plane_len = self.rows * self.cols;
        [i / plane_len, (i % plane_len) / self.cols, i % self.cols]
    }

    pub fn get(&self, idx: Index3) -> Option<&T> {
        if idx[0] >= self.planes || idx[1] >= self.rows || idx[2] >= self.cols {
            return None;
        }
        self.data.get(self.linear(idx))
    }

    pub fn get_mut(&mut self, idx: Index3) -> Option<&mut T> {
        if idx[0] >= self.planes || idx[1] >= self.rows || idx[2] >= self.cols {
            return None;
        }
        let i = self.linear(idx);
        self.data.get_mut(i)
    }

    pub fn plane(&self, p: usize) -> ImageView<'_, T> {
        assert!(p < self.planes, "plane index out of bounds");
        let len = self.rows * self.cols;
        ImageView::from_slice(self.cols, self.rows, &self.data[p * len..(p + 1) * len])
            .expect("plane slice matches plane dimensions")
    }
}

impl<T: Clone> Volume<T> {
    pub fn new_fill(planes: usize, rows: usize, cols: usize, value: T) -> Self {
        let len = planes
            .checked_mul(rows)
            .and_then(|v| v.checked_mul(cols))
            .expect("volume size overflow");
        Self {
            planes,
            rows,
            cols,
            data: vec![value; len],
        }
    }
}

impl Volume<u8> {
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
