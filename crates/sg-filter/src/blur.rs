use sg_core::{BorderMode, Image, ImageView};

use crate::conv1d::convolve_f32;
use crate::kernel::GaussianKernel1D;

/// Separable 2D Gaussian smoothing: rows first, then columns.
///
/// The output has the same dimensions as the input.
pub fn gaussian_blur_f32(
    src: &ImageView<'_, f32>,
    sigma: f32,
    border: &BorderMode<f32>,
) -> Image<f32> {
    let kernel = GaussianKernel1D::new(sigma);
    let (w, h) = (src.width(), src.height());
    if w == 0 || h == 0 || kernel.radius == 0 {
        return src.to_image();
    }

    let mut tmp = Image::new_fill(w, h, 0.0f32);
    for y in 0..h {
        let out = &mut tmp.data_mut()[y * w..(y + 1) * w];
        convolve_f32(src.row(y), &kernel.weights, kernel.radius, border, out);
    }

    let mut out = Image::new_fill(w, h, 0.0f32);
    let mut column = vec![0.0f32; h];
    let mut smoothed = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = tmp.data()[y * w + x];
        }
        convolve_f32(&column, &kernel.weights, kernel.radius, border, &mut smoothed);
        for (y, &v) in smoothed.iter().enumerate() {
            out.data_mut()[y * w + x] = v;
        }
    }

    out
}
