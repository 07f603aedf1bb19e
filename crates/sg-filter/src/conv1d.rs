use sg_core::{BorderMode, map_index};

/// Correlates `signal` with a symmetric odd-length `kernel` of the given radius.
pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    if n <= 2 * radius {
        convolve_mapped(signal, kernel, radius, border, out);
        return;
    }

    // Borders go through index mapping, the interior reads windows directly.
    for i in (0..radius).chain(n - radius..n) {
        out[i] = mapped_sample(signal, kernel, radius, border, i);
    }
    for (window, out_i) in signal.windows(kernel.len()).zip(&mut out[radius..n - radius]) {
        *out_i = window.iter().zip(kernel).map(|(s, k)| s * k).sum();
    }
}

fn convolve_mapped(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    for (i, out_i) in out.iter_mut().enumerate() {
        *out_i = mapped_sample(signal, kernel, radius, border, i);
    }
}

#[inline]
fn mapped_sample(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    i: usize,
) -> f32 {
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let pos = i as isize + k as isize - radius as isize;
        let v = match map_index(pos, signal.len(), border) {
            Some(idx) => signal[idx],
            None => match border {
                BorderMode::Constant(c) => *c,
                _ => 0.0,
            },
        };
        acc += v * kv;
    }
    acc
}
