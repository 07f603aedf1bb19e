use sg_core::{Image, ImageView};

/// Converts unit-range intensities to 8 bits.
///
/// Values are scaled by 255, rounded half-to-even and clamped to `0..=255`.
pub fn to_ubyte(src: &ImageView<'_, f32>) -> Image<u8> {
    src.to_image()
        .map(|&v| (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8)
}

/// Binary threshold: pixels strictly above `thresh` become `max_value`, the
/// rest become `0`.
pub fn threshold_binary_u8(src: &ImageView<'_, u8>, thresh: u8, max_value: u8) -> Image<u8> {
    src.to_image()
        .map(|&v| if v > thresh { max_value } else { 0 })
}

#[cfg(test)]
mod tests {
    use sg_core::Image;

    use super::{threshold_binary_u8, to_ubyte};

    #[test]
    fn ubyte_scales_rounds_and_clamps() {
        let img = Image::from_vec(5, 1, vec![0.0f32, 0.5, 1.0, -0.1, 1.2]).expect("valid image");
        let out = to_ubyte(&img.as_view());
        assert_eq!(out.data(), &[0, 128, 255, 0, 255]);
    }

    #[test]
    fn threshold_is_strictly_greater() {
        let img = Image::from_vec(4, 1, vec![249u8, 250, 251, 255]).expect("valid image");
        let out = threshold_binary_u8(&img.as_view(), 250, 255);
        assert_eq!(out.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn threshold_output_is_binary() {
        let data: Vec<u8> = (0..=255).collect();
        let img = Image::from_vec(16, 16, data).expect("valid image");
        let out = threshold_binary_u8(&img.as_view(), 100, 200);
        assert!(out.data().iter().all(|&v| v == 0 || v == 200));
        assert_eq!(out.data().iter().filter(|&&v| v == 200).count(), 155);
    }
}
