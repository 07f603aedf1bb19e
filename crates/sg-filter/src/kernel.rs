/// Sampled, normalized 1D Gaussian kernel.
///
/// Conventions:
/// - `radius = floor(truncate * sigma + 0.5)`, so the default `truncate = 4`
///   with `sigma = 0.5` gives a 5-tap kernel.
/// - `weights` sum to 1 and are symmetric around index `radius`.
/// - `sigma == 0` yields the identity kernel `[1.0]`.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub weights: Vec<f32>,
}

pub const DEFAULT_TRUNCATE: f32 = 4.0;

impl GaussianKernel1D {
    pub fn new(sigma: f32) -> Self {
        Self::with_truncate(sigma, DEFAULT_TRUNCATE)
    }

    pub fn with_truncate(sigma: f32, truncate: f32) -> Self {
        assert!(
            sigma.is_finite() && sigma >= 0.0,
            "sigma must be >= 0 and finite"
        );
        assert!(
            truncate.is_finite() && truncate > 0.0,
            "truncate must be > 0 and finite"
        );

        if sigma == 0.0 {
            return Self {
                sigma,
                radius: 0,
                weights: vec![1.0],
            };
        }

        let radius = (truncate * sigma + 0.5) as usize;
        let sigma2 = sigma * sigma;
        let mut weights: Vec<f32> = (0..=2 * radius)
            .map(|i| {
                let x = i as f32 - radius as f32;
                (-0.5 * x * x / sigma2).exp()
            })
            .collect();

        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self {
            sigma,
            radius,
            weights,
        }
    }
}
