//! Dirichlet-noise sampling for root-prior exploration. `rand` has no
//! distribution crate in this dependency stack (no `rand_distr`), so the
//! underlying Gamma draws are hand-rolled via Marsaglia-Tsang, boosted for
//! shape parameters below 1 (which is the common case here: `alpha = 0.03 *
//! 19*19 / |legal moves|` is usually well under 1 for realistic branching
//! factors).

use std::f64::consts::PI;

use rand::Rng;

fn sample_standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn sample_gamma(rng: &mut impl Rng, shape: f64) -> f64 {
    if shape < 1.0 {
        let u: f64 = rng.gen();
        return sample_gamma(rng, shape + 1.0) * u.powf(1.0 / shape);
    }
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = sample_standard_normal(rng);
        let v = (1.0 + c * x).powi(3);
        if v <= 0.0 {
            continue;
        }
        let u: f64 = rng.gen();
        if u.ln() < 0.5 * x * x + d - d * v + d * v.ln() {
            return d * v;
        }
    }
}

/// Draws `n` samples from `Dirichlet(alpha, alpha, ..., alpha)`.
pub fn sample_dirichlet(rng: &mut impl Rng, alpha: f64, n: usize) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    let samples: Vec<f64> = (0..n).map(|_| sample_gamma(rng, alpha)).collect();
    let sum: f64 = samples.iter().sum();
    if sum <= 0.0 {
        return vec![1.0 / n as f32; n];
    }
    samples.into_iter().map(|x| (x / sum) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn samples_sum_to_one() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let sample = sample_dirichlet(&mut rng, 0.5, 20);
        assert_eq!(sample.len(), 20);
        let sum: f32 = sample.iter().sum();
        assert!((sum - 1.0).abs() < 1e-3);
        assert!(sample.iter().all(|&x| x >= 0.0));
    }
}
