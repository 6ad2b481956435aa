use chirpfft::convolve::{circular_convolve, linear_convolve};
use chirpfft::{Complex64, DftEngine, Normalization};

fn noise(n: usize, seed: u64) -> Vec<Complex64> {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

fn max_abs_diff(a: &[Complex64], b: &[Complex64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x.re - y.re).abs().max((x.im - y.im).abs()))
        .fold(0.0, f64::max)
}

// Direct circular convolution sum.
fn naive_circular(x: &[Complex64], y: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            let mut sum = Complex64::zero();
            for j in 0..n {
                sum = sum + x[j] * y[(n + k - j) % n];
            }
            sum
        })
        .collect()
}

// Direct linear convolution sum.
fn naive_linear(x: &[Complex64], y: &[Complex64]) -> Vec<Complex64> {
    let mut out = vec![Complex64::zero(); x.len() + y.len() - 1];
    for (i, &xi) in x.iter().enumerate() {
        for (j, &yj) in y.iter().enumerate() {
            out[i + j] = out[i + j] + xi * yj;
        }
    }
    out
}

#[test]
fn circular_matches_naive_sum() {
    let engine = DftEngine::<f64>::default();
    let x = noise(8, 1);
    let y = noise(8, 2);
    let fast = circular_convolve(&engine, &x, &y).unwrap();
    let slow = naive_circular(&x, &y);
    assert!(max_abs_diff(&fast, &slow) < 1e-9);
}

// Convolution theorem: pointwise spectrum product equals the circular
// convolution, whichever side the transform is performed on.
#[test]
fn convolution_theorem_holds() {
    let engine = DftEngine::<f64>::new(Normalization::None);
    let n = 16;
    let x = noise(n, 3);
    let y = noise(n, 4);

    let conv = circular_convolve(&engine, &x, &y).unwrap();

    let mut fx = x.clone();
    let mut fy = y.clone();
    engine.forward(&mut fx).unwrap();
    engine.forward(&mut fy).unwrap();
    let mut product: Vec<Complex64> = fx.iter().zip(fy.iter()).map(|(&a, &b)| a * b).collect();
    engine.inverse(&mut product).unwrap();
    // None convention leaves the inverse unscaled.
    for c in product.iter_mut() {
        *c = c.scale(1.0 / n as f64);
    }

    assert!(max_abs_diff(&conv, &product) < 1e-9);
}

#[test]
fn linear_matches_naive_sum() {
    let engine = DftEngine::<f64>::default();
    let x = noise(5, 10);
    let y = noise(3, 11);
    let fast = linear_convolve(&engine, &x, &y).unwrap();
    let slow = naive_linear(&x, &y);
    assert_eq!(fast.len(), 7);
    assert!(max_abs_diff(&fast, &slow) < 1e-9);
}

#[test]
fn linear_handles_unequal_lengths() {
    let engine = DftEngine::<f64>::default();
    let x = noise(9, 20);
    let y = noise(4, 21);
    let fast = linear_convolve(&engine, &x, &y).unwrap();
    let slow = naive_linear(&x, &y);
    assert_eq!(fast.len(), 12);
    assert!(max_abs_diff(&fast, &slow) < 1e-9);
}

#[test]
fn linear_single_sample_scales() {
    let engine = DftEngine::<f64>::default();
    let x = noise(6, 30);
    let y = [Complex64::new(2.0, 0.0)];
    let out = linear_convolve(&engine, &x, &y).unwrap();
    let expected: Vec<Complex64> = x.iter().map(|c| c.scale(2.0)).collect();
    assert!(max_abs_diff(&out, &expected) < 1e-9);
}
