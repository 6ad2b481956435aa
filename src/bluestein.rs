//! Bluestein's chirp-z reduction for arbitrary transform lengths.
//!
//! The length-N DFT is rewritten as a circular convolution of chirp-modulated
//! sequences, padded to a power-of-two size the radix-2 butterfly can handle.
//! The inverse reuses the forward machinery: the unnormalized inverse sum is
//! the forward spectrum read with mirrored indices.

use alloc::vec;
use alloc::vec::Vec;

use crate::convolve;
use crate::fft::{DftEngine, Direction, FftError, MAX_TRANSFORM_LEN};
use crate::num::{Complex, Float};

/// Forward or inverse transform for any length `n >= 1`, unnormalized.
/// Numerically equivalent to the direct O(N²) DFT within floating tolerance.
pub fn transform<T: Float>(
    engine: &DftEngine<T>,
    data: &mut [Complex<T>],
    direction: Direction,
) -> Result<(), FftError> {
    let n = data.len();
    if n == 0 {
        return Err(FftError::InvalidLength);
    }
    if n > MAX_TRANSFORM_LEN {
        return Err(FftError::CapacityExceeded);
    }
    chirp_forward(engine, data)?;
    if direction == Direction::Inverse {
        // Unnormalized inverse: DFT(x)[(n-k) mod n] = Σ x_j·exp(+2πijk/n).
        // The k = n/2 iteration for even n swaps an index with itself.
        for k in 1..=(n / 2) {
            data.swap(k, n - k);
        }
        snap_to_zero(data);
    }
    Ok(())
}

/// Chirp-modulated forward transform: modulate, convolve with the chirp
/// filter at padded size m, demodulate.
fn chirp_forward<T: Float>(engine: &DftEngine<T>, data: &mut [Complex<T>]) -> Result<(), FftError> {
    let n = data.len();
    if n == 1 {
        return Ok(());
    }
    let chirp = engine.chirp(n);
    let m = n.next_power_of_two() * 4;

    let mut a: Vec<Complex<T>> = Vec::with_capacity(m);
    for (i, &x) in data.iter().enumerate() {
        a.push(x.mul(chirp[i]));
    }
    a.resize(m, Complex::zero());

    // Chirp filter: conjugate chirp mirrored into the tail so the circular
    // convolution sees it at negative lags.
    let mut b = vec![Complex::zero(); m];
    b[0] = chirp[0].conj();
    for i in 1..n {
        let c = chirp[i].conj();
        b[i] = c;
        b[m - i] = c;
    }

    let c = convolve::circular_convolve(engine, &a, &b)?;
    for (i, out) in data.iter_mut().enumerate() {
        *out = c[i].mul(chirp[i]);
    }
    snap_to_zero(data);
    Ok(())
}

/// Components whose magnitude cannot be distinguished from convolution
/// round-off are snapped to exactly zero.
fn snap_to_zero<T: Float>(data: &mut [Complex<T>]) {
    let tol = T::from_f32(5.0) * T::epsilon();
    for c in data.iter_mut() {
        if c.re.abs() <= tol {
            c.re = T::zero();
        }
        if c.im.abs() <= tol {
            c.im = T::zero();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::DftEngine;

    #[test]
    fn length_one_is_identity() {
        let engine = DftEngine::<f64>::default();
        let mut data = [Complex::new(3.5, -1.25)];
        transform(&engine, &mut data, Direction::Forward).unwrap();
        assert_eq!(data[0], Complex::new(3.5, -1.25));
        transform(&engine, &mut data, Direction::Inverse).unwrap();
        assert_eq!(data[0], Complex::new(3.5, -1.25));
    }

    #[test]
    fn zeros_stay_exactly_zero() {
        let engine = DftEngine::<f64>::default();
        let mut data = [Complex::<f64>::zero(); 7];
        transform(&engine, &mut data, Direction::Forward).unwrap();
        for c in &data {
            assert_eq!(c.re, 0.0);
            assert_eq!(c.im, 0.0);
        }
    }
}
