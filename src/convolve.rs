//! FFT-based circular and linear convolution.
//!
//! Both operate in the frequency domain with raw (unscaled) transforms and a
//! single 1/N division in the inverse step, so the result carries no hidden
//! normalization regardless of the engine's own convention.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{DftEngine, Direction, FftError};
use crate::num::{usize_to_float, Complex, Float};

/// Circular convolution of two equal-length sequences. The length must be a
/// power of two; use [`linear_convolve`] for anything else.
pub fn circular_convolve<T: Float>(
    engine: &DftEngine<T>,
    x: &[Complex<T>],
    y: &[Complex<T>],
) -> Result<Vec<Complex<T>>, FftError> {
    let n = x.len();
    if n == 0 || y.is_empty() {
        return Err(FftError::InvalidLength);
    }
    if n != y.len() {
        return Err(FftError::InvalidLength);
    }
    if !n.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo);
    }

    let mut fx = x.to_vec();
    let mut fy = y.to_vec();
    engine.transform_raw(&mut fx, Direction::Forward)?;
    engine.transform_raw(&mut fy, Direction::Forward)?;
    for (a, &b) in fx.iter_mut().zip(fy.iter()) {
        *a = a.mul(b);
    }
    engine.transform_raw(&mut fx, Direction::Inverse)?;
    let scale = T::one() / usize_to_float::<T>(n);
    for c in fx.iter_mut() {
        *c = c.scale(scale);
    }
    Ok(fx)
}

/// Convolution of two sequences of any positive lengths. Alias for
/// [`linear_convolve`]; use [`circular_convolve`] for the modulo-N variant.
pub fn convolve<T: Float>(
    engine: &DftEngine<T>,
    x: &[Complex<T>],
    y: &[Complex<T>],
) -> Result<Vec<Complex<T>>, FftError> {
    linear_convolve(engine, x, y)
}

/// Linear convolution of two sequences of any positive lengths. Inputs are
/// zero-padded to the next power of two at or above `len(x) + len(y) - 1`,
/// convolved circularly, and trimmed to the true linear length.
pub fn linear_convolve<T: Float>(
    engine: &DftEngine<T>,
    x: &[Complex<T>],
    y: &[Complex<T>],
) -> Result<Vec<Complex<T>>, FftError> {
    if x.is_empty() || y.is_empty() {
        return Err(FftError::InvalidLength);
    }
    let out_len = x.len() + y.len() - 1;
    let m = out_len.next_power_of_two();

    let mut px = vec![Complex::zero(); m];
    px[..x.len()].copy_from_slice(x);
    let mut py = vec![Complex::zero(); m];
    py[..y.len()].copy_from_slice(y);

    let mut out = circular_convolve(engine, &px, &py)?;
    out.truncate(out_len);
    Ok(out)
}
