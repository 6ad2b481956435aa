//! Discrete Fourier transform core.
//!
//! [`DftEngine`] dispatches on length: exact powers of two run the iterative
//! radix-2 Cooley–Tukey butterfly (bit-reversal permutation followed by
//! log2(N) doubling merge stages), every other length is routed through
//! [Bluestein's algorithm](crate::bluestein). A [`TwiddlePlanner`] memoizes
//! per-stage twiddle tables and per-length chirp tables so repeated
//! transforms of the same size reuse the trigonometric work. The requested
//! [`Normalization`] is applied exactly once, after the butterfly or chirp
//! stage.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use hashbrown::HashMap;

use crate::bluestein;
use crate::num::{usize_to_float, Complex, ComplexBuffer, Float};

/// Practical ceiling on transform lengths. Bluestein pads to four times the
/// next power of two, so index arithmetic stays comfortably inside `usize`
/// below this bound.
pub const MAX_TRANSFORM_LEN: usize = 1 << 29;

/// Errors surfaced by the transform engine. Every failure is synchronous and
/// leaves no partial result in caller-visible buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Zero-length input, or paired buffers of unequal length.
    InvalidLength,
    /// A strict power-of-two entry point was handed another length.
    NotPowerOfTwo,
    /// Requested length exceeds [`MAX_TRANSFORM_LEN`].
    CapacityExceeded,
    /// An axis index is outside the array's rank, or the flat data length
    /// does not match the shape product.
    DimensionMismatch,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::InvalidLength => write!(f, "buffer length must be positive and consistent"),
            FftError::NotPowerOfTwo => write!(f, "length is not a power of two"),
            FftError::CapacityExceeded => write!(f, "length exceeds the supported maximum"),
            FftError::DimensionMismatch => write!(f, "axis or shape does not match the array"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Scaling convention applied once per transform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Raw DFT sums in both directions.
    None,
    /// Forward unscaled, inverse divided by N.
    #[default]
    Std,
    /// Both directions divided by √N.
    Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Inverse,
}

/// Per-call configuration: which way to transform and how to scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformConfig {
    pub normalization: Normalization,
    pub direction: Direction,
}

impl TransformConfig {
    pub fn new(normalization: Normalization, direction: Direction) -> Self {
        Self {
            normalization,
            direction,
        }
    }
}

/// Cache of trigonometric tables shared by all transforms of an engine.
///
/// Twiddle tables are keyed by stage size `len` and hold `len/2` entries
/// `exp(-2πi·k/len)` for `k = 0..len/2`. Chirp tables are keyed by the
/// (arbitrary) transform length and hold the Bluestein modulation sequence.
/// Entries are built once and immutable afterwards; clones of the `Arc`s
/// stay valid while the butterfly runs.
pub struct TwiddlePlanner<T: Float> {
    cache: HashMap<usize, Arc<[Complex<T>]>>,
    chirp_cache: HashMap<usize, Arc<[Complex<T>]>>,
}

impl<T: Float> Default for TwiddlePlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TwiddlePlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            chirp_cache: HashMap::new(),
        }
    }

    /// Twiddle table for a butterfly stage of size `len` (a power of two).
    /// The table is generated once with an iterative `sin_cos` recurrence
    /// and served from the cache afterwards.
    pub fn get_twiddles(&mut self, len: usize) -> Arc<[Complex<T>]> {
        if !self.cache.contains_key(&len) {
            let half = len / 2;
            let angle = -T::from_f32(2.0) * T::pi() / usize_to_float::<T>(len);
            let (sin_step, cos_step) = angle.sin_cos();

            let mut table: Vec<Complex<T>> = Vec::with_capacity(half);
            let mut w_re = T::one();
            let mut w_im = T::zero();
            for _ in 0..half {
                table.push(Complex::new(w_re, w_im));
                let tmp = w_re;
                w_re = w_re.mul_add(cos_step, -(w_im * sin_step));
                w_im = w_im.mul_add(cos_step, tmp * sin_step);
            }
            self.cache.insert(len, Arc::from(table));
        }
        Arc::clone(&self.cache[&len])
    }

    /// Bluestein chirp sequence for length `n`: entry `i` is
    /// `exp(-iπ·(i² mod 2n)/n)`. The quadratic index is reduced modulo `2n`
    /// before the float conversion so the angle stays accurate for large `n`.
    pub fn get_chirp(&mut self, n: usize) -> Arc<[Complex<T>]> {
        if !self.chirp_cache.contains_key(&n) {
            let two_n = 2 * n as u64;
            let mut chirp: Vec<Complex<T>> = Vec::with_capacity(n);
            for i in 0..n as u64 {
                let sq = (i * i) % two_n;
                let angle = T::pi() * usize_to_float::<T>(sq as usize) / usize_to_float::<T>(n);
                chirp.push(Complex::expi(-angle));
            }
            self.chirp_cache.insert(n, Arc::from(chirp));
        }
        Arc::clone(&self.chirp_cache[&n])
    }
}

/// Swap each element with its bit-reversed index, once. `n` must be a power
/// of two greater than one.
fn bit_reverse_permute<T: Float>(data: &mut [Complex<T>]) {
    let n = data.len();
    let shift = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> shift;
        if j > i {
            data.swap(i, j);
        }
    }
}

/// One-dimensional transform engine carrying a normalization convention and
/// a planner cache. Not `Sync`: use one engine per thread; independent
/// engines share no mutable state.
pub struct DftEngine<T: Float> {
    planner: RefCell<TwiddlePlanner<T>>,
    normalization: Normalization,
}

impl<T: Float> Default for DftEngine<T> {
    fn default() -> Self {
        Self::new(Normalization::Std)
    }
}

impl<T: Float> DftEngine<T> {
    pub fn new(normalization: Normalization) -> Self {
        Self {
            planner: RefCell::new(TwiddlePlanner::new()),
            normalization,
        }
    }

    pub fn with_planner(planner: TwiddlePlanner<T>, normalization: Normalization) -> Self {
        Self {
            planner: RefCell::new(planner),
            normalization,
        }
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// In-place transform with automatic length dispatch: powers of two run
    /// the radix-2 butterfly, everything else goes through Bluestein.
    pub fn transform(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        self.transform_raw(data, direction)?;
        apply_normalization(data, self.normalization, direction);
        Ok(())
    }

    /// Transform under an explicit per-call configuration, ignoring the
    /// engine's own normalization.
    pub fn transform_with(
        &self,
        data: &mut [Complex<T>],
        config: TransformConfig,
    ) -> Result<(), FftError> {
        self.transform_raw(data, config.direction)?;
        apply_normalization(data, config.normalization, config.direction);
        Ok(())
    }

    pub fn forward(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform(data, Direction::Forward)
    }

    pub fn inverse(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform(data, Direction::Inverse)
    }

    /// Unnormalized dispatch shared by the public entry points, the
    /// convolution engine, and Bluestein's internal machinery.
    pub(crate) fn transform_raw(
        &self,
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
        if n.is_power_of_two() {
            #[cfg(feature = "verbose-logging")]
            log::debug!("radix-2 dispatch: n={} direction={:?}", n, direction);
            self.radix2_in_place(data, direction)
        } else {
            #[cfg(feature = "verbose-logging")]
            log::debug!("bluestein dispatch: n={} direction={:?}", n, direction);
            bluestein::transform(self, data, direction)
        }
    }

    /// Strict radix-2 forward transform. Unlike [`DftEngine::forward`] this
    /// does not fall back for other lengths.
    pub fn radix2_forward(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.radix2_in_place(data, Direction::Forward)?;
        apply_normalization(data, self.normalization, Direction::Forward);
        Ok(())
    }

    /// Strict radix-2 inverse transform.
    pub fn radix2_inverse(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.radix2_in_place(data, Direction::Inverse)?;
        apply_normalization(data, self.normalization, Direction::Inverse);
        Ok(())
    }

    /// Iterative Cooley–Tukey butterfly. Forward and inverse share the loop;
    /// the inverse conjugates each twiddle as it is read.
    fn radix2_in_place(
        &self,
        data: &mut [Complex<T>],
        direction: Direction,
    ) -> Result<(), FftError> {
        let n = data.len();
        if n == 0 {
            return Err(FftError::InvalidLength);
        }
        if !n.is_power_of_two() {
            return Err(FftError::NotPowerOfTwo);
        }
        if n == 1 {
            return Ok(());
        }

        bit_reverse_permute(data);

        let mut len = 2;
        while len <= n {
            let twiddles = self.planner.borrow_mut().get_twiddles(len);
            let half = len / 2;
            for base in (0..n).step_by(len) {
                for k in 0..half {
                    let w = match direction {
                        Direction::Forward => twiddles[k],
                        Direction::Inverse => twiddles[k].conj(),
                    };
                    let u = data[base + k];
                    let v = data[base + k + half].mul(w);
                    data[base + k] = u.add(v);
                    data[base + k + half] = u.sub(v);
                }
            }
            len <<= 1;
        }
        Ok(())
    }

    pub(crate) fn chirp(&self, n: usize) -> Arc<[Complex<T>]> {
        self.planner.borrow_mut().get_chirp(n)
    }

    /// Forward transform of real samples; the imaginary part is implicitly
    /// zero.
    pub fn forward_real(&self, samples: &[T]) -> Result<Vec<Complex<T>>, FftError> {
        let mut data: Vec<Complex<T>> = samples
            .iter()
            .map(|&x| Complex::new(x, T::zero()))
            .collect();
        self.forward(&mut data)?;
        Ok(data)
    }

    /// Sample `f` at `n` equally spaced points in `[min, max)` and transform
    /// the result.
    pub fn forward_fn<F>(&self, f: F, min: T, max: T, n: usize) -> Result<Vec<Complex<T>>, FftError>
    where
        F: Fn(T) -> T,
    {
        if n == 0 {
            return Err(FftError::InvalidLength);
        }
        let step = (max - min) / usize_to_float::<T>(n);
        let mut data: Vec<Complex<T>> = Vec::with_capacity(n);
        for i in 0..n {
            let t = min + step * usize_to_float::<T>(i);
            data.push(Complex::new(f(t), T::zero()));
        }
        self.forward(&mut data)?;
        Ok(data)
    }

    /// In-place transform of a split re/im buffer.
    pub fn forward_buffer(&self, buf: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        self.transform_buffer(buf, Direction::Forward)
    }

    /// In-place inverse transform of a split re/im buffer.
    pub fn inverse_buffer(&self, buf: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        self.transform_buffer(buf, Direction::Inverse)
    }

    fn transform_buffer(
        &self,
        buf: &mut ComplexBuffer<T>,
        direction: Direction,
    ) -> Result<(), FftError> {
        if buf.re.len() != buf.im.len() || buf.is_empty() {
            return Err(FftError::InvalidLength);
        }
        let mut data = buf.to_complex();
        self.transform(&mut data, direction)?;
        for (i, c) in data.iter().enumerate() {
            buf.re[i] = c.re;
            buf.im[i] = c.im;
        }
        Ok(())
    }

    /// Out-of-place forward transform; `input` is left untouched.
    pub fn forward_into(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::InvalidLength);
        }
        output.copy_from_slice(input);
        self.forward(output)
    }

    /// Out-of-place inverse transform; `input` is left untouched.
    pub fn inverse_into(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::InvalidLength);
        }
        output.copy_from_slice(input);
        self.inverse(output)
    }
}

/// Scale a freshly transformed buffer per the convention, exactly once.
fn apply_normalization<T: Float>(
    data: &mut [Complex<T>],
    normalization: Normalization,
    direction: Direction,
) {
    let n = data.len();
    let factor = match (normalization, direction) {
        (Normalization::None, _) | (Normalization::Std, Direction::Forward) => return,
        (Normalization::Std, Direction::Inverse) => T::one() / usize_to_float::<T>(n),
        (Normalization::Unit, _) => T::one() / usize_to_float::<T>(n).sqrt(),
    };
    for c in data.iter_mut() {
        *c = c.scale(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn bit_reversal_length_eight() {
        let mut data: Vec<Complex<f64>> = (0..8)
            .map(|i| Complex::new(i as f64, 0.0))
            .collect();
        bit_reverse_permute(&mut data);
        let order: Vec<f64> = data.iter().map(|c| c.re).collect();
        assert_eq!(order, vec![0.0, 4.0, 2.0, 6.0, 1.0, 5.0, 3.0, 7.0]);
    }

    #[test]
    fn twiddle_table_is_cached() {
        let mut planner = TwiddlePlanner::<f64>::new();
        let t1 = planner.get_twiddles(16);
        let t2 = planner.get_twiddles(16);
        assert_eq!(t1.as_ptr(), t2.as_ptr());
        assert_eq!(t1.len(), 8);
        // First entry is always 1 + 0i.
        assert!((t1[0].re - 1.0).abs() < 1e-15);
        assert!(t1[0].im.abs() < 1e-15);
    }

    #[test]
    fn chirp_table_matches_direct_angle() {
        let mut planner = TwiddlePlanner::<f64>::new();
        let chirp = planner.get_chirp(5);
        for (i, c) in chirp.iter().enumerate() {
            let angle = core::f64::consts::PI * ((i * i) % 10) as f64 / 5.0;
            assert!((c.re - angle.cos()).abs() < 1e-12);
            assert!((c.im + angle.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn strict_radix2_rejects_other_lengths() {
        let engine = DftEngine::<f64>::default();
        let mut data = vec![Complex::zero(); 6];
        assert_eq!(engine.radix2_forward(&mut data), Err(FftError::NotPowerOfTwo));
        let mut empty: Vec<Complex<f64>> = vec![];
        assert_eq!(engine.radix2_forward(&mut empty), Err(FftError::InvalidLength));
    }
}
