//! # chirpfft - radix-2 / Bluestein DFT engine
//!
//! A pure, synchronous discrete Fourier transform engine:
//!
//! - **Radix-2 FFT**: iterative Cooley–Tukey (bit-reversal permutation plus
//!   doubling merge stages) for power-of-two lengths
//! - **Bluestein's algorithm**: arbitrary lengths via a chirp-modulated
//!   power-of-two convolution
//! - **Convolution**: FFT-based circular and linear convolution utilities
//! - **N-dimensional**: separable per-axis transforms driven by an
//!   [`AxisPlan`](ndfft::AxisPlan)
//! - **Three normalization conventions**: raw sums, 1/N on the inverse, or
//!   1/√N in both directions, applied exactly once per call
//!
//! The top-level entry points ([`DftEngine::forward`], [`DftEngine::inverse`])
//! dispatch on length automatically; strict radix-2 entry points are exposed
//! for callers that want the non-fallback behavior.
//!
//! ## Cargo features
//!
//! - `std` (default): standard library integration (`std::error::Error`)
//! - `verbose-logging`: debug-level dispatch notes through the `log` crate
//!
//! Transforms run to completion on the calling thread; a [`DftEngine`] is
//! single-threaded by construction, and independent engines on different
//! threads share no mutable state.
//!
//! ## Example
//!
//! ```
//! use chirpfft::{Complex64, DftEngine};
//!
//! let engine = DftEngine::<f64>::default();
//! let mut data = vec![
//!     Complex64::new(1.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//! ];
//! engine.forward(&mut data).unwrap();
//! assert!((data[2].re - 1.0).abs() < 1e-12);
//! ```

#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Transform engine, planner, normalization, and the error taxonomy.
pub mod fft;

/// Complex number, float abstraction, and split re/im buffers.
pub mod num;

/// Arbitrary-length transforms via the chirp-z reduction.
pub mod bluestein;

/// Circular and linear convolution built on the transform engine.
pub mod convolve;

/// Separable N-dimensional transforms.
pub mod ndfft;

pub use fft::{
    DftEngine, Direction, FftError, Normalization, TransformConfig, TwiddlePlanner,
    MAX_TRANSFORM_LEN,
};
pub use num::{Complex, Complex32, Complex64, ComplexBuffer, Float};
