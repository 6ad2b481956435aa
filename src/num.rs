use alloc::vec::Vec;
use core::f32::consts::PI as PI32;

// Minimal float trait for the generic transform code (no_std friendly, math
// routed through libm so f32 and f64 behave the same on every target).
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f32(x: f32) -> Self;
    /// Attempt to convert a `usize` into the floating-point type.
    /// Returns `None` if the value cannot be represented exactly.
    fn from_usize(x: usize) -> Option<Self>;
    fn cos(self) -> Self;
    fn sin(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn pi() -> Self;
    fn epsilon() -> Self;
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 24;
        if x < MAX_EXACT {
            Some(x as f32)
        } else {
            None
        }
    }
    fn cos(self) -> Self {
        libm::cosf(self)
    }
    fn sin(self) -> Self {
        libm::sinf(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    fn pi() -> Self {
        PI32
    }
    fn epsilon() -> Self {
        f32::EPSILON
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x as f64
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 53;
        if x < MAX_EXACT {
            Some(x as f64)
        } else {
            None
        }
    }
    fn cos(self) -> Self {
        libm::cos(self)
    }
    fn sin(self) -> Self {
        libm::sin(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
    fn epsilon() -> Self {
        f64::EPSILON
    }
}

/// Convert a `usize` to `T`, falling back to a lossy cast for values the
/// mantissa cannot hold exactly. Transform lengths are bounded well below
/// the point where the fallback matters for f64.
#[inline]
pub(crate) fn usize_to_float<T: Float>(x: usize) -> T {
    T::from_usize(x).unwrap_or_else(|| T::from_f32(x as f32))
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    /// `exp(i·theta)` as a complex value.
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re.mul_add(other.re, -(self.im * other.im)),
            im: self.re.mul_add(other.im, self.im * other.re),
        }
    }
    /// Scale both components by a real factor.
    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::<T>::add(self, other)
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::<T>::sub(self, other)
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::<T>::mul(self, other)
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// A fixed-length sequence of complex samples stored as paired real and
/// imaginary vectors. Both vectors always have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexBuffer<T: Float> {
    pub re: Vec<T>,
    pub im: Vec<T>,
}

impl<T: Float> ComplexBuffer<T> {
    pub fn new(re: Vec<T>, im: Vec<T>) -> Self {
        assert_eq!(re.len(), im.len());
        Self { re, im }
    }

    /// Buffer from real samples, imaginary part implicitly zero.
    pub fn from_real(samples: &[T]) -> Self {
        let re = samples.to_vec();
        let im = alloc::vec![T::zero(); samples.len()];
        Self { re, im }
    }

    pub fn from_complex(v: &[Complex<T>]) -> Self {
        let mut re = Vec::with_capacity(v.len());
        let mut im = Vec::with_capacity(v.len());
        for c in v {
            re.push(c.re);
            im.push(c.im);
        }
        Self { re, im }
    }

    pub fn to_complex(&self) -> Vec<Complex<T>> {
        let mut out = Vec::with_capacity(self.re.len());
        for i in 0..self.re.len() {
            out.push(Complex::new(self.re[i], self.im[i]));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn as_slices(&self) -> (&[T], &[T]) {
        (&self.re, &self.im)
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        (&mut self.re, &mut self.im)
    }
}

impl<T: Float> From<Vec<Complex<T>>> for ComplexBuffer<T> {
    fn from(v: Vec<Complex<T>>) -> Self {
        Self::from_complex(&v)
    }
}
