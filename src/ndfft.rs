//! Separable multi-dimensional transforms.
//!
//! An N-dimensional array is stored as a flat row-major buffer with a shape
//! vector. Each axis named in an [`AxisPlan`] is transformed fully before
//! the next one begins: the lines of a later axis are read from the output
//! of the earlier pass, which is exactly the separable N-D DFT.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{DftEngine, Direction, FftError};
use crate::num::{Complex, Float};

/// Ordered list of axes to transform, together with the array shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisPlan {
    shape: Vec<usize>,
    axes: Vec<usize>,
}

impl AxisPlan {
    /// Plan over explicit axes. Every axis must be within `[0, rank)` and
    /// every extent positive.
    pub fn new(shape: &[usize], axes: &[usize]) -> Result<Self, FftError> {
        if shape.is_empty() || shape.iter().any(|&d| d == 0) {
            return Err(FftError::InvalidLength);
        }
        let rank = shape.len();
        for &axis in axes {
            if axis >= rank {
                return Err(FftError::DimensionMismatch);
            }
        }
        Ok(Self {
            shape: shape.to_vec(),
            axes: axes.to_vec(),
        })
    }

    /// Default plan transforming every axis, last to first (rows before
    /// columns in the 2-D case).
    pub fn all(shape: &[usize]) -> Result<Self, FftError> {
        let axes: Vec<usize> = (0..shape.len()).rev().collect();
        Self::new(shape, &axes)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    /// Total number of elements the flat data buffer must hold.
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }
}

/// Transform each axis in plan order. Lines along an axis are gathered
/// through a stride walk into a scratch buffer, run through the 1-D
/// dispatch, and scattered back in place.
pub fn transform_axes<T: Float>(
    engine: &DftEngine<T>,
    data: &mut [Complex<T>],
    plan: &AxisPlan,
    direction: Direction,
) -> Result<(), FftError> {
    let total = plan.element_count();
    if data.len() != total {
        return Err(FftError::DimensionMismatch);
    }
    for &axis in plan.axes() {
        let axis_len = plan.shape()[axis];
        let stride: usize = plan.shape()[axis + 1..].iter().product();
        let block = axis_len * stride;
        let mut line = vec![Complex::<T>::zero(); axis_len];
        for base in (0..total).step_by(block) {
            for offset in 0..stride {
                let start = base + offset;
                for (j, slot) in line.iter_mut().enumerate() {
                    *slot = data[start + j * stride];
                }
                engine.transform(&mut line, direction)?;
                for (j, &value) in line.iter().enumerate() {
                    data[start + j * stride] = value;
                }
            }
        }
    }
    Ok(())
}

/// Forward transform over every axis of a flat row-major array.
pub fn forward_nd<T: Float>(
    engine: &DftEngine<T>,
    data: &mut [Complex<T>],
    shape: &[usize],
) -> Result<(), FftError> {
    transform_axes(engine, data, &AxisPlan::all(shape)?, Direction::Forward)
}

/// Inverse transform over every axis of a flat row-major array.
pub fn inverse_nd<T: Float>(
    engine: &DftEngine<T>,
    data: &mut [Complex<T>],
    shape: &[usize],
) -> Result<(), FftError> {
    transform_axes(engine, data, &AxisPlan::all(shape)?, Direction::Inverse)
}

/// 2-D forward transform of a `rows × cols` row-major array.
pub fn fft2d<T: Float>(
    engine: &DftEngine<T>,
    data: &mut [Complex<T>],
    rows: usize,
    cols: usize,
) -> Result<(), FftError> {
    forward_nd(engine, data, &[rows, cols])
}

/// 2-D inverse transform of a `rows × cols` row-major array.
pub fn ifft2d<T: Float>(
    engine: &DftEngine<T>,
    data: &mut [Complex<T>],
    rows: usize,
    cols: usize,
) -> Result<(), FftError> {
    inverse_nd(engine, data, &[rows, cols])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn plan_validates_axes_and_shape() {
        assert!(AxisPlan::new(&[2, 3], &[0, 1]).is_ok());
        assert_eq!(
            AxisPlan::new(&[2, 3], &[2]),
            Err(FftError::DimensionMismatch)
        );
        assert_eq!(AxisPlan::new(&[], &[]), Err(FftError::InvalidLength));
        assert_eq!(AxisPlan::new(&[2, 0], &[0]), Err(FftError::InvalidLength));
    }

    #[test]
    fn default_plan_is_last_to_first() {
        let plan = AxisPlan::all(&[4, 2, 3]).unwrap();
        assert_eq!(plan.axes(), &[2, 1, 0]);
        assert_eq!(plan.element_count(), 24);
    }

    #[test]
    fn data_length_must_match_shape() {
        let engine = DftEngine::<f64>::default();
        let plan = AxisPlan::all(&[2, 2]).unwrap();
        let mut data = vec![Complex::<f64>::zero(); 3];
        assert_eq!(
            transform_axes(&engine, &mut data, &plan, Direction::Forward),
            Err(FftError::DimensionMismatch)
        );
    }
}
