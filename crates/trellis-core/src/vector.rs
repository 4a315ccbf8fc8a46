//! The [`Vector`] trait: per-axis access over fixed-dimension coordinates.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

use crate::coord2::Coord2;
use crate::coord3::Coord3;

/// An integer vector of fixed dimension.
///
/// Implemented by [`Coord2`] and [`Coord3`] so that dimension-generic code
/// (ballistic particles, for one) can solve equations axis by axis.
pub trait Vector:
    Copy
    + Debug
    + Eq
    + Hash
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<i64, Output = Self>
    + Neg<Output = Self>
{
    /// Number of axes.
    const DIM: usize;

    /// The all-zero vector.
    const ZERO: Self;

    /// Component along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= Self::DIM`.
    fn axis(&self, axis: usize) -> i64;

    /// Build a vector whose component along axis `i` is `f(i)`.
    fn from_axes(f: impl FnMut(usize) -> i64) -> Self;

    /// Sum of absolute components.
    fn manhattan(&self) -> i64 {
        (0..Self::DIM).map(|i| self.axis(i).abs()).sum()
    }
}

impl Vector for Coord2 {
    const DIM: usize = 2;
    const ZERO: Self = Coord2::ORIGIN;

    fn axis(&self, axis: usize) -> i64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("axis {axis} out of range for a 2D vector"),
        }
    }

    fn from_axes(mut f: impl FnMut(usize) -> i64) -> Self {
        Coord2::new(f(0), f(1))
    }
}

impl Vector for Coord3 {
    const DIM: usize = 3;
    const ZERO: Self = Coord3::ORIGIN;

    fn axis(&self, axis: usize) -> i64 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range for a 3D vector"),
        }
    }

    fn from_axes(mut f: impl FnMut(usize) -> i64) -> Self {
        Coord3::new(f(0), f(1), f(2))
    }
}
