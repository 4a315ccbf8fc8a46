//! Three-dimensional integer coordinates.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use smallvec::SmallVec;

/// Unit offsets to the six face-adjacent cells.
const FACES: [(i64, i64, i64); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// An immutable integer point `(x, y, z)`.
///
/// Shares the arithmetic laws of [`Coord2`](crate::Coord2) but carries no
/// directional helpers. Methods taking another point accept any
/// `Into<Coord3>`, including `(i64, i64, i64)` tuples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord3 {
    /// First axis.
    pub x: i64,
    /// Second axis.
    pub y: i64,
    /// Third axis.
    pub z: i64,
}

impl Coord3 {
    /// The point `(0, 0, 0)`.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a coordinate from its components.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance.
    pub fn distance(self, other: impl Into<Self>) -> f64 {
        (other.into() - self).abs()
    }

    /// L1 (taxicab) distance.
    pub fn manhattan_distance(self, other: impl Into<Self>) -> i64 {
        let d = other.into() - self;
        d.x.abs() + d.y.abs() + d.z.abs()
    }

    /// Euclidean magnitude, i.e. distance from the origin.
    pub fn abs(self) -> f64 {
        let (x, y, z) = (self.x as f64, self.y as f64, self.z as f64);
        (x * x + y * y + z * z).sqrt()
    }

    /// The six cells sharing a face with `self`.
    pub fn neighbors(self) -> SmallVec<[Self; 6]> {
        FACES.iter().map(|&d| self + d).collect()
    }
}

impl fmt::Display for Coord3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i64, i64, i64)> for Coord3 {
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Coord3> for (i64, i64, i64) {
    fn from(c: Coord3) -> Self {
        (c.x, c.y, c.z)
    }
}

impl<T: Into<Coord3>> Add<T> for Coord3 {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        let rhs = rhs.into();
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Into<Coord3>> Sub<T> for Coord3 {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        let rhs = rhs.into();
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Into<Coord3>> AddAssign<T> for Coord3 {
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: Into<Coord3>> SubAssign<T> for Coord3 {
    fn sub_assign(&mut self, rhs: T) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Coord3 {
    type Output = Self;

    fn mul(self, k: i64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Mul<Coord3> for i64 {
    type Output = Coord3;

    fn mul(self, c: Coord3) -> Coord3 {
        c * self
    }
}

impl Neg for Coord3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
