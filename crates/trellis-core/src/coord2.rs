//! Two-dimensional integer coordinates.
//!
//! [`Coord2`] uses screen orientation: `x` grows to the right and `y`
//! grows downwards, so "up" decreases `y`. Every method that takes another
//! coordinate accepts anything `Into<Coord2>`, which includes plain
//! `(i64, i64)` tuples.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use indexmap::IndexSet;
use smallvec::SmallVec;

/// Orthogonal unit offsets: up, down, left, right.
const ORTHOGONAL: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Diagonal unit offsets: up-left, up-right, down-left, down-right.
const DIAGONAL: [(i64, i64); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Orthogonal offsets followed by diagonal ones.
const MOORE: [(i64, i64); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Which cells count as adjacent to a coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// The four cells sharing an edge (von Neumann).
    #[default]
    Orthogonal,
    /// The four cells sharing only a corner.
    Diagonal,
    /// All eight surrounding cells (Moore).
    All,
}

impl Neighborhood {
    fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Self::Orthogonal => &ORTHOGONAL,
            Self::Diagonal => &DIAGONAL,
            Self::All => &MOORE,
        }
    }
}

/// An immutable integer point `(x, y)`.
///
/// Ordering is row-major (by `y`, then `x`), which is the reading order of
/// a text grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord2 {
    /// Column; grows to the right.
    pub x: i64,
    /// Row; grows downwards.
    pub y: i64,
}

impl Coord2 {
    /// The point `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a coordinate from its components.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    // ── Movement ────────────────────────────────────────────────

    /// `d` cells to the left (decreasing `x`).
    pub fn left(self, d: i64) -> Self {
        Self::new(self.x - d, self.y)
    }

    /// `d` cells to the right (increasing `x`).
    pub fn right(self, d: i64) -> Self {
        Self::new(self.x + d, self.y)
    }

    /// `d` cells up (decreasing `y`).
    pub fn up(self, d: i64) -> Self {
        Self::new(self.x, self.y - d)
    }

    /// `d` cells down (increasing `y`).
    pub fn down(self, d: i64) -> Self {
        Self::new(self.x, self.y + d)
    }

    /// `d` cells diagonally up and to the left.
    pub fn up_left(self, d: i64) -> Self {
        self.up(d).left(d)
    }

    /// `d` cells diagonally up and to the right.
    pub fn up_right(self, d: i64) -> Self {
        self.up(d).right(d)
    }

    /// `d` cells diagonally down and to the left.
    pub fn down_left(self, d: i64) -> Self {
        self.down(d).left(d)
    }

    /// `d` cells diagonally down and to the right.
    pub fn down_right(self, d: i64) -> Self {
        self.down(d).right(d)
    }

    /// Rotate 90° clockwise about the origin (as seen on screen).
    pub fn rotate_right(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotate 90° counter-clockwise about the origin (as seen on screen).
    pub fn rotate_left(self) -> Self {
        Self::new(self.y, -self.x)
    }

    // ── Relative position ───────────────────────────────────────

    /// `true` if `self` lies in a column strictly left of `other`.
    pub fn is_left_of(self, other: impl Into<Self>) -> bool {
        self.x < other.into().x
    }

    /// `true` if `self` lies in a column strictly right of `other`.
    pub fn is_right_of(self, other: impl Into<Self>) -> bool {
        self.x > other.into().x
    }

    /// `true` if `self` lies in a row strictly above `other`.
    pub fn is_above(self, other: impl Into<Self>) -> bool {
        self.y < other.into().y
    }

    /// `true` if `self` lies in a row strictly below `other`.
    pub fn is_below(self, other: impl Into<Self>) -> bool {
        self.y > other.into().y
    }

    /// `true` if both points share a row.
    pub fn same_row(self, other: impl Into<Self>) -> bool {
        self.y == other.into().y
    }

    /// `true` if both points share a column.
    pub fn same_column(self, other: impl Into<Self>) -> bool {
        self.x == other.into().x
    }

    /// `true` if `other` is one of `self`'s neighbours under `neighborhood`.
    pub fn adjacent(self, other: impl Into<Self>, neighborhood: Neighborhood) -> bool {
        let d = other.into() - self;
        neighborhood
            .offsets()
            .iter()
            .any(|&(dx, dy)| d == Self::new(dx, dy))
    }

    /// `true` if every point lies on one line through `self`.
    ///
    /// Offsets from `self` are compared against the first non-zero offset
    /// by cross product, so points coinciding with `self` never break
    /// collinearity.
    pub fn collinear<I, P>(self, points: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: Into<Self>,
    {
        let mut reference: Option<Self> = None;
        for p in points {
            let d = p.into() - self;
            if d == Self::ORIGIN {
                continue;
            }
            match reference {
                None => reference = Some(d),
                Some(r) => {
                    if r.x * d.y != r.y * d.x {
                        return false;
                    }
                }
            }
        }
        true
    }

    // ── Neighbourhoods ──────────────────────────────────────────

    /// The 4 or 8 cells adjacent to `self`.
    ///
    /// Order is deterministic: orthogonal offsets (up, down, left, right)
    /// before diagonal ones.
    pub fn neighbors(self, neighborhood: Neighborhood) -> SmallVec<[Self; 8]> {
        neighborhood
            .offsets()
            .iter()
            .map(|&(dx, dy)| Self::new(self.x + dx, self.y + dy))
            .collect()
    }

    /// All points within Manhattan distance `radius` of `self`, excluding
    /// `self`.
    ///
    /// Built by breadth-first expansion over orthogonal neighbourhoods, so
    /// the set is ordered by increasing distance.
    pub fn surrounding(self, radius: u32) -> IndexSet<Self> {
        let mut seen: IndexSet<Self> = IndexSet::new();
        let mut queue = VecDeque::new();
        seen.insert(self);
        queue.push_back((self, 0u32));

        while let Some((p, dist)) = queue.pop_front() {
            if dist >= radius {
                continue;
            }
            for n in p.neighbors(Neighborhood::Orthogonal) {
                if seen.insert(n) {
                    queue.push_back((n, dist + 1));
                }
            }
        }

        seen.shift_remove(&self);
        seen
    }

    // ── Metrics ─────────────────────────────────────────────────

    /// Euclidean distance.
    pub fn distance(self, other: impl Into<Self>) -> f64 {
        (other.into() - self).abs()
    }

    /// L1 (taxicab) distance.
    pub fn manhattan_distance(self, other: impl Into<Self>) -> i64 {
        let d = other.into() - self;
        d.x.abs() + d.y.abs()
    }

    /// L∞ (king-move) distance.
    pub fn chebyshev_distance(self, other: impl Into<Self>) -> i64 {
        let d = other.into() - self;
        d.x.abs().max(d.y.abs())
    }

    /// Euclidean magnitude, i.e. distance from the origin.
    pub fn abs(self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }
}

impl Ord for Coord2 {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord2 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Coord2 {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord2> for (i64, i64) {
    fn from(c: Coord2) -> Self {
        (c.x, c.y)
    }
}

// ── Arithmetic ──────────────────────────────────────────────────

impl<T: Into<Coord2>> Add<T> for Coord2 {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        let rhs = rhs.into();
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Into<Coord2>> Sub<T> for Coord2 {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        let rhs = rhs.into();
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Into<Coord2>> AddAssign<T> for Coord2 {
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: Into<Coord2>> SubAssign<T> for Coord2 {
    fn sub_assign(&mut self, rhs: T) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Coord2 {
    type Output = Self;

    fn mul(self, k: i64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Mul<Coord2> for i64 {
    type Output = Coord2;

    fn mul(self, c: Coord2) -> Coord2 {
        c * self
    }
}

impl Neg for Coord2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(x: i64, y: i64) -> Coord2 {
        Coord2::new(x, y)
    }

    // ── Arithmetic ──────────────────────────────────────────────

    #[test]
    fn add_and_scale() {
        assert_eq!(c(3, 4) + c(1, -2), c(4, 2));
        assert_eq!(3 * c(1, 2), c(3, 6));
        assert_eq!(c(1, 2) * 3, c(3, 6));
        assert_eq!(-c(1, -2), c(-1, 2));
    }

    #[test]
    fn tuples_promote() {
        let p = c(3, 4);
        assert_eq!(p + (1i64, -2i64), c(4, 2));
        assert_eq!(p - (3i64, 4i64), Coord2::ORIGIN);
        assert!(p.same_row((0i64, 4i64)));
        assert_eq!(Coord2::from((5i64, 6i64)), c(5, 6));
        let t: (i64, i64) = c(7, 8).into();
        assert_eq!(t, (7, 8));
    }

    #[test]
    fn metrics() {
        assert_eq!(Coord2::ORIGIN.distance(c(3, 4)), 5.0);
        assert_eq!(c(1, 1).manhattan_distance(c(4, 5)), 7);
        assert_eq!(c(1, 1).chebyshev_distance(c(4, 5)), 4);
        assert_eq!(c(-3, 4).abs(), 5.0);
    }

    // ── Movement and relative position ──────────────────────────

    #[test]
    fn movement_uses_screen_orientation() {
        let p = c(5, 5);
        assert_eq!(p.up(1), c(5, 4));
        assert_eq!(p.down(2), c(5, 7));
        assert_eq!(p.left(3), c(2, 5));
        assert_eq!(p.right(1), c(6, 5));
        assert_eq!(p.up_right(1), c(6, 4));
        assert_eq!(p.down_left(2), c(3, 7));
        assert_eq!(p.up_left(1), c(4, 4));
        assert_eq!(p.down_right(1), c(6, 6));
    }

    #[test]
    fn rotation_about_origin() {
        // Up rotated right is right.
        assert_eq!(c(0, -1).rotate_right(), c(1, 0));
        assert_eq!(c(1, 0).rotate_left(), c(0, -1));
        assert_eq!(c(2, 3).rotate_right().rotate_left(), c(2, 3));
    }

    #[test]
    fn predicates() {
        let p = c(2, 2);
        assert!(p.is_left_of(c(3, 0)));
        assert!(p.is_right_of(c(1, 9)));
        assert!(p.is_above(c(2, 3)));
        assert!(p.is_below(c(2, 1)));
        assert!(p.same_column(c(2, -7)));
        assert!(!p.same_row(c(2, -7)));
    }

    #[test]
    fn adjacency() {
        let p = c(0, 0);
        assert!(p.adjacent(c(1, 0), Neighborhood::Orthogonal));
        assert!(!p.adjacent(c(1, 1), Neighborhood::Orthogonal));
        assert!(p.adjacent(c(1, 1), Neighborhood::All));
        assert!(p.adjacent(c(-1, 1), Neighborhood::Diagonal));
        assert!(!p.adjacent(c(0, 1), Neighborhood::Diagonal));
        assert!(!p.adjacent(p, Neighborhood::All));
    }

    #[test]
    fn collinearity() {
        let p = c(0, 0);
        assert!(p.collinear([c(2, 4), c(-1, -2), c(0, 0)]));
        assert!(!p.collinear([c(2, 4), c(1, 1)]));
        assert!(p.collinear([(3i64, 0i64), (-5, 0)]));
        assert!(p.collinear(Vec::<Coord2>::new()));
    }

    // ── Neighbourhoods ──────────────────────────────────────────

    #[test]
    fn orthogonal_neighbors_of_origin() {
        let n: IndexSet<Coord2> = Coord2::ORIGIN
            .neighbors(Neighborhood::Orthogonal)
            .into_iter()
            .collect();
        let expected: IndexSet<Coord2> = [c(0, -1), c(0, 1), c(-1, 0), c(1, 0)].into_iter().collect();
        assert_eq!(n, expected);
    }

    #[test]
    fn surrounding_radius_two_has_twelve() {
        let s = Coord2::ORIGIN.surrounding(2);
        assert_eq!(s.len(), 12);
        assert!(!s.contains(&Coord2::ORIGIN));
        assert!(s.contains(&c(1, 1)));
        assert!(s.contains(&c(0, -2)));
        assert!(!s.contains(&c(2, 1)));
    }

    #[test]
    fn surrounding_radius_zero_is_empty() {
        assert!(c(4, 4).surrounding(0).is_empty());
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![c(1, 1), c(0, 1), c(5, 0)];
        v.sort();
        assert_eq!(v, vec![c(5, 0), c(0, 1), c(1, 1)]);
    }

    #[test]
    fn display() {
        assert_eq!(c(-1, 2).to_string(), "(-1, 2)");
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_coord() -> impl Strategy<Value = Coord2> {
        (-1000i64..1000, -1000i64..1000).prop_map(|(x, y)| Coord2::new(x, y))
    }

    proptest! {
        #[test]
        fn addition_laws(p in arb_coord(), q in arb_coord(), k in -50i64..50) {
            prop_assert_eq!(p + q, q + p);
            prop_assert_eq!((p + q) - q, p);
            prop_assert_eq!(k * (p + q), k * p + k * q);
            prop_assert_eq!(-(-p), p);
        }

        #[test]
        fn magnitude_non_negative(p in arb_coord()) {
            prop_assert!(p.abs() >= 0.0);
            prop_assert_eq!(p.abs() == 0.0, p == Coord2::ORIGIN);
        }

        #[test]
        fn neighborhood_cardinalities(p in arb_coord()) {
            let count = |n: Neighborhood| p.neighbors(n).into_iter().collect::<IndexSet<_>>().len();
            prop_assert_eq!(count(Neighborhood::Orthogonal), 4);
            prop_assert_eq!(count(Neighborhood::Diagonal), 4);
            prop_assert_eq!(count(Neighborhood::All), 8);
        }

        #[test]
        fn surrounding_is_manhattan_ball(p in arb_coord(), r in 1u32..6) {
            let s = p.surrounding(r);
            let r = i64::from(r);
            let mut expected = IndexSet::new();
            for dx in -r..=r {
                for dy in -r..=r {
                    let q = p + Coord2::new(dx, dy);
                    if q != p && p.manhattan_distance(q) <= r {
                        expected.insert(q);
                    }
                }
            }
            prop_assert_eq!(s.len(), expected.len());
            for q in &expected {
                prop_assert!(s.contains(q));
            }
        }
    }
}
