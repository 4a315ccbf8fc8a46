//! Constant-acceleration particles.

use trellis_core::{quadratic_roots_int, Coord2, Coord3, Vector};

/// A particle with integer position, velocity and acceleration.
///
/// Equality compares all three vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Particle<V> {
    /// Current position.
    pub position: V,
    /// Current velocity.
    pub velocity: V,
    /// Constant acceleration.
    pub acceleration: V,
}

/// A particle in the plane.
pub type Particle2 = Particle<Coord2>;

/// A particle in space.
pub type Particle3 = Particle<Coord3>;

impl<V: Vector> Particle<V> {
    /// Create a particle from its three vectors.
    pub fn new(position: impl Into<V>, velocity: impl Into<V>, acceleration: impl Into<V>) -> Self {
        Self {
            position: position.into(),
            velocity: velocity.into(),
            acceleration: acceleration.into(),
        }
    }

    /// A particle at rest at `position`.
    pub fn at_rest(position: impl Into<V>) -> Self {
        Self {
            position: position.into(),
            velocity: V::ZERO,
            acceleration: V::ZERO,
        }
    }

    /// Advance one time unit: `velocity += acceleration`, then
    /// `position += velocity`.
    pub fn tick(&mut self) {
        self.velocity = self.velocity + self.acceleration;
        self.position = self.position + self.velocity;
    }

    /// Advance `t` time units at once using the closed form.
    pub fn tick_n(&mut self, t: u64) {
        self.position = self.position_at_time(t);
        self.velocity = self.velocity_at_time(t);
    }

    /// Position after `t` ticks: `p + v·t + a·t(t+1)/2`.
    ///
    /// # Panics
    ///
    /// Panics if any component of the result does not fit in `i64`. Use
    /// [`checked_position_at_time`](Self::checked_position_at_time) for
    /// arbitrary `t`.
    pub fn position_at_time(&self, t: u64) -> V {
        self.checked_position_at_time(t)
            .unwrap_or_else(|| panic!("position at t = {t} overflows i64"))
    }

    /// Position after `t` ticks, or `None` if a component overflows `i64`.
    pub fn checked_position_at_time(&self, t: u64) -> Option<V> {
        let mut overflow = false;
        let v = V::from_axes(|i| {
            let x = self
                .axis_position(i, t)
                .and_then(|x| i64::try_from(x).ok());
            x.unwrap_or_else(|| {
                overflow = true;
                0
            })
        });
        (!overflow).then_some(v)
    }

    /// Velocity after `t` ticks: `v + a·t`.
    ///
    /// # Panics
    ///
    /// Panics if any component of the result does not fit in `i64`.
    pub fn velocity_at_time(&self, t: u64) -> V {
        self.checked_velocity_at_time(t)
            .unwrap_or_else(|| panic!("velocity at t = {t} overflows i64"))
    }

    /// Velocity after `t` ticks, or `None` if a component overflows `i64`.
    pub fn checked_velocity_at_time(&self, t: u64) -> Option<V> {
        let t = i128::from(t);
        let mut overflow = false;
        let v = V::from_axes(|i| {
            let x = i128::from(self.acceleration.axis(i))
                .checked_mul(t)
                .and_then(|at| at.checked_add(i128::from(self.velocity.axis(i))))
                .and_then(|x| i64::try_from(x).ok());
            x.unwrap_or_else(|| {
                overflow = true;
                0
            })
        });
        (!overflow).then_some(v)
    }

    /// One component of the closed-form position, widened to `i128`.
    fn axis_position(&self, axis: usize, t: u64) -> Option<i128> {
        let t = i128::from(t);
        let triangle = t.checked_mul(t + 1)? / 2;
        let p = i128::from(self.position.axis(axis));
        let vt = i128::from(self.velocity.axis(axis)).checked_mul(t)?;
        let at = i128::from(self.acceleration.axis(axis)).checked_mul(triangle)?;
        p.checked_add(vt)?.checked_add(at)
    }

    /// Manhattan distance of the current position from the origin.
    pub fn manhattan_from_origin(&self) -> i64 {
        self.position.manhattan()
    }

    /// The first tick `t ≥ 0` at which both particles occupy the same
    /// point, or `None` if they never do.
    ///
    /// Per axis the positions agree when
    /// `Δa·t² + (2Δv + Δa)·t + 2Δp = 0`. Axes where `Δp`, `Δv` and `Δa`
    /// are all zero agree at every `t` and impose nothing. Otherwise the
    /// non-negative integer roots of the first constrained axis are the
    /// only candidates, and the smallest one that every axis agrees on
    /// wins. Candidates are checked in `i128`, so a meeting far in the
    /// future is found even when intermediate terms leave `i64`; one whose
    /// positions overflow even that is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_particle::Particle2;
    ///
    /// let p = Particle2::new((0, 0), (1, 0), (0, 0));
    /// let q = Particle2::new((10, 0), (-1, 0), (0, 0));
    /// assert_eq!(p.collision_time(&q), Some(5));
    /// ```
    pub fn collision_time(&self, other: &Self) -> Option<u64> {
        let dp = other.position - self.position;
        let dv = other.velocity - self.velocity;
        let da = other.acceleration - self.acceleration;

        let Some(axis) = (0..V::DIM)
            .find(|&i| dp.axis(i) != 0 || dv.axis(i) != 0 || da.axis(i) != 0)
        else {
            return Some(0);
        };

        let a = da.axis(axis);
        let b = dv.axis(axis).checked_mul(2)?.checked_add(a)?;
        let c = dp.axis(axis).checked_mul(2)?;
        let (r0, r1) = quadratic_roots_int(a, b, c);

        let mut candidates: Vec<u64> = [r0, r1]
            .into_iter()
            .flatten()
            .filter_map(|r| u64::try_from(r).ok())
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        candidates.into_iter().find(|&t| self.meets_at(other, t))
    }

    fn meets_at(&self, other: &Self, t: u64) -> bool {
        (0..V::DIM).all(|i| match (self.axis_position(i, t), other.axis_position(i, t)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        })
    }
}
