//! Ballistic particles for Trellis.
//!
//! A [`Particle`] moves on the integer lattice under constant
//! acceleration with discrete ticks: velocity is updated first, then
//! position moves by the new velocity. Positions at any time have a
//! closed form, which lets [`Particle::collision_time`] find the first
//! meeting of two particles without simulating.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod particle;

pub use particle::{Particle, Particle2, Particle3};
