//! Core value types and numeric utilities for Trellis.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental abstractions used throughout the Trellis workspace:
//! integer coordinates, compass headings and relative directions, the
//! integer root finders, and cycle-aware state iteration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord2;
pub mod coord3;
pub mod error;
pub mod heading;
pub mod numeric;
pub mod vector;

pub use coord2::{Coord2, Neighborhood};
pub use coord3::Coord3;
pub use error::CoreError;
pub use heading::{Direction, Heading};
pub use numeric::{iterate_state, linear_roots_int, quadratic_roots_int};
pub use vector::Vector;
