//! Trellis: grids, coordinates, walkers, register machines and particles.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Trellis sub-crates. For most users, adding `trellis` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! // Find the start of a maze and walk east until the wall.
//! let grid = Grid::parse("#####\n#S..#\n#####", GridOptions::default()).unwrap();
//! let start = grid.initial_position('S').unwrap();
//! let mut walker = PointWalker::new(start, Heading::East, true);
//! while grid[walker.next_position()] != '#' {
//!     walker.step();
//! }
//! assert_eq!(walker.position(), Coord2::new(3, 1));
//! assert_eq!(walker.visited_points().len(), 3);
//!
//! // Two particles on a collision course.
//! let a = Particle2::new((0, 0), (1, 0), (0, 0));
//! let b = Particle2::new((10, 0), (-1, 0), (0, 0));
//! assert_eq!(a.collision_time(&b), Some(5));
//!
//! // Cycle-aware iteration.
//! assert_eq!(iterate_state(0u8, 1_000_000, |x| (x + 1) % 7).unwrap(), 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `trellis-core` | Coordinates, headings, integer root finders, state iteration |
//! | [`space`] | `trellis-space` | Character grids and grid options |
//! | [`walker`] | `trellis-walker` | Position-and-heading walker with history |
//! | [`machine`] | `trellis-machine` | Fetch/decode/execute register machine framework |
//! | [`particle`] | `trellis-particle` | Constant-acceleration particles and collision times |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Value types and numeric helpers (`trellis-core`).
///
/// Contains [`types::Coord2`], [`types::Coord3`], the [`types::Heading`]
/// and [`types::Direction`] rings, and the integer root finders.
pub use trellis_core as types;

/// Character grids (`trellis-space`).
pub use trellis_space as space;

/// The point walker (`trellis-walker`).
pub use trellis_walker as walker;

/// Register machines (`trellis-machine`).
///
/// Implement [`machine::Isa`] and run it on a [`machine::RegisterMachine`].
pub use trellis_machine as machine;

/// Ballistic particles (`trellis-particle`).
pub use trellis_particle as particle;

/// Common imports for typical Trellis usage.
///
/// ```rust
/// use trellis::prelude::*;
/// ```
pub mod prelude {
    // Core values
    pub use trellis_core::{
        iterate_state, linear_roots_int, quadratic_roots_int, Coord2, Coord3, Direction, Heading,
        Neighborhood, Vector,
    };

    // Errors
    pub use trellis_core::CoreError;
    pub use trellis_machine::MachineError;
    pub use trellis_space::GridError;

    // Space
    pub use trellis_space::{Cell, Grid, GridOptions};

    // Walker
    pub use trellis_walker::{PointWalker, WalkerState};

    // Machine
    pub use trellis_machine::{
        deadlocked, Isa, MachineConfig, MachineCore, MachineState, Operand, Register,
        RegisterMachine, Signal, Word,
    };

    // Particles
    pub use trellis_particle::{Particle, Particle2, Particle3};
}
