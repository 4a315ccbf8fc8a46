//! Test utilities for Trellis development.
//!
//! Provides reference instruction sets for the register machine (in
//! [`fixtures`]), sample grids and programs, canned particle pairs, and a
//! tracing subscriber hook for tests that want to see diagnostics.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Once;

use trellis_particle::Particle2;
use trellis_space::{Grid, GridError, GridOptions};

pub use fixtures::{ArithmeticIsa, AssemblyIsa, IntcodeIsa};

static INIT_TRACING: Once = Once::new();

/// Install a test-writer `fmt` subscriber once per process.
///
/// Does nothing unless `TEST_LOG` is set; the filter comes from
/// `RUST_LOG` and defaults to `debug`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        if std::env::var("TEST_LOG").is_ok() {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(filter)
                .try_init();
        }
    });
}

// ── Grids ───────────────────────────────────────────────────────

/// Three `#` on the main diagonal of a 3x3 field of `.`.
pub const DIAGONAL: [&str; 3] = ["#..", ".#.", "..#"];

/// A walled maze with one start `S` and one end `E`.
pub const MAZE: &str = "\
#########
#S..#...#
#.#.#.#.#
#.#...#E#
#########";

/// A small height map.
pub const HEIGHTS: &str = "\
30373
25512
65332
33549
35390";

pub fn diagonal_grid() -> Result<Grid, GridError> {
    Grid::from_lines(DIAGONAL, GridOptions::default())
}

pub fn maze_grid() -> Result<Grid, GridError> {
    Grid::parse(MAZE, GridOptions::default())
}

pub fn height_grid() -> Result<Grid, GridError> {
    Grid::parse(HEIGHTS, GridOptions::digits())
}

// ── Programs ────────────────────────────────────────────────────

/// `add 2 3` then `mul 4 5`, for [`ArithmeticIsa`].
pub const ARITHMETIC_PROGRAM: [&str; 2] = ["add 2 3", "mul 4 5"];

/// Counts register `a` down from 5, emitting each value, for
/// [`AssemblyIsa`].
pub const COUNTDOWN_PROGRAM: [&str; 5] = ["set a 5", "out a", "add a -1", "jnz a -2", "hlt"];

/// Reads one value, doubles it and echoes it, for [`AssemblyIsa`].
pub const DOUBLER_PROGRAM: [&str; 4] = ["in a", "mul a 2", "out a", "hlt"];

/// Leaves `3500` in cell 0.
pub const INTCODE_ADD_MUL: [i64; 12] = [1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];

/// Outputs 1 if its input equals 8, otherwise 0.
pub const INTCODE_EQUALS_EIGHT: [i64; 11] = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];

/// Outputs a copy of itself; exercises relative addressing.
pub const INTCODE_QUINE: [i64; 16] = [
    109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
];

/// Echoes every input it is given; never halts on its own.
pub const INTCODE_ECHO_LOOP: [i64; 8] = [3, 7, 4, 7, 1105, 1, 0, 0];

// ── Particles ───────────────────────────────────────────────────

/// Two particles approaching head-on that meet at `t = 5`.
pub fn converging_pair() -> (Particle2, Particle2) {
    (
        Particle2::new((0, 0), (1, 0), (0, 0)),
        Particle2::new((10, 0), (-1, 0), (0, 0)),
    )
}

/// Two particles whose axes agree on different times, so they never meet.
pub fn missing_pair() -> (Particle2, Particle2) {
    (
        Particle2::new((0, 0), (1, 1), (0, 0)),
        Particle2::new((2, 0), (0, 0), (0, 0)),
    )
}
