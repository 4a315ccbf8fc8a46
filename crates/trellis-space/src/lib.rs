//! Character grid spaces for Trellis.
//!
//! This crate defines [`Grid`], an immutable rectangular text matrix that
//! indexes its cells by glyph at construction time, along with the
//! [`GridOptions`] that control which glyphs are indexed and how single
//! cells are read back.
//!
//! # Example
//!
//! ```
//! use trellis_core::Coord2;
//! use trellis_space::{Grid, GridOptions};
//!
//! let grid = Grid::from_lines(["#..", ".#.", "..#"], GridOptions::default()).unwrap();
//! assert_eq!(grid.count('#'), 3);
//! assert!(grid.in_space(Coord2::new(2, 2)));
//! assert!(!grid.on_edge(Coord2::new(1, 1)));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod options;

pub use error::GridError;
pub use grid::{Cell, Grid};
pub use options::GridOptions;
