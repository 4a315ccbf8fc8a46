//! Point walker automaton for Trellis.
//!
//! A [`PointWalker`] holds a position and one of the eight compass
//! headings. It can peek ahead, step, turn, and optionally keep a history
//! of every state it occupied before each mutation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod walker;

pub use walker::{PointWalker, WalkerState};
