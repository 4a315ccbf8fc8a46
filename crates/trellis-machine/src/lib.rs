//! Register machine framework for Trellis.
//!
//! A [`RegisterMachine`] pins the fetch stage, the register file, the
//! memory image, FIFO I/O buffers and execution statistics. The opcode set
//! is supplied separately as an [`Isa`], which decodes the fetched
//! instruction into an opcode and operands and then executes it against
//! the [`MachineCore`].
//!
//! # Lifecycle
//!
//! ```text
//! Created --load_memory--> Ready --step--> Running --+--> Paused  (decode wants input)
//!                            ^                       +--> Halted  (ip left the program, or HALT)
//!                            +--------- reset -------+
//! ```
//!
//! Paused machines resume on the next `step` once input is available.
//! Halted machines stay halted until [`reset`](RegisterMachine::reset).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cpu;
pub mod error;
pub mod isa;
pub mod machine;
pub mod word;

pub use crate::config::MachineConfig;
pub use crate::cpu::{MachineCore, MachineState};
pub use crate::error::MachineError;
pub use crate::isa::{Isa, Signal};
pub use crate::machine::{deadlocked, RegisterMachine};
pub use crate::word::{Operand, Register, Word};
