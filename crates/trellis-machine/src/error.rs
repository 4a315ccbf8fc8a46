//! Error types for the register machine.

use std::error::Error;
use std::fmt;

/// Errors from stepping a register machine.
///
/// "Halted" and "paused" are not errors; they are reported through
/// [`MachineState`](crate::MachineState) and the return value of
/// [`RegisterMachine::step`](crate::RegisterMachine::step).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachineError {
    /// `step` or `run` was called with an empty memory image.
    ProgramAbsent,
    /// A memory access used a negative address.
    InvalidAddress {
        /// The offending address.
        address: i64,
    },
    /// A memory cell holding text was read as an integer.
    NotAnInteger {
        /// Address of the cell.
        address: i64,
    },
    /// An operand that names no storage was used as a destination.
    ImmediateWrite {
        /// The immediate value.
        value: i64,
    },
    /// The ISA does not recognise the decoded opcode.
    UnknownOpcode {
        /// The opcode as text.
        opcode: String,
        /// Address of the instruction.
        address: i64,
    },
    /// The ISA could not make sense of an instruction's operands.
    MalformedInstruction {
        /// The instruction as text.
        instruction: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramAbsent => write!(f, "no program loaded"),
            Self::InvalidAddress { address } => write!(f, "invalid memory address {address}"),
            Self::NotAnInteger { address } => {
                write!(f, "memory cell {address} does not hold an integer")
            }
            Self::ImmediateWrite { value } => {
                write!(f, "cannot write to immediate operand {value}")
            }
            Self::UnknownOpcode { opcode, address } => {
                write!(f, "unknown opcode '{opcode}' at address {address}")
            }
            Self::MalformedInstruction {
                instruction,
                reason,
            } => write!(f, "malformed instruction '{instruction}': {reason}"),
        }
    }
}

impl Error for MachineError {}
