//! The [`Isa`] trait: the opcode-specific half of a register machine.

use crate::cpu::MachineCore;
use crate::error::MachineError;

/// Outcome of a fetch, decode or execute stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Carry on with the next stage (or the next instruction).
    Success,
    /// Stop: the program has finished.
    Halt,
    /// Yield until the input buffer is non-empty. Returned from decode,
    /// the instruction is re-fetched when the machine resumes.
    WaitForInput,
}

/// An instruction set overlaid on the base machine.
///
/// The machine fetches `memory[ip]` into [`MachineCore::instruction`],
/// advances the instruction pointer by [`instruction_length`], then calls
/// [`decode`] and [`execute`] in turn. Implementations only ever touch the
/// machine through the [`MachineCore`] they are handed.
///
/// Whether an unknown opcode is fatal is up to the implementation; the
/// framework only dispatches. Returning
/// [`MachineError::UnknownOpcode`] is the usual choice.
///
/// [`instruction_length`]: Isa::instruction_length
/// [`decode`]: Isa::decode
/// [`execute`]: Isa::execute
pub trait Isa {
    /// Width of the instruction just fetched, in memory cells.
    ///
    /// Called after [`MachineCore::instruction`] has been set. Fixed-width
    /// instruction sets can rely on the default of 1.
    fn instruction_length(&self, core: &MachineCore) -> i64 {
        let _ = core;
        1
    }

    /// Split the fetched instruction into an opcode and operands via
    /// [`MachineCore::set_decoded`].
    ///
    /// Return [`Signal::WaitForInput`] when the opcode consumes input and
    /// the input buffer is empty.
    fn decode(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError>;

    /// Apply the decoded instruction's side effects.
    fn execute(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError>;
}
