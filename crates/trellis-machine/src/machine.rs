//! The fetch/decode/execute loop.

use tracing::{debug, trace};

use crate::config::MachineConfig;
use crate::cpu::{MachineCore, MachineState};
use crate::error::MachineError;
use crate::isa::{Isa, Signal};
use crate::word::{Register, Word};

/// A register machine running the instruction set `I`.
///
/// The machine owns fetch and the bookkeeping around it; `I` owns decode
/// and execute. See the [crate docs](crate) for the lifecycle.
///
/// # Examples
///
/// ```
/// use trellis_machine::{Isa, MachineCore, MachineError, RegisterMachine, Signal};
///
/// /// `inc`: add one to register `a`.
/// struct Counter;
///
/// impl Isa for Counter {
///     fn decode(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
///         let text = core.instruction().map(ToString::to_string).unwrap_or_default();
///         core.set_decoded(text, []);
///         Ok(Signal::Success)
///     }
///
///     fn execute(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
///         let a = core.register("a");
///         core.write_register("a", a + 1);
///         Ok(Signal::Success)
///     }
/// }
///
/// let mut m = RegisterMachine::new(Counter);
/// m.load_memory(["inc", "inc", "inc"]);
/// m.run().unwrap();
/// assert_eq!(m.register("a"), 3);
/// assert_eq!(m.core().count_of("inc"), 3);
/// ```
#[derive(Clone, Debug)]
pub struct RegisterMachine<I> {
    core: MachineCore,
    isa: I,
}

impl<I: Isa> RegisterMachine<I> {
    /// A machine with the default register names and no program.
    pub fn new(isa: I) -> Self {
        Self::with_config(isa, MachineConfig::default())
    }

    /// A machine with custom special-purpose register names.
    pub fn with_config(isa: I, config: MachineConfig) -> Self {
        Self {
            core: MachineCore::new(config),
            isa,
        }
    }

    // ── Access ──────────────────────────────────────────────────

    /// The machine state.
    pub fn core(&self) -> &MachineCore {
        &self.core
    }

    /// Mutable machine state, for poking registers or memory directly.
    pub fn core_mut(&mut self) -> &mut MachineCore {
        &mut self.core
    }

    /// The instruction set.
    pub fn isa(&self) -> &I {
        &self.isa
    }

    /// The instruction set, mutably.
    pub fn isa_mut(&mut self) -> &mut I {
        &mut self.isa
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MachineState {
        self.core.state()
    }

    /// `true` once the program has finished.
    pub fn is_halted(&self) -> bool {
        self.core.state() == MachineState::Halted
    }

    /// `true` while waiting for input.
    pub fn is_paused(&self) -> bool {
        self.core.state() == MachineState::Paused
    }

    /// Value of a register; 0 if never written.
    pub fn register(&self, name: impl Into<Register>) -> i64 {
        self.core.register(name)
    }

    /// Set a register.
    pub fn write_register(&mut self, name: impl Into<Register>, value: i64) {
        self.core.write_register(name, value);
    }

    // ── Program ─────────────────────────────────────────────────

    /// Replace the memory image. Registers and buffers are untouched.
    pub fn load_memory<P, W>(&mut self, program: P)
    where
        P: IntoIterator<Item = W>,
        W: Into<Word>,
    {
        self.core.load_memory(program);
    }

    /// Empty the memory image.
    pub fn clear_memory(&mut self) {
        self.core.clear_memory();
    }

    /// Clear registers, scratch fields, buffers and statistics, keeping
    /// memory.
    pub fn reset(&mut self) {
        self.core.reset();
        debug!(state = %self.core.state(), "machine reset");
    }

    // ── I/O ─────────────────────────────────────────────────────

    /// Queue inputs in order.
    pub fn add_to_input_buffer(&mut self, values: impl IntoIterator<Item = i64>) {
        self.core.add_to_input_buffer(values);
    }

    /// `true` if input is queued.
    pub fn input_available(&self) -> bool {
        self.core.input_available()
    }

    /// `true` if output is pending.
    pub fn output_available(&self) -> bool {
        self.core.output_available()
    }

    /// Pop the oldest output.
    pub fn next_output(&mut self) -> Option<i64> {
        self.core.next_output()
    }

    /// Take all pending output, oldest first.
    pub fn drain_output(&mut self) -> Vec<i64> {
        self.core.drain_output()
    }

    /// Move this machine's entire output buffer onto the end of `other`'s
    /// input buffer, preserving order. Returns how many values moved.
    pub fn send_to<J: Isa>(&mut self, other: &mut RegisterMachine<J>) -> usize {
        let values = self.core.drain_output();
        let moved = values.len();
        other.core.add_to_input_buffer(values);
        moved
    }

    // ── Execution ───────────────────────────────────────────────

    /// Load `memory[ip]` into the instruction scratch field and advance
    /// the instruction pointer past it.
    ///
    /// Returns [`Signal::Halt`] when the instruction pointer is outside
    /// the program.
    fn fetch(&mut self) -> Result<Signal, MachineError> {
        let memory_len = self.core.memory().len();
        if memory_len == 0 {
            return Err(MachineError::ProgramAbsent);
        }
        let ip = self.core.ip();
        if usize::try_from(ip).map_or(true, |i| i >= memory_len) {
            return Ok(Signal::Halt);
        }
        let instruction = self.core.read_memory(ip)?;
        self.core.begin_instruction(ip, instruction);
        let length = self.isa.instruction_length(&self.core);
        self.core.set_instruction_length(length);
        self.core.set_ip(ip + length);
        Ok(Signal::Success)
    }

    /// Execute one instruction.
    ///
    /// Returns `Ok(true)` if the machine can continue, `Ok(false)` if it
    /// halted or paused for input. A halted machine stays halted and
    /// returns `Ok(false)` without fetching.
    ///
    /// On any error, and on a pause, the instruction pointer is restored
    /// so the same instruction is fetched again next time.
    ///
    /// Returns `Err(MachineError::ProgramAbsent)` if no program is loaded.
    pub fn step(&mut self) -> Result<bool, MachineError> {
        if self.is_halted() {
            return Ok(false);
        }
        let pre_ip = self.core.ip();
        match self.cycle() {
            Ok(Signal::Success) => {
                self.core.set_state(MachineState::Running);
                Ok(true)
            }
            Ok(Signal::Halt) => {
                self.core.set_state(MachineState::Halted);
                debug!(
                    ip = self.core.ip(),
                    executed = self.core.instructions_executed(),
                    "machine halted"
                );
                Ok(false)
            }
            Ok(Signal::WaitForInput) => {
                self.core.set_ip(pre_ip);
                self.core.set_state(MachineState::Paused);
                debug!(ip = pre_ip, "machine paused for input");
                Ok(false)
            }
            Err(e) => {
                self.core.set_ip(pre_ip);
                Err(e)
            }
        }
    }

    fn cycle(&mut self) -> Result<Signal, MachineError> {
        match self.fetch()? {
            Signal::Success => {}
            other => return Ok(other),
        }
        match self.isa.decode(&mut self.core)? {
            Signal::Success => {}
            other => return Ok(other),
        }
        let signal = self.isa.execute(&mut self.core)?;
        self.core.record_execution();
        trace!(
            address = self.core.instruction_address(),
            opcode = %self.core.opcode().map(ToString::to_string).unwrap_or_default(),
            "executed"
        );
        Ok(signal)
    }

    /// Step until the machine halts or pauses. Returns the state it
    /// stopped in.
    pub fn run(&mut self) -> Result<MachineState, MachineError> {
        while self.step()? {}
        Ok(self.core.state())
    }

    /// Step at most `max_steps` times. Returns the state afterwards;
    /// [`MachineState::Running`] means the budget ran out first.
    pub fn run_for(&mut self, max_steps: u64) -> Result<MachineState, MachineError> {
        for _ in 0..max_steps {
            if !self.step()? {
                break;
            }
        }
        Ok(self.core.state())
    }
}

/// `true` when neither machine has input to consume nor output to pass on,
/// so alternately running and connecting them can make no progress.
pub fn deadlocked<A: Isa, B: Isa>(a: &RegisterMachine<A>, b: &RegisterMachine<B>) -> bool {
    !a.input_available() && !a.output_available() && !b.input_available() && !b.output_available()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Operand;
    use proptest::collection::vec;
    use proptest::prelude::*;

    /// `put R V`, `inc R`, `in R`, `out R`, `bad`: just enough to drive the
    /// loop. Anything else is an unknown opcode.
    struct Tiny;

    impl Isa for Tiny {
        fn decode(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
            let text = core
                .instruction()
                .and_then(Word::as_text)
                .unwrap_or_default()
                .to_owned();
            let mut parts = text.split_whitespace();
            let op = parts.next().unwrap_or_default().to_owned();
            let operands: Vec<Operand> = parts.map(Operand::parse_token).collect();
            if op == "in" && !core.input_available() {
                return Ok(Signal::WaitForInput);
            }
            core.set_decoded(op, operands);
            Ok(Signal::Success)
        }

        fn execute(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
            let op = core.opcode().cloned().unwrap_or_default();
            match op.as_text().unwrap_or_default() {
                "put" => {
                    let v = core.resolve_operand(1)?;
                    core.store_operand(0, v)?;
                }
                "inc" => {
                    let v = core.resolve_operand(0)?;
                    core.store_operand(0, v + 1)?;
                }
                "in" => {
                    core.store_input(0)?;
                }
                "out" => {
                    let v = core.resolve_operand(0)?;
                    core.push_output(v);
                }
                "hlt" => return Ok(Signal::Halt),
                other => {
                    return Err(MachineError::UnknownOpcode {
                        opcode: other.to_owned(),
                        address: core.instruction_address(),
                    })
                }
            }
            Ok(Signal::Success)
        }
    }

    fn machine(program: &[&str]) -> RegisterMachine<Tiny> {
        let mut m = RegisterMachine::new(Tiny);
        m.load_memory(program.iter().copied());
        m
    }

    // ── Lifecycle ───────────────────────────────────────────────

    #[test]
    fn step_without_program_fails() {
        let mut m = RegisterMachine::new(Tiny);
        assert_eq!(m.state(), MachineState::Created);
        assert_eq!(m.step(), Err(MachineError::ProgramAbsent));
        assert_eq!(m.run(), Err(MachineError::ProgramAbsent));
    }

    #[test]
    fn running_off_the_end_halts() {
        let mut m = machine(&["put a 2", "inc a"]);
        assert_eq!(m.state(), MachineState::Ready);
        assert_eq!(m.step(), Ok(true));
        assert_eq!(m.state(), MachineState::Running);
        assert_eq!(m.run(), Ok(MachineState::Halted));
        assert_eq!(m.register("a"), 3);
        assert_eq!(m.core().instructions_executed(), 2);
        // Halted machines stay put.
        assert_eq!(m.step(), Ok(false));
        assert_eq!(m.core().instructions_executed(), 2);
    }

    #[test]
    fn explicit_halt_counts_as_executed() {
        let mut m = machine(&["hlt", "inc a"]);
        assert_eq!(m.run(), Ok(MachineState::Halted));
        assert_eq!(m.register("a"), 0);
        assert_eq!(m.core().count_of("hlt"), 1);
    }

    #[test]
    fn negative_ip_halts() {
        let mut m = machine(&["inc a"]);
        m.core_mut().set_ip(-3);
        assert_eq!(m.step(), Ok(false));
        assert!(m.is_halted());
    }

    #[test]
    fn reset_rewinds_and_keeps_program() {
        let mut m = machine(&["inc a", "out a"]);
        m.run().unwrap();
        assert_eq!(m.drain_output(), vec![1]);
        m.reset();
        assert_eq!(m.state(), MachineState::Ready);
        assert_eq!(m.register("a"), 0);
        assert_eq!(m.run(), Ok(MachineState::Halted));
        assert_eq!(m.drain_output(), vec![1]);
    }

    #[test]
    fn run_for_respects_budget() {
        let mut m = machine(&["inc a", "inc a", "inc a", "inc a"]);
        assert_eq!(m.run_for(2), Ok(MachineState::Running));
        assert_eq!(m.register("a"), 2);
        assert_eq!(m.run_for(10), Ok(MachineState::Halted));
        assert_eq!(m.register("a"), 4);
    }

    // ── Failure handling ────────────────────────────────────────

    #[test]
    fn unknown_opcode_restores_ip() {
        let mut m = machine(&["inc a", "bogus", "inc a"]);
        assert_eq!(m.step(), Ok(true));
        assert_eq!(
            m.step(),
            Err(MachineError::UnknownOpcode {
                opcode: "bogus".into(),
                address: 1
            })
        );
        assert_eq!(m.core().ip(), 1);
        assert_eq!(m.core().instructions_executed(), 1);
    }

    #[test]
    fn writing_to_an_immediate_is_an_error() {
        let mut m = machine(&["put 3 4"]);
        assert_eq!(m.step(), Err(MachineError::ImmediateWrite { value: 3 }));
        assert_eq!(m.core().ip(), 0);
    }

    #[test]
    fn failed_input_store_keeps_the_input() {
        let mut m = machine(&["in 3", "out a"]);
        m.add_to_input_buffer([5]);
        assert_eq!(m.step(), Err(MachineError::ImmediateWrite { value: 3 }));
        assert_eq!(m.core().ip(), 0);
        assert_eq!(m.core().input_buffer().iter().copied().collect::<Vec<_>>(), [5]);
        assert_eq!(m.core().instructions_executed(), 0);
    }

    // ── Input and output ────────────────────────────────────────

    #[test]
    fn pauses_for_input_then_resumes() {
        let mut m = machine(&["in a", "out a"]);
        assert_eq!(m.run(), Ok(MachineState::Paused));
        assert!(m.is_paused());
        assert_eq!(m.core().ip(), 0);
        assert_eq!(m.core().instructions_executed(), 0);

        m.add_to_input_buffer([42]);
        assert_eq!(m.run(), Ok(MachineState::Halted));
        assert_eq!(m.drain_output(), vec![42]);
    }

    #[test]
    fn send_to_moves_all_output_in_order() {
        let mut a = machine(&["put x 1", "out x", "inc x", "out x"]);
        let mut b = machine(&["in y", "in z"]);
        a.run().unwrap();
        assert_eq!(a.send_to(&mut b), 2);
        assert!(!a.output_available());
        b.run().unwrap();
        assert_eq!((b.register("y"), b.register("z")), (1, 2));
        assert!(deadlocked(&a, &b));
    }

    #[test]
    fn pending_output_is_not_deadlock() {
        let mut a = machine(&["put x 7", "out x"]);
        let b = machine(&["in y"]);
        a.run().unwrap();
        assert!(!deadlocked(&a, &b));
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn send_to_preserves_arrival_order(batches in vec(vec(any::<i64>(), 0..4), 0..6)) {
            let mut a = machine(&["hlt"]);
            let mut b = machine(&["hlt"]);
            let mut moved = 0;
            for (i, batch) in batches.iter().enumerate() {
                a.core_mut().add_to_output_buffer(batch.iter().copied());
                if i % 2 == 1 {
                    moved += a.send_to(&mut b);
                }
            }
            moved += a.send_to(&mut b);

            let sent: Vec<i64> = batches.concat();
            prop_assert_eq!(moved, sent.len());
            prop_assert!(!a.output_available());
            prop_assert_eq!(b.core().input_buffer().iter().copied().collect::<Vec<_>>(), sent);
        }
    }
}
