//! Machine state shared between the framework and an [`Isa`](crate::Isa).
//!
//! [`MachineCore`] owns the register file, memory image, scratch decode
//! fields, I/O buffers and statistics. Everything an instruction set can
//! do to a machine goes through its methods.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::config::MachineConfig;
use crate::error::MachineError;
use crate::word::{Operand, Register, Word};

/// Where a machine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MachineState {
    /// No program has been loaded.
    Created,
    /// A program is loaded and nothing has run since the last reset.
    Ready,
    /// At least one instruction has executed and the machine can continue.
    Running,
    /// Decode asked for input that is not there yet.
    Paused,
    /// The program finished.
    Halted,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Halted => "halted",
        };
        f.write_str(s)
    }
}

/// Registers, memory, I/O and statistics of one machine.
#[derive(Clone, Debug)]
pub struct MachineCore {
    config: MachineConfig,
    registers: IndexMap<Register, i64>,
    memory: Vec<Word>,
    instruction: Option<Word>,
    instruction_address: i64,
    instruction_length: i64,
    opcode: Option<Word>,
    operands: SmallVec<[Operand; 4]>,
    input_buffer: VecDeque<i64>,
    output_buffer: VecDeque<i64>,
    instructions_executed: u64,
    instruction_count: IndexMap<Word, u64>,
    state: MachineState,
}

impl MachineCore {
    /// An empty core with no program loaded.
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            registers: IndexMap::new(),
            memory: Vec::new(),
            instruction: None,
            instruction_address: 0,
            instruction_length: 1,
            opcode: None,
            operands: SmallVec::new(),
            input_buffer: VecDeque::new(),
            output_buffer: VecDeque::new(),
            instructions_executed: 0,
            instruction_count: IndexMap::new(),
            state: MachineState::Created,
        }
    }

    /// The configuration this core was built with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MachineState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: MachineState) {
        self.state = state;
    }

    /// Clear registers, scratch fields, buffers and statistics. Memory is
    /// kept.
    pub fn reset(&mut self) {
        self.registers.clear();
        self.clear_scratch();
        self.input_buffer.clear();
        self.output_buffer.clear();
        self.instructions_executed = 0;
        self.instruction_count.clear();
        self.state = if self.memory.is_empty() {
            MachineState::Created
        } else {
            MachineState::Ready
        };
    }

    fn clear_scratch(&mut self) {
        self.instruction = None;
        self.instruction_address = 0;
        self.instruction_length = 1;
        self.opcode = None;
        self.operands.clear();
    }

    // ── Registers ───────────────────────────────────────────────

    /// Current value of a register; 0 if it was never written.
    pub fn register(&self, name: impl Into<Register>) -> i64 {
        self.registers.get(&name.into()).copied().unwrap_or(0)
    }

    /// Set a register.
    pub fn write_register(&mut self, name: impl Into<Register>, value: i64) {
        self.registers.insert(name.into(), value);
    }

    /// Every register written so far, in first-write order.
    pub fn registers(&self) -> &IndexMap<Register, i64> {
        &self.registers
    }

    /// The instruction pointer.
    pub fn ip(&self) -> i64 {
        self.register(&self.config.ip_register)
    }

    /// Set the instruction pointer.
    pub fn set_ip(&mut self, ip: i64) {
        let name = self.config.ip_register.clone();
        self.write_register(name, ip);
    }

    /// The base address for [`Operand::Relative`] operands.
    pub fn relative_base(&self) -> i64 {
        self.register(&self.config.relative_base_register)
    }

    /// Set the relative base.
    pub fn set_relative_base(&mut self, base: i64) {
        let name = self.config.relative_base_register.clone();
        self.write_register(name, base);
    }

    // ── Memory ──────────────────────────────────────────────────

    /// Replace the memory image with `program`, one word per address from 0.
    pub fn load_memory<I, W>(&mut self, program: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<Word>,
    {
        self.memory = program.into_iter().map(Into::into).collect();
        self.state = if self.memory.is_empty() {
            MachineState::Created
        } else {
            MachineState::Ready
        };
    }

    /// Empty the memory image.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
        self.state = MachineState::Created;
    }

    /// The memory image.
    pub fn memory(&self) -> &[Word] {
        &self.memory
    }

    /// The word at `address`; addresses past the end read as `Int(0)`.
    pub fn read_memory(&self, address: i64) -> Result<Word, MachineError> {
        let index = usize::try_from(address).map_err(|_| MachineError::InvalidAddress { address })?;
        Ok(self.memory.get(index).cloned().unwrap_or_default())
    }

    /// The integer at `address`.
    pub fn read_int(&self, address: i64) -> Result<i64, MachineError> {
        self.read_memory(address)?
            .as_int()
            .ok_or(MachineError::NotAnInteger { address })
    }

    /// Store `word` at `address`, growing memory with `Int(0)` as needed.
    pub fn write_memory(&mut self, address: i64, word: impl Into<Word>) -> Result<(), MachineError> {
        let index = usize::try_from(address).map_err(|_| MachineError::InvalidAddress { address })?;
        if index >= self.memory.len() {
            self.memory.resize(index + 1, Word::default());
        }
        self.memory[index] = word.into();
        Ok(())
    }

    // ── Scratch fields ──────────────────────────────────────────

    pub(crate) fn begin_instruction(&mut self, address: i64, instruction: Word) {
        self.instruction = Some(instruction);
        self.instruction_address = address;
        self.opcode = None;
        self.operands.clear();
    }

    pub(crate) fn set_instruction_length(&mut self, length: i64) {
        self.instruction_length = length;
    }

    /// The instruction most recently fetched.
    pub fn instruction(&self) -> Option<&Word> {
        self.instruction.as_ref()
    }

    /// Address the current instruction was fetched from.
    pub fn instruction_address(&self) -> i64 {
        self.instruction_address
    }

    /// Width of the current instruction.
    pub fn instruction_length(&self) -> i64 {
        self.instruction_length
    }

    /// Record the decoded opcode and operands for the execute stage.
    pub fn set_decoded(
        &mut self,
        opcode: impl Into<Word>,
        operands: impl IntoIterator<Item = Operand>,
    ) {
        self.opcode = Some(opcode.into());
        self.operands = operands.into_iter().collect();
    }

    /// The decoded opcode.
    pub fn opcode(&self) -> Option<&Word> {
        self.opcode.as_ref()
    }

    /// The decoded operands.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// The `index`-th decoded operand.
    pub fn operand(&self, index: usize) -> Result<&Operand, MachineError> {
        self.operands
            .get(index)
            .ok_or_else(|| MachineError::MalformedInstruction {
                instruction: self
                    .instruction
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                reason: format!("missing operand {index}"),
            })
    }

    // ── Operand access ──────────────────────────────────────────

    /// The value an operand denotes.
    pub fn resolve(&self, operand: &Operand) -> Result<i64, MachineError> {
        match operand {
            Operand::Immediate(v) => Ok(*v),
            Operand::Register(r) => Ok(self.register(r)),
            Operand::Memory(address) => self.read_int(*address),
            Operand::Relative(offset) => self.read_int(self.relative_base() + offset),
        }
    }

    /// The value of the `index`-th decoded operand.
    pub fn resolve_operand(&self, index: usize) -> Result<i64, MachineError> {
        self.resolve(self.operand(index)?)
    }

    /// Write `value` to the storage an operand names.
    ///
    /// Returns `Err(MachineError::ImmediateWrite)` for immediates.
    pub fn store(&mut self, operand: &Operand, value: i64) -> Result<(), MachineError> {
        match operand {
            Operand::Immediate(v) => Err(MachineError::ImmediateWrite { value: *v }),
            Operand::Register(r) => {
                self.write_register(r, value);
                Ok(())
            }
            Operand::Memory(address) => self.write_memory(*address, value),
            Operand::Relative(offset) => {
                let address = self.relative_base() + offset;
                self.write_memory(address, value)
            }
        }
    }

    /// Write `value` to the `index`-th decoded operand.
    pub fn store_operand(&mut self, index: usize, value: i64) -> Result<(), MachineError> {
        let operand = self.operand(index)?.clone();
        self.store(&operand, value)
    }

    /// Move the oldest input into the `index`-th decoded operand.
    ///
    /// The destination is checked before the input is taken, so a failed
    /// store leaves the input buffer as it was. Returns the stored value, or
    /// `None` with nothing written if no input is queued.
    pub fn store_input(&mut self, index: usize) -> Result<Option<i64>, MachineError> {
        let operand = self.operand(index)?.clone();
        self.check_writable(&operand)?;
        let Some(value) = self.next_input() else {
            return Ok(None);
        };
        self.store(&operand, value)?;
        Ok(Some(value))
    }

    fn check_writable(&self, operand: &Operand) -> Result<(), MachineError> {
        let address = match operand {
            Operand::Immediate(v) => return Err(MachineError::ImmediateWrite { value: *v }),
            Operand::Register(_) => return Ok(()),
            Operand::Memory(address) => *address,
            Operand::Relative(offset) => self.relative_base() + offset,
        };
        if address < 0 {
            return Err(MachineError::InvalidAddress { address });
        }
        Ok(())
    }

    // ── Jumps ───────────────────────────────────────────────────

    /// Continue at `address`.
    pub fn jump_absolute(&mut self, address: i64) {
        self.set_ip(address);
    }

    /// Continue at the current instruction's address plus `offset`.
    ///
    /// The instruction pointer has already moved past the instruction, so
    /// the width is subtracted back out.
    pub fn jump_relative(&mut self, offset: i64) {
        let ip = self.ip();
        self.set_ip(ip + offset - self.instruction_length);
    }

    // ── I/O ─────────────────────────────────────────────────────

    /// `true` if the input buffer is non-empty.
    pub fn input_available(&self) -> bool {
        !self.input_buffer.is_empty()
    }

    /// Pop the oldest input.
    pub fn next_input(&mut self) -> Option<i64> {
        self.input_buffer.pop_front()
    }

    /// Queue inputs in order.
    pub fn add_to_input_buffer(&mut self, values: impl IntoIterator<Item = i64>) {
        self.input_buffer.extend(values);
    }

    /// Drop all pending input.
    pub fn clear_input_buffer(&mut self) {
        self.input_buffer.clear();
    }

    /// Pending input, oldest first.
    pub fn input_buffer(&self) -> &VecDeque<i64> {
        &self.input_buffer
    }

    /// `true` if the output buffer is non-empty.
    pub fn output_available(&self) -> bool {
        !self.output_buffer.is_empty()
    }

    /// Pop the oldest output.
    pub fn next_output(&mut self) -> Option<i64> {
        self.output_buffer.pop_front()
    }

    /// Queue outputs in order.
    pub fn add_to_output_buffer(&mut self, values: impl IntoIterator<Item = i64>) {
        self.output_buffer.extend(values);
    }

    /// Queue a single output.
    pub fn push_output(&mut self, value: i64) {
        self.output_buffer.push_back(value);
    }

    /// Drop all pending output.
    pub fn clear_output_buffer(&mut self) {
        self.output_buffer.clear();
    }

    /// Pending output, oldest first.
    pub fn output_buffer(&self) -> &VecDeque<i64> {
        &self.output_buffer
    }

    /// Take all pending output, oldest first.
    pub fn drain_output(&mut self) -> Vec<i64> {
        self.output_buffer.drain(..).collect()
    }

    // ── Statistics ──────────────────────────────────────────────

    /// Instructions executed since the last reset.
    pub fn instructions_executed(&self) -> u64 {
        self.instructions_executed
    }

    /// Executions per opcode since the last reset, in first-seen order.
    pub fn instruction_count(&self) -> &IndexMap<Word, u64> {
        &self.instruction_count
    }

    /// Executions of one opcode since the last reset.
    pub fn count_of(&self, opcode: impl Into<Word>) -> u64 {
        self.instruction_count
            .get(&opcode.into())
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn record_execution(&mut self) {
        self.instructions_executed += 1;
        if let Some(op) = &self.opcode {
            *self.instruction_count.entry(op.clone()).or_insert(0) += 1;
        }
    }
}

impl Default for MachineCore {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn unseen_registers_read_zero() {
        let core = MachineCore::default();
        assert_eq!(core.register("a"), 0);
        assert_eq!(core.register(7i64), 0);
        assert_eq!(core.ip(), 0);
    }

    #[test]
    fn numeric_names_share_a_slot() {
        let mut core = MachineCore::default();
        core.write_register("3", 11);
        assert_eq!(core.register(3i64), 11);
        core.write_register(3i64, 12);
        assert_eq!(core.register("3"), 12);
        assert_eq!(core.registers().len(), 1);
    }

    #[test]
    fn ip_is_an_ordinary_register() {
        let mut core = MachineCore::default();
        core.set_ip(5);
        assert_eq!(core.register("_IP"), 5);
        core.write_register("_IP", 9);
        assert_eq!(core.ip(), 9);
    }

    #[test]
    fn custom_ip_register() {
        let mut core = MachineCore::new(MachineConfig {
            ip_register: Register::from(0i64),
            ..MachineConfig::default()
        });
        core.write_register(0i64, 4);
        assert_eq!(core.ip(), 4);
    }

    #[test]
    fn memory_reads_past_end_are_zero_and_writes_grow() {
        let mut core = MachineCore::default();
        core.load_memory([1i64, 2, 3]);
        assert_eq!(core.read_int(10), Ok(0));
        core.write_memory(5, 42i64).unwrap();
        assert_eq!(core.memory().len(), 6);
        assert_eq!(core.read_int(5), Ok(42));
        assert_eq!(core.read_int(4), Ok(0));
        assert_eq!(
            core.read_int(-1),
            Err(MachineError::InvalidAddress { address: -1 })
        );
    }

    #[test]
    fn text_cells_are_not_integers() {
        let mut core = MachineCore::default();
        core.load_memory(["nop"]);
        assert_eq!(core.read_int(0), Err(MachineError::NotAnInteger { address: 0 }));
    }

    #[test]
    fn load_and_clear_memory_drive_state() {
        let mut core = MachineCore::default();
        assert_eq!(core.state(), MachineState::Created);
        core.load_memory(["a", "b"]);
        assert_eq!(core.state(), MachineState::Ready);
        core.clear_memory();
        assert_eq!(core.state(), MachineState::Created);
    }

    #[test]
    fn operands_resolve_and_store_by_mode() {
        let mut core = MachineCore::default();
        core.load_memory([10i64, 20, 30, 40]);
        core.write_register("x", 7);
        core.set_relative_base(2);

        assert_eq!(core.resolve(&Operand::Immediate(-5)), Ok(-5));
        assert_eq!(core.resolve(&Operand::Register("x".into())), Ok(7));
        assert_eq!(core.resolve(&Operand::Memory(1)), Ok(20));
        assert_eq!(core.resolve(&Operand::Relative(1)), Ok(40));

        core.store(&Operand::Relative(-2), 99).unwrap();
        assert_eq!(core.read_int(0), Ok(99));
        core.store(&Operand::Register("y".into()), 3).unwrap();
        assert_eq!(core.register("y"), 3);
        assert_eq!(
            core.store(&Operand::Immediate(1), 3),
            Err(MachineError::ImmediateWrite { value: 1 })
        );
    }

    #[test]
    fn store_input_keeps_input_on_a_bad_destination() {
        let mut core = MachineCore::default();
        core.add_to_input_buffer([5, 6]);
        core.begin_instruction(0, Word::from("in"));

        core.set_decoded("in", [Operand::Immediate(2)]);
        assert_eq!(core.store_input(0), Err(MachineError::ImmediateWrite { value: 2 }));
        core.set_decoded("in", [Operand::Memory(-3)]);
        assert_eq!(core.store_input(0), Err(MachineError::InvalidAddress { address: -3 }));
        assert_eq!(core.input_buffer().len(), 2);

        core.set_decoded("in", [Operand::Register("a".into())]);
        assert_eq!(core.store_input(0), Ok(Some(5)));
        assert_eq!(core.register("a"), 5);
        core.set_decoded("in", [Operand::Relative(4)]);
        assert_eq!(core.store_input(0), Ok(Some(6)));
        assert_eq!(core.read_int(4), Ok(6));
        assert_eq!(core.store_input(0), Ok(None));
    }

    #[test]
    fn missing_operand_is_malformed() {
        let mut core = MachineCore::default();
        core.begin_instruction(0, Word::from("inc"));
        core.set_decoded("inc", []);
        assert!(matches!(
            core.resolve_operand(0),
            Err(MachineError::MalformedInstruction { .. })
        ));
    }

    #[test]
    fn jumps() {
        let mut core = MachineCore::default();
        // Simulate a width-3 instruction fetched from address 10.
        core.begin_instruction(10, Word::Int(0));
        core.set_instruction_length(3);
        core.set_ip(13);
        core.jump_relative(-4);
        assert_eq!(core.ip(), 6);
        core.jump_absolute(100);
        assert_eq!(core.ip(), 100);
    }

    #[test]
    fn buffers_are_fifo() {
        let mut core = MachineCore::default();
        core.add_to_input_buffer([1, 2, 3]);
        assert!(core.input_available());
        assert_eq!(core.next_input(), Some(1));
        assert_eq!(core.next_input(), Some(2));
        core.clear_input_buffer();
        assert_eq!(core.next_input(), None);

        core.push_output(4);
        core.add_to_output_buffer([5, 6]);
        assert_eq!(core.next_output(), Some(4));
        assert_eq!(core.drain_output(), vec![5, 6]);
        assert!(!core.output_available());
    }

    #[test]
    fn reset_keeps_memory_only() {
        let mut core = MachineCore::default();
        core.load_memory(["x"]);
        core.write_register("a", 1);
        core.add_to_input_buffer([1]);
        core.push_output(2);
        core.set_decoded("x", []);
        core.record_execution();
        core.reset();

        assert!(core.registers().is_empty());
        assert!(!core.input_available());
        assert!(!core.output_available());
        assert_eq!(core.instructions_executed(), 0);
        assert!(core.instruction_count().is_empty());
        assert!(core.opcode().is_none());
        assert_eq!(core.memory().len(), 1);
        assert_eq!(core.state(), MachineState::Ready);
    }

    #[test]
    fn statistics_count_by_opcode() {
        let mut core = MachineCore::default();
        for op in ["add", "mul", "add"] {
            core.set_decoded(op, []);
            core.record_execution();
        }
        assert_eq!(core.instructions_executed(), 3);
        assert_eq!(core.count_of("add"), 2);
        assert_eq!(core.count_of("mul"), 1);
        assert_eq!(core.count_of("jmp"), 0);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn input_is_consumed_in_arrival_order(
            batches in vec((vec(any::<i64>(), 0..5), 0usize..4), 0..8)
        ) {
            let mut core = MachineCore::default();
            let mut taken = Vec::new();
            for (batch, pops) in &batches {
                core.add_to_input_buffer(batch.iter().copied());
                taken.extend((0..*pops).map_while(|_| core.next_input()));
            }
            taken.extend(std::iter::from_fn(|| core.next_input()));

            let sent: Vec<i64> = batches.iter().flat_map(|(b, _)| b.iter().copied()).collect();
            prop_assert_eq!(taken, sent);
        }

        #[test]
        fn numeric_register_names_match_indices(n in any::<i64>(), v in any::<i64>()) {
            let mut core = MachineCore::default();
            core.write_register(format!(" {n} "), v);
            prop_assert_eq!(core.register(n), v);
            prop_assert_eq!(core.register(n.to_string()), v);
            prop_assert_eq!(core.registers().len(), 1);
        }
    }
}
