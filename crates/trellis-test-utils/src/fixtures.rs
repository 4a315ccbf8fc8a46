//! Reference instruction sets.
//!
//! Three ISAs of increasing complexity for exercising the machine loop:
//!
//! - [`ArithmeticIsa`]: `add x y` / `mul x y` into register `a`.
//! - [`AssemblyIsa`]: a register assembly with jumps and I/O.
//! - [`IntcodeIsa`]: a variable-width numeric ISA with parameter modes.

use trellis_machine::{Isa, MachineCore, MachineError, Operand, Signal, Word};

fn text_of(core: &MachineCore) -> Result<String, MachineError> {
    core.instruction()
        .and_then(Word::as_text)
        .map(str::to_owned)
        .ok_or_else(|| MachineError::MalformedInstruction {
            instruction: core
                .instruction()
                .map(ToString::to_string)
                .unwrap_or_default(),
            reason: "expected assembly text".into(),
        })
}

fn unknown(core: &MachineCore) -> MachineError {
    MachineError::UnknownOpcode {
        opcode: core.opcode().map(ToString::to_string).unwrap_or_default(),
        address: core.instruction_address(),
    }
}

/// `add x y` writes `x + y` to register `a`; `mul x y` writes `x * y`.
/// Operands are immediates or register names.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticIsa;

impl Isa for ArithmeticIsa {
    fn decode(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
        let text = text_of(core)?;
        let mut tokens = text.split_whitespace();
        let opcode = tokens.next().unwrap_or_default().to_owned();
        let operands: Vec<Operand> = tokens.map(Operand::parse_token).collect();
        if operands.len() != 2 {
            return Err(MachineError::MalformedInstruction {
                instruction: text.clone(),
                reason: format!("expected 2 operands, got {}", operands.len()),
            });
        }
        core.set_decoded(opcode, operands);
        Ok(Signal::Success)
    }

    fn execute(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
        let x = core.resolve_operand(0)?;
        let y = core.resolve_operand(1)?;
        let result = match core.opcode().and_then(Word::as_text) {
            Some("add") => x + y,
            Some("mul") => x * y,
            _ => return Err(unknown(core)),
        };
        core.write_register("a", result);
        Ok(Signal::Success)
    }
}

/// A small register assembly.
///
/// | Instruction | Effect |
/// |-------------|--------|
/// | `set X Y`   | `X = Y` |
/// | `add X Y`   | `X += Y` |
/// | `mul X Y`   | `X *= Y` |
/// | `mod X Y`   | `X = X.rem_euclid(Y)` |
/// | `jnz X Y`   | jump by `Y` if `X != 0` |
/// | `jmp Y`     | jump by `Y` |
/// | `in X`      | `X = ` next input (waits if none) |
/// | `out X`     | emit `X` |
/// | `hlt`       | halt |
///
/// Jumps are relative to the instruction's own address.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssemblyIsa;

impl AssemblyIsa {
    fn arity(opcode: &str) -> Option<usize> {
        match opcode {
            "set" | "add" | "mul" | "mod" | "jnz" => Some(2),
            "jmp" | "in" | "out" => Some(1),
            "hlt" => Some(0),
            _ => None,
        }
    }
}

impl Isa for AssemblyIsa {
    fn decode(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
        let text = text_of(core)?;
        let mut tokens = text.split_whitespace();
        let opcode = tokens.next().unwrap_or_default().to_owned();
        let operands: Vec<Operand> = tokens.map(Operand::parse_token).collect();
        let Some(arity) = Self::arity(&opcode) else {
            return Err(MachineError::UnknownOpcode {
                opcode,
                address: core.instruction_address(),
            });
        };
        if operands.len() != arity {
            return Err(MachineError::MalformedInstruction {
                instruction: text.clone(),
                reason: format!("expected {arity} operands, got {}", operands.len()),
            });
        }
        if opcode == "in" && !core.input_available() {
            return Ok(Signal::WaitForInput);
        }
        core.set_decoded(opcode, operands);
        Ok(Signal::Success)
    }

    fn execute(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
        let opcode = core
            .opcode()
            .and_then(Word::as_text)
            .unwrap_or_default()
            .to_owned();
        match opcode.as_str() {
            "set" => {
                let y = core.resolve_operand(1)?;
                core.store_operand(0, y)?;
            }
            "add" | "mul" | "mod" => {
                let x = core.resolve_operand(0)?;
                let y = core.resolve_operand(1)?;
                let v = match opcode.as_str() {
                    "add" => x + y,
                    "mul" => x * y,
                    _ if y == 0 => {
                        return Err(MachineError::MalformedInstruction {
                            instruction: text_of(core)?,
                            reason: "modulus by zero".into(),
                        })
                    }
                    _ => x.rem_euclid(y),
                };
                core.store_operand(0, v)?;
            }
            "jnz" => {
                if core.resolve_operand(0)? != 0 {
                    let offset = core.resolve_operand(1)?;
                    core.jump_relative(offset);
                }
            }
            "jmp" => {
                let offset = core.resolve_operand(0)?;
                core.jump_relative(offset);
            }
            "in" => {
                core.store_input(0)?;
            }
            "out" => {
                let v = core.resolve_operand(0)?;
                core.push_output(v);
            }
            "hlt" => return Ok(Signal::Halt),
            _ => return Err(unknown(core)),
        }
        Ok(Signal::Success)
    }
}

/// A numeric ISA with variable-width instructions.
///
/// Each instruction is `modes * 100 + opcode` followed by its parameters.
/// Mode digits, least significant first, select position (0), immediate
/// (1) or relative (2) addressing per parameter.
///
/// | Opcode | Params | Effect |
/// |--------|--------|--------|
/// | 1 | 3 | `c = a + b` |
/// | 2 | 3 | `c = a * b` |
/// | 3 | 1 | `a = ` next input (waits if none) |
/// | 4 | 1 | emit `a` |
/// | 5 | 2 | jump to `b` if `a != 0` |
/// | 6 | 2 | jump to `b` if `a == 0` |
/// | 7 | 3 | `c = (a < b) as i64` |
/// | 8 | 3 | `c = (a == b) as i64` |
/// | 9 | 1 | relative base `+= a` |
/// | 99 | 0 | halt |
#[derive(Clone, Copy, Debug, Default)]
pub struct IntcodeIsa;

impl IntcodeIsa {
    fn params(opcode: i64) -> Option<usize> {
        match opcode {
            1 | 2 | 7 | 8 => Some(3),
            5 | 6 => Some(2),
            3 | 4 | 9 => Some(1),
            99 => Some(0),
            _ => None,
        }
    }
}

impl Isa for IntcodeIsa {
    fn instruction_length(&self, core: &MachineCore) -> i64 {
        core.instruction()
            .and_then(Word::as_int)
            .and_then(|v| Self::params(v % 100))
            .map_or(1, |n| n as i64 + 1)
    }

    fn decode(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
        let address = core.instruction_address();
        let value = core.read_int(address)?;
        let opcode = value % 100;
        let params = Self::params(opcode).ok_or_else(|| MachineError::UnknownOpcode {
            opcode: opcode.to_string(),
            address,
        })?;

        let mut operands = Vec::with_capacity(params);
        let mut modes = value / 100;
        for i in 0..params {
            let raw = core.read_int(address + 1 + i as i64)?;
            let operand = match modes % 10 {
                0 => Operand::Memory(raw),
                1 => Operand::Immediate(raw),
                2 => Operand::Relative(raw),
                m => {
                    return Err(MachineError::MalformedInstruction {
                        instruction: value.to_string(),
                        reason: format!("unknown parameter mode {m}"),
                    })
                }
            };
            operands.push(operand);
            modes /= 10;
        }

        if opcode == 3 && !core.input_available() {
            return Ok(Signal::WaitForInput);
        }
        core.set_decoded(opcode, operands);
        Ok(Signal::Success)
    }

    fn execute(&mut self, core: &mut MachineCore) -> Result<Signal, MachineError> {
        let opcode = core.opcode().and_then(Word::as_int).unwrap_or_default();
        match opcode {
            1 | 2 | 7 | 8 => {
                let a = core.resolve_operand(0)?;
                let b = core.resolve_operand(1)?;
                let c = match opcode {
                    1 => a + b,
                    2 => a * b,
                    7 => i64::from(a < b),
                    _ => i64::from(a == b),
                };
                core.store_operand(2, c)?;
            }
            3 => {
                core.store_input(0)?;
            }
            4 => {
                let v = core.resolve_operand(0)?;
                core.push_output(v);
            }
            5 | 6 => {
                let a = core.resolve_operand(0)?;
                if (a != 0) == (opcode == 5) {
                    let target = core.resolve_operand(1)?;
                    core.jump_absolute(target);
                }
            }
            9 => {
                let a = core.resolve_operand(0)?;
                let base = core.relative_base();
                core.set_relative_base(base + a);
            }
            99 => return Ok(Signal::Halt),
            _ => return Err(unknown(core)),
        }
        Ok(Signal::Success)
    }
}
