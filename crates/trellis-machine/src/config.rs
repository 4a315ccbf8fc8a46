//! Machine configuration.

use crate::word::Register;

/// Names of the special-purpose registers a machine reserves.
///
/// Both live in the ordinary register file and can be read and written
/// through the register API like any other register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Register holding the instruction pointer. Default: `"_IP"`.
    pub ip_register: Register,
    /// Register holding the base address for [`Operand::Relative`]
    /// operands. Default: `"_RB"`.
    ///
    /// [`Operand::Relative`]: crate::word::Operand::Relative
    pub relative_base_register: Register,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            ip_register: Register::from("_IP"),
            relative_base_register: Register::from("_RB"),
        }
    }
}
