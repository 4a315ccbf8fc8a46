//! Register names, memory words and decoded operands.

use std::fmt;

/// A register name.
///
/// Names arriving as text are normalised: anything that parses as an
/// integer becomes [`Register::Index`], so `"3"` and `3` address the same
/// register.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    /// A numbered register.
    Index(i64),
    /// A named register.
    Name(String),
}

impl From<i64> for Register {
    fn from(i: i64) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for Register {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(i) => Self::Index(i),
            Err(_) => Self::Name(s.to_owned()),
        }
    }
}

impl From<String> for Register {
    fn from(s: String) -> Self {
        match s.trim().parse::<i64>() {
            Ok(i) => Self::Index(i),
            Err(_) => Self::Name(s),
        }
    }
}

impl From<&Register> for Register {
    fn from(r: &Register) -> Self {
        r.clone()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

/// One memory cell: an integer or an instruction in text form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Word {
    /// A numeric cell.
    Int(i64),
    /// A textual cell, typically one line of assembly.
    Text(String),
}

impl Word {
    /// The integer value, if this is an [`Word::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(_) => None,
        }
    }

    /// The text, if this is a [`Word::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(t) => Some(t),
        }
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i64> for Word {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// A decoded operand, tagged with its addressing mode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The literal value.
    Immediate(i64),
    /// The contents of a register.
    Register(Register),
    /// The contents of an absolute memory address.
    Memory(i64),
    /// The contents of memory at the relative base plus an offset.
    Relative(i64),
}

impl Operand {
    /// Parse an assembly token: an integer literal becomes
    /// [`Operand::Immediate`], anything else names a register.
    pub fn parse_token(token: &str) -> Self {
        match token.trim().parse::<i64>() {
            Ok(v) => Self::Immediate(v),
            Err(_) => Self::Register(Register::Name(token.trim().to_owned())),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(v) => write!(f, "#{v}"),
            Self::Register(r) => write!(f, "{r}"),
            Self::Memory(a) => write!(f, "[{a}]"),
            Self::Relative(o) => write!(f, "[rb{o:+}]"),
        }
    }
}
