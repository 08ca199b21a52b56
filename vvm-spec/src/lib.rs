//! # VVM Specification
//!
//! Instruction-set definitions for the VVM toy virtual machine.
//!
//! ## Key Features
//! - One-byte opcodes with variable-width operands (0, 1, 2 or 4 bytes each)
//! - 16-bit address space, control-flow targets wrap modulo 65536
//! - Operands encoded least-significant-byte first in the instruction stream
//! - Four port/control instructions whose written operand order is swapped
//!   relative to the encoded order

pub mod opcode;

pub use opcode::{Descriptor, Opcode};

/// Address type (16-bit)
pub type Address = u16;

/// Size of the VVM address space in bytes
pub const ADDRESS_SPACE: usize = 1 << 16;
