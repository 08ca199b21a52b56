//! # VVM Opcode Definitions
//!
//! This module defines the opcode values for all VVM instructions.
//! Opcodes are one byte; every value not listed here is unassigned and
//! disassembles as raw data.
//!
//! ## Opcode Encoding
//!
//! Opcodes are organized by instruction family:
//! - 0x00-0x05: Move/memory (VMOV, VSET, VLD, VST, VLDB, VSTB)
//! - 0x10-0x1A: Arithmetic/logic (VADD..VSHR)
//! - 0x20-0x26: Compare + conditional jumps (VCMP, VJZ..VJA)
//! - 0x30-0x31: Stack (VPUSH, VPOP)
//! - 0x40-0x44: Jump/call/return (VJMP, VJMPR, VCALL, VCALLR, VRET)
//! - 0xF0-0xFF: Control/port I/O (VCRL, VCRS, VOUTB, VINB, VIRET, VCRSH, VOFF)

use serde::{Deserialize, Serialize};

/// Instruction opcode (one byte)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Move/memory (0x00-0x05) ==========
    /// VMOV: rd = rs
    Vmov = 0x00,
    /// VSET: rd = imm32
    Vset = 0x01,
    /// VLD: rd = mem16[rs]
    Vld = 0x02,
    /// VST: mem16[rd] = rs
    Vst = 0x03,
    /// VLDB: rd = mem8[rs]
    Vldb = 0x04,
    /// VSTB: mem8[rd] = rs
    Vstb = 0x05,

    // ========== Arithmetic/logic (0x10-0x1A) ==========
    /// VADD: rd = rd + rs
    Vadd = 0x10,
    /// VSUB: rd = rd - rs
    Vsub = 0x11,
    /// VMUL: rd = rd * rs
    Vmul = 0x12,
    /// VDIV: rd = rd / rs
    Vdiv = 0x13,
    /// VMOD: rd = rd % rs
    Vmod = 0x14,
    /// VOR: rd = rd | rs
    Vor = 0x15,
    /// VAND: rd = rd & rs
    Vand = 0x16,
    /// VXOR: rd = rd ^ rs
    Vxor = 0x17,
    /// VNOT: rd = !rd
    Vnot = 0x18,
    /// VSHL: rd = rd << rs
    Vshl = 0x19,
    /// VSHR: rd = rd >> rs
    Vshr = 0x1A,

    // ========== Compare + conditional jumps (0x20-0x26) ==========
    /// VCMP: set flags from rd - rs
    Vcmp = 0x20,
    /// VJZ: jump if zero flag set
    Vjz = 0x21,
    /// VJNZ: jump if zero flag clear
    Vjnz = 0x22,
    /// VJC: jump if carry flag set
    Vjc = 0x23,
    /// VJNC: jump if carry flag clear
    Vjnc = 0x24,
    /// VJBE: jump if below or equal
    Vjbe = 0x25,
    /// VJA: jump if above
    Vja = 0x26,

    // ========== Stack (0x30-0x31) ==========
    /// VPUSH: push rs
    Vpush = 0x30,
    /// VPOP: pop into rd
    Vpop = 0x31,

    // ========== Jump/call/return (0x40-0x44) ==========
    /// VJMP: unconditional relative jump
    Vjmp = 0x40,
    /// VJMPR: jump to address held in register
    Vjmpr = 0x41,
    /// VCALL: relative call
    Vcall = 0x42,
    /// VCALLR: call address held in register
    Vcallr = 0x43,
    /// VRET: return from call
    Vret = 0x44,

    // ========== Control/port I/O (0xF0-0xFF) ==========
    /// VCRL: load control register
    Vcrl = 0xF0,
    /// VCRS: store control register
    Vcrs = 0xF1,
    /// VOUTB: write byte to port
    Voutb = 0xF2,
    /// VINB: read byte from port
    Vinb = 0xF3,
    /// VIRET: return from interrupt
    Viret = 0xF4,
    /// VCRSH: crash/trap
    Vcrsh = 0xFE,
    /// VOFF: power off
    Voff = 0xFF,
}

/// Static description of one instruction's encoding and written form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Lowercase mnemonic as it appears in the listing
    pub mnemonic: &'static str,

    /// Byte width of each operand, in encoded order (0 means "no operand")
    pub widths: &'static [u8],

    /// Written operand order is the reverse of the encoded order
    pub reversed: bool,
}

impl Descriptor {
    /// Total encoded size of the instruction, opcode byte included
    #[inline]
    pub fn size(&self) -> usize {
        1 + self.widths.iter().map(|&w| w as usize).sum::<usize>()
    }
}

impl Opcode {
    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            // Move/memory
            0x00 => Some(Opcode::Vmov),
            0x01 => Some(Opcode::Vset),
            0x02 => Some(Opcode::Vld),
            0x03 => Some(Opcode::Vst),
            0x04 => Some(Opcode::Vldb),
            0x05 => Some(Opcode::Vstb),

            // Arithmetic/logic
            0x10 => Some(Opcode::Vadd),
            0x11 => Some(Opcode::Vsub),
            0x12 => Some(Opcode::Vmul),
            0x13 => Some(Opcode::Vdiv),
            0x14 => Some(Opcode::Vmod),
            0x15 => Some(Opcode::Vor),
            0x16 => Some(Opcode::Vand),
            0x17 => Some(Opcode::Vxor),
            0x18 => Some(Opcode::Vnot),
            0x19 => Some(Opcode::Vshl),
            0x1A => Some(Opcode::Vshr),

            // Compare + conditional jumps
            0x20 => Some(Opcode::Vcmp),
            0x21 => Some(Opcode::Vjz),
            0x22 => Some(Opcode::Vjnz),
            0x23 => Some(Opcode::Vjc),
            0x24 => Some(Opcode::Vjnc),
            0x25 => Some(Opcode::Vjbe),
            0x26 => Some(Opcode::Vja),

            // Stack
            0x30 => Some(Opcode::Vpush),
            0x31 => Some(Opcode::Vpop),

            // Jump/call/return
            0x40 => Some(Opcode::Vjmp),
            0x41 => Some(Opcode::Vjmpr),
            0x42 => Some(Opcode::Vcall),
            0x43 => Some(Opcode::Vcallr),
            0x44 => Some(Opcode::Vret),

            // Control/port I/O
            0xF0 => Some(Opcode::Vcrl),
            0xF1 => Some(Opcode::Vcrs),
            0xF2 => Some(Opcode::Voutb),
            0xF3 => Some(Opcode::Vinb),
            0xF4 => Some(Opcode::Viret),
            0xFE => Some(Opcode::Vcrsh),
            0xFF => Some(Opcode::Voff),

            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Encoding and written-form description for this opcode
    pub const fn descriptor(self) -> Descriptor {
        const fn d(mnemonic: &'static str, widths: &'static [u8], reversed: bool) -> Descriptor {
            Descriptor { mnemonic, widths, reversed }
        }

        match self {
            Opcode::Vmov => d("vmov", &[1, 1], false),
            Opcode::Vset => d("vset", &[1, 4], false),
            Opcode::Vld => d("vld", &[1, 1], false),
            Opcode::Vst => d("vst", &[1, 1], false),
            Opcode::Vldb => d("vldb", &[1, 1], false),
            Opcode::Vstb => d("vstb", &[1, 1], false),

            Opcode::Vadd => d("vadd", &[1, 1], false),
            Opcode::Vsub => d("vsub", &[1, 1], false),
            Opcode::Vmul => d("vmul", &[1, 1], false),
            Opcode::Vdiv => d("vdiv", &[1, 1], false),
            Opcode::Vmod => d("vmod", &[1, 1], false),
            Opcode::Vor => d("vor", &[1, 1], false),
            Opcode::Vand => d("vand", &[1, 1], false),
            Opcode::Vxor => d("vxor", &[1, 1], false),
            Opcode::Vnot => d("vnot", &[1], false),
            Opcode::Vshl => d("vshl", &[1, 1], false),
            Opcode::Vshr => d("vshr", &[1, 1], false),

            Opcode::Vcmp => d("vcmp", &[1, 1], false),
            Opcode::Vjz => d("vjz", &[2], false),
            Opcode::Vjnz => d("vjnz", &[2], false),
            Opcode::Vjc => d("vjc", &[2], false),
            Opcode::Vjnc => d("vjnc", &[2], false),
            Opcode::Vjbe => d("vjbe", &[2], false),
            Opcode::Vja => d("vja", &[2], false),

            Opcode::Vpush => d("vpush", &[1], false),
            Opcode::Vpop => d("vpop", &[1], false),

            Opcode::Vjmp => d("vjmp", &[2], false),
            Opcode::Vjmpr => d("vjmpr", &[1], false),
            Opcode::Vcall => d("vcall", &[2], false),
            Opcode::Vcallr => d("vcallr", &[1], false),
            Opcode::Vret => d("vret", &[0], false),

            Opcode::Vcrl => d("vcrl", &[1, 2], true),
            Opcode::Vcrs => d("vcrs", &[1, 2], true),
            Opcode::Voutb => d("voutb", &[1, 1], true),
            Opcode::Vinb => d("vinb", &[1, 1], true),
            Opcode::Viret => d("viret", &[0], false),
            Opcode::Vcrsh => d("vcrsh", &[0], false),
            Opcode::Voff => d("voff", &[0], false),
        }
    }

    /// Lowercase mnemonic
    #[inline]
    pub const fn mnemonic(self) -> &'static str {
        self.descriptor().mnemonic
    }

    /// Check if this is a conditional or unconditional jump
    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(
            self,
            Opcode::Vjz
                | Opcode::Vjnz
                | Opcode::Vjc
                | Opcode::Vjnc
                | Opcode::Vjbe
                | Opcode::Vja
                | Opcode::Vjmp
                | Opcode::Vjmpr
        )
    }

    /// Check if this is a call
    #[inline]
    pub const fn is_call(self) -> bool {
        matches!(self, Opcode::Vcall | Opcode::Vcallr)
    }

    /// Check if this opcode transfers control (jump or call class)
    #[inline]
    pub const fn is_control_flow(self) -> bool {
        self.is_jump() || self.is_call()
    }

    /// Check if the control-flow target is supplied via a register at
    /// runtime rather than encoded as a static displacement
    #[inline]
    pub const fn is_register_indirect(self) -> bool {
        matches!(self, Opcode::Vjmpr | Opcode::Vcallr)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
