//! # VVM Disassembler
//!
//! Disassemble flat VVM binary images into human-readable assembly.
//!
//! The image is consumed byte-for-byte: no header, no length prefix. Bytes
//! that decode against the opcode table become instructions, jump and call
//! targets become synthesized `label<N>` names, and everything else is
//! emitted as `db` data runs. The output re-assembles against the `vm.inc`
//! macro file named in the preamble.
//!
//! ## Example
//!
//! ```rust
//! use vvm_disassembler::disassemble;
//!
//! // vjmp +0, then vret at the jump target
//! let image = [0x40, 0x00, 0x00, 0x44];
//! let asm = disassemble(&image);
//! assert!(asm.contains("vjmp  label0"));
//! assert!(asm.contains("label0:"));
//! ```

pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod formatter;
pub mod listing;

pub use decoder::{group_value, read_operands};
pub use disassembler::{Disassembler, Options};
pub use error::{DisassemblerError, Result};
pub use formatter::{render, render_with, RenderOptions};
pub use listing::{Listing, ListingItem, Operand};

/// Disassemble an image with default options
pub fn disassemble(image: &[u8]) -> String {
    render(&Disassembler::new(image).run())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let _ = DisassemblerError::InsufficientBytes {
            offset: 0,
            needed: 2,
            available: 1,
        };
        let _ = Options::default();
        let _ = RenderOptions::default();
    }

    #[test]
    fn test_disassemble_function() {
        let asm = disassemble(&[0x44]);
        assert_eq!(asm, "%include \"vm.inc\"\n\nvret\n");
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(disassemble(&[]), "%include \"vm.inc\"\n\n");
    }
}
