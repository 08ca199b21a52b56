//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("operand needs {needed} bytes at offset {offset:#06x}, only {available} remain")]
    InsufficientBytes {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DisassemblerError::InsufficientBytes {
            offset: 2,
            needed: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "operand needs 2 bytes at offset 0x0002, only 1 remain"
        );
    }
}
