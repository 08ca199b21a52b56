//! Operand extraction and numeric decode
//!
//! Operands follow the opcode byte least-significant-byte first; each group
//! is captured most-significant-byte first so its numeric value is a plain
//! big-endian fold of the captured bytes.

use vvm_spec::Descriptor;

use crate::error::{DisassemblerError, Result};

/// Raw operand bytes, most-significant byte first
pub type ByteGroup = Vec<u8>;

/// Extract the operand byte groups for the instruction at `pc`.
///
/// `pc` addresses the opcode byte; groups are read from the bytes that
/// follow it. The cursor is not advanced here, the caller does that after
/// the instruction renders successfully. If `descriptor.reversed` is set
/// the group list is reversed after extraction, matching the four
/// instructions whose written operand order is swapped.
pub fn read_operands(image: &[u8], pc: usize, descriptor: &Descriptor) -> Result<Vec<ByteGroup>> {
    let mut groups = Vec::with_capacity(descriptor.widths.len());
    let mut consumed = 0usize;

    for &width in descriptor.widths {
        let width = width as usize;
        if width == 0 {
            continue;
        }

        let start = pc + consumed + 1;
        let end = start + width;
        if end > image.len() {
            return Err(DisassemblerError::InsufficientBytes {
                offset: pc,
                needed: width,
                available: image.len().saturating_sub(start),
            });
        }

        groups.push(image[start..end].iter().rev().copied().collect());
        consumed += width;
    }

    if descriptor.reversed {
        groups.reverse();
    }

    Ok(groups)
}

/// Numeric value of a byte group (big-endian fold of the captured bytes)
#[inline]
pub fn group_value(group: &[u8]) -> u64 {
    group.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vvm_spec::Opcode;

    #[test]
    fn test_single_two_byte_operand_is_byte_swapped() {
        // vjmp 0x3412: encoded low byte first
        let image = [0x40, 0x12, 0x34];
        let groups = read_operands(&image, 0, &Opcode::Vjmp.descriptor()).unwrap();
        assert_eq!(groups, vec![vec![0x34, 0x12]]);
        assert_eq!(group_value(&groups[0]), 0x3412);
    }

    #[test]
    fn test_two_operands_consume_in_order() {
        // vmov r1, r2
        let image = [0x00, 0x01, 0x02];
        let groups = read_operands(&image, 0, &Opcode::Vmov.descriptor()).unwrap();
        assert_eq!(groups, vec![vec![0x01], vec![0x02]]);
    }

    #[test]
    fn test_four_byte_immediate() {
        let image = [0x01, 0x07, 0x44, 0x33, 0x22, 0x11];
        let groups = read_operands(&image, 0, &Opcode::Vset.descriptor()).unwrap();
        assert_eq!(groups, vec![vec![0x07], vec![0x11, 0x22, 0x33, 0x44]]);
        assert_eq!(group_value(&groups[1]), 0x1122_3344);
    }

    #[test]
    fn test_reversed_descriptor_swaps_group_order() {
        // vcrl: encoded (1-byte, 2-byte), written (2-byte, 1-byte)
        let image = [0xF0, 0xAA, 0x11, 0x22];
        let groups = read_operands(&image, 0, &Opcode::Vcrl.descriptor()).unwrap();
        assert_eq!(groups, vec![vec![0x22, 0x11], vec![0xAA]]);
    }

    #[test]
    fn test_zero_width_descriptor_yields_no_groups() {
        let image = [0x44];
        let groups = read_operands(&image, 0, &Opcode::Vret.descriptor()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_insufficient_bytes() {
        // vjmp wants two operand bytes, only one follows
        let image = [0x40, 0x12];
        let err = read_operands(&image, 0, &Opcode::Vjmp.descriptor()).unwrap_err();
        assert!(matches!(
            err,
            crate::DisassemblerError::InsufficientBytes {
                offset: 0,
                needed: 2,
                available: 1,
            }
        ));
    }

    #[test]
    fn test_insufficient_bytes_on_second_operand() {
        // vmov at the end of the image with one of two register bytes
        let image = [0xFF, 0x00, 0x01];
        let err = read_operands(&image, 1, &Opcode::Vmov.descriptor()).unwrap_err();
        assert!(matches!(
            err,
            crate::DisassemblerError::InsufficientBytes { offset: 1, .. }
        ));
    }
}
