//! Listing rendering
//!
//! Linearizes a finished [`Listing`] into assembler text: a fixed
//! `%include "vm.inc"` preamble (the macro file defining the mnemonics,
//! referenced by name only), then every item in ascending address order with
//! a blank separator line before each labeled address.

use std::fmt::Write;

use crate::listing::{Listing, ListingItem, Operand};

/// Rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Prefix every line with its four-hex-digit address
    pub show_addresses: bool,
}

/// Render a listing with default options
pub fn render(listing: &Listing) -> String {
    render_with(listing, RenderOptions::default())
}

/// Render a listing into assembler text
pub fn render_with(listing: &Listing, options: RenderOptions) -> String {
    let mut out = String::new();
    out.push_str("%include \"vm.inc\"\n\n");

    for (addr, items) in listing.iter() {
        if matches!(items.first(), Some(ListingItem::Label(_))) {
            out.push('\n');
        }
        for item in items {
            if options.show_addresses {
                let _ = write!(out, "{addr:04x}: ");
            }
            out.push_str(&format_item(item));
            out.push('\n');
        }
    }

    out
}

fn format_item(item: &ListingItem) -> String {
    match item {
        ListingItem::Label(name) => format!("{name}:"),

        ListingItem::Instruction {
            mnemonic, operands, ..
        } => {
            if operands.is_empty() {
                (*mnemonic).to_string()
            } else {
                let rendered: Vec<String> = operands.iter().map(format_operand).collect();
                format!("{mnemonic}  {}", rendered.join(", "))
            }
        }

        ListingItem::Data { bytes, text } => {
            let rendered: Vec<String> = bytes.iter().map(|b| format!("0x{b:02x}")).collect();
            let mut line = format!("db  {}", rendered.join(", "));
            if !text.is_empty() {
                let _ = write!(line, "\t; {text:?}");
            }
            line
        }
    }
}

/// Numeric operands are zero-padded to two hex digits per encoded byte
fn format_operand(operand: &Operand) -> String {
    match operand {
        Operand::Numeric { value, width } => format!("0x{:01$x}", value, 2 * width),
        Operand::Label(name) => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric_operand_padding() {
        let op = Operand::Numeric {
            value: 0x7,
            width: 1,
        };
        assert_eq!(format_operand(&op), "0x07");

        let op = Operand::Numeric {
            value: 0x102,
            width: 2,
        };
        assert_eq!(format_operand(&op), "0x0102");

        let op = Operand::Numeric {
            value: 0x0000_0102,
            width: 4,
        };
        assert_eq!(format_operand(&op), "0x00000102");
    }

    #[test]
    fn test_format_instruction_line() {
        let item = ListingItem::Instruction {
            mnemonic: "vmov",
            operands: vec![
                Operand::Numeric { value: 1, width: 1 },
                Operand::Numeric { value: 2, width: 1 },
            ],
            size: 3,
        };
        assert_eq!(format_item(&item), "vmov  0x01, 0x02");
    }

    #[test]
    fn test_format_instruction_without_operands() {
        let item = ListingItem::Instruction {
            mnemonic: "vret",
            operands: vec![],
            size: 1,
        };
        assert_eq!(format_item(&item), "vret");
    }

    #[test]
    fn test_format_label_operand() {
        let item = ListingItem::Instruction {
            mnemonic: "vjmp",
            operands: vec![Operand::Label("label0".to_string())],
            size: 3,
        };
        assert_eq!(format_item(&item), "vjmp  label0");
    }

    #[test]
    fn test_format_data_run_with_text() {
        let item = ListingItem::Data {
            bytes: vec![0x68, 0x69, 0x00],
            text: "hi".to_string(),
        };
        assert_eq!(format_item(&item), "db  0x68, 0x69, 0x00\t; \"hi\"");
    }

    #[test]
    fn test_format_data_run_without_text() {
        let item = ListingItem::Data {
            bytes: vec![0xAB],
            text: String::new(),
        };
        assert_eq!(format_item(&item), "db  0xab");
    }

    #[test]
    fn test_blank_line_before_labeled_address() {
        let mut listing = Listing::new();
        listing.push(
            0,
            ListingItem::Instruction {
                mnemonic: "vjmp",
                operands: vec![Operand::Label("label0".to_string())],
                size: 3,
            },
        );
        listing.label_for(3);

        assert_eq!(
            render(&listing),
            "%include \"vm.inc\"\n\nvjmp  label0\n\nlabel0:\n"
        );
    }

    #[test]
    fn test_addresses_option() {
        let mut listing = Listing::new();
        listing.push(
            0,
            ListingItem::Instruction {
                mnemonic: "vret",
                operands: vec![],
                size: 1,
            },
        );
        let out = render_with(
            &listing,
            RenderOptions {
                show_addresses: true,
            },
        );
        assert!(out.contains("0000: vret\n"));
    }
}
