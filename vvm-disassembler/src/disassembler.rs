//! Main disassembler logic
//!
//! A [`Disassembler`] is a single-pass decode session over one image: it
//! walks the cursor across the buffer, decoding instructions where the
//! opcode table and remaining bytes allow and demoting everything else to
//! data runs. Every step advances the cursor by at least one byte, so a run
//! always terminates with the whole image accounted for.

use vvm_spec::{Address, Opcode, ADDRESS_SPACE};

use crate::decoder::{group_value, read_operands};
use crate::listing::{Listing, ListingItem, Operand};

/// Decode-session options
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Inline-string guard: treat a control-flow opcode as data when it
    /// directly extends a data run whose last byte is nonzero. Heuristic,
    /// can misclassify in both directions; on by default.
    pub string_heuristic: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            string_heuristic: true,
        }
    }
}

/// Single-pass decode session over one binary image
pub struct Disassembler<'a> {
    image: &'a [u8],
    pc: usize,
    listing: Listing,
    options: Options,
}

impl<'a> Disassembler<'a> {
    pub fn new(image: &'a [u8]) -> Self {
        Self::with_options(image, Options::default())
    }

    pub fn with_options(image: &'a [u8], options: Options) -> Self {
        Self {
            image,
            pc: 0,
            listing: Listing::new(),
            options,
        }
    }

    /// Decode the whole image and hand back the finished listing
    pub fn run(mut self) -> Listing {
        while self.pc < self.image.len() {
            self.step();
        }
        self.listing
    }

    fn step(&mut self) {
        let byte = self.image[self.pc];

        let Some(opcode) = Opcode::from_u8(byte) else {
            self.classify_as_data();
            return;
        };

        let descriptor = opcode.descriptor();
        let groups = match read_operands(self.image, self.pc, &descriptor) {
            Ok(groups) => groups,
            Err(err) => {
                // Truncated instruction: only the opcode byte is consumed,
                // the cursor moves by one, not by the declared width.
                tracing::debug!(pc = self.pc, %err, "demoting truncated instruction to data");
                self.classify_as_data();
                return;
            }
        };

        let operands = if opcode.is_control_flow() {
            if self.options.string_heuristic && continues_open_run(&self.listing, self.pc) {
                tracing::debug!(pc = self.pc, byte, "control-flow byte looks like string data");
                self.classify_as_data();
                return;
            }
            vec![self.resolve_target(opcode, &groups.concat())]
        } else {
            groups
                .iter()
                .map(|group| Operand::Numeric {
                    value: group_value(group),
                    width: group.len(),
                })
                .collect()
        };

        self.listing.push(
            self.pc,
            ListingItem::Instruction {
                mnemonic: descriptor.mnemonic,
                operands,
                size: descriptor.size(),
            },
        );
        self.pc += descriptor.size();
    }

    /// Compute the absolute target of a jump/call and swap in its label.
    ///
    /// Non-register-indirect targets are displacements relative to the byte
    /// after the full instruction; register-indirect values are rendered as
    /// if absolute even though the VM resolves them at runtime. Either way
    /// the target wraps into the 16-bit address space.
    fn resolve_target(&mut self, opcode: Opcode, operand_bytes: &[u8]) -> Operand {
        let mut target = group_value(operand_bytes) as usize;
        if !opcode.is_register_indirect() {
            target += self.pc + opcode.descriptor().size();
        }
        let target = (target % ADDRESS_SPACE) as Address;

        let name = self.listing.label_for(target);
        tracing::debug!(pc = self.pc, target, label = %name, "resolved control-flow target");
        Operand::Label(name)
    }

    /// Emit the byte at the cursor as data, extending the preceding run when
    /// the nearest earlier instruction/data item is a run.
    fn classify_as_data(&mut self) {
        let byte = self.image[self.pc];

        let run = self
            .listing
            .nearest_code_before(self.pc)
            .and_then(|addr| self.listing.code_item_mut(addr));

        match run {
            Some(ListingItem::Data { bytes, text }) => {
                bytes.push(byte);
                push_printable(text, byte);
            }
            _ => {
                let mut text = String::new();
                push_printable(&mut text, byte);
                self.listing.push(
                    self.pc,
                    ListingItem::Data {
                        bytes: vec![byte],
                        text,
                    },
                );
            }
        }

        self.pc += 1;
    }
}

/// Inline-string guard: true when the byte at `pc` directly continues a data
/// run that does not end in a NUL terminator yet
fn continues_open_run(listing: &Listing, pc: usize) -> bool {
    let Some(addr) = listing.nearest_code_before(pc) else {
        return false;
    };
    match listing.code_item(addr) {
        Some(ListingItem::Data { bytes, .. }) => bytes.last() != Some(&0x00),
        _ => false,
    }
}

/// Append the byte's character form when it is printable non-whitespace ASCII
fn push_printable(text: &mut String, byte: u8) {
    if byte.is_ascii_graphic() {
        text.push(byte as char);
    }
}
