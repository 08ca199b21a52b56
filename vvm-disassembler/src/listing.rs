//! Listing data model
//!
//! A disassembly run produces a [`Listing`]: an address-ordered map from
//! starting offset to the items emitted there, plus the table of synthesized
//! labels. An address holds at most a label followed by one instruction or
//! data run; a data run owns every byte appended to it, so later offsets
//! inside the run have no map entry of their own.

use std::collections::BTreeMap;

use vvm_spec::Address;

/// A rendered instruction operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Immediate/register value with its encoded byte width
    Numeric { value: u64, width: usize },
    /// Synthesized control-flow label
    Label(String),
}

/// One entry in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingItem {
    /// Synthesized label, rendered as `name:`
    Label(String),

    /// Decoded instruction
    Instruction {
        mnemonic: &'static str,
        operands: Vec<Operand>,
        /// Encoded size in bytes, opcode included
        size: usize,
    },

    /// Run of bytes that did not decode as code, rendered as a `db` directive
    Data {
        bytes: Vec<u8>,
        /// Printable-character form of the run, for the trailing comment
        text: String,
    },
}

impl ListingItem {
    /// Instruction or data run (anything that consumes image bytes)
    #[inline]
    pub fn is_code(&self) -> bool {
        matches!(self, ListingItem::Instruction { .. } | ListingItem::Data { .. })
    }

    /// Number of image bytes this item covers
    pub fn byte_len(&self) -> usize {
        match self {
            ListingItem::Label(_) => 0,
            ListingItem::Instruction { size, .. } => *size,
            ListingItem::Data { bytes, .. } => bytes.len(),
        }
    }
}

/// Finished disassembly: items keyed by starting address plus the label table
#[derive(Debug, Default, Clone)]
pub struct Listing {
    items: BTreeMap<usize, Vec<ListingItem>>,
    labels: BTreeMap<Address, String>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item at `addr`
    pub fn push(&mut self, addr: usize, item: ListingItem) {
        self.items.entry(addr).or_default().push(item);
    }

    /// Label name for `target`, assigning `label<N>` on first sight.
    ///
    /// A fresh label also gets a [`ListingItem::Label`] inserted at the
    /// target address, ahead of whatever already starts there. Targets past
    /// the end of the image still get their entry; the renderer emits them
    /// so a re-assembler sees every referenced name defined.
    pub fn label_for(&mut self, target: Address) -> String {
        if let Some(name) = self.labels.get(&target) {
            return name.clone();
        }
        let name = format!("label{}", self.labels.len());
        self.labels.insert(target, name.clone());
        self.items
            .entry(target as usize)
            .or_default()
            .insert(0, ListingItem::Label(name.clone()));
        name
    }

    /// Starting address of the nearest instruction or data run strictly
    /// before `addr` (label-only entries are skipped)
    pub fn nearest_code_before(&self, addr: usize) -> Option<usize> {
        self.items
            .range(..addr)
            .rev()
            .find_map(|(&start, items)| items.iter().any(ListingItem::is_code).then_some(start))
    }

    /// Mutable access to the instruction/data item starting at `addr`
    pub fn code_item_mut(&mut self, addr: usize) -> Option<&mut ListingItem> {
        self.items
            .get_mut(&addr)
            .and_then(|items| items.iter_mut().find(|item| item.is_code()))
    }

    /// Shared access to the instruction/data item starting at `addr`
    pub fn code_item(&self, addr: usize) -> Option<&ListingItem> {
        self.items
            .get(&addr)
            .and_then(|items| items.iter().find(|item| item.is_code()))
    }

    /// Items in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ListingItem])> + '_ {
        self.items.iter().map(|(&addr, items)| (addr, items.as_slice()))
    }

    /// Synthesized labels, keyed by target address
    pub fn labels(&self) -> &BTreeMap<Address, String> {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
