// Copyright 2021 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The encoded form of the controller bring-up commands.
//!
//! Each entry of a sequence is laid out as
//!
//! ```text
//! opcode  count  params[count & 0x7F]  [delay, if count & 0x80]
//! ```
//!
//! i.e., the high bit of the count byte says that one more byte follows the
//! parameters: the number of milliseconds to wait after the command, where
//! `0xFF` stands for 500ms. Entries are simply concatenated; a sequence is
//! well-formed when it ends exactly at an entry boundary.

use core::fmt;

use crate::command_structs::{ColorOrder, Colmod, ColumnOrder, Madctl, RowOrder};

pub const SLPOUT: u8 = 0x11;
pub const INVOFF: u8 = 0x20;
pub const INVON: u8 = 0x21;
pub const DISPON: u8 = 0x29;
pub const CASET: u8 = 0x2A;
pub const RASET: u8 = 0x2B;
pub const MADCTL: u8 = 0x36;
pub const COLMOD: u8 = 0x3A;
pub const FRMCTR1: u8 = 0xB1;
pub const FRMCTR2: u8 = 0xB2;
pub const FRMCTR3: u8 = 0xB3;
pub const INVCTR: u8 = 0xB4;
pub const DISSET5: u8 = 0xB6;
pub const PWCTR1: u8 = 0xC0;
pub const PWCTR2: u8 = 0xC1;
pub const PWCTR3: u8 = 0xC2;
pub const PWCTR4: u8 = 0xC3;
pub const PWCTR5: u8 = 0xC4;
pub const VMCTR1: u8 = 0xC5;
pub const GMCTRP1: u8 = 0xE0;
pub const GMCTRN1: u8 = 0xE1;

/// Set in the count byte when a delay byte follows the parameters.
pub const DELAY_FLAG: u8 = 0x80;
/// The bits of the count byte holding the number of parameters.
pub const PARAM_COUNT_MASK: u8 = 0x7F;
/// A delay byte of this value means [LONG_DELAY_MS] rather than 255ms.
pub const LONG_DELAY_MARKER: u8 = 0xFF;
pub const LONG_DELAY_MS: u16 = 500;

/// MADCTL value the base table starts with: bottom-to-top rows,
/// right-to-left columns, BGR.
const PLACEHOLDER_MADCTL: u8 = 0xC0;

/// Bring-up commands for the 128x160 ST7735S modules, without the trailing
/// color order and inversion entries [build_sequence()] appends.
#[rustfmt::skip]
pub const BASE_SEQUENCE: &[u8] = &[
    SLPOUT, DELAY_FLAG, 120,
    FRMCTR1, 3, 0x01, 0x2C, 0x2D,  // Normal mode.
    FRMCTR2, 3, 0x01, 0x2C, 0x2D,  // Idle mode.
    FRMCTR3, 6, 0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D,  // Partial mode.
    INVCTR, 1, 0x07,
    DISSET5, 3, 0xA2, 0x02, 0x84,
    PWCTR1, 3, 0xA2, 0x02, 0x84,  // GVDD = 4.7V, 1.0uA.
    PWCTR2, 1, 0xC5,  // VGH = 14.7V, VGL = -7.35V.
    PWCTR3, 2, 0x0A, 0x00,
    PWCTR4, 2, 0x8A, 0x2A,
    PWCTR5, 2, 0x8A, 0xEE,
    VMCTR1, 1, 0x0E,  // VCOMH = 4V, VCOML = -1.1V.
    INVOFF, 0,
    COLMOD, 1, Colmod::R5G6B5 as u8,
    MADCTL, 1, PLACEHOLDER_MADCTL,
    CASET, 4, 0x00, 0x00, 0x00, 0x4F,
    RASET, 4, 0x00, 0x00, 0x00, 0x9F,
    GMCTRP1, 16, 0x04, 0x22, 0x07, 0x0A, 0x2E, 0x30, 0x25, 0x2A,
                 0x28, 0x26, 0x2E, 0x3A, 0x00, 0x01, 0x03, 0x13,
    GMCTRN1, 16, 0x04, 0x16, 0x06, 0x0D, 0x2D, 0x26, 0x23, 0x27,
                 0x27, 0x25, 0x2D, 0x3B, 0x00, 0x01, 0x04, 0x13,
    DISPON, DELAY_FLAG, 100,
];

const MADCTL_ENTRY_LEN: usize = 3;
const INVON_ENTRY: [u8; 2] = [INVON, 0];

/// Upper bound of the length of any sequence [build_sequence()] returns.
pub const MAX_SEQUENCE_LEN: usize =
    BASE_SEQUENCE.len() + MADCTL_ENTRY_LEN + INVON_ENTRY.len();

/// Returns the length in bytes of the entry starting at `offset`, or [None]
/// if the entry runs past the end of `bytes`.
const fn entry_len(bytes: &[u8], offset: usize) -> Option<usize> {
    if offset + 2 > bytes.len() {
        return None;
    }
    let count = bytes[offset + 1];
    let mut len = 2 + (count & PARAM_COUNT_MASK) as usize;
    if count & DELAY_FLAG != 0 {
        len += 1;
    }
    if offset + len > bytes.len() { None } else { Some(len) }
}

/// Checks that `bytes` can be walked entry by entry up to its very end.
pub const fn is_well_formed(bytes: &[u8]) -> bool {
    let mut offset = 0;
    while offset < bytes.len() {
        match entry_len(bytes, offset) {
            Some(len) => offset += len,
            None => return false,
        }
    }
    true
}

const _: () = assert!(is_well_formed(BASE_SEQUENCE));
const _: () = assert!(is_well_formed(&INVON_ENTRY));
const _: () = assert!(is_well_formed(&madctl_entry(0)));
// Every entry build_sequence() may append is a fixed-size array, so this
// bounds all variants.
const _: () = assert!(MAX_SEQUENCE_LEN >=
    BASE_SEQUENCE.len() + MADCTL_ENTRY_LEN + INVON_ENTRY.len());

/// A sequence ends in the middle of an entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MalformedSequence {
    /// Byte offset where the truncated entry starts.
    pub offset: usize,
}

impl fmt::Display for MalformedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "init sequence truncated in the entry at byte {}",
               self.offset)
    }
}

/// One decoded command of a sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry<'a> {
    pub opcode: u8,
    pub params: &'a [u8],
    /// How long to wait after issuing the command, if at all.
    pub delay_ms: Option<u16>,
}

impl<'a> Entry<'a> {
    /// Length of the entry in its encoded form.
    pub fn encoded_len(&self) -> usize {
        2 + self.params.len() + if self.delay_ms.is_some() { 1 } else { 0 }
    }
}

/// Walks an encoded sequence entry by entry.
///
/// Yields an error once, at the first truncated entry, and nothing after it.
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Entries<'a> {
    pub fn new(bytes: &'a [u8]) -> Self { Self{bytes, offset: 0} }

    /// The offset of the next entry to decode.
    pub fn offset(&self) -> usize { self.offset }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Entry<'a>, MalformedSequence>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.offset;
        if start >= self.bytes.len() {
            return None;
        }
        let len = match entry_len(self.bytes, start) {
            Some(len) => len,
            None => {
                self.offset = self.bytes.len();
                return Some(Err(MalformedSequence{offset: start}));
            }
        };
        let entry = &self.bytes[start..start + len];
        let count = entry[1];
        let num_params = (count & PARAM_COUNT_MASK) as usize;
        let delay_ms = if count & DELAY_FLAG != 0 {
            Some(match entry[len - 1] {
                LONG_DELAY_MARKER => LONG_DELAY_MS,
                ms => ms as u16,
            })
        } else {
            None
        };
        self.offset = start + len;
        Some(Ok(Entry{
            opcode: entry[0],
            params: &entry[2..2 + num_params],
            delay_ms,
        }))
    }
}

impl core::iter::FusedIterator for Entries<'_> {}

/// An encoded, ready-to-play init sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitSequence {
    bytes: heapless::Vec<u8, MAX_SEQUENCE_LEN>,
}

impl InitSequence {
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    pub fn len(&self) -> usize { self.bytes.len() }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    pub fn entries(&self) -> Entries<'_> { Entries::new(&self.bytes) }

    fn push_entry(&mut self, entry: &[u8]) {
        debug_assert!(is_well_formed(entry));
        // Cannot fail, MAX_SEQUENCE_LEN is checked against every entry at
        // compile time.
        let fits = self.bytes.extend_from_slice(entry).is_ok();
        debug_assert!(fits);
    }
}

impl AsRef<[u8]> for InitSequence {
    fn as_ref(&self) -> &[u8] { self.as_bytes() }
}

const fn madctl_entry(param: u8) -> [u8; MADCTL_ENTRY_LEN] {
    [MADCTL, 1, param]
}

/// MADCTL parameter of the entry appended after the base table.
pub fn madctl_for(color_order: ColorOrder) -> u8 {
    let mut mctl = Madctl::from_bits(0);
    mctl.set_row_address_order(RowOrder::BottomToTop)
        .set_column_address_order(ColumnOrder::RightToLeft)
        .set_color_order(color_order);
    mctl.into()
}

/// Builds the init sequence for the given color order and inversion.
///
/// The result is the base table, then a MADCTL entry for `color_order`
/// (overriding the one inside the base table), then INVON if
/// `invert_colors`.
///
/// # Example
///
/// ```
/// # use st7735s_init::*;
/// let seq = build_sequence(ColorOrder::Bgr, true);
/// assert!(seq.as_bytes().ends_with(&[0x36, 0x01, 0xC0, 0x21, 0x00]));
/// assert!(seq.entries().all(|entry| entry.is_ok()));
/// ```
pub fn build_sequence(color_order: ColorOrder, invert_colors: bool)
        -> InitSequence {
    let mut seq = InitSequence{bytes: heapless::Vec::new()};
    seq.push_entry(BASE_SEQUENCE);
    seq.push_entry(&madctl_entry(madctl_for(color_order)));
    if invert_colors {
        seq.push_entry(&INVON_ENTRY);
    }
    seq
}
