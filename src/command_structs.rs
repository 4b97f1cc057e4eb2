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

use paste::paste;

macro_rules! define_pub_bit_type {
    ($name:ident, zero: $zero_value:ident, one: $one_value:ident,
                  default: $default:ident, doc: $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $zero_value = 0,
            $one_value = 1,
        }
        impl $name {
            fn from_bit(bit: bool) -> Self {  // Private.
                if bit { Self::$one_value } else { Self::$zero_value }
            }
            fn to_bit(self) -> bool {  // Private.
                match self {
                    Self::$zero_value => false,
                    Self::$one_value => true,
                }
            }
        }
        impl Default for $name {
            fn default() -> Self { Self::$default }
        }
        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter)
                    -> ::core::fmt::Result {
                <Self as core::fmt::Debug>::fmt(self, f)
            }
        }
    };
}
macro_rules! bit_field {
    ($name:ident, type: $type:ty, bit_offset: $i:expr) => {
        pub fn $name(&self) -> $type {
            <$type>::from_bit((self.data >> $i) & 1 == 1)
        }
        paste! {
            pub fn [<set_ $name>](&mut self, value: $type) -> &mut Self {
                if value.to_bit() {
                    self.data |= 1 << $i;
                } else {
                    self.data &= !(1 << $i);
                }
                self
            }
        }
    }
}

/// The parameter byte of the MADCTL (memory data access control) command.
///
/// A cleared bit selects the first variant of each field; this is also what
/// [Madctl::default()] holds, except for [ColorOrder] whose default is the
/// panel's native RGB setting.
///
/// # Example
///
/// ```
/// # use st7735s_init::*;
/// let mut mctl = Madctl::default();
/// mctl.set_row_address_order(RowOrder::BottomToTop)
///     .set_column_address_order(ColumnOrder::RightToLeft)
///     .set_color_order(ColorOrder::Bgr);
/// assert_eq!(u8::from(mctl), 0xC0);
/// mctl.set_color_order(ColorOrder::Rgb);
/// assert_eq!(u8::from(mctl), 0xC8);
/// assert_eq!(mctl.row_column_swap(), RowColumnSwap::Unswapped);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Madctl {
    data: u8,
}
impl Madctl {
    /// Bit 3 of the MADCTL parameter, the only bit [ColorOrder] touches.
    pub const COLOR_ORDER_BIT: u8 = 1 << 3;

    /// Wraps a raw MADCTL parameter byte.
    pub const fn from_bits(data: u8) -> Self { Self{data} }

    bit_field!(row_address_order, type: RowOrder, bit_offset: 7);
    bit_field!(column_address_order, type: ColumnOrder, bit_offset: 6);
    bit_field!(row_column_swap, type: RowColumnSwap, bit_offset: 5);
    bit_field!(vertical_refresh_order, type: RowOrder, bit_offset: 4);
    bit_field!(color_order, type: ColorOrder, bit_offset: 3);
    bit_field!(horizontal_refresh_order, type: ColumnOrder, bit_offset: 2);
}
impl Default for Madctl {
    fn default() -> Self {
        let mut mctl = Self{data: 0};
        mctl.set_color_order(ColorOrder::default());
        mctl
    }
}
impl From<Madctl> for u8 {
    fn from(mctl: Madctl) -> u8 { mctl.data }
}

define_pub_bit_type!(RowOrder, zero: TopToBottom, one: BottomToTop,
                     default: TopToBottom,
                     doc: "The row order of the LCD pixels.");
define_pub_bit_type!(ColumnOrder, zero: LeftToRight, one: RightToLeft,
                     default: LeftToRight,
                     doc: "The column order of the LCD pixels.");
define_pub_bit_type!(RowColumnSwap, zero: Unswapped, one: Swapped,
                     default: Unswapped,
                     doc: "Whether to swap the row and column definitions, \
                     i.e., to switch between the portrait and landscape mode.");
define_pub_bit_type!(ColorOrder, zero: Bgr, one: Rgb, default: Rgb,
                     doc: "R/G/B component order of the panel.\n\n\
                     The supported ST7735S modules have their sub-pixels \
                     wired in reverse, so the MADCTL color order bit is set \
                     for RGB and cleared for BGR.");

/// Color mode (the bit widths of the R, G and B components of a pixel), i.e.,
/// the parameter of the COLMOD command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colmod {
    /// Each component has 4 bits.
    R4G4B4 = 0b011,
    /// Red has 5 bits; green has 6 bits; blue has 5 bits.
    R5G6B5 = 0b101,
    /// Each component has 6 bits. This is the native format.
    R6G6B6 = 0b110,
}
impl Default for Colmod {
    fn default() -> Self { Self::R5G6B5 }
}
impl From<Colmod> for u8 {
    fn from(colmod: Colmod) -> u8 { colmod as u8 }
}
