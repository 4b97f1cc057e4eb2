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

//! Traits of a 4-wire serial bus, to be wrapped by [`DcxSink`] when the
//! user has no command sink of their own.
//!
//! ST7735S tells a command byte from a parameter byte by the level of the
//! `DCX` pin, so a bus is a [DcxPin] plus a way to push bytes out, [WriteU8s].
//! Common MCUs' SPI peripherals work, with CPOL=1, CPHA=1 and MSB-first.
//! Notice the timing requirement from the ST7735S datasheet. Most important
//! ones:
//! * `SCK` low duration and high durations are at least 15ns long.
//! * `SCK` period is at least 66ns long.
//!
//! [`DcxSink`]: ../adapters/struct.DcxSink.html

use core::future::Future;

pub use crate::sink::ErrorType;

/// Defines how the `DCX` pin operates.
pub trait DcxPin {
    /// Toggles the DCX pin to the `command mode` (LOW value).
    fn set_dcx_command_mode(&mut self);
    /// Toggles the DCX pin to the `data mode` (HIGH value).
    fn set_dcx_data_mode(&mut self);
}

/// Defines how a sequence of `u8` is written with the `SCK` and `SDA` pins,
/// in whichever mode the `DCX` pin currently is.
pub trait WriteU8s<'a>: ErrorType {
    type WriteU8sDone: 'a + Future<Output=Result<(), Self::Error>>;

    fn write_u8s(&'a mut self, data: &'a [u8]) -> Self::WriteU8sDone;
}
