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

//! Bring-up of ST7735S panels: the init command sequence in its compact
//! encoded form, and an async player that sends it to the controller.
//!
//! A user describes the panel with a [Config], gets an [InitSequence] out of
//! [St7735s], and either hands it to their display driver with
//! [St7735s::into_parts()] or sends it themselves with [St7735s::bring_up()]
//! (or [play()]). Sending needs a command sink, i.e., an implementation of the
//! traits in [sink]; [adapters::DcxSink] makes one out of the 4-wire serial
//! bus traits in [spi].
//!
//! # Crate Features
//!
//! - **`defmt`**: derives `defmt::Format` for the public error and enum
//!   types.
//!
//! Logging goes through the [`log`](https://docs.rs/log) facade.

#![no_std]

#[cfg(test)] extern crate std;
#[cfg(test)] extern crate tokio;
#[cfg(test)] extern crate mockall;

pub mod adapters;
mod command_structs;
pub use command_structs::{
    Colmod, ColorOrder, ColumnOrder, Madctl, RowColumnSwap, RowOrder};
mod panel;
pub use panel::{Config, PanelGeometry, St7735s};
mod player;
pub use player::{play, PlayError};
pub mod sequence;
pub use sequence::{
    build_sequence, is_well_formed, Entries, Entry, InitSequence,
    MalformedSequence};
pub mod sink;
pub mod spi;

#[cfg(test)] pub mod testing_device;
