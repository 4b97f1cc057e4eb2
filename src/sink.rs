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

//! The capabilities [`play`] needs from whatever drives the controller.
//!
//! A command sink is anything implementing [ErrorType], [IssueCommand] and
//! [SleepMs]. A display driver that already owns the bus can implement these
//! directly; otherwise [`DcxSink`] builds one out of the lower-level traits
//! in [`spi`].
//!
//! [`play`]: ../fn.play.html
//! [`DcxSink`]: ../adapters/struct.DcxSink.html
//! [`spi`]: ../spi/index.html

use core::future::Future;

/// The error a sink reports when a transaction fails on the bus.
pub trait ErrorType {
    type Error;
}

/// Issues one command transaction: the opcode followed by its parameter
/// bytes (possibly none).
pub trait IssueCommand<'a>: ErrorType {
    type IssueDone: 'a + Future<Output=Result<(), Self::Error>>;

    fn issue(&'a mut self, opcode: u8, params: &'a [u8]) -> Self::IssueDone;
}

/// Waits for the given number of milliseconds.
pub trait SleepMs<'a> {
    type SleepDone: 'a + Future<Output=()>;

    fn sleep_ms(&'a mut self, ms: u16) -> Self::SleepDone;
}
