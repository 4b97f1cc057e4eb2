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

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use crate::sink::{ErrorType, IssueCommand, SleepMs};
use crate::spi::{DcxPin, WriteU8s};

/// A command sink made of a 4-wire serial bus and a delay provider.
///
/// Each command is sent as the opcode in command mode, then the parameters
/// (if any) in data mode. The bus is always left in command mode afterwards,
/// also when a write fails.
pub struct DcxSink<W, D> {
    w: W,
    delay: D,
    opcode: u8,
}

impl<W: DcxPin, D> DcxSink<W, D> {
    pub fn new(mut w: W, delay: D) -> Self {
        w.set_dcx_command_mode();
        Self{w, delay, opcode: 0}
    }

    /// Gives back the bus and the delay provider.
    pub fn release(self) -> (W, D) { (self.w, self.delay) }
}

impl<W: ErrorType, D> ErrorType for DcxSink<W, D> {
    type Error = <W as ErrorType>::Error;
}

impl<'a, W: 'a, D> IssueCommand<'a> for DcxSink<W, D>
        where W: DcxPin + ErrorType,
              for<'w> W: WriteU8s<'w> {
    type IssueDone = IssueOverDcx<'a, W>;

    fn issue(&'a mut self, opcode: u8, params: &'a [u8]) -> Self::IssueDone {
        self.opcode = opcode;
        IssueOverDcx{
            w: &mut self.w,
            opcode: &self.opcode,
            params,
            stage: Stage::Opcode,
            current_write: None,
        }
    }
}

impl<'a, W, D: SleepMs<'a>> SleepMs<'a> for DcxSink<W, D> {
    type SleepDone = <D as SleepMs<'a>>::SleepDone;

    fn sleep_ms(&'a mut self, ms: u16) -> Self::SleepDone {
        self.delay.sleep_ms(ms)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage { Opcode, Params, Finished }

pub struct IssueOverDcx<'a, W: for<'w> WriteU8s<'w>> {
    // Lifetime is also 'a. `current_write` when not `None` can actually borrow
    // `*w` in mut.
    w: *mut W,
    opcode: &'a u8,
    params: &'a [u8],
    stage: Stage,
    current_write: Option<<W as WriteU8s<'a>>::WriteU8sDone>,
}

impl<'a, W> Future for IssueOverDcx<'a, W>
        where W: 'a + DcxPin + ErrorType,
              for<'w> W: WriteU8s<'w> {
    type Output = Result<(), <W as ErrorType>::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Safety: Only `Self::current_write` needs pinning. The implementation
        // below indeed never moves it, only creates and drops.
        let io = unsafe {self.get_unchecked_mut()};
        loop {
            if let Some(ref mut done) = &mut io.current_write {
                // Safety: Pinning a field of a pinned.
                let done = unsafe {Pin::new_unchecked(done)};
                let result = match done.poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(result) => result,
                };
                io.current_write = None;
                if let Err(e) = result {
                    // Safety: `current_write` is `None`.
                    unsafe {&mut *io.w}.set_dcx_command_mode();
                    io.stage = Stage::Finished;
                    return Poll::Ready(Err(e));
                }
            }
            // Safety: `current_write` is `None`.
            let w: &'a mut W = unsafe {&mut *io.w};
            match io.stage {
                Stage::Opcode => {
                    w.set_dcx_command_mode();
                    io.current_write =
                        Some(w.write_u8s(core::slice::from_ref(io.opcode)));
                    io.stage = Stage::Params;
                }
                Stage::Params => {
                    io.stage = Stage::Finished;
                    if !io.params.is_empty() {
                        w.set_dcx_data_mode();
                        io.current_write = Some(w.write_u8s(io.params));
                    }
                }
                Stage::Finished => {
                    w.set_dcx_command_mode();
                    return Poll::Ready(Ok(()));
                }
            }
        }
    }
}
