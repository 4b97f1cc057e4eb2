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

#[allow(unused_imports)]
// The automock expansions name these unqualified.
use std::{boxed::Box, format, vec::Vec};
use std::cell::RefCell;
use std::pin::Pin;
use std::future::Future;
use std::string::String;

use predicates::prelude::predicate::{eq, function};

use crate::sink::{ErrorType, IssueCommand, SleepMs};
use crate::spi::{DcxPin, WriteU8s};

pub fn block_on<F: Future>(f: F) -> F::Output {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    rt.block_on(f)
}

std::thread_local! {
    static LOG_LINES: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

/// Collects the messages logged on the current thread.
struct ThreadLogger;

impl log::Log for ThreadLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool { true }

    fn log(&self, record: &log::Record) {
        let line = format!("{}", record.args());
        LOG_LINES.with(|lines| lines.borrow_mut().push(line));
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;

/// Runs `f` and returns its result together with what it logged.
///
/// `block_on` drives futures on the calling thread, so async code run inside
/// `f` is captured too.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    // Fails when already installed by another test, which is fine.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
    LOG_LINES.with(|lines| lines.borrow_mut().clear());
    let r = f();
    let lines = LOG_LINES.with(|lines| lines.borrow_mut().split_off(0));
    (r, lines)
}

/// The transport error the mocks report.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BusFault;

#[mockall::automock]
pub trait PanelIO {
    fn issue(&mut self, opcode: u8, params: &[u8]) -> Result<(), BusFault>;
    fn sleep_ms(&mut self, ms: u16);
}

/// A command sink that forwards every call to `MockPanelIO`.
#[derive(Default)]
pub struct MockSink { mock: MockPanelIO }

impl MockSink {
    pub fn new() -> Self { Default::default() }
    pub fn mock(&mut self) -> &mut MockPanelIO { &mut self.mock }

    /// Expects one successful transaction with exactly these bytes.
    pub fn expect_issue(&mut self, opcode: u8, params: &[u8],
                        seq: &mut mockall::Sequence) {
        let expected = params.to_vec();
        self.mock.expect_issue()
            .with(eq(opcode), function(move |p: &[u8]| p == &expected[..]))
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| Ok(()));
    }

    /// Expects one sleep of exactly `ms`.
    pub fn expect_sleep(&mut self, ms: u16, seq: &mut mockall::Sequence) {
        self.mock.expect_sleep_ms()
            .with(eq(ms))
            .times(1)
            .in_sequence(seq)
            .return_const(());
    }
}

impl ErrorType for MockSink {
    type Error = BusFault;
}

impl<'a> IssueCommand<'a> for MockSink {
    type IssueDone = Pin<Box<dyn Future<Output=Result<(), BusFault>> + 'a>>;

    fn issue(&'a mut self, opcode: u8, params: &'a [u8]) -> Self::IssueDone {
        Box::pin(async move { self.mock.issue(opcode, params) })
    }
}

impl<'a> SleepMs<'a> for MockSink {
    type SleepDone = Pin<Box<dyn Future<Output=()> + 'a>>;

    fn sleep_ms(&'a mut self, ms: u16) -> Self::SleepDone {
        Box::pin(async move { self.mock.sleep_ms(ms); })
    }
}

#[mockall::automock]
pub trait PlainIO {
    fn write_command(&mut self, byte: u8) -> Result<(), BusFault>;
    fn write_data(&mut self, byte: u8) -> Result<(), BusFault>;
}

/// Helper class that delegates [WriteU8s] byte by byte to `MockPlainIO`,
/// routing on the current DCX mode.
#[derive(Default)]
pub struct MockBus {
    mock: MockPlainIO,
    is_data_mode: bool,
}

impl MockBus {
    pub fn new() -> Self { Default::default() }
    pub fn mock(&mut self) -> &mut MockPlainIO { &mut self.mock }

    pub fn is_data_mode(&self) -> bool { self.is_data_mode }

    pub fn expect_standard_write_command(&mut self, command: u8, data: &[u8],
                                         seq: &mut mockall::Sequence) {
        self.mock().expect_write_command()
            .with(eq(command))
            .times(1)
            .in_sequence(seq)
            .returning(|_| Ok(()));
        for data in data {
            self.mock().expect_write_data()
                .with(eq(*data))
                .times(1)
                .in_sequence(seq)
                .returning(|_| Ok(()));
        }
    }
}

impl DcxPin for MockBus {
    fn set_dcx_command_mode(&mut self) { self.is_data_mode = false; }
    fn set_dcx_data_mode(&mut self) { self.is_data_mode = true; }
}

impl ErrorType for MockBus {
    type Error = BusFault;
}

impl<'a> WriteU8s<'a> for MockBus {
    type WriteU8sDone = Pin<Box<dyn Future<Output=Result<(), BusFault>> + 'a>>;

    fn write_u8s(&'a mut self, data: &'a [u8]) -> Self::WriteU8sDone {
        Box::pin(async move {
            for one in data {
                if self.is_data_mode {
                    self.mock.write_data(*one)?;
                } else {
                    self.mock.write_command(*one)?;
                }
            }
            Ok(())
        })
    }
}

#[mockall::automock]
pub trait DelayIO {
    fn sleep_ms(&mut self, ms: u16);
}

#[derive(Default)]
pub struct MockDelay { mock: MockDelayIO }

impl MockDelay {
    pub fn new() -> Self { Default::default() }
    pub fn mock(&mut self) -> &mut MockDelayIO { &mut self.mock }
}

impl<'a> SleepMs<'a> for MockDelay {
    type SleepDone = Pin<Box<dyn Future<Output=()> + 'a>>;

    fn sleep_ms(&'a mut self, ms: u16) -> Self::SleepDone {
        Box::pin(async move { self.mock.sleep_ms(ms); })
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use super::*;

    #[test]
    fn sink_issue() {
        let mut s = MockSink::new();
        let mut seq = Sequence::new();
        s.expect_issue(0xB4, &[0x07], &mut seq);
        assert_eq!(block_on(s.issue(0xB4, &[0x07])), Ok(()));
    }

    #[test]
    fn sink_sleep() {
        let mut s = MockSink::new();
        let mut seq = Sequence::new();
        s.expect_sleep(10, &mut seq);
        block_on(s.sleep_ms(10));
    }

    #[test]
    fn bus_routes_on_dcx() {
        let mut d = MockBus::new();
        let mut seq = Sequence::new();
        d.expect_standard_write_command(0x2A, &[0x00, 0x4F], &mut seq);
        d.set_dcx_command_mode();
        assert_eq!(block_on(d.write_u8s(&[0x2A])), Ok(()));
        d.set_dcx_data_mode();
        assert!(d.is_data_mode());
        assert_eq!(block_on(d.write_u8s(&[0x00, 0x4F])), Ok(()));
    }

    #[test]
    fn bus_stops_on_fault() {
        let mut d = MockBus::new();
        d.mock().expect_write_data()
            .with(eq(0x01))
            .times(1)
            .returning(|_| Err(BusFault));
        d.set_dcx_data_mode();
        assert_eq!(block_on(d.write_u8s(&[0x01, 0x02])), Err(BusFault));
    }

    #[test]
    fn captures_logs_of_this_thread() {
        let (r, lines) = capture_logs(|| {
            log::warn!("bus {} stalled", 3);
            7
        });
        assert_eq!(r, 7);
        assert_eq!(lines, ["bus 3 stalled"]);
    }
}  // mod tests
