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

use core::fmt;

use crate::sequence::{Entries, MalformedSequence};
use crate::sink::{ErrorType, IssueCommand, SleepMs};

/// Why [play()] stopped before the end of the sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayError<E> {
    /// The sequence is truncated. Nothing from the truncated entry on has
    /// been sent.
    Malformed(MalformedSequence),
    /// The sink failed to send a command.
    Transport(E),
}

impl<E> From<MalformedSequence> for PlayError<E> {
    fn from(e: MalformedSequence) -> Self { Self::Malformed(e) }
}

impl<E: fmt::Debug> fmt::Display for PlayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => e.fmt(f),
            Self::Transport(e) => write!(f, "failed to send command: {:?}", e),
        }
    }
}

/// Replays an encoded sequence over `sink`, in order, waiting after each
/// command that carries a delay.
///
/// Stops at the first error; there is no retry and no rollback of the
/// commands already sent.
pub async fn play<S>(sequence: &[u8], sink: &mut S)
        -> Result<(), PlayError<<S as ErrorType>::Error>>
        where S: ErrorType,
              <S as ErrorType>::Error: fmt::Debug,
              for<'a> S: IssueCommand<'a> + SleepMs<'a> {
    log::debug!("playing init sequence of {} bytes", sequence.len());
    let mut count = 0usize;
    for entry in Entries::new(sequence) {
        let entry = entry.map_err(|e| {
            log::error!("{}", e);
            e
        })?;
        log::trace!("issue {:#04x} with {} params",
                    entry.opcode, entry.params.len());
        if let Err(e) = sink.issue(entry.opcode, entry.params).await {
            log::error!("sending command {:#04x} failed: {:?}",
                        entry.opcode, e);
            return Err(PlayError::Transport(e));
        }
        if let Some(ms) = entry.delay_ms {
            log::trace!("sleep {}ms", ms);
            sink.sleep_ms(ms).await;
        }
        count += 1;
    }
    log::debug!("init sequence done, {} commands", count);
    Ok(())
}
