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

use crate::command_structs::ColorOrder;
use crate::player::{play, PlayError};
use crate::sequence::{build_sequence, InitSequence};
use crate::sink::{ErrorType, IssueCommand, SleepMs};

/// Settings the display driver needs but this crate never looks at.
///
/// The defaults match the 1.8" 128x160 ST7735S modules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
    /// Clockwise, in degrees: 0, 90, 180 or 270.
    pub rotation: u16,
    pub colstart: u16,
    pub rowstart: u16,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self{width: 128, height: 160, rotation: 0, colstart: 0, rowstart: 0}
    }
}

/// Configuration of an [St7735s].
///
/// Only `color_order` and `invert_colors` change the init sequence; `panel`
/// is carried along untouched for the display driver.
///
/// # Example
///
/// ```
/// # use st7735s_init::*;
/// let mut config: Config = Config::default();
/// config.set_color_order(ColorOrder::Bgr).set_invert_colors(true);
/// config.panel_mut().rotation = 90;
/// let lcd = St7735s::new(config);
/// assert_eq!(lcd.panel().rotation, 90);
/// assert!(lcd.init_sequence().as_bytes().ends_with(&[0x21, 0x00]));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config<P = PanelGeometry> {
    color_order: ColorOrder,
    invert_colors: bool,
    panel: P,
}

impl<P> Config<P> {
    /// A configuration with the default color order and no inversion.
    pub fn with_panel(panel: P) -> Self {
        Self{color_order: ColorOrder::default(), invert_colors: false, panel}
    }

    pub fn color_order(&self) -> ColorOrder { self.color_order }
    pub fn invert_colors(&self) -> bool { self.invert_colors }
    pub fn panel(&self) -> &P { &self.panel }
    pub fn panel_mut(&mut self) -> &mut P { &mut self.panel }

    pub fn set_color_order(&mut self, color_order: ColorOrder) -> &mut Self {
        self.color_order = color_order;
        self
    }

    pub fn set_invert_colors(&mut self, invert_colors: bool) -> &mut Self {
        self.invert_colors = invert_colors;
        self
    }
}

impl Default for Config {
    fn default() -> Self { Self::with_panel(PanelGeometry::default()) }
}

/// Describes one ST7735S panel: what to send it at bring-up, and the
/// settings to pass on to the display driver.
#[derive(Clone, Debug)]
pub struct St7735s<P = PanelGeometry> {
    config: Config<P>,
}

impl<P> St7735s<P> {
    pub fn new(config: Config<P>) -> Self { Self{config} }

    pub fn color_order(&self) -> ColorOrder { self.config.color_order }
    pub fn invert_colors(&self) -> bool { self.config.invert_colors }
    pub fn panel(&self) -> &P { &self.config.panel }

    /// Encodes a fresh init sequence for this panel.
    pub fn init_sequence(&self) -> InitSequence {
        build_sequence(self.config.color_order, self.config.invert_colors)
    }

    /// Splits into what a display driver takes: the init sequence and the
    /// pass-through settings.
    pub fn into_parts(self) -> (InitSequence, P) {
        let seq = self.init_sequence();
        (seq, self.config.panel)
    }

    /// Sends the init sequence over `sink`.
    pub async fn bring_up<S>(&self, sink: &mut S)
            -> Result<(), PlayError<<S as ErrorType>::Error>>
            where S: ErrorType,
                  <S as ErrorType>::Error: core::fmt::Debug,
                  for<'a> S: IssueCommand<'a> + SleepMs<'a> {
        log::debug!("bringing up ST7735S, {:?} order, inversion {}",
                    self.config.color_order, self.config.invert_colors);
        let seq = self.init_sequence();
        play(seq.as_bytes(), sink).await
    }
}
