// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Caret blink state

use std::time::Duration;

use crate::settings;

/// Blinking caret visibility, advanced by frame deltas.
#[derive(Debug, Clone)]
pub struct Caret {
    /// Time since the last toggle in seconds
    blink_timer: f64,
    /// Half-period in seconds
    interval: f64,
    /// Is the caret currently in its visible phase?
    visible: bool,
}

impl Default for Caret {
    fn default() -> Self {
        Self::new(Duration::from_millis(settings::caret::BLINK_MS))
    }
}

impl Caret {
    pub fn new(interval: Duration) -> Self {
        Caret {
            blink_timer: 0.0,
            interval: interval.as_secs_f64(),
            visible: true,
        }
    }

    /// Advance the blink timer. Returns true when visibility flipped.
    pub fn update(&mut self, delta_time: f64) -> bool {
        if self.interval <= 0.0 {
            return false;
        }
        self.blink_timer += delta_time;
        if self.blink_timer < self.interval {
            return false;
        }
        let toggles = (self.blink_timer / self.interval).floor();
        self.blink_timer -= toggles * self.interval;
        if toggles % 2.0 == 1.0 {
            self.visible = !self.visible;
            true
        } else {
            false
        }
    }

    /// Show the caret and restart the blink cycle (called on edits and moves)
    pub fn reset(&mut self) {
        self.blink_timer = 0.0;
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
