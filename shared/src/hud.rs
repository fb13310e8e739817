//! Heads-up display text: speedometer formatting and the race timer.

use serde::Deserialize;

use crate::constants::KMH_PER_MPS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    #[default]
    KilometersPerHour,
    MetersPerSecond,
}

impl SpeedUnit {
    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MetersPerSecond => "m/s",
        }
    }

    pub fn from_mps(self, speed_mps: f32) -> f32 {
        match self {
            SpeedUnit::KilometersPerHour => speed_mps * KMH_PER_MPS,
            SpeedUnit::MetersPerSecond => speed_mps,
        }
    }
}

/// `"Speed: 72.0 km/h"` for 20 m/s with one decimal.
pub fn format_speed(speed_mps: f32, unit: SpeedUnit, decimals: usize) -> String {
    format!(
        "Speed: {:.*} {}",
        decimals,
        unit.from_mps(speed_mps),
        unit.label()
    )
}

/// `"Time: MM:SS.mmm"`. Every field is floored; minutes keep growing past 59.
pub fn format_race_time(elapsed_secs: f64) -> String {
    let t = elapsed_secs.max(0.0);
    let minutes = (t / 60.0).floor() as u64;
    let seconds = (t % 60.0).floor() as u64;
    let millis = ((t % 1.0) * 1000.0).floor() as u64;
    format!("Time: {minutes:02}:{seconds:02}.{millis:03}")
}

/// Stopwatch for a race, advanced by frame time while running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaceTimer {
    elapsed: f64,
    running: bool,
}

impl RaceTimer {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Back to zero and stopped.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    pub fn tick(&mut self, dt_seconds: f64) {
        if self.running && dt_seconds > 0.0 {
            self.elapsed += dt_seconds;
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
