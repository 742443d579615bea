use chrono::{Days, NaiveDate};
use log::trace;

use crate::constants::DAYS_PER_YEAR;
use crate::{Num, TWO_PI};

/// Simulation date, ticking in whole days.
///
/// One day passes for every `2π / 365.256` radians a reference planet sweeps
/// around its parent, so a full revolution is one year no matter how
/// eccentric the orbit is. The anomaly fed to [`Self::update`] must be
/// unwrapped (see [`crate::StaticOrbit::swept_anomaly`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationCalendar {
    start: NaiveDate,
    elapsed_days: u64,
}

impl SimulationCalendar {
    pub const DAY_ANGLE: Num = TWO_PI / DAYS_PER_YEAR;

    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            elapsed_days: 0,
        }
    }

    /// Catches the date up with `swept_anomaly`. Returns the number of days
    /// that passed since the previous update.
    pub fn update(&mut self, swept_anomaly: Num) -> u64 {
        let days = (swept_anomaly / Self::DAY_ANGLE).floor();
        if !(days > self.elapsed_days as Num) {
            return 0;
        }

        let passed = days as u64 - self.elapsed_days;
        self.elapsed_days = days as u64;

        trace!("{passed} day(s) passed, now {}", self.formatted());

        passed
    }

    pub fn elapsed_days(&self) -> u64 {
        self.elapsed_days
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn date(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(self.elapsed_days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// `dd-mm-yyyy`
    pub fn formatted(&self) -> String {
        self.date().format("%d-%m-%Y").to_string()
    }

    pub fn reset(&mut self) {
        self.elapsed_days = 0;
    }
}
