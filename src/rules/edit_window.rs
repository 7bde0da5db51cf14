use chrono::{Local, NaiveTime};

use crate::core::config::HoursConfig;
use crate::core::error::RuleError;

/// Gate on product mutations: while the restaurant is open, the menu must
/// not change under active customers, so edits are only allowed outside
/// operating hours. Both boundaries count as open.
///
/// Stateless; the check is a pure function of `now` and the two boundaries.
/// Callers needing timezone correctness normalize `now` before calling.
#[derive(Clone, Copy, Debug)]
pub struct EditWindow {
    opening: NaiveTime,
    closing: NaiveTime,
}

impl EditWindow {
    pub fn new(hours: &HoursConfig) -> Self {
        Self {
            opening: hours.opening,
            closing: hours.closing,
        }
    }

    /// Check whether a product mutation is allowed at the given time-of-day
    pub fn check(&self, now: NaiveTime) -> Result<(), RuleError> {
        let is_open = now >= self.opening && now <= self.closing;

        if is_open {
            return Err(RuleError::InsideOperatingHours {
                now,
                opening: self.opening,
                closing: self.closing,
            });
        }

        Ok(())
    }

    /// Check against the local wall clock
    pub fn check_now(&self) -> Result<(), RuleError> {
        self.check(Local::now().time())
    }
}
