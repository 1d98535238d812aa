// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Day schedules with hourly values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::typing::valid_ep_string;

pub const HOURS_PER_DAY: usize = 24;

/// Unit and range of the values a schedule may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleTypeLimit {
    Fractional,
    OnOff,
    Temperature,
    ActivityLevel,
    Dimensionless,
}

impl ScheduleTypeLimit {
    /// Inclusive value range, if bounded.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            ScheduleTypeLimit::Fractional => Some((0.0, 1.0)),
            ScheduleTypeLimit::OnOff => Some((0.0, 1.0)),
            ScheduleTypeLimit::Temperature => Some((-273.15, f64::INFINITY)),
            ScheduleTypeLimit::ActivityLevel => Some((0.0, f64::INFINITY)),
            ScheduleTypeLimit::Dimensionless => None,
        }
    }
}

/// A schedule repeating the same 24 hourly values every day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Schedule", try_from = "ScheduleData")]
pub struct Schedule {
    pub identifier: String,
    pub type_limit: ScheduleTypeLimit,
    pub values: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Schedule")]
struct ScheduleData {
    identifier: String,
    type_limit: ScheduleTypeLimit,
    values: Vec<f64>,
}

impl TryFrom<ScheduleData> for Schedule {
    type Error = Error;

    fn try_from(data: ScheduleData) -> Result<Self> {
        let schedule = Schedule {
            identifier: data.identifier,
            type_limit: data.type_limit,
            values: data.values,
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

impl Schedule {
    pub fn new(identifier: &str, type_limit: ScheduleTypeLimit, values: Vec<f64>) -> Result<Self> {
        let schedule = Self {
            identifier: identifier.to_string(),
            type_limit,
            values,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// A schedule with the same value at every hour.
    pub fn constant(identifier: &str, type_limit: ScheduleTypeLimit, value: f64) -> Result<Self> {
        Self::new(identifier, type_limit, vec![value; HOURS_PER_DAY])
    }

    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "schedule identifier")?;
        if self.values.len() != HOURS_PER_DAY {
            return Err(Error::validation(format!(
                "schedule \"{}\" needs {HOURS_PER_DAY} hourly values, got {}",
                self.identifier,
                self.values.len()
            )));
        }
        if let Some((lo, hi)) = self.type_limit.range() {
            if let Some(v) = self.values.iter().find(|v| **v < lo || **v > hi) {
                return Err(Error::validation(format!(
                    "schedule \"{}\" value {v} is outside the {:?} range",
                    self.identifier, self.type_limit
                )));
            }
        }
        if self.type_limit == ScheduleTypeLimit::OnOff
            && self.values.iter().any(|v| *v != 0.0 && *v != 1.0)
        {
            return Err(Error::validation(format!(
                "on/off schedule \"{}\" may only hold 0 or 1",
                self.identifier
            )));
        }
        Ok(())
    }

    /// Value for an hour of the day; wraps past midnight.
    pub fn value_at(&self, hour: usize) -> f64 {
        self.values[hour % HOURS_PER_DAY]
    }

    pub fn is_constant(&self) -> bool {
        self.values.windows(2).all(|w| w[0] == w[1])
    }

    /// Mean daily value.
    pub fn average(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_schedule() {
        let s = Schedule::constant("Always On", ScheduleTypeLimit::Fractional, 1.0).unwrap();
        assert!(s.is_constant());
        assert_eq!(s.value_at(5), 1.0);
        assert_eq!(s.value_at(29), 1.0);
        assert_eq!(s.average(), 1.0);
    }

    #[test]
    fn range_checked() {
        assert!(Schedule::constant("Bad", ScheduleTypeLimit::Fractional, 1.5).is_err());
        assert!(Schedule::constant("Half", ScheduleTypeLimit::OnOff, 0.5).is_err());
        assert!(Schedule::constant("Activity", ScheduleTypeLimit::ActivityLevel, 120.0).is_ok());
        assert!(Schedule::new("Short", ScheduleTypeLimit::Dimensionless, vec![1.0; 3]).is_err());
    }

    #[test]
    fn short_schedule_from_json_rejected() {
        let json = serde_json::json!({
            "type": "Schedule",
            "identifier": "Short",
            "type_limit": "Fractional",
            "values": [1.0, 0.5]
        });
        let err = serde_json::from_value::<Schedule>(json).unwrap_err();
        assert!(err.to_string().contains("24 hourly values"), "{err}");
    }

    #[test]
    fn office_hours() {
        let mut values = vec![0.0; HOURS_PER_DAY];
        values[8..18].iter_mut().for_each(|v| *v = 1.0);
        let s = Schedule::new("Office", ScheduleTypeLimit::OnOff, values).unwrap();
        assert_eq!(s.value_at(7), 0.0);
        assert_eq!(s.value_at(8), 1.0);
        assert!(!s.is_constant());
    }
}
