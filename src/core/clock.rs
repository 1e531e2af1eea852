//! Conversion between decimal hours and HH:MM clock notation
//!
//! Usage hours are stored as decimal hours per day but entered and shown as
//! a duration on a 24h clock face.

use crate::core::ValidationError;
use chrono::{NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Parse hours given either as a decimal ("2.5") or as HH:MM ("02:30")
pub fn parse_hours(text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();
    if trimmed.contains(':') {
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| ValidationError::InvalidClock(text.to_string()))?;
        return Ok(clock_to_hours(time));
    }
    Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidClock(text.to_string()))
}

/// Hours represented by a clock time, e.g. 01:30 -> 1.5
pub fn clock_to_hours(time: NaiveTime) -> Decimal {
    Decimal::from(time.hour()) + Decimal::from(time.minute()) / MINUTES_PER_HOUR
}

/// Clock time for a number of hours. Values at or past a full day, and
/// anything unrepresentable, clamp to 23:59.
pub fn hours_to_clock(hours: Decimal) -> NaiveTime {
    let last_minute = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    if hours.is_sign_negative() {
        return NaiveTime::MIN;
    }

    let whole = hours.trunc();
    let minutes = ((hours - whole) * MINUTES_PER_HOUR)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

    let (Some(mut h), Some(mut m)) = (whole.to_u32(), minutes.to_u32()) else {
        return last_minute;
    };
    if m == 60 {
        h += 1;
        m = 0;
    }
    if h >= 24 {
        return last_minute;
    }
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(last_minute)
}

/// HH:MM text for a number of hours
pub fn format_hours(hours: Decimal) -> String {
    hours_to_clock(hours).format("%H:%M").to_string()
}
