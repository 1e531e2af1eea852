//! Input validation for device entries and rates

use crate::core::{DeviceRecord, Field, RateSettings, ValidationError};
use rust_decimal::Decimal;

/// Allowed drift of the allocation sum when a device is first added
pub const ENTRY_ALLOCATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Allowed drift of the allocation sum when an existing device is edited
pub const EDIT_ALLOCATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

const HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Where in the workflow a record is being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// Adding a new device
    Entry,
    /// Editing a device already in the list
    Edit,
}

impl Checkpoint {
    pub fn allocation_tolerance(self) -> Decimal {
        match self {
            Checkpoint::Entry => ENTRY_ALLOCATION_TOLERANCE,
            Checkpoint::Edit => EDIT_ALLOCATION_TOLERANCE,
        }
    }
}

struct Bounds {
    field: Field,
    min: Decimal,
    max: Option<Decimal>,
    /// Counted in units, days or weeks
    whole: bool,
    expected: &'static str,
}

const fn bounds(
    field: Field,
    min: u32,
    max: Option<u32>,
    whole: bool,
    expected: &'static str,
) -> Bounds {
    let max = match max {
        Some(m) => Some(Decimal::from_parts(m, 0, 0, false, 0)),
        None => None,
    };
    Bounds {
        field,
        min: Decimal::from_parts(min, 0, 0, false, 0),
        max,
        whole,
        expected,
    }
}

const BOUNDS: [Bounds; 9] = [
    bounds(Field::Count, 1, None, true, "a whole number of at least 1"),
    bounds(Field::PowerHeavy, 0, None, false, "at least 0"),
    bounds(Field::PowerLight, 0, None, false, "at least 0"),
    bounds(Field::AllocHeavy, 0, Some(100), false, "between 0 and 100"),
    bounds(Field::AllocLight, 0, Some(100), false, "between 0 and 100"),
    bounds(Field::HoursPeak, 0, Some(24), false, "between 0 and 24"),
    bounds(Field::HoursLow, 0, Some(24), false, "between 0 and 24"),
    bounds(Field::Days, 0, Some(7), true, "a whole number between 0 and 7"),
    bounds(Field::Weeks, 0, Some(52), true, "a whole number between 0 and 52"),
];

/// Check a device record before it is added or written back.
///
/// Both checkpoints check the name, the range of every parsed value and the
/// allocation sum. Counts, days and weeks must be whole numbers. At
/// [`Checkpoint::Entry`] every numeric must also parse and the nominal hours
/// must fit in one day. At [`Checkpoint::Edit`] unparsable cells are let
/// through (they cost nothing later) and the allocation tolerance is looser.
pub fn validate(record: &DeviceRecord, checkpoint: Checkpoint) -> Result<(), ValidationError> {
    if record.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    for b in &BOUNDS {
        let Some(cell) = record.numeric(b.field) else {
            continue;
        };
        let Some(value) = cell.value() else {
            if checkpoint == Checkpoint::Entry {
                return Err(ValidationError::InvalidNumber {
                    name: record.name.clone(),
                    field: b.field,
                    value: cell.to_string(),
                });
            }
            continue;
        };
        let too_high = b.max.map_or(false, |max| value > max);
        let fractional = b.whole && !value.fract().is_zero();
        if value < b.min || too_high || fractional {
            return Err(ValidationError::OutOfRange {
                name: record.name.clone(),
                field: b.field,
                value,
                expected: b.expected,
            });
        }
    }

    if let (Some(heavy), Some(light)) = (record.alloc_heavy.value(), record.alloc_light.value()) {
        let sum = heavy + light;
        if (sum - Decimal::ONE_HUNDRED).abs() > checkpoint.allocation_tolerance() {
            return Err(ValidationError::AllocationSum {
                name: record.name.clone(),
                sum,
            });
        }
    }

    if checkpoint == Checkpoint::Entry {
        if let (Some(peak), Some(low)) = (record.hours_peak.value(), record.hours_low.value()) {
            let total = peak + low;
            if total > HOURS_PER_DAY {
                return Err(ValidationError::HoursOverflow {
                    name: record.name.clone(),
                    total,
                });
            }
        }
    }

    Ok(())
}

/// Rates must not be negative
pub fn validate_rates(rates: &RateSettings) -> Result<(), ValidationError> {
    if rates.peak.is_sign_negative() && !rates.peak.is_zero() {
        return Err(ValidationError::NegativeRate { which: "Peak", value: rates.peak });
    }
    if rates.off_peak.is_sign_negative() && !rates.off_peak.is_zero() {
        return Err(ValidationError::NegativeRate { which: "Off-peak", value: rates.off_peak });
    }
    Ok(())
}
