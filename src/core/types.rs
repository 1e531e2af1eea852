//! Common types used across the application

use crate::core::RowComputationError;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A column of the device table, named as it appears in exported files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Count,
    PowerHeavy,
    PowerLight,
    AllocHeavy,
    AllocLight,
    HoursPeak,
    HoursLow,
    Days,
    Weeks,
    Include,
}

impl Field {
    /// All device columns in export order
    pub const ALL: [Field; 11] = [
        Field::Name,
        Field::Count,
        Field::PowerHeavy,
        Field::PowerLight,
        Field::AllocHeavy,
        Field::AllocLight,
        Field::HoursPeak,
        Field::HoursLow,
        Field::Days,
        Field::Weeks,
        Field::Include,
    ];

    /// Column header used in the tabular exchange format
    pub fn column(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Count => "Count",
            Field::PowerHeavy => "Power Heavy",
            Field::PowerLight => "Power Light",
            Field::AllocHeavy => "Alloc Heavy",
            Field::AllocLight => "Alloc Light",
            Field::HoursPeak => "Hours Peak",
            Field::HoursLow => "Hours Low",
            Field::Days => "Days",
            Field::Weeks => "Weeks",
            Field::Include => "Include",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A numeric cell that may hold text which never parsed as a number.
///
/// Imported tables are allowed to carry garbage in numeric columns; the
/// garbage is kept verbatim so it can be shown and exported again, and only
/// turns into a [`RowComputationError`] when the row is costed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Numeric {
    Value(Decimal),
    Malformed(String),
}

impl Numeric {
    /// Parse user or file text. Never fails: unparsable text is kept as-is.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Numeric::Value)
            .unwrap_or_else(|_| Numeric::Malformed(text.to_string()))
    }

    /// The parsed value, if any
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Numeric::Value(v) => Some(*v),
            Numeric::Malformed(_) => None,
        }
    }

    /// The parsed value, or a row computation error naming the field
    pub fn require(&self, field: Field) -> std::result::Result<Decimal, RowComputationError> {
        match self {
            Numeric::Value(v) => Ok(*v),
            Numeric::Malformed(raw) => Err(RowComputationError::Malformed {
                field,
                value: raw.clone(),
            }),
        }
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Value(value)
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Numeric::Value(Decimal::from(value))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(v) => write!(f, "{}", v),
            Numeric::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One appliance entry in the device list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    /// Number of identical units
    pub count: Numeric,
    /// Draw in the high-power state (W)
    pub power_heavy: Numeric,
    /// Draw in the low-power state (W)
    pub power_light: Numeric,
    /// Share of active time in the high-power state (%)
    pub alloc_heavy: Numeric,
    /// Share of active time in the low-power state (%)
    pub alloc_light: Numeric,
    /// Nominal hours per day in the peak tariff period (not frequency-scaled)
    pub hours_peak: Numeric,
    /// Nominal hours per day in the off-peak tariff period (not frequency-scaled)
    pub hours_low: Numeric,
    /// Active days per week
    pub days: Numeric,
    /// Active weeks per year
    pub weeks: Numeric,
    /// Whether the device counts towards totals. Unset means included.
    pub include: Option<bool>,
}

impl DeviceRecord {
    pub fn is_included(&self) -> bool {
        self.include.unwrap_or(true)
    }

    /// The numeric cell behind `field`; `None` for the name and include columns
    pub fn numeric(&self, field: Field) -> Option<&Numeric> {
        match field {
            Field::Count => Some(&self.count),
            Field::PowerHeavy => Some(&self.power_heavy),
            Field::PowerLight => Some(&self.power_light),
            Field::AllocHeavy => Some(&self.alloc_heavy),
            Field::AllocLight => Some(&self.alloc_light),
            Field::HoursPeak => Some(&self.hours_peak),
            Field::HoursLow => Some(&self.hours_low),
            Field::Days => Some(&self.days),
            Field::Weeks => Some(&self.weeks),
            Field::Name | Field::Include => None,
        }
    }
}

/// Peak and off-peak tariff, in currency units per kWh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateSettings {
    pub peak: Decimal,
    pub off_peak: Decimal,
}

impl RateSettings {
    pub fn new(peak: Decimal, off_peak: Decimal) -> Self {
        Self { peak, off_peak }
    }
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            peak: Decimal::new(2361, 4),
            off_peak: Decimal::new(7, 2),
        }
    }
}

/// Cost and energy figures for one device row (all units of that row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CostResult {
    pub daily_cost: Decimal,
    pub monthly_cost: Decimal,
    pub annual_cost: Decimal,
    pub daily_kwh: Decimal,
    pub monthly_kwh: Decimal,
    pub annual_kwh: Decimal,
}

impl CostResult {
    /// Result substituted for rows that could not be computed
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Per-device breakdown entry
#[derive(Debug, Clone, PartialEq)]
pub struct RowCost {
    /// 1-based position in the device list
    pub position: usize,
    pub name: String,
    pub included: bool,
    pub outcome: std::result::Result<CostResult, RowComputationError>,
}

impl RowCost {
    /// The row's contribution; zero if it failed to compute
    pub fn cost(&self) -> CostResult {
        self.outcome.clone().unwrap_or_default()
    }
}

/// Sums over included devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub daily_cost: Decimal,
    pub monthly_cost: Decimal,
    pub annual_cost: Decimal,
    pub daily_kwh: Decimal,
    pub monthly_kwh: Decimal,
    pub annual_kwh: Decimal,
    pub included_devices: usize,
}
