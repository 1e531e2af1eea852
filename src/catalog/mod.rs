//! Device profile catalog
//!
//! Built-in appliance archetypes with typical wattages and usage patterns.
//! A profile only pre-fills a new device entry; the entry is free to diverge
//! from it afterwards.

use crate::core::DeviceRecord;
use rust_decimal::Decimal;

/// Name of the fallback profile
pub const OTHER: &str = "Other";

/// Default values for one kind of appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: &'static str,
    /// High-power draw (W)
    pub power_heavy: Decimal,
    /// Low-power draw (W)
    pub power_light: Decimal,
    /// Time share in the high-power state (%)
    pub alloc_heavy: Decimal,
    /// Time share in the low-power state (%)
    pub alloc_light: Decimal,
    /// Nominal peak-period hours per day
    pub hours_peak: Decimal,
    /// Nominal off-peak hours per day
    pub hours_low: Decimal,
    pub days: u32,
    pub weeks: u32,
}

impl DeviceProfile {
    /// Template record for a new device of this kind.
    ///
    /// The generic profile leaves the name blank so the user has to supply one.
    pub fn to_record(&self, count: u32) -> DeviceRecord {
        let name = if self.name == OTHER { String::new() } else { self.name.to_string() };
        DeviceRecord {
            name,
            count: count.into(),
            power_heavy: self.power_heavy.into(),
            power_light: self.power_light.into(),
            alloc_heavy: self.alloc_heavy.into(),
            alloc_light: self.alloc_light.into(),
            hours_peak: self.hours_peak.into(),
            hours_low: self.hours_low.into(),
            days: self.days.into(),
            weeks: self.weeks.into(),
            include: Some(true),
        }
    }
}

const fn w(units: u32) -> Decimal {
    Decimal::from_parts(units, 0, 0, false, 0)
}

const fn d(units: u32, scale: u32) -> Decimal {
    Decimal::from_parts(units, 0, 0, false, scale)
}

#[allow(clippy::too_many_arguments)]
const fn profile(
    name: &'static str,
    power_heavy: Decimal,
    power_light: Decimal,
    alloc_heavy: Decimal,
    alloc_light: Decimal,
    hours_peak: Decimal,
    hours_low: Decimal,
    days: u32,
    weeks: u32,
) -> DeviceProfile {
    DeviceProfile {
        name,
        power_heavy,
        power_light,
        alloc_heavy,
        alloc_light,
        hours_peak,
        hours_low,
        days,
        weeks,
    }
}

const FALLBACK: DeviceProfile = profile(OTHER, w(100), w(10), w(100), w(0), w(0), w(0), 7, 52);

static PROFILES: [DeviceProfile; 36] = [
    FALLBACK,
    // Televisions
    profile("Television (LED) 32 inch", w(45), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (LED) 55 inch", w(80), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (LED) 65 inch", w(110), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (LED) 75 inch", w(145), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (OLED) 32 inch", w(55), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (OLED) 55 inch", w(100), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (OLED) 65 inch", w(160), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (OLED) 75 inch", w(220), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (Micro LED) 32 inch", w(50), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (Micro LED) 55 inch", w(90), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (Micro LED) 65 inch", w(140), w(1), w(100), w(0), w(3), w(1), 7, 52),
    profile("Television (Micro LED) 75 inch", w(190), w(1), w(100), w(0), w(3), w(1), 7, 52),
    // Computers
    profile("Computer (Gaming)", w(400), w(50), w(80), w(20), w(8), w(1), 5, 52),
    profile("Computer (Mac Mini M4)", w(30), w(5), w(10), w(90), w(8), w(1), 5, 52),
    profile("Computer (Desktop)", w(200), w(50), w(10), w(90), w(8), w(1), 5, 52),
    // Lighting
    profile("Light (Incandescent)", w(60), w(0), w(100), w(0), w(5), w(0), 7, 52),
    profile("Light (Halogen)", w(45), w(0), w(100), w(0), w(5), w(0), 7, 52),
    profile("Light (LED Spotlight)", w(5), w(0), w(100), w(0), w(5), w(0), 7, 52),
    profile("Light (LED Bulb)", w(9), w(0), w(100), w(0), w(5), w(0), 7, 52),
    profile("Light (LED ceiling light)", w(18), w(0), w(100), w(0), w(5), w(0), 7, 52),
    // Heating and cooling
    profile("Electric Radiator", w(1500), w(0), w(100), w(0), w(4), w(0), 7, 26),
    profile("Fan Heater", w(2000), w(0), w(100), w(0), w(2), w(0), 7, 20),
    profile("Air Conditioner (Heating)", w(1200), w(10), w(80), w(20), w(4), w(0), 7, 20),
    profile("Air Conditioner (Cooling)", w(1200), w(10), w(80), w(20), w(4), w(0), 7, 12),
    // Set-top boxes
    profile("Sky Q box", w(21), w(17), w(40), w(60), w(5), w(19), 7, 52),
    profile("Sky Q mini", w(11), w(4), w(40), w(60), w(5), w(19), 7, 52),
    profile("Sky Stream Puck", w(4), d(5, 1), w(40), w(60), w(5), w(19), 7, 52),
    profile("Virgin Media 360 Box", w(12), d(16, 1), w(40), w(60), w(5), w(19), 7, 52),
    profile("Apple TV", w(5), d(5, 1), w(40), w(60), w(4), w(20), 7, 52),
    // Kitchen and laundry
    profile("Induction Hob", w(2000), w(0), w(100), w(0), d(5, 1), w(0), 7, 52),
    profile("Electric Oven (Fan)", w(2500), w(0), w(30), w(70), d(7, 1), w(0), 5, 52),
    profile("Electric Oven (Conventional)", w(2500), w(0), w(45), w(55), d(8, 1), w(0), 5, 52),
    profile("Washing Machine", w(2000), w(200), w(20), w(80), d(5, 1), d(5, 1), 3, 52),
    profile("Tumble Dryer", w(2500), w(200), w(90), w(10), w(1), w(0), 3, 40),
    profile("Dishwasher", w(1800), w(100), w(30), w(70), w(0), d(15, 1), 5, 52),
];

/// All profiles, fallback first
pub fn profiles() -> &'static [DeviceProfile] {
    &PROFILES
}

/// Profile for `name`, or the generic fallback when there is none
pub fn lookup(name: &str) -> &'static DeviceProfile {
    PROFILES.iter().find(|p| p.name == name).unwrap_or(&PROFILES[0])
}

/// Profile names in selector order: alphabetical, fallback last
pub fn device_types() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PROFILES
        .iter()
        .map(|p| p.name)
        .filter(|name| *name != OTHER)
        .collect();
    names.sort_unstable();
    names.push(OTHER);
    names
}
