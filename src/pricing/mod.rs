//! Pricing engine for appliance cost calculation
//!
//! Converts a device's power profile, duty-cycle split, daily time-of-use and
//! frequency of use into daily, monthly and annual cost and energy under a
//! two-tier (peak/off-peak) tariff. All arithmetic is exact decimal.

mod validation;

pub use validation::{
    validate, validate_rates, Checkpoint, EDIT_ALLOCATION_TOLERANCE, ENTRY_ALLOCATION_TOLERANCE,
};

use crate::core::{
    CostResult, DeviceRecord, Field, RateSettings, RowComputationError, RowCost, Totals,
};
use rust_decimal::Decimal;

/// Average days in a month
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(304167, 0, 0, false, 4);
/// Days in a year
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

const WATTS_PER_KILOWATT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
const DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);
const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Outcome of costing a single row
pub type RowResult<T> = std::result::Result<T, RowComputationError>;

fn mul(a: Decimal, b: Decimal) -> RowResult<Decimal> {
    a.checked_mul(b).ok_or(RowComputationError::Overflow)
}

fn div(a: Decimal, b: Decimal) -> RowResult<Decimal> {
    a.checked_div(b).ok_or(RowComputationError::Overflow)
}

fn add(a: Decimal, b: Decimal) -> RowResult<Decimal> {
    a.checked_add(b).ok_or(RowComputationError::Overflow)
}

/// Intermediate figures of one device's cost calculation, per unit unless noted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationDetails {
    pub count: Decimal,
    /// Weighted average draw in W
    pub avg_watts: Decimal,
    pub avg_kw: Decimal,
    /// (days / 7) * (weeks / 52)
    pub scaling_factor: Decimal,
    /// Peak hours after frequency scaling
    pub effective_peak_hours: Decimal,
    /// Off-peak hours after frequency scaling
    pub effective_low_hours: Decimal,
    pub unit_daily_kwh: Decimal,
    pub unit_peak_cost: Decimal,
    pub unit_low_cost: Decimal,
    pub unit_daily_cost: Decimal,
    /// Daily cost of all units
    pub daily_cost: Decimal,
    /// Daily energy of all units
    pub daily_kwh: Decimal,
}

/// Pricing engine that calculates appliance costs at a given tariff
pub struct PricingEngine {
    rates: RateSettings,
}

impl PricingEngine {
    /// Create a new pricing engine with the given rates
    pub fn new(rates: &RateSettings) -> Self {
        Self { rates: *rates }
    }

    /// Update the tariff
    pub fn update_rates(&mut self, rates: &RateSettings) {
        self.rates = *rates;
    }

    pub fn rates(&self) -> &RateSettings {
        &self.rates
    }

    /// Step-by-step calculation for one device.
    ///
    /// Frequency scaling is applied to the hours, never to the power or the
    /// duty split, and in this exact order so results stay reproducible.
    pub fn details(&self, record: &DeviceRecord) -> RowResult<CalculationDetails> {
        let power_heavy = record.power_heavy.require(Field::PowerHeavy)?;
        let power_light = record.power_light.require(Field::PowerLight)?;
        let alloc_heavy = div(record.alloc_heavy.require(Field::AllocHeavy)?, Decimal::ONE_HUNDRED)?;
        let alloc_light = div(record.alloc_light.require(Field::AllocLight)?, Decimal::ONE_HUNDRED)?;

        let avg_watts = add(mul(power_heavy, alloc_heavy)?, mul(power_light, alloc_light)?)?;
        let avg_kw = div(avg_watts, WATTS_PER_KILOWATT)?;

        let hours_peak = record.hours_peak.require(Field::HoursPeak)?;
        let hours_low = record.hours_low.require(Field::HoursLow)?;

        let days = record.days.require(Field::Days)?;
        let weeks = record.weeks.require(Field::Weeks)?;
        let scaling_factor = mul(div(days, DAYS_PER_WEEK)?, div(weeks, WEEKS_PER_YEAR)?)?;

        let effective_peak_hours = mul(hours_peak, scaling_factor)?;
        let effective_low_hours = mul(hours_low, scaling_factor)?;

        let count = record.count.require(Field::Count)?;

        let unit_daily_kwh = add(mul(effective_peak_hours, avg_kw)?, mul(effective_low_hours, avg_kw)?)?;
        let unit_peak_cost = mul(mul(effective_peak_hours, avg_kw)?, self.rates.peak)?;
        let unit_low_cost = mul(mul(effective_low_hours, avg_kw)?, self.rates.off_peak)?;
        let unit_daily_cost = add(unit_peak_cost, unit_low_cost)?;

        Ok(CalculationDetails {
            count,
            avg_watts,
            avg_kw,
            scaling_factor,
            effective_peak_hours,
            effective_low_hours,
            unit_daily_kwh,
            unit_peak_cost,
            unit_low_cost,
            unit_daily_cost,
            daily_cost: mul(unit_daily_cost, count)?,
            daily_kwh: mul(unit_daily_kwh, count)?,
        })
    }

    /// Cost and energy of one device row
    pub fn compute(&self, record: &DeviceRecord) -> RowResult<CostResult> {
        let details = self.details(record)?;
        Ok(CostResult {
            daily_cost: details.daily_cost,
            monthly_cost: mul(details.daily_cost, DAYS_PER_MONTH)?,
            annual_cost: mul(details.daily_cost, DAYS_PER_YEAR)?,
            daily_kwh: details.daily_kwh,
            monthly_kwh: mul(details.daily_kwh, DAYS_PER_MONTH)?,
            annual_kwh: mul(details.daily_kwh, DAYS_PER_YEAR)?,
        })
    }

    /// Per-row results for the whole list. A failing row never stops the others.
    pub fn breakdown(&self, records: &[DeviceRecord]) -> Vec<RowCost> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let outcome = self.compute(record);
                if let Err(e) = &outcome {
                    log::warn!("Device {} ({}) counted as zero: {}", i + 1, record.name, e);
                }
                RowCost {
                    position: i + 1,
                    name: record.name.clone(),
                    included: record.is_included(),
                    outcome,
                }
            })
            .collect()
    }

    /// Totals over the included devices
    pub fn aggregate(&self, records: &[DeviceRecord]) -> Totals {
        Self::totals(&self.breakdown(records))
    }

    /// Sum an existing breakdown. Failed rows contribute zero; excluded rows nothing.
    ///
    /// Monthly and annual energy derive from the summed daily energy. A row
    /// that would push any total past the representable range is left out
    /// and logged.
    pub fn totals(rows: &[RowCost]) -> Totals {
        let mut totals = Totals::default();
        for row in rows.iter().filter(|r| r.included) {
            match Self::accumulate(&totals, &row.cost()) {
                Ok(next) => totals = next,
                Err(e) => {
                    log::warn!("Device {} ({}) left out of totals: {}", row.position, row.name, e)
                }
            }
        }
        totals
    }

    fn accumulate(totals: &Totals, cost: &CostResult) -> RowResult<Totals> {
        let daily_kwh = add(totals.daily_kwh, cost.daily_kwh)?;
        Ok(Totals {
            daily_cost: add(totals.daily_cost, cost.daily_cost)?,
            monthly_cost: add(totals.monthly_cost, cost.monthly_cost)?,
            annual_cost: add(totals.annual_cost, cost.annual_cost)?,
            daily_kwh,
            monthly_kwh: mul(daily_kwh, DAYS_PER_MONTH)?,
            annual_kwh: mul(daily_kwh, DAYS_PER_YEAR)?,
            included_devices: totals.included_devices + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::core::Numeric;

    fn device(name: &str, power_heavy: &str, hours_peak: &str, hours_low: &str) -> DeviceRecord {
        DeviceRecord {
            name: name.to_string(),
            count: 1u32.into(),
            power_heavy: Numeric::parse(power_heavy),
            power_light: 0u32.into(),
            alloc_heavy: 100u32.into(),
            alloc_light: 0u32.into(),
            hours_peak: Numeric::parse(hours_peak),
            hours_low: Numeric::parse(hours_low),
            days: 7u32.into(),
            weeks: 52u32.into(),
            include: Some(true),
        }
    }

    fn rates(peak: &str, off_peak: &str) -> RateSettings {
        RateSettings::new(peak.parse().unwrap(), off_peak.parse().unwrap())
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_induction_hob_example() {
        let engine = PricingEngine::new(&rates("0.2361", "0.07"));
        let hob = device("Induction Hob", "2000", "0.5", "0");

        let details = engine.details(&hob).unwrap();
        assert_eq!(details.avg_kw, dec("2.0"));
        assert_eq!(details.scaling_factor, Decimal::ONE);

        let result = engine.compute(&hob).unwrap();
        assert_eq!(result.daily_cost, dec("0.2361"));
        assert_eq!(result.annual_cost, dec("86.1765"));
        assert_eq!(result.daily_kwh, dec("1"));
        assert_eq!(result.annual_kwh, dec("365"));
    }

    #[test]
    fn test_monthly_and_annual_multipliers() {
        let engine = PricingEngine::new(&RateSettings::default());
        let record = catalog::lookup("Computer (Gaming)").to_record(3);
        let result = engine.compute(&record).unwrap();

        assert_eq!(result.monthly_cost, result.daily_cost * dec("30.4167"));
        assert_eq!(result.annual_cost, result.daily_cost * dec("365"));
        assert_eq!(result.monthly_kwh, result.daily_kwh * dec("30.4167"));
        assert_eq!(result.annual_kwh, result.daily_kwh * dec("365"));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let engine = PricingEngine::new(&RateSettings::default());
        let record = catalog::lookup("Washing Machine").to_record(1);
        let first = engine.compute(&record).unwrap();
        let second = engine.compute(&record).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.daily_cost.serialize(), second.daily_cost.serialize());
    }

    #[test]
    fn test_full_frequency_keeps_nominal_hours() {
        let engine = PricingEngine::new(&RateSettings::default());
        let record = catalog::lookup("Sky Q box").to_record(1);
        let details = engine.details(&record).unwrap();
        assert_eq!(details.scaling_factor, Decimal::ONE);
        assert_eq!(details.effective_peak_hours, dec("5"));
        assert_eq!(details.effective_low_hours, dec("19"));
    }

    #[test]
    fn test_partial_frequency_scales_hours() {
        let engine = PricingEngine::new(&RateSettings::default());
        let mut record = device("Sauna", "6000", "2", "0");
        record.days = 3u32.into();
        record.weeks = 26u32.into();

        let details = engine.details(&record).unwrap();
        assert_eq!(details.scaling_factor.round_dp(3), dec("0.214"));
        assert_eq!(details.effective_peak_hours, dec("2") * details.scaling_factor);
    }

    #[test]
    fn test_duty_cycle_and_count() {
        let engine = PricingEngine::new(&rates("0.30", "0.10"));
        // 400 W * 80% + 50 W * 20% = 330 W
        let mut record = catalog::lookup("Computer (Gaming)").to_record(2);
        record.days = 7u32.into();

        let details = engine.details(&record).unwrap();
        assert_eq!(details.avg_watts, dec("330"));
        assert_eq!(details.avg_kw, dec("0.33"));
        // 8h * 0.33 kW * 0.30 + 1h * 0.33 kW * 0.10
        assert_eq!(details.unit_daily_cost, dec("0.825"));
        assert_eq!(details.daily_cost, dec("1.65"));
        assert_eq!(details.daily_kwh, dec("5.94"));
    }

    #[test]
    fn test_malformed_row_is_zeroed() {
        let engine = PricingEngine::new(&RateSettings::default());
        let broken = device("Heater", "two kilowatts", "1", "0");
        assert_eq!(
            engine.compute(&broken),
            Err(RowComputationError::Malformed {
                field: Field::PowerHeavy,
                value: "two kilowatts".into(),
            })
        );

        let ok = device("Kettle", "1000", "1", "0");
        let rows = engine.breakdown(&[broken, ok.clone()]);
        assert_eq!(rows[0].cost(), CostResult::zero());
        assert!(rows[0].outcome.is_err());

        let totals = PricingEngine::totals(&rows);
        assert_eq!(totals.daily_cost, engine.compute(&ok).unwrap().daily_cost);
        assert_eq!(totals.included_devices, 2);
    }

    #[test]
    fn test_overflow_is_row_local() {
        let engine = PricingEngine::new(&RateSettings::default());
        let mut huge = device("Reactor", "79228162514264337593543950335", "24", "0");
        huge.count = Numeric::parse("79228162514264337593543950335");
        assert_eq!(engine.compute(&huge), Err(RowComputationError::Overflow));

        let totals = engine.aggregate(&[huge, device("Lamp", "60", "5", "0")]);
        assert!(totals.daily_cost > Decimal::ZERO);
    }

    #[test]
    fn test_totals_overflow_drops_row() {
        let engine = PricingEngine::new(&RateSettings::default());
        let big = device("Smelter", "8333333333333333333333333333", "24", "0");
        let lamp = device("Lamp", "60", "5", "0");

        // Each row fits on its own; their summed annual energy does not
        let single = engine.compute(&big).unwrap();
        assert!(single.annual_kwh > Decimal::ZERO);

        let records = vec![big.clone(), big, lamp.clone()];
        let rows = engine.breakdown(&records);
        assert!(rows.iter().all(|r| r.outcome.is_ok()));

        let totals = PricingEngine::totals(&rows);
        assert_eq!(totals.included_devices, 2);
        let lamp_kwh = engine.compute(&lamp).unwrap().daily_kwh;
        assert_eq!(totals.daily_kwh, single.daily_kwh + lamp_kwh);
        assert_eq!(totals.annual_kwh, totals.daily_kwh * DAYS_PER_YEAR);
        assert_eq!(engine.aggregate(&records), totals);
    }

    #[test]
    fn test_excluded_devices_not_totalled() {
        // 1000 W for 5 peak hours at 0.20 = 1.00 per day
        let engine = PricingEngine::new(&rates("0.20", "0.07"));
        let mut excluded = device("Heater", "2000", "3", "2");
        excluded.include = Some(false);
        let included = device("Kettle", "1000", "5", "0");

        let records = vec![excluded, included];
        let rows = engine.breakdown(&records);
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].included);
        assert!(rows[0].cost().daily_cost > Decimal::ZERO);

        let totals = engine.aggregate(&records);
        assert_eq!(totals.daily_cost, dec("1.00"));
        assert_eq!(totals.included_devices, 1);
    }

    #[test]
    fn test_unset_include_counts() {
        let engine = PricingEngine::new(&rates("0.20", "0.07"));
        let mut record = device("Kettle", "1000", "5", "0");
        record.include = None;
        assert_eq!(engine.aggregate(&[record]).included_devices, 1);
    }

    #[test]
    fn test_energy_totals_from_summed_daily_energy() {
        let engine = PricingEngine::new(&RateSettings::default());
        let records: Vec<DeviceRecord> = ["Dishwasher", "Tumble Dryer", "Light (LED Bulb)"]
            .iter()
            .map(|name| catalog::lookup(name).to_record(2))
            .collect();

        let totals = engine.aggregate(&records);
        let daily_kwh: Decimal = records.iter().map(|r| engine.compute(r).unwrap().daily_kwh).sum();
        assert_eq!(totals.daily_kwh, daily_kwh);
        assert_eq!(totals.monthly_kwh, daily_kwh * DAYS_PER_MONTH);
        assert_eq!(totals.annual_kwh, daily_kwh * DAYS_PER_YEAR);
    }

    #[test]
    fn test_update_rates() {
        let mut engine = PricingEngine::new(&rates("0.20", "0.07"));
        let kettle = device("Kettle", "1000", "5", "0");
        assert_eq!(engine.compute(&kettle).unwrap().daily_cost, dec("1.00"));

        engine.update_rates(&rates("0.30", "0.07"));
        assert_eq!(engine.rates().peak, dec("0.30"));
        assert_eq!(engine.compute(&kettle).unwrap().daily_cost, dec("1.50"));
    }

    #[test]
    fn test_empty_list() {
        let engine = PricingEngine::new(&RateSettings::default());
        assert_eq!(engine.aggregate(&[]), Totals::default());
    }
}
