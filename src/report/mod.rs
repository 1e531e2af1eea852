//! Report rendering
//!
//! Turns a session and its assessment into terminal tables, totals lines,
//! chart share data, a calculation walkthrough and a JSON snapshot.

use crate::catalog;
use crate::core::clock;
use crate::core::{CostResult, DeviceRecord, Error, Numeric, RateSettings, Result, RowCost, Totals};
use crate::i18n::I18n;
use crate::pricing::PricingEngine;
use crate::session::{Assessment, Session};
use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const CHART_WIDTH: u32 = 30;
const RATE_DP: u32 = 4;

/// Round half-to-even to `dp` places and group the integer part by thousands
pub fn format_quantity(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);

    let text = rounded.abs().to_string();
    let (int_part, frac) = match text.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Currency amount to 2 dp, e.g. `£1,234.57`
pub fn format_money(value: Decimal, currency: &str) -> String {
    let amount = format_quantity(value.abs(), 2);
    if value.is_sign_negative() && amount != "0.00" {
        format!("-{currency}{amount}")
    } else {
        format!("{currency}{amount}")
    }
}

/// Hours cell as HH:MM, or the raw text if it never parsed
fn format_hours_cell(cell: &Numeric) -> String {
    match cell {
        Numeric::Value(hours) => clock::format_hours(*hours),
        Numeric::Malformed(raw) => raw.clone(),
    }
}

/// One slice of the annual cost chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub annual_cost: Decimal,
    /// Percentage of the included annual total
    pub share: Decimal,
}

/// Annual cost share of every included device
pub fn chart_slices(rows: &[RowCost]) -> Vec<ChartSlice> {
    let included: Vec<(&RowCost, CostResult)> =
        rows.iter().filter(|r| r.included).map(|r| (r, r.cost())).collect();
    let total = included
        .iter()
        .try_fold(Decimal::ZERO, |sum, (_, cost)| sum.checked_add(cost.annual_cost))
        .unwrap_or(Decimal::ZERO);

    included
        .into_iter()
        .map(|(row, cost)| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                cost.annual_cost
                    .checked_div(total)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or(Decimal::ZERO)
            };
            ChartSlice {
                name: row.name.clone(),
                annual_cost: cost.annual_cost,
                share,
            }
        })
        .collect()
}

#[derive(Serialize)]
struct SnapshotRow<'a> {
    position: usize,
    #[serde(flatten)]
    device: &'a DeviceRecord,
    included: bool,
    cost: CostResult,
    error: Option<String>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    rates: &'a RateSettings,
    devices: Vec<SnapshotRow<'a>>,
    totals: Totals,
}

/// Machine-readable view of the session and its costs
pub fn to_json(session: &Session, assessment: &Assessment) -> Result<String> {
    let devices = session
        .devices()
        .iter()
        .zip(&assessment.rows)
        .map(|(device, row)| SnapshotRow {
            position: row.position,
            device,
            included: row.included,
            cost: row.cost(),
            error: row.outcome.as_ref().err().map(|e| e.to_string()),
        })
        .collect();

    let snapshot = Snapshot {
        rates: session.rates(),
        devices,
        totals: assessment.totals,
    };
    serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

/// Localised renderer for the terminal report
pub struct Report<'a> {
    i18n: &'a I18n,
    currency: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(i18n: &'a I18n, currency: &'a str) -> Self {
        Self { i18n, currency }
    }

    fn t(&self, key: &str) -> String {
        self.i18n.get(key).to_string()
    }

    fn money(&self, value: Decimal) -> String {
        format_money(value, self.currency)
    }

    /// Per-device breakdown
    pub fn breakdown_table(&self, session: &Session, assessment: &Assessment) -> Table {
        let mut table = new_table();
        table.set_header(vec![
            self.t("table.index"),
            self.t("table.name"),
            self.t("table.count"),
            self.t("table.peak"),
            self.t("table.off_peak"),
            self.t("table.days"),
            self.t("table.weeks"),
            self.t("table.include"),
            self.t("table.daily"),
            self.t("table.monthly"),
            self.t("table.annual"),
            self.t("table.kwh_day"),
        ]);

        for (device, row) in session.devices().iter().zip(&assessment.rows) {
            let cost = row.cost();
            let name = if row.outcome.is_err() {
                Cell::new(&row.name).fg(Color::Red)
            } else if !row.included {
                Cell::new(&row.name).add_attribute(Attribute::Dim)
            } else {
                Cell::new(&row.name)
            };
            let include = if row.included { self.t("table.yes") } else { self.t("table.no") };
            table.add_row(vec![
                right(row.position),
                name,
                right(&device.count),
                right(format_hours_cell(&device.hours_peak)),
                right(format_hours_cell(&device.hours_low)),
                right(&device.days),
                right(&device.weeks),
                Cell::new(include),
                right(self.money(cost.daily_cost)),
                right(self.money(cost.monthly_cost)),
                right(self.money(cost.annual_cost)),
                right(format_quantity(cost.daily_kwh, 3)),
            ]);
        }
        table
    }

    /// Totals over the included devices, one line per period
    pub fn totals_lines(&self, totals: &Totals) -> Vec<String> {
        let line = |key: &str, cost: Decimal, kwh: Decimal| {
            format!("{}: {} ({} kWh)", self.t(key), self.money(cost), format_quantity(kwh, 2))
        };
        vec![
            line("totals.daily", totals.daily_cost, totals.daily_kwh),
            line("totals.monthly", totals.monthly_cost, totals.monthly_kwh),
            line("totals.annual", totals.annual_cost, totals.annual_kwh),
            format!("{}: {}", self.t("totals.devices"), totals.included_devices),
        ]
    }

    /// Both tariffs to 4 dp, e.g. `Peak rate: £0.2361/kWh`
    pub fn rates_line(&self, rates: &RateSettings) -> String {
        format!(
            "{}: {}{}/kWh, {}: {}{}/kWh",
            self.t("rates.peak"),
            self.currency,
            format_quantity(rates.peak, RATE_DP),
            self.t("rates.off_peak"),
            self.currency,
            format_quantity(rates.off_peak, RATE_DP)
        )
    }

    /// Annual share of each included device with a bar
    pub fn chart_table(&self, slices: &[ChartSlice]) -> Table {
        let mut table = new_table();
        table.set_header(vec![
            self.t("table.name"),
            self.t("table.annual"),
            self.t("chart.share"),
            String::new(),
        ]);
        for slice in slices {
            let width = slice
                .share
                .checked_mul(Decimal::from(CHART_WIDTH))
                .and_then(|w| w.checked_div(Decimal::ONE_HUNDRED))
                .and_then(|w| w.round().to_usize())
                .unwrap_or(0);
            table.add_row(vec![
                Cell::new(&slice.name),
                right(self.money(slice.annual_cost)),
                right(format!("{}%", format_quantity(slice.share, 1))),
                Cell::new("\u{2588}".repeat(width)).fg(Color::Green),
            ]);
        }
        table
    }

    /// Step-by-step calculation of the first device, if there is one
    pub fn details_lines(&self, session: &Session) -> Option<Vec<String>> {
        let device = session.devices().first()?;
        let mut lines = vec![format!("{}: {}", self.t("details.title"), device.name)];

        let details = match PricingEngine::new(session.rates()).details(device) {
            Ok(details) => details,
            Err(e) => {
                lines.push(format!("{}: {}", self.t("details.unavailable"), e));
                return Some(lines);
            }
        };

        let unit = |value: Decimal| format!("{}{}", self.currency, format_quantity(value, 4));
        let hours = |value: Decimal| {
            format!("{} ({})", clock::format_hours(value), format_quantity(value, 2))
        };
        lines.extend([
            format!("{}: {} W", self.t("details.avg_watts"), format_quantity(details.avg_watts, 2)),
            format!("{}: {}", self.t("details.avg_kw"), format_quantity(details.avg_kw, 4)),
            format!("{}: {}", self.t("details.scaling"), format_quantity(details.scaling_factor, 4)),
            format!("{}: {}", self.t("details.peak_hours"), hours(details.effective_peak_hours)),
            format!("{}: {}", self.t("details.low_hours"), hours(details.effective_low_hours)),
            format!("{}: {}", self.t("details.peak_cost"), unit(details.unit_peak_cost)),
            format!("{}: {}", self.t("details.low_cost"), unit(details.unit_low_cost)),
            format!("{}: {}", self.t("details.unit_cost"), unit(details.unit_daily_cost)),
            format!("{}: {}", self.t("details.count"), details.count),
            format!("{}: {}", self.t("details.total_cost"), self.money(details.daily_cost)),
        ]);
        Some(lines)
    }

    /// The selectable device types and their defaults
    pub fn catalog_table(&self) -> Table {
        let mut table = new_table();
        table.set_header(vec![
            self.t("table.name"),
            self.t("catalog.power"),
            self.t("catalog.split"),
            self.t("catalog.hours"),
            self.t("table.days"),
            self.t("table.weeks"),
        ]);
        for name in catalog::device_types() {
            let p = catalog::lookup(name);
            table.add_row(vec![
                Cell::new(p.name),
                right(format!("{} / {}", p.power_heavy, p.power_light)),
                right(format!("{} / {}", p.alloc_heavy, p.alloc_light)),
                right(format!(
                    "{} / {}",
                    clock::format_hours(p.hours_peak),
                    clock::format_hours(p.hours_low)
                )),
                right(p.days),
                right(p.weeks),
            ]);
        }
        table
    }
}
