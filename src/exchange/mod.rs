//! CSV import and export of the device list
//!
//! One row per device, columns named after [`Field`]. The tariff travels in
//! two extra columns, `Rate Peak` and `Rate Low`, filled on the first row
//! only.

use crate::core::{DeviceRecord, Error, Field, ImportError, Numeric, RateSettings, Result};
use crate::session::Session;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;

pub const RATE_PEAK: &str = "Rate Peak";
pub const RATE_LOW: &str = "Rate Low";

/// Contents of an imported file
#[derive(Debug, Clone, PartialEq)]
pub struct Imported {
    pub devices: Vec<DeviceRecord>,
    /// Rates embedded in the file, if both rate columns were present
    pub rates: Option<RateSettings>,
}

/// Where each known column sits in the file being read
struct Columns {
    name: usize,
    power_heavy: usize,
    power_light: usize,
    alloc_heavy: usize,
    alloc_light: usize,
    hours_peak: usize,
    hours_low: usize,
    count: Option<usize>,
    days: Option<usize>,
    weeks: Option<usize>,
    include: Option<usize>,
    rates: Option<(usize, usize)>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> std::result::Result<Self, ImportError> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require = |field: Field| find(field.column()).ok_or(ImportError::MissingColumn(field.column()));

        Ok(Self {
            name: require(Field::Name)?,
            power_heavy: require(Field::PowerHeavy)?,
            power_light: require(Field::PowerLight)?,
            alloc_heavy: require(Field::AllocHeavy)?,
            alloc_light: require(Field::AllocLight)?,
            hours_peak: require(Field::HoursPeak)?,
            hours_low: require(Field::HoursLow)?,
            count: find(Field::Count.column()),
            days: find(Field::Days.column()),
            weeks: find(Field::Weeks.column()),
            include: find(Field::Include.column()),
            rates: find(RATE_PEAK).zip(find(RATE_LOW)),
        })
    }

    fn record(&self, row: &StringRecord) -> DeviceRecord {
        let cell = |i: usize| row.get(i).unwrap_or("");
        let numeric = |i: usize| Numeric::parse(cell(i));
        let optional = |i: Option<usize>, default: u32| i.map_or(Numeric::from(default), |i| numeric(i));

        DeviceRecord {
            name: cell(self.name).to_string(),
            count: optional(self.count, 1),
            power_heavy: numeric(self.power_heavy),
            power_light: numeric(self.power_light),
            alloc_heavy: numeric(self.alloc_heavy),
            alloc_light: numeric(self.alloc_light),
            hours_peak: numeric(self.hours_peak),
            hours_low: numeric(self.hours_low),
            days: optional(self.days, 7),
            weeks: optional(self.weeks, 52),
            include: self.include.and_then(|i| parse_include(cell(i))),
        }
    }

    fn rates(&self, row: &StringRecord) -> std::result::Result<Option<RateSettings>, ImportError> {
        let Some((peak, low)) = self.rates else {
            return Ok(None);
        };
        let peak = parse_rate(RATE_PEAK, row.get(peak).unwrap_or(""))?;
        let low = parse_rate(RATE_LOW, row.get(low).unwrap_or(""))?;
        Ok(Some(RateSettings::new(peak, low)))
    }
}

fn parse_rate(column: &'static str, text: &str) -> std::result::Result<Decimal, ImportError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .filter(|rate| !rate.is_sign_negative() || rate.is_zero())
        .ok_or_else(|| ImportError::InvalidRate {
            column,
            value: text.to_string(),
        })
}

fn parse_include(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "true" | "yes" | "1" | "1.0" => Some(true),
        "false" | "no" | "0" | "0.0" => Some(false),
        other => {
            log::warn!("Unrecognised Include value {:?}, treating device as included", other);
            None
        }
    }
}

/// Parse a device table. Either the whole file is accepted or nothing is.
pub fn read_csv(reader: impl Read) -> std::result::Result<Imported, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = Columns::locate(rdr.headers()?)?;

    let mut devices = Vec::new();
    let mut rates = None;
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        if i == 0 {
            rates = columns.rates(&row)?;
        }
        devices.push(columns.record(&row));
    }

    Ok(Imported { devices, rates })
}

/// Load a device table from a file
pub fn import_csv(path: &Path) -> Result<Imported> {
    let file = File::open(path)?;
    let imported = read_csv(io::BufReader::new(file))?;
    log::info!("Read {} devices from {}", imported.devices.len(), path.display());
    Ok(imported)
}

/// Write the session's devices and rates as CSV to any writer
pub fn write_csv(session: &Session, writer: impl Write) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
    header.extend([RATE_PEAK, RATE_LOW]);
    wtr.write_record(&header)?;

    for (i, device) in session.devices().iter().enumerate() {
        let mut row: Vec<String> = Field::ALL
            .iter()
            .map(|&field| match field {
                Field::Name => device.name.clone(),
                Field::Include => match device.include {
                    Some(true) => "True".to_string(),
                    Some(false) => "False".to_string(),
                    None => String::new(),
                },
                _ => device.numeric(field).map(Numeric::to_string).unwrap_or_default(),
            })
            .collect();

        if i == 0 {
            row.push(session.rates().peak.to_string());
            row.push(session.rates().off_peak.to_string());
        } else {
            row.extend([String::new(), String::new()]);
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save the session to a CSV file
pub fn export_csv(session: &Session, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(session, io::BufWriter::new(file)).map_err(|e| Error::Serialization(e.to_string()))?;
    log::info!("Wrote {} devices to {}", session.devices().len(), path.display());
    Ok(())
}
