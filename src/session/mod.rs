//! Session state: the device list and the tariff
//!
//! A session is never changed in place. Every user action is a [`Mutation`]
//! applied to the current session, producing either the next session or an
//! error that leaves the current one as it was.

use crate::core::{DeviceRecord, Error, ImportError, RateSettings, Result, RowCost, Totals};
use crate::exchange::Imported;
use crate::pricing::{validate, validate_rates, Checkpoint, PricingEngine};

/// The device list together with the rates it is priced at
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    devices: Vec<DeviceRecord>,
    rates: RateSettings,
}

/// A single user action on the session
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Append a new device
    Add(DeviceRecord),
    /// Replace the device at `index` (0-based)
    Edit { index: usize, record: DeviceRecord },
    /// Delete the device at `index` (0-based)
    Remove { index: usize },
    /// Toggle whether the device at `index` counts towards totals
    SetInclude { index: usize, include: bool },
    /// Change the tariff
    SetRates(RateSettings),
    /// Replace the list (and the rates, if the file carried them) with an imported table
    Import(Imported),
}

/// Per-row results and totals of one evaluation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub rows: Vec<RowCost>,
    pub totals: Totals,
}

impl Session {
    pub fn new(rates: RateSettings) -> Self {
        Self {
            devices: Vec::new(),
            rates,
        }
    }

    /// Rebuild a session from stored parts without validating it
    pub fn from_parts(devices: Vec<DeviceRecord>, rates: RateSettings) -> Self {
        Self { devices, rates }
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn rates(&self) -> &RateSettings {
        &self.rates
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Apply one mutation, returning the resulting session
    pub fn apply(&self, mutation: Mutation) -> Result<Session> {
        let mut next = self.clone();
        match mutation {
            Mutation::Add(record) => {
                validate(&record, Checkpoint::Entry)?;
                log::info!("Added {} (x{})", record.name, record.count);
                next.devices.push(record);
            }
            Mutation::Edit { index, record } => {
                validate(&record, Checkpoint::Edit)?;
                let slot = next.devices.get_mut(index).ok_or(Error::DeviceNotFound(index + 1))?;
                log::info!("Updated device {} ({})", index + 1, record.name);
                *slot = record;
            }
            Mutation::Remove { index } => {
                if index >= next.devices.len() {
                    return Err(Error::DeviceNotFound(index + 1));
                }
                let removed = next.devices.remove(index);
                log::info!("Removed device {} ({})", index + 1, removed.name);
            }
            Mutation::SetInclude { index, include } => {
                let slot = next.devices.get_mut(index).ok_or(Error::DeviceNotFound(index + 1))?;
                slot.include = Some(include);
                log::debug!("Device {} include set to {}", index + 1, include);
            }
            Mutation::SetRates(rates) => {
                validate_rates(&rates)?;
                log::info!("Rates set to peak {} / off-peak {}", rates.peak, rates.off_peak);
                next.rates = rates;
            }
            Mutation::Import(imported) => {
                for (i, record) in imported.devices.iter().enumerate() {
                    validate(record, Checkpoint::Edit)
                        .map_err(|source| ImportError::InvalidRow { row: i + 1, source })?;
                }
                log::info!("Loaded {} devices", imported.devices.len());
                next.devices = imported.devices;
                if let Some(rates) = imported.rates {
                    next.rates = rates;
                }
            }
        }
        Ok(next)
    }

    /// Price every device at the session's rates
    pub fn assess(&self) -> Assessment {
        let rows = PricingEngine::new(&self.rates).breakdown(&self.devices);
        let totals = PricingEngine::totals(&rows);
        Assessment { rows, totals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::core::{Numeric, ValidationError};
    use rust_decimal::Decimal;

    fn session_with(names: &[&str]) -> Session {
        names.iter().fold(Session::default(), |session, name| {
            session
                .apply(Mutation::Add(catalog::lookup(name).to_record(1)))
                .unwrap()
        })
    }

    #[test]
    fn test_add_valid_device() {
        let session = session_with(&["Fan Heater", "Apple TV"]);
        assert_eq!(session.devices().len(), 2);
        assert_eq!(session.devices()[1].name, "Apple TV");
    }

    #[test]
    fn test_rejected_add_leaves_state() {
        let session = session_with(&["Fan Heater"]);
        let blank = catalog::lookup(catalog::OTHER).to_record(1);

        let err = session.apply(Mutation::Add(blank)).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyName)));
        assert_eq!(session.devices().len(), 1);
    }

    #[test]
    fn test_add_and_edit_use_different_tolerances() {
        let session = session_with(&["Dishwasher"]);
        let mut record = session.devices()[0].clone();
        record.alloc_light = Numeric::parse("69.95");

        assert!(matches!(
            session.apply(Mutation::Add(record.clone())),
            Err(Error::Validation(ValidationError::AllocationSum { .. }))
        ));
        let edited = session.apply(Mutation::Edit { index: 0, record }).unwrap();
        assert_eq!(edited.devices()[0].alloc_light, Numeric::parse("69.95"));
    }

    #[test]
    fn test_edit_missing_device() {
        let session = session_with(&["Dishwasher"]);
        let record = session.devices()[0].clone();
        assert!(matches!(
            session.apply(Mutation::Edit { index: 3, record }),
            Err(Error::DeviceNotFound(4))
        ));
    }

    #[test]
    fn test_remove_and_include() {
        let session = session_with(&["Fan Heater", "Apple TV", "Dishwasher"]);

        let session = session.apply(Mutation::Remove { index: 1 }).unwrap();
        let names: Vec<&str> = session.devices().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Fan Heater", "Dishwasher"]);

        let session = session.apply(Mutation::SetInclude { index: 0, include: false }).unwrap();
        assert!(!session.devices()[0].is_included());
        assert!(session.apply(Mutation::Remove { index: 2 }).is_err());
    }

    #[test]
    fn test_set_rates() {
        let session = Session::default();
        let cheaper = RateSettings::new(Decimal::new(15, 2), Decimal::new(5, 2));
        assert_eq!(session.apply(Mutation::SetRates(cheaper)).unwrap().rates(), &cheaper);

        let negative = RateSettings::new(Decimal::new(-15, 2), Decimal::ZERO);
        assert!(session.apply(Mutation::SetRates(negative)).is_err());
        assert_eq!(session.rates(), &RateSettings::default());
    }

    #[test]
    fn test_import_keeps_rates_when_absent() {
        let rates = RateSettings::new(Decimal::new(30, 2), Decimal::new(10, 2));
        let session = Session::new(rates);
        let devices = vec![catalog::lookup("Tumble Dryer").to_record(1)];

        let loaded = session
            .apply(Mutation::Import(Imported { devices: devices.clone(), rates: None }))
            .unwrap();
        assert_eq!(loaded.devices(), devices.as_slice());
        assert_eq!(loaded.rates(), &rates);

        let new_rates = RateSettings::default();
        let loaded = session
            .apply(Mutation::Import(Imported { devices, rates: Some(new_rates) }))
            .unwrap();
        assert_eq!(loaded.rates(), &new_rates);
    }

    #[test]
    fn test_import_rejects_invalid_rows() {
        let session = session_with(&["Fan Heater"]);
        let mut lopsided = catalog::lookup("Light (LED Bulb)").to_record(1);
        lopsided.alloc_heavy = Numeric::parse("60");
        lopsided.alloc_light = Numeric::parse("60");
        let devices = vec![catalog::lookup("Tumble Dryer").to_record(1), lopsided];

        let err = session
            .apply(Mutation::Import(Imported { devices, rates: Some(RateSettings::default()) }))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Import(ImportError::InvalidRow {
                row: 2,
                source: ValidationError::AllocationSum { .. }
            })
        ));
        assert_eq!(session.devices().len(), 1);
        assert_eq!(session.devices()[0].name, "Fan Heater");

        let mut unnamed = catalog::lookup("Tumble Dryer").to_record(1);
        unnamed.name = "  ".into();
        let err = session
            .apply(Mutation::Import(Imported { devices: vec![unnamed], rates: None }))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Import(ImportError::InvalidRow { row: 1, source: ValidationError::EmptyName })
        ));
    }

    #[test]
    fn test_import_uses_edit_tolerance() {
        let mut drifted = catalog::lookup("Dishwasher").to_record(1);
        drifted.alloc_light = Numeric::parse("69.95");
        let mut broken = catalog::lookup("Dishwasher").to_record(1);
        broken.weeks = Numeric::Malformed("most".into());

        let loaded = Session::default()
            .apply(Mutation::Import(Imported { devices: vec![drifted, broken], rates: None }))
            .unwrap();
        assert_eq!(loaded.devices().len(), 2);
    }

    #[test]
    fn test_assess_excludes_toggled_devices() {
        let session = session_with(&["Fan Heater", "Apple TV"]);
        let all = session.assess();

        let session = session.apply(Mutation::SetInclude { index: 0, include: false }).unwrap();
        let some = session.assess();

        assert_eq!(some.rows.len(), 2);
        assert_eq!(some.totals.included_devices, 1);
        assert_eq!(
            some.totals.daily_cost,
            all.totals.daily_cost - all.rows[0].cost().daily_cost
        );
    }
}
