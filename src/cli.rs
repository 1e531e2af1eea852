use std::path::PathBuf;

use appliance_cost_lib::core::{clock, DeviceRecord, Numeric, ValidationError};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Configuration file, instead of the one in the user config directory.
    #[clap(long, env = "APPLIANCE_COST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session database, instead of the configured one.
    #[clap(long, env = "APPLIANCE_COST_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in device types and their defaults.
    #[clap(name = "catalog")]
    Catalog,

    /// Add a device, starting from a catalog type.
    #[clap(name = "add")]
    Add {
        /// Catalog device type; unknown types start from "Other".
        device_type: String,

        #[clap(flatten)]
        device: DeviceArgs,
    },

    /// Change fields of an existing device.
    #[clap(name = "edit")]
    Edit {
        /// 1-based position in the list.
        position: usize,

        #[clap(flatten)]
        device: DeviceArgs,
    },

    /// Delete a device.
    #[clap(name = "remove")]
    Remove { position: usize },

    /// Count a device towards the totals again.
    #[clap(name = "include")]
    Include { position: usize },

    /// Keep a device in the list but leave it out of the totals.
    #[clap(name = "exclude")]
    Exclude { position: usize },

    /// Show or change the peak and off-peak rates.
    #[clap(name = "rates")]
    Rates {
        /// Peak rate per kWh.
        #[clap(long)]
        peak: Option<Decimal>,

        /// Off-peak rate per kWh.
        #[clap(long = "off-peak")]
        off_peak: Option<Decimal>,
    },

    /// Print the cost report.
    #[clap(name = "report")]
    Report(ReportArgs),

    /// Replace the device list with a CSV file.
    #[clap(name = "import")]
    Import { file: PathBuf },

    /// Write the device list and rates to a CSV file.
    #[clap(name = "export")]
    Export { file: PathBuf },
}

#[derive(Copy, Clone, Default, Parser)]
pub struct ReportArgs {
    /// Walk through the calculation for the first device.
    #[clap(long)]
    pub details: bool,

    /// Show each device's share of the annual cost.
    #[clap(long)]
    pub chart: bool,

    /// Print a JSON snapshot instead of tables.
    #[clap(long)]
    pub json: bool,
}

/// Field overrides for `add` and `edit`
#[derive(Clone, Default, Parser)]
pub struct DeviceArgs {
    #[clap(long)]
    pub name: Option<String>,

    /// Number of identical units.
    #[clap(long)]
    pub count: Option<String>,

    /// High-power draw in watts.
    #[clap(long)]
    pub power_heavy: Option<String>,

    /// Low-power draw in watts.
    #[clap(long)]
    pub power_light: Option<String>,

    /// Percent of active time at high power.
    #[clap(long)]
    pub alloc_heavy: Option<String>,

    /// Percent of active time at low power.
    #[clap(long)]
    pub alloc_light: Option<String>,

    /// Daily peak-period use, as hours or HH:MM.
    #[clap(long, value_name = "HOURS")]
    pub hours_peak: Option<String>,

    /// Daily off-peak use, as hours or HH:MM.
    #[clap(long, value_name = "HOURS")]
    pub hours_low: Option<String>,

    /// Days of use per week.
    #[clap(long)]
    pub days: Option<String>,

    /// Weeks of use per year.
    #[clap(long)]
    pub weeks: Option<String>,
}

impl DeviceArgs {
    /// Overwrite the fields given on the command line
    pub fn apply_to(&self, record: &mut DeviceRecord) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            record.name = name.trim().to_string();
        }

        let numeric_fields = [
            (&self.count, &mut record.count),
            (&self.power_heavy, &mut record.power_heavy),
            (&self.power_light, &mut record.power_light),
            (&self.alloc_heavy, &mut record.alloc_heavy),
            (&self.alloc_light, &mut record.alloc_light),
            (&self.days, &mut record.days),
            (&self.weeks, &mut record.weeks),
        ];
        for (arg, cell) in numeric_fields {
            if let Some(text) = arg {
                *cell = Numeric::parse(text);
            }
        }

        if let Some(text) = &self.hours_peak {
            record.hours_peak = clock::parse_hours(text)?.into();
        }
        if let Some(text) = &self.hours_low {
            record.hours_low = clock::parse_hours(text)?.into();
        }
        Ok(())
    }
}
