//! Appliance Cost Calculator - Main entry point
//!
//! Keeps a household device list between runs and reports what each device
//! costs per day, month and year under a peak/off-peak tariff.

mod cli;

use anyhow::Context;
use appliance_cost_lib::catalog;
use appliance_cost_lib::core::{Config, Error, RateSettings};
use appliance_cost_lib::db::Database;
use appliance_cost_lib::exchange;
use appliance_cost_lib::i18n::I18n;
use appliance_cost_lib::report::{self, Report};
use appliance_cost_lib::session::{Mutation, Session};
use clap::Parser;

use crate::cli::{Args, Command, ReportArgs};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let i18n = I18n::new(&config.general.language);
    let report = Report::new(&i18n, &config.general.currency_symbol);

    if let Command::Catalog = args.command {
        println!("{}", i18n.get("catalog.title"));
        println!("{}", report.catalog_table());
        return Ok(());
    }

    let db_path = match args.database {
        Some(path) => path,
        None => config.database_path()?,
    };
    let mut db = Database::open(&db_path)
        .with_context(|| format!("Failed to open session database {}", db_path.display()))?;
    let session = db.load_session(&config.rates.to_settings())?;

    let (mutation, view) = match args.command {
        // Printed before the database was opened
        Command::Catalog => return Ok(()),
        Command::Add { device_type, device } => {
            let profile = catalog::lookup(&device_type);
            if profile.name != device_type {
                log::warn!("Unknown device type '{}', starting from '{}'", device_type, profile.name);
            }
            let mut record = profile.to_record(1);
            device.apply_to(&mut record)?;
            (Mutation::Add(record), ReportArgs::default())
        }
        Command::Edit { position, device } => {
            let index = to_index(position)?;
            let mut record = session
                .devices()
                .get(index)
                .cloned()
                .ok_or(Error::DeviceNotFound(position))?;
            device.apply_to(&mut record)?;
            (Mutation::Edit { index, record }, ReportArgs::default())
        }
        Command::Remove { position } => {
            (Mutation::Remove { index: to_index(position)? }, ReportArgs::default())
        }
        Command::Include { position } => (
            Mutation::SetInclude { index: to_index(position)?, include: true },
            ReportArgs::default(),
        ),
        Command::Exclude { position } => (
            Mutation::SetInclude { index: to_index(position)?, include: false },
            ReportArgs::default(),
        ),
        Command::Rates { peak: None, off_peak: None } => {
            println!("{}", report.rates_line(session.rates()));
            return Ok(());
        }
        Command::Rates { peak, off_peak } => {
            let current = session.rates();
            let rates = RateSettings::new(
                peak.unwrap_or(current.peak),
                off_peak.unwrap_or(current.off_peak),
            );
            (Mutation::SetRates(rates), ReportArgs::default())
        }
        Command::Report(view) => {
            print_report(&report, &i18n, &session, view)?;
            return Ok(());
        }
        Command::Import { file } => {
            let imported = exchange::import_csv(&file)?;
            (Mutation::Import(imported), ReportArgs::default())
        }
        Command::Export { file } => {
            exchange::export_csv(&session, &file)
                .with_context(|| format!("Failed to export to {}", file.display()))?;
            println!("{}: {}", i18n.get("status.exported"), file.display());
            return Ok(());
        }
    };

    let session = session.apply(mutation)?;
    db.save_session(&session)?;
    print_report(&report, &i18n, &session, view)?;
    Ok(())
}

/// 1-based position from the command line to a list index
fn to_index(position: usize) -> Result<usize, Error> {
    position.checked_sub(1).ok_or(Error::DeviceNotFound(position))
}

fn print_report(
    report: &Report<'_>,
    i18n: &I18n,
    session: &Session,
    view: ReportArgs,
) -> anyhow::Result<()> {
    let assessment = session.assess();

    if view.json {
        println!("{}", report::to_json(session, &assessment)?);
        return Ok(());
    }

    if session.is_empty() {
        println!("{}", i18n.get("table.empty"));
    } else {
        println!("{}", report.breakdown_table(session, &assessment));
    }
    println!("{}", report.rates_line(session.rates()));
    println!();
    println!("{}", i18n.get("totals.title"));
    for line in report.totals_lines(&assessment.totals) {
        println!("  {}", line);
    }

    if view.chart {
        let slices = report::chart_slices(&assessment.rows);
        println!();
        if slices.is_empty() {
            println!("{}", i18n.get("chart.empty"));
        } else {
            println!("{}", i18n.get("chart.title"));
            println!("{}", report.chart_table(&slices));
        }
    }

    if view.details {
        if let Some(lines) = report.details_lines(session) {
            println!();
            for line in lines {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}
