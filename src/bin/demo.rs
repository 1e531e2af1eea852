//! Appliance Cost Calculator - Demo CLI
//!
//! Scripted walkthrough of a small household: catalog lookups, session
//! mutations, rejected input, pricing, persistence and CSV export.

use appliance_cost_lib::catalog;
use appliance_cost_lib::core::{Numeric, RateSettings};
use appliance_cost_lib::db::Database;
use appliance_cost_lib::exchange;
use appliance_cost_lib::i18n::I18n;
use appliance_cost_lib::report::{self, Report};
use appliance_cost_lib::session::{Mutation, Session};
use rust_decimal::Decimal;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let i18n = I18n::new("en");
    let report = Report::new(&i18n, "\u{00A3}");

    println!("==============================================");
    println!("   {} - Demo CLI", i18n.get("app.title"));
    println!("==============================================\n");

    // 1. Build a household from the catalog
    println!("[1/5] Adding devices from the catalog...");
    let mut session = Session::new(RateSettings::default());
    for (name, count) in [
        ("Television (OLED) 55 inch", 1),
        ("Computer (Gaming)", 1),
        ("Light (LED Bulb)", 8),
        ("Washing Machine", 1),
        ("Fan Heater", 2),
    ] {
        let record = catalog::lookup(name).to_record(count);
        session = match session.apply(Mutation::Add(record)) {
            Ok(next) => {
                println!("      + {} x{}", name, count);
                next
            }
            Err(e) => {
                println!("      ! {}: {}", name, e);
                session
            }
        };
    }
    println!();

    // 2. Show that bad input leaves the session alone
    println!("[2/5] Trying some invalid entries...");
    let mut lopsided = catalog::lookup("Dishwasher").to_record(1);
    lopsided.alloc_heavy = Numeric::parse("50");
    let mut sleepless = catalog::lookup("Sky Q box").to_record(1);
    sleepless.hours_low = Numeric::parse("20");
    for record in [catalog::lookup(catalog::OTHER).to_record(1), lopsided, sleepless] {
        if let Err(e) = session.apply(Mutation::Add(record)) {
            println!("      Rejected: {}", e);
        }
    }
    println!("      Devices still listed: {}\n", session.devices().len());

    // 3. Exclude a device and change the tariff
    println!("[3/5] Excluding the heaters and switching tariff...");
    let cheaper_nights = RateSettings::new(Decimal::new(2450, 4), Decimal::new(750, 4));
    for mutation in [
        Mutation::SetInclude { index: 4, include: false },
        Mutation::SetRates(cheaper_nights),
    ] {
        match session.apply(mutation) {
            Ok(next) => session = next,
            Err(e) => println!("      Error: {}", e),
        }
    }
    println!("      {}\n", report.rates_line(session.rates()));

    // 4. Report
    println!("[4/5] Cost report\n");
    let assessment = session.assess();
    println!("{}", report.breakdown_table(&session, &assessment));
    for line in report.totals_lines(&assessment.totals) {
        println!("  {}", line);
    }
    println!();
    println!("{}", report.chart_table(&report::chart_slices(&assessment.rows)));
    if let Some(lines) = report.details_lines(&session) {
        for line in lines {
            println!("  {}", line);
        }
    }
    println!();

    // 5. Persistence and export
    println!("[5/5] Saving and exporting...");
    match Database::open_in_memory() {
        Ok(mut db) => {
            let stored = db
                .save_session(&session)
                .and_then(|_| db.load_session(&RateSettings::default()));
            match stored {
                Ok(loaded) if loaded == session => {
                    println!("      Session stored and reloaded ({} devices)", loaded.devices().len())
                }
                Ok(_) => println!("      Warning: reloaded session differs"),
                Err(e) => println!("      Warning: could not store session: {}", e),
            }
        }
        Err(e) => println!("      Warning: Could not initialize database: {}", e),
    }

    let mut csv = Vec::new();
    match exchange::write_csv(&session, &mut csv) {
        Ok(()) => {
            println!("      CSV export:\n");
            println!("{}", String::from_utf8_lossy(&csv));
        }
        Err(e) => println!("      Warning: export failed: {}", e),
    }

    println!("==============================================");
}
