//! End-to-end flow over the public library API: catalog -> session -> pricing
//! -> CSV round trip -> persistence.

use appliance_cost_lib::catalog;
use appliance_cost_lib::core::{Error, ImportError, Numeric, RateSettings};
use appliance_cost_lib::db::Database;
use appliance_cost_lib::exchange::{self, Imported};
use appliance_cost_lib::pricing::PricingEngine;
use appliance_cost_lib::report;
use appliance_cost_lib::session::{Mutation, Session};
use rust_decimal::Decimal;

fn household() -> Session {
    [
        ("Induction Hob", 1),
        ("Television (LED) 55 inch", 2),
        ("Tumble Dryer", 1),
        ("Light (LED Bulb)", 10),
    ]
    .iter()
    .fold(Session::new(RateSettings::default()), |session, (name, count)| {
        session
            .apply(Mutation::Add(catalog::lookup(name).to_record(*count)))
            .unwrap()
    })
}

#[test]
fn catalog_entries_price_consistently() {
    let session = household();
    let assessment = session.assess();
    let engine = PricingEngine::new(session.rates());

    assert_eq!(assessment.rows.len(), 4);
    for (device, row) in session.devices().iter().zip(&assessment.rows) {
        assert_eq!(row.outcome, engine.compute(device));
    }
    assert_eq!(assessment.totals, engine.aggregate(session.devices()));
    assert_eq!(assessment.totals.included_devices, 4);
}

#[test]
fn csv_round_trip_preserves_session() {
    let session = household()
        .apply(Mutation::SetInclude { index: 2, include: false })
        .unwrap()
        .apply(Mutation::SetRates(RateSettings::new(Decimal::new(28, 2), Decimal::new(9, 2))))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("household.csv");
    exchange::export_csv(&session, &path).unwrap();

    let imported = exchange::import_csv(&path).unwrap();
    let restored = Session::default().apply(Mutation::Import(imported)).unwrap();

    assert_eq!(restored, session);
    assert_eq!(restored.assess().totals, session.assess().totals);
}

#[test]
fn malformed_import_is_zeroed_not_fatal() {
    let csv = "\
Name,Power Heavy,Power Light,Alloc Heavy,Alloc Light,Hours Peak,Hours Low
Kettle,3000,0,100,0,0.1,0
Mystery,lots,0,100,0,1,0
";
    let imported = exchange::read_csv(csv.as_bytes()).unwrap();
    assert_eq!(imported.rates, None);
    assert_eq!(imported.devices[1].power_heavy, Numeric::Malformed("lots".into()));

    let session = Session::default().apply(Mutation::Import(imported)).unwrap();
    let assessment = session.assess();
    assert!(assessment.rows[1].outcome.is_err());
    assert_eq!(assessment.totals.included_devices, 2);
    assert_eq!(
        assessment.totals.daily_cost,
        assessment.rows[0].cost().daily_cost
    );

    let slices = report::chart_slices(&assessment.rows);
    assert_eq!(slices[1].share, Decimal::ZERO);
}

#[test]
fn broken_file_leaves_session_alone() {
    let csv = "Name,Power Heavy\nKettle,3000\n";
    let err = exchange::read_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ImportError::MissingColumn("Power Light")));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, csv).unwrap();
    assert!(matches!(
        exchange::import_csv(&path),
        Err(Error::Import(ImportError::MissingColumn(_)))
    ));
}

#[test]
fn import_with_invalid_row_is_rejected() {
    let csv = "\
Name,Power Heavy,Power Light,Alloc Heavy,Alloc Light,Hours Peak,Hours Low
Fridge,90,0,100,0,24,0
Lamp,60,0,60,60,5,0
";
    let imported = exchange::read_csv(csv.as_bytes()).unwrap();
    assert_eq!(imported.devices.len(), 2);

    let session = household();
    let err = session.apply(Mutation::Import(imported)).unwrap_err();
    assert!(matches!(err, Error::Import(ImportError::InvalidRow { row: 2, .. })));
    assert!(err.to_string().contains("Lamp"));
    assert_eq!(session.devices().len(), 4);
}

#[test]
fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");
    let session = household()
        .apply(Mutation::Remove { index: 0 })
        .unwrap();

    {
        let mut db = Database::open(&path).unwrap();
        db.save_session(&session).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let restored = db.load_session(&RateSettings::default()).unwrap();
    assert_eq!(restored, session);
    assert_eq!(restored.devices()[0].name, "Television (LED) 55 inch");
}

#[test]
fn empty_session_reports_zero() {
    let session = Session::new(RateSettings::default());
    let assessment = session.assess();
    assert!(assessment.rows.is_empty());
    assert_eq!(assessment.totals.annual_cost, Decimal::ZERO);

    let json = report::to_json(&session, &assessment).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["devices"].as_array().map(Vec::len), Some(0));

    let imported = Imported { devices: Vec::new(), rates: None };
    let still_empty = session.apply(Mutation::Import(imported)).unwrap();
    assert!(still_empty.is_empty());
}
