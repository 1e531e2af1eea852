//! Database module for persisting the session between runs
//!
//! Uses SQLite to store:
//! - The device list, in display order
//! - The peak/off-peak rates
//!
//! Numeric cells are stored as text so values that never parsed survive a
//! save/load cycle unchanged.

use crate::core::{DeviceRecord, Error, Numeric, RateSettings, Result};
use crate::session::Session;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

/// Database manager
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let db = Self { conn };
        db.init_schema()?;

        log::debug!("Opened session database at {}", path.display());
        Ok(db)
    }

    /// A throwaway database, used by tests and the demo
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Device list, ordered by position
            CREATE TABLE IF NOT EXISTS devices (
                position INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                count TEXT NOT NULL,
                power_heavy TEXT NOT NULL,
                power_light TEXT NOT NULL,
                alloc_heavy TEXT NOT NULL,
                alloc_light TEXT NOT NULL,
                hours_peak TEXT NOT NULL,
                hours_low TEXT NOT NULL,
                days TEXT NOT NULL,
                weeks TEXT NOT NULL,
                include INTEGER
            );

            -- Single row of tariff settings
            CREATE TABLE IF NOT EXISTS rates (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                peak TEXT NOT NULL,
                off_peak TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// Load the stored session. Without stored rates, `default_rates` are used.
    pub fn load_session(&self, default_rates: &RateSettings) -> Result<Session> {
        let rates = self.get_rates()?.unwrap_or(*default_rates);
        let devices = self.get_devices()?;
        Ok(Session::from_parts(devices, rates))
    }

    /// Replace everything stored with `session`, atomically
    pub fn save_session(&mut self, session: &Session) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM devices", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO devices (position, name, count, power_heavy, power_light, alloc_heavy,
                                      alloc_light, hours_peak, hours_low, days, weeks, include)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for (position, d) in session.devices().iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    d.name,
                    d.count.to_string(),
                    d.power_heavy.to_string(),
                    d.power_light.to_string(),
                    d.alloc_heavy.to_string(),
                    d.alloc_light.to_string(),
                    d.hours_peak.to_string(),
                    d.hours_low.to_string(),
                    d.days.to_string(),
                    d.weeks.to_string(),
                    d.include,
                ])?;
            }
        }
        let rates = session.rates();
        tx.execute(
            r#"INSERT INTO rates (id, peak, off_peak, updated_at)
               VALUES (1, ?1, ?2, ?3)
               ON CONFLICT(id) DO UPDATE SET
                   peak = ?1,
                   off_peak = ?2,
                   updated_at = ?3"#,
            params![
                rates.peak.to_string(),
                rates.off_peak.to_string(),
                chrono::Utc::now().timestamp()
            ],
        )?;
        tx.commit()?;

        log::debug!("Saved {} devices", session.devices().len());
        Ok(())
    }

    fn get_devices(&self) -> Result<Vec<DeviceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, count, power_heavy, power_light, alloc_heavy, alloc_light,
                    hours_peak, hours_low, days, weeks, include
             FROM devices
             ORDER BY position ASC",
        )?;

        let devices = stmt
            .query_map([], |row| {
                let numeric = |i: usize| row.get::<_, String>(i).map(|s| Numeric::parse(&s));
                Ok(DeviceRecord {
                    name: row.get(0)?,
                    count: numeric(1)?,
                    power_heavy: numeric(2)?,
                    power_light: numeric(3)?,
                    alloc_heavy: numeric(4)?,
                    alloc_light: numeric(5)?,
                    hours_peak: numeric(6)?,
                    hours_low: numeric(7)?,
                    days: numeric(8)?,
                    weeks: numeric(9)?,
                    include: row.get(10)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(devices)
    }

    fn get_rates(&self) -> Result<Option<RateSettings>> {
        let stored: Option<(String, String)> = self
            .conn
            .query_row("SELECT peak, off_peak FROM rates WHERE id = 1", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?;

        let Some((peak, off_peak)) = stored else {
            return Ok(None);
        };
        let parse = |text: &str| {
            Decimal::from_str(text)
                .map_err(|e| Error::Serialization(format!("Stored rate {:?}: {}", text, e)))
        };
        Ok(Some(RateSettings::new(parse(&peak)?, parse(&off_peak)?)))
    }

    /// Number of stored devices
    pub fn get_devices_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM devices", [], |row| row.get(0))?;
        Ok(count)
    }
}
