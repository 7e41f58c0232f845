//! # carsales-store
//!
//! SQLite-backed keyed store for car-sale records. `plate_no` is the natural
//! key: importing the same document twice updates records in place instead
//! of duplicating them. All writes for one import run happen inside a single
//! transaction, so a reader never observes a partially-imported document.
//!
//! Concurrent import runs against the same store are not coordinated here;
//! callers must serialize them externally.

pub mod error;

use std::path::Path;

use rusqlite::{params, Connection};

use carsales_records::CarSaleRecord;

pub use error::{Result, StoreError};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS car_sales (
    id           INTEGER NOT NULL,
    model        INTEGER NOT NULL,
    brand        TEXT NOT NULL,
    transmission TEXT NOT NULL,
    plate_no     TEXT PRIMARY KEY CHECK (length(plate_no) > 0),
    mileage      INTEGER,
    color        TEXT NOT NULL,
    price        REAL NOT NULL
);
";

const UPSERT_SQL: &str = "
INSERT INTO car_sales (id, model, brand, transmission, plate_no, mileage, color, price)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(plate_no) DO UPDATE SET
    id = excluded.id,
    model = excluded.model,
    brand = excluded.brand,
    transmission = excluded.transmission,
    mileage = excluded.mileage,
    color = excluded.color,
    price = excluded.price
";

pub struct CarStore {
    conn: Connection,
}

impl CarStore {
    /// Open (creating if needed) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a private in-memory store. Used by tests and the server's
    /// handler tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Upsert every record inside one transaction, keyed by `plate_no`.
    ///
    /// All-or-nothing: if any row fails, the transaction rolls back and the
    /// store is left exactly as it was before the call.
    pub fn upsert_all(&mut self, records: &[CarSaleRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_SQL)?;
            for record in records {
                stmt.execute(params![
                    record.id,
                    record.model,
                    record.brand,
                    record.transmission,
                    record.plate_no,
                    record.mileage,
                    record.color,
                    record.price,
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!(records = records.len(), "committed import transaction");
        Ok(records.len())
    }

    /// Every stored record, ordered by source row number then plate.
    pub fn all(&self) -> Result<Vec<CarSaleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, model, brand, transmission, plate_no, mileage, color, price
             FROM car_sales ORDER BY id, plate_no",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CarSaleRecord {
                id: row.get(0)?,
                model: row.get(1)?,
                brand: row.get(2)?,
                transmission: row.get(3)?,
                plate_no: row.get(4)?,
                mileage: row.get(5)?,
                color: row.get(6)?,
                price: row.get(7)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM car_sales", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
