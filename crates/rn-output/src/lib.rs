//! `rn-output` — run-output writers for the roadnet engine.
//!
//! One backend, CSV:
//!
//! | File                    | One row per                                  |
//! |-------------------------|----------------------------------------------|
//! | `tick_summaries.csv`    | frame (counts of vehicles/signals/incidents) |
//! | `vehicle_snapshots.csv` | vehicle, at the configured frame interval    |
//!
//! The backend implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `rn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 60);
//! sim.run_for(120.0, 1.0 / 60.0, &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
