//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use rn_core::SimClock;
use rn_sim::{SimObserver, World};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes frame summaries and vehicle snapshots to an
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `run_for` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    /// Snapshot rows are emitted every this many frames; 0 disables them.
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    ///
    /// A frame summary is written every frame; full vehicle snapshots only
    /// every `snapshot_interval` frames (`0` disables snapshots entirely —
    /// at 60 Hz they dominate the output volume).
    pub fn new(writer: W, snapshot_interval: u64) -> Self {
        Self { writer, snapshot_interval, last_error: None }
    }

    /// Take the stored write error (if any) after the run finishes.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, clock: &SimClock, world: &World) {
        let row = TickSummaryRow {
            frame:           clock.frame,
            elapsed_secs:    clock.elapsed_secs,
            active_vehicles: world.vehicle_count() as u64,
            intersections:   world.intersections.len() as u64,
            incidents:       world.incidents.incidents.len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);

        if self.snapshot_interval == 0 || !clock.frame.is_multiple_of(self.snapshot_interval) {
            return;
        }
        let rows: Vec<VehicleSnapshotRow> = world
            .active_vehicles()
            .iter()
            .map(|v| VehicleSnapshotRow {
                vehicle_id: v.id.0,
                frame:      clock.frame,
                connection: v.connection.0,
                lane:       v.lane,
                progress:   v.progress,
                speed:      v.speed,
                class:      v.class.as_str(),
            })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _clock: &SimClock) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
