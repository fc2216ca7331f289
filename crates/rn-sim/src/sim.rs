//! The `Sim` struct and its frame loop.

use rn_core::{SimClock, SimRng, TrafficConfig, VehicleId};
use rn_traffic::{Spawner, StepOutcome, step_vehicle, tally};

use crate::{SimObserver, World};

/// What one frame changed, for observer dispatch.
#[derive(Default)]
pub struct StepReport {
    /// Vehicle added by the spawner this frame, if any.
    pub spawned: Option<VehicleId>,
    /// Vehicles removed this frame (trip complete or orphaned).
    pub removed: Vec<VehicleId>,
}

/// The main simulation runner.
///
/// `Sim` owns the [`World`] and drives the five-phase frame:
///
/// 1. **Signals** — every intersection's cycle state machine advances.
/// 2. **Spawn**   — the interval spawner may add one vehicle.
/// 3. **Vehicles** — each vehicle steps in spawn order; finished and
///    orphaned vehicles are collected and removed after the sweep.
/// 4. **Density** — the per-connection tally is rebuilt from scratch.
/// 5. **Incidents** — countdowns, accident rolls, jam detection.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Sim {
    /// Tuned constants; fixed for the lifetime of the run.
    pub config: TrafficConfig,

    /// Frame counter and accumulated simulated seconds.
    pub clock: SimClock,

    /// All simulation state.  Mutate the road graph through the `World`
    /// mutators between steps; never during one.
    pub world: World,

    /// The single deterministic RNG stream all stochastic choices draw from.
    pub rng: SimRng,

    pub(crate) spawner: Spawner,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the simulation by one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let mut report = StepReport::default();

        // ── Phase 1: signal cycles ────────────────────────────────────────
        for ix in self.world.intersections.values_mut() {
            ix.advance(dt, self.config.light_cycle_secs, self.config.yellow_secs);
        }

        // ── Phase 2: spawning ─────────────────────────────────────────────
        if let Some(v) = self.spawner.tick(
            dt,
            &self.world.graph,
            &self.world.vehicles,
            &self.config,
            &mut self.rng,
        ) {
            report.spawned = Some(v.id);
            self.world.vehicles.push(v);
        }

        // ── Phase 3: vehicle sweep ────────────────────────────────────────
        //
        // Spawn order, with each vehicle seeing its siblings' current state:
        // vehicles earlier in the list have already moved this frame.
        // Removals are collected and applied after the sweep so indices stay
        // stable while iterating.
        let World { graph, intersections, vehicles, .. } = &mut self.world;
        for i in 0..vehicles.len() {
            let (earlier, rest) = vehicles.split_at_mut(i);
            let Some((v, later)) = rest.split_first_mut() else {
                break;
            };
            match step_vehicle(v, earlier, later, graph, intersections, &self.config, dt, &mut self.rng)
            {
                StepOutcome::Cruising | StepOutcome::Transitioned => {}
                StepOutcome::Finished | StepOutcome::Orphaned => report.removed.push(v.id),
            }
        }
        if !report.removed.is_empty() {
            let gone = &report.removed;
            vehicles.retain(|v| !gone.contains(&v.id));
        }

        // ── Phase 4: density rebuild ──────────────────────────────────────
        self.world.density = tally(&self.world.vehicles);

        // ── Phase 5: incidents ────────────────────────────────────────────
        self.world.incidents.update(
            dt,
            &self.world.graph,
            &self.world.vehicles,
            &self.config,
            &mut self.rng,
        );

        self.clock.advance(dt);
        report
    }

    /// Run for `duration_secs` of simulated time in fixed `dt` frames,
    /// dispatching observer hooks each frame.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run_for<O: SimObserver>(&mut self, duration_secs: f64, dt: f32, observer: &mut O) {
        let end = self.clock.elapsed_secs + duration_secs;
        while self.clock.elapsed_secs < end {
            observer.on_step_start(&self.clock);
            let report = self.step(dt);

            if let Some(id) = report.spawned
                && let Some(v) = self.world.vehicles.iter().find(|v| v.id == id)
            {
                observer.on_vehicle_spawned(&self.clock, v);
            }
            for id in report.removed {
                observer.on_vehicle_removed(&self.clock, id);
            }
            observer.on_step_end(&self.clock, &self.world);
        }
        observer.on_sim_end(&self.clock);
    }
}
