//! smalltown — smallest demo for the roadnet traffic engine.
//!
//! Builds a 4×4 grid of two-lane streets (nine interior multi-way junctions
//! promote to signalled intersections), runs two simulated minutes at 60 Hz,
//! and writes CSV output.  Scale comment: the engine is tuned for city-
//! builder scale, a few hundred connections; bump `GRID` and the run length
//! to stress it.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use rn_core::{SimClock, TrafficConfig, Vec3, VehicleId};
use rn_output::{CsvWriter, OutputWriter, SimOutputObserver};
use rn_sim::{SimBuilder, SimObserver, World};
use rn_traffic::Vehicle;

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID:            usize = 4;
const BLOCK_SIZE:      f32   = 60.0; // world units between junctions
const SEED:            u64   = 42;
const SIM_SECS:        f64   = 120.0;
const DT:              f32   = 1.0 / 60.0;
const SNAPSHOT_FRAMES: u64   = 60; // vehicle snapshot once per simulated second

// ── Observer wrapper to count lifecycle events ────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    spawned:   usize,
    completed: usize,
    peak:      usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, spawned: 0, completed: 0, peak: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_vehicle_spawned(&mut self, clock: &SimClock, vehicle: &Vehicle) {
        self.spawned += 1;
        self.inner.on_vehicle_spawned(clock, vehicle);
    }

    fn on_vehicle_removed(&mut self, clock: &SimClock, id: VehicleId) {
        self.completed += 1;
        self.inner.on_vehicle_removed(clock, id);
    }

    fn on_step_end(&mut self, clock: &SimClock, world: &World) {
        self.peak = self.peak.max(world.vehicle_count());
        self.inner.on_step_end(clock, world);
    }

    fn on_sim_end(&mut self, clock: &SimClock) {
        self.inner.on_sim_end(clock);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== smalltown — roadnet traffic engine ===");
    println!("Grid: {GRID}x{GRID}  |  Sim: {SIM_SECS} s @ 60 Hz  |  Seed: {SEED}");
    println!();

    // 1. Build the sim and lay out the street grid through the world
    //    mutators, so junctions promote as the roads go in.
    let config = TrafficConfig { seed: SEED, ..TrafficConfig::default() };
    let mut sim = SimBuilder::new(config).build()?;

    let mut nodes = [[rn_core::NodeId::INVALID; GRID]; GRID];
    for (i, row) in nodes.iter_mut().enumerate() {
        for (j, slot) in row.iter_mut().enumerate() {
            let pos = Vec3::new(i as f32 * BLOCK_SIZE, 0.0, j as f32 * BLOCK_SIZE);
            *slot = sim.world.add_road_node(pos);
        }
    }
    for i in 0..GRID {
        for j in 0..GRID {
            if i + 1 < GRID {
                sim.world.add_road_connection(nodes[i][j], nodes[i + 1][j], 2, false)?;
            }
            if j + 1 < GRID {
                sim.world.add_road_connection(nodes[i][j], nodes[i][j + 1], 2, false)?;
            }
        }
    }
    println!(
        "Road network: {} nodes, {} connections, {} signalled intersections",
        sim.world.graph.node_count(),
        sim.world.graph.connection_count(),
        sim.world.intersections.len(),
    );

    // 2. Set up CSV output.
    std::fs::create_dir_all("output/smalltown")?;
    let writer = CsvWriter::new(Path::new("output/smalltown"))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, SNAPSHOT_FRAMES));

    // 3. Run.
    let t0 = Instant::now();
    sim.run_for(SIM_SECS, DT, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s wall time ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  vehicles spawned   : {}", obs.spawned);
    println!("  trips completed    : {}", obs.completed);
    println!("  peak concurrent    : {}", obs.peak);
    println!("  still on the road  : {}", sim.world.vehicle_count());
    println!("  incidents live     : {}", sim.world.incidents.incidents.len());
    println!();

    // 5. Busiest connections table.
    let mut density: Vec<_> = sim
        .world
        .traffic_density()
        .iter()
        .map(|(&conn, &count)| (conn, count))
        .collect();
    density.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("{:<16} {:<8}", "Connection", "Vehicles");
    println!("{}", "-".repeat(24));
    for (conn, count) in density.iter().take(8) {
        println!("{:<16} {:<8}", conn.to_string(), count);
    }

    Ok(())
}
