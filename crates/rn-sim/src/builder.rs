//! Fluent builder for constructing a [`Sim`].

use rn_core::{SimClock, SimRng, TrafficConfig};
use rn_graph::RoadGraph;
use rn_traffic::Spawner;

use crate::{Sim, SimError, SimResult, World};

/// Fluent builder for [`Sim`].
///
/// # Inputs
///
/// | Method       | Default                                      |
/// |--------------|----------------------------------------------|
/// | `new(config)`| required; validated at `build`               |
/// | `.graph(g)`  | empty graph at `config.merge_tolerance`      |
///
/// Any node of the supplied graph that already has three or more connections
/// is promoted to a signalled intersection before the first frame.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(TrafficConfig::default())
///     .graph(graph)
///     .build()?;
/// sim.run_for(120.0, 1.0 / 60.0, &mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: TrafficConfig,
    graph:  Option<RoadGraph>,
}

impl SimBuilder {
    pub fn new(config: TrafficConfig) -> Self {
        Self { config, graph: None }
    }

    /// Supply a pre-built road graph.  If not called, the sim starts with an
    /// empty graph and roads are added through the `World` mutators.
    pub fn graph(mut self, graph: RoadGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Validate the configuration and assemble a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let graph = self
            .graph
            .unwrap_or_else(|| RoadGraph::new(self.config.merge_tolerance));
        let world = World::from_graph(graph);

        Ok(Sim {
            clock:   SimClock::new(),
            rng:     SimRng::new(self.config.seed),
            spawner: Spawner::new(),
            world,
            config:  self.config,
        })
    }
}
