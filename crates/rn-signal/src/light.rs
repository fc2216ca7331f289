//! Individual signal-lamp state.

/// The displayed state of one approach's light.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightState {
    #[default]
    Red,
    Yellow,
    Green,
}

impl LightState {
    /// Only an exact green grants passage; yellow and red both block.
    #[inline]
    pub fn allows_entry(self) -> bool {
        matches!(self, LightState::Green)
    }

    /// Human-readable label, useful for CSV column values and debug output.
    pub fn as_str(self) -> &'static str {
        match self {
            LightState::Red => "red",
            LightState::Yellow => "yellow",
            LightState::Green => "green",
        }
    }
}

impl std::fmt::Display for LightState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signal lamp governing one approach connection.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    pub state: LightState,
    /// Ground-plane angle (radians) of the approach direction, pointing from
    /// the intersection node toward the connection's far endpoint.  Consumed
    /// by lamp-geometry rendering and useful for phase diagnostics.
    pub angle: f32,
}
