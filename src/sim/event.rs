use crate::dynamics::state::State;
use crate::vector::Vec3;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Launch,
    Apex,
    /// Speed dropped below the local speed of sound.
    Transonic,
    /// Downrange distance crossed a marker, m.
    RangeMark(f64),
    TargetPlane,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: State,
}

impl SimEvent {
    pub fn at(kind: EventKind, state: &State) -> Self {
        Self { time: state.time, kind, state: *state }
    }
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind>;
}

/// Detects the apex (vertical velocity going from positive to non-positive).
pub struct ApexDetector;

impl EventDetector for ApexDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if prev.vel.z() > 0.0 && current.vel.z() <= 0.0 {
            Some(EventKind::Apex)
        } else {
            None
        }
    }
}

/// Fires once when airspeed falls through the speed of sound.
/// Airspeed is measured against the wind, not the ground.
pub struct TransonicDetector {
    pub speed_of_sound: f64,
    pub wind: Vec3,
    fired: bool,
}

impl TransonicDetector {
    pub fn new(speed_of_sound: f64, wind: Vec3) -> Self {
        Self { speed_of_sound, wind, fired: false }
    }

    fn airspeed(&self, state: &State) -> f64 {
        (state.vel - self.wind).norm()
    }
}

impl EventDetector for TransonicDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if self.airspeed(prev) >= self.speed_of_sound && self.airspeed(current) < self.speed_of_sound {
            self.fired = true;
            Some(EventKind::Transonic)
        } else {
            None
        }
    }
}

/// Detects when downrange distance crosses a marker.
pub struct RangeMarkDetector {
    pub distance: f64,
    fired: bool,
}

impl RangeMarkDetector {
    pub fn new(distance: f64) -> Self {
        Self { distance, fired: false }
    }
}

impl EventDetector for RangeMarkDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.pos.x() < self.distance && current.pos.x() >= self.distance {
            self.fired = true;
            Some(EventKind::RangeMark(self.distance))
        } else {
            None
        }
    }
}
