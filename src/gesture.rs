//! Drag-gesture kinematics: converts a grab/release pair on a cradle ball
//! into an instantaneous velocity, a release angle, and a release force.

use bevy::{prelude::*, reflect::FromReflect};

/// Fallback sample interval when no usable elapsed time exists (one 60 fps
/// frame).
pub const DEFAULT_SAMPLE_DT: f64 = 1.0 / 60.0;
/// Fixed timestep used for the finite-difference force estimate. Deliberately
/// independent of the measured velocity interval.
pub const FORCE_TIMESTEP: f32 = 1.0 / 60.0;
/// Every ball weighs one unit.
pub const BALL_MASS: f32 = 1.0;

/// The pair of numbers shown to the user after a completed drag.
#[derive(Reflect, FromReflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct KinematicReadout {
    /// Release direction in degrees, (-180, 180].
    pub angle: f32,
    /// Finite-difference force estimate in newtons.
    pub force: f32,
}

/// State captured between a pointer-down and the matching pointer-up.
#[derive(Reflect, FromReflect, Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position at grab time. Recorded but unused: the velocity is
    /// measured from the body position instead. Likely a bug, kept as-is.
    pub start_pointer: Vec2,
    /// Position of the grabbed body at grab time.
    pub start_body: Vec2,
    /// Wall-clock seconds when the session opened.
    pub started_at: f64,
}

/// Two-state machine (Idle / Dragging) owning everything a drag needs:
/// the open session, the previous-sample velocity memory, and the published
/// readout. No state lives outside this struct, so instances never interfere
/// and a reset simply reconstructs it.
#[derive(Reflect, Resource, Debug, Default)]
#[reflect(Resource)]
pub struct GestureAnalyzer {
    session: Option<DragSession>,
    last_velocity: Vec2,
    last_sample_time: Option<f64>,
    readout: KinematicReadout,
}

/// Direction of a velocity vector in degrees. Invariant under positive
/// scaling of the input.
pub fn release_angle(velocity: Vec2) -> f32 {
    velocity.y.atan2(velocity.x).to_degrees()
}

impl GestureAnalyzer {
    pub fn readout(&self) -> KinematicReadout {
        self.readout
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Open a drag session. Ignored while one is already open.
    pub fn on_drag_start(&mut self, pointer: Vec2, body: Vec2, now: f64) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(DragSession {
            start_pointer: pointer,
            start_body: body,
            started_at: now,
        });
    }

    /// Close the open session and publish a new readout. A release with no
    /// open session is a no-op and leaves all state untouched.
    pub fn on_drag_end(&mut self, pointer: Vec2, now: f64) -> Option<KinematicReadout> {
        let session = self.session.take()?;

        let velocity = self.sample_velocity(pointer - session.start_body, session.started_at, now);
        let angle = release_angle(velocity);
        let force = BALL_MASS * (velocity - self.last_velocity).length() / FORCE_TIMESTEP;

        self.last_velocity = velocity;
        self.readout = KinematicReadout { angle, force };
        Some(self.readout)
    }

    /// Displacement over the elapsed time since the later of the previous
    /// sample and the session start, falling back to `DEFAULT_SAMPLE_DT`
    /// when that interval is not positive.
    fn sample_velocity(&mut self, displacement: Vec2, started_at: f64, now: f64) -> Vec2 {
        let reference = match self.last_sample_time {
            Some(t) => t.max(started_at),
            None => started_at,
        };
        let mut dt = now - reference;
        if dt <= 0.0 {
            dt = DEFAULT_SAMPLE_DT;
        }
        self.last_sample_time = Some(now);
        displacement / dt as f32
    }
}
