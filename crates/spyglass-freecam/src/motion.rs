//! Per-frame fly movement and mouse look

use spyglass_core::{Orientation, Transform, Vec3};
use spyglass_runtime::InputSample;

/// Tunables for one integration step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettings {
    /// Distance units per second
    pub base_speed: f32,
    /// Speed factor while the fast modifier is held
    pub fast_multiplier: f32,
    /// Degrees of rotation per unit of cursor movement
    pub look_sensitivity: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            base_speed: 10.0,
            fast_multiplier: 10.0,
            look_sensitivity: 0.3,
        }
    }
}

/// Advance a camera pose by one frame.
///
/// Translation uses the axes of `prior`'s full rotation; look is applied
/// afterwards. Held directions are summed without normalizing, so diagonal
/// movement is faster than movement along a single axis.
///
/// While look is held the rotation is rebuilt from yaw/pitch, which drops
/// any roll the camera had. Otherwise the rotation passes through untouched.
/// Pitch is not clamped.
pub fn integrate(
    prior: Transform,
    sample: &InputSample,
    mouse_delta: [f32; 2],
    settings: &MotionSettings,
) -> Transform {
    let mut step = settings.base_speed * sample.delta_time;
    if sample.fast {
        step *= settings.fast_multiplier;
    }

    let basis = prior.basis();
    let keys = sample.keys;
    let mut direction = Vec3::ZERO;
    if keys.left {
        direction += -basis.right;
    }
    if keys.right {
        direction += basis.right;
    }
    if keys.forward {
        direction += basis.forward;
    }
    if keys.backward {
        direction += -basis.forward;
    }
    if keys.up {
        direction += basis.up;
    }
    if keys.down {
        direction += -basis.up;
    }

    let moved = prior.with_position(prior.position + direction * step);
    if !sample.look_held {
        return moved;
    }

    let [dx, dy] = mouse_delta;
    let current = prior.orientation();
    moved.with_orientation(Orientation::new(
        current.pitch - dy * settings.look_sensitivity,
        current.yaw + dx * settings.look_sensitivity,
    ))
}

/// Turns absolute cursor samples into per-tick deltas and applies [`integrate`].
#[derive(Debug, Default)]
pub struct MotionIntegrator {
    last_cursor: Option<[f32; 2]>,
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cursor reference so the next tick sees zero mouse movement
    pub fn reset(&mut self) {
        self.last_cursor = None;
    }

    pub fn step(
        &mut self,
        prior: Transform,
        sample: &InputSample,
        settings: &MotionSettings,
    ) -> Transform {
        // The reference moves every tick, look button or not, so pressing
        // the button later does not replay movement made while it was up.
        let delta = match self.last_cursor {
            Some([px, py]) => [sample.cursor[0] - px, sample.cursor[1] - py],
            None => [0.0, 0.0],
        };
        self.last_cursor = Some(sample.cursor);

        integrate(prior, sample, delta, settings)
    }
}
