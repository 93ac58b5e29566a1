use glam::DVec3;

/// Largest displacement a node can take from its base position, per axis.
pub const WOBBLE_AMPLITUDE: f64 = 0.15;

/// Per-frame displacement of a node at elapsed time `t`.
///
/// Each axis runs its own sinusoid off the node's speed and phase, with the
/// y and z frequencies detuned so the path never closes into a loop. The
/// result is pure in its inputs and stays inside `WOBBLE_AMPLITUDE` on every
/// axis.
pub fn node_offset(t: f64, speed: f64, phase: f64) -> DVec3 {
	DVec3::new(
		(t * speed + phase).sin() * WOBBLE_AMPLITUDE,
		(t * speed * 0.8 + phase).cos() * WOBBLE_AMPLITUDE,
		(t * speed * 0.6 + phase).sin() * WOBBLE_AMPLITUDE,
	)
}

/// Slow whole-scene rocking applied on top of the camera orbit.
///
/// Tilts follow quarter-speed sinusoids scaled by `rotation_intensity`, the
/// vertical lift by `float_intensity`. Intensities of zero switch the drift
/// off entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatDrift {
	/// Multiplier on the sinusoid frequencies.
	pub speed: f64,
	/// Scales both tilt angles.
	pub rotation_intensity: f64,
	/// Scales the vertical lift.
	pub float_intensity: f64,
}

impl Default for FloatDrift {
	fn default() -> Self {
		Self {
			speed: 1.0,
			rotation_intensity: 1.0,
			float_intensity: 1.0,
		}
	}
}

impl FloatDrift {
	/// Tilt around the x axis at elapsed time `t`, in radians.
	pub fn tilt_x(&self, t: f64) -> f64 {
		(t / 4.0 * self.speed).cos() / 8.0 * self.rotation_intensity
	}

	/// Tilt around the y axis at elapsed time `t`, in radians.
	pub fn tilt_y(&self, t: f64) -> f64 {
		(t / 4.0 * self.speed).sin() / 8.0 * self.rotation_intensity
	}

	/// Vertical offset at elapsed time `t`, in world units.
	pub fn lift(&self, t: f64) -> f64 {
		(t / 4.0 * self.speed).sin() / 10.0 * self.float_intensity
	}
}
