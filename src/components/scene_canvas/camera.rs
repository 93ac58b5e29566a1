use std::f64::consts::TAU;

use glam::{DMat3, DVec3};

use super::animation::FloatDrift;

/// Points closer to the camera than this are dropped instead of projected.
const NEAR_PLANE: f64 = 0.1;

/// A camera orbiting the scene origin.
///
/// `azimuth` and `elevation` are the yaw and pitch applied to the scene
/// before projecting, so increasing the azimuth spins the scene about the
/// vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
	/// Distance from the orbit center.
	pub distance: f64,
	/// Scene yaw in radians, kept in `[0, TAU)` by [`spin`](Self::spin).
	pub azimuth: f64,
	/// Scene pitch in radians.
	pub elevation: f64,
	/// Vertical field of view in radians.
	pub fov_y: f64,
	/// Continuous yaw rate in radians per second.
	pub spin_rate: f64,
}

impl OrbitCamera {
	/// Advance the orbit by `dt` seconds.
	pub fn spin(&mut self, dt: f64) {
		self.azimuth = (self.azimuth + self.spin_rate * dt).rem_euclid(TAU);
	}
}

/// A world position mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
	/// Horizontal canvas coordinate in pixels.
	pub x: f64,
	/// Vertical canvas coordinate in pixels, growing downward.
	pub y: f64,
	/// Pixels per world unit at this point's depth.
	pub scale: f64,
	/// Distance from the camera along the view axis.
	pub depth: f64,
}

/// The view and perspective transform frozen for a single frame.
///
/// Building one per frame keeps the rotation matrix and focal length out of
/// the per-point loop.
#[derive(Clone, Copy, Debug)]
pub struct FrameProjection {
	rotation: DMat3,
	lift: f64,
	distance: f64,
	focal: f64,
	half_width: f64,
	half_height: f64,
}

impl FrameProjection {
	/// Combine the orbit pose with the drift offsets at elapsed time `t`.
	pub fn new(camera: &OrbitCamera, drift: &FloatDrift, t: f64, width: f64, height: f64) -> Self {
		let rotation = DMat3::from_rotation_x(camera.elevation + drift.tilt_x(t))
			* DMat3::from_rotation_y(camera.azimuth + drift.tilt_y(t));
		Self {
			rotation,
			lift: drift.lift(t),
			distance: camera.distance,
			focal: (height / 2.0) / (camera.fov_y / 2.0).tan(),
			half_width: width / 2.0,
			half_height: height / 2.0,
		}
	}

	/// Map a world position onto the canvas.
	///
	/// Returns `None` for points on the camera side of the near plane. The
	/// vertical axis flips so that world-up points toward the top of the
	/// canvas.
	pub fn project(&self, world: DVec3) -> Option<ProjectedPoint> {
		let mut view = self.rotation * world;
		view.y += self.lift;

		let depth = self.distance - view.z;
		if depth < NEAR_PLANE {
			return None;
		}

		let scale = self.focal / depth;
		Some(ProjectedPoint {
			x: self.half_width + view.x * scale,
			y: self.half_height - view.y * scale,
			scale,
			depth,
		})
	}
}
