use std::f64::consts::TAU;

use glam::DVec3;

use super::animation::FloatDrift;
use super::camera::OrbitCamera;
use super::types::SceneData;

/// Everything the render loop owns between frames.
///
/// The generated scene data never changes after construction. Only the
/// clock and the camera pose advance.
pub struct SceneState {
	pub data: SceneData,
	pub camera: OrbitCamera,
	pub drift: FloatDrift,
	pub width: f64,
	pub height: f64,
	pub elapsed: f64,
	pub animation_running: bool,
}

impl SceneState {
	/// Set up the camera and drift preset matching the scene variant.
	pub fn new(data: SceneData, width: f64, height: f64) -> Self {
		let (camera, drift) = match &data {
			SceneData::Mesh(_) => (
				OrbitCamera {
					distance: 5.0,
					azimuth: 0.0,
					elevation: 0.0,
					fov_y: 50.0_f64.to_radians(),
					// One slow orbit every five minutes.
					spin_rate: TAU / 300.0,
				},
				FloatDrift {
					speed: 1.0,
					rotation_intensity: 0.1,
					float_intensity: 0.3,
				},
			),
			SceneData::Blocks(_) => {
				let eye = DVec3::new(-4.0, 4.0, 8.0);
				let distance = eye.length();
				(
					OrbitCamera {
						distance,
						azimuth: -eye.x.atan2(eye.z),
						elevation: (eye.y / distance).asin(),
						fov_y: 30.0_f64.to_radians(),
						spin_rate: 0.0,
					},
					FloatDrift::default(),
				)
			}
		};

		Self {
			data,
			camera,
			drift,
			width,
			height,
			elapsed: 0.0,
			animation_running: true,
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.elapsed += dt;
		self.camera.spin(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
