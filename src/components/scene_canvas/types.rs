use glam::DVec3;
use thiserror::Error;

/// CSS color of accent nodes and the central core.
pub const ACCENT_COLOR: &str = "#FDD840";
/// CSS color of every other node.
pub const NEUTRAL_COLOR: &str = "#ffffff";

/// A single point of the decorative mesh.
///
/// `position` is the static base position sampled on the spherical shell.
/// The renderer adds a bounded wobble offset on top of it every frame, so
/// the stored value never changes after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshNode {
	/// Base position on the spherical shell.
	pub position: DVec3,
	/// Visual radius in world units.
	pub radius: f64,
	/// Whether the node is drawn in the accent style.
	pub is_accent: bool,
	/// CSS fill color, fixed by the accent flag.
	pub color: &'static str,
	/// Wobble frequency multiplier.
	pub speed: f64,
	/// Wobble phase offset in radians.
	pub phase: f64,
}

/// A line between two nodes whose base positions fall below the connection
/// threshold.
///
/// Endpoints are copied by value at generation time and do not follow the
/// animated node positions.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshEdge {
	/// Base position of the lower-indexed endpoint.
	pub start: DVec3,
	/// Base position of the higher-indexed endpoint.
	pub end: DVec3,
	/// True when either endpoint is an accent node.
	pub has_accent: bool,
}

/// The generated node and edge sets, immutable for the lifetime of a
/// visualization instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeuralMesh {
	pub nodes: Vec<MeshNode>,
	pub edges: Vec<MeshEdge>,
}

/// One scattered point of the block field.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPoint {
	/// Position inside the sampling cube.
	pub position: DVec3,
	/// Size multiplier applied to the base point radius.
	pub size: f64,
}

/// The generated scatter, immutable after generation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockField {
	pub points: Vec<BlockPoint>,
}

/// Generated payload handed to the canvas component once per mount.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneData {
	/// The spherical neural mesh scene.
	Mesh(NeuralMesh),
	/// The scattered block scene.
	Blocks(BlockField),
}

/// Generation parameters for the neural mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshConfig {
	/// Number of nodes to sample.
	pub count: usize,
	/// Inner radius of the spherical sampling shell.
	pub inner_radius: f64,
	/// Outer radius of the spherical sampling shell.
	pub outer_radius: f64,
	/// Independent probability that a node is an accent node.
	pub accent_probability: f64,
	/// Node pairs closer than this distance are connected by an edge.
	pub connection_threshold: f64,
}

impl Default for MeshConfig {
	fn default() -> Self {
		Self {
			count: 55,
			inner_radius: 1.2,
			outer_radius: 2.5,
			accent_probability: 0.08,
			connection_threshold: 1.4,
		}
	}
}

impl MeshConfig {
	/// Reject invalid parameters before any sampling happens.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !finite_non_negative(self.inner_radius) {
			return Err(ConfigError::InvalidRadius(self.inner_radius));
		}
		if !finite_non_negative(self.outer_radius) {
			return Err(ConfigError::InvalidRadius(self.outer_radius));
		}
		if self.inner_radius > self.outer_radius {
			return Err(ConfigError::RadialBandInverted {
				inner: self.inner_radius,
				outer: self.outer_radius,
			});
		}
		if !(0.0..=1.0).contains(&self.accent_probability) {
			return Err(ConfigError::AccentProbabilityOutOfRange(
				self.accent_probability,
			));
		}
		if !finite_non_negative(self.connection_threshold) {
			return Err(ConfigError::InvalidConnectionThreshold(
				self.connection_threshold,
			));
		}
		Ok(())
	}
}

/// Generation parameters for the scattered block field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockConfig {
	/// Number of points to scatter.
	pub count: usize,
	/// Half side length of the sampling cube.
	pub half_extent: f64,
	/// Smallest size multiplier.
	pub min_size: f64,
	/// Largest size multiplier.
	pub max_size: f64,
}

impl Default for BlockConfig {
	fn default() -> Self {
		Self {
			count: 100,
			half_extent: 1.5,
			min_size: 0.5,
			max_size: 3.0,
		}
	}
}

impl BlockConfig {
	/// Reject invalid parameters before any sampling happens.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !finite_non_negative(self.half_extent) {
			return Err(ConfigError::InvalidHalfExtent(self.half_extent));
		}
		if !finite_non_negative(self.min_size)
			|| !finite_non_negative(self.max_size)
			|| self.min_size > self.max_size
		{
			return Err(ConfigError::SizeRangeInvalid {
				min: self.min_size,
				max: self.max_size,
			});
		}
		Ok(())
	}
}

/// Rejected generation parameters, reported before any sampling occurs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("shell radius must be finite and non-negative, got {0}")]
	InvalidRadius(f64),

	#[error("inner radius {inner} exceeds outer radius {outer}")]
	RadialBandInverted { inner: f64, outer: f64 },

	#[error("accent probability must lie in 0.0..=1.0, got {0}")]
	AccentProbabilityOutOfRange(f64),

	#[error("connection threshold must be finite and non-negative, got {0}")]
	InvalidConnectionThreshold(f64),

	#[error("cube half extent must be finite and non-negative, got {0}")]
	InvalidHalfExtent(f64),

	#[error("size range [{min}, {max}] is not a valid non-negative interval")]
	SizeRangeInvalid { min: f64, max: f64 },
}

fn finite_non_negative(value: f64) -> bool {
	value.is_finite() && value >= 0.0
}
