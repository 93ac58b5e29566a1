use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use rand::distributions::Standard;

use super::types::{
	ACCENT_COLOR, BlockConfig, BlockField, BlockPoint, ConfigError, MeshConfig, MeshEdge, MeshNode,
	NEUTRAL_COLOR, NeuralMesh,
};

const ACCENT_RADIUS_MIN: f64 = 0.04;
const ACCENT_RADIUS_SPAN: f64 = 0.03;
const BASE_RADIUS_MIN: f64 = 0.015;
const BASE_RADIUS_SPAN: f64 = 0.025;
const SPEED_MIN: f64 = 0.3;
const SPEED_SPAN: f64 = 0.4;

/// One uniform draw from [0, 1).
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.sample(Standard)
}

/// Sample a full mesh from the given parameters.
///
/// Directions are drawn with a uniform azimuth and an inverse-cosine polar
/// angle, which spreads nodes evenly over the sphere instead of bunching
/// them at the poles. The radius is then placed linearly inside the shell
/// between `inner_radius` and `outer_radius`.
///
/// Each node consumes exactly seven draws from `rng` in a fixed order
/// (azimuth, polar, radius, accent roll, size, speed, phase), so two runs
/// with identically seeded generators produce identical meshes.
pub fn generate_mesh<R: Rng + ?Sized>(
	config: &MeshConfig,
	rng: &mut R,
) -> Result<NeuralMesh, ConfigError> {
	config.validate()?;

	let mut nodes = Vec::with_capacity(config.count);
	for _ in 0..config.count {
		let theta = unit(rng) * TAU;
		let phi = (2.0 * unit(rng) - 1.0).acos();
		let r = config.inner_radius + unit(rng) * (config.outer_radius - config.inner_radius);

		let position = DVec3::new(
			r * phi.sin() * theta.cos(),
			r * phi.sin() * theta.sin(),
			r * phi.cos(),
		);

		let is_accent = unit(rng) < config.accent_probability;
		let radius = if is_accent {
			ACCENT_RADIUS_MIN + unit(rng) * ACCENT_RADIUS_SPAN
		} else {
			BASE_RADIUS_MIN + unit(rng) * BASE_RADIUS_SPAN
		};

		nodes.push(MeshNode {
			position,
			radius,
			is_accent,
			color: if is_accent { ACCENT_COLOR } else { NEUTRAL_COLOR },
			speed: SPEED_MIN + unit(rng) * SPEED_SPAN,
			phase: unit(rng) * TAU,
		});
	}

	let edges = connect_nodes(&nodes, config.connection_threshold);
	log::debug!("generated mesh: {} nodes, {} edges", nodes.len(), edges.len());

	Ok(NeuralMesh { nodes, edges })
}

/// Connect every unordered pair of nodes closer than `threshold`.
///
/// Pairs are visited with the first index strictly below the second, so the
/// edge list is free of duplicates and self-loops. Endpoint positions are
/// copied by value.
fn connect_nodes(nodes: &[MeshNode], threshold: f64) -> Vec<MeshEdge> {
	let mut edges = Vec::new();
	for i in 0..nodes.len() {
		for j in (i + 1)..nodes.len() {
			if nodes[i].position.distance(nodes[j].position) < threshold {
				edges.push(MeshEdge {
					start: nodes[i].position,
					end: nodes[j].position,
					has_accent: nodes[i].is_accent || nodes[j].is_accent,
				});
			}
		}
	}
	edges
}

/// Scatter points uniformly inside a cube.
///
/// Each point consumes four draws in a fixed order (size, then x, y, z), so
/// seeded runs reproduce exactly.
pub fn generate_blocks<R: Rng + ?Sized>(
	config: &BlockConfig,
	rng: &mut R,
) -> Result<BlockField, ConfigError> {
	config.validate()?;

	let span = config.max_size - config.min_size;
	let mut points = Vec::with_capacity(config.count);
	for _ in 0..config.count {
		let size = config.min_size + unit(rng) * span;
		let position = DVec3::new(
			(unit(rng) - 0.5) * 2.0 * config.half_extent,
			(unit(rng) - 0.5) * 2.0 * config.half_extent,
			(unit(rng) - 0.5) * 2.0 * config.half_extent,
		);
		points.push(BlockPoint { position, size });
	}

	log::debug!("generated block field: {} points", points.len());

	Ok(BlockField { points })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::SmallRng;
	use rand::{RngCore, SeedableRng};

	/// Replays a fixed sequence of unit-interval draws.
	///
	/// An empty script panics on the first draw, which makes it useful for
	/// proving that a code path never consults the generator.
	struct ScriptedRng {
		values: Vec<u64>,
		cursor: usize,
	}

	impl ScriptedRng {
		fn new(units: &[f64]) -> Self {
			Self {
				values: units.iter().map(|&u| encode_unit(u)).collect(),
				cursor: 0,
			}
		}
	}

	/// Map a unit-interval value onto the raw word the standard uniform
	/// draw decodes from, keeping 53 bits of the input.
	fn encode_unit(u: f64) -> u64 {
		((u * (1u64 << 53) as f64) as u64) << 11
	}

	impl RngCore for ScriptedRng {
		fn next_u32(&mut self) -> u32 {
			(self.next_u64() >> 32) as u32
		}

		fn next_u64(&mut self) -> u64 {
			let value = self.values[self.cursor % self.values.len()];
			self.cursor += 1;
			value
		}

		fn fill_bytes(&mut self, dest: &mut [u8]) {
			for chunk in dest.chunks_mut(8) {
				let bytes = self.next_u64().to_le_bytes();
				chunk.copy_from_slice(&bytes[..chunk.len()]);
			}
		}

		fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
			self.fill_bytes(dest);
			Ok(())
		}
	}

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	/// Script the seven per-node draws so the node lands on `direction`
	/// (a unit vector) at radius `r_u` within the shell.
	fn node_script(direction: DVec3, r_u: f64, accent_u: f64) -> [f64; 7] {
		let theta_u = direction.y.atan2(direction.x).rem_euclid(TAU) / TAU;
		let phi_u = (direction.z + 1.0) / 2.0;
		[theta_u, phi_u, r_u, accent_u, 0.5, 0.5, 0.5]
	}

	#[test]
	fn tetrahedron_corners_connect_fully() {
		let s = 1.0 / 3.0_f64.sqrt();
		let corners = [
			DVec3::new(s, s, s),
			DVec3::new(s, -s, -s),
			DVec3::new(-s, s, -s),
			DVec3::new(-s, -s, s),
		];

		let mut script = Vec::new();
		for corner in corners {
			script.extend_from_slice(&node_script(corner, 0.5, 0.9));
		}
		let mut rng = ScriptedRng::new(&script);

		let config = MeshConfig {
			count: 4,
			inner_radius: 1.0,
			outer_radius: 1.0,
			accent_probability: 0.0,
			connection_threshold: 3.0,
		};
		let mesh = generate_mesh(&config, &mut rng).unwrap();

		assert_eq!(mesh.nodes.len(), 4);
		for (node, corner) in mesh.nodes.iter().zip(corners) {
			assert!(approx(node.position.x, corner.x));
			assert!(approx(node.position.y, corner.y));
			assert!(approx(node.position.z, corner.z));
			assert!(!node.is_accent);
		}

		// Four mutually close nodes give the complete pairing.
		assert_eq!(mesh.edges.len(), 6);
		let side = (8.0 / 3.0_f64).sqrt();
		for edge in &mesh.edges {
			assert!(approx(edge.start.distance(edge.end), side));
			assert!(!edge.has_accent);
		}
	}

	#[test]
	fn identical_seeds_reproduce_the_mesh() {
		let config = MeshConfig::default();
		let a = generate_mesh(&config, &mut SmallRng::seed_from_u64(7)).unwrap();
		let b = generate_mesh(&config, &mut SmallRng::seed_from_u64(7)).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn nodes_stay_inside_the_shell() {
		let config = MeshConfig::default();
		let mesh = generate_mesh(&config, &mut SmallRng::seed_from_u64(11)).unwrap();

		assert_eq!(mesh.nodes.len(), config.count);
		for node in &mesh.nodes {
			let r = node.position.length();
			assert!(r >= config.inner_radius - 1e-9);
			assert!(r <= config.outer_radius + 1e-9);
			assert!(node.speed >= SPEED_MIN && node.speed < SPEED_MIN + SPEED_SPAN);
			assert!(node.phase >= 0.0 && node.phase < TAU);
		}
	}

	#[test]
	fn degenerate_shell_pins_every_radius() {
		let config = MeshConfig {
			inner_radius: 1.7,
			outer_radius: 1.7,
			..MeshConfig::default()
		};
		let mesh = generate_mesh(&config, &mut SmallRng::seed_from_u64(3)).unwrap();
		for node in &mesh.nodes {
			assert!(approx(node.position.length(), 1.7));
		}
	}

	#[test]
	fn accent_ratio_tracks_probability() {
		let config = MeshConfig {
			count: 10_000,
			connection_threshold: 0.0,
			..MeshConfig::default()
		};
		let mesh = generate_mesh(&config, &mut SmallRng::seed_from_u64(42)).unwrap();
		let accents = mesh.nodes.iter().filter(|n| n.is_accent).count();
		let ratio = accents as f64 / config.count as f64;
		assert!(ratio > 0.06 && ratio < 0.10, "ratio {ratio} out of range");
	}

	#[test]
	fn edges_respect_threshold_order_and_accent_flag() {
		let config = MeshConfig::default();
		let mesh = generate_mesh(&config, &mut SmallRng::seed_from_u64(99)).unwrap();

		let index_of = |p: DVec3| mesh.nodes.iter().position(|n| n.position == p).unwrap();
		for edge in &mesh.edges {
			let i = index_of(edge.start);
			let j = index_of(edge.end);
			assert!(i < j);
			assert!(edge.start.distance(edge.end) < config.connection_threshold);
			assert_eq!(
				edge.has_accent,
				mesh.nodes[i].is_accent || mesh.nodes[j].is_accent
			);
		}

		let mut expected = 0;
		for i in 0..mesh.nodes.len() {
			for j in (i + 1)..mesh.nodes.len() {
				let d = mesh.nodes[i].position.distance(mesh.nodes[j].position);
				if d < config.connection_threshold {
					expected += 1;
				}
			}
		}
		assert_eq!(mesh.edges.len(), expected);
	}

	#[test]
	fn zero_threshold_leaves_the_mesh_unconnected() {
		let config = MeshConfig {
			connection_threshold: 0.0,
			..MeshConfig::default()
		};
		let mesh = generate_mesh(&config, &mut SmallRng::seed_from_u64(5)).unwrap();
		assert_eq!(mesh.nodes.len(), 55);
		assert!(mesh.edges.is_empty());
	}

	#[test]
	fn tiny_meshes_have_no_edges() {
		for count in [0, 1] {
			let config = MeshConfig {
				count,
				..MeshConfig::default()
			};
			let mesh = generate_mesh(&config, &mut SmallRng::seed_from_u64(1)).unwrap();
			assert_eq!(mesh.nodes.len(), count);
			assert!(mesh.edges.is_empty());
		}
	}

	#[test]
	fn accent_probability_extremes_fix_the_styling() {
		let all = MeshConfig {
			accent_probability: 1.0,
			..MeshConfig::default()
		};
		let mesh = generate_mesh(&all, &mut SmallRng::seed_from_u64(8)).unwrap();
		for node in &mesh.nodes {
			assert!(node.is_accent);
			assert_eq!(node.color, ACCENT_COLOR);
			assert!(node.radius >= ACCENT_RADIUS_MIN);
			assert!(node.radius < ACCENT_RADIUS_MIN + ACCENT_RADIUS_SPAN);
		}

		let none = MeshConfig {
			accent_probability: 0.0,
			..MeshConfig::default()
		};
		let mesh = generate_mesh(&none, &mut SmallRng::seed_from_u64(8)).unwrap();
		for node in &mesh.nodes {
			assert!(!node.is_accent);
			assert_eq!(node.color, NEUTRAL_COLOR);
			assert!(node.radius >= BASE_RADIUS_MIN);
			assert!(node.radius < BASE_RADIUS_MIN + BASE_RADIUS_SPAN);
		}
	}

	#[test]
	fn edge_accent_flag_is_a_disjunction() {
		// Three coincident nodes, the first an accent, the other two not.
		let direction = DVec3::new(1.0, 0.0, 0.0);
		let mut script = Vec::new();
		script.extend_from_slice(&node_script(direction, 0.5, 0.25));
		script.extend_from_slice(&node_script(direction, 0.5, 0.75));
		script.extend_from_slice(&node_script(direction, 0.5, 0.75));
		let mut rng = ScriptedRng::new(&script);

		let config = MeshConfig {
			count: 3,
			inner_radius: 1.0,
			outer_radius: 1.0,
			accent_probability: 0.5,
			connection_threshold: 0.5,
		};
		let mesh = generate_mesh(&config, &mut rng).unwrap();

		let flags: Vec<bool> = mesh.nodes.iter().map(|n| n.is_accent).collect();
		assert_eq!(flags, [true, false, false]);

		// Pairs in index order: (0,1), (0,2), (1,2).
		let edge_flags: Vec<bool> = mesh.edges.iter().map(|e| e.has_accent).collect();
		assert_eq!(edge_flags, [true, true, false]);
	}

	#[test]
	fn invalid_mesh_config_fails_before_sampling() {
		let config = MeshConfig {
			inner_radius: 3.0,
			..MeshConfig::default()
		};
		// The empty script would panic on any draw.
		let result = generate_mesh(&config, &mut ScriptedRng::new(&[]));
		assert_eq!(
			result,
			Err(ConfigError::RadialBandInverted {
				inner: 3.0,
				outer: 2.5
			})
		);
	}

	#[test]
	fn block_points_fill_the_cube() {
		let config = BlockConfig::default();
		let field = generate_blocks(&config, &mut SmallRng::seed_from_u64(21)).unwrap();

		assert_eq!(field.points.len(), config.count);
		for point in &field.points {
			assert!(point.position.x.abs() <= config.half_extent);
			assert!(point.position.y.abs() <= config.half_extent);
			assert!(point.position.z.abs() <= config.half_extent);
			assert!(point.size >= config.min_size && point.size < config.max_size);
		}
	}

	#[test]
	fn identical_seeds_reproduce_the_block_field() {
		let config = BlockConfig::default();
		let a = generate_blocks(&config, &mut SmallRng::seed_from_u64(7)).unwrap();
		let b = generate_blocks(&config, &mut SmallRng::seed_from_u64(7)).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn block_draws_consume_size_before_position() {
		let config = BlockConfig {
			count: 1,
			..BlockConfig::default()
		};
		let mut rng = ScriptedRng::new(&[0.5, 0.25, 0.75, 0.5]);
		let field = generate_blocks(&config, &mut rng).unwrap();

		let point = &field.points[0];
		assert_eq!(point.size, 1.75);
		assert_eq!(point.position, DVec3::new(-0.75, 0.75, 0.0));
	}

	#[test]
	fn invalid_block_config_fails_before_sampling() {
		let config = BlockConfig {
			min_size: 2.0,
			max_size: 1.0,
			..BlockConfig::default()
		};
		let result = generate_blocks(&config, &mut ScriptedRng::new(&[]));
		assert_eq!(
			result,
			Err(ConfigError::SizeRangeInvalid { min: 2.0, max: 1.0 })
		);
	}
}
