use std::cmp::Ordering;
use std::f64::consts::PI;

use glam::DVec3;
use web_sys::CanvasRenderingContext2d;

use super::animation::node_offset;
use super::camera::FrameProjection;
use super::state::SceneState;
use super::types::{ACCENT_COLOR, BlockField, NeuralMesh, SceneData};

const MESH_BACKGROUND: &str = "#000000";
const EDGE_STYLE: &str = "rgba(255, 255, 255, 0.12)";
const CORE_RADIUS: f64 = 0.08;
const CORE_HALO_RADIUS: f64 = 0.12;
const CORE_HALO_ALPHA: f64 = 0.3;

const BLOCK_BACKGROUND: &str = "#eaeaea";
const BLOCK_POINT_COLOR: &str = "#000000";
const BLOCK_POINT_RADIUS: f64 = 0.1;
const CUBE_HALF: f64 = 1.1;
const CUBE_STYLE: &str = "rgba(24, 24, 27, 0.2)";

/// Paint one frame of the scene onto the 2d context.
pub fn render(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	let frame = FrameProjection::new(
		&state.camera,
		&state.drift,
		state.elapsed,
		state.width,
		state.height,
	);

	match &state.data {
		SceneData::Mesh(mesh) => render_mesh(mesh, state, &frame, ctx),
		SceneData::Blocks(field) => render_blocks(field, state, &frame, ctx),
	}
}

struct CircleDraw {
	x: f64,
	y: f64,
	depth: f64,
	radius: f64,
	color: &'static str,
	alpha: f64,
	glow: bool,
}

fn render_mesh(
	mesh: &NeuralMesh,
	state: &SceneState,
	frame: &FrameProjection,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(MESH_BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	draw_mesh_edges(mesh, frame, ctx);

	// Edges keep their base positions while the nodes wobble on top.
	let mut circles = Vec::with_capacity(mesh.nodes.len() + 2);
	for node in &mesh.nodes {
		let world = node.position + node_offset(state.elapsed, node.speed, node.phase);
		if let Some(point) = frame.project(world) {
			circles.push(CircleDraw {
				x: point.x,
				y: point.y,
				depth: point.depth,
				radius: node.radius * point.scale,
				color: node.color,
				alpha: 1.0,
				glow: node.is_accent,
			});
		}
	}

	if let Some(center) = frame.project(DVec3::ZERO) {
		circles.push(CircleDraw {
			x: center.x,
			y: center.y,
			depth: center.depth,
			radius: CORE_RADIUS * center.scale,
			color: ACCENT_COLOR,
			alpha: 1.0,
			glow: false,
		});
		circles.push(CircleDraw {
			x: center.x,
			y: center.y,
			depth: center.depth,
			radius: CORE_HALO_RADIUS * center.scale,
			color: ACCENT_COLOR,
			alpha: CORE_HALO_ALPHA,
			glow: false,
		});
	}

	// Far circles first so near ones paint over them.
	circles.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));

	for circle in &circles {
		if circle.glow {
			draw_glow(circle, ctx);
		}
		ctx.set_global_alpha(circle.alpha);
		ctx.begin_path();
		let _ = ctx.arc(circle.x, circle.y, circle.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(circle.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);
	}
}

fn draw_mesh_edges(mesh: &NeuralMesh, frame: &FrameProjection, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_STYLE);
	ctx.set_line_width(1.0);

	for edge in &mesh.edges {
		let (Some(start), Some(end)) = (frame.project(edge.start), frame.project(edge.end)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		ctx.line_to(end.x, end.y);
		ctx.stroke();
	}
}

fn draw_glow(circle: &CircleDraw, ctx: &CanvasRenderingContext2d) {
	let glow_radius = circle.radius * 3.0;
	let gradient = ctx
		.create_radial_gradient(
			circle.x,
			circle.y,
			circle.radius * 0.3,
			circle.x,
			circle.y,
			glow_radius,
		)
		.unwrap();
	gradient
		.add_color_stop(0.0, "rgba(253, 216, 64, 0.35)")
		.unwrap();
	gradient
		.add_color_stop(0.6, "rgba(253, 216, 64, 0.1)")
		.unwrap();
	gradient
		.add_color_stop(1.0, "rgba(253, 216, 64, 0)")
		.unwrap();
	ctx.begin_path();
	let _ = ctx.arc(circle.x, circle.y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

const CUBE_EDGES: [(usize, usize); 12] = [
	(0, 1),
	(1, 3),
	(3, 2),
	(2, 0),
	(4, 5),
	(5, 7),
	(7, 6),
	(6, 4),
	(0, 4),
	(1, 5),
	(2, 6),
	(3, 7),
];

fn render_blocks(
	field: &BlockField,
	state: &SceneState,
	frame: &FrameProjection,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(BLOCK_BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	draw_cube_frame(frame, ctx);

	let mut draws = Vec::with_capacity(field.points.len());
	for point in &field.points {
		if let Some(projected) = frame.project(point.position) {
			let radius = BLOCK_POINT_RADIUS * point.size * projected.scale;
			draws.push((projected, radius));
		}
	}
	draws.sort_by(|a, b| b.0.depth.partial_cmp(&a.0.depth).unwrap_or(Ordering::Equal));

	ctx.set_fill_style_str(BLOCK_POINT_COLOR);
	for (projected, radius) in &draws {
		ctx.begin_path();
		let _ = ctx.arc(projected.x, projected.y, *radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_cube_frame(frame: &FrameProjection, ctx: &CanvasRenderingContext2d) {
	// Corner index bits select the sign of x, y and z in turn.
	let corners: Vec<_> = (0..8)
		.map(|i| {
			frame.project(DVec3::new(
				if i & 1 == 0 { -CUBE_HALF } else { CUBE_HALF },
				if i & 2 == 0 { -CUBE_HALF } else { CUBE_HALF },
				if i & 4 == 0 { -CUBE_HALF } else { CUBE_HALF },
			))
		})
		.collect();

	ctx.set_stroke_style_str(CUBE_STYLE);
	ctx.set_line_width(1.0);

	for &(a, b) in &CUBE_EDGES {
		let (Some(start), Some(end)) = (corners[a], corners[b]) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		ctx.line_to(end.x, end.y);
		ctx.stroke();
	}
}
