use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::components::scene_canvas::{MeshConfig, SceneCanvas, SceneData, generate_mesh};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// Sample a fresh mesh on every visit, seeded from browser entropy
	let scene = Signal::derive(move || {
		let mut rng = SmallRng::from_entropy();
		generate_mesh(&MeshConfig::default(), &mut rng).map(SceneData::Mesh)
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-scene">
				{move || {
					scene
						.get()
						.map(|data| view! { <SceneCanvas scene=data fullscreen=true /> })
				}}
				<div class="scene-overlay">
					<h1>"Neural Mesh"</h1>
					<p class="subtitle">"A generative point cloud, resampled on every visit."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
