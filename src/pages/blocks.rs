use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::components::scene_canvas::{BlockConfig, SceneCanvas, SceneData, generate_blocks};

/// Scattered block field page
#[component]
pub fn Blocks() -> impl IntoView {
	let scene = Signal::derive(move || {
		let mut rng = SmallRng::from_entropy();
		generate_blocks(&BlockConfig::default(), &mut rng).map(SceneData::Blocks)
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
				<div class="scene-overlay scene-overlay-dark">
					<h1>"Block Field"</h1>
					<p class="subtitle">"One hundred points scattered through a glass cube."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
