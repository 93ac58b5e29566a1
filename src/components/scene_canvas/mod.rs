mod animation;
mod camera;
mod component;
mod generate;
mod render;
mod state;
mod types;

pub use component::SceneCanvas;
pub use generate::{generate_blocks, generate_mesh};
pub use types::{
	BlockConfig, BlockField, BlockPoint, ConfigError, MeshConfig, MeshEdge, MeshNode, NeuralMesh,
	SceneData,
};
