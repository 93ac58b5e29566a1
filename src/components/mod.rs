pub mod scene_canvas;
