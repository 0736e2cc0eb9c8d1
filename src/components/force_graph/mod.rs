mod component;
mod render;
mod state;
mod surface;
mod types;

pub use component::ForceGraphCanvas;
pub use surface::CanvasSurface;
pub use types::GraphData;
