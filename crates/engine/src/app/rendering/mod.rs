mod frame;
mod renderer;

pub use frame::{Frame, Rgba};
pub use renderer::Renderer;
