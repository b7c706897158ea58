mod disc_renderer;
pub mod utils;

pub use disc_renderer::DiscRenderer;
