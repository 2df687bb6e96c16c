//! Markdown rendering of extracted symbols.

mod core;
/// Kind-specific fragment renderers.
pub mod items;
mod state;
/// Small markdown helpers shared by the renderers.
pub mod utils;

pub use self::core::Renderer;
pub use self::state::RenderState;
