// Ebook export: pagination of title, byline and chapters onto fixed-size pages,
// then PDF serialization. Layout and rendering are CPU-bound and synchronous;
// the handler runs them inside tokio::task::spawn_blocking.

pub mod encoding;
pub mod handlers;
pub mod layout;
pub mod render;

pub use layout::{Document, LayoutConfig};
pub use render::{compose, RenderError};
