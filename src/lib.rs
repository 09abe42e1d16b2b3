//! A Rust client for the Imagen text-to-image API, with generation
//! sessions and a persistent local gallery.
//!
//! Emberlight collects a text prompt and style parameters, forwards them to
//! the hosted Imagen `:predict` endpoint, and hands back the generated
//! images as renderable data URLs. Around that single call it provides the
//! state a front end needs: a session that enforces one-request-in-flight
//! semantics and a durable, deduplicated gallery of kept images.
//!
//! ## Features
//! - Text-to-image generation (four variations per request).
//! - Asynchronous API for non-blocking operations.
//! - A generation session with explicit, I/O-free state transitions.
//! - A local gallery persisted through a swappable key-value store.
//! - Typed error handling with fixed user-facing messages.
//!
//! ## Example
//!
//! ```no_run
//! use emberlight::{App, AspectRatio, MemoryStore};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut app = App::from_env(Box::new(MemoryStore::new()))?;
//! let request = app.request_mut();
//! request.prompt = "a red fox in a neon forest".to_string();
//! request.aspect_ratio = AspectRatio::Wide;
//!
//! app.generate().await;
//! if let Some(url) = app.session().results().first() {
//!     let url = url.clone();
//!     app.save_to_gallery(url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod client;
pub mod error;
pub mod gallery;
pub mod session;
pub mod types;

pub use app::App;
pub use client::ImagenClient;
pub use error::EmberlightError;
pub use gallery::{FileStore, Gallery, GalleryStore, MemoryStore, GALLERY_STORAGE_KEY};
pub use session::{PreparedRequest, Session, SessionStatus};
pub use types::{
    AspectRatio, GeneratedImage, GenerationRequest, DEFAULT_STYLE, STYLE_PRESETS,
};
