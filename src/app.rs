use crate::client::ImagenClient;
use crate::error::EmberlightError;
use crate::gallery::{Gallery, GalleryStore};
use crate::session::Session;
use crate::types::GenerationRequest;

/// Ties a client, one generation session, and the gallery together.
///
/// This is the surface a view talks to: read-only session state, the
/// `generate` trigger, the `save_to_gallery` trigger, and the loaded
/// gallery sequence. View-only state such as whether the gallery overlay
/// is open does not live here.
pub struct App {
    client: ImagenClient,
    session: Session,
    gallery: Gallery,
}

impl App {
    /// Creates an app from an already-constructed client and a storage
    /// backend. The gallery is loaded from the store once, here.
    pub fn new(client: ImagenClient, store: Box<dyn GalleryStore>) -> Self {
        Self {
            client,
            session: Session::new(),
            gallery: Gallery::load(store),
        }
    }

    /// Creates an app with the credential resolved from the environment.
    ///
    /// # Errors
    ///
    /// `EmberlightError::MissingApiKey` when `GEMINI_API_KEY` is not set:
    /// the app refuses to start rather than run in a broken state.
    pub fn from_env(store: Box<dyn GalleryStore>) -> Result<Self, EmberlightError> {
        Ok(Self::new(ImagenClient::new(None)?, store))
    }

    /// Read-only view of the generation session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the request fields, for the form to edit.
    pub fn request_mut(&mut self) -> &mut GenerationRequest {
        self.session.request_mut()
    }

    /// Runs one generation attempt; see [`Session::generate`].
    pub async fn generate(&mut self) {
        self.session.generate(&self.client).await;
    }

    /// Persists an image reference into the gallery; see [`Gallery::save`].
    pub fn save_to_gallery(&mut self, url: impl Into<String>) {
        self.gallery.save(url);
    }

    /// The loaded gallery.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }
}
