//! Render target: a non-owning handle to a [`RenderSurface`].
//!
//! The loader only ever holds a [`RenderTarget`]. It is upgraded at delivery
//! time on the UI thread; if the surface has been dropped in the meantime the
//! delivery is a no-op, so an in-flight load never keeps a view alive.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use log::{debug, error, warn};
use mdview_core::RenderSurface;

/// Base URL handed to the surface, marking content as locally sourced.
pub const BASE_URL: &str = "local://";

/// MIME type of rendered content.
pub const MIME_TYPE: &str = "text/html";

/// Text encoding of rendered content.
pub const ENCODING: &str = "UTF-8";

/// Weak handle to a surface owned elsewhere.
#[derive(Clone)]
pub struct RenderTarget {
    surface: Weak<Mutex<dyn RenderSurface>>,
}

impl RenderTarget {
    /// Create a target that refers to `surface` without owning it.
    pub fn new<S: RenderSurface>(surface: &Arc<Mutex<S>>) -> Self {
        let surface: Weak<Mutex<S>> = Arc::downgrade(surface);
        Self { surface }
    }

    /// Whether the surface still exists.
    pub fn is_alive(&self) -> bool {
        self.surface.strong_count() > 0
    }

    /// Show a blank page, logging rather than returning any failure.
    pub fn show_blank(&self) {
        self.render(None);
    }

    /// Display a conversion result.
    ///
    /// `None` and whitespace-only HTML show a blank page; anything else is
    /// shown with [`BASE_URL`], [`MIME_TYPE`] and [`ENCODING`]. A surface
    /// error triggers one blank-page fallback. Nothing is returned: the
    /// worst outcome is a logged error and whatever the surface last showed.
    pub fn render(&self, html: Option<&str>) {
        let Some(surface) = self.surface.upgrade() else {
            warn!("Render surface is gone, dropping content");
            return;
        };
        let mut surface = surface.lock().unwrap_or_else(PoisonError::into_inner);

        let outcome = match html.filter(|h| !h.trim().is_empty()) {
            Some(content) => {
                debug!("Rendering {} bytes of HTML", content.len());
                surface.show_html(content, BASE_URL, MIME_TYPE, ENCODING)
            }
            None => surface.show_blank(),
        };

        if let Err(e) = outcome {
            error!("Error loading HTML content into render surface: {e}");
            if let Err(fallback) = surface.show_blank() {
                error!("Failed to load blank page as fallback: {fallback}");
            }
        }
    }
}

impl std::fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTarget")
            .field("alive", &self.is_alive())
            .finish()
    }
}
