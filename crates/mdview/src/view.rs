//! The embeddable Markdown view.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use log::debug;
use mdview_core::{RenderSurface, Result};

use crate::compat;
use crate::context::HostContext;
use crate::loader;
use crate::surface::RenderTarget;

/// A render surface that shows bundled Markdown documents.
///
/// The view owns its surface and refers to its host context weakly. Loads
/// started from it hold neither strongly, so dropping the view (or the host)
/// while a load is in flight simply turns that load's delivery into a no-op.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mdview::testing::{RecordingSurface, CallLog};
/// use mdview::{HostContext, MarkdownView, Services, StaticAssetStore, CommonMarkConverter};
/// use mdview_core::{PoolConfig, WorkerPool, ui};
///
/// let (handle, mut queue) = ui::channel();
/// let services = Services::new(
///     StaticAssetStore::new().with_asset("help.md", b"# Title\n\nBody text".as_slice()),
///     CommonMarkConverter::new(),
///     Arc::new(WorkerPool::new(PoolConfig::default())),
///     handle,
/// );
/// let context = Arc::new(HostContext::new(34, Arc::new(services)));
///
/// let log = CallLog::default();
/// let view = MarkdownView::new(&context, |_ctx| Ok(RecordingSurface::new(log.clone()))).unwrap();
///
/// view.load_asset("help.md");
/// queue.run_next();
///
/// let calls = log.take();
/// assert!(calls[0].content().unwrap().contains("<h1>Title</h1>"));
/// ```
pub struct MarkdownView<S: RenderSurface> {
    surface: Arc<Mutex<S>>,
    context: Weak<HostContext>,
}

impl<S: RenderSurface> MarkdownView<S> {
    /// Create a view inside `context`.
    ///
    /// `provision` builds the surface from a context that has been through
    /// [`compat::patch_context`].
    ///
    /// # Errors
    ///
    /// Returns whatever `provision` fails with. Pass the error to
    /// [`escalation::close_on_missing_web_view`](crate::escalation::close_on_missing_web_view)
    /// to handle the one recoverable case.
    pub fn new<F>(context: &Arc<HostContext>, provision: F) -> Result<Self>
    where
        F: FnOnce(&HostContext) -> Result<S>,
    {
        let patched = compat::patch_context(context);
        let surface = provision(&patched)?;
        Ok(Self {
            surface: Arc::new(Mutex::new(surface)),
            context: Arc::downgrade(context),
        })
    }

    /// Load a bundled asset into this view.
    ///
    /// `None` or a blank name shows a blank page. Results arrive through the
    /// UI queue.
    pub fn load_asset<'a>(&self, asset: impl Into<Option<&'a str>>) {
        loader::load(asset.into(), self.target(), &self.context);
    }

    /// Weak handle to this view's surface.
    pub fn target(&self) -> RenderTarget {
        RenderTarget::new(&self.surface)
    }

    /// The owned surface.
    pub fn surface(&self) -> &Arc<Mutex<S>> {
        &self.surface
    }

    /// Whether the host context is still alive.
    pub fn is_attached(&self) -> bool {
        self.context.strong_count() > 0
    }

    /// Tear the view down and hand the surface back.
    ///
    /// Returns `None` if someone else still holds the surface. Loads still
    /// in flight are discarded when they complete.
    pub fn detach(self) -> Option<S> {
        debug!("Detaching markdown view");
        let surface = Arc::try_unwrap(self.surface).ok()?;
        Some(surface.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<S: RenderSurface> std::fmt::Debug for MarkdownView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownView")
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
