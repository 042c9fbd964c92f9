//! Asset loading: read, convert, hand back to the UI thread.
//!
//! [`load`] is the fire-and-forget entry point. Blank requests and requests
//! whose host context is gone are answered on the spot with a blank page.
//! Everything else becomes one [`AssetLoader`], which runs a single blocking
//! unit on the shared [`WorkerPool`](mdview_core::WorkerPool) and posts
//! exactly one completion to the UI queue, whichever way the unit ends.
//!
//! Overlapping loads on the same target are not sequenced: the completion the
//! UI thread runs last is what stays on screen.

use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use log::{debug, error, warn};
use mdview_core::{AssetStore, MarkupConverter, Result, UiHandle};

use crate::context::{HostContext, Services};
use crate::surface::RenderTarget;

/// Load `asset` into `target`.
///
/// `None` or a blank name shows a blank page immediately and schedules no
/// work; so does an `environment` that can no longer be upgraded. The result
/// of any scheduled work reaches `target` later, through the UI queue.
pub fn load(asset: Option<&str>, target: RenderTarget, environment: &Weak<HostContext>) {
    let Some(name) = asset.filter(|name| !name.trim().is_empty()) else {
        debug!("No asset requested, showing blank page");
        target.show_blank();
        return;
    };

    let Some(context) = environment.upgrade() else {
        error!("Host context is gone, cannot load asset: {name}");
        target.show_blank();
        return;
    };

    AssetLoader::new(name, target, Arc::clone(context.services())).execute();
}

/// Read an asset and normalise its line endings to `\n`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`, and each is re-emitted followed
/// by exactly one `\n`, including the last. Bytes that are not valid UTF-8
/// decode to U+FFFD rather than failing the read. An asset with no lines
/// yields an empty string.
pub fn read_asset(store: &dyn AssetStore, name: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(4096);
    store.open(name)?.read_to_end(&mut bytes)?;

    let mut text = String::with_capacity(bytes.len() + 1);
    let mut rest = bytes.as_slice();
    while !rest.is_empty() {
        let end = rest
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .unwrap_or(rest.len());
        text.push_str(&String::from_utf8_lossy(&rest[..end]));
        text.push('\n');
        rest = match &rest[end..] {
            [b'\r', b'\n', tail @ ..] => tail,
            [_, tail @ ..] => tail,
            [] => &[],
        };
    }
    Ok(text)
}

/// One in-flight load request.
#[derive(Debug)]
pub struct AssetLoader {
    asset_name: String,
    target: RenderTarget,
    services: Arc<Services>,
}

impl AssetLoader {
    /// Prepare a load of `asset_name` into `target`.
    pub fn new(
        asset_name: impl Into<String>,
        target: RenderTarget,
        services: Arc<Services>,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            target,
            services,
        }
    }

    /// Name of the asset this loader reads.
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Schedule the load.
    ///
    /// If the pool refuses the work, the blank result is posted from here
    /// so the target still hears back exactly once.
    pub fn execute(self) {
        let ui = self.services.ui().clone();
        let unit = LoadUnit {
            asset_name: self.asset_name.clone(),
            target: self.target.clone(),
            assets: Arc::clone(self.services.assets()),
            converter: Arc::clone(self.services.converter()),
            ui: ui.clone(),
        };

        if let Err(e) = self.services.pool().spawn_blocking(move || unit.run()) {
            error!("Could not schedule asset {}: {e}", self.asset_name);
            deliver(&ui, &self.asset_name, self.target, None);
        }
    }
}

// Must not hold the pool: dropping the last pool reference on a pool thread
// tears the runtime down from inside itself.
struct LoadUnit {
    asset_name: String,
    target: RenderTarget,
    assets: Arc<dyn AssetStore>,
    converter: Arc<dyn MarkupConverter>,
    ui: UiHandle,
}

impl LoadUnit {
    fn run(self) {
        let html = match panic::catch_unwind(AssertUnwindSafe(|| self.read_and_convert())) {
            Ok(html) => html,
            Err(_) => {
                error!(
                    "Error processing markdown for asset {}: converter panicked",
                    self.asset_name
                );
                None
            }
        };
        deliver(&self.ui, &self.asset_name, self.target, html);
    }

    fn read_and_convert(&self) -> Option<String> {
        let text = match read_asset(self.assets.as_ref(), &self.asset_name) {
            Ok(text) => text,
            Err(e) => {
                error!("Could not load asset {}: {e}", self.asset_name);
                return None;
            }
        };

        if text.is_empty() {
            warn!("Empty markdown content for asset: {}", self.asset_name);
            return None;
        }

        match self.converter.to_html(&text) {
            Ok(html) => {
                debug!(
                    "Converted asset {} ({} bytes of HTML)",
                    self.asset_name,
                    html.len()
                );
                Some(html)
            }
            Err(e) => {
                error!(
                    "Error processing markdown for asset {}: {e}",
                    self.asset_name
                );
                None
            }
        }
    }
}

fn deliver(ui: &UiHandle, asset_name: &str, target: RenderTarget, html: Option<String>) {
    if !ui.post(move || target.render(html.as_deref())) {
        warn!("UI queue is closed, dropping result: {asset_name}");
    }
}
