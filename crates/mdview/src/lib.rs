//! Embeddable view that renders bundled Markdown assets as HTML.
//!
//! A [`MarkdownView`] reads a bundled asset on the shared worker pool,
//! converts it with `pulldown-cmark`, and hands the HTML back to the UI
//! thread through the UI queue, where its [`RenderSurface`] displays it.
//! Every load failure ends in a blank page rather than an error.
//!
//! # Modules
//!
//! - [`assets`]: Directory-backed and in-memory asset stores
//! - [`markdown`]: The default Markdown converter
//! - [`surface`]: Weak render targets and the render/fallback step
//! - [`loader`]: Read, convert and deliver
//! - [`context`]: Host context and shared services
//! - [`view`]: The embeddable view
//! - [`compat`]: Platform compatibility shim
//! - [`escalation`]: Provisioning failure handling
//! - [`testing`]: Test doubles
//!
//! [`RenderSurface`]: mdview_core::RenderSurface

#![doc = include_str!("../README.md")]

pub mod assets;
pub mod compat;
pub mod context;
pub mod escalation;
pub mod loader;
pub mod markdown;
pub mod surface;
pub mod testing;
pub mod view;

// Re-export key types at crate root for convenience
pub use assets::{DirAssetStore, StaticAssetStore};
pub use context::{Configuration, HostContext, Services};
pub use loader::{AssetLoader, load};
pub use markdown::CommonMarkConverter;
pub use surface::RenderTarget;
pub use view::MarkdownView;
