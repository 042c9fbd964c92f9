//! mdview Core — shared types, traits, errors, and runtime plumbing.
//!
//! This crate provides the foundational pieces the `mdview` view is built
//! from. It has no Markdown or rendering logic of its own.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: File/env/default configuration
//! - [`traits`]: Collaborator traits (assets, converter, surface, host)
//! - [`pool`]: Lazily started worker pool for blocking load work
//! - [`ui`]: Serial queue that runs completions on the UI thread

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod pool;
pub mod traits;
pub mod ui;

// Re-export key types at crate root for convenience
pub use config::{AssetsConfig, MdviewConfig, PoolConfig};
pub use error::{Error, Result};
pub use pool::WorkerPool;
pub use traits::{AssetStore, Host, MarkupConverter, RenderSurface};
pub use ui::{UiHandle, UiQueue, UiTask};
