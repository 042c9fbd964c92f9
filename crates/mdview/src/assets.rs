//! Bundled asset stores.
//!
//! - [`DirAssetStore`] reads assets shipped as files under one directory.
//! - [`StaticAssetStore`] serves assets compiled into the binary, typically
//!   with `include_bytes!`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

use mdview_core::{AssetStore, Error, MdviewConfig, Result};

/// Assets stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at the configured assets directory.
    pub fn from_config(config: &MdviewConfig) -> Result<Self> {
        Ok(Self::new(config.assets_root()?))
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an asset name to a path under the root.
    ///
    /// Names must be relative and may not climb out of the root.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let stays_inside = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !stays_inside {
            return Err(Error::not_found(format!("{name} (outside asset root)")));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetStore for DirAssetStore {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        let path = self.resolve(name)?;
        let file = File::open(&path).map_err(|e| Error::io_with_path(e, &path))?;
        Ok(Box::new(file))
    }
}

/// Assets held in memory.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use mdview::StaticAssetStore;
/// use mdview_core::AssetStore;
///
/// let store = StaticAssetStore::new()
///     .with_asset("help.md", b"# Help\n".as_slice())
///     .with_asset("changelog.md", String::from("## 1.0\n").into_bytes());
///
/// let mut text = String::new();
/// store.open("help.md").unwrap().read_to_string(&mut text).unwrap();
/// assert_eq!(text, "# Help\n");
/// assert_eq!(store.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticAssetStore {
    assets: HashMap<String, Cow<'static, [u8]>>,
}

impl StaticAssetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset, replacing any asset with the same name.
    pub fn with_asset(
        mut self,
        name: impl Into<String>,
        bytes: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add an asset in place.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) {
        self.assets.insert(name.into(), bytes.into());
    }

    /// Whether an asset with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the store holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetStore for StaticAssetStore {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        match self.assets.get(name) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(Error::not_found(name)),
        }
    }
}
