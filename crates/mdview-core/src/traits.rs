//! Collaborator traits for mdview.
//!
//! These traits are the seams between the loader and its host: where bundled
//! assets come from ([`AssetStore`]), how Markdown becomes HTML
//! ([`MarkupConverter`]), what displays the result ([`RenderSurface`]) and who
//! is told when the surface cannot be built at all ([`Host`]).

use std::io::Read;

use crate::Result;

/// Read-only store of bundled assets.
///
/// Asset names are trusted, compile-time-known strings such as
/// `"help/changelog.md"`.
///
/// # Example
///
/// ```
/// use std::io::{Cursor, Read};
/// use mdview_core::{AssetStore, Error, Result};
///
/// struct OneAsset;
///
/// impl AssetStore for OneAsset {
///     fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
///         match name {
///             "help.md" => Ok(Box::new(Cursor::new(b"# Help".to_vec()))),
///             other => Err(Error::not_found(other)),
///         }
///     }
/// }
///
/// assert!(OneAsset.open("help.md").is_ok());
/// assert!(matches!(OneAsset.open("missing.md"), Err(e) if e.is_not_found()));
/// ```
pub trait AssetStore: Send + Sync + 'static {
    /// Open the named asset for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no asset has
    /// that name, or an I/O error if it exists but cannot be opened.
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>>;
}

/// Converts lightweight markup into an HTML fragment.
///
/// Implementations are pure: the same input always yields the same output
/// and no state is kept between calls.
pub trait MarkupConverter: Send + Sync + 'static {
    /// Convert `text` into HTML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`](crate::Error::Conversion) if the input
    /// cannot be converted.
    fn to_html(&self, text: &str) -> Result<String>;
}

/// A visual component that can display HTML or a blank page.
///
/// Surfaces live on the UI thread; the loader only ever touches them from
/// a completion that the UI thread runs.
pub trait RenderSurface: Send + 'static {
    /// Display an empty page.
    fn show_blank(&mut self) -> Result<()>;

    /// Display `content`.
    ///
    /// `base_url` marks the content as locally sourced so relative
    /// references are never resolved against the network.
    fn show_html(
        &mut self,
        content: &str,
        base_url: &str,
        mime_type: &str,
        encoding: &str,
    ) -> Result<()>;
}

/// The screen that owns a view, as seen by the escalation path.
pub trait Host {
    /// Show a transient, user-visible error notice. Fire-and-forget.
    fn show_error(&self, message: &str);

    /// Close the host gracefully.
    fn finish(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Cursor;

    struct EchoConverter;

    impl MarkupConverter for EchoConverter {
        fn to_html(&self, text: &str) -> Result<String> {
            if text.is_empty() {
                return Err(Error::conversion("empty"));
            }
            Ok(format!("<p>{text}</p>"))
        }
    }

    struct SingleAsset(&'static [u8]);

    impl AssetStore for SingleAsset {
        fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
            if name == "only.md" {
                Ok(Box::new(Cursor::new(self.0)))
            } else {
                Err(Error::not_found(name))
            }
        }
    }

    #[test]
    fn test_asset_store_open_reads_bytes() {
        let store = SingleAsset(b"hello");
        let mut buf = String::new();
        store.open("only.md").unwrap().read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "hello");
    }

    #[test]
    fn test_asset_store_open_missing() {
        let store = SingleAsset(b"hello");
        let err = store.open("other.md").err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_markup_converter_object_safe() {
        let converter: Box<dyn MarkupConverter> = Box::new(EchoConverter);
        assert_eq!(converter.to_html("hi").unwrap(), "<p>hi</p>");
        assert!(converter.to_html("").is_err());
    }

    #[test]
    fn test_traits_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn AssetStore>();
        assert_send_sync::<dyn MarkupConverter>();
    }
}
