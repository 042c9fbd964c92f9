//! Escalation of render-surface provisioning failures.
//!
//! Loading never fails loudly, but constructing the surface can. Exactly one
//! provisioning failure is recoverable: the platform's web runtime is not
//! installed. The user is told to install it and the host closes. Every
//! other provisioning error is handed back to the caller as fatal.

use log::error;
use mdview_core::{Error, Host, Result};

/// Message fragment identifying a missing web runtime.
pub const MISSING_WEB_VIEW_MARKER: &str = "Failed to load WebView provider: No WebView installed";

/// Notice shown to the user when the web runtime is missing.
pub const INSTALL_WEB_VIEW_MESSAGE: &str = "Install WebView and try again";

/// Close `host` if `error` is the missing-web-runtime failure.
///
/// # Errors
///
/// Returns `error` unchanged when it is anything else; callers are expected
/// to propagate it.
///
/// # Example
///
/// ```
/// use mdview::escalation::close_on_missing_web_view;
/// use mdview::testing::RecordingHost;
/// use mdview_core::Error;
///
/// let mut host = RecordingHost::default();
/// let missing = Error::provisioning("Failed to load WebView provider: No WebView installed");
/// assert!(close_on_missing_web_view(&mut host, missing).is_ok());
/// assert!(host.finished);
///
/// let other = Error::provisioning("GPU process crashed");
/// assert!(close_on_missing_web_view(&mut host, other).is_err());
/// ```
pub fn close_on_missing_web_view<H: Host + ?Sized>(host: &mut H, error: Error) -> Result<()> {
    if !error.to_string().contains(MISSING_WEB_VIEW_MARKER) {
        return Err(error);
    }

    error!("Failed to load WebView: {error}");
    host.show_error(INSTALL_WEB_VIEW_MESSAGE);
    host.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;

    #[test]
    fn test_missing_web_view_closes_host() {
        let mut host = RecordingHost::default();
        let err = Error::provisioning(MISSING_WEB_VIEW_MARKER);

        close_on_missing_web_view(&mut host, err).unwrap();

        assert!(host.finished);
        assert_eq!(
            *host.notices.lock().unwrap(),
            vec![INSTALL_WEB_VIEW_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_marker_matched_as_substring() {
        let mut host = RecordingHost::default();
        let message = format!("surface init: {MISSING_WEB_VIEW_MARKER} (code 7)");
        let err = Error::provisioning(message);
        assert!(close_on_missing_web_view(&mut host, err).is_ok());
        assert!(host.finished);
    }

    #[test]
    fn test_other_errors_are_returned() {
        let mut host = RecordingHost::default();
        let err = Error::provisioning("renderer crashed");

        let returned = close_on_missing_web_view(&mut host, err).unwrap_err();

        match returned {
            Error::Provisioning(msg) => assert_eq!(msg, "renderer crashed"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!host.finished);
        assert!(host.notices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_provisioning_error_kinds_are_returned() {
        let mut host = RecordingHost::default();
        let err = Error::Io(std::io::Error::other("disk"));
        assert!(matches!(
            close_on_missing_web_view(&mut host, err),
            Err(Error::Io(_))
        ));
    }
}
