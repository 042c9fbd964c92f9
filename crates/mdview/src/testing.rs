//! Test doubles for mdview collaborators.
//!
//! Useful for exercising views and loaders without a real rendering
//! surface or host window.

use std::sync::{Arc, Mutex, PoisonError};

use mdview_core::{Error, Host, MarkupConverter, RenderSurface, Result};

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `show_blank()`
    Blank,
    /// `show_html(..)`
    Html {
        content: String,
        base_url: String,
        mime_type: String,
        encoding: String,
    },
}

impl SurfaceCall {
    /// HTML content of an `Html` call.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Html { content, .. } => Some(content),
            Self::Blank => None,
        }
    }
}

/// Shared record of surface calls that outlives the surface itself.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl CallLog {
    fn push(&self, call: SurfaceCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Copy of the calls recorded so far.
    pub fn snapshot(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the calls recorded so far.
    pub fn take(&self) -> Vec<SurfaceCall> {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *calls)
    }
}

/// Surface that records every call and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: CallLog,
    /// Make `show_html` fail (after recording the call).
    pub fail_html: bool,
    /// Make `show_blank` fail (after recording the call).
    pub fail_blank: bool,
}

impl RecordingSurface {
    /// Create a surface writing to `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_html: false,
            fail_blank: false,
        }
    }

    /// Create a shared surface and the log it records into.
    pub fn shared() -> (Arc<Mutex<Self>>, CallLog) {
        let log = CallLog::default();
        (Arc::new(Mutex::new(Self::new(log.clone()))), log)
    }
}

impl RenderSurface for RecordingSurface {
    fn show_blank(&mut self) -> Result<()> {
        self.log.push(SurfaceCall::Blank);
        if self.fail_blank {
            return Err(Error::render("blank page rejected"));
        }
        Ok(())
    }

    fn show_html(
        &mut self,
        content: &str,
        base_url: &str,
        mime_type: &str,
        encoding: &str,
    ) -> Result<()> {
        self.log.push(SurfaceCall::Html {
            content: content.to_string(),
            base_url: base_url.to_string(),
            mime_type: mime_type.to_string(),
            encoding: encoding.to_string(),
        });
        if self.fail_html {
            return Err(Error::render("HTML rejected"));
        }
        Ok(())
    }
}

/// Converter that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingConverter;

impl MarkupConverter for FailingConverter {
    fn to_html(&self, _text: &str) -> Result<String> {
        Err(Error::conversion("malformed markup"))
    }
}

/// Converter that panics, standing in for a converter bug.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingConverter;

impl MarkupConverter for PanickingConverter {
    fn to_html(&self, _text: &str) -> Result<String> {
        panic!("converter bug")
    }
}

/// Host that records notices and whether it was finished.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Error notices shown, in order.
    pub notices: Mutex<Vec<String>>,
    /// Set once `finish` is called.
    pub finished: bool,
}

impl Host for RecordingHost {
    fn show_error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
