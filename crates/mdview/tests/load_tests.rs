//! End-to-end load scenarios: view → worker pool → UI queue → surface.

use std::sync::Arc;

use mdview::testing::{
    CallLog, FailingConverter, PanickingConverter, RecordingSurface, SurfaceCall,
};
use mdview::{
    CommonMarkConverter, DirAssetStore, HostContext, MarkdownView, RenderTarget, Services,
    StaticAssetStore, load,
};
use mdview_core::{AssetStore, MarkupConverter, MdviewConfig, PoolConfig, UiQueue, WorkerPool, ui};

// ============================================================================
// Fixtures
// ============================================================================

fn docs() -> StaticAssetStore {
    StaticAssetStore::new()
        .with_asset("help.md", b"# Title\n\nBody text".as_slice())
        .with_asset(
            "changelog.md",
            b"## 1.0\r\n\r\n* First release\r\n".as_slice(),
        )
        .with_asset("latin1.md", b"# Caf\xe9\n\nBody\n".as_slice())
        .with_asset("empty.md", b"".as_slice())
        .with_asset("a.md", b"# A\n".as_slice())
        .with_asset("b.md", b"# B\n".as_slice())
}

struct Harness {
    context: Arc<HostContext>,
    queue: UiQueue,
}

impl Harness {
    fn new(assets: impl AssetStore, converter: impl MarkupConverter) -> Self {
        let (handle, queue) = ui::channel();
        let pool = Arc::new(WorkerPool::new(PoolConfig {
            thread_name: "mdview-it".into(),
            shutdown_timeout_ms: 2000,
            ..Default::default()
        }));
        Self::with_services(Services::new(assets, converter, pool, handle), queue)
    }

    fn with_services(services: Services, queue: UiQueue) -> Self {
        Self {
            context: Arc::new(HostContext::new(34, Arc::new(services))),
            queue,
        }
    }

    fn with_docs() -> Self {
        Self::new(docs(), CommonMarkConverter::new())
    }

    fn view(&self) -> (MarkdownView<RecordingSurface>, CallLog) {
        let log = CallLog::default();
        let view = MarkdownView::new(&self.context, |_| Ok(RecordingSurface::new(log.clone())))
            .expect("recording surface always provisions");
        (view, log)
    }

    fn pool(&self) -> &Arc<WorkerPool> {
        self.context.services().pool()
    }
}

fn html_call(content: &str) -> SurfaceCall {
    SurfaceCall::Html {
        content: content.to_string(),
        base_url: "local://".to_string(),
        mime_type: "text/html".to_string(),
        encoding: "UTF-8".to_string(),
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_blank_names_render_blank_without_work() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    for name in [None, Some(""), Some("   "), Some("\t\n")] {
        view.load_asset(name);
    }

    assert_eq!(log.take(), vec![SurfaceCall::Blank; 4]);
    assert!(!harness.pool().is_started());
    assert_eq!(harness.queue.run_pending(), 0);
}

#[test]
fn test_gone_environment_renders_blank_without_work() {
    let harness = Harness::with_docs();
    let (surface, log) = RecordingSurface::shared();
    let environment = Arc::downgrade(&harness.context);
    let pool = Arc::clone(harness.pool());
    drop(harness);

    load(Some("help.md"), RenderTarget::new(&surface), &environment);

    assert_eq!(log.take(), vec![SurfaceCall::Blank]);
    assert!(!pool.is_started());
}

// ============================================================================
// Successful loads
// ============================================================================

#[test]
fn test_help_renders_title_html() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("help.md");
    assert!(harness.queue.run_next());

    assert_eq!(
        log.take(),
        vec![html_call("<h1>Title</h1>\n<p>Body text</p>\n")]
    );
}

#[test]
fn test_crlf_asset_converts_like_lf() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("changelog.md");
    harness.queue.run_next();

    let calls = log.take();
    assert_eq!(calls.len(), 1);
    let html = calls[0].content().unwrap();
    assert!(html.contains("<h2>1.0</h2>"));
    assert!(html.contains("<li>First release</li>"));
    assert!(!html.contains('\r'));
}

#[test]
fn test_invalid_utf8_asset_still_renders() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("latin1.md");
    assert!(harness.queue.run_next());

    let expected = html_call("<h1>Caf\u{FFFD}</h1>\n<p>Body</p>\n");
    assert_eq!(log.take(), vec![expected]);
}

#[test]
fn test_render_happens_on_queue_thread() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("help.md");
    // Nothing reaches the surface until the UI thread drains the queue
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert!(log.snapshot().is_empty());

    harness.queue.run_next();
    assert_eq!(log.take().len(), 1);
}

#[test]
fn test_dir_store_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("guide.md"), "Some *emphasis*\n").unwrap();

    let mut harness = Harness::new(DirAssetStore::new(dir.path()), CommonMarkConverter::new());
    let (view, log) = harness.view();

    view.load_asset("guide.md");
    harness.queue.run_next();

    let expected = html_call("<p>Some <em>emphasis</em></p>\n");
    assert_eq!(log.take(), vec![expected]);
}

#[test]
fn test_services_from_config_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("about.md"), "# About\n").unwrap();
    let config = MdviewConfig {
        assets: mdview_core::AssetsConfig {
            root: Some(dir.path().to_string_lossy().into_owned()),
        },
        ..Default::default()
    };

    let (handle, queue) = ui::channel();
    let services = Services::from_config(&config, handle).unwrap();
    let mut harness = Harness::with_services(services, queue);
    let (view, log) = harness.view();

    view.load_asset("about.md");
    harness.queue.run_next();

    assert_eq!(log.take(), vec![html_call("<h1>About</h1>\n")]);
    harness.pool().shutdown();
}

// ============================================================================
// Failures end in a blank page
// ============================================================================

#[test]
fn test_missing_asset_renders_blank() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("missing.md");
    assert!(harness.queue.run_next());

    assert_eq!(log.take(), vec![SurfaceCall::Blank]);
}

#[test]
fn test_empty_asset_matches_blank_request() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("empty.md");
    harness.queue.run_next();
    let from_empty = log.take();

    view.load_asset(None::<&str>);
    let from_none = log.take();

    assert_eq!(from_empty, from_none);
    assert_eq!(from_empty, vec![SurfaceCall::Blank]);
}

#[test]
fn test_conversion_error_renders_blank() {
    let mut harness = Harness::new(docs(), FailingConverter);
    let (view, log) = harness.view();

    view.load_asset("help.md");
    harness.queue.run_next();

    assert_eq!(log.take(), vec![SurfaceCall::Blank]);
}

#[test]
fn test_converter_panic_renders_blank() {
    let mut harness = Harness::new(docs(), PanickingConverter);
    let (view, log) = harness.view();

    view.load_asset("help.md");
    assert!(harness.queue.run_next());

    assert_eq!(log.take(), vec![SurfaceCall::Blank]);
    // The pool survives the panic
    view.load_asset("help.md");
    assert!(harness.queue.run_next());
    assert_eq!(log.take(), vec![SurfaceCall::Blank]);
}

#[test]
fn test_surface_rejection_falls_back_to_blank() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();
    view.surface().lock().unwrap().fail_html = true;

    view.load_asset("help.md");
    harness.queue.run_next();

    let calls = log.take();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].content().is_some());
    assert_eq!(calls[1], SurfaceCall::Blank);
}

#[test]
fn test_load_after_shutdown_still_delivers_blank() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();
    harness.pool().shutdown();

    view.load_asset("help.md");
    assert_eq!(harness.queue.run_pending(), 1);

    assert_eq!(log.take(), vec![SurfaceCall::Blank]);
}

// ============================================================================
// Lifetimes and ordering
// ============================================================================

#[test]
fn test_dropped_view_skips_render() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("help.md");
    drop(view);

    // The completion still runs, and does nothing
    assert!(harness.queue.run_next());
    assert!(log.take().is_empty());
}

#[test]
fn test_each_load_delivers_exactly_once() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    let names = ["help.md", "missing.md", "empty.md", "a.md", "b.md"];
    for name in names {
        view.load_asset(name);
    }
    for _ in names {
        assert!(harness.queue.run_next());
    }

    assert_eq!(log.take().len(), names.len());
    assert_eq!(harness.queue.run_pending(), 0);
}

#[test]
fn test_overlapping_loads_last_completion_wins() {
    let mut harness = Harness::with_docs();
    let (view, log) = harness.view();

    view.load_asset("a.md");
    view.load_asset("b.md");
    harness.queue.run_next();
    harness.queue.run_next();

    let calls = log.take();
    assert_eq!(calls.len(), 2);
    let last = calls.last().and_then(SurfaceCall::content).unwrap();
    assert!(["<h1>A</h1>\n", "<h1>B</h1>\n"].contains(&last));
}

#[test]
fn test_concurrent_loads_on_separate_views() {
    let mut harness = Harness::with_docs();
    let views: Vec<_> = (0..8).map(|_| harness.view()).collect();

    for (i, (view, _)) in views.iter().enumerate() {
        view.load_asset(if i % 2 == 0 { "a.md" } else { "b.md" });
    }
    for _ in &views {
        harness.queue.run_next();
    }

    for (i, (_, log)) in views.iter().enumerate() {
        let expected = if i % 2 == 0 { "<h1>A</h1>\n" } else { "<h1>B</h1>\n" };
        assert_eq!(log.take(), vec![html_call(expected)]);
    }
}
