//! Platform compatibility shim for surface construction.

use std::sync::Arc;

use log::debug;

use crate::context::{Configuration, HostContext};

/// Platform versions whose configuration context breaks surface construction.
pub const LEGACY_PLATFORM_VERSIONS: [u32; 2] = [22, 23];

/// Whether `platform_version` needs a freshly derived context.
pub fn needs_patch(platform_version: u32) -> bool {
    LEGACY_PLATFORM_VERSIONS.contains(&platform_version)
}

/// Return a context that is safe to construct a render surface with.
///
/// On the legacy versions a new context with a default [`Configuration`] is
/// derived; everywhere else the same `Arc` is returned.
pub fn patch_context(context: &Arc<HostContext>) -> Arc<HostContext> {
    if needs_patch(context.platform_version()) {
        debug!(
            "Deriving configuration context for platform version {}",
            context.platform_version()
        );
        let configuration = Configuration::default();
        Arc::new(context.create_configuration_context(configuration))
    } else {
        Arc::clone(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Services;
    use crate::{CommonMarkConverter, StaticAssetStore};
    use mdview_core::{PoolConfig, WorkerPool, ui};

    fn context(version: u32) -> Arc<HostContext> {
        let (handle, _queue) = ui::channel();
        let services = Services::new(
            StaticAssetStore::new(),
            CommonMarkConverter::new(),
            Arc::new(WorkerPool::new(PoolConfig::default())),
            handle,
        );
        Arc::new(
            HostContext::new(version, Arc::new(services)).with_configuration(Configuration {
                locale: Some("de-DE".into()),
                night_mode: None,
            }),
        )
    }

    #[test]
    fn test_needs_patch() {
        assert!(!needs_patch(21));
        assert!(needs_patch(22));
        assert!(needs_patch(23));
        assert!(!needs_patch(24));
    }

    #[test]
    fn test_patch_context_passthrough() {
        for version in [19, 21, 24, 34] {
            let original = context(version);
            let patched = patch_context(&original);
            assert!(Arc::ptr_eq(&original, &patched), "version {version}");
        }
    }

    #[test]
    fn test_patch_context_legacy_derives_fresh_context() {
        for version in LEGACY_PLATFORM_VERSIONS {
            let original = context(version);
            let patched = patch_context(&original);
            assert!(!Arc::ptr_eq(&original, &patched));
            assert_eq!(patched.configuration(), &Configuration::default());
            assert_eq!(patched.platform_version(), version);
            assert!(Arc::ptr_eq(patched.services(), original.services()));
        }
    }
}
