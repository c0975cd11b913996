/// Registry tests: tier placement, lazy loading, failure isolation
use crate::*;
use async_trait::async_trait;
use portyo_model::{BlockKind, BlockType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Builtin modules, except one type that fails and one that is slow.
#[derive(Default)]
struct ScriptedLoader {
    failing: Option<BlockType>,
    slow: Option<BlockType>,
    calls: AtomicUsize,
}

#[async_trait]
impl ModuleLoader for ScriptedLoader {
    async fn load(&self, block_type: BlockType) -> LoadResult<RenderFn> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.slow == Some(block_type) {
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        if self.failing == Some(block_type) {
            return Err(LoadError::Failed {
                block_type,
                message: "network unreachable".to_string(),
            });
        }
        BuiltinLoader.load(block_type).await
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn test_eager_types_resolve_from_construction() {
        let registry = Registry::new();
        for ty in [
            BlockType::Text,
            BlockType::Heading,
            BlockType::Button,
            BlockType::Divider,
            BlockType::Image,
        ] {
            assert!(matches!(registry.resolve_type(ty), Resolution::Eager(_)), "{}", ty);
            assert!(registry.is_loaded(ty));
        }
    }

    #[test]
    fn test_lazy_types_start_pending() {
        let registry = Registry::new();
        for ty in BlockType::lazy_types() {
            assert!(matches!(registry.resolve_type(ty), Resolution::Pending(t) if t == ty));
            assert!(!registry.is_loaded(ty));
        }
    }

    #[test]
    fn test_preloaded_registry_never_suspends() {
        let registry = Registry::preloaded();
        for ty in BlockType::ALL {
            assert!(registry.resolve_type(ty).render_fn().is_some(), "{}", ty);
        }
    }

    #[test]
    fn test_unknown_kind_is_unrecognized() {
        let registry = Registry::new();
        let kind = BlockKind::Unrecognized("hologram".to_string());
        assert!(matches!(registry.resolve(&kind), Resolution::Unrecognized));
    }

    #[tokio::test]
    async fn test_load_fills_slot() {
        let registry = Registry::new();
        registry.load(BlockType::Socials).await.unwrap();

        assert!(matches!(
            registry.resolve_type(BlockType::Socials),
            Resolution::Loaded(_)
        ));
        assert!(!registry.is_loaded(BlockType::Video));
    }

    #[tokio::test]
    async fn test_loading_eager_type_is_an_error() {
        let registry = Registry::new();
        assert_eq!(
            registry.load(BlockType::Text).await.unwrap_err(),
            LoadError::NotLazy(BlockType::Text)
        );
    }

    #[tokio::test]
    async fn test_failed_load_is_isolated_and_retried() {
        let loader = Arc::new(ScriptedLoader {
            failing: Some(BlockType::Map),
            ..Default::default()
        });
        let registry = Registry::with_loader(loader.clone());

        let errors = registry
            .load_all([BlockType::Map, BlockType::Video, BlockType::Tour])
            .await;

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].block_type(), BlockType::Map);
        assert!(registry.is_loaded(BlockType::Video));
        assert!(registry.is_loaded(BlockType::Tour));
        assert!(!registry.is_loaded(BlockType::Map));

        // The empty slot is tried again on the next request.
        let before = loader.calls.load(Ordering::SeqCst);
        assert!(registry.load(BlockType::Map).await.is_err());
        assert_eq!(loader.calls.load(Ordering::SeqCst), before + 1);
    }

    #[tokio::test]
    async fn test_load_all_deduplicates() {
        let loader = Arc::new(ScriptedLoader::default());
        let registry = Registry::with_loader(loader.clone());

        let errors = registry
            .load_all([BlockType::Blog, BlockType::Blog, BlockType::Blog])
            .await;

        assert!(errors.is_empty());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_requests_share_one_load() {
        let loader = Arc::new(ScriptedLoader {
            slow: Some(BlockType::Product),
            ..Default::default()
        });
        let registry = Registry::with_loader(loader.clone());

        let (a, b) = tokio::join!(
            registry.load(BlockType::Product),
            registry.load(BlockType::Product)
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_load_does_not_block_other_types() {
        let loader = Arc::new(ScriptedLoader {
            slow: Some(BlockType::Video),
            ..Default::default()
        });
        let registry = Arc::new(Registry::with_loader(loader));

        let slow = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.load(BlockType::Video).await })
        };
        tokio::task::yield_now().await;

        tokio::time::timeout(Duration::from_millis(1), registry.load(BlockType::Spotify))
            .await
            .expect("fast load should not wait on the slow one")
            .unwrap();
        assert!(registry.is_loaded(BlockType::Spotify));
        assert!(!registry.is_loaded(BlockType::Video));

        slow.await.unwrap().unwrap();
        assert!(registry.is_loaded(BlockType::Video));
    }

    #[test]
    fn test_request_load_needs_a_runtime() {
        let registry = Arc::new(Registry::new());
        assert!(!registry.request_load(BlockType::Map));
        assert!(!registry.is_loaded(BlockType::Map));
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_load_started_once() {
        let loader = Arc::new(ScriptedLoader {
            slow: Some(BlockType::Calendar),
            ..Default::default()
        });
        let registry = Arc::new(Registry::with_loader(loader.clone()));

        assert!(registry.request_load(BlockType::Calendar));
        assert!(!registry.request_load(BlockType::Calendar));
        assert!(!registry.request_load(BlockType::Text));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(registry.is_loaded(BlockType::Calendar));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert!(!registry.request_load(BlockType::Calendar));
    }

    #[tokio::test]
    async fn test_failed_background_load_can_be_requested_again() {
        let loader = Arc::new(ScriptedLoader {
            failing: Some(BlockType::Event),
            ..Default::default()
        });
        let registry = Arc::new(Registry::with_loader(loader.clone()));

        assert!(registry.request_load(BlockType::Event));
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(!registry.is_loaded(BlockType::Event));

        assert!(registry.request_load(BlockType::Event));
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
    }
}
