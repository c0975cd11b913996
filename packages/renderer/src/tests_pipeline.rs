/// Render pipeline tests: ordering, suspension, memoization, wrapper styles
use crate::*;
use portyo_model::{Bio, Block, BlockType};
use serde_json::json;
use std::sync::Arc;

fn bio_with(blocks: serde_json::Value) -> Bio {
    Bio::from_value(json!({ "id": "bio-1", "usernameColor": "#333333", "blocks": blocks }))
        .expect("valid bio")
}

fn preloaded(mode: RenderMode) -> Pipeline {
    Pipeline::new(Arc::new(Registry::preloaded()), mode)
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_order_preserved_and_unknown_types_skipped() {
        let bio = bio_with(json!([
            { "id": "a", "type": "heading", "title": "Hi" },
            { "id": "x", "type": "not-a-real-type", "foo": 1 },
            { "id": "b", "type": "socials" },
            { "id": "c", "type": "button", "title": "Go" }
        ]));
        let pipeline = preloaded(RenderMode::Public);

        let tree = pipeline.render_blocks(bio.blocks(), &bio);
        let keys: Vec<_> = tree.nodes.iter().map(|n| n.key().unwrap_or_default()).collect();

        assert_eq!(keys, vec!["a", "b", "c"]);
        assert!(tree.pending.is_empty());
        assert_eq!(pipeline.stats().skipped, 1);
    }

    #[test]
    fn test_unknown_block_renders_nothing() {
        let pipeline = preloaded(RenderMode::Public);
        let block = Arc::new(
            Block::from_value(json!({ "id": "x", "type": "not-a-real-type" })).unwrap(),
        );

        assert!(pipeline
            .render_block(&block, &BlockContext::default())
            .is_none());
    }

    #[test]
    fn test_pending_lazy_type_renders_placeholder() {
        let bio = bio_with(json!([
            { "id": "t", "type": "text", "body": "Hello" },
            { "id": "m", "type": "map" },
            { "id": "m2", "type": "map" }
        ]));
        let pipeline = Pipeline::new(Arc::new(Registry::new()), RenderMode::Public);

        let tree = pipeline.render_blocks(bio.blocks(), &bio);

        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.pending, vec![BlockType::Map]);
        assert_eq!(tree.nodes[0].attr("data-block-type"), Some("text"));

        let placeholder = &tree.nodes[1];
        assert_eq!(placeholder.key(), Some("m"));
        assert_eq!(placeholder.attr("data-suspended"), Some("map"));
        assert_eq!(placeholder.style("min-height"), Some("40px"));
    }

    #[tokio::test]
    async fn test_placeholder_replaced_once_module_loads() {
        let bio = bio_with(json!([{ "id": "v", "type": "video", "url": "https://youtu.be/dQw4w9WgXcQ" }]));
        let pipeline = Pipeline::new(Arc::new(Registry::new()), RenderMode::Public);

        let first = pipeline.render_blocks(bio.blocks(), &bio);
        assert_eq!(first.nodes[0].attr("data-suspended"), Some("video"));

        let tree = pipeline.render_blocks_loaded(bio.blocks(), &bio).await;
        assert!(tree.is_complete());
        assert_eq!(tree.nodes[0].attr("data-block-type"), Some("video"));
        assert!(tree.nodes[0].find_tag("iframe").is_some());
    }

    #[tokio::test]
    async fn test_first_render_starts_lazy_load() {
        let bio = bio_with(json!([
            { "id": "t", "type": "text", "body": "Hello" },
            { "id": "m", "type": "map", "mapTitle": "Studio" }
        ]));
        let registry = Arc::new(Registry::new());
        let pipeline = Pipeline::new(Arc::clone(&registry), RenderMode::Public);

        let first = pipeline.render_blocks(bio.blocks(), &bio);
        assert_eq!(first.pending, vec![BlockType::Map]);

        for _ in 0..5 {
            if registry.is_loaded(BlockType::Map) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(registry.is_loaded(BlockType::Map));

        let second = pipeline.render_blocks(bio.blocks(), &bio);
        assert!(second.is_complete());
        assert_eq!(second.nodes[1].attr("data-block-type"), Some("map"));
        assert_eq!(second.nodes[1].attr("data-suspended"), None);
    }

    #[test]
    fn test_render_is_idempotent() {
        let bio = bio_with(json!([
            { "id": "a", "type": "text", "body": "One", "animation": "pulse" },
            { "id": "b", "type": "tour", "dates": [{ "date": "1 JAN", "location": "Oslo" }] }
        ]));

        let first = preloaded(RenderMode::Public).render_blocks(bio.blocks(), &bio);
        let second = preloaded(RenderMode::Public).render_blocks(bio.blocks(), &bio);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.nodes).unwrap(),
            serde_json::to_string(&second.nodes).unwrap()
        );
    }

    #[test]
    fn test_unchanged_blocks_hit_the_cache() {
        let mut bio = bio_with(json!([
            { "id": "a", "type": "text", "body": "One" },
            { "id": "b", "type": "text", "body": "Two" }
        ]));
        let pipeline = preloaded(RenderMode::Preview);

        let first = pipeline.render_blocks(bio.blocks(), &bio);
        assert_eq!(pipeline.stats().renders, 2);

        bio.set_field(
            "blocks",
            json!([
                { "id": "a", "type": "text", "body": "One" },
                { "id": "b", "type": "text", "body": "Two, edited" }
            ]),
        )
        .unwrap();
        let second = pipeline.render_blocks(bio.blocks(), &bio);

        let stats = pipeline.stats();
        assert_eq!(stats.renders, 3);
        assert_eq!(stats.cache_hits, 1);
        assert!(Arc::ptr_eq(&first.nodes[0], &second.nodes[0]));
        assert!(!Arc::ptr_eq(&first.nodes[1], &second.nodes[1]));
    }

    #[test]
    fn test_context_change_invalidates_cache() {
        let mut bio = bio_with(json!([{ "id": "a", "type": "text", "body": "One" }]));
        let pipeline = preloaded(RenderMode::Public);

        pipeline.render_blocks(bio.blocks(), &bio);
        bio.set_field("usernameColor", json!("#ff0000")).unwrap();
        let tree = pipeline.render_blocks(bio.blocks(), &bio);

        assert_eq!(pipeline.stats().cache_hits, 0);
        assert_eq!(
            tree.nodes[0].find_tag("p").unwrap().style("color"),
            Some("#ff0000")
        );
    }

    #[test]
    fn test_wrapper_identity_and_base_style() {
        let bio = bio_with(json!([{ "id": "h1", "type": "heading", "align": "right" }]));
        let tree = preloaded(RenderMode::Public).render_blocks(bio.blocks(), &bio);
        let node = &tree.nodes[0];

        assert_eq!(
            node.attr("class"),
            Some("bio-block bio-block--heading block-h1")
        );
        assert_eq!(node.attr("data-block-id"), Some("h1"));
        assert_eq!(node.style("text-align"), Some("right"));
    }

    #[test]
    fn test_composed_style_wins_over_renderer_overrides() {
        // The heading renderer overrides padding; a custom block padding
        // must still apply.
        let bio = bio_with(json!([
            { "id": "h", "type": "heading", "body": "sub", "blockPadding": 24 }
        ]));
        let tree = preloaded(RenderMode::Public).render_blocks(bio.blocks(), &bio);

        assert_eq!(tree.nodes[0].style("padding"), Some("24px"));
    }

    #[test]
    fn test_both_animations_reach_the_wrapper() {
        let bio = bio_with(json!([{
            "id": "a", "type": "text", "animation": "bounce", "entranceAnimation": "fadeIn"
        }]));
        let tree = preloaded(RenderMode::Public).render_blocks(bio.blocks(), &bio);

        assert_eq!(
            tree.nodes[0].style("animation"),
            Some("bounce 1s ease-in-out infinite, fadeIn 0.6s ease-out 0ms both")
        );
    }

    #[test]
    fn test_hover_animation_moves_to_attribute() {
        let bio = bio_with(json!([{
            "id": "a", "type": "button", "animation": "shake", "animationTrigger": "hover"
        }]));
        let tree = preloaded(RenderMode::Public).render_blocks(bio.blocks(), &bio);
        let node = &tree.nodes[0];

        assert_eq!(node.style("animation"), None);
        assert_eq!(
            node.attr("class"),
            Some("bio-block bio-block--button block-a bio-button bio-button--solid")
        );
        assert_eq!(
            node.attr("data-hover-animation"),
            Some("shake 1s ease-in-out 1")
        );
    }

    #[test]
    fn test_cache_pruned_to_last_list() {
        let bio = bio_with(json!([
            { "id": "a", "type": "text" },
            { "id": "b", "type": "text" }
        ]));
        let all = bio.blocks().to_vec();
        let pipeline = preloaded(RenderMode::Public);

        pipeline.render_blocks(&all, &bio);
        pipeline.render_blocks(&all[..1], &bio);
        // Same Arc for "b", but its entry was dropped with the shorter list.
        pipeline.render_blocks(&all, &bio);

        let stats = pipeline.stats();
        assert_eq!(stats.renders, 3);
        assert_eq!(stats.cache_hits, 2);
    }
}
