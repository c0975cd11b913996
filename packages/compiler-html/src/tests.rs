use crate::{compile_fragment, compile_to_html, CompileError, CompileOptions};
use portyo_model::{Bio, User};
use portyo_renderer::{Pipeline, Registry, RenderMode, VNode};
use serde_json::json;
use std::sync::Arc;

fn render(bio_json: serde_json::Value) -> (Bio, Vec<Arc<VNode>>) {
    let bio = Bio::from_value(bio_json).expect("Failed to decode bio");
    let pipeline = Pipeline::new(Arc::new(Registry::preloaded()), RenderMode::Public);
    let tree = pipeline.render_blocks(bio.blocks(), &bio);
    (bio, tree.nodes)
}

#[test]
fn test_compile_simple_page() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "blocks": [{ "id": "t", "type": "text", "body": "Hello there" }]
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("data-bio-id=\"bio-1\""));
    assert!(html.contains("class=\"bio-block bio-block--text block-t\""));
    assert!(html.contains("Hello there"));
    assert!(html.contains("</html>"));
}

#[test]
fn test_blocks_keep_their_order() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "blocks": [
            { "id": "first", "type": "heading", "title": "One" },
            { "id": "second", "type": "divider" },
            { "id": "third", "type": "text", "body": "Three" }
        ]
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    let first = html.find("block-first").unwrap();
    let second = html.find("block-second").unwrap();
    let third = html.find("block-third").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_header_and_title_from_bio() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "sufix": "ana",
        "usernameColor": "#ff00aa",
        "blocks": []
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    assert!(html.contains("<title>@ana</title>"));
    assert!(html.contains("<h1>@ana</h1>"));
    assert!(html.contains("color: #ff00aa"));
}

#[test]
fn test_user_fullname_wins_for_title() {
    let (bio, nodes) = render(json!({ "id": "bio-1", "sufix": "ana", "blocks": [] }));
    let user = User {
        id: "u1".to_string(),
        fullname: Some("Ana Lima".to_string()),
        ..Default::default()
    };

    let html = compile_to_html(&nodes, &bio, Some(&user), CompileOptions::default())
        .expect("Failed to compile");

    assert!(html.contains("<title>Ana Lima</title>"));
}

#[test]
fn test_gradient_background() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "bgType": "gradient",
        "bgColor": "#111111",
        "bgSecondaryColor": "#222222",
        "blocks": []
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    assert!(html.contains("background: linear-gradient(135deg, #111111, #222222)"));
}

#[test]
fn test_only_used_keyframes_are_emitted() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "blocks": [
            { "id": "a", "type": "text", "animation": "pulse", "entranceAnimation": "fadeInUp" },
            { "id": "b", "type": "button", "animation": "shake", "animationTrigger": "hover" }
        ]
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    assert!(html.contains("@keyframes pulse"));
    assert!(html.contains("@keyframes fadeInUp"));
    assert!(html.contains("@keyframes shake"));
    assert!(!html.contains("@keyframes bounce"));
    assert!(html.contains("data-hover-animation=\"shake 1s ease-in-out 1\""));
    assert!(html.contains("<script>"));
}

#[test]
fn test_no_script_without_hover_blocks() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "blocks": [{ "id": "a", "type": "text", "animation": "pulse" }]
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    assert!(!html.contains("<script>"));
}

#[test]
fn test_compile_self_closing_tags() {
    let node = VNode::element("img")
        .with_attr("src", "photo.jpg")
        .with_attr("alt", "Photo");

    let html = compile_fragment(&node, CompileOptions::default()).expect("Failed to compile");

    assert!(html.contains("<img"));
    assert!(html.contains("src=\"photo.jpg\""));
    assert!(html.contains("alt=\"Photo\""));
    assert!(html.contains("/>"));
}

#[test]
fn test_compile_without_pretty_print() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "blocks": [{ "id": "t", "type": "heading", "title": "Hi", "body": "there" }]
    }));
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };

    let html = compile_to_html(&nodes, &bio, None, options).expect("Failed to compile");

    // Should be compact, no extra newlines
    assert!(!html.contains('\n'));
}

#[test]
fn test_escape_html_entities() {
    let (bio, nodes) = render(json!({
        "id": "bio-1",
        "blocks": [{ "id": "t", "type": "text", "body": "Hello <world> & \"friends\"" }]
    }));

    let html = compile_to_html(&nodes, &bio, None, CompileOptions::default())
        .expect("Failed to compile");

    assert!(html.contains("&lt;world&gt;"));
    assert!(html.contains("&amp;"));
    assert!(html.contains("&quot;friends&quot;"));
    assert!(!html.contains("<world>"));
}

#[test]
fn test_invalid_tag_is_rejected() {
    let node = VNode::element("div onclick=alert(1)");
    assert!(matches!(
        compile_fragment(&node, CompileOptions::default()),
        Err(CompileError::InvalidTag(_))
    ));
}

#[test]
fn test_comment_terminator_is_rejected() {
    let node = VNode::element("div").with_child(VNode::comment("sneaky --> <b>"));
    assert_eq!(
        compile_fragment(&node, CompileOptions::default()),
        Err(CompileError::UnterminatedComment("sneaky --> <b>".to_string()))
    );
}
