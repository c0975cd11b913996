use super::{link, util, BlockBody};
use crate::{BlockContext, RenderMode, VNode};
use portyo_model::{Block, BlockKind};

fn radius(shape: &str) -> &'static str {
    match shape {
        "square" => "0px",
        "round" => "8px",
        "full" | "pill" => "9999px",
        _ => "16px",
    }
}

fn shadow(key: &str) -> Option<&'static str> {
    match key {
        "soft" => Some("0 4px 14px -4px rgba(0,0,0,0.15)"),
        "strong" => Some("0 8px 24px -6px rgba(0,0,0,0.25)"),
        "hard" => Some("4px 4px 0px rgba(0,0,0,0.9)"),
        _ => None,
    }
}

/// Link button. Style, colors, shape and shadow fall back to the bio's
/// button defaults.
pub fn render_button(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Button(button) = block.kind() else {
        return BlockBody::new();
    };

    let label = button.label().unwrap_or("Button");
    let href = util::normalize_url(button.link().unwrap_or_default());
    let style = button.button_style.as_deref().unwrap_or(&ctx.button_style);
    let accent = button.accent.as_deref().unwrap_or(&ctx.button_color);
    let text_color = block
        .style()
        .text_color
        .as_deref()
        .unwrap_or(&ctx.button_text_color);
    let shape = button.button_shape.as_deref().unwrap_or(&ctx.button_radius);
    let shadow_key = button.button_shadow.as_deref().unwrap_or(&ctx.button_shadow);

    let mut anchor = link(&href, ctx)
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("justify-content", "center")
        .with_style("gap", "10px")
        .with_style("width", "100%")
        .with_style("padding", "16px 24px")
        .with_style("font-weight", "700")
        .with_style("text-decoration", "none")
        .with_style("box-sizing", "border-box")
        .with_style("border-radius", radius(shape));

    if let Some(shadow) = shadow(shadow_key) {
        anchor = anchor.with_style("box-shadow", shadow);
    }

    anchor = match style {
        "outline" => anchor
            .with_style("background-color", "transparent")
            .with_style("color", accent)
            .with_style("border", format!("2px solid {}", accent)),
        "ghost" => anchor
            .with_style("background-color", format!("{}10", accent))
            .with_style("color", accent),
        "soft-shadow" => anchor
            .with_style("background-color", accent)
            .with_style("color", text_color)
            .with_style(
                "box-shadow",
                format!("0 10px 15px -3px {}40, 0 4px 6px -2px {}20", accent, accent),
            ),
        "hard-shadow" => anchor
            .with_style("background-color", accent)
            .with_style("color", text_color)
            .with_style("border", "2px solid #111827")
            .with_style("box-shadow", "4px 4px 0px 0px #111827"),
        "glass" => anchor
            .with_style("background", "rgba(255, 255, 255, 0.2)")
            .with_style("backdrop-filter", "blur(10px)")
            .with_style("border", "1px solid rgba(255, 255, 255, 0.3)")
            .with_style("color", text_color),
        _ => anchor
            .with_style("background-color", accent)
            .with_style("color", text_color),
    };

    if button.is_nsfw() {
        // The real target is only revealed after the viewer confirms.
        anchor = anchor
            .with_attr("href", "#")
            .with_attr("data-nsfw", "true")
            .with_attr("data-nsfw-url", href.as_str());
    }

    if let Some(thumbnail) = &button.thumbnail {
        anchor = anchor.with_child(
            VNode::element("img")
                .with_attr("src", thumbnail.as_str())
                .with_attr("alt", "")
                .with_style("width", "28px")
                .with_style("height", "28px")
                .with_style("border-radius", "50%")
                .with_style("object-fit", "cover"),
        );
    }
    anchor = anchor.with_child(VNode::element("span").with_child(VNode::text(label)));

    if ctx.mode == RenderMode::Preview {
        anchor = anchor.with_style("cursor", "default");
    }

    BlockBody::new()
        .with_class(format!("bio-button bio-button--{}", style))
        .with_style("padding", "6px 0")
        .with_child(anchor)
}
