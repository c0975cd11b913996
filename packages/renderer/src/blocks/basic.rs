use super::{text_el, BlockBody};
use crate::style::px;
use crate::{BlockContext, VNode};
use portyo_model::{Block, BlockKind};

pub fn render_text(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Text(text) = block.kind() else {
        return BlockBody::new();
    };
    let color = block.style().text_color.as_deref().unwrap_or(&ctx.text_color);

    let mut paragraph = VNode::element("p")
        .with_style("margin", "0")
        .with_style("color", color)
        .with_style("line-height", "1.6");
    if let Some(size) = text.font_size {
        paragraph = paragraph.with_style("font-size", px(size));
    }

    // Authored line breaks survive as <br>.
    let body = text.body.as_deref().unwrap_or_default();
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            paragraph = paragraph.with_child(VNode::element("br"));
        }
        if !line.is_empty() {
            paragraph = paragraph.with_child(VNode::text(line));
        }
    }

    BlockBody::new().with_child(paragraph)
}

pub fn render_heading(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Heading(heading) = block.kind() else {
        return BlockBody::new();
    };
    let color = block.style().text_color.as_deref().unwrap_or(&ctx.text_color);

    let mut body = BlockBody::new().with_style("padding", "16px 0").with_child(
        text_el("h2", heading.title.as_deref().unwrap_or("Heading"))
            .with_style("margin", "0")
            .with_style("font-size", "28px")
            .with_style("font-weight", "700")
            .with_style("color", color),
    );

    if let Some(sub) = &heading.body {
        body = body.with_child(
            text_el("p", sub.as_str())
                .with_style("margin", "8px 0 0")
                .with_style("color", color)
                .with_style("opacity", "0.7"),
        );
    }
    body
}

pub fn render_divider(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Divider(divider) = block.kind() else {
        return BlockBody::new();
    };

    let line_style = match divider.divider_style.as_deref() {
        Some(s @ ("dashed" | "dotted" | "double")) => s,
        _ => "solid",
    };
    let border = format!(
        "{} {} {}",
        px(divider.thickness.unwrap_or(1.0).max(0.0)),
        line_style,
        divider.color.as_deref().unwrap_or("#E5E7EB")
    );

    BlockBody::new().with_tag("div").with_child(
        VNode::element("hr")
            .with_style("border", "none")
            .with_style("border-top", border)
            .with_style("margin", "8px 0"),
    )
}
