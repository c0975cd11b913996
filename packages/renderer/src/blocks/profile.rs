use super::{link, text_el, BlockBody};
use crate::{BlockContext, RenderMode, VNode};
use portyo_model::{Block, BlockKind};

fn section_title(title: &str) -> VNode {
    text_el("h3", title)
        .with_style("font-size", "20px")
        .with_style("font-weight", "800")
        .with_style("color", "#111827")
        .with_style("margin", "0 0 20px 0")
}

pub fn render_experience(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Experience(experience) = block.kind() else {
        return BlockBody::new();
    };

    let entries = experience.experiences.iter().enumerate().map(|(i, entry)| {
        let dot_color = if i == 0 { "#111827" } else { "#D1D5DB" };
        let mut meta = VNode::element("div")
            .with_style("font-size", "13px")
            .with_style("color", "#6B7280")
            .with_child(VNode::text(entry.company.as_deref().unwrap_or_default()));
        if let Some(period) = &entry.period {
            meta = meta.with_child(
                text_el("span", format!("• {}", period)).with_style("margin-left", "8px"),
            );
        }

        let mut card = VNode::element("div")
            .with_style("padding", "14px 18px")
            .with_style("border-radius", "16px")
            .with_style("background-color", "#F9FAFB")
            .with_child(
                text_el("div", entry.role.as_deref().unwrap_or_default())
                    .with_style("font-weight", "700")
                    .with_style("color", "#111827"),
            )
            .with_child(meta);
        if let Some(description) = &entry.description {
            card = card.with_child(
                text_el("div", description.as_str())
                    .with_style("font-size", "13px")
                    .with_style("margin-top", "8px"),
            );
        }

        VNode::element("div")
            .with_style("position", "relative")
            .with_style("padding-bottom", "24px")
            .with_child(
                VNode::element("div")
                    .with_attr("class", "timeline-dot")
                    .with_style("background-color", dot_color),
            )
            .with_child(card)
    });

    BlockBody::new()
        .with_child(section_title(experience.title.as_deref().unwrap_or("Experience")))
        .with_child(
            VNode::element("div")
                .with_style("padding-left", "24px")
                .with_style("border-left", "2px solid #E5E7EB")
                .with_children(entries),
        )
}

pub fn render_portfolio(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Portfolio(portfolio) = block.kind() else {
        return BlockBody::new();
    };

    let tiles = portfolio.items.iter().map(|item| {
        let mut tile = VNode::element("figure")
            .with_style("margin", "0")
            .with_style("border-radius", "16px")
            .with_style("overflow", "hidden")
            .with_style("background-color", "#F3F4F6");
        if let Some(image) = &item.image {
            tile = tile.with_child(
                VNode::element("img")
                    .with_attr("src", image.as_str())
                    .with_attr("alt", item.title.as_deref().unwrap_or_default())
                    .with_attr("loading", "lazy")
                    .with_style("width", "100%")
                    .with_style("aspect-ratio", "1")
                    .with_style("object-fit", "cover"),
            );
        }
        if let Some(title) = &item.title {
            tile = tile.with_child(
                text_el("figcaption", title.as_str())
                    .with_style("padding", "8px 12px")
                    .with_style("font-size", "13px"),
            );
        }
        match &item.url {
            Some(url) => link(url, ctx).with_child(tile),
            None => tile,
        }
    });

    BlockBody::new()
        .with_child(section_title(portfolio.title.as_deref().unwrap_or("Portfolio")))
        .with_child(
            VNode::element("div")
                .with_style("display", "grid")
                .with_style("grid-template-columns", "repeat(2, 1fr)")
                .with_style("gap", "12px")
                .with_children(tiles),
        )
}

pub fn render_button_grid(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::ButtonGrid(grid) = block.kind() else {
        return BlockBody::new();
    };

    let cells = grid.entries().iter().map(|item| {
        let mut cell = link(item.url.as_deref().unwrap_or_default(), ctx)
            .with_style("display", "flex")
            .with_style("flex-direction", "column")
            .with_style("align-items", "center")
            .with_style("justify-content", "center")
            .with_style("gap", "8px")
            .with_style("padding", "16px")
            .with_style("border-radius", "16px")
            .with_style("background-color", "#F3F4F6")
            .with_style("text-decoration", "none")
            .with_style("color", "#111827");
        if let Some(image) = &item.image {
            cell = cell
                .with_style("background-image", format!("url({})", image))
                .with_style("background-size", "cover");
        }
        if let Some(icon) = &item.icon {
            cell = cell.with_child(text_el("span", icon.as_str()).with_style("font-size", "20px"));
        }
        cell.with_child(
            text_el("span", item.title.as_deref().unwrap_or_default())
                .with_style("font-weight", "600"),
        )
    });

    BlockBody::new().with_child(
        VNode::element("div")
            .with_style("display", "grid")
            .with_style("grid-template-columns", "repeat(2, 1fr)")
            .with_style("gap", "12px")
            .with_children(cells),
    )
}

pub fn render_form(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Form(form) = block.kind() else {
        return BlockBody::new();
    };

    // Form definitions live in a separate service; the page only knows the
    // id and hydrates the fields on load.
    let mut node = VNode::element("form")
        .with_attr("data-form-id", form.form_id.as_deref().unwrap_or_default())
        .with_attr("method", "post")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", "12px");
    if let Some(title) = &form.title {
        node = node.with_child(text_el("h3", title.as_str()).with_style("margin", "0"));
    }

    let mut submit = text_el("button", form.button_label.as_deref().unwrap_or("Send"))
        .with_attr("type", "submit")
        .with_style("padding", "12px 24px")
        .with_style("border-radius", "12px")
        .with_style("border", "none")
        .with_style("background-color", ctx.button_color.as_str())
        .with_style("color", ctx.button_text_color.as_str())
        .with_style("font-weight", "700");
    if ctx.mode == RenderMode::Preview {
        submit = submit.with_attr("disabled", "true");
    }

    BlockBody::new().with_child(node.with_child(submit))
}

pub fn render_blog(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Blog(blog) = block.kind() else {
        return BlockBody::new();
    };

    let count = blog.blog_post_count.unwrap_or(3.0).clamp(1.0, 12.0) as usize;
    let layout = blog.blog_layout.as_deref().unwrap_or("carousel");
    let background = blog.blog_background_color.as_deref().unwrap_or("#ffffff");
    let title_color = blog.blog_title_color.as_deref().unwrap_or("#1f2937");

    // Posts are loaded from the blog service into these slots.
    let slots = (0..count).map(|i| {
        VNode::element("article")
            .with_attr("data-blog-slot", i.to_string())
            .with_style("background-color", background)
            .with_style("color", title_color)
            .with_style("border-radius", "16px")
            .with_style("min-height", "120px")
            .with_style("min-width", "160px")
    });

    let direction = if layout == "carousel" { "row" } else { "column" };
    BlockBody::new().with_style("padding", "16px 0").with_child(
        VNode::element("div")
            .with_attr("data-blog-layout", layout)
            .with_style("display", "flex")
            .with_style("flex-direction", direction)
            .with_style("gap", "12px")
            .with_style("overflow-x", "auto")
            .with_children(slots),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: serde_json::Value) -> Block {
        Block::from_value(value).unwrap()
    }

    #[test]
    fn test_experience_timeline() {
        let body = render_experience(
            &block(json!({
                "id": "e", "type": "experience",
                "experiences": [
                    { "company": "Acme", "role": "Engineer", "period": "2020-2023" },
                    { "company": "Beta", "role": "Intern", "description": "Did things" }
                ]
            })),
            &BlockContext::default(),
        );

        assert_eq!(body.children[0].text_content(), "Experience");
        let timeline = &body.children[1];
        assert_eq!(timeline.children().len(), 2);
        assert!(timeline.text_content().contains("• 2020-2023"));
        assert!(timeline.text_content().contains("Did things"));
    }

    #[test]
    fn test_button_grid_reads_buttons_alias() {
        let body = render_button_grid(
            &block(json!({
                "id": "g", "type": "button_grid",
                "buttons": [{ "title": "A", "url": "a.dev" }, { "title": "B" }]
            })),
            &BlockContext::default(),
        );
        let grid = &body.children[0];

        assert_eq!(grid.children().len(), 2);
        assert_eq!(grid.children()[0].attr("href"), Some("https://a.dev"));
        assert_eq!(grid.children()[1].attr("href"), Some("#"));
    }

    #[test]
    fn test_form_preview_is_disabled() {
        let ctx = BlockContext {
            mode: RenderMode::Preview,
            ..BlockContext::default()
        };
        let body = render_form(&block(json!({ "id": "f", "type": "form", "formId": "f-1" })), &ctx);
        let form = &body.children[0];

        assert_eq!(form.attr("data-form-id"), Some("f-1"));
        assert_eq!(form.find_tag("button").unwrap().attr("disabled"), Some("true"));
    }

    #[test]
    fn test_blog_slot_count() {
        let body = render_blog(
            &block(json!({ "id": "b", "type": "blog", "blogPostCount": 5, "blogLayout": "list" })),
            &BlockContext::default(),
        );
        assert_eq!(body.children[0].children().len(), 5);
        assert_eq!(body.children[0].style("flex-direction"), Some("column"));
    }

    #[test]
    fn test_portfolio_items_link_when_url_present() {
        let body = render_portfolio(
            &block(json!({
                "id": "p", "type": "portfolio",
                "items": [{ "title": "One", "url": "one.dev" }, { "title": "Two" }]
            })),
            &BlockContext::default(),
        );
        let grid = &body.children[1];

        assert!(matches!(&grid.children()[0], VNode::Element { tag, .. } if tag == "a"));
        assert!(matches!(&grid.children()[1], VNode::Element { tag, .. } if tag == "figure"));
    }
}
