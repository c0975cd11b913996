use super::{link, text_el, util, BlockBody};
use crate::style::px;
use crate::{BlockContext, VNode};
use portyo_model::{Block, BlockKind};

/// Brand color and display label per platform.
fn platform(name: &str) -> Option<(&'static str, &'static str)> {
    Some(match name {
        "instagram" => ("#E4405F", "Instagram"),
        "twitter" | "x" => ("#1DA1F2", "Twitter"),
        "linkedin" => ("#0A66C2", "LinkedIn"),
        "youtube" => ("#FF0000", "YouTube"),
        "github" => ("#333333", "GitHub"),
        "tiktok" => ("#010101", "TikTok"),
        "facebook" => ("#1877F2", "Facebook"),
        "email" => ("#EA4335", "Email"),
        "website" => ("#4285F4", "Website"),
        _ => return None,
    })
}

pub fn render_socials(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Socials(socials) = block.kind() else {
        return BlockBody::new();
    };

    let column = socials.layout.as_deref() == Some("column");
    let show_label = socials.show_label.unwrap_or(true);
    let icon_size = px(socials.icon_size.unwrap_or(20.0));

    let links = socials.links().iter().filter_map(|(name, url)| {
        let (color, label) = platform(name)?;
        let href = if name == "email" && !url.contains(':') {
            format!("mailto:{}", url)
        } else {
            url.clone()
        };

        let mut anchor = link(&href, ctx)
            .with_attr("aria-label", label)
            .with_attr("data-platform", name.as_str())
            .with_style("display", "inline-flex")
            .with_style("align-items", "center")
            .with_style("gap", "8px")
            .with_style("padding", if show_label { "10px 16px" } else { "12px" })
            .with_style("border-radius", "9999px")
            .with_style("background-color", color)
            .with_style("color", "#FFFFFF")
            .with_style("text-decoration", "none")
            .with_child(
                VNode::element("span")
                    .with_attr("class", format!("icon icon-{}", name))
                    .with_style("width", icon_size.as_str())
                    .with_style("height", icon_size.as_str()),
            );
        if show_label {
            anchor = anchor.with_child(text_el("span", label));
        }
        Some(anchor)
    });

    let align = block.style().align().as_flex();
    let container = VNode::element("div")
        .with_style("display", "flex")
        .with_style("gap", "12px")
        .with_style("flex-wrap", "wrap")
        .with_style("flex-direction", if column { "column" } else { "row" })
        .with_style(if column { "align-items" } else { "justify-content" }, align)
        .with_children(links);

    BlockBody::new().with_child(container)
}

pub fn render_whatsapp(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Whatsapp(whatsapp) = block.kind() else {
        return BlockBody::new();
    };

    let digits: String = whatsapp
        .phone
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let message = whatsapp.message.as_deref().unwrap_or_default();
    let href = format!(
        "https://wa.me/{}?text={}",
        digits,
        util::encode_component(message)
    );
    let accent = whatsapp.accent().unwrap_or("#25D366");
    let text_color = block.style().text_color.as_deref().unwrap_or("#FFFFFF");
    let radius = match whatsapp.whatsapp_shape.as_deref() {
        Some("square") => "8px",
        Some("rounded") => "16px",
        _ => "9999px",
    };

    let mut anchor = link(&href, ctx)
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("justify-content", "center")
        .with_style("gap", "10px")
        .with_style("padding", "14px 24px")
        .with_style("border-radius", radius)
        .with_style("font-weight", "700")
        .with_style("text-decoration", "none");

    anchor = if whatsapp.whatsapp_style.as_deref() == Some("outline") {
        anchor
            .with_style("background-color", "transparent")
            .with_style("border", format!("2px solid {}", accent))
            .with_style("color", accent)
    } else {
        anchor
            .with_style("background-color", accent)
            .with_style("color", text_color)
    };

    let label = whatsapp
        .label
        .as_deref()
        .unwrap_or("Send Message on WhatsApp");
    BlockBody::new().with_child(anchor.with_child(text_el("span", label)))
}

pub fn render_qrcode(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Qrcode(qr) = block.kind() else {
        return BlockBody::new();
    };

    let size = qr.size.filter(|s| *s > 0.0).unwrap_or(200.0).round() as u32;
    let fg = qr.fg_color.as_deref().unwrap_or("#000000").trim_start_matches('#');
    let bg = qr.bg_color.as_deref().unwrap_or("#FFFFFF").trim_start_matches('#');

    let entries: Vec<(&str, Option<&str>)> = if qr.variation.as_deref() == Some("multiple") {
        qr.codes
            .iter()
            .filter_map(|c| Some((c.url.as_deref()?, c.label.as_deref())))
            .collect()
    } else {
        qr.url
            .as_deref()
            .map(|url| vec![(url, qr.label.as_deref())])
            .unwrap_or_default()
    };

    let figures = entries.into_iter().map(|(url, label)| {
        let src = format!(
            "https://api.qrserver.com/v1/create-qr-code/?size={s}x{s}&data={}&color={}&bgcolor={}",
            util::encode_component(url),
            fg,
            bg,
            s = size
        );
        let mut figure = VNode::element("figure")
            .with_style("margin", "0")
            .with_style("display", "inline-flex")
            .with_style("flex-direction", "column")
            .with_style("align-items", "center")
            .with_child(
                VNode::element("img")
                    .with_attr("src", src)
                    .with_attr("alt", label.unwrap_or("QR code"))
                    .with_attr("width", size.to_string())
                    .with_attr("height", size.to_string()),
            );
        if let Some(label) = label {
            figure = figure.with_child(text_el("figcaption", label).with_style("font-size", "14px"));
        }
        figure
    });

    BlockBody::new().with_child(
        VNode::element("div")
            .with_style("display", "flex")
            .with_style("flex-wrap", "wrap")
            .with_style("gap", "16px")
            .with_style("justify-content", block.style().align().as_flex())
            .with_children(figures),
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
    fn test_socials_skips_unknown_platforms() {
        let body = render_socials(
            &block(json!({
                "id": "s",
                "type": "socials",
                "socials": { "github": "github.com/x", "myspace": "myspace.com/x", "email": "me@x.dev" }
            })),
            &BlockContext::default(),
        );
        let container = &body.children[0];

        assert_eq!(container.children().len(), 2);
        assert_eq!(container.children()[0].attr("href"), Some("mailto:me@x.dev"));
        assert_eq!(container.children()[1].attr("href"), Some("https://github.com/x"));
    }

    #[test]
    fn test_socials_empty_list_still_renders() {
        let body = render_socials(&block(json!({ "id": "s", "type": "socials" })), &BlockContext::default());
        assert!(body.children[0].children().is_empty());
    }

    #[test]
    fn test_whatsapp_link() {
        let body = render_whatsapp(
            &block(json!({ "id": "w", "type": "whatsapp", "phone": "+55 (11) 9999-0000", "message": "Hi there" })),
            &BlockContext::default(),
        );
        let anchor = &body.children[0];

        assert_eq!(anchor.attr("href"), Some("https://wa.me/551199990000?text=Hi%20there"));
        assert_eq!(anchor.style("background-color"), Some("#25D366"));
    }

    #[test]
    fn test_qrcode_single() {
        let body = render_qrcode(
            &block(json!({ "id": "q", "type": "qrcode", "url": "https://x.dev", "label": "Scan" })),
            &BlockContext::default(),
        );
        let figure = &body.children[0].children()[0];
        let img = figure.find_tag("img").unwrap();

        assert!(img.attr("src").unwrap().contains("size=200x200"));
        assert!(img.attr("src").unwrap().contains("data=https%3A%2F%2Fx.dev"));
        assert_eq!(figure.find_tag("figcaption").unwrap().text_content(), "Scan");
    }

    #[test]
    fn test_qrcode_multiple() {
        let body = render_qrcode(
            &block(json!({
                "id": "q", "type": "qrcode", "variation": "multiple", "size": 120,
                "codes": [{ "url": "a.dev" }, { "label": "no url" }, { "url": "b.dev", "label": "B" }]
            })),
            &BlockContext::default(),
        );
        assert_eq!(body.children[0].children().len(), 2);
    }
}
