use super::BlockBody;
use crate::style::{number, px};
use crate::{BlockContext, VNode};
use portyo_model::{Block, BlockKind, ImageBlock};

fn filter(image: &ImageBlock) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(blur) = image.blur.filter(|v| *v > 0.0) {
        parts.push(format!("blur({})", px(blur)));
    }
    let percent = [
        ("brightness", image.brightness),
        ("contrast", image.contrast),
        ("grayscale", image.grayscale),
        ("saturate", image.saturation),
        ("sepia", image.sepia),
    ];
    for (name, value) in percent {
        if let Some(value) = value {
            parts.push(format!("{}({}%)", name, number(value)));
        }
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn dimension(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if v.chars().all(|c| c.is_ascii_digit() || c == '.') => format!("{}px", v),
        Some(v) => v.to_string(),
        None => fallback.to_string(),
    }
}

pub fn render_image(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Image(image) = block.kind() else {
        return BlockBody::new();
    };

    let Some(src) = image.source() else {
        return BlockBody::new().with_child(
            VNode::element("div")
                .with_attr("data-empty", "image")
                .with_style("min-height", "40px"),
        );
    };

    let mut img = VNode::element("img")
        .with_attr("src", src)
        .with_attr("alt", image.alt.as_deref().unwrap_or("Image"))
        .with_attr("loading", "lazy")
        .with_style("display", "inline-block")
        .with_style("max-width", "100%")
        .with_style("width", dimension(image.width.as_deref(), "100%"))
        .with_style("height", dimension(image.height.as_deref(), "auto"))
        .with_style("border-radius", px(image.border_radius.unwrap_or(12.0)))
        .with_style("object-fit", image.object_fit.as_deref().unwrap_or("cover"));

    if let Some(filter) = filter(image) {
        img = img.with_style("filter", filter);
    }
    if let Some(rotation) = image.rotation.filter(|r| *r != 0.0) {
        img = img.with_style("transform", format!("rotate({}deg)", number(rotation)));
    }

    BlockBody::new().with_child(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> BlockBody {
        render_image(&Block::from_value(value).unwrap(), &BlockContext::default())
    }

    #[test]
    fn test_image_defaults() {
        let body = render(json!({ "id": "i", "type": "image", "src": "/a.png" }));
        let img = &body.children[0];

        assert_eq!(img.attr("src"), Some("/a.png"));
        assert_eq!(img.attr("alt"), Some("Image"));
        assert_eq!(img.style("border-radius"), Some("12px"));
        assert_eq!(img.style("width"), Some("100%"));
        assert_eq!(img.style("filter"), None);
    }

    #[test]
    fn test_image_filters_and_size() {
        let body = render(json!({
            "id": "i", "type": "image", "url": "/b.png", "width": 320,
            "blur": 2, "grayscale": 100, "borderRadius": 0, "rotation": -5
        }));
        let img = &body.children[0];

        assert_eq!(img.style("width"), Some("320px"));
        assert_eq!(img.style("filter"), Some("blur(2px) grayscale(100%)"));
        assert_eq!(img.style("border-radius"), Some("0px"));
        assert_eq!(img.style("transform"), Some("rotate(-5deg)"));
    }

    #[test]
    fn test_missing_source_keeps_space() {
        let body = render(json!({ "id": "i", "type": "image" }));
        assert_eq!(body.children[0].attr("data-empty"), Some("image"));
    }
}
