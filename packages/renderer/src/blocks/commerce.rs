use super::{link, text_el, BlockBody};
use crate::{BlockContext, RenderMode, VNode};
use portyo_model::{Block, BlockKind};

const DEFAULT_CARD_BACKGROUND: &str = "#1f4d36";
const DEFAULT_ACCENT: &str = "#111827";

fn cover(src: &str, alt: &str) -> VNode {
    VNode::element("img")
        .with_attr("src", src)
        .with_attr("alt", alt)
        .with_attr("loading", "lazy")
        .with_style("width", "100%")
        .with_style("aspect-ratio", "1")
        .with_style("object-fit", "cover")
        .with_style("border-radius", "16px")
}

fn card(background: &str) -> VNode {
    VNode::element("div")
        .with_style("background-color", background)
        .with_style("color", "#FFFFFF")
        .with_style("border-radius", "24px")
        .with_style("padding", "16px")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", "12px")
}

pub fn render_featured(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Featured(featured) = block.kind() else {
        return BlockBody::new();
    };

    let title = featured.title.as_deref().unwrap_or("Featured product");
    let mut node = card(featured.bg_color.as_deref().unwrap_or(DEFAULT_CARD_BACKGROUND));
    if let Some(product_id) = &featured.product_id {
        node = node.with_attr("data-product-id", product_id.as_str());
    }
    if let Some(image) = &featured.image {
        node = node.with_child(cover(image, title));
    }
    node = node.with_child(text_el("h3", title).with_style("margin", "0"));
    if let Some(price) = &featured.price {
        node = node.with_child(text_el("span", price.as_str()).with_style("font-weight", "700"));
    }
    node = node.with_child(
        link(featured.url.as_deref().unwrap_or_default(), ctx)
            .with_style("padding", "10px 20px")
            .with_style("border-radius", "9999px")
            .with_style("background-color", "#FFFFFF")
            .with_style("color", "#111827")
            .with_style("text-align", "center")
            .with_style("text-decoration", "none")
            .with_child(VNode::text("Buy now")),
    );

    BlockBody::new().with_child(node)
}

pub fn render_affiliate(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Affiliate(affiliate) = block.kind() else {
        return BlockBody::new();
    };

    let title = affiliate.title.as_deref().unwrap_or("Special offer");
    let mut node = card(affiliate.bg_color.as_deref().unwrap_or(DEFAULT_CARD_BACKGROUND));
    if let Some(image) = &affiliate.image {
        node = node.with_child(cover(image, title));
    }
    node = node.with_child(text_el("h3", title).with_style("margin", "0"));

    if let Some(code) = affiliate.coupon() {
        node = node.with_child(
            VNode::element("div")
                .with_attr("data-coupon", code)
                .with_style("border", "2px dashed rgba(255,255,255,0.6)")
                .with_style("border-radius", "12px")
                .with_style("padding", "8px 12px")
                .with_style("font-family", "monospace")
                .with_style("letter-spacing", "2px")
                .with_style("text-align", "center")
                .with_child(VNode::text(code)),
        );
    }
    if let Some(url) = &affiliate.url {
        node = node.with_child(
            link(url, ctx)
                .with_style("color", "inherit")
                .with_style("text-align", "center")
                .with_child(VNode::text("Get the deal")),
        );
    }

    BlockBody::new().with_child(node)
}

pub fn render_product(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Product(product) = block.kind() else {
        return BlockBody::new();
    };

    let accent = product.product_accent_color.as_deref().unwrap_or(DEFAULT_ACCENT);
    let button_text = product.product_button_text.as_deref().unwrap_or("View product");
    let layout = product.product_layout.as_deref().unwrap_or("grid");

    let items = product.products.iter().map(|item| {
        let title = item.title.as_deref().unwrap_or_default();
        let mut tile = VNode::element("div")
            .with_style("display", "flex")
            .with_style("flex-direction", "column")
            .with_style("gap", "8px")
            .with_style("padding", "12px")
            .with_style("border-radius", "16px")
            .with_style("background-color", "#FFFFFF");
        if let Some(id) = &item.id {
            tile = tile.with_key(id.as_str()).with_attr("data-product-id", id.as_str());
        }
        if let Some(image) = &item.image {
            tile = tile.with_child(cover(image, title));
        }
        tile = tile.with_child(text_el("span", title).with_style("font-weight", "600"));
        if let Some(price) = &item.price {
            tile = tile.with_child(text_el("span", price.as_str()).with_style("color", accent));
        }
        tile.with_child(
            link(item.url.as_deref().unwrap_or_default(), ctx)
                .with_style("background-color", accent)
                .with_style("color", "#FFFFFF")
                .with_style("padding", "8px 12px")
                .with_style("border-radius", "10px")
                .with_style("text-align", "center")
                .with_style("text-decoration", "none")
                .with_child(VNode::text(button_text)),
        )
    });

    let container = match layout {
        "list" => VNode::element("div")
            .with_style("display", "flex")
            .with_style("flex-direction", "column")
            .with_style("gap", "12px"),
        "carousel" => VNode::element("div")
            .with_style("display", "flex")
            .with_style("gap", "12px")
            .with_style("overflow-x", "auto"),
        _ => VNode::element("div")
            .with_style("display", "grid")
            .with_style("grid-template-columns", "repeat(2, 1fr)")
            .with_style("gap", "12px"),
    };

    BlockBody::new().with_child(
        container
            .with_attr("data-product-layout", layout)
            .with_children(items),
    )
}

pub fn render_marketing(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Marketing(marketing) = block.kind() else {
        return BlockBody::new();
    };

    // Sponsored slots are filled at view time; preview only shows where the
    // slot will land.
    let mut slot = VNode::element("div")
        .with_attr("data-marketing-slot", marketing.marketing_id.as_deref().unwrap_or_default())
        .with_style("min-height", "80px")
        .with_style("border-radius", "16px");
    if ctx.mode == RenderMode::Preview {
        slot = slot
            .with_style("border", "1px dashed #D1D5DB")
            .with_child(text_el("span", "Sponsored slot").with_style("color", "#9CA3AF"));
    }
    BlockBody::new().with_child(slot)
}
