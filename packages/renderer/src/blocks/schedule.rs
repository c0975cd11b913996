use super::{link, text_el, BlockBody};
use crate::{BlockContext, VNode};
use portyo_model::{Block, BlockKind};

pub fn render_event(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Event(event) = block.kind() else {
        return BlockBody::new();
    };

    let mut card = VNode::element("div")
        .with_style("background-color", event.bg_color.as_deref().unwrap_or("#111827"))
        .with_style("color", "#FFFFFF")
        .with_style("border-radius", "24px")
        .with_style("padding", "20px")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", "12px")
        .with_child(
            text_el("h3", event.title.as_deref().unwrap_or("Upcoming event"))
                .with_style("margin", "0"),
        );
    if let Some(date) = &event.date {
        // The countdown script reads the target from this attribute.
        card = card.with_child(
            VNode::element("time")
                .with_attr("datetime", date.as_str())
                .with_attr("data-countdown", date.as_str())
                .with_style("font-variant-numeric", "tabular-nums")
                .with_child(VNode::text(date.as_str())),
        );
    }
    if let Some(url) = &event.cta_url {
        card = card.with_child(
            link(url, ctx)
                .with_style("background-color", "#FFFFFF")
                .with_style("color", "#111827")
                .with_style("padding", "10px 20px")
                .with_style("border-radius", "9999px")
                .with_style("text-align", "center")
                .with_style("text-decoration", "none")
                .with_child(VNode::text(event.cta_label.as_deref().unwrap_or("Register"))),
        );
    }

    BlockBody::new().with_child(card)
}

pub fn render_tour(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Tour(tour) = block.kind() else {
        return BlockBody::new();
    };

    let rows = tour.entries().iter().map(|entry| {
        let sold_out = entry.sold_out.unwrap_or(false);
        let mut place = VNode::element("div")
            .with_style("flex", "1")
            .with_child(
                text_el("div", entry.location.as_deref().unwrap_or_default())
                    .with_style("font-weight", "700"),
            );
        if let Some(venue) = &entry.venue {
            place = place.with_child(
                text_el("div", venue.as_str())
                    .with_style("font-size", "13px")
                    .with_style("opacity", "0.7"),
            );
        }

        let action = if sold_out {
            text_el("span", "Sold out")
                .with_attr("data-sold-out", "true")
                .with_style("text-decoration", "line-through")
                .with_style("opacity", "0.6")
        } else {
            let mut tickets = link(entry.ticket_url.as_deref().unwrap_or_default(), ctx)
                .with_style("padding", "6px 14px")
                .with_style("border-radius", "9999px")
                .with_style("background-color", "#111827")
                .with_style("color", "#FFFFFF")
                .with_style("text-decoration", "none")
                .with_child(VNode::text("Tickets"));
            if entry.selling_fast.unwrap_or(false) {
                tickets = tickets.with_attr("data-selling-fast", "true");
            }
            tickets
        };

        VNode::element("li")
            .with_style("display", "flex")
            .with_style("align-items", "center")
            .with_style("gap", "12px")
            .with_style("padding", "12px 0")
            .with_style("border-bottom", "1px solid #E5E7EB")
            .with_child(
                text_el("span", entry.date.as_deref().unwrap_or_default())
                    .with_style("font-weight", "800")
                    .with_style("min-width", "64px"),
            )
            .with_child(place)
            .with_child(action)
    });

    BlockBody::new()
        .with_child(
            text_el("h3", tour.title.as_deref().unwrap_or("Tour dates"))
                .with_style("margin", "0 0 12px 0"),
        )
        .with_child(
            VNode::element("ul")
                .with_style("list-style", "none")
                .with_style("margin", "0")
                .with_style("padding", "0")
                .with_children(rows),
        )
}

pub fn render_calendar(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Calendar(calendar) = block.kind() else {
        return BlockBody::new();
    };

    let color = calendar.calendar_color.as_deref().unwrap_or("#ffffff");
    let accent = calendar.calendar_accent_color.as_deref().unwrap_or("#1f4d36");

    let mut card = VNode::element("div")
        .with_style("background-color", color)
        .with_style("border", format!("2px solid {}", accent))
        .with_style("border-radius", "24px")
        .with_style("padding", "20px")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", "12px")
        .with_child(
            text_el("h3", calendar.calendar_title.as_deref().unwrap_or("Book a Call"))
                .with_style("margin", "0")
                .with_style("color", accent),
        );
    if let Some(url) = &calendar.calendar_url {
        card = card.with_child(
            link(url, ctx)
                .with_style("background-color", accent)
                .with_style("color", "#FFFFFF")
                .with_style("padding", "12px 20px")
                .with_style("border-radius", "14px")
                .with_style("text-align", "center")
                .with_style("text-decoration", "none")
                .with_style("font-weight", "700")
                .with_child(VNode::text("Schedule")),
        );
    }

    BlockBody::new().with_child(card)
}
