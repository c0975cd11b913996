//! Starting field values for freshly created blocks.

use crate::{BlockType, Fields};
use serde_json::{json, Value};

/// Type-specific fields a new block of `ty` starts with.
pub(crate) fn default_fields(ty: BlockType) -> Fields {
    let value = match ty {
        BlockType::Button => json!({
            "title": "New link",
            "href": "",
            "buttonStyle": "solid",
            "buttonShape": "rounded"
        }),
        BlockType::Heading => json!({ "title": "Heading", "align": "center" }),
        BlockType::Text => json!({ "body": "Type your text here...", "align": "left" }),
        BlockType::Image => json!({ "url": "", "alt": "" }),
        BlockType::Socials => json!({ "layout": "row", "showLabel": false, "platforms": {} }),
        BlockType::Divider => json!({}),
        BlockType::Video => json!({ "url": "" }),
        BlockType::Youtube => json!({ "url": "", "variation": "single-video" }),
        BlockType::Spotify => json!({ "spotifyUrl": "" }),
        BlockType::Instagram => json!({ "instagramUsername": "" }),
        BlockType::Whatsapp => json!({ "phone": "", "message": "Hi! I'd like to talk to you." }),
        BlockType::Qrcode => json!({ "url": "" }),
        BlockType::Tour => json!({ "title": "Upcoming Shows", "tours": [] }),
        BlockType::Marketing => json!({ "marketingId": "" }),
        BlockType::Experience => json!({ "title": "Experience", "experiences": [] }),
        BlockType::ButtonGrid => json!({ "items": [] }),
        BlockType::Form => json!({ "formId": "" }),
        BlockType::Portfolio => json!({ "title": "Portfolio", "items": [] }),
        BlockType::Calendar => json!({ "calendarTitle": "Book a Call" }),
        BlockType::Map => json!({ "mapTitle": "Location" }),
        BlockType::Event => json!({ "title": "Event" }),
        BlockType::Featured => json!({ "title": "Featured" }),
        BlockType::Affiliate => json!({ "title": "Offer" }),
        BlockType::Blog => json!({}),
        BlockType::Product => json!({ "products": [] }),
    };

    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}
