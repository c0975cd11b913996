//! Typed views of each block type's own fields.
//!
//! Each struct carries only the fields its renderer reads. Several types
//! accept more than one wire name for the same concept (`url` or `src` on an
//! image, `items` or `buttons` on a button grid); the accessor methods pick
//! whichever is present.

use crate::{lenient, BlockType, Fields};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Decoded type-specific fields of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Text(TextBlock),
    Heading(HeadingBlock),
    Button(ButtonBlock),
    Divider(DividerBlock),
    Image(ImageBlock),
    Socials(SocialsBlock),
    Video(VideoBlock),
    Spotify(SpotifyBlock),
    Youtube(YoutubeBlock),
    Whatsapp(WhatsappBlock),
    Qrcode(QrcodeBlock),
    Map(MapBlock),
    Form(FormBlock),
    Portfolio(PortfolioBlock),
    Experience(ExperienceBlock),
    Tour(TourBlock),
    ButtonGrid(ButtonGridBlock),
    Featured(FeaturedBlock),
    Event(EventBlock),
    Affiliate(AffiliateBlock),
    Instagram(InstagramBlock),
    Blog(BlogBlock),
    Product(ProductBlock),
    Marketing(MarketingBlock),
    Calendar(CalendarBlock),
    /// A `type` the engine does not know. Its fields stay on the block.
    Unrecognized(String),
}

impl BlockKind {
    /// Decode the fields of a block whose discriminator is `type_name`.
    pub fn decode(type_name: &str, fields: &Fields) -> Self {
        let Ok(ty) = type_name.parse::<BlockType>() else {
            return BlockKind::Unrecognized(type_name.to_string());
        };

        match ty {
            BlockType::Text => BlockKind::Text(view(fields)),
            BlockType::Heading => BlockKind::Heading(view(fields)),
            BlockType::Button => BlockKind::Button(view(fields)),
            BlockType::Divider => BlockKind::Divider(view(fields)),
            BlockType::Image => BlockKind::Image(view(fields)),
            BlockType::Socials => BlockKind::Socials(view(fields)),
            BlockType::Video => BlockKind::Video(view(fields)),
            BlockType::Spotify => BlockKind::Spotify(view(fields)),
            BlockType::Youtube => BlockKind::Youtube(view(fields)),
            BlockType::Whatsapp => BlockKind::Whatsapp(view(fields)),
            BlockType::Qrcode => BlockKind::Qrcode(view(fields)),
            BlockType::Map => BlockKind::Map(view(fields)),
            BlockType::Form => BlockKind::Form(view(fields)),
            BlockType::Portfolio => BlockKind::Portfolio(view(fields)),
            BlockType::Experience => BlockKind::Experience(view(fields)),
            BlockType::Tour => BlockKind::Tour(view(fields)),
            BlockType::ButtonGrid => BlockKind::ButtonGrid(view(fields)),
            BlockType::Featured => BlockKind::Featured(view(fields)),
            BlockType::Event => BlockKind::Event(view(fields)),
            BlockType::Affiliate => BlockKind::Affiliate(view(fields)),
            BlockType::Instagram => BlockKind::Instagram(view(fields)),
            BlockType::Blog => BlockKind::Blog(view(fields)),
            BlockType::Product => BlockKind::Product(view(fields)),
            BlockType::Marketing => BlockKind::Marketing(view(fields)),
            BlockType::Calendar => BlockKind::Calendar(view(fields)),
        }
    }

    /// `None` for [`BlockKind::Unrecognized`].
    pub fn block_type(&self) -> Option<BlockType> {
        Some(match self {
            BlockKind::Text(_) => BlockType::Text,
            BlockKind::Heading(_) => BlockType::Heading,
            BlockKind::Button(_) => BlockType::Button,
            BlockKind::Divider(_) => BlockType::Divider,
            BlockKind::Image(_) => BlockType::Image,
            BlockKind::Socials(_) => BlockType::Socials,
            BlockKind::Video(_) => BlockType::Video,
            BlockKind::Spotify(_) => BlockType::Spotify,
            BlockKind::Youtube(_) => BlockType::Youtube,
            BlockKind::Whatsapp(_) => BlockType::Whatsapp,
            BlockKind::Qrcode(_) => BlockType::Qrcode,
            BlockKind::Map(_) => BlockType::Map,
            BlockKind::Form(_) => BlockType::Form,
            BlockKind::Portfolio(_) => BlockType::Portfolio,
            BlockKind::Experience(_) => BlockType::Experience,
            BlockKind::Tour(_) => BlockType::Tour,
            BlockKind::ButtonGrid(_) => BlockType::ButtonGrid,
            BlockKind::Featured(_) => BlockType::Featured,
            BlockKind::Event(_) => BlockType::Event,
            BlockKind::Affiliate(_) => BlockType::Affiliate,
            BlockKind::Instagram(_) => BlockType::Instagram,
            BlockKind::Blog(_) => BlockType::Blog,
            BlockKind::Product(_) => BlockType::Product,
            BlockKind::Marketing(_) => BlockType::Marketing,
            BlockKind::Calendar(_) => BlockType::Calendar,
            BlockKind::Unrecognized(_) => return None,
        })
    }
}

// Every field is lenient, so decoding a JSON object cannot fail; the default
// is only reached if a custom decoder ever starts rejecting input.
fn view<T: DeserializeOwned + Default>(fields: &Fields) -> T {
    serde_json::from_value(serde_json::Value::Object(fields.clone())).unwrap_or_default()
}

fn first<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates.iter().find_map(|c| c.as_deref())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub body: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub href: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub accent: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_style: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_shape: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_shadow: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_shadow_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub nsfw: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_nsfw: Option<bool>,
}

impl ButtonBlock {
    pub fn label(&self) -> Option<&str> {
        first(&[&self.title, &self.label, &self.content])
    }

    pub fn link(&self) -> Option<&str> {
        first(&[&self.href, &self.url])
    }

    pub fn is_nsfw(&self) -> bool {
        self.nsfw.or(self.is_nsfw).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub divider_style: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub thickness: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub src: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub alt: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub width: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub height: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub border_radius: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub object_fit: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub blur: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub brightness: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub contrast: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub grayscale: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub saturation: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub sepia: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub rotation: Option<f64>,
}

impl ImageBlock {
    pub fn source(&self) -> Option<&str> {
        first(&[&self.url, &self.src])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialsBlock {
    #[serde(deserialize_with = "lenient::string_map")]
    pub platforms: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub socials: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient::string")]
    pub variation: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub layout: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub show_label: Option<bool>,
    #[serde(deserialize_with = "lenient::number")]
    pub icon_size: Option<f64>,
}

impl SocialsBlock {
    pub fn links(&self) -> &BTreeMap<String, String> {
        if self.platforms.is_empty() {
            &self.socials
        } else {
            &self.platforms
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub media_url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
}

impl VideoBlock {
    pub fn source(&self) -> Option<&str> {
        first(&[&self.url, &self.media_url])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotifyBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub spotify_url: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub spotify_compact: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YoutubeBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub variation: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub display_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub channel_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatsappBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub variation: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub whatsapp_style: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub whatsapp_shape: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub accent_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub accent: Option<String>,
}

impl WhatsappBlock {
    pub fn accent(&self) -> Option<&str> {
        first(&[&self.accent_color, &self.accent])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QrCode {
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrcodeBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub size: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub variation: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub codes: Vec<QrCode>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub fg_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub map_title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub map_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub form_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortfolioItem {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub items: Vec<PortfolioItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub period: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourDate {
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub venue: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub ticket_url: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub sold_out: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub selling_fast: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub dates: Vec<TourDate>,
    #[serde(deserialize_with = "lenient::items")]
    pub tours: Vec<TourDate>,
}

impl TourBlock {
    pub fn entries(&self) -> &[TourDate] {
        if self.dates.is_empty() {
            &self.tours
        } else {
            &self.dates
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridItem {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonGridBlock {
    #[serde(deserialize_with = "lenient::items")]
    pub items: Vec<GridItem>,
    #[serde(deserialize_with = "lenient::items")]
    pub buttons: Vec<GridItem>,
}

impl ButtonGridBlock {
    pub fn entries(&self) -> &[GridItem] {
        if self.items.is_empty() {
            &self.buttons
        } else {
            &self.items
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub price: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub cta_label: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub cta_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AffiliateBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub coupon_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_color: Option<String>,
}

impl AffiliateBlock {
    pub fn coupon(&self) -> Option<&str> {
        first(&[&self.coupon_code, &self.code])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstagramBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub instagram_username: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub instagram_display_type: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub instagram_show_text: Option<bool>,
    #[serde(deserialize_with = "lenient::string")]
    pub instagram_text_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogBlock {
    #[serde(deserialize_with = "lenient::number")]
    pub blog_post_count: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub blog_layout: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub blog_background_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub blog_title_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductItem {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub price: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductBlock {
    #[serde(deserialize_with = "lenient::items")]
    pub products: Vec<ProductItem>,
    #[serde(deserialize_with = "lenient::string")]
    pub product_layout: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub product_button_text: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub product_accent_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketingBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub marketing_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarBlock {
    #[serde(deserialize_with = "lenient::string")]
    pub calendar_title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub calendar_url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub calendar_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub calendar_accent_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_decode_known_type() {
        let kind = BlockKind::decode(
            "button",
            &fields(json!({ "label": "Shop", "url": "shop.example", "isNsfw": true })),
        );

        let BlockKind::Button(button) = &kind else {
            panic!("expected button, got {:?}", kind);
        };
        assert_eq!(button.label(), Some("Shop"));
        assert_eq!(button.link(), Some("shop.example"));
        assert!(button.is_nsfw());
        assert_eq!(kind.block_type(), Some(BlockType::Button));
    }

    #[test]
    fn test_decode_unknown_type() {
        let kind = BlockKind::decode("not-a-real-type", &fields(json!({ "x": 1 })));
        assert_eq!(kind, BlockKind::Unrecognized("not-a-real-type".to_string()));
        assert_eq!(kind.block_type(), None);
    }

    #[test]
    fn test_decode_with_malformed_fields() {
        let kind = BlockKind::decode(
            "tour",
            &fields(json!({
                "title": ["nope"],
                "tours": [{ "location": "Lisbon", "soldOut": "true" }, "garbage"]
            })),
        );

        let BlockKind::Tour(tour) = kind else {
            panic!("expected tour");
        };
        assert!(tour.title.is_none());
        assert_eq!(tour.entries().len(), 1);
        assert_eq!(tour.entries()[0].location.as_deref(), Some("Lisbon"));
        assert_eq!(tour.entries()[0].sold_out, Some(true));
    }

    #[test]
    fn test_socials_prefers_platforms() {
        let kind = BlockKind::decode(
            "socials",
            &fields(json!({
                "platforms": { "github": "https://github.com/x" },
                "socials": { "twitter": "https://twitter.com/x" }
            })),
        );

        let BlockKind::Socials(socials) = kind else {
            panic!("expected socials");
        };
        assert_eq!(socials.links().len(), 1);
        assert!(socials.links().contains_key("github"));
    }
}
