use std::fmt;
use std::str::FromStr;

/// Loading tier of a block type's renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Available synchronously from startup.
    Eager,
    /// Loaded on first use, independently per type.
    Lazy,
}

/// Every block type the engine knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    Text,
    Heading,
    Button,
    Divider,
    Image,
    Socials,
    Video,
    Spotify,
    Youtube,
    Whatsapp,
    Qrcode,
    Map,
    Form,
    Portfolio,
    Experience,
    Tour,
    ButtonGrid,
    Featured,
    Event,
    Affiliate,
    Instagram,
    Blog,
    Product,
    Marketing,
    Calendar,
}

impl BlockType {
    pub const ALL: [BlockType; 25] = [
        BlockType::Text,
        BlockType::Heading,
        BlockType::Button,
        BlockType::Divider,
        BlockType::Image,
        BlockType::Socials,
        BlockType::Video,
        BlockType::Spotify,
        BlockType::Youtube,
        BlockType::Whatsapp,
        BlockType::Qrcode,
        BlockType::Map,
        BlockType::Form,
        BlockType::Portfolio,
        BlockType::Experience,
        BlockType::Tour,
        BlockType::ButtonGrid,
        BlockType::Featured,
        BlockType::Event,
        BlockType::Affiliate,
        BlockType::Instagram,
        BlockType::Blog,
        BlockType::Product,
        BlockType::Marketing,
        BlockType::Calendar,
    ];

    /// Wire name used in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Heading => "heading",
            BlockType::Button => "button",
            BlockType::Divider => "divider",
            BlockType::Image => "image",
            BlockType::Socials => "socials",
            BlockType::Video => "video",
            BlockType::Spotify => "spotify",
            BlockType::Youtube => "youtube",
            BlockType::Whatsapp => "whatsapp",
            BlockType::Qrcode => "qrcode",
            BlockType::Map => "map",
            BlockType::Form => "form",
            BlockType::Portfolio => "portfolio",
            BlockType::Experience => "experience",
            BlockType::Tour => "tour",
            BlockType::ButtonGrid => "button_grid",
            BlockType::Featured => "featured",
            BlockType::Event => "event",
            BlockType::Affiliate => "affiliate",
            BlockType::Instagram => "instagram",
            BlockType::Blog => "blog",
            BlockType::Product => "product",
            BlockType::Marketing => "marketing",
            BlockType::Calendar => "calendar",
        }
    }

    /// The eager tier holds the handful of types that appear on nearly every
    /// page; everything else is deferred.
    pub fn tier(&self) -> Tier {
        match self {
            BlockType::Text
            | BlockType::Heading
            | BlockType::Button
            | BlockType::Divider
            | BlockType::Image => Tier::Eager,
            BlockType::Socials
            | BlockType::Video
            | BlockType::Spotify
            | BlockType::Youtube
            | BlockType::Whatsapp
            | BlockType::Qrcode
            | BlockType::Map
            | BlockType::Form
            | BlockType::Portfolio
            | BlockType::Experience
            | BlockType::Tour
            | BlockType::ButtonGrid
            | BlockType::Featured
            | BlockType::Event
            | BlockType::Affiliate
            | BlockType::Instagram
            | BlockType::Blog
            | BlockType::Product
            | BlockType::Marketing
            | BlockType::Calendar => Tier::Lazy,
        }
    }

    pub fn lazy_types() -> impl Iterator<Item = BlockType> {
        Self::ALL.into_iter().filter(|ty| ty.tier() == Tier::Lazy)
    }
}

impl FromStr for BlockType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
