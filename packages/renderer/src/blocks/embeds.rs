use super::{link, text_el, util, BlockBody};
use crate::{BlockContext, VNode};
use portyo_model::{Block, BlockKind};

fn responsive_frame(src: String, title: &str) -> VNode {
    VNode::element("div")
        .with_style("position", "relative")
        .with_style("padding-bottom", "56.25%")
        .with_style("height", "0")
        .with_style("overflow", "hidden")
        .with_style("border-radius", "18px")
        .with_child(
            VNode::element("iframe")
                .with_attr("src", src)
                .with_attr("title", title)
                .with_attr("loading", "lazy")
                .with_attr("allowfullscreen", "true")
                .with_style("position", "absolute")
                .with_style("inset", "0")
                .with_style("width", "100%")
                .with_style("height", "100%")
                .with_style("border", "0"),
        )
}

fn unavailable(what: &str) -> VNode {
    VNode::element("div")
        .with_attr("data-empty", what)
        .with_style("min-height", "40px")
}

pub fn render_video(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Video(video) = block.kind() else {
        return BlockBody::new();
    };

    let title = video.title.as_deref().unwrap_or("Video");
    let child = match video.source().and_then(util::extract_youtube_id) {
        Some(id) => responsive_frame(format!("https://www.youtube.com/embed/{}", id), title),
        None => unavailable("video"),
    };
    BlockBody::new().with_child(child)
}

pub fn render_youtube(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Youtube(youtube) = block.kind() else {
        return BlockBody::new();
    };
    let url = youtube.url.as_deref().unwrap_or_default();

    if youtube.variation.as_deref() == Some("single-video") {
        let child = match util::extract_youtube_id(url) {
            Some(id) => responsive_frame(format!("https://www.youtube.com/embed/{}", id), "YouTube video"),
            None => unavailable("youtube"),
        };
        return BlockBody::new().with_child(child);
    }

    // Channel feeds are fetched client-side; the snapshot carries the mount
    // point and a link to the channel.
    let mut mount = VNode::element("div")
        .with_attr("data-youtube-feed", url)
        .with_attr(
            "data-display",
            youtube.display_type.as_deref().unwrap_or("grid"),
        );
    if !url.is_empty() {
        mount = mount.with_child(
            link(url, ctx).with_child(VNode::text(
                youtube.channel_text.as_deref().unwrap_or("Watch on YouTube"),
            )),
        );
    }
    BlockBody::new().with_child(mount)
}

pub fn render_spotify(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Spotify(spotify) = block.kind() else {
        return BlockBody::new();
    };

    let child = match spotify.spotify_url.as_deref().and_then(util::spotify_embed_url) {
        Some(src) => {
            let height = if spotify.spotify_compact.unwrap_or(false) { "80" } else { "152" };
            VNode::element("iframe")
                .with_attr("src", src)
                .with_attr("width", "100%")
                .with_attr("height", height)
                .with_attr("loading", "lazy")
                .with_attr(
                    "allow",
                    "autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture",
                )
                .with_style("border", "0")
                .with_style("border-radius", "12px")
        }
        None => unavailable("spotify"),
    };
    BlockBody::new().with_style("padding", "16px 0").with_child(child)
}

pub fn render_map(block: &Block, _ctx: &BlockContext) -> BlockBody {
    let BlockKind::Map(map) = block.kind() else {
        return BlockBody::new();
    };

    let title = map.map_title.as_deref().unwrap_or("Our Office");
    let address = map.map_address.as_deref().unwrap_or("123 Main St, City");
    let src = format!(
        "https://maps.google.com/maps?q={}&t=m&z=15&output=embed&iwloc=near",
        util::encode_component(address)
    );

    let card = VNode::element("div")
        .with_style("position", "absolute")
        .with_style("bottom", "16px")
        .with_style("left", "16px")
        .with_style("padding", "12px 16px")
        .with_style("border-radius", "16px")
        .with_style("background", "rgba(255,255,255,0.95)")
        .with_child(text_el("h3", title).with_style("margin", "0").with_style("font-size", "14px"))
        .with_child(
            text_el("p", address)
                .with_style("margin", "2px 0 0")
                .with_style("font-size", "12px")
                .with_style("color", "#6b7280"),
        );

    let frame = VNode::element("div")
        .with_style("position", "relative")
        .with_style("height", "200px")
        .with_style("border-radius", "24px")
        .with_style("overflow", "hidden")
        .with_child(
            VNode::element("iframe")
                .with_attr("src", src)
                .with_attr("title", title)
                .with_attr("loading", "lazy")
                .with_attr("width", "100%")
                .with_attr("height", "100%")
                .with_style("border", "0"),
        )
        .with_child(card);

    BlockBody::new().with_style("padding", "16px 0").with_child(frame)
}

pub fn render_instagram(block: &Block, ctx: &BlockContext) -> BlockBody {
    let BlockKind::Instagram(instagram) = block.kind() else {
        return BlockBody::new();
    };

    let username = instagram
        .instagram_username
        .as_deref()
        .unwrap_or("instagram")
        .trim_start_matches('@');
    let profile = format!("https://instagram.com/{}", username);

    // The feed itself is an external integration that hydrates this node.
    let mut mount = VNode::element("div")
        .with_attr("data-instagram-feed", username)
        .with_attr(
            "data-display",
            instagram.instagram_display_type.as_deref().unwrap_or("grid"),
        );
    if instagram.instagram_show_text.unwrap_or(true) {
        mount = mount.with_child(
            link(&profile, ctx)
                .with_style(
                    "color",
                    instagram.instagram_text_color.as_deref().unwrap_or("#0095f6"),
                )
                .with_style("font-weight", "600")
                .with_child(VNode::text(format!("@{}", username))),
        );
    }
    BlockBody::new().with_style("padding", "16px 0").with_child(mount)
}
