//! Per-type block renderers.
//!
//! A renderer turns one block into a [`BlockBody`]: the inner markup plus any
//! inline overrides for the outer wrapper. The pipeline owns the wrapper
//! itself (identity attributes, composed styles), so renderers never see or
//! emit the common style fields.
//!
//! Renderers resolve missing fields through per-field defaults and the
//! [`BlockContext`]; a registered type always yields a body, even when its
//! content list is empty.

mod basic;
mod button;
mod commerce;
mod embeds;
mod image;
mod profile;
mod schedule;
mod social;
pub mod util;

use crate::{BlockContext, VNode};
use portyo_model::{Block, BlockType};
use std::collections::BTreeMap;

/// Signature shared by every block renderer.
pub type RenderFn = fn(&Block, &BlockContext) -> BlockBody;

/// Output of a renderer, wrapped by the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockBody {
    /// Wrapper tag; `section` when unset.
    pub tag: Option<&'static str>,
    /// Extra class appended to the wrapper's class list.
    pub class: Option<String>,
    pub attributes: BTreeMap<String, String>,
    /// Inline overrides merged over the wrapper's base layout.
    pub style: BTreeMap<String, String>,
    pub children: Vec<VNode>,
}

impl BlockBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Renderer for a block type. Tier placement is the registry's concern;
/// this table only answers "which function draws this type".
pub fn renderer_for(ty: BlockType) -> RenderFn {
    match ty {
        BlockType::Text => basic::render_text,
        BlockType::Heading => basic::render_heading,
        BlockType::Divider => basic::render_divider,
        BlockType::Button => button::render_button,
        BlockType::Image => image::render_image,
        BlockType::Socials => social::render_socials,
        BlockType::Whatsapp => social::render_whatsapp,
        BlockType::Qrcode => social::render_qrcode,
        BlockType::Video => embeds::render_video,
        BlockType::Youtube => embeds::render_youtube,
        BlockType::Spotify => embeds::render_spotify,
        BlockType::Map => embeds::render_map,
        BlockType::Instagram => embeds::render_instagram,
        BlockType::Form => profile::render_form,
        BlockType::Portfolio => profile::render_portfolio,
        BlockType::Experience => profile::render_experience,
        BlockType::ButtonGrid => profile::render_button_grid,
        BlockType::Blog => profile::render_blog,
        BlockType::Featured => commerce::render_featured,
        BlockType::Affiliate => commerce::render_affiliate,
        BlockType::Product => commerce::render_product,
        BlockType::Marketing => commerce::render_marketing,
        BlockType::Event => schedule::render_event,
        BlockType::Tour => schedule::render_tour,
        BlockType::Calendar => schedule::render_calendar,
    }
}

/// Anchor opening in a new tab. In preview mode the link is inert.
pub(crate) fn link(href: &str, ctx: &BlockContext) -> VNode {
    let node = VNode::element("a").with_attr("href", util::normalize_url(href));
    match ctx.mode {
        crate::RenderMode::Public => node
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener noreferrer"),
        crate::RenderMode::Preview => node.with_attr("data-preview", "true"),
    }
}

pub(crate) fn text_el(tag: &str, content: impl Into<String>) -> VNode {
    VNode::element(tag).with_child(VNode::text(content))
}
