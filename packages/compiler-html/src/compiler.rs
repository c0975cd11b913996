use portyo_model::{Bio, User};
use portyo_renderer::VNode;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttribute { tag: String, name: String },

    #[error("Comment contains a terminator: {0:?}")]
    UnterminatedComment(String),
}

const HOVER_SCRIPT: &str = "document.querySelectorAll('[data-hover-animation]').forEach(function (el) { \
el.addEventListener('mouseenter', function () { el.style.animation = el.dataset.hoverAnimation; }); \
el.addEventListener('animationend', function () { el.style.animation = ''; }); });";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Emit `style` attributes
    pub inline_styles: bool,
    /// Emit `@keyframes` for the animations the page uses
    pub keyframes: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit the hover-animation script when a block needs it
    pub scripts: bool,
    /// Document title; derived from the user or bio when unset
    pub title: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            keyframes: true,
            pretty: true,
            indent: "  ".to_string(),
            scripts: true,
            title: None,
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered block list into a standalone HTML page for `bio`.
pub fn compile_to_html(
    nodes: &[Arc<VNode>],
    bio: &Bio,
    user: Option<&User>,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(nodes, bio, user, &mut ctx);

    ctx.add_line(&format!(
        "<body style=\"{}\">",
        escape_html(&style_string(&page_background(bio)))
    ));
    ctx.indent();

    ctx.add_line(&format!(
        "<main class=\"bio-page\" data-bio-id=\"{}\">",
        escape_html(bio.id())
    ));
    ctx.indent();

    compile_header(bio, &mut ctx);
    for node in nodes {
        compile_node(node, &mut ctx)?;
    }

    ctx.dedent();
    ctx.add_line("</main>");

    if ctx.options.scripts && nodes.iter().any(|n| has_hover_animation(n)) {
        ctx.add_line(&format!("<script>{}</script>", HOVER_SCRIPT));
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

/// Compile a single node tree without the page shell.
pub fn compile_fragment(node: &VNode, options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx)?;
    Ok(ctx.get_output())
}

fn compile_head(nodes: &[Arc<VNode>], bio: &Bio, user: Option<&User>, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = page_title(bio, user, ctx.options.title.as_deref());
    ctx.add_line(&format!("<title>{}</title>", escape_html(&title)));

    let font = bio.design().font.as_deref().unwrap_or("Inter");
    let mut css = vec![
        format!(
            "body {{ margin: 0; font-family: '{}', system-ui, sans-serif; }}",
            font.replace('\'', "")
        ),
        ".bio-page { max-width: 640px; margin: 0 auto; padding: 32px 16px; }".to_string(),
        ".bio-block { box-sizing: border-box; }".to_string(),
    ];
    if ctx.options.keyframes {
        css.extend(used_keyframes(nodes));
    }

    ctx.add_line("<style>");
    ctx.indent();
    for rule in css {
        ctx.add_line(&rule);
    }
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_header(bio: &Bio, ctx: &mut Context) {
    let design = bio.design();
    let Some(sufix) = design.sufix.as_deref() else {
        return;
    };
    let color = design.username_color.as_deref().unwrap_or("#111827");
    ctx.add_line(&format!(
        "<header class=\"bio-header\" style=\"text-align: center; color: {}\"><h1>@{}</h1></header>",
        escape_html(color),
        escape_html(sufix)
    ));
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            key: _,
        } => compile_tag(tag, attributes, styles, children, ctx),

        VNode::Text { content } => {
            ctx.add(&escape_html(content));
            Ok(())
        }

        VNode::Comment { content } => {
            if content.contains("-->") {
                return Err(CompileError::UnterminatedComment(content.clone()));
            }
            ctx.add_line(&format!("<!-- {} -->", content));
            Ok(())
        }
    }
}

fn compile_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(name) {
        return Err(CompileError::InvalidTag(name.to_string()));
    }

    // Opening tag
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", name));

    for (attr_name, value) in attributes {
        if !is_valid_name(attr_name) {
            return Err(CompileError::InvalidAttribute {
                tag: name.to_string(),
                name: attr_name.clone(),
            });
        }
        ctx.add(&format!(" {}=\"{}\"", attr_name, escape_html(value)));
    }

    if ctx.options.inline_styles && !styles.is_empty() {
        ctx.add(&format!(" style=\"{}\"", escape_html(&style_string(styles))));
    }

    // Void elements
    if children.is_empty() && is_self_closing(name) {
        ctx.add(" />");
        ctx.newline();
        return Ok(());
    }

    ctx.add(">");

    let block_children = has_element_children(children);
    if !children.is_empty() {
        if block_children {
            ctx.newline();
        }
        ctx.indent();

        for child in children {
            compile_node(child, ctx)?;
        }

        ctx.dedent();
        if ctx.options.pretty && block_children {
            ctx.add_indent();
        }
    }

    // Closing tag
    ctx.add(&format!("</{}>", name));
    ctx.newline();

    Ok(())
}

fn page_title(bio: &Bio, user: Option<&User>, explicit: Option<&str>) -> String {
    if let Some(title) = explicit {
        return title.to_string();
    }
    user.and_then(|u| u.fullname.clone())
        .or_else(|| bio.design().sufix.as_ref().map(|s| format!("@{}", s)))
        .or_else(|| user.and_then(|u| u.username.clone()))
        .unwrap_or_else(|| "Bio".to_string())
}

/// Body background derived from the bio's `bgType`.
fn page_background(bio: &Bio) -> BTreeMap<String, String> {
    let design = bio.design();
    let color = design.bg_color.as_deref().unwrap_or("#ffffff");
    let mut styles = BTreeMap::new();

    match design.bg_type.as_deref() {
        Some("gradient") => {
            let secondary = design.bg_secondary_color.as_deref().unwrap_or("#000000");
            styles.insert(
                "background".to_string(),
                format!("linear-gradient(135deg, {}, {})", color, secondary),
            );
        }
        Some("image") | Some("video") if design.bg_image.is_some() => {
            let image = design.bg_image.as_deref().unwrap_or_default();
            styles.insert("background-color".to_string(), color.to_string());
            styles.insert("background-image".to_string(), format!("url('{}')", image));
            styles.insert("background-size".to_string(), "cover".to_string());
            styles.insert("background-position".to_string(), "center".to_string());
        }
        _ => {
            styles.insert("background-color".to_string(), color.to_string());
        }
    }
    styles.insert("min-height".to_string(), "100vh".to_string());
    styles
}

/// Keyframe rules for every animation name referenced by the tree.
fn used_keyframes(nodes: &[Arc<VNode>]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for node in nodes {
        collect_animation_names(node, &mut names);
    }
    names
        .into_iter()
        .filter_map(|name| keyframes(&name).map(|body| format!("@keyframes {} {{ {} }}", name, body)))
        .collect()
}

fn has_hover_animation(node: &VNode) -> bool {
    match node {
        VNode::Element {
            attributes,
            children,
            ..
        } => attributes.contains_key("data-hover-animation") || children.iter().any(has_hover_animation),
        _ => false,
    }
}

fn collect_animation_names(node: &VNode, names: &mut BTreeSet<String>) {
    let VNode::Element {
        attributes,
        styles,
        children,
        ..
    } = node
    else {
        return;
    };

    let declarations = styles
        .get("animation")
        .into_iter()
        .chain(attributes.get("data-hover-animation"));
    for value in declarations {
        for declaration in value.split(',') {
            if let Some(name) = declaration.split_whitespace().next() {
                names.insert(name.to_string());
            }
        }
    }
    for child in children {
        collect_animation_names(child, names);
    }
}

fn keyframes(name: &str) -> Option<&'static str> {
    Some(match name {
        "bounce" => "0%, 100% { transform: translateY(0); } 50% { transform: translateY(-8px); }",
        "pulse" => "0%, 100% { opacity: 1; } 50% { opacity: 0.6; }",
        "shake" => "0%, 100% { transform: translateX(0); } 25% { transform: translateX(-4px); } 75% { transform: translateX(4px); }",
        "wobble" => "0%, 100% { transform: rotate(0); } 25% { transform: rotate(-3deg); } 75% { transform: rotate(3deg); }",
        "fadeIn" => "from { opacity: 0; } to { opacity: 1; }",
        "fadeInUp" => "from { opacity: 0; transform: translateY(16px); } to { opacity: 1; transform: none; }",
        "fadeInDown" => "from { opacity: 0; transform: translateY(-16px); } to { opacity: 1; transform: none; }",
        "slideInLeft" => "from { opacity: 0; transform: translateX(-24px); } to { opacity: 1; transform: none; }",
        "slideInRight" => "from { opacity: 0; transform: translateX(24px); } to { opacity: 1; transform: none; }",
        "zoomIn" => "from { opacity: 0; transform: scale(0.9); } to { opacity: 1; transform: none; }",
        _ => return None,
    })
}

fn style_string(styles: &BTreeMap<String, String>) -> String {
    styles
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
