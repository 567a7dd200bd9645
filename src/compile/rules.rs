//! One render rule per block type.
//!
//! Every rule is total: any combination of present and absent attributes
//! yields a fragment. Rules return `None` only for blocks that are meant to
//! disappear (unknown types, hidden sponsored links, columns nested too deep).

use super::RenderTarget;
use super::html::{Element, normalize_url, social_url};
use super::shell::layout_table;
use crate::model::*;

/// Deepest `columns` nesting that still renders.
const MAX_NESTING: usize = 4;
/// Widest row a configured column count can ask for. Stored columns past
/// this still render; only empty padding cells are bounded.
const MAX_COLUMNS: usize = 12;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x200";
const PLACEHOLDER_PRODUCT: &str = "https://placehold.co/600x400";
const DEFAULT_QR_VALUE: &str = "https://portyo.me";

pub(crate) fn render(block: &Block, target: &RenderTarget, depth: usize) -> Option<Element> {
    let ctx = Ctx { target, depth };
    let fragment = match block.kind() {
        BlockKind::Heading(a) => heading(a, &ctx),
        BlockKind::Text(a) => text(a, &ctx),
        BlockKind::Button(a) => button(a, &ctx),
        BlockKind::ButtonGrid(a) => button_grid(a, &ctx),
        BlockKind::Image(a) => image(a),
        BlockKind::Video(a) => video(a, &ctx),
        BlockKind::Youtube(a) => youtube(a, &ctx),
        BlockKind::Spotify(a) => spotify(a, &ctx),
        BlockKind::Socials(a) => socials(
            a.socials.as_ref(),
            a.socials_layout.unwrap_or(SocialsLayout::Row),
            a.align.unwrap_or(Align::Center),
            a.style.as_ref(),
            &ctx,
        ),
        BlockKind::Social(a) => socials(
            a.socials.as_ref(),
            SocialsLayout::Row,
            a.align.unwrap_or(Align::Center),
            a.style.as_ref(),
            &ctx,
        ),
        BlockKind::Divider(a) => divider(a),
        BlockKind::QrCode(a) => qr_code(a, &ctx),
        BlockKind::Calendar(a) => calendar(a, &ctx),
        BlockKind::Map(a) => map(a, &ctx),
        BlockKind::Event(a) => event(a, &ctx),
        BlockKind::Form(a) => integration_card(
            or(&a.title, "Contact"),
            a.form_id.as_ref(),
            "[Form]",
            "[No form selected]",
            or(&a.form_background_color, "#ffffff"),
            or(&a.form_text_color, "#1f2937"),
            &ctx,
        ),
        BlockKind::Poll(a) => integration_card(
            or(&a.poll_title, "Poll"),
            a.poll_id.as_ref(),
            "[Poll]",
            "[No poll selected]",
            "#ffffff",
            "#1f2937",
            &ctx,
        ),
        BlockKind::Portfolio(a) => section(
            or(&a.portfolio_title, "Portfolio"),
            placeholder("[Portfolio]", &ctx),
            "#ffffff",
            "#111827",
            &ctx,
        ),
        BlockKind::Experience(a) => experience(a, &ctx),
        BlockKind::Tour(a) => tour(a, &ctx),
        BlockKind::Blog(a) => section(
            "Latest posts",
            placeholder("[Blog posts]", &ctx),
            or(&a.blog_background_color, "#ffffff"),
            or(&a.blog_title_color, "#111827"),
            &ctx,
        ),
        BlockKind::Product(a) => product(a, &ctx),
        BlockKind::Featured(a) => featured(a, &ctx),
        BlockKind::Affiliate(a) => affiliate(a, &ctx),
        BlockKind::Marketing(a) => integration_card(
            "Sponsored",
            a.marketing_id.as_ref(),
            "[Sponsored content]",
            "[No campaign selected]",
            "#ffffff",
            "#1f2937",
            &ctx,
        ),
        BlockKind::SponsoredLinks(a) => {
            if a.visible == Some(false) {
                return None;
            }
            section(
                or(&a.title, "Sponsored Links"),
                placeholder("[Sponsored links]", &ctx),
                "#ffffff",
                "#111827",
                &ctx,
            )
        }
        BlockKind::Whatsapp(a) => whatsapp(a, &ctx),
        BlockKind::Instagram(a) => profile_link(
            "Instagram",
            a.instagram_username.as_deref(),
            "instagram",
            or(&a.instagram_text_color, "#000000"),
            &ctx,
        ),
        BlockKind::Threads(a) => profile_link(
            "Threads",
            a.threads_username.as_deref(),
            "threads",
            "#000000",
            &ctx,
        ),
        BlockKind::Spacer(a) => spacer(a),
        BlockKind::Footer(a) => footer(a, &ctx),
        BlockKind::Columns(a) => return columns(a, &ctx),
        BlockKind::Unknown { type_name, .. } => {
            tracing::warn!(id = %block.id(), type_name = %type_name, "skipping unknown block type");
            return None;
        }
    };
    Some(fragment)
}

struct Ctx<'a> {
    target: &'a RenderTarget,
    depth: usize,
}

impl Ctx<'_> {
    fn font(&self) -> &str {
        &self.target.font_family
    }
}

/// The attribute when present and non-blank, otherwise `fallback`.
fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
}

fn style_or<'a>(
    style: Option<&'a BlockStyle>,
    pick: fn(&BlockStyle) -> &Option<String>,
    fallback: &'a str,
) -> &'a str {
    match style {
        Some(style) => or(pick(style), fallback),
        None => fallback,
    }
}

/// A link when `href` normalizes, otherwise an inert span.
fn anchor(href: Option<&str>) -> Element {
    match href.and_then(normalize_url) {
        Some(url) => Element::new("a")
            .attr("href", url)
            .attr("target", "_blank")
            .style("text-decoration", "none"),
        None => Element::new("span"),
    }
}

fn padded(padding: &str, align: Align) -> Element {
    Element::new("div")
        .style("padding", padding)
        .style("text-align", align.as_str())
}

/// The "nothing configured" fragment.
fn placeholder(message: &str, ctx: &Ctx) -> Element {
    padded("20px", Align::Center).child(
        Element::new("span")
            .style("font-family", ctx.font())
            .style("color", "#888888")
            .style("font-size", "12px")
            .text(message),
    )
}

fn title_line(title: &str, color: &str, ctx: &Ctx) -> Element {
    Element::new("p")
        .style("margin", "0 0 12px 0")
        .style("font-family", ctx.font())
        .style("font-size", "18px")
        .style("font-weight", "bold")
        .style("color", color)
        .text(title)
}

/// Titled card around `body`.
fn section(title: &str, body: Element, background: &str, color: &str, ctx: &Ctx) -> Element {
    padded("10px", Align::Center).child(
        Element::new("div")
            .style("padding", "16px")
            .style("background-color", background)
            .style("border-radius", "12px")
            .child(title_line(title, color, ctx))
            .child(body),
    )
}

fn integration_card(
    title: &str,
    id: Option<&String>,
    configured: &str,
    missing: &str,
    background: &str,
    color: &str,
    ctx: &Ctx,
) -> Element {
    let message = match id {
        Some(id) if !id.trim().is_empty() => configured,
        _ => missing,
    };
    section(title, placeholder(message, ctx), background, color, ctx)
}

struct ButtonLook<'a> {
    background: &'a str,
    color: &'a str,
    radius: &'a str,
    style: ButtonStyle,
    shadow: Option<&'a str>,
    full_width: bool,
}

impl<'a> ButtonLook<'a> {
    fn solid(background: &'a str, color: &'a str, radius: &'a str) -> Self {
        Self {
            background,
            color,
            radius,
            style: ButtonStyle::Solid,
            shadow: None,
            full_width: false,
        }
    }
}

/// Email-safe button: a single-cell table carrying the fill colour so
/// clients that ignore CSS backgrounds still paint it.
fn button_table(
    label: &str,
    href: Option<&str>,
    look: &ButtonLook,
    align: Align,
    ctx: &Ctx,
) -> Element {
    let outline_width = match look.style {
        ButtonStyle::Outline
        | ButtonStyle::Sketch
        | ButtonStyle::Architect
        | ButtonStyle::GradientBorder
        | ButtonStyle::Neon => Some("2px"),
        ButtonStyle::OutlineThick => Some("3px"),
        _ => None,
    };
    let transparent = outline_width.is_some()
        || matches!(look.style, ButtonStyle::Ghost | ButtonStyle::MinimalUnderline);
    let shadow = match look.style {
        ButtonStyle::HardShadow
        | ButtonStyle::Brutalist
        | ButtonStyle::ThreeD
        | ButtonStyle::Pixel => {
            Some(format!("4px 4px 0 {}", look.shadow.unwrap_or("#000000")))
        }
        ButtonStyle::SoftShadow
        | ButtonStyle::Clay
        | ButtonStyle::Neumorphism
        | ButtonStyle::Material
        | ButtonStyle::Glass => Some("0 4px 12px rgba(0, 0, 0, 0.15)".to_string()),
        ButtonStyle::Neon | ButtonStyle::Cyberpunk => Some(format!("0 0 12px {}", look.background)),
        _ => None,
    };

    let mut cell = Element::new("td")
        .attr("align", "center")
        .style("border-radius", look.radius);
    if transparent {
        cell = cell.style("background-color", "transparent");
    } else {
        cell = cell
            .attr("bgcolor", look.background)
            .style("background-color", look.background);
        if look.style == ButtonStyle::Gradient {
            cell = cell.style(
                "background-image",
                format!(
                    "linear-gradient(90deg, {}, {})",
                    look.background,
                    look.shadow.unwrap_or(look.background)
                ),
            );
        }
    }
    match (outline_width, look.style) {
        (Some(width), _) => {
            cell = cell.style("border", format!("{width} solid {}", look.background))
        }
        (None, ButtonStyle::MinimalUnderline) => {
            cell = cell.style("border-bottom", format!("2px solid {}", look.background))
        }
        _ => {}
    }
    if let Some(shadow) = shadow {
        cell = cell.style("box-shadow", shadow);
    }

    let link = anchor(href)
        .style("display", "block")
        .style("padding", "12px 24px")
        .style("font-family", ctx.font())
        .style("font-size", "16px")
        .style("font-weight", "bold")
        .style("color", look.color)
        .text(label);

    layout_table()
        .attr("width", if look.full_width { "100%" } else { "auto" })
        .style("margin", if align == Align::Center { "0 auto" } else { "0" })
        .child(Element::new("tr").child(cell.child(link)))
}

fn heading(a: &HeadingAttrs, ctx: &Ctx) -> Element {
    let style = a.style.as_ref();
    let align = a.align.unwrap_or(Align::Center);
    let title = match a.title.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None => or(&a.content, "Heading"),
    };
    let color = a
        .text_color
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| style_or(style, |s| &s.color, "#0f172a"));
    let mut wrapper = padded(style_or(style, |s| &s.padding, "10px"), align).child(
        Element::new("h2")
            .style("margin", "0")
            .style("font-family", ctx.font())
            .style(
                "font-size",
                a.font_size
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| style_or(style, |s| &s.font_size, "32px")),
            )
            .style("font-weight", or(&a.font_weight, "800"))
            .style("line-height", "1.2")
            .style("color", color)
            .text(title),
    );
    if let Some(body) = a.body.as_deref().filter(|b| !b.trim().is_empty()) {
        wrapper = wrapper.child(
            Element::new("p")
                .style("margin", "8px 0 0 0")
                .style("font-family", ctx.font())
                .style("font-size", "16px")
                .style("color", color)
                .text(body),
        );
    }
    wrapper
}

fn text(a: &TextAttrs, ctx: &Ctx) -> Element {
    let style = a.style.as_ref();
    let body = match a.body.as_deref().filter(|b| !b.trim().is_empty()) {
        Some(body) => body,
        None => or(&a.content, "Add your text here"),
    };
    let color = a
        .text_color
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| style_or(style, |s| &s.color, "#000000"));
    let font_size = a
        .font_size
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| style_or(style, |s| &s.font_size, "16px"));

    let mut div = Element::new("div")
        .style("font-family", ctx.font())
        .style("padding", style_or(style, |s| &s.padding, "10px"))
        .style("text-align", a.align.unwrap_or(Align::Left).as_str())
        .style("color", color)
        .style("font-size", font_size)
        .style("line-height", style_or(style, |s| &s.line_height, "1.5"));
    if let Some(weight) = a.font_weight.as_deref() {
        div = div.style("font-weight", weight);
    }
    for (i, line) in body.lines().enumerate() {
        if i > 0 {
            div = div.child(Element::void("br"));
        }
        div = div.text(line);
    }
    div
}

fn button(a: &ButtonAttrs, ctx: &Ctx) -> Element {
    let style = a.style.as_ref();
    let label = match a.title.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None => or(&a.content, "Click Me"),
    };
    let href = a
        .href
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .or(a.url.as_deref());
    let background = match style.and_then(|s| s.background_color.as_deref()) {
        Some(bg) if !bg.trim().is_empty() => bg,
        _ => or(&a.accent, "#000000"),
    };
    let color = match style.and_then(|s| s.color.as_deref()) {
        Some(color) if !color.trim().is_empty() => color,
        _ => or(&a.text_color, "#ffffff"),
    };
    let radius = style_or(
        style,
        |s| &s.border_radius,
        a.button_shape.map_or("4px", ButtonShape::radius),
    );
    let align = a.align.unwrap_or(Align::Center);
    let look = ButtonLook {
        background,
        color,
        radius,
        style: a.button_style.unwrap_or(ButtonStyle::Solid),
        shadow: a.button_shadow_color.as_deref(),
        full_width: style.and_then(|s| s.width.as_deref()) == Some("100%"),
    };
    padded(style_or(style, |s| &s.padding, "20px"), align)
        .child(button_table(label, href, &look, align, ctx))
}

/// Lays `cells` out `columns` per row, each cell `floor(100 / columns)%` wide.
fn grid(cells: Vec<Element>, columns: usize, width: u32) -> Element {
    let columns = columns.max(1);
    let percent = 100 / columns;
    let pixels = width as usize / columns;
    let mut table = layout_table().attr("width", "100%");
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        let mut tr = Element::new("tr");
        for _ in 0..columns {
            let td = Element::new("td")
                .attr("width", pixels.to_string())
                .attr("valign", "top")
                .style("width", format!("{percent}%"))
                .style("padding", "4px");
            tr = tr.child(match cells.next() {
                Some(cell) => td.child(cell),
                None => td.raw("&nbsp;"),
            });
        }
        table = table.child(tr);
    }
    table
}

fn button_grid(a: &ButtonGridAttrs, ctx: &Ctx) -> Element {
    let items = a.grid_items.as_deref().unwrap_or_default();
    if items.is_empty() {
        return placeholder("[No links configured]", ctx);
    }
    let look = ButtonLook {
        full_width: true,
        ..ButtonLook::solid(or(&a.accent, "#111827"), or(&a.text_color, "#ffffff"), "8px")
    };
    let cells = items
        .iter()
        .map(|item| {
            let mut cell = Element::new("div");
            if let Some(src) = item.image.as_deref().and_then(normalize_url) {
                cell = cell.child(
                    Element::void("img")
                        .attr("src", src)
                        .attr("alt", or(&item.title, "Link"))
                        .attr("width", "100%")
                        .style("display", "block")
                        .style("width", "100%")
                        .style("border-radius", "8px")
                        .style("margin-bottom", "4px"),
                );
            }
            cell.child(button_table(
                or(&item.title, "Link"),
                item.url.as_deref(),
                &look,
                Align::Center,
                ctx,
            ))
        })
        .collect();
    let columns = a.grid_columns.map_or(2, |c| c as usize).clamp(1, MAX_COLUMNS);
    let mut wrapper = padded("10px", Align::Center);
    if let Some(title) = a.title.as_deref().filter(|t| !t.trim().is_empty()) {
        wrapper = wrapper.child(title_line(title, "#111827", ctx));
    }
    wrapper.child(grid(cells, columns, ctx.target.width))
}

fn image(a: &ImageAttrs) -> Element {
    let style = a.style.as_ref();
    let src = a
        .media_url
        .as_deref()
        .and_then(normalize_url)
        .or_else(|| a.content.as_deref().and_then(normalize_url))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let href = a
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .or(a.href.as_deref());
    let alt = match a.alt.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(alt) => alt,
        None => or(&a.title, "Image"),
    };
    padded(style_or(style, |s| &s.padding, "10px"), a.align.unwrap_or(Align::Left)).child(
        anchor(href).child(
            Element::void("img")
                .attr("src", src)
                .attr("alt", alt)
                .style("max-width", "100%")
                .style("width", style_or(style, |s| &s.width, "100%"))
                .style("height", "auto")
                .style("border-radius", style_or(style, |s| &s.border_radius, "0px"))
                .style("display", "inline-block"),
        ),
    )
}

/// A thumbnail or label linking out to embedded media.
fn media_card(title: &str, href: Option<&str>, thumbnail: Option<String>, ctx: &Ctx) -> Element {
    let mut link = anchor(href).style("display", "block");
    if let Some(src) = thumbnail {
        link = link.child(
            Element::void("img")
                .attr("src", src)
                .attr("alt", title)
                .attr("width", "100%")
                .style("display", "block")
                .style("width", "100%")
                .style("border-radius", "12px"),
        );
    }
    padded("10px", Align::Center).child(
        link.child(
            Element::new("p")
                .style("margin", "8px 0 0 0")
                .style("font-family", ctx.font())
                .style("font-size", "14px")
                .style("font-weight", "bold")
                .style("color", "#111827")
                .text(title),
        ),
    )
}

fn video(a: &VideoAttrs, ctx: &Ctx) -> Element {
    match a.media_url.as_deref().and_then(normalize_url) {
        Some(url) => media_card(or(&a.title, "Watch video"), Some(url.as_str()), None, ctx),
        None => placeholder("[Video]", ctx),
    }
}

/// Extracts the video id from watch, share, embed and shorts URLs.
fn youtube_id(url: &str) -> Option<&str> {
    let id = if let Some((_, query)) = url.split_once("v=") {
        query
    } else {
        ["youtu.be/", "/embed/", "/shorts/"]
            .iter()
            .find_map(|marker| url.split_once(marker).map(|(_, rest)| rest))?
    };
    let id = id.split(['&', '?', '/', '#']).next()?;
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .then_some(id)
}

fn youtube(a: &YoutubeAttrs, ctx: &Ctx) -> Element {
    let Some(url) = a.youtube_url.as_deref().and_then(normalize_url) else {
        return placeholder("[YouTube]", ctx);
    };
    let thumbnail =
        youtube_id(&url).map(|id| format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"));
    media_card(or(&a.title, "Watch on YouTube"), Some(url.as_str()), thumbnail, ctx)
}

/// Turns `spotify:track:ID` URIs into open.spotify.com links.
fn spotify_link(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("spotify:") {
        let (kind, id) = rest.split_once(':')?;
        let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
        return (valid(kind) && valid(id)).then(|| format!("https://open.spotify.com/{kind}/{id}"));
    }
    normalize_url(raw)
}

fn spotify(a: &SpotifyAttrs, ctx: &Ctx) -> Element {
    let Some(url) = a.spotify_url.as_deref().and_then(spotify_link) else {
        return placeholder("[Spotify]", ctx);
    };
    let look = ButtonLook::solid("#1DB954", "#ffffff", "9999px");
    padded("10px", Align::Center).child(button_table(
        or(&a.title, "Listen on Spotify"),
        Some(url.as_str()),
        &look,
        Align::Center,
        ctx,
    ))
}

fn platform_label(platform: &str) -> String {
    let mut chars = platform.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn socials(
    links: Option<&SocialLinks>,
    layout: SocialsLayout,
    align: Align,
    style: Option<&BlockStyle>,
    ctx: &Ctx,
) -> Element {
    let entries: Vec<_> = links
        .into_iter()
        .flatten()
        .filter(|(_, handle)| !handle.trim().is_empty())
        .collect();
    if entries.is_empty() {
        return placeholder("[Social Links]", ctx);
    }
    let color = style_or(style, |s| &s.color, "#111827");
    let mut wrapper = padded(style_or(style, |s| &s.padding, "20px"), align);
    for (platform, handle) in entries {
        let item = anchor(social_url(platform, handle).as_deref())
            .style("font-family", ctx.font())
            .style("font-size", "14px")
            .style("font-weight", "bold")
            .style("color", color)
            .text(platform_label(platform));
        wrapper = wrapper.child(match layout {
            SocialsLayout::Row => Element::new("span")
                .style("display", "inline-block")
                .style("padding", "0 8px")
                .child(item),
            SocialsLayout::Column => Element::new("div").style("padding", "4px 0").child(item),
        });
    }
    wrapper
}

fn divider(a: &DividerAttrs) -> Element {
    let style = a.style.as_ref();
    let color = match a.color.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(color) => color,
        None => style_or(style, |s| &s.border_color, "#e5e7eb"),
    };
    let line = format!("{} solid {color}", style_or(style, |s| &s.border_width, "1px"));
    padded(style_or(style, |s| &s.padding, "10px 0"), Align::Center).child(
        layout_table().attr("width", "100%").child(
            Element::new("tr").child(
                Element::new("td")
                    .style("border-top", line)
                    .style("font-size", "0")
                    .style("line-height", "0")
                    .raw("&nbsp;"),
            ),
        ),
    )
}

fn spacer(a: &SpacerAttrs) -> Element {
    let height = style_or(a.style.as_ref(), |s| &s.height, "20px");
    Element::new("div")
        .style("height", height)
        .style("line-height", height)
        .style("font-size", "0")
        .raw("&nbsp;")
}

fn hex_param(color: &str, fallback: &'static str) -> String {
    let hex: String = color.trim_start_matches('#').chars().collect();
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        hex
    } else {
        fallback.to_string()
    }
}

fn qr_image(value: &str, label: &str, a: &QrCodeAttrs, size: u32) -> Element {
    let src = format!(
        "https://api.qrserver.com/v1/create-qr-code/?size={size}x{size}&data={}&color={}&bgcolor={}",
        urlencoding::encode(value),
        hex_param(or(&a.qr_code_color, "#000000"), "000000"),
        hex_param(or(&a.qr_code_bg_color, "#FFFFFF"), "FFFFFF"),
    );
    Element::void("img")
        .attr("src", src)
        .attr("alt", label)
        .attr("width", size.to_string())
        .attr("height", size.to_string())
        .style("display", "inline-block")
}

fn qr_code(a: &QrCodeAttrs, ctx: &Ctx) -> Element {
    let mut wrapper = padded("10px", Align::Center);
    if let Some(title) = a.qr_code_title.as_deref().filter(|t| !t.trim().is_empty()) {
        wrapper = wrapper.child(title_line(title, "#111827", ctx));
    }
    let layout = a.qr_code_layout.unwrap_or(QrCodeLayout::Single);
    if layout == QrCodeLayout::Single {
        let value = or(&a.qr_code_value, DEFAULT_QR_VALUE);
        return wrapper.child(qr_image(value, "QR code", a, 200));
    }
    let items: Vec<_> = a
        .qr_code_items
        .iter()
        .flatten()
        .filter(|item| item.value.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .collect();
    if items.is_empty() {
        return wrapper.child(placeholder("[No QR codes configured]", ctx));
    }
    let cells = items
        .into_iter()
        .map(|item| {
            let label = or(&item.label, "QR code");
            Element::new("div")
                .child(qr_image(or(&item.value, DEFAULT_QR_VALUE), label, a, 160))
                .child(
                    Element::new("p")
                        .style("margin", "4px 0 0 0")
                        .style("font-family", ctx.font())
                        .style("font-size", "12px")
                        .style("color", "#374151")
                        .text(label),
                )
        })
        .collect();
    let columns = if layout == QrCodeLayout::Grid { 2 } else { 1 };
    wrapper.child(grid(cells, columns, ctx.target.width))
}

/// Coloured card with a title, optional detail lines and a call to action.
fn cta_card(
    title: &str,
    details: &[&str],
    action: (&str, Option<&str>),
    colors: (&str, &str, &str),
    ctx: &Ctx,
) -> Element {
    let (background, color, accent) = colors;
    let mut card = Element::new("div")
        .style("padding", "20px")
        .style("background-color", background)
        .style("border-radius", "16px")
        .style("text-align", "center")
        .child(title_line(title, color, ctx));
    for detail in details.iter().filter(|d| !d.trim().is_empty()) {
        card = card.child(
            Element::new("p")
                .style("margin", "0 0 12px 0")
                .style("font-family", ctx.font())
                .style("font-size", "14px")
                .style("color", color)
                .text(*detail),
        );
    }
    let button_text = if accent.eq_ignore_ascii_case(background) { color } else { "#ffffff" };
    let look = ButtonLook::solid(accent, button_text, "9999px");
    padded("10px", Align::Center)
        .child(card.child(button_table(action.0, action.1, &look, Align::Center, ctx)))
}

fn calendar(a: &CalendarAttrs, ctx: &Ctx) -> Element {
    cta_card(
        or(&a.calendar_title, "Book a Call"),
        &[],
        ("Book Now", a.calendar_url.as_deref()),
        (
            or(&a.calendar_color, "#ffffff"),
            or(&a.calendar_text_color, "#1f2937"),
            or(&a.calendar_accent_color, "#2563eb"),
        ),
        ctx,
    )
}

fn map(a: &MapAttrs, ctx: &Ctx) -> Element {
    let address = or(&a.map_address, "123 Main St, City");
    let url = format!("https://maps.google.com/?q={}", urlencoding::encode(address));
    cta_card(
        or(&a.map_title, "Our Office"),
        &[address],
        ("Open in Maps", Some(url.as_str())),
        ("#ffffff", "#1f2937", "#111827"),
        ctx,
    )
}

fn event(a: &EventAttrs, ctx: &Ctx) -> Element {
    let background = or(&a.event_color, "#111827");
    let color = or(&a.event_text_color, "#ffffff");
    cta_card(
        or(&a.event_title, "Live Webinar"),
        &[a.event_date.as_deref().unwrap_or_default()],
        (or(&a.event_button_text, "Register Now"), a.event_button_url.as_deref()),
        (background, color, color),
        ctx,
    )
}

fn experience(a: &ExperienceAttrs, ctx: &Ctx) -> Element {
    let title = or(&a.experience_title, "Experience");
    let items = a.experiences.as_deref().unwrap_or_default();
    if items.is_empty() {
        return section(title, placeholder("[No experience added]", ctx), "#ffffff", "#111827", ctx);
    }
    let role_color = or(&a.experience_role_color, "#111827");
    let text_color = or(&a.experience_text_color, "#374151");
    let line_color = or(&a.experience_line_color, "#e5e7eb");
    let entries = items.iter().map(|item| {
        let meta: Vec<&str> = [item.company.as_deref(), item.period.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        let mut entry = Element::new("div")
            .style("padding", "0 0 16px 16px")
            .style("border-left", format!("2px solid {line_color}"))
            .style("text-align", "left")
            .style("font-family", ctx.font())
            .child(
                Element::new("p")
                    .style("margin", "0")
                    .style("font-weight", "bold")
                    .style("color", role_color)
                    .text(or(&item.role, "Role")),
            );
        if !meta.is_empty() {
            entry = entry.child(
                Element::new("p")
                    .style("margin", "2px 0 0 0")
                    .style("font-size", "13px")
                    .style("color", text_color)
                    .text(meta.join(" · ")),
            );
        }
        if let Some(description) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
            entry = entry.child(
                Element::new("p")
                    .style("margin", "6px 0 0 0")
                    .style("font-size", "14px")
                    .style("color", text_color)
                    .text(description),
            );
        }
        entry
    });
    section(title, Element::new("div").children(entries), "#ffffff", role_color, ctx)
}

fn tour(a: &TourAttrs, ctx: &Ctx) -> Element {
    let title = or(&a.tour_title, "TOURS");
    let dates = a.tours.as_deref().unwrap_or_default();
    if dates.is_empty() {
        return section(title, placeholder("[No tour dates]", ctx), "#ffffff", "#111827", ctx);
    }
    let cell = |text: &str, bold: bool| {
        Element::new("td")
            .style("padding", "8px 4px")
            .style("border-bottom", "1px solid #e5e7eb")
            .style("font-family", ctx.font())
            .style("font-size", "14px")
            .style("font-weight", if bold { "bold" } else { "normal" })
            .style("color", "#111827")
            .text(text)
    };
    let rows = dates.iter().map(|date| {
        let place = [date.location.as_deref(), date.venue.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" · ");
        let status = if date.sold_out == Some(true) {
            Element::new("span").style("color", "#9ca3af").text("Sold Out")
        } else {
            let link = anchor(date.ticket_url.as_deref())
                .style("color", "#111827")
                .style("font-weight", "bold")
                .text("Tickets");
            if date.selling_fast == Some(true) {
                Element::new("span")
                    .child(link)
                    .child(Element::new("span").style("color", "#dc2626").text(" Selling fast"))
            } else {
                link
            }
        };
        Element::new("tr")
            .child(cell(or(&date.date, "TBA"), true))
            .child(cell(place.as_str(), false))
            .child(
                Element::new("td")
                    .attr("align", "right")
                    .style("padding", "8px 4px")
                    .style("border-bottom", "1px solid #e5e7eb")
                    .style("font-family", ctx.font())
                    .style("font-size", "13px")
                    .child(status),
            )
    });
    section(
        title,
        layout_table().attr("width", "100%").children(rows),
        "#ffffff",
        "#111827",
        ctx,
    )
}

fn product(a: &ProductAttrs, ctx: &Ctx) -> Element {
    let items = a.products.as_deref().unwrap_or_default();
    if items.is_empty() {
        return placeholder("[No products]", ctx);
    }
    let background = or(&a.product_background_color, "#ffffff");
    let color = or(&a.product_text_color, "#1f2937");
    let look = ButtonLook {
        full_width: true,
        ..ButtonLook::solid(or(&a.product_accent_color, "#000000"), "#ffffff", "8px")
    };
    let cells = items
        .iter()
        .map(|item| {
            let src = item
                .image
                .as_deref()
                .and_then(normalize_url)
                .unwrap_or_else(|| PLACEHOLDER_PRODUCT.to_string());
            let title = or(&item.title, "Product");
            let mut card = Element::new("div")
                .style("padding", "8px")
                .style("background-color", background)
                .style("border-radius", "12px")
                .style("font-family", ctx.font())
                .style("color", color)
                .child(
                    Element::void("img")
                        .attr("src", src)
                        .attr("alt", title)
                        .attr("width", "100%")
                        .style("display", "block")
                        .style("width", "100%")
                        .style("border-radius", "8px"),
                )
                .child(
                    Element::new("p")
                        .style("margin", "8px 0 0 0")
                        .style("font-weight", "bold")
                        .text(title),
                );
            if let Some(price) = item.price.as_deref().filter(|p| !p.trim().is_empty()) {
                card = card.child(Element::new("p").style("margin", "2px 0 8px 0").text(price));
            }
            card.child(button_table(
                or(&a.product_button_text, "View Product"),
                item.url.as_deref(),
                &look,
                Align::Center,
                ctx,
            ))
        })
        .collect();
    let columns = if a.product_layout.as_deref() == Some("list") { 1 } else { 2 };
    padded("10px", Align::Center).child(grid(cells, columns, ctx.target.width))
}

fn featured(a: &FeaturedAttrs, ctx: &Ctx) -> Element {
    let background = or(&a.featured_color, "#1f4d36");
    let color = or(&a.featured_text_color, "#ffffff");
    let title = or(&a.featured_title, "Glow lipstick");
    let price = or(&a.featured_price, "$19.99");
    let src = a
        .featured_image
        .as_deref()
        .and_then(normalize_url)
        .unwrap_or_else(|| PLACEHOLDER_PRODUCT.to_string());
    let look = ButtonLook::solid(color, background, "9999px");
    padded("10px", Align::Center).child(
        Element::new("div")
            .style("padding", "16px")
            .style("background-color", background)
            .style("border-radius", "16px")
            .child(
                Element::void("img")
                    .attr("src", src)
                    .attr("alt", title)
                    .attr("width", "100%")
                    .style("display", "block")
                    .style("width", "100%")
                    .style("border-radius", "12px")
                    .style("margin-bottom", "12px"),
            )
            .child(title_line(title, color, ctx))
            .child(button_table(
                &format!("Buy now for {price}"),
                a.featured_url.as_deref(),
                &look,
                Align::Center,
                ctx,
            )),
    )
}

fn affiliate(a: &AffiliateAttrs, ctx: &Ctx) -> Element {
    let background = or(&a.affiliate_color, "#ffffff");
    let color = or(&a.affiliate_text_color, "#1f2937");
    let mut card = Element::new("div")
        .style("padding", "16px")
        .style("background-color", background)
        .style("border-radius", "16px")
        .style("text-align", "center");
    if let Some(src) = a.affiliate_image.as_deref().and_then(normalize_url) {
        card = card.child(
            Element::void("img")
                .attr("src", src)
                .attr("alt", or(&a.affiliate_title, "Affiliate"))
                .attr("width", "120")
                .style("display", "inline-block")
                .style("border-radius", "12px")
                .style("margin-bottom", "12px"),
        );
    }
    let look = ButtonLook::solid(color, background, "9999px");
    padded("10px", Align::Center).child(
        card.child(title_line(or(&a.affiliate_title, "Copy my coupon code"), color, ctx))
            .child(
                Element::new("p")
                    .style("margin", "0 0 12px 0")
                    .style("padding", "10px")
                    .style("border", format!("2px dashed {color}"))
                    .style("font-family", "monospace")
                    .style("font-size", "18px")
                    .style("letter-spacing", "2px")
                    .style("color", color)
                    .text(or(&a.affiliate_code, "CODE123")),
            )
            .child(button_table("Shop now", a.affiliate_url.as_deref(), &look, Align::Center, ctx)),
    )
}

fn whatsapp(a: &WhatsappAttrs, ctx: &Ctx) -> Element {
    let digits: String = a
        .whatsapp_number
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let href = (!digits.is_empty()).then(|| match a.whatsapp_message.as_deref() {
        Some(message) if !message.trim().is_empty() => {
            format!("https://wa.me/{digits}?text={}", urlencoding::encode(message))
        }
        _ => format!("https://wa.me/{digits}"),
    });
    let look = ButtonLook {
        style: a.whatsapp_style.unwrap_or(ButtonStyle::Solid),
        ..ButtonLook::solid(
            or(&a.accent, "#25D366"),
            or(&a.text_color, "#ffffff"),
            a.whatsapp_shape.map_or("9999px", ButtonShape::radius),
        )
    };
    padded("20px", Align::Center).child(button_table(
        "Chat on WhatsApp",
        href.as_deref(),
        &look,
        Align::Center,
        ctx,
    ))
}

fn profile_link(
    network: &str,
    username: Option<&str>,
    platform: &str,
    color: &str,
    ctx: &Ctx,
) -> Element {
    let username = username.unwrap_or_default().trim().trim_start_matches('@');
    if username.is_empty() {
        return placeholder(&format!("[{network}]"), ctx);
    }
    padded("10px", Align::Center).child(
        anchor(social_url(platform, username).as_deref())
            .style("font-family", ctx.font())
            .style("font-size", "16px")
            .style("font-weight", "bold")
            .style("color", color)
            .text(format!("Follow @{username} on {network}")),
    )
}

fn footer(a: &FooterAttrs, ctx: &Ctx) -> Element {
    let style = a.style.as_ref();
    let color = style_or(style, |s| &s.color, "#6b7280");
    let line = |text: &str| {
        Element::new("p")
            .style("margin", "0 0 6px 0")
            .style("font-family", ctx.font())
            .style("font-size", "12px")
            .style("color", color)
            .text(text)
    };
    let mut wrapper = padded(
        style_or(style, |s| &s.padding, "20px"),
        a.align.unwrap_or(Align::Center),
    )
    .child(line(or(
        &a.footer_text,
        "You are receiving this email because you subscribed.",
    )));
    if let Some(address) = a.address.as_deref().filter(|s| !s.trim().is_empty()) {
        wrapper = wrapper.child(line(address));
    }
    wrapper.child(
        anchor(a.unsubscribe_url.as_deref())
            .style("font-family", ctx.font())
            .style("font-size", "12px")
            .style("color", color)
            .style("text-decoration", "underline")
            .text("Unsubscribe"),
    )
}

fn columns(a: &ColumnsAttrs, ctx: &Ctx) -> Option<Element> {
    if ctx.depth >= MAX_NESTING {
        tracing::debug!(depth = ctx.depth, "columns nested too deep, skipping");
        return None;
    }
    let columns = a.columns.as_deref().unwrap_or_default();
    let count = match a.column_count {
        Some(count) if count > 0 => (count as usize).min(MAX_COLUMNS),
        _ => 0,
    }
    .max(columns.len())
    .max(1);
    let cells = (0..count)
        .map(|i| {
            let nested = columns
                .get(i)
                .map(|column| column.blocks.as_slice())
                .unwrap_or_default();
            let mut cell = Element::new("div");
            let mut empty = true;
            for block in nested {
                if let Some(fragment) = render(block, ctx.target, ctx.depth + 1) {
                    cell = cell.child(fragment);
                    empty = false;
                }
            }
            if empty { cell.raw("&nbsp;") } else { cell }
        })
        .collect();
    let style = a.style.as_ref();
    Some(padded(style_or(style, |s| &s.padding, "0"), Align::Left).child(grid(
        cells,
        count,
        ctx.target.width,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_ids() {
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_id("https://youtube.com/shorts/abc_123"), Some("abc_123"));
        assert_eq!(youtube_id("https://youtube.com/@channel"), None);
    }

    #[test]
    fn spotify_uri_becomes_link() {
        assert_eq!(
            spotify_link("spotify:track:4uLU6hMCjMI75M1A2tKUQC"),
            Some("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC".to_string())
        );
        assert_eq!(spotify_link("spotify:track"), None);
    }

    #[test]
    fn hex_params_fall_back() {
        assert_eq!(hex_param("#00ff00", "000000"), "00ff00");
        assert_eq!(hex_param("red", "000000"), "000000");
    }

    #[test]
    fn grid_pads_last_row() {
        let cells = vec![Element::new("b"), Element::new("i"), Element::new("u")];
        let html = grid(cells, 2, 600).render();
        assert_eq!(html.matches("<tr>").count(), 2);
        assert_eq!(html.matches("width: 50%;").count(), 4);
        assert_eq!(html.matches("width=\"300\"").count(), 4);
        assert!(html.contains("&nbsp;"));
    }

    #[test]
    fn grid_keeps_requested_column_count() {
        let cells = (0..5).map(|_| Element::new("b")).collect();
        let html = grid(cells, 5, 600).render();
        assert_eq!(html.matches("<tr>").count(), 1);
        assert_eq!(html.matches("width: 20%;").count(), 5);
        assert_eq!(html.matches("width=\"120\"").count(), 5);
    }

    #[test]
    fn three_columns_floor_widths() {
        let html = grid(vec![Element::new("b")], 3, 600).render();
        assert!(html.contains("width: 33%;"));
        assert!(html.contains("width=\"200\""));
    }
}
