//! Default attribute bundles and named variations for every block type.
//!
//! Adding a block type means adding an arm to [`default_kind`]; the match is
//! exhaustive over [`BlockType`].

use super::attrs::*;
use super::{Block, BlockKind, BlockType};
use serde_json::{Map, Value};

/// Title given to headings and buttons when the caller supplies none.
pub const DEFAULT_TITLE: &str = "New Block";

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Creates a block of `type_name` with its default bundle, then applies
/// `variation` when it names a preset for that type.
///
/// Unrecognized types produce an `Unknown` block with an empty title.
pub fn create_default_block(type_name: &str, variation: Option<&str>) -> Block {
    create_block(type_name, None, variation)
}

/// Like [`create_default_block`] with a caller-chosen title for types that
/// carry one.
pub fn create_block(type_name: &str, title: Option<&str>, variation: Option<&str>) -> Block {
    let title = title.unwrap_or(DEFAULT_TITLE);
    let kind = match type_name.parse::<BlockType>() {
        Ok(ty) => {
            let mut kind = default_kind(ty, title);
            if let Some(name) = variation {
                if !apply_variation(&mut kind, name) {
                    tracing::debug!(block_type = %ty, variation = name, "ignoring unknown variation");
                }
            }
            kind
        }
        Err(_) => {
            let mut attributes = Map::new();
            attributes.insert("title".to_string(), Value::String(String::new()));
            BlockKind::Unknown {
                type_name: type_name.to_string(),
                attributes,
            }
        }
    };
    Block::new(kind)
}

/// Names of the variations available for `ty`.
pub fn variations(ty: BlockType) -> &'static [&'static str] {
    match ty {
        BlockType::Button => &["button-outline", "button-gradient", "button-neon"],
        BlockType::Youtube => &["single-video", "full-channel", "playlist"],
        BlockType::Spotify => &["artist-profile", "single-track", "playlist", "album"],
        BlockType::Socials => &["icon-grid", "detailed-list", "floating-buttons"],
        BlockType::QrCode => &["qrcode-single", "qrcode-multiple", "qrcode-grid"],
        BlockType::Whatsapp => &["direct-button", "pre-filled-form"],
        BlockType::Instagram => &["simple-link", "grid-shop", "visual-gallery"],
        BlockType::Threads => &["thread-grid", "thread-cards"],
        _ => &[],
    }
}

pub(crate) fn default_kind(ty: BlockType, title: &str) -> BlockKind {
    match ty {
        BlockType::Heading => BlockKind::Heading(HeadingAttrs {
            title: s(title),
            body: s(""),
            align: Some(Align::Center),
            font_size: s("32px"),
            font_weight: s("800"),
            text_color: s("#0f172a"),
            ..Default::default()
        }),
        BlockType::Text => BlockKind::Text(TextAttrs {
            body: s(""),
            align: Some(Align::Center),
            font_size: s("16px"),
            font_weight: s("500"),
            text_color: s("#475569"),
            ..Default::default()
        }),
        BlockType::Button => BlockKind::Button(ButtonAttrs {
            title: s(title),
            href: s("https://"),
            accent: s("#111827"),
            text_color: s("#ffffff"),
            button_style: Some(ButtonStyle::Solid),
            button_shape: Some(ButtonShape::Rounded),
            ..Default::default()
        }),
        BlockType::ButtonGrid => BlockKind::ButtonGrid(ButtonGridAttrs {
            grid_items: Some(Vec::new()),
            grid_columns: Some(2),
            ..Default::default()
        }),
        BlockType::Image => BlockKind::Image(ImageAttrs {
            media_url: s(""),
            ..Default::default()
        }),
        BlockType::Video => BlockKind::Video(VideoAttrs {
            media_url: s(""),
            ..Default::default()
        }),
        BlockType::Youtube => BlockKind::Youtube(YoutubeAttrs {
            youtube_url: s(""),
            ..Default::default()
        }),
        BlockType::Spotify => BlockKind::Spotify(SpotifyAttrs {
            spotify_url: s(""),
            spotify_compact: Some(false),
            ..Default::default()
        }),
        BlockType::Socials => BlockKind::Socials(SocialsAttrs {
            socials: Some(SocialLinks::new()),
            socials_layout: Some(SocialsLayout::Row),
            ..Default::default()
        }),
        BlockType::Divider => BlockKind::Divider(DividerAttrs::default()),
        BlockType::QrCode => BlockKind::QrCode(QrCodeAttrs {
            qr_code_layout: Some(QrCodeLayout::Single),
            qr_code_value: s(""),
            qr_code_color: s("#000000"),
            qr_code_bg_color: s("#FFFFFF"),
            qr_code_items: Some(Vec::new()),
            ..Default::default()
        }),
        BlockType::Calendar => BlockKind::Calendar(CalendarAttrs {
            calendar_title: s(""),
            calendar_url: s(""),
            calendar_color: s("#ffffff"),
            calendar_text_color: s("#1f2937"),
            calendar_accent_color: s("#2563eb"),
        }),
        BlockType::Map => BlockKind::Map(MapAttrs {
            map_title: s(""),
            map_address: s(""),
        }),
        BlockType::Event => BlockKind::Event(EventAttrs {
            event_title: s(""),
            event_date: s(""),
            event_button_text: s(""),
            event_button_url: s(""),
            event_color: s("#111827"),
            event_text_color: s("#ffffff"),
        }),
        BlockType::Form => BlockKind::Form(FormAttrs {
            form_id: s(""),
            form_background_color: s("#ffffff"),
            form_text_color: s("#1f2937"),
            ..Default::default()
        }),
        BlockType::Poll => BlockKind::Poll(PollAttrs {
            poll_id: s(""),
            poll_title: s(""),
        }),
        BlockType::Portfolio => BlockKind::Portfolio(PortfolioAttrs {
            portfolio_title: s(""),
        }),
        BlockType::Experience => BlockKind::Experience(ExperienceAttrs {
            experience_title: s(""),
            experiences: Some(Vec::new()),
            experience_role_color: s("#111827"),
            experience_text_color: s("#374151"),
            experience_line_color: s("#e5e7eb"),
        }),
        BlockType::Tour => BlockKind::Tour(TourAttrs {
            tour_title: s(""),
            tours: Some(Vec::new()),
        }),
        BlockType::Blog => BlockKind::Blog(BlogAttrs {
            blog_layout: s("grid"),
            blog_card_style: s("modern"),
            blog_post_count: Some(3),
            blog_background_color: s("#ffffff"),
            blog_text_color: s("#1f2937"),
            blog_title_color: s("#111827"),
            blog_date_color: s("#9ca3af"),
            blog_tag_background_color: s("#f3f4f6"),
            blog_tag_text_color: s("#111827"),
        }),
        BlockType::Product => BlockKind::Product(ProductAttrs {
            products: Some(Vec::new()),
            product_layout: s("grid"),
            product_card_style: s("default"),
            product_background_color: s("#ffffff"),
            product_text_color: s("#1f2937"),
            product_accent_color: s("#000000"),
            product_button_text: s("View Product"),
        }),
        BlockType::Featured => BlockKind::Featured(FeaturedAttrs {
            featured_title: s(""),
            featured_price: s(""),
            featured_image: s(""),
            featured_url: s(""),
            featured_color: s("#1f4d36"),
            featured_text_color: s("#ffffff"),
        }),
        BlockType::Affiliate => BlockKind::Affiliate(AffiliateAttrs {
            affiliate_title: s(""),
            affiliate_code: s(""),
            affiliate_image: s(""),
            affiliate_url: s(""),
            affiliate_color: s("#ffffff"),
            affiliate_text_color: s("#1f2937"),
        }),
        BlockType::Marketing => BlockKind::Marketing(MarketingAttrs {
            marketing_id: s(""),
        }),
        BlockType::SponsoredLinks => BlockKind::SponsoredLinks(SponsoredLinksAttrs {
            title: s("Sponsored Links"),
            visible: Some(true),
        }),
        BlockType::Whatsapp => BlockKind::Whatsapp(WhatsappAttrs {
            whatsapp_number: s(""),
            whatsapp_message: s(""),
            whatsapp_style: Some(ButtonStyle::Solid),
            whatsapp_shape: Some(ButtonShape::Pill),
            accent: s("#25D366"),
            text_color: s("#ffffff"),
            ..Default::default()
        }),
        BlockType::Instagram => BlockKind::Instagram(InstagramAttrs {
            instagram_username: s(""),
            instagram_display_type: s("grid"),
            instagram_text_color: s("#000000"),
            instagram_text_position: s("bottom"),
            instagram_show_text: Some(true),
            ..Default::default()
        }),
        BlockType::Threads => BlockKind::Threads(ThreadsAttrs {
            threads_username: s(""),
            threads_variation: s("thread-grid"),
        }),
        BlockType::Spacer => BlockKind::Spacer(SpacerAttrs {
            style: Some(BlockStyle {
                height: s("20px"),
                ..Default::default()
            }),
        }),
        BlockType::Social => BlockKind::Social(SocialAttrs {
            socials: Some(SocialLinks::new()),
            align: Some(Align::Center),
            ..Default::default()
        }),
        BlockType::Footer => BlockKind::Footer(FooterAttrs {
            footer_text: s(""),
            address: s(""),
            unsubscribe_url: s(""),
            align: Some(Align::Center),
            ..Default::default()
        }),
        BlockType::Columns => BlockKind::Columns(ColumnsAttrs {
            column_count: Some(2),
            columns: Some(vec![Column::default(), Column::default()]),
            ..Default::default()
        }),
    }
}

/// Overlays the preset named `name`. Returns `false` when the type has no
/// such preset, leaving `kind` untouched.
pub(crate) fn apply_variation(kind: &mut BlockKind, name: &str) -> bool {
    match kind {
        BlockKind::Button(attrs) => match name {
            "button-outline" => {
                attrs.button_style = Some(ButtonStyle::Outline);
                attrs.text_color = s("#111827");
            }
            "button-gradient" => {
                attrs.button_style = Some(ButtonStyle::Gradient);
                attrs.button_shape = Some(ButtonShape::Pill);
                attrs.accent = s("#6366f1");
                attrs.button_shadow_color = s("#ec4899");
            }
            "button-neon" => {
                attrs.button_style = Some(ButtonStyle::Neon);
                attrs.button_shape = Some(ButtonShape::Pill);
                attrs.accent = s("#22c55e");
                attrs.text_color = s("#22c55e");
            }
            _ => return false,
        },
        BlockKind::Youtube(attrs) => {
            if !variations(BlockType::Youtube).contains(&name) {
                return false;
            }
            attrs.youtube_variation = s(name);
        }
        BlockKind::Spotify(attrs) => {
            if !variations(BlockType::Spotify).contains(&name) {
                return false;
            }
            attrs.spotify_variation = s(name);
            attrs.spotify_compact = Some(name == "single-track");
        }
        BlockKind::Socials(attrs) => {
            match name {
                "icon-grid" => attrs.socials_layout = Some(SocialsLayout::Row),
                "detailed-list" => {
                    attrs.socials_layout = Some(SocialsLayout::Column);
                    attrs.socials_label = Some(true);
                }
                "floating-buttons" => attrs.socials_layout = Some(SocialsLayout::Row),
                _ => return false,
            }
            attrs.socials_variation = s(name);
        }
        BlockKind::QrCode(attrs) => {
            attrs.qr_code_layout = Some(match name {
                "qrcode-single" => QrCodeLayout::Single,
                "qrcode-multiple" => QrCodeLayout::Multiple,
                "qrcode-grid" => QrCodeLayout::Grid,
                _ => return false,
            });
        }
        BlockKind::Whatsapp(attrs) => {
            match name {
                "direct-button" => {}
                "pre-filled-form" => attrs.whatsapp_shape = Some(ButtonShape::Rounded),
                _ => return false,
            }
            attrs.whatsapp_variation = s(name);
        }
        BlockKind::Instagram(attrs) => {
            match name {
                "simple-link" => attrs.instagram_show_text = Some(false),
                "grid-shop" => attrs.instagram_display_type = s("grid"),
                "visual-gallery" => attrs.instagram_display_type = s("list"),
                _ => return false,
            }
            attrs.instagram_variation = s(name);
        }
        BlockKind::Threads(attrs) => {
            if !variations(BlockType::Threads).contains(&name) {
                return false;
            }
            attrs.threads_variation = s(name);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_default_bundle() {
        for ty in BlockType::ALL {
            let block = create_default_block(ty.as_str(), None);
            assert_eq!(block.block_type(), Some(*ty));
        }
    }

    #[test]
    fn unknown_type_gets_generic_bundle() {
        let block = create_default_block("hologram", None);
        assert_eq!(block.type_name(), "hologram");
        assert_eq!(block.attributes().get("title"), Some(&Value::String(String::new())));
    }

    #[test]
    fn every_listed_variation_applies() {
        for ty in BlockType::ALL {
            for name in variations(*ty) {
                let mut kind = default_kind(*ty, DEFAULT_TITLE);
                assert!(apply_variation(&mut kind, name), "{ty} / {name}");
            }
        }
    }

    #[test]
    fn unknown_variation_keeps_base_bundle() {
        let plain = create_default_block("button", None);
        let odd = create_default_block("button", Some("button-sparkle"));
        assert_eq!(plain.kind(), odd.kind());
    }

    #[test]
    fn title_applies_to_heading() {
        let block = create_block("heading", Some("Welcome"), None);
        match block.kind() {
            BlockKind::Heading(attrs) => assert_eq!(attrs.title.as_deref(), Some("Welcome")),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
