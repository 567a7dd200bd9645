//! Attribute payloads for every block type.
//!
//! Every attribute is optional. Values that fail to parse into the expected
//! shape are dropped one field at a time, so a block with a malformed
//! `gridItems` still keeps its `title`.

use super::Block;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Deserializes a field, turning any shape mismatch into `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

macro_rules! attrs {
    ($(#[$meta:meta])* $name:ident { $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(
                    skip_serializing_if = "Option::is_none",
                    deserialize_with = "crate::model::attrs::lenient"
                )]
                pub $field: Option<$ty>,
            )*
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Visual preset for link buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonStyle {
    Solid,
    Outline,
    Ghost,
    HardShadow,
    SoftShadow,
    #[serde(rename = "3d")]
    ThreeD,
    Glass,
    Gradient,
    Neumorphism,
    Clay,
    Cyberpunk,
    Pixel,
    Neon,
    Sketch,
    GradientBorder,
    MinimalUnderline,
    Architect,
    Material,
    Brutalist,
    OutlineThick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    Pill,
    Square,
    Rounded,
}

impl ButtonShape {
    pub fn radius(self) -> &'static str {
        match self {
            ButtonShape::Pill => "9999px",
            ButtonShape::Square => "8px",
            ButtonShape::Rounded => "16px",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrCodeLayout {
    Single,
    Multiple,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialsLayout {
    Row,
    Column,
}

/// Platform name to handle or URL, kept sorted by platform.
///
/// Entries whose value is not a string are skipped on load; the rest of the
/// map survives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SocialLinks(BTreeMap<String, String>);

impl SocialLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, platform: impl Into<String>, handle: impl Into<String>) {
        self.0.insert(platform.into(), handle.into());
    }

    pub fn get(&self, platform: &str) -> Option<&str> {
        self.0.get(platform).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a SocialLinks {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SocialLinks {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'de> Deserialize<'de> for SocialLinks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let mut links = SocialLinks::new();
        for (platform, value) in raw {
            match value {
                Value::String(handle) => links.insert(platform, handle),
                other => {
                    tracing::debug!(%platform, value = %other, "skipping non-string social handle")
                }
            }
        }
        Ok(links)
    }
}

attrs!(
    /// Free-form CSS overrides carried by email blocks.
    BlockStyle {
        padding: String,
        color: String,
        background_color: String,
        font_size: String,
        line_height: String,
        width: String,
        height: String,
        border_radius: String,
        border_width: String,
        border_color: String,
        v_padding: String,
        h_padding: String,
    }
);

attrs!(GridItem {
    id: String,
    title: String,
    url: String,
    image: String,
    icon: String,
});

attrs!(QrCodeItem {
    id: String,
    label: String,
    value: String,
});

attrs!(ExperienceItem {
    id: String,
    role: String,
    company: String,
    period: String,
    description: String,
});

attrs!(TourDate {
    id: String,
    date: String,
    location: String,
    venue: String,
    image: String,
    ticket_url: String,
    sold_out: bool,
    selling_fast: bool,
});

attrs!(
    /// A product reference. `id` points at a record owned by the catalog service.
    ProductItem {
        id: String,
        title: String,
        price: String,
        image: String,
        url: String,
    }
);

/// One cell of a `columns` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub blocks: Vec<Block>,
}

attrs!(HeadingAttrs {
    title: String,
    body: String,
    content: String,
    align: Align,
    font_size: String,
    font_weight: String,
    text_color: String,
    style: BlockStyle,
});

attrs!(TextAttrs {
    body: String,
    content: String,
    align: Align,
    font_size: String,
    font_weight: String,
    text_color: String,
    style: BlockStyle,
});

attrs!(ButtonAttrs {
    title: String,
    href: String,
    content: String,
    url: String,
    accent: String,
    text_color: String,
    button_style: ButtonStyle,
    button_shape: ButtonShape,
    button_shadow_color: String,
    align: Align,
    style: BlockStyle,
});

attrs!(ButtonGridAttrs {
    title: String,
    grid_items: Vec<GridItem>,
    grid_columns: u32,
    accent: String,
    text_color: String,
});

attrs!(ImageAttrs {
    title: String,
    media_url: String,
    href: String,
    content: String,
    url: String,
    alt: String,
    align: Align,
    style: BlockStyle,
});

attrs!(VideoAttrs {
    title: String,
    media_url: String,
});

attrs!(YoutubeAttrs {
    title: String,
    youtube_url: String,
    youtube_variation: String,
});

attrs!(SpotifyAttrs {
    title: String,
    spotify_url: String,
    spotify_compact: bool,
    spotify_variation: String,
});

attrs!(SocialsAttrs {
    socials: SocialLinks,
    socials_layout: SocialsLayout,
    socials_label: bool,
    socials_variation: String,
    align: Align,
    style: BlockStyle,
});

attrs!(SocialAttrs {
    socials: SocialLinks,
    align: Align,
    style: BlockStyle,
});

attrs!(DividerAttrs {
    color: String,
    style: BlockStyle,
});

attrs!(QrCodeAttrs {
    qr_code_title: String,
    qr_code_layout: QrCodeLayout,
    qr_code_value: String,
    qr_code_color: String,
    qr_code_bg_color: String,
    qr_code_items: Vec<QrCodeItem>,
});

attrs!(CalendarAttrs {
    calendar_title: String,
    calendar_url: String,
    calendar_color: String,
    calendar_text_color: String,
    calendar_accent_color: String,
});

attrs!(MapAttrs {
    map_title: String,
    map_address: String,
});

attrs!(EventAttrs {
    event_title: String,
    event_date: String,
    event_button_text: String,
    event_button_url: String,
    event_color: String,
    event_text_color: String,
});

attrs!(FormAttrs {
    title: String,
    form_id: String,
    form_background_color: String,
    form_text_color: String,
});

attrs!(PollAttrs {
    poll_id: String,
    poll_title: String,
});

attrs!(PortfolioAttrs {
    portfolio_title: String,
});

attrs!(ExperienceAttrs {
    experience_title: String,
    experiences: Vec<ExperienceItem>,
    experience_role_color: String,
    experience_text_color: String,
    experience_line_color: String,
});

attrs!(TourAttrs {
    tour_title: String,
    tours: Vec<TourDate>,
});

attrs!(BlogAttrs {
    blog_layout: String,
    blog_card_style: String,
    blog_post_count: u32,
    blog_background_color: String,
    blog_text_color: String,
    blog_title_color: String,
    blog_date_color: String,
    blog_tag_background_color: String,
    blog_tag_text_color: String,
});

attrs!(ProductAttrs {
    products: Vec<ProductItem>,
    product_layout: String,
    product_card_style: String,
    product_background_color: String,
    product_text_color: String,
    product_accent_color: String,
    product_button_text: String,
});

attrs!(FeaturedAttrs {
    featured_title: String,
    featured_price: String,
    featured_image: String,
    featured_url: String,
    featured_color: String,
    featured_text_color: String,
});

attrs!(AffiliateAttrs {
    affiliate_title: String,
    affiliate_code: String,
    affiliate_image: String,
    affiliate_url: String,
    affiliate_color: String,
    affiliate_text_color: String,
});

attrs!(MarketingAttrs { marketing_id: String });

attrs!(SponsoredLinksAttrs {
    title: String,
    visible: bool,
});

attrs!(WhatsappAttrs {
    whatsapp_number: String,
    whatsapp_message: String,
    whatsapp_style: ButtonStyle,
    whatsapp_shape: ButtonShape,
    whatsapp_variation: String,
    accent: String,
    text_color: String,
});

attrs!(InstagramAttrs {
    instagram_username: String,
    instagram_display_type: String,
    instagram_text_color: String,
    instagram_text_position: String,
    instagram_show_text: bool,
    instagram_variation: String,
});

attrs!(ThreadsAttrs {
    threads_username: String,
    threads_variation: String,
});

attrs!(SpacerAttrs { style: BlockStyle });

attrs!(FooterAttrs {
    footer_text: String,
    address: String,
    unsubscribe_url: String,
    align: Align,
    style: BlockStyle,
});

attrs!(ColumnsAttrs {
    column_count: u32,
    columns: Vec<Column>,
    style: BlockStyle,
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_field_is_dropped_alone() {
        let attrs: ButtonGridAttrs = serde_json::from_value(json!({
            "title": "Links",
            "gridItems": "not a list",
            "gridColumns": 3
        }))
        .unwrap();
        assert_eq!(attrs.title.as_deref(), Some("Links"));
        assert_eq!(attrs.grid_items, None);
        assert_eq!(attrs.grid_columns, Some(3));
    }

    #[test]
    fn unknown_button_style_is_dropped() {
        let attrs: ButtonAttrs =
            serde_json::from_value(json!({ "buttonStyle": "sparkle", "accent": "#fff" })).unwrap();
        assert_eq!(attrs.button_style, None);
        assert_eq!(attrs.accent.as_deref(), Some("#fff"));
    }

    #[test]
    fn three_d_style_uses_wire_name() {
        let value = serde_json::to_value(ButtonStyle::ThreeD).unwrap();
        assert_eq!(value, json!("3d"));
        let value = serde_json::to_value(ButtonStyle::MinimalUnderline).unwrap();
        assert_eq!(value, json!("minimal-underline"));
    }

    #[test]
    fn camel_case_keys_on_the_wire() {
        let attrs = QrCodeAttrs {
            qr_code_bg_color: Some("#FFFFFF".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&attrs).unwrap(),
            json!({ "qrCodeBgColor": "#FFFFFF" })
        );
    }

    #[test]
    fn nested_item_fields_are_lenient() {
        let item: TourDate =
            serde_json::from_value(json!({ "date": "2024-05-01", "soldOut": "yes" })).unwrap();
        assert_eq!(item.date.as_deref(), Some("2024-05-01"));
        assert_eq!(item.sold_out, None);
    }

    #[test]
    fn social_entries_are_lenient_one_by_one() {
        let attrs: SocialsAttrs = serde_json::from_value(json!({
            "socials": { "instagram": "portyo", "tiktok": null, "x": 7 }
        }))
        .unwrap();
        let links = attrs.socials.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links.get("instagram"), Some("portyo"));
    }

    #[test]
    fn social_links_serialize_as_a_plain_map() {
        let links: SocialLinks = [("github", "portyo"), ("email", "hi@portyo.me")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({ "email": "hi@portyo.me", "github": "portyo" })
        );
    }
}
