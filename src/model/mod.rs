//! Block document model.
//!
//! A document is an ordered `Vec<Block>`. Each block is an id plus a
//! [`BlockKind`], a closed sum type with one variant per block type and an
//! `Unknown` variant that keeps foreign blocks intact across a load/save
//! cycle.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub mod attrs;
pub mod defaults;

pub use attrs::*;
pub use defaults::{DEFAULT_TITLE, create_block, create_default_block, variations};

/// Opaque block identifier. Fresh ids are random UUIDs; persisted ids of any
/// string form are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block type: {0}")]
pub struct UnknownBlockType(pub String);

macro_rules! block_kinds {
    ($( $variant:ident => $wire:literal, $attrs:ty; )+) => {
        /// The closed set of block types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BlockType {
            $( $variant, )+
        }

        impl BlockType {
            pub const ALL: &'static [BlockType] = &[ $( BlockType::$variant, )+ ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( BlockType::$variant => $wire, )+
                }
            }
        }

        impl FromStr for BlockType {
            type Err = UnknownBlockType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(BlockType::$variant), )+
                    other => Err(UnknownBlockType(other.to_string())),
                }
            }
        }

        #[derive(Debug, Clone, PartialEq)]
        pub enum BlockKind {
            $( $variant($attrs), )+
            Unknown {
                type_name: String,
                attributes: Map<String, Value>,
            },
        }

        impl BlockKind {
            /// A block of type `ty` with no attributes set.
            pub fn empty(ty: BlockType) -> Self {
                match ty {
                    $( BlockType::$variant => BlockKind::$variant(<$attrs>::default()), )+
                }
            }

            pub fn block_type(&self) -> Option<BlockType> {
                match self {
                    $( BlockKind::$variant(_) => Some(BlockType::$variant), )+
                    BlockKind::Unknown { .. } => None,
                }
            }

            /// Parses a flat attribute map into the payload for `ty`.
            pub fn from_attributes(ty: BlockType, attributes: Map<String, Value>) -> Self {
                let value = Value::Object(attributes);
                match ty {
                    $(
                        BlockType::$variant => {
                            BlockKind::$variant(serde_json::from_value(value).unwrap_or_default())
                        }
                    )+
                }
            }

            /// The payload as a flat camelCase map, absent attributes omitted.
            pub fn attributes(&self) -> Map<String, Value> {
                match self {
                    $( BlockKind::$variant(attrs) => to_map(attrs), )+
                    BlockKind::Unknown { attributes, .. } => attributes.clone(),
                }
            }
        }
    };
}

block_kinds! {
    Heading => "heading", HeadingAttrs;
    Text => "text", TextAttrs;
    Button => "button", ButtonAttrs;
    ButtonGrid => "button_grid", ButtonGridAttrs;
    Image => "image", ImageAttrs;
    Video => "video", VideoAttrs;
    Youtube => "youtube", YoutubeAttrs;
    Spotify => "spotify", SpotifyAttrs;
    Socials => "socials", SocialsAttrs;
    Divider => "divider", DividerAttrs;
    QrCode => "qrcode", QrCodeAttrs;
    Calendar => "calendar", CalendarAttrs;
    Map => "map", MapAttrs;
    Event => "event", EventAttrs;
    Form => "form", FormAttrs;
    Poll => "poll", PollAttrs;
    Portfolio => "portfolio", PortfolioAttrs;
    Experience => "experience", ExperienceAttrs;
    Tour => "tour", TourAttrs;
    Blog => "blog", BlogAttrs;
    Product => "product", ProductAttrs;
    Featured => "featured", FeaturedAttrs;
    Affiliate => "affiliate", AffiliateAttrs;
    Marketing => "marketing", MarketingAttrs;
    SponsoredLinks => "sponsored_links", SponsoredLinksAttrs;
    Whatsapp => "whatsapp", WhatsappAttrs;
    Instagram => "instagram", InstagramAttrs;
    Threads => "threads", ThreadsAttrs;
    Spacer => "spacer", SpacerAttrs;
    Social => "social", SocialAttrs;
    Footer => "footer", FooterAttrs;
    Columns => "columns", ColumnsAttrs;
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn to_map<T: Serialize>(attrs: &T) -> Map<String, Value> {
    match serde_json::to_value(attrs) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl BlockKind {
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Unknown { type_name, .. } => type_name,
            known => known.block_type().map_or("", BlockType::as_str),
        }
    }

    /// Resolves a wire type name, keeping unrecognized names as `Unknown`.
    pub fn parse(type_name: &str, attributes: Map<String, Value>) -> Self {
        match type_name.parse::<BlockType>() {
            Ok(ty) => BlockKind::from_attributes(ty, attributes),
            Err(_) => BlockKind::Unknown {
                type_name: type_name.to_string(),
                attributes,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: BlockId,
    kind: BlockKind,
}

impl Block {
    /// Creates a block with a freshly generated id.
    pub fn new(kind: BlockKind) -> Self {
        Self::with_id(BlockId::generate(), kind)
    }

    pub fn with_id(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.kind.block_type()
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    pub fn attributes(&self) -> Map<String, Value> {
        self.kind.attributes()
    }

    /// Shallow-merges `partial` over the current attributes.
    ///
    /// `null` clears an attribute. `id` and `type` keys are ignored, so the
    /// block's identity and variant never change. Returns the keys that did
    /// not survive: names outside the type's schema and malformed values.
    pub fn merge_attributes(&mut self, partial: &Map<String, Value>) -> Vec<String> {
        let mut attributes = self.kind.attributes();
        for (key, value) in partial {
            if key == "id" || key == "type" {
                continue;
            }
            if value.is_null() {
                attributes.remove(key);
            } else {
                attributes.insert(key.clone(), value.clone());
            }
        }
        self.kind = match &self.kind {
            BlockKind::Unknown { type_name, .. } => BlockKind::Unknown {
                type_name: type_name.clone(),
                attributes,
            },
            known => match known.block_type() {
                Some(ty) => BlockKind::from_attributes(ty, attributes),
                None => return Vec::new(),
            },
        };
        let kept = self.kind.attributes();
        let dropped: Vec<String> = partial
            .iter()
            .filter(|(key, value)| {
                !value.is_null() && *key != "id" && *key != "type" && !kept.contains_key(*key)
            })
            .map(|(key, _)| key.clone())
            .collect();
        if !dropped.is_empty() {
            tracing::debug!(id = %self.id, ?dropped, "dropped attributes outside the block schema");
        }
        dropped
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = self.kind.attributes();
        let mut map = serializer.serialize_map(Some(attributes.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", self.kind.type_name())?;
        for (key, value) in &attributes {
            if key != "id" && key != "type" {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let id = match fields.remove("id") {
            Some(Value::String(id)) if !id.is_empty() => BlockId::from(id),
            Some(Value::Number(id)) => BlockId::from(id.to_string()),
            _ => BlockId::generate(),
        };
        let type_name = match fields.remove("type") {
            Some(Value::String(name)) => name,
            _ => String::new(),
        };
        Ok(Block::with_id(id, BlockKind::parse(&type_name, fields)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_type_round_trips_through_wire_name() {
        for ty in BlockType::ALL {
            assert_eq!(ty.as_str().parse::<BlockType>(), Ok(*ty));
        }
        assert_eq!(BlockType::ALL.len(), 32);
    }

    #[test]
    fn unknown_type_name_is_an_error() {
        let err = "carousel".parse::<BlockType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown block type: carousel");
    }

    #[test]
    fn flat_json_wire_format() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "heading",
            "title": "Hello",
            "align": "center"
        }))
        .unwrap();
        assert_eq!(block.id().as_str(), "b1");
        assert_eq!(block.block_type(), Some(BlockType::Heading));
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({ "id": "b1", "type": "heading", "title": "Hello", "align": "center" })
        );
    }

    #[test]
    fn unknown_block_keeps_raw_attributes() {
        let raw = json!({ "id": "x", "type": "carousel", "slides": [1, 2, 3] });
        let block: Block = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(block.block_type(), None);
        assert_eq!(block.type_name(), "carousel");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn missing_id_is_generated() {
        let block: Block = serde_json::from_value(json!({ "type": "divider" })).unwrap();
        assert!(!block.id().as_str().is_empty());
    }

    #[test]
    fn numeric_id_is_kept_as_string() {
        let block: Block = serde_json::from_value(json!({ "id": 7, "type": "divider" })).unwrap();
        assert_eq!(block.id().as_str(), "7");
    }

    #[test]
    fn merge_ignores_identity_keys() {
        let mut block = Block::with_id("b1", BlockKind::empty(BlockType::Button));
        let partial = json!({ "id": "b2", "type": "text", "title": "Go" });
        block.merge_attributes(partial.as_object().unwrap());
        assert_eq!(block.id().as_str(), "b1");
        assert_eq!(block.block_type(), Some(BlockType::Button));
        match block.kind() {
            BlockKind::Button(attrs) => assert_eq!(attrs.title.as_deref(), Some("Go")),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn merge_null_clears_attribute() {
        let mut block = Block::with_id(
            "b1",
            BlockKind::Text(TextAttrs {
                body: Some("hi".to_string()),
                ..Default::default()
            }),
        );
        block.merge_attributes(json!({ "body": null }).as_object().unwrap());
        assert_eq!(block.kind(), &BlockKind::Text(TextAttrs::default()));
    }

    #[test]
    fn merge_into_unknown_block() {
        let mut block = Block::with_id("b1", BlockKind::parse("carousel", Map::new()));
        let dropped = block.merge_attributes(json!({ "speed": 3 }).as_object().unwrap());
        assert!(dropped.is_empty());
        assert_eq!(block.attributes().get("speed"), Some(&json!(3)));
        assert_eq!(block.type_name(), "carousel");
    }

    #[test]
    fn merge_reports_keys_outside_the_schema() {
        let mut block = Block::with_id("b1", BlockKind::empty(BlockType::Button));
        let partial = json!({
            "title": "Shop",
            "buttonImage": "x.png",
            "buttonShape": 3,
            "body": null
        });
        let dropped = block.merge_attributes(partial.as_object().unwrap());
        assert_eq!(dropped, vec!["buttonImage".to_string(), "buttonShape".to_string()]);
        assert_eq!(block.attributes().get("title"), Some(&json!("Shop")));
        assert!(block.attributes().get("buttonImage").is_none());
    }
}
