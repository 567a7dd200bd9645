use blockpage::model::{
    Align, BlockKind, BlockType, ButtonShape, ButtonStyle, QrCodeLayout, SocialsLayout,
};
use blockpage::{DEFAULT_TITLE, create_block, create_default_block, variations};
use serde_json::{Value, json};

fn attrs(type_name: &str, variation: Option<&str>) -> serde_json::Map<String, Value> {
    create_default_block(type_name, variation).attributes()
}

#[test]
fn defaults_are_deterministic_modulo_id() {
    for ty in BlockType::ALL {
        let names = std::iter::once(None).chain(variations(*ty).iter().map(|v| Some(*v)));
        for variation in names {
            let first = create_default_block(ty.as_str(), variation);
            let second = create_default_block(ty.as_str(), variation);
            assert_ne!(first.id(), second.id());
            assert_eq!(first.kind(), second.kind(), "{ty} {variation:?}");
        }
    }
}

#[test]
fn button_neon_variation() {
    let block = create_default_block("button", Some("button-neon"));
    match block.kind() {
        BlockKind::Button(a) => {
            assert_eq!(a.button_style, Some(ButtonStyle::Neon));
            assert_eq!(a.accent.as_deref(), Some("#22c55e"));
            assert_eq!(a.button_shape, Some(ButtonShape::Pill));
        }
        other => panic!("unexpected kind {other:?}"),
    }
    let wire = block.attributes();
    assert_eq!(wire["buttonStyle"], json!("neon"));
    assert_eq!(wire["accent"], json!("#22c55e"));
}

#[test]
fn button_gradient_variation() {
    let wire = attrs("button", Some("button-gradient"));
    assert_eq!(wire["buttonStyle"], json!("gradient"));
    assert_eq!(wire["buttonShape"], json!("pill"));
    assert_eq!(wire["accent"], json!("#6366f1"));
}

#[test]
fn plain_button_defaults() {
    let wire = attrs("button", None);
    assert_eq!(wire["title"], json!(DEFAULT_TITLE));
    assert_eq!(wire["href"], json!("https://"));
    assert_eq!(wire["accent"], json!("#111827"));
    assert_eq!(wire["textColor"], json!("#ffffff"));
    assert_eq!(wire["buttonStyle"], json!("solid"));
    assert_eq!(wire["buttonShape"], json!("rounded"));
}

#[test]
fn heading_and_text_defaults() {
    let heading = attrs("heading", None);
    assert_eq!(heading["fontSize"], json!("32px"));
    assert_eq!(heading["fontWeight"], json!("800"));
    assert_eq!(heading["align"], json!("center"));
    let text = attrs("text", None);
    assert_eq!(text["textColor"], json!("#475569"));
    assert_eq!(text["body"], json!(""));
}

#[test]
fn qrcode_variations_switch_layout() {
    for (variation, layout) in [
        ("qrcode-multiple", QrCodeLayout::Multiple),
        ("qrcode-grid", QrCodeLayout::Grid),
    ] {
        match create_default_block("qrcode", Some(variation)).kind() {
            BlockKind::QrCode(a) => assert_eq!(a.qr_code_layout, Some(layout)),
            other => panic!("unexpected kind {other:?}"),
        }
    }
    assert_eq!(attrs("qrcode", None)["qrCodeBgColor"], json!("#FFFFFF"));
}

#[test]
fn detailed_list_socials_use_column_layout() {
    match create_default_block("socials", Some("detailed-list")).kind() {
        BlockKind::Socials(a) => {
            assert_eq!(a.socials_layout, Some(SocialsLayout::Column));
            assert_eq!(a.socials_variation.as_deref(), Some("detailed-list"));
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn email_kinds_have_defaults() {
    assert_eq!(attrs("spacer", None)["style"], json!({ "height": "20px" }));
    assert_eq!(attrs("social", None)["align"], json!("center"));
    let columns = attrs("columns", None);
    assert_eq!(columns["columnCount"], json!(2));
    assert_eq!(columns["columns"], json!([{ "blocks": [] }, { "blocks": [] }]));
    match create_default_block("footer", None).kind() {
        BlockKind::Footer(a) => assert_eq!(a.align, Some(Align::Center)),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn sponsored_links_visible_by_default() {
    let wire = attrs("sponsored_links", None);
    assert_eq!(wire["title"], json!("Sponsored Links"));
    assert_eq!(wire["visible"], json!(true));
}

#[test]
fn unknown_type_falls_back_to_empty_title() {
    let block = create_default_block("hologram", Some("button-neon"));
    assert_eq!(block.block_type(), None);
    assert_eq!(block.type_name(), "hologram");
    assert_eq!(block.attributes(), json!({ "title": "" }).as_object().unwrap().clone());
}

#[test]
fn caller_title_applies_to_buttons() {
    let block = create_block("button", Some("Book now"), None);
    assert_eq!(block.attributes()["title"], json!("Book now"));
}
