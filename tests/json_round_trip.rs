use blockpage::{Block, BlockType, create_default_block, variations};
use serde_json::json;

#[test]
fn every_default_block_round_trips() {
    for ty in BlockType::ALL {
        let names = std::iter::once(None).chain(variations(*ty).iter().map(|v| Some(*v)));
        for variation in names {
            let block = create_default_block(ty.as_str(), variation);
            let encoded = serde_json::to_string(&block).unwrap();
            let decoded: Block = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, block, "{ty} {variation:?}");
        }
    }
}

#[test]
fn document_with_nested_lists_round_trips() {
    let document = json!([
        {
            "id": "grid",
            "type": "button_grid",
            "title": "Links",
            "gridColumns": 3,
            "gridItems": [
                { "id": "g1", "title": "Shop", "url": "https://shop.test", "image": "https://img.test/1.png", "icon": "bag" }
            ]
        },
        {
            "id": "tour",
            "type": "tour",
            "tourTitle": "World Tour",
            "tours": [
                { "id": "t1", "date": "2025-03-01", "location": "Lisbon", "venue": "Coliseu", "ticketUrl": "https://t.test", "soldOut": false, "sellingFast": true }
            ]
        },
        {
            "id": "xp",
            "type": "experience",
            "experiences": [
                { "id": "e1", "role": "Engineer", "company": "Portyo", "period": "2022 - now", "description": "Builds things" }
            ]
        },
        {
            "id": "cols",
            "type": "columns",
            "columnCount": 2,
            "columns": [
                { "blocks": [{ "id": "inner", "type": "text", "content": "Hi", "style": { "color": "#333333", "fontSize": "14px" } }] },
                { "blocks": [] }
            ]
        },
        {
            "id": "qr",
            "type": "qrcode",
            "qrCodeLayout": "grid",
            "qrCodeItems": [{ "id": "q1", "label": "Site", "value": "https://portyo.me" }]
        },
        { "id": "mystery", "type": "hologram", "depth": 3, "layers": ["a", "b"] }
    ]);

    let blocks: Vec<Block> = serde_json::from_value(document.clone()).unwrap();
    assert_eq!(blocks.len(), 6);
    assert_eq!(serde_json::to_value(&blocks).unwrap(), document);
}

#[test]
fn malformed_attribute_is_dropped_on_load() {
    let block: Block = serde_json::from_value(json!({
        "id": "b",
        "type": "button",
        "title": "Go",
        "buttonShape": ["pill"]
    }))
    .unwrap();
    assert_eq!(
        serde_json::to_value(&block).unwrap(),
        json!({ "id": "b", "type": "button", "title": "Go" })
    );
}

#[test]
fn socials_survive_a_non_string_entry() {
    let block: Block = serde_json::from_value(json!({
        "id": "s",
        "type": "socials",
        "socials": { "instagram": "portyo", "tiktok": null }
    }))
    .unwrap();
    assert_eq!(
        serde_json::to_value(&block).unwrap(),
        json!({ "id": "s", "type": "socials", "socials": { "instagram": "portyo" } })
    );

    let html = blockpage::render_block(&block, &blockpage::RenderTarget::default())
        .unwrap()
        .unwrap();
    assert!(html.contains("https://instagram.com/portyo"));
    assert!(!html.contains("[Social Links]"));
}
