#![no_main]

use blockpage::{Block, RenderTarget, compile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(blocks) = serde_json::from_slice::<Vec<Block>>(data) else {
        return;
    };
    let html = compile(&blocks, &RenderTarget::default()).unwrap();
    assert!(!html.to_ascii_lowercase().contains("<script"));
});
