#![no_main]

use blockpage::{BlockEditor, BlockType, HISTORY_CAPACITY};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut editor = BlockEditor::new();
    for chunk in data.chunks(3) {
        let [op, a, b] = match chunk {
            [op, a, b] => [*op, *a, *b],
            _ => break,
        };
        match op % 6 {
            0 => {
                let ty = BlockType::ALL[a as usize % BlockType::ALL.len()];
                editor.add_block(ty.as_str(), None, None);
            }
            1 => {
                let id = editor
                    .blocks()
                    .get(a as usize % editor.len().max(1))
                    .map(|block| block.id().as_str().to_string());
                if let Some(id) = id {
                    editor.delete_block(&id);
                }
            }
            2 => {
                editor.move_block(a as usize % 8, b as usize % 8);
            }
            3 => {
                editor.undo();
            }
            4 => {
                editor.redo();
            }
            _ => {
                let mut blocks = editor.blocks().to_vec();
                blocks.reverse();
                editor.reorder_blocks(blocks);
            }
        }
        assert!(editor.history().len() <= HISTORY_CAPACITY);
    }
});
