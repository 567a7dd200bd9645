use blockpage::{Block, BlockEditor, BlockKind, BlockType, HISTORY_CAPACITY};
use serde_json::json;

fn fixed_block(id: &str, ty: BlockType) -> Block {
    Block::with_id(id, BlockKind::empty(ty))
}

fn ids(editor: &BlockEditor) -> Vec<String> {
    editor
        .blocks()
        .iter()
        .map(|b| b.id().as_str().to_string())
        .collect()
}

#[test]
fn add_then_undo_restores_empty_document() {
    let mut editor = BlockEditor::new();
    editor.add_block("heading", None, None);
    assert_eq!(editor.len(), 1);
    assert!(editor.undo());
    assert!(editor.is_empty());
}

#[test]
fn undo_on_empty_history_is_noop() {
    let mut editor = BlockEditor::with_blocks(vec![fixed_block("a", BlockType::Text)]);
    assert!(!editor.undo());
    assert_eq!(ids(&editor), vec!["a"]);
}

#[test]
fn delete_missing_leaves_document_unchanged() {
    let mut editor = BlockEditor::with_blocks(vec![
        fixed_block("a", BlockType::Text),
        fixed_block("b", BlockType::Button),
    ]);
    assert!(!editor.delete_block("nonexistent"));
    assert_eq!(ids(&editor), vec!["a", "b"]);
    assert_eq!(editor.history().len(), 1);

    assert!(editor.undo());
    assert_eq!(ids(&editor), vec!["a", "b"]);
    assert!(editor.history().is_empty());
}

#[test]
fn missing_id_operations_are_noops() {
    let blocks = vec![fixed_block("a", BlockType::Text)];
    let mut editor = BlockEditor::with_blocks(blocks.clone());
    assert!(editor.get_block("zzz").is_none());
    assert!(!editor.update_block("zzz", &json!({ "body": "x" })));
    assert!(!editor.replace_block("zzz", fixed_block("c", BlockType::Divider)));
    assert_eq!(editor.blocks(), blocks.as_slice());
    assert!(editor.history().is_empty());
}

#[test]
fn history_is_bounded_with_fifo_eviction() {
    let mut editor = BlockEditor::new();
    let mut states = vec![Vec::new()];
    for _ in 0..(HISTORY_CAPACITY + 5) {
        editor.add_block("text", None, None);
        states.push(editor.blocks().to_vec());
    }
    assert_eq!(editor.history().len(), HISTORY_CAPACITY);
    // 25 operations: the oldest retained snapshot precedes the 20th-from-last.
    let oldest = editor.history().oldest().unwrap();
    assert_eq!(oldest, states[5].as_slice());
    assert_eq!(oldest.len(), 5);
}

#[test]
fn undo_walks_back_through_structural_ops() {
    let a = fixed_block("a", BlockType::Text);
    let b = fixed_block("b", BlockType::Image);
    let mut editor = BlockEditor::with_blocks(vec![a.clone(), b.clone()]);

    editor.reorder_blocks(vec![b.clone(), a.clone()]);
    editor.delete_block("a");
    editor.move_block(0, 0);
    assert_eq!(ids(&editor), vec!["b"]);

    editor.undo();
    assert_eq!(ids(&editor), vec!["b"]);
    editor.undo();
    assert_eq!(ids(&editor), vec!["b", "a"]);
    editor.undo();
    assert_eq!(ids(&editor), vec!["a", "b"]);
    assert!(!editor.undo());
}

#[test]
fn attribute_updates_are_not_undoable() {
    let mut editor = BlockEditor::new();
    let block = editor.add_block("text", None, None);
    editor.update_block(block.id().as_str(), &json!({ "body": "hello" }));
    editor.update_block(block.id().as_str(), &json!({ "body": "hello again" }));
    assert_eq!(editor.history().len(), 1);
    editor.undo();
    assert!(editor.is_empty());
}

#[test]
fn redo_restores_undone_state() {
    let mut editor = BlockEditor::new();
    let block = editor.add_block("button", None, Some("button-neon"));
    editor.undo();
    assert!(editor.can_redo());
    assert!(editor.redo());
    assert_eq!(editor.blocks(), std::slice::from_ref(&block));
    assert!(!editor.can_redo());
    assert!(editor.can_undo());
}

#[test]
fn structural_op_clears_redo() {
    let mut editor = BlockEditor::new();
    editor.add_block("text", None, None);
    editor.undo();
    editor.add_block("heading", None, None);
    assert!(!editor.can_redo());
    assert!(!editor.redo());
}

#[test]
fn attribute_update_clears_redo() {
    let mut editor = BlockEditor::new();
    let kept = editor.add_block("text", None, None);
    editor.add_block("divider", None, None);
    editor.undo();
    editor.update_block(kept.id().as_str(), &json!({ "body": "edited" }));
    assert!(!editor.can_redo());
}

#[test]
fn rekey_resets_document_and_history() {
    let mut editor = BlockEditor::with_key("profile-a", Vec::new());
    editor.add_block("text", None, None);
    editor.add_block("text", None, None);
    editor.undo();

    let initial = vec![fixed_block("x", BlockType::Heading)];
    assert!(editor.rekey("profile-b", initial.clone()));
    assert_eq!(editor.key(), Some("profile-b"));
    assert_eq!(editor.blocks(), initial.as_slice());
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(!editor.is_dirty());
    assert!(!editor.undo());
    assert_eq!(editor.blocks(), initial.as_slice());
}

#[test]
fn replace_swaps_block_in_place_without_snapshot() {
    let mut editor = BlockEditor::with_blocks(vec![
        fixed_block("a", BlockType::Text),
        fixed_block("b", BlockType::Text),
    ]);
    assert!(editor.replace_block("b", fixed_block("c", BlockType::Spacer)));
    assert_eq!(ids(&editor), vec!["a", "c"]);
    assert_eq!(editor.get_block("c").unwrap().block_type(), Some(BlockType::Spacer));
    assert!(editor.history().is_empty());
}

#[test]
fn move_block_reorders_by_index() {
    let mut editor = BlockEditor::with_blocks(vec![
        fixed_block("a", BlockType::Text),
        fixed_block("b", BlockType::Text),
        fixed_block("c", BlockType::Text),
    ]);
    assert!(editor.move_block(0, 2));
    assert_eq!(ids(&editor), vec!["b", "c", "a"]);
    assert!(editor.move_block(2, 0));
    assert_eq!(ids(&editor), vec!["a", "b", "c"]);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn update_cannot_change_type_or_id() {
    let mut editor = BlockEditor::new();
    let block = editor.add_block("heading", Some("Hi"), None);
    editor.update_block(
        block.id().as_str(),
        &json!({ "type": "button", "id": "hijack", "textColor": "#ff0000" }),
    );
    let updated = editor.get_block(block.id().as_str()).unwrap();
    assert_eq!(updated.block_type(), Some(BlockType::Heading));
    assert_eq!(updated.attributes()["textColor"], json!("#ff0000"));
    assert_eq!(updated.attributes()["title"], json!("Hi"));
}
