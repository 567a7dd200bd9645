//! Stateful editor over one block document.
//!
//! Structural operations (add, delete, reorder, move) snapshot the document
//! into a bounded [`History`] before mutating it. A delete snapshots even
//! when the id is missing. Attribute updates and whole
//! block replacement do not. Lookups by id tolerate absence and report it
//! through their return value instead of failing.

use crate::model::{Block, create_block};
use serde_json::Value;

mod history;

pub use history::{HISTORY_CAPACITY, History};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockEditor {
    key: Option<String>,
    blocks: Vec<Block>,
    history: History,
    redo: History,
    saved: Vec<Block>,
}

impl BlockEditor {
    pub fn new() -> Self {
        Self::with_blocks(Vec::new())
    }

    /// Starts editing `blocks`, treating them as the saved state.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            key: None,
            saved: blocks.clone(),
            blocks,
            history: History::new(),
            redo: History::new(),
        }
    }

    /// Starts editing the document identified by `key`.
    pub fn with_key(key: impl Into<String>, blocks: Vec<Block>) -> Self {
        let mut editor = Self::with_blocks(blocks);
        editor.key = Some(key.into());
        editor
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    fn snapshot(&mut self) {
        self.history.push(self.blocks.clone());
        self.redo.clear();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.id().as_str() == id)
    }

    /// Creates a block with its type's defaults and prepends it.
    pub fn add_block(
        &mut self,
        type_name: &str,
        default_title: Option<&str>,
        variation: Option<&str>,
    ) -> Block {
        self.snapshot();
        let block = create_block(type_name, default_title, variation);
        tracing::debug!(id = %block.id(), block_type = type_name, "add block");
        self.blocks.insert(0, block.clone());
        block
    }

    /// Merges `partial` into the attributes of block `id`.
    ///
    /// Returns `false` when the block is missing or `partial` is not a JSON
    /// object.
    pub fn update_block(&mut self, id: &str, partial: &Value) -> bool {
        let Some(partial) = partial.as_object() else {
            tracing::warn!(id, "ignoring non-object attribute update");
            return false;
        };
        let Some(index) = self.position(id) else {
            tracing::debug!(id, "update of missing block");
            return false;
        };
        self.blocks[index].merge_attributes(partial);
        self.redo.clear();
        true
    }

    pub fn delete_block(&mut self, id: &str) -> bool {
        self.snapshot();
        let Some(index) = self.position(id) else {
            tracing::debug!(id, "delete of missing block");
            return false;
        };
        self.blocks.remove(index);
        tracing::debug!(id, "delete block");
        true
    }

    /// Replaces the whole sequence. The caller owns id uniqueness.
    pub fn reorder_blocks(&mut self, blocks: Vec<Block>) {
        self.snapshot();
        tracing::debug!(len = blocks.len(), "reorder blocks");
        self.blocks = blocks;
    }

    /// Moves the block at `from` so it ends up at index `to`.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        if from >= self.blocks.len() || to >= self.blocks.len() {
            tracing::debug!(from, to, len = self.blocks.len(), "move out of range");
            return false;
        }
        self.snapshot();
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }

    /// Restores the snapshot taken before the last structural operation.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.blocks, previous);
        self.redo.push(current);
        tracing::debug!(remaining = self.history.len(), "undo");
        true
    }

    /// Re-applies the state most recently undone.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.blocks, next);
        self.history.push(current);
        tracing::debug!(remaining = self.redo.len(), "redo");
        true
    }

    pub fn get_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id().as_str() == id)
    }

    /// Swaps block `id` for `block` in place.
    pub fn replace_block(&mut self, id: &str, block: Block) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(id, "replace of missing block");
            return false;
        };
        self.blocks[index] = block;
        self.redo.clear();
        true
    }

    /// Switches to another document. A different key resets the blocks to
    /// `initial` and drops all undo and redo state; the same key is a no-op.
    pub fn rekey(&mut self, key: &str, initial: Vec<Block>) -> bool {
        if self.key.as_deref() == Some(key) {
            return false;
        }
        tracing::debug!(from = ?self.key, to = key, "rekey editor");
        *self = Self::with_key(key, initial);
        true
    }

    /// Whether the document differs from the last saved state.
    pub fn is_dirty(&self) -> bool {
        self.blocks != self.saved
    }

    pub fn mark_saved(&mut self) {
        self.saved = self.blocks.clone();
    }
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new()
    }
}
