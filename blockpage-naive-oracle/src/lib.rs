//! A naive, simple oracle implementation for differential testing.
//!
//! History is a plain `Vec` trimmed by slicing after every push; blocks are
//! handed in already built so both editors see identical ids.
use blockpage::{Block, HISTORY_CAPACITY};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Editor {
    blocks: Vec<Block>,
    history: Vec<Vec<Block>>,
    future: Vec<Vec<Block>>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn history(&self) -> &[Vec<Block>] {
        &self.history
    }

    fn save(&mut self) {
        let keep = self.history.len().min(HISTORY_CAPACITY - 1);
        let mut history = self.history[self.history.len() - keep..].to_vec();
        history.push(self.blocks.clone());
        self.history = history;
        self.future.clear();
    }

    pub fn add(&mut self, block: Block) {
        self.save();
        let mut blocks = vec![block];
        blocks.extend(self.blocks.iter().cloned());
        self.blocks = blocks;
    }

    pub fn delete(&mut self, id: &str) {
        self.save();
        self.blocks = self
            .blocks
            .iter()
            .filter(|b| b.id().as_str() != id)
            .cloned()
            .collect();
    }

    pub fn reorder(&mut self, blocks: Vec<Block>) {
        self.save();
        self.blocks = blocks;
    }

    pub fn move_block(&mut self, from: usize, to: usize) {
        if from >= self.blocks.len() || to >= self.blocks.len() {
            return;
        }
        self.save();
        let mut blocks = self.blocks.clone();
        let block = blocks.remove(from);
        blocks.insert(to, block);
        self.blocks = blocks;
    }

    pub fn replace(&mut self, id: &str, block: Block) {
        if let Some(slot) = self.blocks.iter_mut().find(|b| b.id().as_str() == id) {
            *slot = block;
            self.future.clear();
        }
    }

    pub fn undo(&mut self) {
        if let Some(previous) = self.history.pop() {
            let current = std::mem::replace(&mut self.blocks, previous);
            self.future.push(current);
            if self.future.len() > HISTORY_CAPACITY {
                self.future.remove(0);
            }
        }
    }

    pub fn redo(&mut self) {
        if let Some(next) = self.future.pop() {
            let current = std::mem::replace(&mut self.blocks, next);
            self.history.push(current);
            if self.history.len() > HISTORY_CAPACITY {
                self.history.remove(0);
            }
        }
    }
}
