//! Functions: an entry block and the set of blocks reachable via the CFG.

use crate::ids::BlockId;
use crate::interner::Interner;
use crate::ir::block::BasicBlock;
use indexmap::IndexMap;

/// A function body: an entry block id and its basic blocks, keyed by id in
/// insertion order (stable, arbitrary) iteration order.
///
/// The function owns its blocks; blocks own their instructions. Operands
/// referencing variables or blocks do so by identity only, never by
/// ownership — see the IR's ownership design notes.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub entry: BlockId,
    blocks: IndexMap<BlockId, BasicBlock>,
    pub interner: Interner,
}

impl Function {
    pub fn new(name: impl Into<String>, entry: BlockId) -> Self {
        Self {
            name: name.into(),
            entry,
            blocks: IndexMap::new(),
            interner: Interner::new(),
        }
    }

    pub fn add_block(&mut self, block: BasicBlock) {
        self.blocks.insert(block.id, block);
    }

    pub fn get_block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(&id)
    }

    pub fn get_block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(&id)
    }

    /// Iteration over this function's blocks in stable, arbitrary order
    /// (insertion order).
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.values()
    }

    pub fn blocks_mut(&mut self) -> impl Iterator<Item = &mut BasicBlock> {
        self.blocks.values_mut()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.keys().copied()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn entry_block(&self) -> BlockId {
        self.entry
    }
}
