use crate::WrappedBlock;

/// A [`Chunk`] is a contiguous run of L2 blocks committed together within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The blocks of the chunk, ascending by number.
    pub blocks: Vec<WrappedBlock>,
}

impl Chunk {
    /// Returns a new [`Chunk`].
    pub const fn new(blocks: Vec<WrappedBlock>) -> Self {
        Self { blocks }
    }

    /// Returns the count of L1 messages popped by the chunk, skipped messages included, given the
    /// total count of messages popped before it.
    pub fn num_l1_messages(&self, total_l1_messages_popped_before: u64) -> u64 {
        self.blocks
            .iter()
            .fold((0u64, total_l1_messages_popped_before), |(count, total), block| {
                let popped = block.num_l1_messages(total);
                (count.saturating_add(popped), total.saturating_add(popped))
            })
            .0
    }

    /// Returns the last block of the chunk.
    pub fn last_block(&self) -> Option<&WrappedBlock> {
        self.blocks.last()
    }
}
