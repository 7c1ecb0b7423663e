use crate::{
    chunk_hash,
    constants::{SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS, SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE},
    error::EncodingError,
};

use alloy_primitives::{bytes::BufMut, keccak256, B256, U256};
use rollup_node_primitives::Chunk;

/// The batch header for V0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchHeaderV0 {
    /// The batch version.
    pub version: u8,
    /// The index of the batch.
    pub batch_index: u64,
    /// Number of L1 messages popped in the batch.
    pub l1_message_popped: u64,
    /// Number of total L1 messages popped after the batch.
    pub total_l1_message_popped: u64,
    /// The data hash of the batch.
    pub data_hash: B256,
    /// The parent batch hash.
    pub parent_batch_hash: B256,
    /// A bitmap to indicate which L1 messages are skipped in the batch.
    pub skipped_l1_message_bitmap: Vec<u8>,
}

impl BatchHeaderV0 {
    /// The length of the header without the skipped L1 message bitmap.
    pub const BYTES_LENGTH: usize = 89;

    /// Returns a new instance [`BatchHeaderV0`].
    pub const fn new(
        version: u8,
        batch_index: u64,
        l1_message_popped: u64,
        total_l1_message_popped: u64,
        data_hash: B256,
        parent_batch_hash: B256,
        skipped_l1_message_bitmap: Vec<u8>,
    ) -> Self {
        Self {
            version,
            batch_index,
            l1_message_popped,
            total_l1_message_popped,
            data_hash,
            parent_batch_hash,
            skipped_l1_message_bitmap,
        }
    }

    /// Builds the header of the batch made of the provided chunks, given the total count of L1
    /// messages popped before the batch and the hash of the parent batch.
    ///
    /// Every L1 message between the last included message and the next included one is marked as
    /// skipped in the bitmap.
    pub fn from_chunks(
        version: u8,
        batch_index: u64,
        total_l1_message_popped_before: u64,
        parent_batch_hash: B256,
        chunks: &[Chunk],
    ) -> Result<Self, EncodingError> {
        if chunks.is_empty() {
            return Err(EncodingError::EmptyBatch)
        }

        let base_index = total_l1_message_popped_before;
        let mut next_index = total_l1_message_popped_before;
        let mut chunk_hashes = Vec::with_capacity(chunks.len() * B256::len_bytes());
        let mut bitmap: Vec<U256> = Vec::new();

        for chunk in chunks {
            chunk_hashes.extend_from_slice(chunk_hash(chunk, next_index)?.as_slice());

            for block in &chunk.blocks {
                for queue_index in block.l1_messages().filter_map(|tx| tx.queue_index) {
                    if queue_index < next_index {
                        return Err(EncodingError::QueueIndexRegression {
                            block_number: block.number(),
                            expected: next_index,
                            got: queue_index,
                        })
                    }

                    for skipped in next_index..queue_index {
                        let offset = skipped - base_index;
                        let word = bitmap_word(&mut bitmap, offset);
                        word.set_bit((offset % SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS) as usize, true);
                    }
                    bitmap_word(&mut bitmap, queue_index - base_index);
                    next_index = queue_index + 1;
                }
            }
        }

        let skipped_l1_message_bitmap =
            bitmap.iter().flat_map(|word| word.to_be_bytes::<32>()).collect();

        Ok(Self {
            version,
            batch_index,
            l1_message_popped: next_index - total_l1_message_popped_before,
            total_l1_message_popped: next_index,
            data_hash: keccak256(chunk_hashes),
            parent_batch_hash,
            skipped_l1_message_bitmap,
        })
    }

    /// Computes the hash for the header.
    pub fn hash_slow(&self) -> B256 {
        let mut bytes =
            Vec::<u8>::with_capacity(Self::BYTES_LENGTH + self.skipped_l1_message_bitmap.len());
        bytes.put_slice(&self.version.to_be_bytes());
        bytes.put_slice(&self.batch_index.to_be_bytes());
        bytes.put_slice(&self.l1_message_popped.to_be_bytes());
        bytes.put_slice(&self.total_l1_message_popped.to_be_bytes());
        bytes.put_slice(&self.data_hash.0);
        bytes.put_slice(&self.parent_batch_hash.0);

        bytes.put_slice(&self.skipped_l1_message_bitmap);

        keccak256(bytes)
    }

    /// Returns the count of 256 bit words in the skipped L1 message bitmap.
    pub fn skipped_l1_message_bitmap_words(&self) -> usize {
        self.skipped_l1_message_bitmap.len() / SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE
    }
}

/// Returns the bitmap word holding the bit at `offset`, growing the bitmap if needed.
fn bitmap_word(bitmap: &mut Vec<U256>, offset: u64) -> &mut U256 {
    let index = (offset / SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS) as usize;
    if bitmap.len() <= index {
        bitmap.resize(index + 1, U256::ZERO);
    }
    &mut bitmap[index]
}
